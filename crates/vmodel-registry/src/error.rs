//! Catalog errors
use std::path::PathBuf;
use thiserror::Error;
use vmodel_schema::SchemaError;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("CATALOG/failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CATALOG/failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("CATALOG/{origin}: {source}")]
    Invalid {
        origin: String,
        #[source]
        source: SchemaError,
    },

    #[error("CATALOG/model {model} defined twice")]
    DuplicateModel { model: String },
}
