//! Virtual Model Registry: the catalog behind definition lookups
//!
//! Definitions are authored as JSON or YAML files, one definition or a list
//! per file. Loading validates each definition and rejects duplicate model
//! identifiers, so every lookup answers from a consistent universe.
//!
//! # Example
//!
//! ```ignore
//! use vmodel_registry::Catalog;
//! use vmodel_resolve::{resolve_model, CustomFieldValues};
//!
//! let catalog = Catalog::load_dir("catalog")?;
//! let resolved = resolve_model("acme/qwen3-8b-chat", &catalog, &CustomFieldValues::new())?;
//! println!("{} -> {:?}", resolved.model, resolved.concrete_bases);
//! ```

pub mod catalog;
pub mod error;
pub mod loader;

pub use catalog::{Catalog, CatalogEntry};
pub use error::CatalogError;
pub use loader::{parse_definitions, DefinitionFormat};
