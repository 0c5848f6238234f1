//! Authoring errors
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("SCHEMA/model id {0:?} does not match owner/repo")]
    InvalidModelId(String),

    #[error("SCHEMA/{model}: base reference {base:?} does not match owner/repo")]
    InvalidBaseReference { model: String, base: String },

    #[error("SCHEMA/{0}: base references itself")]
    SelfReference(String),

    #[error("SCHEMA/{0}: concrete base list is empty or has an empty key")]
    EmptyConcreteBase(String),

    #[error("SCHEMA/{model}: concrete base {key} has no sources")]
    MissingSources { model: String, key: String },

    #[error("SCHEMA/{model}: custom field {key} declared twice")]
    DuplicateFieldKey { model: String, key: String },

    #[error("SCHEMA/{model}: string field {key} cannot carry a {effect} effect")]
    PromptEffectOnStringField {
        model: String,
        key: String,
        effect: String,
    },
}
