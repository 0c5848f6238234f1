//! Virtual Model Schema
//!
//! Serde types for virtual model definitions as they are authored in a
//! catalog. A virtual model names one logical model and points, through its
//! `base`, either at another virtual model or at the concrete downloadable
//! artifacts that back it.
//!
//! ```text
//! owner/leaf ──base──▶ owner/mid ──base──▶ owner/root ──base──▶ [ConcreteModelBase, ...]
//! ```
//!
//! The JSON shape is camelCase and identical to what authors write:
//!
//! ```
//! use vmodel_schema::{VirtualModelDefinition, ModelBase};
//!
//! let def: VirtualModelDefinition = serde_json::from_value(serde_json::json!({
//!     "model": "acme/llama-3-8b",
//!     "base": [{ "key": "acme/llama-3-8b-gguf", "sources": [
//!         { "type": "huggingface", "user": "acme", "repo": "llama-3-8b-GGUF" }
//!     ]}],
//!     "tags": ["8B"]
//! })).unwrap();
//!
//! assert!(matches!(def.base, ModelBase::Concrete(ref bases) if bases.len() == 1));
//! def.validate().unwrap();
//! ```

pub mod config;
pub mod custom_field;
pub mod definition;
pub mod error;
pub mod json;
pub mod metadata;
pub mod suggestion;

pub use config::{KvConfig, KvConfigField, ModelConfig};
pub use custom_field::{CustomFieldDefinition, CustomFieldEffect, CustomFieldKind};
pub use definition::{is_valid_model_id, ConcreteModelBase, ModelBase, ModelSource, VirtualModelDefinition};
pub use error::SchemaError;
pub use json::deep_equals;
pub use metadata::{MetadataOverrides, ModelDomain, TriState};
pub use suggestion::{Condition, Suggestion};
