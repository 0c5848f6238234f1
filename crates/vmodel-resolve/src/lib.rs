//! Virtual Model Resolution
//!
//! Turns a chain of virtual model definitions into one effective model.
//!
//! # Architecture
//!
//! ```text
//! start key ─▶ Chain Resolver ─▶ Chain ─┬─▶ Config Merger ─────┬─▶ Suggestion Evaluator
//!                   ▲                   ├─▶ Metadata Reducer ──┘            │
//!                   │                   └─▶ Custom Field Engine             │
//!              lookup(key)                          │                       │
//!                                                   ▼                       ▼
//!                                              ResolvedModel ◀──────────────┘
//! ```
//!
//! Every merge rule is "first definition in the chain wins", and the chain is
//! ordered most specific first.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use serde_json::json;
//! use vmodel_resolve::{resolve_model, CustomFieldValues};
//! use vmodel_schema::VirtualModelDefinition;
//!
//! let defs: Vec<VirtualModelDefinition> = serde_json::from_value(json!([
//!     {
//!         "model": "acme/chat",
//!         "base": "acme/base",
//!         "config": { "operation": { "fields": [{ "key": "temperature", "value": 0.8 }] } }
//!     },
//!     {
//!         "model": "acme/base",
//!         "base": [{ "key": "acme/base-gguf", "sources": [
//!             { "type": "huggingface", "user": "acme", "repo": "base-GGUF" }
//!         ]}],
//!         "config": { "operation": { "fields": [{ "key": "temperature", "value": 0.2 }] } }
//!     }
//! ])).unwrap();
//! let catalog: HashMap<String, VirtualModelDefinition> =
//!     defs.into_iter().map(|d| (d.model.clone(), d)).collect();
//!
//! let resolved = resolve_model("acme/chat", &catalog, &CustomFieldValues::new()).unwrap();
//! assert_eq!(resolved.operation.get("temperature"), Some(&json!(0.8)));
//! assert_eq!(resolved.concrete_bases[0].key, "acme/base-gguf");
//! ```

pub mod chain;
pub mod config_merge;
pub mod custom_fields;
pub mod error;
pub mod lookup;
pub mod metadata;
pub mod model;
pub mod state;
pub mod suggestions;

pub use chain::{resolve_chain, resolve_chain_async, Chain, ChainWalker, MAX_CHAIN_DEPTH};
pub use config_merge::MergedConfig;
pub use custom_fields::{resolve_fields, CustomFieldValues, FieldResolution, ResolvedEffect};
pub use error::{FieldError, LookupError, ResolveError};
pub use lookup::{AsyncDefinitionLookup, DefinitionLookup, TimeoutLookup};
pub use model::{resolve_model, resolve_model_async, ResolvedModel};
pub use state::ResolutionState;
