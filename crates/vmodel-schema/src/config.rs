//! Key/value configuration blocks
//!
//! The config engine that owns `load` and `operation` fields is external;
//! here a block is an ordered list of `{ key, value }` pairs with a
//! field-level get/set contract and nothing more.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One configuration field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KvConfigField {
    pub key: String,
    pub value: Value,
}

/// An opaque, mergeable configuration block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KvConfig {
    #[serde(default)]
    pub fields: Vec<KvConfigField>,
}

impl KvConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|f| f.key == key).map(|f| &f.value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.iter().any(|f| f.key == key)
    }

    /// Set a field, replacing its value in place if the key already exists
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.fields.iter_mut().find(|f| f.key == key) {
            Some(field) => field.value = value,
            None => self.fields.push(KvConfigField { key, value }),
        }
    }

    /// Builder form of [`KvConfig::set`]
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.set(key, value);
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// The `config` block of a definition
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load: Option<KvConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<KvConfig>,
}
