//! Conditional configuration suggestions

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::KvConfigField;

/// A predicate over the resolved configuration and metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Condition {
    /// Holds when the value at `key` deep-equals `value`
    Equals { key: String, value: Value },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub message: String,
    /// All must hold, evaluated in order
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// Field values to propose
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<KvConfigField>>,
}
