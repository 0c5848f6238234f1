//! Metadata overrides
//!
//! A partial patch over the catalog metadata of the concrete models behind a
//! virtual model. Tri-state fields carry `"mixed"` when the models behind it
//! disagree.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelDomain {
    Llm,
    Embedding,
}

/// `true`, `false` or `"mixed"`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriState {
    True,
    False,
    Mixed,
}

impl TriState {
    /// Combine two contributions. Disagreement, or any `Mixed` input,
    /// yields `Mixed`.
    pub fn combine(self, other: TriState) -> TriState {
        if self == other {
            self
        } else {
            TriState::Mixed
        }
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        if value {
            TriState::True
        } else {
            TriState::False
        }
    }
}

impl fmt::Display for TriState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TriState::True => write!(f, "true"),
            TriState::False => write!(f, "false"),
            TriState::Mixed => write!(f, "mixed"),
        }
    }
}

impl Serialize for TriState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TriState::True => serializer.serialize_bool(true),
            TriState::False => serializer.serialize_bool(false),
            TriState::Mixed => serializer.serialize_str("mixed"),
        }
    }
}

impl<'de> Deserialize<'de> for TriState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TriStateVisitor;

        impl<'de> Visitor<'de> for TriStateVisitor {
            type Value = TriState;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(r#"true, false or "mixed""#)
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<TriState, E> {
                Ok(TriState::from(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<TriState, E> {
                match v {
                    "mixed" => Ok(TriState::Mixed),
                    other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
                }
            }
        }

        deserializer.deserialize_any(TriStateVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<ModelDomain>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architectures: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compatibility_types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params_strings: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_memory_usage_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_lengths: Option<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trained_for_tool_use: Option<TriState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vision: Option<TriState>,
}
