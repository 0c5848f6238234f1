//! Custom field engine
//!
//! Merges field declarations across the chain (the most specific declaration
//! of a key replaces the others), validates user-supplied values and
//! materializes the effects of active fields in a stable order.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tracing::warn;
use vmodel_schema::{CustomFieldDefinition, CustomFieldEffect, CustomFieldKind, KvConfigField};

use crate::chain::Chain;
use crate::error::{FieldError, ResolveError};

/// Values a caller supplies for custom fields, by key
pub type CustomFieldValues = BTreeMap<String, Value>;

/// An instruction for the prompt template renderer, applied in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ResolvedEffect {
    SetJinjaVariable { variable: String, value: Value },
    PrependSystemPrompt { content: String },
    AppendSystemPrompt { content: String },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldResolution {
    /// Merged declarations, first-seen key order
    pub definitions: Vec<CustomFieldDefinition>,
    /// Effective value of every declared field, same order
    pub values: Vec<KvConfigField>,
    pub effects: Vec<ResolvedEffect>,
    pub errors: Vec<FieldError>,
}

pub fn resolve_fields(
    chain: &Chain,
    user_values: &CustomFieldValues,
) -> Result<FieldResolution, ResolveError> {
    let definitions = merge_declarations(chain)?;
    let mut resolution = FieldResolution::default();

    for field in &definitions {
        match field {
            CustomFieldDefinition::Boolean {
                key,
                default_value,
                effects,
                ..
            } => {
                let enabled = match user_values.get(key) {
                    None => *default_value,
                    Some(Value::Bool(value)) => *value,
                    Some(other) => {
                        resolution.reject(key, CustomFieldKind::Boolean, other);
                        *default_value
                    }
                };
                resolution.values.push(KvConfigField {
                    key: key.clone(),
                    value: Value::Bool(enabled),
                });
                if enabled {
                    resolution
                        .effects
                        .extend(effects.iter().map(boolean_effect));
                }
            }
            CustomFieldDefinition::String {
                key,
                default_value,
                effects,
                ..
            } => {
                let value = match user_values.get(key) {
                    None => default_value.clone(),
                    Some(Value::String(value)) => value.clone(),
                    Some(other) => {
                        resolution.reject(key, CustomFieldKind::String, other);
                        default_value.clone()
                    }
                };
                for effect in effects {
                    match effect {
                        CustomFieldEffect::SetJinjaVariable { variable } => {
                            resolution.effects.push(ResolvedEffect::SetJinjaVariable {
                                variable: variable.clone(),
                                value: Value::String(value.clone()),
                            });
                        }
                        CustomFieldEffect::PrependSystemPrompt { .. }
                        | CustomFieldEffect::AppendSystemPrompt { .. } => {
                            resolution.push_error(FieldError::UnsupportedEffect {
                                key: key.clone(),
                                effect: effect.type_name().to_string(),
                            });
                        }
                    }
                }
                resolution.values.push(KvConfigField {
                    key: key.clone(),
                    value: Value::String(value),
                });
            }
        }
    }

    for key in user_values.keys() {
        if !definitions.iter().any(|d| d.key() == key) {
            resolution.push_error(FieldError::UnknownCustomField { key: key.clone() });
        }
    }

    resolution.definitions = definitions;
    Ok(resolution)
}

impl FieldResolution {
    fn reject(&mut self, key: &str, expected: CustomFieldKind, found: &Value) {
        self.push_error(FieldError::CustomFieldTypeMismatch {
            key: key.to_string(),
            expected,
            found: json_type_name(found).to_string(),
        });
    }

    fn push_error(&mut self, error: FieldError) {
        warn!(field = %error.key(), "{}", error);
        self.errors.push(error);
    }
}

/// Walk the chain most specific first; the first declaration of a key wins
/// and keeps its position. A later declaration with a different variant is
/// an authoring error.
fn merge_declarations(chain: &Chain) -> Result<Vec<CustomFieldDefinition>, ResolveError> {
    let mut merged: Vec<CustomFieldDefinition> = Vec::new();
    let mut owners: HashMap<String, (&str, CustomFieldKind)> = HashMap::new();

    for definition in chain.definitions() {
        for field in &definition.custom_fields {
            match owners.get(field.key()) {
                Some((owner, kind)) if *kind != field.kind() => {
                    return Err(ResolveError::DuplicateCustomFieldKeyAcrossVariants {
                        key: field.key().to_string(),
                        first: owner.to_string(),
                        first_kind: *kind,
                        second: definition.model.clone(),
                        second_kind: field.kind(),
                    });
                }
                Some(_) => {}
                None => {
                    owners.insert(
                        field.key().to_string(),
                        (definition.model.as_str(), field.kind()),
                    );
                    merged.push(field.clone());
                }
            }
        }
    }

    Ok(merged)
}

fn boolean_effect(effect: &CustomFieldEffect) -> ResolvedEffect {
    match effect {
        CustomFieldEffect::SetJinjaVariable { variable } => ResolvedEffect::SetJinjaVariable {
            variable: variable.clone(),
            value: Value::Bool(true),
        },
        CustomFieldEffect::PrependSystemPrompt { content } => ResolvedEffect::PrependSystemPrompt {
            content: content.clone(),
        },
        CustomFieldEffect::AppendSystemPrompt { content } => ResolvedEffect::AppendSystemPrompt {
            content: content.clone(),
        },
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
