//! Custom field declarations and the effects they produce

use serde::{Deserialize, Serialize};
use std::fmt;

/// What an active custom field does to prompt rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CustomFieldEffect {
    SetJinjaVariable { variable: String },
    PrependSystemPrompt { content: String },
    AppendSystemPrompt { content: String },
}

impl CustomFieldEffect {
    pub fn type_name(&self) -> &'static str {
        match self {
            CustomFieldEffect::SetJinjaVariable { .. } => "setJinjaVariable",
            CustomFieldEffect::PrependSystemPrompt { .. } => "prependSystemPrompt",
            CustomFieldEffect::AppendSystemPrompt { .. } => "appendSystemPrompt",
        }
    }
}

/// Variant marker of a custom field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomFieldKind {
    Boolean,
    String,
}

impl fmt::Display for CustomFieldKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CustomFieldKind::Boolean => write!(f, "boolean"),
            CustomFieldKind::String => write!(f, "string"),
        }
    }
}

/// A user-facing field declared by a virtual model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CustomFieldDefinition {
    #[serde(rename = "boolean", rename_all = "camelCase")]
    Boolean {
        key: String,
        display_name: String,
        #[serde(default)]
        description: String,
        default_value: bool,
        #[serde(default)]
        effects: Vec<CustomFieldEffect>,
    },
    /// May only carry `setJinjaVariable` effects
    #[serde(rename = "string", rename_all = "camelCase")]
    String {
        key: String,
        display_name: String,
        #[serde(default)]
        description: String,
        default_value: String,
        #[serde(default)]
        effects: Vec<CustomFieldEffect>,
    },
}

impl CustomFieldDefinition {
    pub fn key(&self) -> &str {
        match self {
            CustomFieldDefinition::Boolean { key, .. } => key,
            CustomFieldDefinition::String { key, .. } => key,
        }
    }

    pub fn kind(&self) -> CustomFieldKind {
        match self {
            CustomFieldDefinition::Boolean { .. } => CustomFieldKind::Boolean,
            CustomFieldDefinition::String { .. } => CustomFieldKind::String,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            CustomFieldDefinition::Boolean { display_name, .. } => display_name,
            CustomFieldDefinition::String { display_name, .. } => display_name,
        }
    }

    pub fn effects(&self) -> &[CustomFieldEffect] {
        match self {
            CustomFieldDefinition::Boolean { effects, .. } => effects,
            CustomFieldDefinition::String { effects, .. } => effects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_boolean_field() {
        let field: CustomFieldDefinition = serde_json::from_value(json!({
            "type": "boolean",
            "key": "enableThinking",
            "displayName": "Enable Thinking",
            "description": "Let the model reason before answering",
            "defaultValue": true,
            "effects": [{ "type": "setJinjaVariable", "variable": "enable_thinking" }]
        }))
        .unwrap();

        assert_eq!(field.key(), "enableThinking");
        assert_eq!(field.kind(), CustomFieldKind::Boolean);
        assert_eq!(
            field.effects(),
            &[CustomFieldEffect::SetJinjaVariable {
                variable: "enable_thinking".to_string()
            }]
        );
    }

    #[test]
    fn test_default_value_must_match_variant() {
        let parsed: Result<CustomFieldDefinition, _> = serde_json::from_value(json!({
            "type": "string",
            "key": "persona",
            "displayName": "Persona",
            "defaultValue": false
        }));
        assert!(parsed.is_err());
    }
}
