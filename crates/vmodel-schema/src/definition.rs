//! Virtual model definitions and their bases

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::config::ModelConfig;
use crate::custom_field::{CustomFieldDefinition, CustomFieldEffect};
use crate::error::SchemaError;
use crate::metadata::MetadataOverrides;
use crate::suggestion::Suggestion;

static MODEL_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*/[A-Za-z0-9][A-Za-z0-9._-]*$").unwrap()
});

/// Whether `id` has the `owner/repo` shape
pub fn is_valid_model_id(id: &str) -> bool {
    MODEL_ID.is_match(id)
}

/// Where a concrete artifact can be downloaded from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ModelSource {
    Huggingface { user: String, repo: String },
}

/// A terminal, directly downloadable model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConcreteModelBase {
    /// Download identity
    pub key: String,
    /// Download locations, first listed preferred
    pub sources: Vec<ModelSource>,
}

/// Either a reference to another virtual model or the terminal leaves
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ModelBase {
    Reference(String),
    Concrete(Vec<ConcreteModelBase>),
}

// Not untagged on the way in: errors inside a concrete base must reach the author.
impl<'de> Deserialize<'de> for ModelBase {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ModelBaseVisitor;

        impl<'de> Visitor<'de> for ModelBaseVisitor {
            type Value = ModelBase;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a model key or a list of concrete bases")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ModelBase, E> {
                Ok(ModelBase::Reference(v.to_string()))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ModelBase, A::Error> {
                let mut bases = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(base) = seq.next_element::<ConcreteModelBase>()? {
                    bases.push(base);
                }
                Ok(ModelBase::Concrete(bases))
            }
        }

        deserializer.deserialize_any(ModelBaseVisitor)
    }
}

impl ModelBase {
    pub fn reference(&self) -> Option<&str> {
        match self {
            ModelBase::Reference(key) => Some(key),
            ModelBase::Concrete(_) => None,
        }
    }
}

/// A named node in a chain of virtual models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualModelDefinition {
    /// Unique `owner/repo` identifier
    pub model: String,
    pub base: ModelBase,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ModelConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_overrides: Option<MetadataOverrides>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<CustomFieldDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
}

impl VirtualModelDefinition {
    /// A bare definition pointing at `base`
    pub fn new(model: impl Into<String>, base: ModelBase) -> Self {
        Self {
            model: model.into(),
            base,
            tags: Vec::new(),
            config: None,
            metadata_overrides: None,
            custom_fields: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Check the authoring rules a definition must satisfy before it is
    /// published to a catalog.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if !is_valid_model_id(&self.model) {
            return Err(SchemaError::InvalidModelId(self.model.clone()));
        }

        match &self.base {
            ModelBase::Reference(key) => {
                if !is_valid_model_id(key) {
                    return Err(SchemaError::InvalidBaseReference {
                        model: self.model.clone(),
                        base: key.clone(),
                    });
                }
                if key == &self.model {
                    return Err(SchemaError::SelfReference(self.model.clone()));
                }
            }
            ModelBase::Concrete(bases) => {
                if bases.is_empty() {
                    return Err(SchemaError::EmptyConcreteBase(self.model.clone()));
                }
                for base in bases {
                    if base.key.trim().is_empty() {
                        return Err(SchemaError::EmptyConcreteBase(self.model.clone()));
                    }
                    if base.sources.is_empty() {
                        return Err(SchemaError::MissingSources {
                            model: self.model.clone(),
                            key: base.key.clone(),
                        });
                    }
                }
            }
        }

        let mut seen = HashSet::new();
        for field in &self.custom_fields {
            if !seen.insert(field.key()) {
                return Err(SchemaError::DuplicateFieldKey {
                    model: self.model.clone(),
                    key: field.key().to_string(),
                });
            }
            if let CustomFieldDefinition::String { key, effects, .. } = field {
                if let Some(effect) = effects
                    .iter()
                    .find(|e| !matches!(e, CustomFieldEffect::SetJinjaVariable { .. }))
                {
                    return Err(SchemaError::PromptEffectOnStringField {
                        model: self.model.clone(),
                        key: key.clone(),
                        effect: effect.type_name().to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}
