//! The aggregate result of one resolution
use serde::{Deserialize, Serialize};
use tracing::debug;
use vmodel_schema::{
    ConcreteModelBase, CustomFieldDefinition, KvConfig, KvConfigField, MetadataOverrides,
    Suggestion,
};

use crate::chain::{resolve_chain, resolve_chain_async, Chain};
use crate::config_merge;
use crate::custom_fields::{resolve_fields, CustomFieldValues, ResolvedEffect};
use crate::error::{FieldError, ResolveError};
use crate::lookup::{AsyncDefinitionLookup, DefinitionLookup};
use crate::metadata;
use crate::state::ResolutionState;
use crate::suggestions;

/// One fully merged effective model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedModel {
    /// The starting model key
    pub model: String,
    /// Keys of the chain, most specific first
    pub chain: Vec<String>,
    pub tags: Vec<String>,
    pub concrete_bases: Vec<ConcreteModelBase>,
    pub load: KvConfig,
    pub operation: KvConfig,
    pub metadata: MetadataOverrides,
    pub custom_field_definitions: Vec<CustomFieldDefinition>,
    pub custom_field_values: Vec<KvConfigField>,
    pub active_effects: Vec<ResolvedEffect>,
    pub active_suggestions: Vec<Suggestion>,
    #[serde(default)]
    pub field_errors: Vec<FieldError>,
}

impl ResolvedModel {
    /// Run every component over an already resolved chain
    pub fn from_chain(chain: &Chain, user_values: &CustomFieldValues) -> Result<Self, ResolveError> {
        let config = config_merge::merge(chain);
        let metadata = metadata::reduce(chain);
        let fields = resolve_fields(chain, user_values)?;
        let active_suggestions = {
            let state = ResolutionState::new(&config, &metadata)
                .map_err(|e| ResolveError::encoding(chain.model(), e))?;
            suggestions::evaluate(chain, &state)
        };

        let mut tags: Vec<String> = Vec::new();
        for tag in chain.definitions().iter().flat_map(|d| d.tags.iter()) {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }

        debug!(
            model = %chain.model(),
            depth = chain.len(),
            load_fields = config.load.len(),
            operation_fields = config.operation.len(),
            effects = fields.effects.len(),
            suggestions = active_suggestions.len(),
            field_errors = fields.errors.len(),
            "resolved virtual model"
        );

        Ok(Self {
            model: chain.model().to_string(),
            chain: chain.keys().into_iter().map(String::from).collect(),
            tags,
            concrete_bases: chain.concrete_bases().to_vec(),
            load: config.load,
            operation: config.operation,
            metadata,
            custom_field_definitions: fields.definitions,
            custom_field_values: fields.values,
            active_effects: fields.effects,
            active_suggestions,
            field_errors: fields.errors,
        })
    }

    pub fn has_field_errors(&self) -> bool {
        !self.field_errors.is_empty()
    }

    /// `blake3:<hex>` over the canonical JSON encoding. Identical inputs give
    /// identical fingerprints.
    pub fn fingerprint(&self) -> Result<String, ResolveError> {
        let bytes = serde_json::to_vec(self).map_err(|e| ResolveError::encoding(&self.model, e))?;
        Ok(format!("blake3:{}", blake3::hash(&bytes)))
    }
}

/// Resolve `start` end to end against an in-memory lookup
pub fn resolve_model<L: DefinitionLookup + ?Sized>(
    start: &str,
    lookup: &L,
    user_values: &CustomFieldValues,
) -> Result<ResolvedModel, ResolveError> {
    let chain = resolve_chain(start, lookup)?;
    ResolvedModel::from_chain(&chain, user_values)
}

/// Resolve `start` end to end, suspending at each lookup
pub async fn resolve_model_async<L: AsyncDefinitionLookup + ?Sized>(
    start: &str,
    lookup: &L,
    user_values: &CustomFieldValues,
) -> Result<ResolvedModel, ResolveError> {
    let chain = resolve_chain_async(start, lookup).await?;
    ResolvedModel::from_chain(&chain, user_values)
}
