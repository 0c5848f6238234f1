//! The flat key space conditions and suggestions are evaluated against

use serde_json::{Map, Value};
use vmodel_schema::MetadataOverrides;

use crate::config_merge::MergedConfig;

/// Resolved configuration and metadata under one key space.
///
/// A key is looked up in the `operation` block, then the `load` block, then
/// among the metadata fields by their JSON name (`domain`, `vision`, ...).
pub struct ResolutionState<'a> {
    config: &'a MergedConfig,
    metadata: Map<String, Value>,
}

impl<'a> ResolutionState<'a> {
    pub fn new(
        config: &'a MergedConfig,
        metadata: &MetadataOverrides,
    ) -> Result<Self, serde_json::Error> {
        let metadata: Map<String, Value> = serde_json::from_value(serde_json::to_value(metadata)?)?;
        Ok(Self { config, metadata })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.config
            .operation
            .get(key)
            .or_else(|| self.config.load.get(key))
            .or_else(|| self.metadata.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vmodel_schema::{KvConfig, ModelDomain, TriState};

    #[test]
    fn test_lookup_precedence() {
        let config = MergedConfig {
            load: KvConfig::new()
                .with("contextLength", json!(4096))
                .with("temperature", json!(0.1)),
            operation: KvConfig::new().with("temperature", json!(0.7)),
        };
        let metadata = MetadataOverrides {
            domain: Some(ModelDomain::Llm),
            vision: Some(TriState::Mixed),
            ..Default::default()
        };
        let state = ResolutionState::new(&config, &metadata).unwrap();

        assert_eq!(state.get("temperature"), Some(&json!(0.7)));
        assert_eq!(state.get("contextLength"), Some(&json!(4096)));
        assert_eq!(state.get("domain"), Some(&json!("llm")));
        assert_eq!(state.get("vision"), Some(&json!("mixed")));
        assert_eq!(state.get("minMemoryUsageBytes"), None);
    }

    #[test]
    fn test_empty_metadata_contributes_no_keys() {
        let config = MergedConfig::default();
        let state = ResolutionState::new(&config, &MetadataOverrides::default()).unwrap();

        assert_eq!(state.get("domain"), None);
        assert_eq!(state.get("vision"), None);
    }
}
