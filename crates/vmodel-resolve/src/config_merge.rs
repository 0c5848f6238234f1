//! Config merging: the first definition in the chain to set a field wins

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use vmodel_schema::{KvConfig, ModelConfig};

use crate::chain::Chain;

/// Flattened `load` and `operation` blocks
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MergedConfig {
    pub load: KvConfig,
    pub operation: KvConfig,
}

/// Merge both config blocks of every definition in the chain. Field order in
/// the output is first-seen order, most specific first.
pub fn merge(chain: &Chain) -> MergedConfig {
    let configs: Vec<&ModelConfig> = chain
        .definitions()
        .iter()
        .filter_map(|d| d.config.as_ref())
        .collect();

    MergedConfig {
        load: overlay(configs.iter().filter_map(|c| c.load.as_ref())),
        operation: overlay(configs.iter().filter_map(|c| c.operation.as_ref())),
    }
}

/// Overlay blocks given most specific first
fn overlay<'a>(blocks: impl Iterator<Item = &'a KvConfig>) -> KvConfig {
    let mut seen = HashSet::new();
    let mut merged = KvConfig::new();
    for block in blocks {
        for field in &block.fields {
            if seen.insert(field.key.as_str()) {
                merged.fields.push(field.clone());
            }
        }
    }
    merged
}
