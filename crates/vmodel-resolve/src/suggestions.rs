//! Suggestion evaluation

use vmodel_schema::{deep_equals, Condition, KvConfigField, Suggestion};

use crate::chain::Chain;
use crate::state::ResolutionState;

/// Suggestions of every definition, most specific first, that apply to the
/// resolved state and would change something.
pub fn evaluate(chain: &Chain, state: &ResolutionState<'_>) -> Vec<Suggestion> {
    chain
        .definitions()
        .iter()
        .flat_map(|d| d.suggestions.iter())
        .filter(|s| s.conditions.iter().all(|c| condition_holds(c, state)))
        .filter(|s| !already_applied(s.fields.as_deref(), state))
        .cloned()
        .collect()
}

pub fn condition_holds(condition: &Condition, state: &ResolutionState<'_>) -> bool {
    match condition {
        Condition::Equals { key, value } => state
            .get(key)
            .map(|current| deep_equals(current, value))
            .unwrap_or(false),
    }
}

/// A suggestion without fields is informational and never counts as applied.
fn already_applied(fields: Option<&[KvConfigField]>, state: &ResolutionState<'_>) -> bool {
    match fields {
        Some(fields) if !fields.is_empty() => fields.iter().all(|field| {
            state
                .get(&field.key)
                .map(|current| deep_equals(current, &field.value))
                .unwrap_or(false)
        }),
        _ => false,
    }
}
