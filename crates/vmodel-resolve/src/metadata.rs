//! Metadata override reduction
//!
//! - set fields: union, first-seen order
//! - `domain`, `minMemoryUsageBytes`: most specific wins
//! - tri-state fields: agreement propagates, disagreement or `"mixed"` gives `"mixed"`

use vmodel_schema::{MetadataOverrides, TriState};

use crate::chain::Chain;

pub fn reduce(chain: &Chain) -> MetadataOverrides {
    let mut reduced = MetadataOverrides::default();

    for patch in chain
        .definitions()
        .iter()
        .filter_map(|d| d.metadata_overrides.as_ref())
    {
        first_wins(&mut reduced.domain, patch.domain);
        first_wins(&mut reduced.min_memory_usage_bytes, patch.min_memory_usage_bytes);

        union_into(&mut reduced.architectures, patch.architectures.as_deref());
        union_into(&mut reduced.compatibility_types, patch.compatibility_types.as_deref());
        union_into(&mut reduced.params_strings, patch.params_strings.as_deref());
        union_into(&mut reduced.context_lengths, patch.context_lengths.as_deref());

        combine_tri_state(&mut reduced.trained_for_tool_use, patch.trained_for_tool_use);
        combine_tri_state(&mut reduced.vision, patch.vision);
    }

    reduced
}

fn first_wins<T>(slot: &mut Option<T>, value: Option<T>) {
    if slot.is_none() {
        *slot = value;
    }
}

fn union_into<T: PartialEq + Clone>(slot: &mut Option<Vec<T>>, values: Option<&[T]>) {
    let Some(values) = values else {
        return;
    };
    let merged = slot.get_or_insert_with(Vec::new);
    for value in values {
        if !merged.contains(value) {
            merged.push(value.clone());
        }
    }
}

fn combine_tri_state(slot: &mut Option<TriState>, value: Option<TriState>) {
    *slot = match (*slot, value) {
        (current, None) => current,
        (None, Some(value)) => Some(value),
        (Some(current), Some(value)) => Some(current.combine(value)),
    };
}
