//! Resolution errors
//!
//! Chain-level errors abort a resolution. Field-level errors are collected
//! next to an otherwise successful result.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vmodel_schema::CustomFieldKind;

/// Why a lookup produced no definition
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("not found")]
    NotFound,

    #[error("lookup timed out")]
    TimedOut,
}

/// Fatal to a single resolution
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("CHAIN/cyclic base chain: {}", .cycle.join(" -> "))]
    CyclicChain { cycle: Vec<String> },

    #[error("CHAIN/unresolved base {key}: {reason}")]
    UnresolvedBase { key: String, reason: LookupError },

    #[error("CHAIN/base chain from {start} exceeds {depth} hops")]
    ChainTooDeep { start: String, depth: usize },

    #[error("FIELD/custom field {key} is {first_kind} in {first} but {second_kind} in {second}")]
    DuplicateCustomFieldKeyAcrossVariants {
        key: String,
        first: String,
        first_kind: CustomFieldKind,
        second: String,
        second_kind: CustomFieldKind,
    },

    #[error("STATE/failed to encode resolved {model}: {message}")]
    Encoding { model: String, message: String },
}

impl ResolveError {
    pub(crate) fn encoding(model: &str, err: serde_json::Error) -> Self {
        ResolveError::Encoding {
            model: model.to_string(),
            message: err.to_string(),
        }
    }

    /// The catalog key or field key the error is about
    pub fn key(&self) -> &str {
        match self {
            ResolveError::CyclicChain { cycle } => cycle.first().map(String::as_str).unwrap_or(""),
            ResolveError::UnresolvedBase { key, .. } => key,
            ResolveError::ChainTooDeep { start, .. } => start,
            ResolveError::DuplicateCustomFieldKeyAcrossVariants { key, .. } => key,
            ResolveError::Encoding { model, .. } => model,
        }
    }
}

/// Scoped to one custom field; the field falls back to its default
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldError {
    #[error("FIELD/{key}: expected a {expected} value, got {found}; using default")]
    CustomFieldTypeMismatch {
        key: String,
        expected: CustomFieldKind,
        found: String,
    },

    #[error("FIELD/{key}: no such custom field")]
    UnknownCustomField { key: String },

    #[error("FIELD/{key}: {effect} is not allowed on a string field; skipped")]
    UnsupportedEffect { key: String, effect: String },
}

impl FieldError {
    pub fn key(&self) -> &str {
        match self {
            FieldError::CustomFieldTypeMismatch { key, .. } => key,
            FieldError::UnknownCustomField { key } => key,
            FieldError::UnsupportedEffect { key, .. } => key,
        }
    }
}
