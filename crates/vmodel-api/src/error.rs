//! HTTP mapping of resolution failures
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use vmodel_resolve::{LookupError, ResolveError};

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub key: Option<String>,
    pub trace_id: Option<String>,
}

impl ApiError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "internal",
            message: message.into(),
            key: None,
            trace_id: None,
        }
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }
}

impl From<ResolveError> for ApiError {
    fn from(err: ResolveError) -> Self {
        let (status, code) = match &err {
            ResolveError::UnresolvedBase {
                reason: LookupError::TimedOut,
                ..
            } => (StatusCode::GATEWAY_TIMEOUT, "lookup_timeout"),
            ResolveError::UnresolvedBase { .. } => (StatusCode::NOT_FOUND, "unresolved_base"),
            ResolveError::CyclicChain { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "cyclic_chain"),
            ResolveError::ChainTooDeep { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "chain_too_deep")
            }
            ResolveError::DuplicateCustomFieldKeyAcrossVariants { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "duplicate_custom_field_key_across_variants",
            ),
            ResolveError::Encoding { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "encoding"),
        };
        Self {
            status,
            code,
            message: err.to_string(),
            key: Some(err.key().to_string()),
            trace_id: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({
                "error": {
                    "code": self.code,
                    "message": self.message,
                    "key": self.key,
                },
                "traceId": self.trace_id,
            })),
        )
            .into_response()
    }
}
