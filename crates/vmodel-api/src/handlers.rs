//! API Handlers
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;
use vmodel_registry::CatalogEntry;
use vmodel_resolve::{resolve_model_async, CustomFieldValues, ResolvedModel, TimeoutLookup};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ResolveRequest {
    /// Custom field values by key
    #[serde(default)]
    pub fields: CustomFieldValues,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResponse {
    pub trace_id: String,
    pub resolved_at: DateTime<Utc>,
    pub fingerprint: String,
    pub resolved: ResolvedModel,
}

pub async fn resolve(
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
    Json(request): Json<ResolveRequest>,
) -> Result<Json<ResolveResponse>, ApiError> {
    let model = format!("{}/{}", owner, repo);
    let trace_id = Uuid::new_v4().to_string();
    let span = info_span!("resolve", trace_id = %trace_id, model = %model);

    let lookup = TimeoutLookup::new(state.catalog.clone(), state.lookup_timeout);
    let result = resolve_model_async(&model, &lookup, &request.fields)
        .instrument(span.clone())
        .await
        .and_then(|resolved| {
            let fingerprint = resolved.fingerprint()?;
            Ok((resolved, fingerprint))
        });

    match result {
        Ok((resolved, fingerprint)) => {
            state.metrics.record_success(resolved.field_errors.len());
            span.in_scope(|| {
                info!(
                    chain = resolved.chain.len(),
                    field_errors = resolved.field_errors.len(),
                    "resolution succeeded"
                )
            });
            Ok(Json(ResolveResponse {
                fingerprint,
                trace_id,
                resolved_at: Utc::now(),
                resolved,
            }))
        }
        Err(err) => {
            let err = ApiError::from(err).with_trace_id(trace_id);
            state.metrics.record_failure(err.code);
            span.in_scope(|| info!(code = err.code, "resolution failed: {}", err.message));
            Err(err)
        }
    }
}

pub async fn list_models(State(state): State<AppState>) -> Json<Vec<CatalogEntry>> {
    Json(state.catalog.entries())
}

pub async fn metrics(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let body = state
        .metrics
        .encode()
        .map_err(|e| ApiError::internal(e.to_string()))?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    ))
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
            "models": state.catalog.len(),
        })),
    )
}
