//! Router tests against the workspace catalog fixtures.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;
use vmodel_api::{create_app, AppState};
use vmodel_registry::Catalog;
use vmodel_schema::VirtualModelDefinition;

fn catalog_dir() -> std::path::PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = std::path::Path::new(&manifest_dir).parent().unwrap().parent().unwrap();
    workspace_root.join("catalog")
}

fn app_with(catalog: Catalog) -> Router {
    create_app(AppState::new(catalog, Duration::from_millis(500)).unwrap())
}

fn fixture_app() -> Router {
    app_with(Catalog::load_dir(catalog_dir()).unwrap())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn resolve_request(model: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/v1/models/{}/resolve", model))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder().uri("/v1/health").body(Body::empty()).unwrap();
    let (status, body) = send(fixture_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["models"], 5);
}

#[tokio::test]
async fn test_list_models() {
    let request = Request::builder().uri("/v1/models").body(Body::empty()).unwrap();
    let (status, body) = send(fixture_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0], json!({ "model": "acme/qwen3-8b", "tags": ["qwen3", "8B"] }));
}

#[tokio::test]
async fn test_resolve_with_fields() {
    let request = resolve_request(
        "acme/qwen3-8b-chat",
        json!({ "fields": { "persona": "a pirate", "enableThinking": "maybe" } }),
    );
    let (status, body) = send(fixture_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["traceId"].as_str().is_some());
    assert!(body["fingerprint"].as_str().unwrap().starts_with("blake3:"));

    let resolved = &body["resolved"];
    assert_eq!(resolved["model"], "acme/qwen3-8b-chat");
    assert_eq!(
        resolved["activeEffects"],
        json!([
            { "type": "setJinjaVariable", "variable": "persona", "value": "a pirate" },
            { "type": "setJinjaVariable", "variable": "enable_thinking", "value": true }
        ])
    );
    assert_eq!(
        resolved["fieldErrors"],
        json!([{
            "kind": "customFieldTypeMismatch",
            "key": "enableThinking",
            "expected": "boolean",
            "found": "string"
        }])
    );
}

#[tokio::test]
async fn test_resolve_unknown_model() {
    let (status, body) = send(fixture_app(), resolve_request("acme/nope", json!({}))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "unresolved_base");
    assert_eq!(body["error"]["key"], "acme/nope");
}

#[tokio::test]
async fn test_resolve_cycle() {
    let defs: Vec<VirtualModelDefinition> = serde_json::from_value(json!([
        { "model": "acme/a", "base": "acme/b" },
        { "model": "acme/b", "base": "acme/a" }
    ]))
    .unwrap();
    let app = app_with(Catalog::from_definitions(defs).unwrap());

    let (status, body) = send(app, resolve_request("acme/a", json!({}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "cyclic_chain");
}

#[tokio::test]
async fn test_metrics_count_outcomes() {
    let app = fixture_app();
    send(app.clone(), resolve_request("acme/qwen3-8b", json!({}))).await;
    send(app.clone(), resolve_request("acme/missing", json!({}))).await;

    let request = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();

    assert!(text.contains("vmodel_resolutions_total{outcome=\"ok\"} 1"));
    assert!(text.contains("vmodel_resolutions_total{outcome=\"unresolved_base\"} 1"));
}
