//! Integration tests for the registry with the workspace catalog fixtures.

use serde_json::json;
use std::fs;
use vmodel_registry::{Catalog, CatalogError};
use vmodel_resolve::{resolve_model, resolve_model_async, CustomFieldValues, ResolvedEffect};
use vmodel_schema::{ModelDomain, TriState};

/// Path to the catalog fixtures relative to the workspace root
const CATALOG_DIR: &str = "catalog";

fn catalog_dir() -> std::path::PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = std::path::Path::new(&manifest_dir).parent().unwrap().parent().unwrap();
    workspace_root.join(CATALOG_DIR)
}

fn fixture_catalog() -> Catalog {
    Catalog::load_dir(catalog_dir()).unwrap()
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_loads_all_fixtures() {
    let catalog = fixture_catalog();
    let models: Vec<_> = catalog.entries().into_iter().map(|e| e.model).collect();
    assert_eq!(
        models,
        vec![
            "acme/qwen3-8b",
            "acme/qwen3-8b-chat",
            "community/nomic-embed",
            "community/nomic-embed-long",
            "community/qwen3-8b-vl",
        ]
    );
    assert!(catalog.check_chains().is_empty());
}

#[test]
fn test_duplicate_across_files() {
    let dir = tempfile::tempdir().unwrap();
    let body = r#"{ "model": "acme/x", "base": [{ "key": "acme/x-gguf", "sources": [{ "type": "huggingface", "user": "acme", "repo": "x" }] }] }"#;
    fs::write(dir.path().join("a.json"), body).unwrap();
    fs::write(dir.path().join("b.json"), body).unwrap();

    assert!(matches!(
        Catalog::load_dir(dir.path()),
        Err(CatalogError::DuplicateModel { model }) if model == "acme/x"
    ));
}

#[test]
fn test_invalid_definition_names_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("bad.yaml"),
        "model: acme/bad\nbase: []\n",
    )
    .unwrap();

    let err = Catalog::load_dir(dir.path()).unwrap_err();
    assert!(matches!(err, CatalogError::Invalid { .. }));
    assert!(err.to_string().contains("bad.yaml"));
}

#[test]
fn test_ignores_other_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("README.md"), "# not a definition").unwrap();
    fs::write(
        dir.path().join("ok.yml"),
        "model: acme/ok\nbase:\n  - key: acme/ok-gguf\n    sources:\n      - type: huggingface\n        user: acme\n        repo: ok\n",
    )
    .unwrap();

    let catalog = Catalog::load_dir(dir.path()).unwrap();
    assert_eq!(catalog.len(), 1);
    assert!(catalog.contains("acme/ok"));
}

// =============================================================================
// Resolution against the fixtures
// =============================================================================

#[test]
fn test_resolve_vision_variant() {
    let catalog = fixture_catalog();
    let resolved =
        resolve_model("community/qwen3-8b-vl", &catalog, &CustomFieldValues::new()).unwrap();

    assert_eq!(resolved.chain.len(), 3);
    assert_eq!(resolved.metadata.vision, Some(TriState::Mixed));
    assert_eq!(resolved.metadata.domain, Some(ModelDomain::Llm));
    assert_eq!(
        resolved.operation.get("llm.prediction.temperature"),
        Some(&json!(0.6))
    );

    let messages: Vec<_> = resolved
        .active_suggestions
        .iter()
        .map(|s| s.message.as_str())
        .collect();
    assert_eq!(
        messages,
        vec![
            "Images are tokenized at full resolution; expect higher memory use",
            "Qwen3 chat works best at temperature 0.7",
            "Long documents need a larger context window",
        ]
    );
}

#[test]
fn test_suggestion_suppressed_once_applied() {
    let fixtures = fixture_catalog();
    let mut catalog = Catalog::new();
    for entry in fixtures.entries() {
        let mut def = fixtures.get(&entry.model).unwrap().clone();
        if def.model == "acme/qwen3-8b-chat" {
            let operation = def
                .config
                .as_mut()
                .and_then(|c| c.operation.as_mut())
                .unwrap();
            operation.set("llm.prediction.temperature", json!(0.7));
        }
        catalog.insert(def).unwrap();
    }

    let resolved =
        resolve_model("acme/qwen3-8b-chat", &catalog, &CustomFieldValues::new()).unwrap();
    assert!(resolved
        .active_suggestions
        .iter()
        .all(|s| s.message != "Qwen3 chat works best at temperature 0.7"));
}

#[test]
fn test_embedding_chain_has_no_fields() {
    let catalog = fixture_catalog();
    let resolved =
        resolve_model("community/nomic-embed-long", &catalog, &CustomFieldValues::new()).unwrap();

    assert_eq!(resolved.metadata.domain, Some(ModelDomain::Embedding));
    assert_eq!(resolved.metadata.context_lengths, Some(vec![8192, 2048]));
    assert_eq!(resolved.metadata.vision, Some(TriState::False));
    assert_eq!(resolved.tags, vec!["embedding", "long-context"]);
    assert!(resolved.custom_field_definitions.is_empty());
    assert!(resolved.active_effects.is_empty());
}

#[tokio::test]
async fn test_async_lookup_through_catalog() {
    let catalog = fixture_catalog();
    let mut values = CustomFieldValues::new();
    values.insert("concise".to_string(), json!(true));

    let resolved = resolve_model_async("acme/qwen3-8b-chat", &catalog, &values)
        .await
        .unwrap();
    assert_eq!(
        resolved.active_effects.first(),
        Some(&ResolvedEffect::AppendSystemPrompt {
            content: "Answer as briefly as possible.".to_string()
        })
    );
}
