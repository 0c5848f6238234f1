//! Virtual Model API /v1: REST endpoints over a loaded catalog
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod state;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use vmodel_registry::Catalog;

pub use config::ApiConfig;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handlers::health))
        .route("/v1/models", get(handlers::list_models))
        .route("/v1/models/{owner}/{repo}/resolve", post(handlers::resolve))
        .route("/metrics", get(handlers::metrics))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors())
        .with_state(state)
}

pub async fn run(config: ApiConfig) -> anyhow::Result<()> {
    let catalog = Catalog::load_dir(&config.catalog_dir)
        .with_context(|| format!("loading catalog from {}", config.catalog_dir.display()))?;

    for (model, err) in catalog.check_chains() {
        tracing::warn!(model = %model, "model will not resolve: {}", err);
    }

    let state = AppState::new(catalog, config.lookup_timeout)?;
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(&config.addr)
        .await
        .with_context(|| format!("binding {}", config.addr))?;

    tracing::info!("Virtual model API listening on {}", config.addr);
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
