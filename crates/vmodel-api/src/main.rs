//! Binary entrypoint for the virtual model API server.
use tracing_subscriber::EnvFilter;
use vmodel_api::{run, ApiConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // VMODEL_ADDR, VMODEL_CATALOG_DIR and VMODEL_LOOKUP_TIMEOUT_MS override the defaults
    let config = ApiConfig::from_env()?;
    run(config).await
}
