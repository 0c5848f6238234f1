//! Shared handler state
use std::sync::Arc;
use std::time::Duration;
use vmodel_registry::Catalog;

use crate::metrics::ResolveMetrics;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub lookup_timeout: Duration,
    pub metrics: Arc<ResolveMetrics>,
}

impl AppState {
    pub fn new(
        catalog: Catalog,
        lookup_timeout: Duration,
    ) -> Result<Self, prometheus::Error> {
        Ok(Self {
            catalog: Arc::new(catalog),
            lookup_timeout,
            metrics: Arc::new(ResolveMetrics::new()?),
        })
    }
}
