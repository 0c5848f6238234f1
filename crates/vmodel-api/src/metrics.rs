//! Resolution counters exposed on `/metrics`.
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

pub struct ResolveMetrics {
    registry: Registry,
    resolutions: IntCounterVec,
    field_errors: IntCounter,
}

impl ResolveMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let resolutions = IntCounterVec::new(
            Opts::new("vmodel_resolutions_total", "Virtual model resolutions by outcome"),
            &["outcome"],
        )?;
        let field_errors = IntCounter::new(
            "vmodel_field_errors_total",
            "Custom field errors reported alongside successful resolutions",
        )?;
        registry.register(Box::new(resolutions.clone()))?;
        registry.register(Box::new(field_errors.clone()))?;

        Ok(Self {
            registry,
            resolutions,
            field_errors,
        })
    }

    pub fn record_success(&self, field_errors: usize) {
        self.resolutions.with_label_values(&["ok"]).inc();
        self.field_errors.inc_by(field_errors as u64);
    }

    pub fn record_failure(&self, outcome: &str) {
        self.resolutions.with_label_values(&[outcome]).inc();
    }

    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}
