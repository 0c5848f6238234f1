//! Environment configuration
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8788";
pub const DEFAULT_CATALOG_DIR: &str = "catalog";
pub const DEFAULT_LOOKUP_TIMEOUT_MS: u64 = 2_000;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("CONFIG/{name} has invalid value {value:?}")]
    InvalidVar { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// `VMODEL_ADDR`
    pub addr: String,
    /// `VMODEL_CATALOG_DIR`
    pub catalog_dir: PathBuf,
    /// `VMODEL_LOOKUP_TIMEOUT_MS`
    pub lookup_timeout: Duration,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let lookup_timeout = match var("VMODEL_LOOKUP_TIMEOUT_MS") {
            None => DEFAULT_LOOKUP_TIMEOUT_MS,
            Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidVar {
                name: "VMODEL_LOOKUP_TIMEOUT_MS",
                value,
            })?,
        };

        Ok(Self {
            addr: var("VMODEL_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string()),
            catalog_dir: var("VMODEL_CATALOG_DIR")
                .unwrap_or_else(|| DEFAULT_CATALOG_DIR.to_string())
                .into(),
            lookup_timeout: Duration::from_millis(lookup_timeout),
        })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            catalog_dir: DEFAULT_CATALOG_DIR.into(),
            lookup_timeout: Duration::from_millis(DEFAULT_LOOKUP_TIMEOUT_MS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("VMODEL_ADDR", "127.0.0.1:9000"),
            ("VMODEL_CATALOG_DIR", "/srv/catalog"),
            ("VMODEL_LOOKUP_TIMEOUT_MS", "250"),
        ]
        .into_iter()
        .collect();

        let config = ApiConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap();
        assert_eq!(config.addr, "127.0.0.1:9000");
        assert_eq!(config.catalog_dir, PathBuf::from("/srv/catalog"));
        assert_eq!(config.lookup_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_bad_timeout() {
        let err = ApiConfig::from_lookup(|name| {
            (name == "VMODEL_LOOKUP_TIMEOUT_MS").then(|| "soon".to_string())
        })
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidVar {
                name: "VMODEL_LOOKUP_TIMEOUT_MS",
                value: "soon".to_string()
            }
        );
    }
}
