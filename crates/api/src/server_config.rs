//! Server configuration

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Server configuration, layered from an optional `sentinel.toml` and
/// `SENTINEL_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Optional per-detector classifier model paths; a set path switches
    /// that detector to learned scoring at startup
    #[serde(default)]
    pub models: ModelPaths,
}

/// Per-detector ONNX model paths
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelPaths {
    pub access: Option<String>,
    pub behavior: Option<String>,
    pub drowsiness: Option<String>,
    pub fight: Option<String>,
}

fn default_bind_addr() -> String {
    "0.0.0.0:5000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            models: ModelPaths::default(),
        }
    }
}

impl ServerConfig {
    /// Load layered configuration
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("sentinel").required(false))
            .add_source(Environment::with_prefix("SENTINEL").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr, "0.0.0.0:5000");
        assert!(config.models.access.is_none());
    }
}
