//! Configuration management for catmeta

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// Fixed identification of this tool inside the provenance block it emits.
#[derive(Debug, Deserialize, Clone)]
pub struct ProvenanceConfig {
    pub source_name: String,
    pub source_version: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub provenance: ProvenanceConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with the default configuration file, when present
            .add_source(File::with_name("config/default").required(false))
            // Add environment variables (with prefix CATMETA_)
            .add_source(
                Environment::with_prefix("CATMETA")
                    .separator("_")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for ProvenanceConfig {
    fn default() -> Self {
        Self {
            source_name: "manual_to_automated_addition".to_string(),
            source_version: "0.1.0".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.provenance.source_name, "manual_to_automated_addition");
        assert_eq!(config.provenance.source_version, "0.1.0");
    }
}
