// Simulator Configuration Module
// Handles configuration from YAML files.

use crate::{ErrorConfig, LatencyProfile, Simulator};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Simulator configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub latency: LatencyConfig,
    #[serde(default)]
    pub errors: ErrorConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Create a latency profile from the configuration.
    ///
    /// A named profile wins over explicit bounds; with neither set the
    /// default 50-150ms profile is used.
    pub fn latency_profile(&self) -> Result<LatencyProfile, ConfigError> {
        if let Some(ref name) = self.latency.profile {
            return LatencyProfile::from_name(name).ok_or_else(|| {
                ConfigError::Validation(format!("unknown latency profile: {}", name))
            });
        }

        match (self.latency.min_ms, self.latency.max_ms) {
            (None, None) => Ok(LatencyProfile::default()),
            (min, max) => {
                let defaults = LatencyProfile::default();
                let min_ms = min.unwrap_or(defaults.min_ms);
                let max_ms = max.unwrap_or(defaults.max_ms);
                if min_ms > max_ms {
                    return Err(ConfigError::Validation(format!(
                        "latency min_ms ({}) exceeds max_ms ({})",
                        min_ms, max_ms
                    )));
                }
                Ok(LatencyProfile::uniform(min_ms, max_ms))
            }
        }
    }

    /// Create an error config from the configuration, clamping rates to [0, 1]
    pub fn error_config(&self) -> ErrorConfig {
        ErrorConfig::new()
            .with_rate_limit_rate(self.errors.rate_limit_rate)
            .with_server_error_rate(self.errors.server_error_rate)
            .with_timeout_rate(self.errors.timeout_rate)
            .with_timeout_after_ms(self.errors.timeout_after_ms)
    }

    /// Build a real-clock simulator from this configuration
    pub fn simulator(&self) -> Result<Simulator, ConfigError> {
        Ok(Simulator::new()
            .with_latency(self.latency_profile()?)
            .with_errors(self.error_config()))
    }
}

/// Latency simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LatencyConfig {
    /// Named latency profile (e.g., "default", "fast", "slow", "instant")
    pub profile: Option<String>,
    /// Custom lower bound of a uniform delay (ms)
    pub min_ms: Option<u64>,
    /// Custom upper bound of a uniform delay (ms)
    pub max_ms: Option<u64>,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    Io(String),
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
    #[error("Invalid configuration: {0}")]
    Validation(String),
}
