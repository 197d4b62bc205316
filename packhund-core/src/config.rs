//! Allocator configuration with validation.
//!
//! Supports loading from YAML files using serde.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::alloc::packet::MAX_PACKET_LEN;

/// Configuration-related error conditions
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Validation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Deserialization error: {0}")]
    Serde(#[from] serde_yaml::Error),
}

/// Allocator tuning parameters.
///
/// The hard allocation ceiling is not configurable; `max_packet_len` can
/// only tighten the per-packet length limit below its default.
#[derive(Clone, Debug, Deserialize)]
pub struct AllocatorConfig {
    /// Per-packet length ceiling in bytes.
    #[serde(default = "default_max_packet_len")]
    pub max_packet_len: usize,

    /// Whether the allocator maintains its statistics block.
    #[serde(default = "default_collect_stats")]
    pub collect_stats: bool,
}

fn default_max_packet_len() -> usize {
    MAX_PACKET_LEN
}

fn default_collect_stats() -> bool {
    true
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            max_packet_len: default_max_packet_len(),
            collect_stats: default_collect_stats(),
        }
    }
}

impl AllocatorConfig {
    /// Validates configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_packet_len > MAX_PACKET_LEN {
            return Err(ConfigError::Validation(format!(
                "Packet length ceiling {} exceeds the representable maximum {}",
                self.max_packet_len, MAX_PACKET_LEN
            )));
        }
        Ok(())
    }
}

/// Loads allocator configuration from a YAML file.
///
/// # Arguments
///
/// * `path` - Path to the YAML configuration file.
pub fn load(path: impl AsRef<Path>) -> Result<AllocatorConfig, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AllocatorConfig = serde_yaml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        let config = AllocatorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_packet_len, MAX_PACKET_LEN);
        assert!(config.collect_stats);
    }

    #[test]
    fn ceiling_above_representable_maximum_is_rejected() {
        let config = AllocatorConfig {
            max_packet_len: MAX_PACKET_LEN + 1,
            collect_stats: true,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn yaml_with_partial_fields_fills_defaults() {
        let config: AllocatorConfig = serde_yaml::from_str("max_packet_len: 65536").unwrap();
        assert_eq!(config.max_packet_len, 65536);
        assert!(config.collect_stats);
    }

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let result = load("/nonexistent/packhund.yaml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }
}
