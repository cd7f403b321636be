//! Configuration types for taxatree

use crate::TaxonomyError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub consensus: ConsensusConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsensusConfig {
    /// Fraction of votes a node must gather to be descended into
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Drop unknown ids from the vote set instead of failing
    #[serde(default = "default_ignore_missing")]
    pub ignore_missing: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Ranks kept by rank filtering, most specific first
    #[serde(default = "default_ranks")]
    pub ranks: Vec<String>,
    /// Prefix for the synthetic ids of placeholder nodes
    #[serde(default = "default_dummy_prefix")]
    pub dummy_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

// Default value functions
fn default_threshold() -> f64 { 1.0 }
fn default_ignore_missing() -> bool { false }
fn default_dummy_prefix() -> String { "dummy".to_string() }
fn default_level() -> String { "info".to_string() }

/// Linnaean ranks ordered from most specific to most general
pub fn default_ranks() -> Vec<String> {
    ["species", "genus", "family", "order", "class", "phylum", "kingdom"]
        .iter()
        .map(|r| r.to_string())
        .collect()
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            ignore_missing: default_ignore_missing(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            ranks: default_ranks(),
            dummy_prefix: default_dummy_prefix(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl Config {
    /// Reject values the tree operations cannot work with
    pub fn validate(&self) -> Result<(), TaxonomyError> {
        let t = self.consensus.threshold;
        if !(t > 0.0 && t <= 1.0) {
            return Err(TaxonomyError::Configuration(format!(
                "consensus.threshold must be in (0, 1], got {}",
                t
            )));
        }
        if self.filter.dummy_prefix.trim().is_empty() {
            return Err(TaxonomyError::Configuration(
                "filter.dummy_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, TaxonomyError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| TaxonomyError::Configuration(format!("Failed to parse config: {}", e)))?;
    config.validate()?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), TaxonomyError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| TaxonomyError::Configuration(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.consensus.threshold, 1.0);
        assert!(!config.consensus.ignore_missing);
        assert_eq!(config.filter.ranks.first().map(String::as_str), Some("species"));
        assert_eq!(config.filter.ranks.last().map(String::as_str), Some("kingdom"));
        assert_eq!(config.filter.dummy_prefix, "dummy");
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_config() {
        let toml_content = r#"
[consensus]
threshold = 0.8

[filter]
ranks = ["genus", "family"]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", toml_content).unwrap();

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(config.consensus.threshold, 0.8);
        assert!(!config.consensus.ignore_missing);
        assert_eq!(config.filter.ranks, vec!["genus".to_string(), "family".to_string()]);
        assert_eq!(config.filter.dummy_prefix, "dummy");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_invalid_config() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "this is not valid TOML {{").unwrap();

        match load_config(temp_file.path()).unwrap_err() {
            TaxonomyError::Configuration(msg) => assert!(msg.contains("Failed to parse config")),
            _ => panic!("Expected Configuration error"),
        }
    }

    #[test]
    fn test_load_out_of_range_threshold() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "[consensus]\nthreshold = 1.5\n").unwrap();

        match load_config(temp_file.path()).unwrap_err() {
            TaxonomyError::Configuration(msg) => assert!(msg.contains("consensus.threshold")),
            _ => panic!("Expected Configuration error"),
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        match load_config("/nonexistent/path/to/config.toml").unwrap_err() {
            TaxonomyError::Io(_) => {}
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_config_round_trip() {
        let mut config = Config::default();
        config.consensus.threshold = 0.66;
        config.consensus.ignore_missing = true;
        config.filter.dummy_prefix = "gap".to_string();
        config.logging.level = "debug".to_string();

        let temp_file = NamedTempFile::new().unwrap();
        save_config(temp_file.path(), &config).unwrap();
        let loaded = load_config(temp_file.path()).unwrap();

        assert_eq!(config.consensus.threshold, loaded.consensus.threshold);
        assert_eq!(config.consensus.ignore_missing, loaded.consensus.ignore_missing);
        assert_eq!(config.filter.ranks, loaded.filter.ranks);
        assert_eq!(config.filter.dummy_prefix, loaded.filter.dummy_prefix);
        assert_eq!(config.logging.level, loaded.logging.level);
    }

    #[test]
    fn test_validate_rejects_empty_prefix() {
        let mut config = default_config();
        config.filter.dummy_prefix = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
