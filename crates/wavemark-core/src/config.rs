//! Generic configuration (de)serialization
//!
//! Plugin tunables are plain serde structs marked `#[serde(default)]`, so a
//! YAML document only has to mention the fields it changes. These helpers
//! work on YAML text; where the text comes from is up to the embedder.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Parse a configuration document, failing on invalid YAML or field types
///
/// An empty document yields the type's defaults.
///
/// # Example
///
/// ```ignore
/// let config: RegionsConfig = parse_config("marker_window: 0.1")?;
/// ```
pub fn parse_config<T>(yaml: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if yaml.trim().is_empty() {
        return Ok(T::default());
    }
    serde_yaml::from_str(yaml).context("Failed to parse configuration YAML")
}

/// Parse a configuration document, falling back to defaults on error
///
/// Invalid input is logged as a warning rather than surfaced.
pub fn load_config_str<T>(yaml: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match parse_config(yaml) {
        Ok(config) => {
            log::debug!("load_config_str: configuration parsed");
            config
        }
        Err(e) => {
            log::warn!("load_config_str: {:#}, using defaults", e);
            T::default()
        }
    }
}

/// Serialize a configuration to YAML text
pub fn config_to_yaml<T>(config: &T) -> Result<String>
where
    T: Serialize,
{
    serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct TestConfig {
        threshold: f64,
        name: String,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self {
                threshold: 3.0,
                name: "default".to_string(),
            }
        }
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config: TestConfig = parse_config("threshold: 5.0").unwrap();
        assert_eq!(config.threshold, 5.0);
        assert_eq!(config.name, "default");
    }

    #[test]
    fn test_empty_document_is_default() {
        let config: TestConfig = parse_config("  \n").unwrap();
        assert_eq!(config, TestConfig::default());
    }

    #[test]
    fn test_invalid_falls_back() {
        let _ = env_logger::builder().is_test(true).try_init();
        assert!(parse_config::<TestConfig>("threshold: [oops").is_err());
        let config: TestConfig = load_config_str("threshold: [oops");
        assert_eq!(config, TestConfig::default());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = TestConfig {
            threshold: 1.5,
            name: "custom".to_string(),
        };
        let yaml = config_to_yaml(&config).unwrap();
        let loaded: TestConfig = parse_config(&yaml).unwrap();
        assert_eq!(loaded, config);
    }
}
