//! Combined configuration for every overlay plugin
//!
//! ```yaml
//! regions:
//!   marker_window: 0.05
//!   overlap_delay_ms: 10
//! timeline:
//!   height: 24.0
//! zoom:
//!   exponential_zooming: true
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use wavemark_core::{config_to_yaml, load_config_str, parse_config};

use crate::regions::RegionsConfig;
use crate::timeline::TimelineConfig;
use crate::zoom::ZoomConfig;

/// Tunables for the region, timeline and zoom plugins
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub regions: RegionsConfig,
    pub timeline: TimelineConfig,
    pub zoom: ZoomConfig,
}

impl OverlayConfig {
    /// Parse a YAML document; sections and fields left out keep their defaults
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        parse_config(yaml).context("Invalid overlay configuration")
    }

    /// Parse a YAML document, falling back to defaults (with a warning) on error
    pub fn from_yaml_or_default(yaml: &str) -> Self {
        load_config_str(yaml)
    }

    pub fn to_yaml(&self) -> Result<String> {
        config_to_yaml(self)
    }
}
