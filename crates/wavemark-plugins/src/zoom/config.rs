//! Wheel zoom options

use serde::{Deserialize, Serialize};

/// Zoom plugin configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Pixels-per-second gained per unit of wheel delta (linear mode)
    /// Default: 0.5
    pub scale: f64,

    /// Upper bound on pixels per second; the wrapper's width when unset
    pub max_zoom: Option<f64>,

    /// Wheel delta to accumulate before zooming; 0 zooms on every event
    /// Default: 5.0
    pub delta_threshold: f64,

    /// Multiply instead of add, reaching `max_zoom` in `iterations` steps
    /// Default: false
    pub exponential_zooming: bool,

    /// Steps from the initial zoom to `max_zoom` in exponential mode
    /// Default: 20
    pub iterations: u32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            scale: 0.5,
            max_zoom: None,
            delta_threshold: 5.0,
            exponential_zooming: false,
            iterations: 20,
        }
    }
}
