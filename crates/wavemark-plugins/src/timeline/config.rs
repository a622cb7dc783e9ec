//! Timeline ruler options

use serde::{Deserialize, Serialize};

/// Timeline plugin configuration
///
/// Interval fields left unset are derived from the zoom level each time the
/// ruler is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Ruler height (pixels); labels use half of it as font size
    /// Default: 20.0
    pub height: f64,

    /// Seconds between notches
    pub time_interval: Option<f64>,

    /// Every n-th notch is primary (labelled, full opacity)
    pub primary_label_interval: Option<u32>,

    /// Every n-th notch is secondary (labelled, dimmed)
    pub secondary_label_interval: Option<u32>,

    /// Shift every notch by this many seconds
    /// Default: 0.0
    pub time_offset: f64,

    /// Duration to lay out before the host knows its own
    pub duration: Option<f64>,

    /// Opacity of secondary labels and ticks
    /// Default: 0.25
    pub secondary_label_opacity: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            height: 20.0,
            time_interval: None,
            primary_label_interval: None,
            secondary_label_interval: None,
            time_offset: 0.0,
            duration: None,
            secondary_label_opacity: 0.25,
        }
    }
}
