//! Tunables for the region overlay engine

use serde::{Deserialize, Serialize};

/// Region plugin configuration
///
/// Every field has a default, so a YAML document only needs the fields it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionsConfig {
    /// How long after its point a marker counts as "playing" (seconds)
    /// Default: 0.05
    pub marker_window: f64,

    /// Pointer motion before a region body press becomes a move (pixels)
    /// Default: 3.0
    pub drag_threshold: f64,

    /// Pointer motion before a resize-handle press becomes a resize (pixels)
    /// Default: 1.0
    pub handle_drag_threshold: f64,

    /// Default motion threshold for drag-to-create (pixels)
    /// Default: 3.0
    pub selection_threshold: f64,

    /// Width of the transient region created when a drag-selection starts (pixels)
    /// Default: 5.0
    pub selection_initial_width: f64,

    /// Delay before the first attach/detach decision for a new region (ms)
    /// Default: 0 (next tick)
    pub virtualize_delay_ms: u64,

    /// Settling delay before label overlap is measured (ms)
    /// Default: 10
    pub overlap_delay_ms: u64,

    /// Fill colour for regions that do not specify one
    pub default_color: String,

    /// Width of each resize handle (pixels)
    /// Default: 6.0
    pub handle_width: f64,
}

impl Default for RegionsConfig {
    fn default() -> Self {
        Self {
            marker_window: 0.05,
            drag_threshold: 3.0,
            handle_drag_threshold: 1.0,
            selection_threshold: 3.0,
            selection_initial_width: 5.0,
            virtualize_delay_ms: 0,
            overlap_delay_ms: 10,
            default_color: "rgba(0, 0, 0, 0.1)".to_string(),
            handle_width: 6.0,
        }
    }
}
