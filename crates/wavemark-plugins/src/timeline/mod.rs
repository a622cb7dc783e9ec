//! Time-axis ruler
//!
//! Notches with `m:ss` / seconds labels at zoom-dependent intervals, attached
//! only while inside the visible scroll window.

pub mod config;
pub mod intervals;
pub mod plugin;

pub use config::TimelineConfig;
pub use intervals::format_time;
pub use plugin::{Notch, NotchKind, TimelineEvent, TimelinePlugin};
