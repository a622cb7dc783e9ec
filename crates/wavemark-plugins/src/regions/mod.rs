//! Region overlay engine
//!
//! Draggable, resizable time intervals (and zero-width markers) drawn over
//! the waveform:
//!
//! - [`Region`]: one interval, its element subtree and its event channel
//! - [`RegionsPlugin`]: the collection, virtualization, label stacking,
//!   playback tracking and pointer routing
//! - [`RegionParams`] / [`RegionOptions`]: creation parameters and partial updates

pub mod config;
pub mod events;
pub mod layout;
pub mod params;
pub mod plugin;
pub mod region;
pub mod tracking;

pub use config::RegionsConfig;
pub use events::{RegionEvent, RegionHandle, RegionSnapshot, RegionsEvent};
pub use params::{RegionContent, RegionOptions, RegionParams, Side};
pub use plugin::{DragSelection, RegionsPlugin};
pub use region::{Bounds, Limits, Region};
pub use tracking::{PlaybackTracker, Transitions};
