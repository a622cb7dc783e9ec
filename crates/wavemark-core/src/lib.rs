//! Wavemark Core - headless host surface for waveform overlay plugins
//!
//! This crate provides the pieces a waveform overlay plugin runs against,
//! without any rendering backend:
//!
//! - **Element tree** (`dom`): arena of styled elements with a small
//!   absolute-position layout model, standing in for a browser DOM
//! - **Geometry** (`geometry`): rectangles, CSS lengths and time/pixel conversions
//! - **Events** (`events`): typed publish/subscribe with cancellation handles
//! - **Drag primitive** (`drag`): pointer down/move/up to drag deltas with a
//!   minimum-motion threshold
//! - **Deferred tasks** (`schedule`): virtual-clock timer queue for
//!   settle-then-measure work
//! - **Host interface** (`host`, `input`, `plugin`): the waveform engine seam,
//!   an in-memory `HeadlessHost`, and the `Plugin` trait
//! - **Configuration** (`config`): YAML helpers for serde config structs
//!
//! # Architecture
//!
//! ```text
//! engine signals (HostEvent) ──► Plugin::on_host_event ──► Dom mutations
//! pointer input (InputEvent) ──► Plugin::on_input      ──► plugin events
//! elapsed time               ──► Plugin::advance       ──► deferred tasks
//! ```
//!
//! Everything is single-threaded: the caller owns the host and feeds events
//! to plugins one at a time.

pub mod config;
pub mod dom;
pub mod drag;
pub mod error;
pub mod events;
pub mod geometry;
pub mod host;
pub mod input;
pub mod plugin;
pub mod schedule;

pub use config::{config_to_yaml, load_config_str, parse_config};
pub use dom::{Dom, ElementId, TextMetrics};
pub use drag::{DragEvent, DragTracker};
pub use error::{PluginError, PluginResult};
pub use events::{Emitter, SubscriptionId};
pub use geometry::{Length, Point, Rect, Size};
pub use host::{HeadlessHost, HostEvent, WaveformHost};
pub use input::{InputEvent, PointerButton};
pub use plugin::Plugin;
pub use schedule::{TaskHandle, TaskQueue};
