//! Wheel-driven, pointer-anchored zoom

pub mod config;
pub mod plugin;

pub use config::ZoomConfig;
pub use plugin::{ZoomEvent, ZoomPlugin};
