//! Plugin lifecycle trait
//!
//! A plugin is initialised against a host once, then fed host signals,
//! input and elapsed time by whoever owns the host, and finally destroyed.
//! How plugins are collected and dispatched to is left to the embedder.

use crate::error::PluginResult;
use crate::host::{HostEvent, WaveformHost};
use crate::input::InputEvent;

/// An overlay attached to a waveform host
pub trait Plugin {
    /// Short name used in errors and logs
    fn name(&self) -> &'static str;

    /// Attach to the host's surfaces
    fn init(&mut self, host: &mut dyn WaveformHost) -> PluginResult<()>;

    /// React to an engine signal
    fn on_host_event(&mut self, _host: &mut dyn WaveformHost, _event: &HostEvent) {}

    /// React to pointer/wheel input; returns true if the event was consumed
    fn on_input(&mut self, _host: &mut dyn WaveformHost, _event: &InputEvent) -> bool {
        false
    }

    /// Let `elapsed_ms` pass on the plugin's deferred-task clock
    fn advance(&mut self, _host: &mut dyn WaveformHost, _elapsed_ms: u64) {}

    /// Detach everything and release host subscriptions
    fn destroy(&mut self, host: &mut dyn WaveformHost);
}
