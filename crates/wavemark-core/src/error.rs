//! Error types for plugin lifecycle operations
//!
//! Only precondition failures are errors. Geometry updates that would break
//! a region's invariants are rejected silently, and operations aimed at a
//! missing surface or a removed entity degrade to no-ops.

use thiserror::Error;

/// Errors raised by plugin operations that need an attached host
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PluginError {
    /// The plugin has not been initialised against a host (or was destroyed)
    #[error("{plugin} plugin is not initialized with a waveform host")]
    NotInitialized { plugin: &'static str },

    /// `init` was called twice without an intervening `destroy`
    #[error("{plugin} plugin is already initialized")]
    AlreadyInitialized { plugin: &'static str },

    /// The host exposes no wrapper surface to attach overlays to
    #[error("{plugin} plugin needs a wrapper surface but the host has none")]
    MissingWrapper { plugin: &'static str },
}

/// Result type for plugin operations
pub type PluginResult<T> = Result<T, PluginError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PluginError::NotInitialized { plugin: "regions" };
        assert!(err.to_string().contains("regions"));
        assert!(err.to_string().contains("not initialized"));

        let err = PluginError::MissingWrapper { plugin: "timeline" };
        assert!(err.to_string().contains("timeline"));
    }
}
