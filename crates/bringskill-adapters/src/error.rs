//! Adapter error types.
//!
//! All adapter subsystems surface errors through [`AdapterError`].  Every
//! failure of the shopping-list vendor, whether the network, a non-2xx
//! status, or an unreadable body, collapses into
//! [`AdapterError::VendorUnavailable`] so the router has a single kind to
//! apologise for.

/// Unified error type for bringskill adapters.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// The shopping-list vendor could not be reached or rejected the call.
    #[error("vendor unavailable during `{operation}`: {reason}")]
    VendorUnavailable { operation: String, reason: String },

    /// The voice-platform transport (MQTT) failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// An operation was attempted before the adapter was connected.
    #[error("adapter `{adapter_id}` is not connected")]
    NotConnected { adapter_id: String },

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Configuration error in adapter setup.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl AdapterError {
    /// Shorthand for a [`AdapterError::VendorUnavailable`] failure.
    pub fn vendor(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::VendorUnavailable {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error means the vendor service could not serve the call.
    pub fn is_vendor_unavailable(&self) -> bool {
        matches!(self, Self::VendorUnavailable { .. })
    }
}

/// Convenience alias used throughout the adapters crate.
pub type Result<T> = std::result::Result<T, AdapterError>;
