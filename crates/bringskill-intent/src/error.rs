//! Intent engine error types.
//!
//! All intent subsystems surface errors through [`IntentError`].  The router
//! catches every variant and turns it into spoken text; none of them escape
//! [`crate::IntentRouter::route`].

use bringskill_adapters::AdapterError;

/// Unified error type for the intent engine.
#[derive(Debug, thiserror::Error)]
pub enum IntentError {
    /// A remove or query named an item that is not on the list.
    #[error("item not on the list: {item}")]
    ItemNotFound { item: String },

    /// A message arrived for an intent name this skill does not handle.
    #[error("unknown intent: {name}")]
    UnknownIntent { name: String },

    /// The intent keyword given on the command line is not recognised.
    #[error("unrecognised intent kind `{0}`")]
    InvalidKind(String),

    /// The shopping-list backend failed.
    #[error("shopping list error: {0}")]
    Vendor(#[from] AdapterError),
}

/// Convenience alias used throughout the intent crate.
pub type Result<T> = std::result::Result<T, IntentError>;
