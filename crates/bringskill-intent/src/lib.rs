//! Intent routing and response formatting for bringskill.
//!
//! This crate provides:
//!
//! - **Intent model**: [`intent::VoiceIntent`], decoded from Hermes
//!   `NluIntent` messages using the configured [`intent::IntentNames`].
//! - **Router**: [`router::IntentRouter`] maps each intent onto shopping-list
//!   calls and always produces exactly one [`response::Response`].
//! - **Formatter**: [`formatter::ResponseFormatter`] renders results with the
//!   locale's [`phrases::Phrasebook`].

pub mod error;
pub mod formatter;
pub mod intent;
pub mod phrases;
pub mod response;
pub mod router;

pub use error::{IntentError, Result};
pub use formatter::ResponseFormatter;
pub use intent::{ITEMS_SLOT, IntentKind, IntentNames, VoiceIntent};
pub use phrases::{Locale, Phrasebook};
pub use response::{Continuation, Response};
pub use router::IntentRouter;
