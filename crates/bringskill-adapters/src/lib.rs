//! Service adapters for bringskill: the Bring! REST client and the Hermes
//! voice-platform transport.
//!
//! The router talks to the shopping list exclusively through the
//! [`ShoppingList`] trait defined in [`traits`], so the Bring client can be
//! replaced by an in-memory list in tests.

pub mod bring;
pub mod error;
pub mod hermes;
pub mod item;
pub mod traits;

pub use bring::{BringClient, BringConfig, Credentials, RemoveMode};
pub use error::{AdapterError, Result};
pub use hermes::{
    ContinueSession, EndSession, HermesAdapter, HermesConfig, NluIntent, Reply, Say, Slot,
};
pub use item::{ShoppingListItem, names_match};
pub use traits::{HealthStatus, ShoppingList};
