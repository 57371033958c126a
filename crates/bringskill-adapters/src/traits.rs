//! The shopping-list seam between the intent router and the vendor.
//!
//! The Bring client implements [`ShoppingList`]; tests substitute an
//! in-memory list.  Membership checks have a default implementation on top
//! of [`ShoppingList::list_items`] because the vendor offers no dedicated
//! endpoint for them.

use async_trait::async_trait;

use crate::error::Result;
use crate::item::ShoppingListItem;

/// The health status of a shopping-list backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    /// The backend answered a list request.
    Healthy,
    /// The backend could not be reached or rejected the request.
    Unhealthy,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Healthy => write!(f, "healthy"),
            Self::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

/// CRUD access to one shopping list.
#[async_trait]
pub trait ShoppingList: Send + Sync {
    /// Return the identifier of this backend (used in logs).
    fn id(&self) -> &str;

    /// Enumerate the items currently waiting to be bought.
    async fn list_items(&self) -> Result<Vec<ShoppingListItem>>;

    /// Create a list entry.  Adding a name that is already present is left
    /// to the backend's own semantics.
    async fn add_item(&self, name: &str, specification: Option<&str>) -> Result<()>;

    /// Take an entry off the list.  `name` must be the name as stored.
    async fn remove_item(&self, name: &str) -> Result<()>;

    /// Check whether an item with a matching name is on the list.
    async fn contains(&self, name: &str) -> Result<bool> {
        let items = self.list_items().await?;
        Ok(items.iter().any(|item| item.matches(name)))
    }

    /// Check whether the backend is reachable.
    async fn health_check(&self) -> Result<HealthStatus> {
        match self.list_items().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) if e.is_vendor_unavailable() => Ok(HealthStatus::Unhealthy),
            Err(e) => Err(e),
        }
    }
}
