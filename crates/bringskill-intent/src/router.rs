//! Intent router: one voice intent in, one spoken response out.
//!
//! Each intent is a straight-line sequence: fetch the current list, call the
//! vendor for the items that need it, format the reply.  Nothing is retried.
//! Vendor failures are logged and replaced by the apology phrase, so
//! [`IntentRouter::route`] cannot fail.

use std::sync::Arc;

use tracing::{debug, info, warn};

use bringskill_adapters::{ShoppingList, ShoppingListItem, names_match};

use crate::error::{IntentError, Result};
use crate::formatter::ResponseFormatter;
use crate::intent::{IntentKind, IntentNames, VoiceIntent};
use crate::response::Response;

/// Routes voice intents to a shopping list.
pub struct IntentRouter {
    list: Arc<dyn ShoppingList>,
    formatter: ResponseFormatter,
    names: IntentNames,
}

/// Items of one intent, split by outcome.
#[derive(Debug, Default)]
struct Outcome {
    /// Items the intent succeeded for.
    done: Vec<String>,
    /// Items it did not apply to (already present, not found).
    skipped: Vec<String>,
}

impl IntentRouter {
    /// Create a router over `list`, speaking through `formatter`.
    ///
    /// `names` supplies the platform intent names used in follow-up
    /// questions.
    pub fn new(list: Arc<dyn ShoppingList>, formatter: ResponseFormatter, names: IntentNames) -> Self {
        Self {
            list,
            formatter,
            names,
        }
    }

    /// The configured platform intent names.
    pub fn names(&self) -> &IntentNames {
        &self.names
    }

    /// Handle one intent.  Always returns exactly one response with
    /// non-empty text.
    pub async fn route(&self, intent: &VoiceIntent) -> Response {
        info!(
            intent = %intent.kind(),
            items = ?intent.items(),
            list = self.list.id(),
            "routing intent"
        );

        let response = match self.try_route(intent).await {
            Ok(response) => response,
            Err(e) => {
                warn!(intent = %intent.kind(), error = %e, "intent failed");
                Response::end(self.formatter.vendor_unavailable())
            }
        };
        debug!(ends_session = response.ends_session(), "intent handled");
        response
    }

    /// Reply for a message that maps to none of the configured intents.
    pub fn not_understood(&self) -> Response {
        Response::end(self.formatter.not_understood())
    }

    async fn try_route(&self, intent: &VoiceIntent) -> Result<Response> {
        let kind = intent.kind();
        let items = intent.items();
        if kind != IntentKind::ReadList && items.is_empty() {
            debug!(intent = %kind, "no items given, asking");
            return Ok(Response::ask(
                self.formatter.ask_items(kind),
                vec![self.names.name_of(kind).to_string()],
            ));
        }

        let text = match intent {
            VoiceIntent::AddItem { items } => {
                let outcome = self.add_items(items).await?;
                self.formatter.added(&outcome.done, &outcome.skipped)
            }
            VoiceIntent::RemoveItem { items } => {
                let outcome = self.remove_items(items).await?;
                self.formatter.removed(&outcome.done, &outcome.skipped)
            }
            VoiceIntent::QueryItem { items } => {
                let outcome = self.query_items(items).await?;
                self.formatter.queried(&outcome.done, &outcome.skipped)
            }
            VoiceIntent::ReadList => {
                let names: Vec<String> = self
                    .list
                    .list_items()
                    .await?
                    .into_iter()
                    .map(|item| item.name)
                    .collect();
                self.formatter.read_list(&names)
            }
        };
        Ok(Response::end(text))
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Add every item not yet on the list; report the others as present.
    async fn add_items(&self, items: &[String]) -> Result<Outcome> {
        let current = self.list.list_items().await?;
        let mut outcome = Outcome::default();

        for item in items {
            let present = current.iter().any(|entry| entry.matches(item))
                || outcome.done.iter().any(|added| names_match(added, item));
            if present {
                outcome.skipped.push(item.clone());
                continue;
            }
            self.list.add_item(item, None).await?;
            outcome.done.push(item.clone());
        }
        Ok(outcome)
    }

    /// Remove every item on the list; report the others as not found.
    async fn remove_items(&self, items: &[String]) -> Result<Outcome> {
        let current = self.list.list_items().await?;
        let mut outcome = Outcome::default();

        for item in items {
            match self.remove_one(&current, item).await {
                Ok(()) => outcome.done.push(item.clone()),
                Err(IntentError::ItemNotFound { item }) => outcome.skipped.push(item),
                Err(e) => return Err(e),
            }
        }
        Ok(outcome)
    }

    async fn remove_one(&self, current: &[ShoppingListItem], item: &str) -> Result<()> {
        let entry = lookup(current, item)?;
        // The vendor identifies entries by their stored spelling.
        self.list.remove_item(&entry.name).await?;
        Ok(())
    }

    /// Split items into present and absent.
    async fn query_items(&self, items: &[String]) -> Result<Outcome> {
        let mut outcome = Outcome::default();
        if let [item] = items {
            if self.list.contains(item).await? {
                outcome.done.push(item.clone());
            } else {
                outcome.skipped.push(item.clone());
            }
            return Ok(outcome);
        }

        let current = self.list.list_items().await?;
        for item in items {
            match lookup(&current, item) {
                Ok(_) => outcome.done.push(item.clone()),
                Err(_) => outcome.skipped.push(item.clone()),
            }
        }
        Ok(outcome)
    }
}

/// Find the list entry matching a spoken item name.
fn lookup<'a>(current: &'a [ShoppingListItem], item: &str) -> Result<&'a ShoppingListItem> {
    current
        .iter()
        .find(|entry| entry.matches(item))
        .ok_or_else(|| IntentError::ItemNotFound {
            item: item.to_string(),
        })
}
