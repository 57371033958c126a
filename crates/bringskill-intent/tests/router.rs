//! Integration tests for the intent router.
//!
//! The router runs against an in-memory shopping list that can be switched
//! into a failing mode, so every intent can be exercised end-to-end without
//! the vendor service.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bringskill_adapters::{AdapterError, ShoppingList, ShoppingListItem};
use bringskill_intent::{
    IntentKind, IntentNames, IntentRouter, Locale, Response, ResponseFormatter, VoiceIntent,
};

// ── in-memory list ───────────────────────────────────────────────────────────

#[derive(Default)]
struct MemoryList {
    items: Mutex<Vec<ShoppingListItem>>,
    failing: AtomicBool,
    /// Names passed to `remove_item`, in order.
    removed: Mutex<Vec<String>>,
}

impl MemoryList {
    fn with_items(names: &[&str]) -> Arc<Self> {
        let list = Self::default();
        *list.items.lock().unwrap() = names.iter().map(|n| ShoppingListItem::new(*n)).collect();
        Arc::new(list)
    }

    fn names(&self) -> Vec<String> {
        self.items.lock().unwrap().iter().map(|i| i.name.clone()).collect()
    }

    fn fail(&self) -> Result<(), AdapterError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AdapterError::vendor("memory", "simulated outage"));
        }
        Ok(())
    }
}

#[async_trait]
impl ShoppingList for MemoryList {
    fn id(&self) -> &str {
        "memory"
    }

    async fn list_items(&self) -> Result<Vec<ShoppingListItem>, AdapterError> {
        self.fail()?;
        Ok(self.items.lock().unwrap().clone())
    }

    async fn add_item(&self, name: &str, _specification: Option<&str>) -> Result<(), AdapterError> {
        self.fail()?;
        self.items.lock().unwrap().push(ShoppingListItem::new(name));
        Ok(())
    }

    async fn remove_item(&self, name: &str) -> Result<(), AdapterError> {
        self.fail()?;
        self.items.lock().unwrap().retain(|item| item.name != name);
        self.removed.lock().unwrap().push(name.to_string());
        Ok(())
    }
}

fn router(list: Arc<MemoryList>, locale: Locale) -> IntentRouter {
    IntentRouter::new(
        list,
        ResponseFormatter::seeded(locale, 11),
        IntentNames::default(),
    )
}

fn add(items: &[&str]) -> VoiceIntent {
    VoiceIntent::new(IntentKind::AddItem, items)
}

fn remove(items: &[&str]) -> VoiceIntent {
    VoiceIntent::new(IntentKind::RemoveItem, items)
}

fn query(items: &[&str]) -> VoiceIntent {
    VoiceIntent::new(IntentKind::QueryItem, items)
}

fn assert_spoken(response: &Response) {
    assert!(!response.text.trim().is_empty(), "empty reply: {response:?}");
}

// ── every intent speaks ──────────────────────────────────────────────────────

#[tokio::test]
async fn every_intent_produces_one_non_empty_response() {
    for locale in [Locale::De, Locale::En] {
        let list = MemoryList::with_items(&["Milch"]);
        let router = router(list, locale);
        let intents = [
            add(&["Eier"]),
            add(&[]),
            remove(&["Milch"]),
            remove(&["Butter"]),
            remove(&[]),
            query(&["Eier", "Käse"]),
            query(&[]),
            VoiceIntent::ReadList,
        ];
        for intent in &intents {
            let response = router.route(intent).await;
            assert_spoken(&response);
        }
    }
}

// ── add / remove / query ─────────────────────────────────────────────────────

#[tokio::test]
async fn add_then_query_reports_present() {
    let list = MemoryList::with_items(&[]);
    let router = router(list.clone(), Locale::En);

    let response = router.route(&add(&["Milk"])).await;
    assert_eq!(response.text, "I added Milk to your shopping list.");
    assert!(response.ends_session());
    assert_eq!(list.names(), vec!["Milk"]);

    let response = router.route(&query(&["Milk"])).await;
    assert_eq!(response.text, "Yes, Milk is on your shopping list.");
}

#[tokio::test]
async fn remove_then_query_reports_absent() {
    let list = MemoryList::with_items(&["Milk", "Eggs"]);
    let router = router(list.clone(), Locale::En);

    let response = router.route(&remove(&["Milk"])).await;
    assert_eq!(response.text, "I removed Milk from your shopping list.");
    assert_eq!(list.names(), vec!["Eggs"]);

    let response = router.route(&query(&["Milk"])).await;
    assert_eq!(response.text, "Milk is not on your shopping list.");
}

#[tokio::test]
async fn add_skips_items_already_present() {
    let list = MemoryList::with_items(&["Milk"]);
    let router = router(list.clone(), Locale::En);

    let response = router.route(&add(&["milk", "Bread"])).await;
    assert_eq!(
        response.text,
        "I added Bread to the list. milk is already on your shopping list."
    );
    assert_eq!(list.names(), vec!["Milk", "Bread"]);
}

#[tokio::test]
async fn add_same_item_twice_in_one_utterance_adds_once() {
    let list = MemoryList::with_items(&[]);
    let router = router(list.clone(), Locale::En);

    router.route(&add(&["Eggs", "eggs"])).await;
    assert_eq!(list.names(), vec!["Eggs"]);
}

#[tokio::test]
async fn remove_uses_stored_spelling_and_reports_missing() {
    let list = MemoryList::with_items(&["Milch", "Eier"]);
    let router = router(list.clone(), Locale::En);

    let response = router.route(&remove(&["milch", "Butter"])).await;
    assert_eq!(
        response.text,
        "I removed milch from the list. Butter is not on your shopping list."
    );
    assert_eq!(*list.removed.lock().unwrap(), vec!["Milch"]);
    assert_eq!(list.names(), vec!["Eier"]);
}

#[tokio::test]
async fn query_splits_found_and_missing() {
    let list = MemoryList::with_items(&["Milk", "Eggs"]);
    let router = router(list, Locale::En);

    let response = router.route(&query(&["Milk", "Eggs", "Tea"])).await;
    assert_eq!(
        response.text,
        "Yes, Milk and Eggs are on your shopping list, but Tea is not on your shopping list."
    );
}

// ── read ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn read_list_names_every_item() {
    let list = MemoryList::with_items(&["Milk", "Eggs", "Bread"]);
    let router = router(list, Locale::En);

    let response = router.route(&VoiceIntent::ReadList).await;
    assert_eq!(response.text, "Your shopping list has Milk, Eggs and Bread.");
}

#[tokio::test]
async fn read_empty_list_speaks_empty_phrase() {
    let list = MemoryList::with_items(&[]);
    let router = router(list, Locale::De);

    let response = router.route(&VoiceIntent::ReadList).await;
    assert_spoken(&response);
    let none = Locale::De.phrasebook().read.none;
    assert!(none.contains(&response.text.as_str()), "{}", response.text);
}

// ── follow-up questions ──────────────────────────────────────────────────────

#[tokio::test]
async fn missing_items_keep_session_open_for_same_intent() {
    let list = MemoryList::with_items(&[]);
    let router = router(list.clone(), Locale::En);

    let response = router.route(&remove(&[])).await;
    assert_eq!(response.text, "What should I remove from your shopping list?");
    let continuation = response.continuation.expect("continuation");
    assert_eq!(continuation.intent_filter, vec!["BringRemoveItem"]);
    assert!(list.removed.lock().unwrap().is_empty());
}

// ── vendor failure ───────────────────────────────────────────────────────────

#[tokio::test]
async fn vendor_failure_yields_apology_for_every_intent() {
    let list = MemoryList::with_items(&["Milk"]);
    list.failing.store(true, Ordering::SeqCst);
    let router = router(list.clone(), Locale::En);

    for intent in [add(&["Eggs"]), remove(&["Milk"]), query(&["Milk"]), VoiceIntent::ReadList] {
        let response = router.route(&intent).await;
        assert_eq!(response.text, "Sorry, I can't reach your shopping list right now.");
        assert!(response.ends_session());
    }
    assert_eq!(list.names(), vec!["Milk"]);
}

// ── single-item query and unknown messages ───────────────────────────────────

#[tokio::test]
async fn single_item_query_matches_case_insensitively() {
    let list = MemoryList::with_items(&["Milk"]);
    let router = router(list, Locale::En);

    let response = router.route(&query(&["milk"])).await;
    assert_eq!(response.text, "Yes, milk is on your shopping list.");
}

#[test]
fn not_understood_ends_session_with_apology() {
    let router = router(MemoryList::with_items(&[]), Locale::En);

    let response = router.not_understood();
    assert_eq!(response.text, "Sorry, I didn't understand that.");
    assert!(response.ends_session());
}
