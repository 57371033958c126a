//! Voice intents: the closed set of commands this skill understands.
//!
//! Natural-language understanding happens upstream in the voice platform.
//! This module only maps the recognised intent *name* onto an
//! [`IntentKind`] and collects the item names from the `Items` slots.

use serde::{Deserialize, Serialize};

use bringskill_adapters::NluIntent;

use crate::error::{IntentError, Result};

/// Slot name that carries item names in every item-bearing intent.
pub const ITEMS_SLOT: &str = "Items";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The kind of a voice intent, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentKind {
    AddItem,
    RemoveItem,
    ReadList,
    QueryItem,
}

impl IntentKind {
    /// All kinds, in subscription order.
    pub const ALL: [IntentKind; 4] = [
        IntentKind::AddItem,
        IntentKind::RemoveItem,
        IntentKind::ReadList,
        IntentKind::QueryItem,
    ];

    /// Parse a command-line keyword such as `add` or `query`.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim().to_lowercase().as_str() {
            "add" | "add_item" => Some(Self::AddItem),
            "remove" | "remove_item" | "delete" => Some(Self::RemoveItem),
            "read" | "read_list" | "list" => Some(Self::ReadList),
            "query" | "query_item" | "check" => Some(Self::QueryItem),
            _ => None,
        }
    }
}

impl std::fmt::Display for IntentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AddItem => write!(f, "add_item"),
            Self::RemoveItem => write!(f, "remove_item"),
            Self::ReadList => write!(f, "read_list"),
            Self::QueryItem => write!(f, "query_item"),
        }
    }
}

/// A recognised voice command with the item names the NLU extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceIntent {
    AddItem { items: Vec<String> },
    RemoveItem { items: Vec<String> },
    ReadList,
    QueryItem { items: Vec<String> },
}

impl VoiceIntent {
    /// Build an intent of `kind` from raw item names.
    ///
    /// Names are trimmed and blank names dropped; `ReadList` ignores items.
    pub fn new<I, S>(kind: IntentKind, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let items: Vec<String> = items
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        match kind {
            IntentKind::AddItem => Self::AddItem { items },
            IntentKind::RemoveItem => Self::RemoveItem { items },
            IntentKind::ReadList => Self::ReadList,
            IntentKind::QueryItem => Self::QueryItem { items },
        }
    }

    /// Decode a Hermes intent message.
    ///
    /// Every slot named [`ITEMS_SLOT`] contributes its raw (spoken) value.
    pub fn from_nlu(nlu: &NluIntent, names: &IntentNames) -> Result<Self> {
        let kind = names
            .kind_of(nlu.intent_name())
            .ok_or_else(|| IntentError::UnknownIntent {
                name: nlu.intent_name().to_string(),
            })?;
        Ok(Self::new(kind, nlu.slot_values(ITEMS_SLOT)))
    }

    /// The kind of this intent.
    pub fn kind(&self) -> IntentKind {
        match self {
            Self::AddItem { .. } => IntentKind::AddItem,
            Self::RemoveItem { .. } => IntentKind::RemoveItem,
            Self::ReadList => IntentKind::ReadList,
            Self::QueryItem { .. } => IntentKind::QueryItem,
        }
    }

    /// The item names carried by this intent (empty for `ReadList`).
    pub fn items(&self) -> &[String] {
        match self {
            Self::AddItem { items } | Self::RemoveItem { items } | Self::QueryItem { items } => {
                items
            }
            Self::ReadList => &[],
        }
    }
}

// ---------------------------------------------------------------------------
// Intent names
// ---------------------------------------------------------------------------

/// Platform intent names for each kind, the `[intents]` config section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntentNames {
    pub add_item: String,
    pub remove_item: String,
    pub read_list: String,
    pub query_item: String,
}

impl Default for IntentNames {
    fn default() -> Self {
        Self {
            add_item: "BringAddItem".into(),
            remove_item: "BringRemoveItem".into(),
            read_list: "BringReadList".into(),
            query_item: "BringQueryItem".into(),
        }
    }
}

impl IntentNames {
    /// The platform intent name configured for `kind`.
    pub fn name_of(&self, kind: IntentKind) -> &str {
        match kind {
            IntentKind::AddItem => &self.add_item,
            IntentKind::RemoveItem => &self.remove_item,
            IntentKind::ReadList => &self.read_list,
            IntentKind::QueryItem => &self.query_item,
        }
    }

    /// The kind a platform intent name maps to, if any.
    pub fn kind_of(&self, name: &str) -> Option<IntentKind> {
        IntentKind::ALL
            .into_iter()
            .find(|kind| self.name_of(*kind) == name)
    }

    /// Resolve a command-line argument: either a configured intent name or
    /// a keyword such as `add`.
    pub fn resolve(&self, name_or_keyword: &str) -> Result<IntentKind> {
        self.kind_of(name_or_keyword)
            .or_else(|| IntentKind::from_keyword(name_or_keyword))
            .ok_or_else(|| IntentError::InvalidKind(name_or_keyword.to_string()))
    }

    /// Every configured intent name.
    pub fn all(&self) -> Vec<String> {
        IntentKind::ALL
            .into_iter()
            .map(|kind| self.name_of(kind).to_string())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn nlu(json: &str) -> NluIntent {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn from_nlu_collects_item_slots_in_order() {
        let message = nlu(
            r#"{
                "intent": {"intentName": "BringAddItem"},
                "slots": [
                    {"slotName": "Items", "rawValue": "Milch"},
                    {"slotName": "Store", "rawValue": "Aldi"},
                    {"slotName": "Items", "rawValue": " Eier "}
                ]
            }"#,
        );
        let intent = VoiceIntent::from_nlu(&message, &IntentNames::default()).unwrap();
        assert_eq!(
            intent,
            VoiceIntent::AddItem {
                items: vec!["Milch".into(), "Eier".into()]
            }
        );
    }

    #[test]
    fn from_nlu_maps_read_list() {
        let message = nlu(r#"{"intent": {"intentName": "BringReadList"}}"#);
        let intent = VoiceIntent::from_nlu(&message, &IntentNames::default()).unwrap();
        assert_eq!(intent, VoiceIntent::ReadList);
        assert!(intent.items().is_empty());
    }

    #[test]
    fn from_nlu_rejects_unknown_intent() {
        let message = nlu(r#"{"intent": {"intentName": "GetWeather"}}"#);
        let result = VoiceIntent::from_nlu(&message, &IntentNames::default());
        assert!(matches!(result, Err(IntentError::UnknownIntent { name }) if name == "GetWeather"));
    }

    #[test]
    fn from_nlu_uses_custom_names() {
        let names = IntentNames {
            query_item: "einkauf:pruefen".into(),
            ..IntentNames::default()
        };
        let message = nlu(
            r#"{"intent": {"intentName": "einkauf:pruefen"},
                "slots": [{"slotName": "Items", "rawValue": "Butter"}]}"#,
        );
        let intent = VoiceIntent::from_nlu(&message, &names).unwrap();
        assert_eq!(intent.kind(), IntentKind::QueryItem);
        assert_eq!(intent.items(), ["Butter".to_string()]);
    }

    #[test]
    fn new_drops_blank_items() {
        let intent = VoiceIntent::new(IntentKind::RemoveItem, ["", "  ", "Brot"]);
        assert_eq!(intent.items(), ["Brot".to_string()]);
    }

    #[test]
    fn resolve_accepts_names_and_keywords() {
        let names = IntentNames::default();
        assert_eq!(names.resolve("BringRemoveItem").unwrap(), IntentKind::RemoveItem);
        assert_eq!(names.resolve("add").unwrap(), IntentKind::AddItem);
        assert_eq!(names.resolve("CHECK").unwrap(), IntentKind::QueryItem);
        assert!(matches!(names.resolve("dance"), Err(IntentError::InvalidKind(_))));
    }

    #[test]
    fn all_names_round_trip_to_kinds() {
        let names = IntentNames::default();
        for (name, kind) in names.all().iter().zip(IntentKind::ALL) {
            assert_eq!(names.kind_of(name), Some(kind));
        }
    }
}
