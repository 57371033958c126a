//! Shopping-list entries as the vendor reports them.

use serde::{Deserialize, Serialize};

/// One entry on the vendor's shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    /// Free-text item name as shown in the app (e.g. `Milch`).
    pub name: String,
    /// Optional quantity or note attached to the item.  The router never
    /// sets one; the vendor reports an empty string when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specification: Option<String>,
}

impl ShoppingListItem {
    /// Create an item without a specification.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            specification: None,
        }
    }

    /// Whether this entry is the item the user spoke.
    pub fn matches(&self, spoken: &str) -> bool {
        names_match(&self.name, spoken)
    }
}

/// Compare two item names the way the user perceives them: surrounding
/// whitespace and letter case are ignored.
pub fn names_match(a: &str, b: &str) -> bool {
    let a = a.trim();
    let b = b.trim();
    a == b || a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_ignores_case_and_whitespace() {
        assert!(names_match("Milch", "milch"));
        assert!(names_match("  Äpfel ", "äpfel"));
        assert!(!names_match("Milch", "Milchreis"));
    }

    #[test]
    fn item_deserializes_empty_specification() {
        let item: ShoppingListItem =
            serde_json::from_str(r#"{"name":"Eier","specification":""}"#).unwrap();
        assert_eq!(item.name, "Eier");
        assert_eq!(item.specification.as_deref(), Some(""));
    }

    #[test]
    fn item_deserializes_without_specification() {
        let item: ShoppingListItem = serde_json::from_str(r#"{"name":"Brot"}"#).unwrap();
        assert!(item.matches("brot"));
        assert!(item.specification.is_none());
    }
}
