//! Learning map data model
//!
//!     A learning map is a strict ownership tree:
//!
//!         LearningMap
//!         └── Step        (one per level-2 heading)
//!             └── Column  (one per level-3 heading)
//!                 └── Item (one per list, open key/value mapping)
//!
//!     Collections below the root are lazily allocated: a step without columns has `None`, not an
//!     empty vec, and is serialized without the key. Field order below is alphabetical so that the
//!     YAML keys come out sorted, the way downstream learning map consumers expect them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root of the extracted document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningMap {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub title: String,
}

/// A top-level section of the map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<Column>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Heading text, as shown in navigation.
    pub navtitle: String,
    /// Heading text, unless a quote block below the heading replaced it.
    pub title: String,
}

impl Step {
    pub fn new(heading: &str) -> Self {
        Self {
            columns: None,
            description: None,
            navtitle: heading.to_string(),
            title: heading.to_string(),
        }
    }

    pub fn columns(&self) -> &[Column] {
        self.columns.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Item>>,
    pub title: String,
}

impl Column {
    pub fn new(heading: &str) -> Self {
        Self {
            items: None,
            title: heading.to_string(),
        }
    }

    pub fn items(&self) -> &[Item] {
        self.items.as_deref().unwrap_or_default()
    }
}

/// One list's worth of `key: value` entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(BTreeMap<String, String>);

impl Item {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Sets `key` to `value`, replacing any earlier value for the same key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Appends `text` to the value of `key`, creating it empty if absent.
    pub fn append(&mut self, key: &str, text: &str) {
        self.0.entry(key.to_string()).or_default().push_str(text);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Item {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_defaults_both_titles_to_heading() {
        let step = Step::new("Getting started");
        assert_eq!(step.navtitle, "Getting started");
        assert_eq!(step.title, "Getting started");
        assert!(step.columns.is_none());
        assert!(step.columns().is_empty());
    }

    #[test]
    fn item_append_extends_existing_value() {
        let mut item = Item::new();
        item.set("title", "Foo");
        item.append("title", " Bar");
        assert_eq!(item.get("title"), Some("Foo Bar"));
        assert_eq!(item.len(), 1);
    }

    #[test]
    fn item_iterates_in_key_order() {
        let item: Item = [("url", "u"), ("icon", "i"), ("title", "t")]
            .into_iter()
            .collect();
        let keys: Vec<_> = item.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["icon", "title", "url"]);
    }
}
