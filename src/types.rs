//! Shared types used by the selection controller, the renderer, and the
//! content loader.

use serde::{Deserialize, Serialize};

/// An entity with a stable unique id.
///
/// Selection compares items by id only, so two values with the same id are
/// the same item even if their other fields differ.
pub trait Identifiable {
    fn id(&self) -> &str;

    /// Whether `self` and `other` refer to the same item.
    fn same_item(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

/// A single portfolio entry.
///
/// Field names follow the content source: the id and title carry a leading
/// underscore on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Work {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_title")]
    pub title: String,
    /// External link. Works with a URL need a second click to open it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// ISO 8601 date or date-time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub role: String,
    /// Rich-text description as markdown.
    #[serde(default)]
    pub description: String,
}

impl Work {
    pub fn has_link(&self) -> bool {
        self.url.as_deref().is_some_and(|u| !u.is_empty())
    }
}

impl Identifiable for Work {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn work(id: &str, url: Option<&str>) -> Work {
        Work {
            id: id.to_string(),
            title: format!("Work {id}"),
            url: url.map(str::to_string),
            date: None,
            role: String::new(),
            description: String::new(),
        }
    }

    #[test]
    fn same_item_compares_ids_only() {
        let a = work("a", None);
        let mut renamed = a.clone();
        renamed.title = "Something else".to_string();
        assert!(a.same_item(&renamed));
        assert!(!a.same_item(&work("b", None)));
    }

    #[test]
    fn empty_url_is_not_a_link() {
        assert!(!work("a", Some("")).has_link());
        assert!(!work("a", None).has_link());
        assert!(work("a", Some("https://example.com")).has_link());
    }

    #[test]
    fn deserializes_underscored_fields() {
        let json = r#"{"_id":"w1","_title":"Atlas","role":"Design","description":"**bold**"}"#;
        let w: Work = serde_json::from_str(json).unwrap();
        assert_eq!(w.id, "w1");
        assert_eq!(w.title, "Atlas");
        assert_eq!(w.url, None);
        assert_eq!(w.date, None);
    }
}
