//! Feed entry types for the RSS digest mailer.
//!
//! These mirror the entry listing returned by the feed reader API
//! (`GET /v1/entries`), trimmed to the fields the mailer reads. Unknown
//! fields in the JSON are ignored and unrecognised `status` values map to
//! [`EntryStatus::Unknown`], so newer API versions still deserialize.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Read state of an entry in the feed reader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    #[default]
    Unread,
    Read,
    Removed,
    /// Any status this client does not know about.
    #[serde(other)]
    Unknown,
}

/// A single feed item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub feed_id: i64,
    #[serde(default)]
    pub status: EntryStatus,
    /// Link to the original article.
    pub url: String,
    pub title: String,
    /// Article body as delivered by the feed, usually HTML.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub starred: bool,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

impl Entry {
    /// Create an entry from the three fields the mailer renders.
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }
}

/// An ordered batch of entries. Iteration order is rendering order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryResultSet {
    /// Total matching entries on the server; may exceed `entries.len()`
    /// when the listing was paginated.
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl EntryResultSet {
    /// Wrap a list of entries, setting `total` to its length.
    #[must_use]
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            total: entries.len() as u64,
            entries,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a EntryResultSet {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<Entry> for EntryResultSet {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_api_listing() {
        let json = r#"{
            "total": 2,
            "entries": [
                {
                    "id": 888,
                    "user_id": 1,
                    "feed_id": 42,
                    "status": "unread",
                    "hash": "29f99e4074cdacca1766f47697d03c66070ef6a14770a1fd5a867483c207a1bb",
                    "title": "Rust 1.80 released",
                    "url": "https://blog.rust-lang.org/2024/07/25/Rust-1.80.0.html",
                    "published_at": "2024-07-25T00:00:00Z",
                    "content": "<p>LazyCell and LazyLock</p>",
                    "author": "The Rust Release Team",
                    "starred": false,
                    "enclosures": null
                },
                {
                    "id": 889,
                    "feed_id": 42,
                    "status": "read",
                    "title": "Second",
                    "url": "https://example.com/2"
                }
            ]
        }"#;

        let set: EntryResultSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.total, 2);
        assert_eq!(set.len(), 2);

        let first = &set.entries[0];
        assert_eq!(first.id, 888);
        assert_eq!(first.feed_id, 42);
        assert_eq!(first.status, EntryStatus::Unread);
        assert_eq!(first.title, "Rust 1.80 released");
        assert_eq!(first.content, "<p>LazyCell and LazyLock</p>");
        assert!(first.published_at.is_some());

        let second = &set.entries[1];
        assert_eq!(second.status, EntryStatus::Read);
        assert!(second.content.is_empty());
        assert!(second.published_at.is_none());
    }

    #[test]
    fn test_iteration_preserves_order() {
        let set: EntryResultSet = ["a", "b", "c"]
            .into_iter()
            .map(|t| Entry::new(format!("http://{t}"), t, ""))
            .collect();

        assert_eq!(set.total, 3);
        let titles: Vec<_> = set.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unrecognized_status_does_not_fail_listing() {
        let json = r#"{
            "total": 2,
            "entries": [
                {"title": "Archived", "url": "https://example.com/1", "status": "archived"},
                {"title": "Removed", "url": "https://example.com/2", "status": "removed"}
            ]
        }"#;

        let set: EntryResultSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.entries[0].status, EntryStatus::Unknown);
        assert_eq!(set.entries[1].status, EntryStatus::Removed);
    }

    #[test]
    fn test_empty_listing() {
        let set: EntryResultSet = serde_json::from_str(r#"{"total": 0, "entries": []}"#).unwrap();
        assert!(set.is_empty());
    }
}
