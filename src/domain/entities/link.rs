//! Link entity representing a saved bookmark.

use chrono::{DateTime, Utc};

use super::{CanonicalUrl, TagSet};

/// A bookmarked URL with metadata.
///
/// Identified by its [`CanonicalUrl`]; `id` is assigned by the store on first
/// save and is `None` until then.
///
/// # Read State
///
/// `read_at` carries three states:
/// - `None` - unread
/// - `Some(UNIX_EPOCH)` - read, time unknown
/// - `Some(t)` - read at `t`
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: Option<i64>,
    pub url: CanonicalUrl,
    pub title: String,
    pub description: String,
    pub saved_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
    pub public: bool,
    pub tags: TagSet,
}

impl Link {
    /// Creates an unsaved, unread link with no tags, saved now.
    pub fn new(url: CanonicalUrl, title: String, description: String, public: bool) -> Self {
        Self {
            id: None,
            url,
            title,
            description,
            saved_at: Utc::now(),
            read_at: None,
            public,
            tags: TagSet::new(),
        }
    }

    /// Returns true if the link has been read, whether or not the time is known.
    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }

    /// Returns true if the link was read at a known instant.
    pub fn has_read_date(&self) -> bool {
        self.read_at.is_some_and(|t| t.timestamp() > 0)
    }
}
