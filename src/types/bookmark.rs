use serde::{Deserialize, Serialize};

/// Represents a saved bookmark.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bookmark {
    pub id: String,
    pub url: String,
    pub title: String,
    pub tags: Vec<String>,
    pub position: i32,
    pub created_at: i64,
}

impl Bookmark {
    /// `None` when the bookmark has no address to link to.
    pub fn url(&self) -> Option<&str> {
        Some(self.url.as_str()).filter(|u| !u.is_empty())
    }

    /// May be empty; an untitled bookmark still gets a tile.
    pub fn title(&self) -> &str {
        &self.title
    }
}
