//! Bookmark access for the start page.
//!
//! The overview page only needs "bookmarks with a tag" plus each bookmark's
//! URL and title, so that is all this capability exposes.

use crate::database::SharedDatabase;
use crate::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use crate::types::bookmark::Bookmark;
use crate::types::errors::BookmarkError;

/// Capability handed to the page renderer at construction.
/// `bookmarks_with_tag` may block; callers run it on a blocking worker.
pub trait BookmarksProvider: Send + Sync {
    /// Bookmarks carrying `tag`, or all bookmarks for `None`.
    fn bookmarks_with_tag(&self, tag: Option<&str>) -> Result<Vec<Bookmark>, BookmarkError>;
}

/// Bookmarks read from the SQLite store.
#[derive(Clone)]
pub struct DatabaseBookmarks {
    db: SharedDatabase,
}

impl DatabaseBookmarks {
    pub fn new(db: SharedDatabase) -> Self {
        Self { db }
    }
}

impl BookmarksProvider for DatabaseBookmarks {
    fn bookmarks_with_tag(&self, tag: Option<&str>) -> Result<Vec<Bookmark>, BookmarkError> {
        let db = self
            .db
            .lock()
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;
        BookmarkManager::new(db.connection()).bookmarks_with_tag(tag)
    }
}
