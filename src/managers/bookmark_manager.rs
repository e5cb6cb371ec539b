//! Bookmark Manager for Pafari.
//!
//! Implements `BookmarkManagerTrait`: adding, removing and tagging bookmarks,
//! backed by SQLite via `rusqlite`.

use rusqlite::{params, Connection};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::types::bookmark::Bookmark;
use crate::types::errors::BookmarkError;

/// Trait defining bookmark management operations.
pub trait BookmarkManagerTrait {
    fn add_bookmark(&mut self, url: &str, title: &str) -> Result<String, BookmarkError>;
    fn remove_bookmark(&mut self, id: &str) -> Result<(), BookmarkError>;
    fn add_tag(&mut self, id: &str, tag: &str) -> Result<(), BookmarkError>;
    fn remove_tag(&mut self, id: &str, tag: &str) -> Result<(), BookmarkError>;
    /// Bookmarks carrying `tag`, or every bookmark when `tag` is `None`.
    fn bookmarks_with_tag(&self, tag: Option<&str>) -> Result<Vec<Bookmark>, BookmarkError>;
}

/// Bookmark manager backed by a SQLite connection.
pub struct BookmarkManager<'a> {
    conn: &'a Connection,
}

impl<'a> BookmarkManager<'a> {
    /// Creates a new `BookmarkManager` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    fn next_position(&self) -> Result<i32, BookmarkError> {
        self.conn
            .query_row(
                "SELECT COALESCE(MAX(position), -1) + 1 FROM bookmarks",
                [],
                |row| row.get(0),
            )
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))
    }

    fn bookmark_exists(&self, id: &str) -> Result<bool, BookmarkError> {
        let count: i32 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM bookmarks WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;
        Ok(count > 0)
    }

    fn tags_for(&self, id: &str) -> Result<Vec<String>, BookmarkError> {
        let mut stmt = self
            .conn
            .prepare("SELECT tag FROM bookmark_tags WHERE bookmark_id = ?1 ORDER BY tag")
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;
        let rows = stmt
            .query_map(params![id], |row| row.get::<_, String>(0))
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;

        let mut tags = Vec::new();
        for row in rows {
            tags.push(row.map_err(|e| BookmarkError::DatabaseError(e.to_string()))?);
        }
        Ok(tags)
    }

    fn row_to_bookmark(row: &rusqlite::Row) -> rusqlite::Result<Bookmark> {
        Ok(Bookmark {
            id: row.get(0)?,
            url: row.get(1)?,
            title: row.get(2)?,
            tags: Vec::new(),
            position: row.get(3)?,
            created_at: row.get(4)?,
        })
    }
}

impl<'a> BookmarkManagerTrait for BookmarkManager<'a> {
    /// Adds a new bookmark. Returns the generated bookmark ID.
    fn add_bookmark(&mut self, url: &str, title: &str) -> Result<String, BookmarkError> {
        let duplicate: i32 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM bookmarks WHERE url = ?1",
                params![url],
                |row| row.get(0),
            )
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;
        if duplicate > 0 {
            return Err(BookmarkError::DuplicateUrl(url.to_string()));
        }

        let id = Uuid::new_v4().to_string();
        let position = self.next_position()?;

        self.conn
            .execute(
                "INSERT INTO bookmarks (id, url, title, position, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![id, url, title, position, Self::now()],
            )
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;

        Ok(id)
    }

    /// Removes a bookmark and its tags.
    fn remove_bookmark(&mut self, id: &str) -> Result<(), BookmarkError> {
        self.conn
            .execute("DELETE FROM bookmark_tags WHERE bookmark_id = ?1", params![id])
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;
        let affected = self
            .conn
            .execute("DELETE FROM bookmarks WHERE id = ?1", params![id])
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;

        if affected == 0 {
            return Err(BookmarkError::NotFound(id.to_string()));
        }
        Ok(())
    }

    fn add_tag(&mut self, id: &str, tag: &str) -> Result<(), BookmarkError> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(BookmarkError::InvalidTag(tag.to_string()));
        }
        if !self.bookmark_exists(id)? {
            return Err(BookmarkError::NotFound(id.to_string()));
        }

        self.conn
            .execute(
                "INSERT OR IGNORE INTO bookmark_tags (bookmark_id, tag) VALUES (?1, ?2)",
                params![id, tag],
            )
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    fn remove_tag(&mut self, id: &str, tag: &str) -> Result<(), BookmarkError> {
        if !self.bookmark_exists(id)? {
            return Err(BookmarkError::NotFound(id.to_string()));
        }
        self.conn
            .execute(
                "DELETE FROM bookmark_tags WHERE bookmark_id = ?1 AND tag = ?2",
                params![id, tag],
            )
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    fn bookmarks_with_tag(&self, tag: Option<&str>) -> Result<Vec<Bookmark>, BookmarkError> {
        let mut stmt = match tag {
            Some(_) => self.conn.prepare(
                "SELECT b.id, b.url, b.title, b.position, b.created_at \
                 FROM bookmarks b JOIN bookmark_tags t ON t.bookmark_id = b.id \
                 WHERE t.tag = ?1 ORDER BY b.position",
            ),
            None => self.conn.prepare(
                "SELECT id, url, title, position, created_at FROM bookmarks ORDER BY position",
            ),
        }
        .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;

        let rows = match tag {
            Some(t) => stmt.query_map(params![t], Self::row_to_bookmark),
            None => stmt.query_map([], Self::row_to_bookmark),
        }
        .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;

        let mut results = Vec::new();
        for row in rows {
            let mut bookmark = row.map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;
            bookmark.tags = self.tags_for(&bookmark.id)?;
            results.push(bookmark);
        }
        Ok(results)
    }
}
