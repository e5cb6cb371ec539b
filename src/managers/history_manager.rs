//! History Manager for Pafari.
//!
//! Implements `HistoryManagerTrait`: recording visits, hiding entries and
//! querying most-visited / most-recent URLs, backed by SQLite via `rusqlite`.

use rusqlite::{params, Connection};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::types::errors::HistoryError;
use crate::types::history::{HistoryQuery, HistorySort, HistoryUrl};

/// URL prefixes treated as local when a query sets `ignore_local`.
const LOCAL_URL_PATTERNS: &[&str] = &["file:%", "about:%", "ephy-about:%"];

/// Trait defining history management operations.
pub trait HistoryManagerTrait {
    fn record_visit(&mut self, url: &str, title: &str) -> Result<String, HistoryError>;
    fn set_hidden(&mut self, url: &str, hidden: bool) -> Result<(), HistoryError>;
    fn query_urls(&self, query: &HistoryQuery) -> Result<Vec<HistoryUrl>, HistoryError>;
    fn get_url(&self, url: &str) -> Result<HistoryUrl, HistoryError>;
    fn delete_url(&mut self, url: &str) -> Result<(), HistoryError>;
    fn clear_all(&mut self) -> Result<(), HistoryError>;
    fn set_recording_enabled(&mut self, enabled: bool);
}

/// History manager backed by a SQLite connection.
pub struct HistoryManager<'a> {
    conn: &'a Connection,
    recording_enabled: bool,
}

impl<'a> HistoryManager<'a> {
    /// Creates a new `HistoryManager` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self {
            conn,
            recording_enabled: true,
        }
    }

    /// Returns the current UNIX timestamp in seconds.
    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    fn row_to_url(row: &rusqlite::Row) -> rusqlite::Result<HistoryUrl> {
        Ok(HistoryUrl {
            id: row.get(0)?,
            url: row.get(1)?,
            title: row.get(2)?,
            visit_time: row.get(3)?,
            visit_count: row.get(4)?,
            hidden: row.get::<_, i64>(5)? != 0,
        })
    }

    /// Builds the SELECT statement for a query.
    fn query_sql(query: &HistoryQuery) -> String {
        let mut conditions: Vec<String> = Vec::new();
        if query.ignore_hidden {
            conditions.push("hidden = 0".to_string());
        }
        if query.ignore_local {
            for pattern in LOCAL_URL_PATTERNS {
                conditions.push(format!("url NOT LIKE '{}'", pattern));
            }
        }

        let mut sql = String::from(
            "SELECT id, url, title, visit_time, visit_count, hidden FROM history",
        );
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(match query.sort {
            HistorySort::MostVisited => " ORDER BY visit_count DESC, visit_time DESC",
            HistorySort::MostRecent => " ORDER BY visit_time DESC",
        });
        if query.limit > 0 {
            sql.push_str(&format!(" LIMIT {}", query.limit));
        }
        sql
    }
}

impl<'a> HistoryManagerTrait for HistoryManager<'a> {
    /// Records a page visit. If the URL already exists, increments visit_count
    /// and updates the visit_time and title. Returns the entry ID.
    fn record_visit(&mut self, url: &str, title: &str) -> Result<String, HistoryError> {
        if !self.recording_enabled {
            return Err(HistoryError::DatabaseError(
                "Recording is disabled (incognito mode)".to_string(),
            ));
        }

        let now = Self::now();

        let existing: Option<String> = self
            .conn
            .query_row(
                "SELECT id FROM history WHERE url = ?1",
                params![url],
                |row| row.get(0),
            )
            .ok();

        match existing {
            Some(id) => {
                self.conn
                    .execute(
                        "UPDATE history SET visit_count = visit_count + 1, visit_time = ?1, title = ?2 WHERE id = ?3",
                        params![now, title, id],
                    )
                    .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;
                Ok(id)
            }
            None => {
                let id = Uuid::new_v4().to_string();
                self.conn
                    .execute(
                        "INSERT INTO history (id, url, title, visit_time, visit_count, hidden) VALUES (?1, ?2, ?3, ?4, 1, 0)",
                        params![id, url, title, now],
                    )
                    .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;
                Ok(id)
            }
        }
    }

    /// Hides or unhides a URL. Hidden URLs stay in history but are left out
    /// of the overview.
    fn set_hidden(&mut self, url: &str, hidden: bool) -> Result<(), HistoryError> {
        let affected = self
            .conn
            .execute(
                "UPDATE history SET hidden = ?1 WHERE url = ?2",
                params![hidden as i64, url],
            )
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        if affected == 0 {
            return Err(HistoryError::NotFound(url.to_string()));
        }
        Ok(())
    }

    fn query_urls(&self, query: &HistoryQuery) -> Result<Vec<HistoryUrl>, HistoryError> {
        let sql = Self::query_sql(query);
        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        let rows = stmt
            .query_map([], Self::row_to_url)
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| HistoryError::DatabaseError(e.to_string()))?);
        }
        Ok(results)
    }

    fn get_url(&self, url: &str) -> Result<HistoryUrl, HistoryError> {
        self.conn
            .query_row(
                "SELECT id, url, title, visit_time, visit_count, hidden FROM history WHERE url = ?1",
                params![url],
                Self::row_to_url,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => HistoryError::NotFound(url.to_string()),
                other => HistoryError::DatabaseError(other.to_string()),
            })
    }

    fn delete_url(&mut self, url: &str) -> Result<(), HistoryError> {
        let affected = self
            .conn
            .execute("DELETE FROM history WHERE url = ?1", params![url])
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        if affected == 0 {
            return Err(HistoryError::NotFound(url.to_string()));
        }
        Ok(())
    }

    fn clear_all(&mut self) -> Result<(), HistoryError> {
        self.conn
            .execute("DELETE FROM history", [])
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    /// Enables or disables history recording (for incognito sessions).
    fn set_recording_enabled(&mut self, enabled: bool) {
        self.recording_enabled = enabled;
    }
}
