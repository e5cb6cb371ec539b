//! The SQLite store behind Pafari's concrete page collaborators.
//!
//! One file (`pafari.db` in the data dir) holds:
//! - `history`: visited URLs with visit counts and the hidden flag that keeps
//!   an entry off the most-visited grid;
//! - `bookmarks` and `bookmark_tags`: the start page's bookmarks row;
//! - `web_apps`: the registry listed by `about:applications`;
//! - `tracking_observations`: (first party, third party) pairs behind the
//!   privacy report.
//!
//! The schema is brought up to date every time a [`Database`] is opened.

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

use super::migrations;

/// Handle shared by the RPC layer and the page collaborators.
///
/// `rusqlite::Connection` is `Send` but not `Sync`. Readers serving a page
/// take the lock from the blocking pool, never on a runtime worker.
pub type SharedDatabase = Arc<Mutex<Database>>;

/// A migrated connection to the store.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) the store at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        Self::migrated(Connection::open(path)?)
    }

    /// A throwaway store, gone when dropped.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        Self::migrated(Connection::open_in_memory()?)
    }

    fn migrated(conn: Connection) -> Result<Self, rusqlite::Error> {
        migrations::run_all(&conn)?;
        Ok(Self { conn })
    }

    pub fn into_shared(self) -> SharedDatabase {
        Arc::new(Mutex::new(self))
    }

    /// Managers borrow this: `HistoryManager::new(db.connection())`.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
