//! Web App Manager for Pafari.
//!
//! Keeps the registry of installed web applications in SQLite.

use rusqlite::{params, Connection};

use crate::types::errors::WebAppError;
use crate::types::web_app::WebApplication;

/// Trait defining web application registry operations.
pub trait WebAppManagerTrait {
    fn install(&mut self, app: &WebApplication) -> Result<(), WebAppError>;
    fn remove(&mut self, id: &str) -> Result<(), WebAppError>;
    fn get(&self, id: &str) -> Result<WebApplication, WebAppError>;
    /// All installed applications, system ones included, by name.
    fn list(&self) -> Result<Vec<WebApplication>, WebAppError>;
}

/// Web application registry backed by a SQLite connection.
pub struct WebAppManager<'a> {
    conn: &'a Connection,
}

impl<'a> WebAppManager<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn row_to_app(row: &rusqlite::Row) -> rusqlite::Result<WebApplication> {
        Ok(WebApplication {
            id: row.get(0)?,
            name: row.get(1)?,
            url: row.get(2)?,
            icon_path: row.get(3)?,
            tmp_icon_path: row.get(4)?,
            install_date: row.get(5)?,
            system: row.get::<_, i64>(6)? != 0,
        })
    }
}

impl<'a> WebAppManagerTrait for WebAppManager<'a> {
    fn install(&mut self, app: &WebApplication) -> Result<(), WebAppError> {
        let inserted = self
            .conn
            .execute(
                "INSERT OR IGNORE INTO web_apps (id, name, url, icon_path, tmp_icon_path, install_date, system) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    app.id,
                    app.name,
                    app.url,
                    app.icon_path,
                    app.tmp_icon_path,
                    app.install_date,
                    app.system as i64
                ],
            )
            .map_err(|e| WebAppError::DatabaseError(e.to_string()))?;

        if inserted == 0 {
            return Err(WebAppError::AlreadyInstalled(app.id.clone()));
        }
        Ok(())
    }

    fn remove(&mut self, id: &str) -> Result<(), WebAppError> {
        let affected = self
            .conn
            .execute("DELETE FROM web_apps WHERE id = ?1", params![id])
            .map_err(|e| WebAppError::DatabaseError(e.to_string()))?;

        if affected == 0 {
            return Err(WebAppError::NotFound(id.to_string()));
        }
        Ok(())
    }

    fn get(&self, id: &str) -> Result<WebApplication, WebAppError> {
        self.conn
            .query_row(
                "SELECT id, name, url, icon_path, tmp_icon_path, install_date, system \
                 FROM web_apps WHERE id = ?1",
                params![id],
                Self::row_to_app,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => WebAppError::NotFound(id.to_string()),
                other => WebAppError::DatabaseError(other.to_string()),
            })
    }

    fn list(&self) -> Result<Vec<WebApplication>, WebAppError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, name, url, icon_path, tmp_icon_path, install_date, system \
                 FROM web_apps ORDER BY name COLLATE NOCASE, id",
            )
            .map_err(|e| WebAppError::DatabaseError(e.to_string()))?;

        let rows = stmt
            .query_map([], Self::row_to_app)
            .map_err(|e| WebAppError::DatabaseError(e.to_string()))?;

        let mut apps = Vec::new();
        for row in rows {
            apps.push(row.map_err(|e| WebAppError::DatabaseError(e.to_string()))?);
        }
        Ok(apps)
    }
}
