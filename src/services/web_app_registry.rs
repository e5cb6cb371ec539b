//! Installed web application enumeration for the applications page.

use crate::database::SharedDatabase;
use crate::managers::web_app_manager::{WebAppManager, WebAppManagerTrait};
use crate::types::errors::WebAppError;
use crate::types::web_app::WebApplication;

/// Source of installed applications. `application_list` may block; callers
/// run it on a blocking worker.
pub trait WebAppRegistry: Send + Sync {
    fn application_list(&self) -> Result<Vec<WebApplication>, WebAppError>;
}

/// Registry read from the SQLite store.
#[derive(Clone)]
pub struct DatabaseWebApps {
    db: SharedDatabase,
}

impl DatabaseWebApps {
    pub fn new(db: SharedDatabase) -> Self {
        Self { db }
    }
}

impl WebAppRegistry for DatabaseWebApps {
    fn application_list(&self) -> Result<Vec<WebApplication>, WebAppError> {
        let db = self
            .db
            .lock()
            .map_err(|e| WebAppError::DatabaseError(e.to_string()))?;
        WebAppManager::new(db.connection()).list()
    }
}
