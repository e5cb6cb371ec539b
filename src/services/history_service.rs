//! Asynchronous access to browsing history for page builders.

use async_trait::async_trait;

use crate::database::SharedDatabase;
use crate::managers::history_manager::{HistoryManager, HistoryManagerTrait};
use crate::types::errors::HistoryError;
use crate::types::history::{HistoryQuery, HistoryUrl};

/// Read-only history queries used by the overview page.
#[async_trait]
pub trait HistoryService: Send + Sync {
    /// Runs `query` once. An error means the query did not succeed; the
    /// caller decides how to degrade.
    async fn query_urls(&self, query: HistoryQuery) -> Result<Vec<HistoryUrl>, HistoryError>;
}

/// History service reading the SQLite store on a blocking worker.
#[derive(Clone)]
pub struct DatabaseHistoryService {
    db: SharedDatabase,
}

impl DatabaseHistoryService {
    pub fn new(db: SharedDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HistoryService for DatabaseHistoryService {
    async fn query_urls(&self, query: HistoryQuery) -> Result<Vec<HistoryUrl>, HistoryError> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let db = db
                .lock()
                .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;
            HistoryManager::new(db.connection()).query_urls(&query)
        })
        .await
        .map_err(|e| HistoryError::TaskFailed(e.to_string()))?
    }
}
