//! Tracking prevention summary and the privacy report derived from it.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;

use crate::database::SharedDatabase;
use crate::managers::tracking_manager::{TrackingManager, TrackingManagerTrait};
use crate::types::errors::TrackingError;
use crate::types::privacy::{ThirdParty, TrackingSummary};

/// Entries shown per list before collapsing the rest into a count.
pub const PRIVACY_REPORT_MAX_ENTRIES: usize = 5;

/// Source of the tracking prevention summary (the network layer).
#[async_trait]
pub trait TrackingSummaryProvider: Send + Sync {
    async fn summary(&self) -> Result<Vec<ThirdParty>, TrackingError>;
}

/// Summary built from observations stored in SQLite.
#[derive(Clone)]
pub struct DatabaseTrackingSummary {
    db: SharedDatabase,
}

impl DatabaseTrackingSummary {
    pub fn new(db: SharedDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TrackingSummaryProvider for DatabaseTrackingSummary {
    async fn summary(&self) -> Result<Vec<ThirdParty>, TrackingError> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let db = db
                .lock()
                .map_err(|e| TrackingError::DatabaseError(e.to_string()))?;
            TrackingManager::new(db.connection()).third_parties()
        })
        .await
        .map_err(|e| TrackingError::Unavailable(e.to_string()))?
    }
}

/// Fetches the summary once, degrading a failure to `Unavailable`.
pub async fn fetch_summary(provider: &dyn TrackingSummaryProvider) -> TrackingSummary {
    match provider.summary().await {
        Ok(third_parties) => TrackingSummary::Summary(third_parties),
        Err(e) => {
            tracing::warn!("Could not fetch tracking prevention summary: {}", e);
            TrackingSummary::Unavailable
        }
    }
}

/// Lookup tables over the blocked (first party, third party) pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackerTables {
    /// Tracker domain → sites it tried to profile.
    pub trackers: BTreeMap<String, BTreeSet<String>>,
    /// Site domain → trackers seen on it.
    pub websites: BTreeMap<String, BTreeSet<String>>,
}

impl TrackerTables {
    /// Keeps only pairs where the tracker was denied website data access.
    pub fn from_summary(summary: &[ThirdParty]) -> Self {
        let mut tables = Self::default();
        for third_party in summary {
            for first_party in &third_party.first_parties {
                if first_party.website_data_access_allowed {
                    continue;
                }
                tables
                    .websites
                    .entry(first_party.domain.clone())
                    .or_default()
                    .insert(third_party.domain.clone());
                tables
                    .trackers
                    .entry(third_party.domain.clone())
                    .or_default()
                    .insert(first_party.domain.clone());
            }
        }
        tables
    }
}

/// A list truncated for display: the first entries plus how many were left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayList {
    pub entries: Vec<String>,
    pub overflow: usize,
}

impl DisplayList {
    pub fn truncate<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut entries = Vec::new();
        let mut total = 0;
        for item in items {
            if entries.len() < PRIVACY_REPORT_MAX_ENTRIES {
                entries.push(item.clone());
            }
            total += 1;
        }
        Self {
            overflow: total - entries.len(),
            entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// What the privacy report card says.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportState {
    /// The summary lists this many trackers.
    Protected(usize),
    /// The summary was fetched and is empty.
    NothingBlocked,
    /// The summary could not be fetched.
    Unavailable,
}

impl ReportState {
    /// Value of the card's `data-state` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportState::Protected(_) => "protected",
            ReportState::NothingBlocked => "empty",
            ReportState::Unavailable => "unavailable",
        }
    }
}

/// Data behind the start page's privacy report card.
#[derive(Debug, Clone, PartialEq)]
pub struct PrivacyReport {
    pub state: ReportState,
    pub trackers: DisplayList,
    pub websites: DisplayList,
}

impl PrivacyReport {
    pub fn from_summary(summary: &TrackingSummary) -> Self {
        let third_parties = match summary {
            TrackingSummary::Summary(list) if !list.is_empty() => list,
            TrackingSummary::Summary(_) => return Self::without_trackers(ReportState::NothingBlocked),
            TrackingSummary::Unavailable => return Self::without_trackers(ReportState::Unavailable),
        };

        let tables = TrackerTables::from_summary(third_parties);
        Self {
            state: ReportState::Protected(third_parties.len()),
            trackers: DisplayList::truncate(tables.trackers.keys()),
            websites: DisplayList::truncate(tables.websites.keys()),
        }
    }

    fn without_trackers(state: ReportState) -> Self {
        Self {
            state,
            trackers: DisplayList::default(),
            websites: DisplayList::default(),
        }
    }

    /// Headline sentence of the card.
    pub fn description(&self) -> String {
        match self.state {
            ReportState::Protected(1) => "Pafari prevented 1 tracker from profiling you".to_string(),
            ReportState::Protected(n) => format!("Pafari prevented {} trackers from profiling you", n),
            ReportState::NothingBlocked | ReportState::Unavailable => {
                "No trackers blocked yet".to_string()
            }
        }
    }
}
