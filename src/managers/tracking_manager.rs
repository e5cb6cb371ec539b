//! Tracking Manager for Pafari.
//!
//! Stores the cross-site tracking relationships reported by the network
//! layer and folds them into per-tracker summaries.

use rusqlite::{params, Connection};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::errors::TrackingError;
use crate::types::privacy::{FirstParty, ThirdParty};

/// Trait defining tracking observation operations.
pub trait TrackingManagerTrait {
    /// Records that `third_party` loaded on `first_party`. Re-recording a pair
    /// updates its access flag and timestamp.
    fn record_observation(
        &mut self,
        first_party: &str,
        third_party: &str,
        data_access_allowed: bool,
    ) -> Result<(), TrackingError>;
    /// Every known tracker with the sites it was seen on, ordered by domain.
    fn third_parties(&self) -> Result<Vec<ThirdParty>, TrackingError>;
    fn clear(&mut self) -> Result<(), TrackingError>;
}

/// Tracking observation store backed by a SQLite connection.
pub struct TrackingManager<'a> {
    conn: &'a Connection,
}

impl<'a> TrackingManager<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    /// Lowercases and validates a registrable domain.
    fn normalize_domain(domain: &str) -> Result<String, TrackingError> {
        let domain = domain.trim().trim_end_matches('.').to_ascii_lowercase();
        let valid = !domain.is_empty()
            && domain
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
        if !valid {
            return Err(TrackingError::InvalidDomain(domain));
        }
        Ok(domain)
    }
}

impl<'a> TrackingManagerTrait for TrackingManager<'a> {
    fn record_observation(
        &mut self,
        first_party: &str,
        third_party: &str,
        data_access_allowed: bool,
    ) -> Result<(), TrackingError> {
        let first_party = Self::normalize_domain(first_party)?;
        let third_party = Self::normalize_domain(third_party)?;

        self.conn
            .execute(
                "INSERT INTO tracking_observations (first_party, third_party, data_access_allowed, last_update_time) \
                 VALUES (?1, ?2, ?3, ?4) \
                 ON CONFLICT(first_party, third_party) DO UPDATE SET \
                 data_access_allowed = excluded.data_access_allowed, \
                 last_update_time = excluded.last_update_time",
                params![first_party, third_party, data_access_allowed as i64, Self::now()],
            )
            .map_err(|e| TrackingError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    fn third_parties(&self) -> Result<Vec<ThirdParty>, TrackingError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT third_party, first_party, data_access_allowed, last_update_time \
                 FROM tracking_observations ORDER BY third_party, first_party",
            )
            .map_err(|e| TrackingError::DatabaseError(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    FirstParty {
                        domain: row.get(1)?,
                        website_data_access_allowed: row.get::<_, i64>(2)? != 0,
                        last_update_time: row.get(3)?,
                    },
                ))
            })
            .map_err(|e| TrackingError::DatabaseError(e.to_string()))?;

        let mut summary: Vec<ThirdParty> = Vec::new();
        for row in rows {
            let (domain, first_party) =
                row.map_err(|e| TrackingError::DatabaseError(e.to_string()))?;
            match summary.last_mut() {
                Some(last) if last.domain == domain => last.first_parties.push(first_party),
                _ => summary.push(ThirdParty {
                    domain,
                    first_parties: vec![first_party],
                }),
            }
        }
        Ok(summary)
    }

    fn clear(&mut self) -> Result<(), TrackingError> {
        self.conn
            .execute("DELETE FROM tracking_observations", [])
            .map_err(|e| TrackingError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}
