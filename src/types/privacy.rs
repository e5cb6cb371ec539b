use serde::{Deserialize, Serialize};

/// A website on which a third-party tracker was observed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FirstParty {
    pub domain: String,
    /// Whether the tracker was granted access to its own website data here.
    pub website_data_access_allowed: bool,
    pub last_update_time: i64,
}

/// A third-party domain classified as a tracker, with every site it was seen on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThirdParty {
    pub domain: String,
    pub first_parties: Vec<FirstParty>,
}

/// Outcome of fetching the tracking prevention summary.
///
/// `Unavailable` and an empty `Summary` render identically on the start page,
/// but stay distinct here so callers can tell them apart.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackingSummary {
    Summary(Vec<ThirdParty>),
    Unavailable,
}
