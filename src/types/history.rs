use serde::{Deserialize, Serialize};

/// Maximum number of tiles shown in the overview's most-visited grid.
pub const OVERVIEW_MAX_ITEMS: u32 = 9;

/// Represents a single history entry for a visited page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryUrl {
    pub id: String,
    pub url: String,
    pub title: String,
    pub visit_time: i64,
    pub visit_count: i32,
    pub hidden: bool,
}

/// Ordering applied to a history query.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HistorySort {
    MostVisited,
    MostRecent,
}

/// Parameters of a history URL query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryQuery {
    pub sort: HistorySort,
    /// Zero means unlimited.
    pub limit: u32,
    pub ignore_hidden: bool,
    /// Skips `file:` URLs and internal pages.
    pub ignore_local: bool,
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self {
            sort: HistorySort::MostRecent,
            limit: 0,
            ignore_hidden: false,
            ignore_local: false,
        }
    }
}

impl HistoryQuery {
    /// The query behind the overview page's most-visited grid.
    pub fn for_overview() -> Self {
        Self {
            sort: HistorySort::MostVisited,
            limit: OVERVIEW_MAX_ITEMS,
            ignore_hidden: true,
            ignore_local: true,
        }
    }
}
