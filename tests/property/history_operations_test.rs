//! Property-based tests for the most-visited history query.
//!
//! The overview query must respect its bound, sort by visit count and leave
//! out hidden and local entries, whatever was recorded.

use std::collections::BTreeMap;

use pafari::database::Database;
use pafari::managers::history_manager::{HistoryManager, HistoryManagerTrait};
use pafari::types::history::{HistoryQuery, OVERVIEW_MAX_ITEMS};
use proptest::prelude::*;

/// Strategy for generating web URLs with http/https scheme.
fn arb_url() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("https"), Just("http")],
        "[a-z][a-z0-9]{2,8}",
        prop_oneof![Just(".com"), Just(".org"), Just(".io")],
    )
        .prop_map(|(scheme, host, tld)| format!("{}://{}{}", scheme, host, tld))
}

/// Visits per URL, plus whether the URL gets hidden afterwards.
fn arb_visits() -> impl Strategy<Value = BTreeMap<String, (u8, bool)>> {
    prop::collection::btree_map(arb_url(), (1u8..6, prop::bool::weighted(0.2)), 0..16)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn overview_query_is_bounded_and_sorted(visits in arb_visits()) {
        let db = Database::open_in_memory().unwrap();
        let mut manager = HistoryManager::new(db.connection());

        for (url, (count, hidden)) in &visits {
            for _ in 0..*count {
                manager.record_visit(url, "Title").unwrap();
            }
            if *hidden {
                manager.set_hidden(url, true).unwrap();
            }
        }
        manager.record_visit("file:///etc/hosts", "hosts").unwrap();

        let results = manager.query_urls(&HistoryQuery::for_overview()).unwrap();
        let visible = visits.values().filter(|(_, hidden)| !hidden).count();

        prop_assert_eq!(results.len(), visible.min(OVERVIEW_MAX_ITEMS as usize));
        prop_assert!(results
            .windows(2)
            .all(|pair| pair[0].visit_count >= pair[1].visit_count));
        for entry in &results {
            prop_assert!(!entry.hidden);
            prop_assert!(!entry.url.starts_with("file:"));
            let (count, _) = visits[&entry.url];
            prop_assert_eq!(entry.visit_count, count as i32);
        }
    }

    #[test]
    fn unlimited_query_returns_every_entry(visits in arb_visits()) {
        let db = Database::open_in_memory().unwrap();
        let mut manager = HistoryManager::new(db.connection());
        for url in visits.keys() {
            manager.record_visit(url, "Title").unwrap();
        }

        let query = HistoryQuery {
            limit: 0,
            ..HistoryQuery::for_overview()
        };
        prop_assert_eq!(manager.query_urls(&query).unwrap().len(), visits.len());
    }
}
