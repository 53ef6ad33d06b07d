//! Property-based tests for windows, keyword expressions, and range queries.
//!
//! Uses proptest to verify invariants across random inputs:
//! - Window helpers produce the documented bounds
//! - Match expressions always parse as FTS5 and quote every term
//! - Range queries are inclusive, ordered, and truncated to the limit

// Property tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use chrono::{DateTime, NaiveDate, TimeDelta, TimeZone, Utc};
use proptest::prelude::*;
use rusqlite::Connection;
use teledigest::models::format_timestamp;
use teledigest::storage::sqlite::build_match_expression;
use teledigest::{
    KeywordSet, MessageBackend, MessageId, SqliteMessageStore, StoreOptions, day_window,
    rolling_24h_window,
};

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()
}

proptest! {
    /// Property: a day window spans exactly one day minus one microsecond.
    #[test]
    fn prop_day_window_bounds(days in 0i64..40_000) {
        let date = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap() + TimeDelta::days(days);
        let window = day_window(date);

        prop_assert_eq!(window.start.date_naive(), date);
        prop_assert_eq!(window.end.date_naive(), date);
        prop_assert_eq!(window.end - window.start, TimeDelta::days(1) - TimeDelta::microseconds(1));
        prop_assert_eq!(window.end + TimeDelta::microseconds(1), day_window(date.succ_opt().unwrap()).start);
    }

    /// Property: the rolling window ends at `now` and spans 24 hours.
    #[test]
    fn prop_rolling_window_bounds(offset_secs in 0i64..1_000_000_000) {
        let now = DateTime::from_timestamp(offset_secs, 0).unwrap();
        let window = rolling_24h_window(now);

        prop_assert_eq!(window.end, now);
        prop_assert_eq!(window.end - window.start, TimeDelta::hours(24));
        prop_assert!(window.contains(&now));
    }

    /// Property: stored timestamp text sorts the same way as the instants.
    #[test]
    fn prop_timestamp_text_order(a in 0i64..4_000_000_000, b in 0i64..4_000_000_000) {
        let a = DateTime::from_timestamp(a, 0).unwrap();
        let b = DateTime::from_timestamp(b, 0).unwrap();
        prop_assert_eq!(a.cmp(&b), format_timestamp(&a).cmp(&format_timestamp(&b)));
    }

    /// Property: any keyword set yields an expression FTS5 accepts.
    #[test]
    fn prop_match_expression_is_valid(raw in prop::collection::vec("\\PC{0,12}", 0..6)) {
        let keywords = KeywordSet::parse(&raw);
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE VIRTUAL TABLE t USING fts5(text)").unwrap();

        match build_match_expression(&keywords) {
            None => prop_assert!(keywords.is_empty()),
            Some(expr) => {
                prop_assert!(expr.starts_with('"'));
                let parsed = conn.query_row(
                    "SELECT COUNT(*) FROM t WHERE t MATCH ?1",
                    [&expr],
                    |row| row.get::<_, i64>(0),
                );
                prop_assert!(parsed.is_ok(), "expression {} rejected: {:?}", expr, parsed);
            },
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Property: range queries return exactly the in-window messages,
    /// ascending, truncated to the limit.
    #[test]
    fn prop_range_correctness(
        minutes in prop::collection::vec(0i64..3 * 24 * 60, 1..30),
        window_start in 0i64..3 * 24 * 60,
        window_len in 0i64..2 * 24 * 60,
        limit in prop::option::of(0usize..40),
    ) {
        let dir = tempfile::TempDir::new().unwrap();
        let store = SqliteMessageStore::open(dir.path().join("digest.db"), StoreOptions::default()).unwrap();

        for (i, minute) in minutes.iter().enumerate() {
            let ts = base() + TimeDelta::minutes(*minute);
            store
                .save_message(&MessageId::new(format!("m{i:03}")), "c", ts, &format!("{i:03}"))
                .unwrap();
        }

        let start = base() + TimeDelta::minutes(window_start);
        let end = start + TimeDelta::minutes(window_len);

        let mut expected: Vec<(i64, usize)> = minutes
            .iter()
            .enumerate()
            .filter(|&(_, &m)| {
                let ts = base() + TimeDelta::minutes(m);
                start <= ts && ts <= end
            })
            .map(|(i, &m)| (m, i))
            .collect();
        // Ties on timestamp are ordered by id, which sorts like the index
        expected.sort_unstable();
        if let Some(limit) = limit {
            expected.truncate(limit);
        }
        let expected: Vec<String> = expected.into_iter().map(|(_, i)| format!("{i:03}")).collect();

        let actual: Vec<String> = store
            .query_range(start, end, limit)
            .unwrap()
            .into_iter()
            .map(|entry| entry.text)
            .collect();
        prop_assert_eq!(actual, expected);
    }
}
