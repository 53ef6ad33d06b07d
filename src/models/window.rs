//! Time windows for digest retrieval.
//!
//! Both query paths take a closed `[start, end]` interval. The helpers here
//! turn "calendar day" and "last 24 hours" requests into concrete bounds;
//! there is no day- or rolling-specific query logic anywhere else.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};
use std::fmt;

/// A closed time interval, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    /// First instant in the window.
    pub start: DateTime<Utc>,
    /// Last instant in the window.
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a window from explicit bounds.
    #[must_use]
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Returns true if `ts` lies within `[start, end]`.
    #[must_use]
    pub fn contains(&self, ts: &DateTime<Utc>) -> bool {
        self.start <= *ts && *ts <= self.end
    }

    /// Returns true if the window cannot contain any instant.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            super::format_timestamp(&self.start),
            super::format_timestamp(&self.end)
        )
    }
}

/// Bounds of one calendar day in UTC.
///
/// `start` is `date 00:00:00.000000`, `end` is `date 23:59:59.999999`.
#[must_use]
pub fn day_window(date: NaiveDate) -> TimeWindow {
    let (start, end) = day_bounds(date);
    TimeWindow::new(start.and_utc(), end.and_utc())
}

/// Bounds of one calendar day in `tz`, expressed in UTC.
///
/// A local time that falls in a DST overlap resolves to its earlier instant;
/// one that falls in a gap moves forward to the first local time that exists.
#[must_use]
pub fn day_window_in<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> TimeWindow {
    let (start, end) = day_bounds(date);
    TimeWindow::new(resolve_local(tz, start), resolve_local(tz, end))
}

/// The 24 hours ending at `now`.
#[must_use]
pub fn rolling_24h_window(now: DateTime<Utc>) -> TimeWindow {
    TimeWindow::new(now - TimeDelta::hours(24), now)
}

fn day_bounds(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = date.and_time(NaiveTime::MIN);
    let end = start + TimeDelta::days(1) - TimeDelta::microseconds(1);
    (start, end)
}

/// Upper bound on how far a skipped local time is moved forward.
const MAX_GAP_MINUTES: u32 = 24 * 60;

fn resolve_local<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> DateTime<Utc> {
    let mut candidate = local;
    // DST gaps start on minute boundaries, so minute steps land on the gap end
    for _ in 0..=MAX_GAP_MINUTES {
        match tz.from_local_datetime(&candidate) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
                return dt.with_timezone(&Utc);
            },
            LocalResult::None => candidate += TimeDelta::minutes(1),
        }
    }
    local.and_utc()
}
