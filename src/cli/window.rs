//! Window selection flags.

use crate::models::{TimeWindow, day_window, parse_timestamp, rolling_24h_window};
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::Args;

/// Window flags shared by `range` and `relevant`.
///
/// With no flag set the window is the last 24 hours.
#[derive(Debug, Clone, Default, Args)]
pub struct WindowArgs {
    /// Calendar day (UTC), as YYYY-MM-DD.
    #[arg(long, conflicts_with_all = ["last_24h", "from", "to"])]
    pub day: Option<String>,

    /// The 24 hours ending now (default).
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub last_24h: bool,

    /// Window start, RFC 3339.
    #[arg(long, requires = "to")]
    pub from: Option<String>,

    /// Window end, RFC 3339.
    #[arg(long, requires = "from")]
    pub to: Option<String>,
}

impl WindowArgs {
    /// Resolves the flags to a concrete window, using `now` for rolling ones.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for malformed dates or timestamps, or
    /// when only one explicit bound is given.
    pub fn resolve(&self, now: DateTime<Utc>) -> Result<TimeWindow> {
        if let Some(day) = &self.day {
            return Ok(day_window(parse_day(day)?));
        }

        match (&self.from, &self.to) {
            (Some(from), Some(to)) => Ok(TimeWindow::new(parse_timestamp(from)?, parse_timestamp(to)?)),
            (None, None) => Ok(rolling_24h_window(now)),
            _ => Err(Error::InvalidInput(
                "--from and --to must be given together".to_string(),
            )),
        }
    }
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the text is not a valid date.
pub fn parse_day(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| Error::InvalidInput(format!("invalid date '{s}': {e}")))
}
