//! Message types and identifiers.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique, source-assigned identifier for a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    /// Creates a new message ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for MessageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A channel message as it arrives from the ingestion side.
///
/// Also the line format accepted by `teledigest ingest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier.
    pub id: MessageId,
    /// Source channel name.
    pub channel: String,
    /// When the message was posted.
    pub timestamp: DateTime<Utc>,
    /// Raw message text (sanitized on write).
    pub text: String,
}

impl Message {
    /// Creates a new message.
    #[must_use]
    pub fn new(
        id: impl Into<MessageId>,
        channel: impl Into<String>,
        timestamp: DateTime<Utc>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            channel: channel.into(),
            timestamp,
            text: text.into(),
        }
    }
}

/// A retrieved message: attribution and content only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DigestEntry {
    /// Source channel name.
    pub channel: String,
    /// Sanitized message text.
    pub text: String,
}

impl DigestEntry {
    /// Creates a new digest entry.
    #[must_use]
    pub fn new(channel: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            text: text.into(),
        }
    }
}

/// What a write actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new primary row was written.
    Inserted,
    /// A row with the same id already existed; nothing changed.
    Duplicate,
    /// The text was empty after sanitization; nothing was written.
    Skipped,
}

impl SaveOutcome {
    /// Returns the outcome as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inserted => "inserted",
            Self::Duplicate => "duplicate",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for SaveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Earliest instant the fixed-width text encoding can hold.
pub const MIN_STORED_TIMESTAMP: &str = "0000-01-01T00:00:00.000000Z";

/// Latest instant the fixed-width text encoding can hold.
pub const MAX_STORED_TIMESTAMP: &str = "9999-12-31T23:59:59.999999Z";

/// Unix seconds of [`MIN_STORED_TIMESTAMP`].
const MIN_STORED_SECS: i64 = -62_167_219_200;

/// Unix seconds of the last whole second of year 9999.
const MAX_STORED_SECS: i64 = 253_402_300_799;

/// Formats a timestamp the way both tables store it.
///
/// Fixed-width UTC with six fractional digits, so lexical order of the
/// stored text equals chronological order. Only holds inside
/// [`is_storable_timestamp`]; outside it chrono adds a sign and more year
/// digits.
#[must_use]
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Returns true if `ts` falls in years 0000 through 9999.
#[must_use]
pub fn is_storable_timestamp(ts: &DateTime<Utc>) -> bool {
    (MIN_STORED_SECS..=MAX_STORED_SECS).contains(&ts.timestamp())
}

/// Formats a query bound, clamping it into the storable range.
///
/// Clamping keeps every stored row comparable against the bound, so an
/// open-ended window such as `DateTime::<Utc>::MAX_UTC` still matches.
#[must_use]
pub fn format_bound(ts: &DateTime<Utc>) -> String {
    match ts.timestamp() {
        secs if secs < MIN_STORED_SECS => MIN_STORED_TIMESTAMP.to_string(),
        secs if secs > MAX_STORED_SECS => MAX_STORED_TIMESTAMP.to_string(),
        _ => format_timestamp(ts),
    }
}

/// Parses an RFC 3339 timestamp with any offset into UTC.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidInput`] if the text is not RFC 3339.
pub fn parse_timestamp(s: &str) -> crate::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| crate::Error::InvalidInput(format!("invalid timestamp '{s}': {e}")))
}
