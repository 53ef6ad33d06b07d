//! Schema management for the message store.
//!
//! Creation statements are idempotent guards. Nothing here drops, alters, or
//! migrates existing tables, so any database written by an earlier version
//! opens unchanged.

use crate::{Error, Result};
use rusqlite::Connection;
use std::fmt;

/// Primary table name.
pub const MESSAGES_TABLE: &str = "messages";

/// Full-text mirror table name.
pub const MESSAGES_FTS_TABLE: &str = "messages_fts";

const CREATE_MESSAGES: &str = "CREATE TABLE IF NOT EXISTS messages (
        id TEXT PRIMARY KEY,
        channel TEXT NOT NULL,
        timestamp TEXT NOT NULL,
        text TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_messages_timestamp ON messages(timestamp);
    CREATE INDEX IF NOT EXISTS idx_messages_channel ON messages(channel);";

// Only `text` is tokenized; the other columns ride along for filtering and
// projection so a MATCH never hits a channel name or an id.
const CREATE_MESSAGES_FTS: &str = "CREATE VIRTUAL TABLE IF NOT EXISTS messages_fts USING fts5(
        id UNINDEXED,
        channel UNINDEXED,
        timestamp UNINDEXED,
        text,
        tokenize = 'unicode61 remove_diacritics 2'
    )";

/// Whether relevance queries can use the full-text mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullTextCapability {
    /// The mirror exists and is written on every new message.
    Available,
    /// Creating the mirror failed (for example, FTS5 is not compiled in).
    Unavailable,
    /// Full-text indexing is turned off in configuration.
    Disabled,
}

impl FullTextCapability {
    /// Returns the capability as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Unavailable => "unavailable",
            Self::Disabled => "disabled",
        }
    }

    /// Returns true if relevance queries should attempt a MATCH.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }

    pub(crate) const fn to_u8(self) -> u8 {
        match self {
            Self::Available => 0,
            Self::Unavailable => 1,
            Self::Disabled => 2,
        }
    }

    pub(crate) const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Available,
            2 => Self::Disabled,
            _ => Self::Unavailable,
        }
    }
}

impl fmt::Display for FullTextCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Creates the primary table, its indices, and (optionally) the mirror.
///
/// A mirror failure is logged and reported through the returned capability;
/// it never fails the call.
///
/// # Errors
///
/// Returns [`Error::Storage`] if the primary table or its indices cannot be
/// created.
pub fn ensure_schema(conn: &Connection, full_text: bool) -> Result<FullTextCapability> {
    conn.execute_batch(CREATE_MESSAGES)
        .map_err(|e| Error::storage("create_messages_table", e))?;

    if !full_text {
        tracing::info!("Full-text indexing disabled; relevance queries use range scans");
        return Ok(FullTextCapability::Disabled);
    }

    match conn.execute_batch(CREATE_MESSAGES_FTS) {
        Ok(()) => {
            tracing::debug!(table = MESSAGES_FTS_TABLE, "Full-text mirror initialized");
            Ok(FullTextCapability::Available)
        },
        Err(e) => {
            tracing::error!(
                table = MESSAGES_FTS_TABLE,
                error = %e,
                "Failed to create full-text mirror (is FTS5 compiled in?); relevance filtering disabled"
            );
            metrics::counter!("fts_schema_failures_total").increment(1);
            Ok(FullTextCapability::Unavailable)
        },
    }
}

/// Returns true if a table (or virtual table) named `name` exists.
///
/// # Errors
///
/// Returns [`Error::Storage`] if `sqlite_master` cannot be read.
pub fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [name],
        |row| row.get::<_, i64>(0),
    )
    .map(|count| count > 0)
    .map_err(|e| Error::storage("table_exists", e))
}
