//! JSON-lines ingestion.
//!
//! Each non-blank line is one message object:
//! `{"id": "...", "channel": "...", "timestamp": "<RFC 3339>", "text": "..."}`.

use crate::models::{Message, SaveOutcome};
use crate::storage::MessageBackend;
use crate::{Error, Result};
use serde::Serialize;
use std::io::BufRead;

/// Per-outcome counts for one ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    /// New messages stored.
    pub inserted: usize,
    /// Messages whose id was already stored.
    pub duplicates: usize,
    /// Messages with no text left after sanitization.
    pub skipped: usize,
}

impl IngestSummary {
    fn record(&mut self, outcome: SaveOutcome) {
        match outcome {
            SaveOutcome::Inserted => self.inserted += 1,
            SaveOutcome::Duplicate => self.duplicates += 1,
            SaveOutcome::Skipped => self.skipped += 1,
        }
    }

    /// Total messages processed.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.inserted + self.duplicates + self.skipped
    }
}

/// Parses one JSON line into a [`Message`].
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the line is not a message object.
pub fn parse_line(line: &str) -> Result<Message> {
    serde_json::from_str(line).map_err(|e| Error::InvalidInput(format!("malformed message: {e}")))
}

/// Saves every message read from `reader`.
///
/// Stops at the first malformed line or storage failure. Messages saved
/// before that point stay saved, and re-running the same input is safe
/// because duplicate ids are ignored.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] (with the 1-based line number) for a
/// malformed line, [`Error::OperationFailed`] if reading fails, or the
/// backend's error if a save fails.
pub fn ingest_lines<B, R>(backend: &B, reader: R) -> Result<IngestSummary>
where
    B: MessageBackend + ?Sized,
    R: BufRead,
{
    let mut summary = IngestSummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| Error::OperationFailed {
            operation: "read_ingest_input".to_string(),
            cause: e.to_string(),
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let message = parse_line(&line).map_err(|e| match e {
            Error::InvalidInput(cause) => Error::InvalidInput(format!("line {}: {cause}", index + 1)),
            other => other,
        })?;
        summary.record(backend.save(&message)?);
    }

    tracing::info!(
        inserted = summary.inserted,
        duplicates = summary.duplicates,
        skipped = summary.skipped,
        "Ingestion finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{SqliteMessageStore, StoreOptions};
    use chrono::{TimeZone, Utc};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn store() -> (TempDir, SqliteMessageStore) {
        let dir = TempDir::new().unwrap();
        let store = SqliteMessageStore::open(dir.path().join("digest.db"), StoreOptions::default()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_parse_line_normalizes_offset() {
        let message = parse_line(
            r#"{"id":"ua:7","channel":"ua","timestamp":"2024-05-01T03:00:00+03:00","text":"ракета"}"#,
        )
        .unwrap();
        assert_eq!(message.id.as_str(), "ua:7");
        assert_eq!(message.timestamp, Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_ingest_counts_outcomes() {
        let (_dir, store) = store();
        let input = [
            r#"{"id":"1","channel":"ua","timestamp":"2024-05-01T10:00:00Z","text":"ракета ударила"}"#,
            "",
            r#"{"id":"2","channel":"ua","timestamp":"2024-05-01T11:00:00Z","text":"   "}"#,
            r#"{"id":"1","channel":"ua","timestamp":"2024-05-01T10:00:00Z","text":"again"}"#,
            r#"{"id":"3","channel":"en","timestamp":"2024-05-01T12:00:00Z","text":"NATO aid"}"#,
        ]
        .join("\n");

        let summary = ingest_lines(&store, Cursor::new(input)).unwrap();
        assert_eq!(
            summary,
            IngestSummary {
                inserted: 2,
                duplicates: 1,
                skipped: 1
            }
        );
        assert_eq!(summary.total(), 4);
    }

    #[test]
    fn test_ingest_reports_malformed_line() {
        let (_dir, store) = store();
        let input = concat!(
            r#"{"id":"1","channel":"ua","timestamp":"2024-05-01T10:00:00Z","text":"first"}"#,
            "\n",
            r#"{"id":"2","channel":"ua","timestamp":"not a time","text":"second"}"#,
        );

        let err = ingest_lines(&store, Cursor::new(input)).unwrap_err();
        match err {
            Error::InvalidInput(msg) => assert!(msg.starts_with("line 2:"), "{msg}"),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(store.counts().unwrap().messages, 1);
    }
}
