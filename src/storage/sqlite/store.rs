//! `SQLite` message store with an FTS5 relevance mirror.
//!
//! The `messages` table is the system of record. `messages_fts` is a
//! best-effort projection written only when a primary insert adds a row, and
//! read only by relevance queries, which fall back to a plain range scan
//! whenever it cannot answer.

use super::connection;
use super::fts::build_match_expression;
use super::metrics::{record_fallback, record_mirror_failure, record_operation_metrics, status_label};
use super::schema::{self, FullTextCapability, MESSAGES_FTS_TABLE};
use crate::models::{
    DigestEntry, KeywordSet, MessageId, SaveOutcome, format_bound, format_timestamp,
    is_storable_timestamp,
};
use crate::security::{Sanitizer, TextSanitizer};
use crate::storage::traits::MessageBackend;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Instant;
use tracing::instrument;

/// Options fixed when the store is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Create and maintain the full-text mirror.
    pub full_text: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self { full_text: true }
    }
}

impl StoreOptions {
    /// Sets whether the full-text mirror is used.
    #[must_use]
    pub const fn with_full_text(mut self, full_text: bool) -> Self {
        self.full_text = full_text;
        self
    }
}

/// Row counts reported by [`SqliteMessageStore::counts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageCounts {
    /// Rows in the primary table.
    pub messages: u64,
    /// Rows in the mirror, if it is available and readable.
    pub mirrored: Option<u64>,
}

/// SQLite-backed message store.
///
/// Holds a path, not a connection: each operation opens its own handle
/// through [`connection::with_connection`].
pub struct SqliteMessageStore {
    db_path: PathBuf,
    options: StoreOptions,
    sanitizer: Box<dyn Sanitizer>,
    capability: AtomicU8,
}

impl std::fmt::Debug for SqliteMessageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteMessageStore")
            .field("db_path", &self.db_path)
            .field("options", &self.options)
            .field("capability", &self.capability())
            .finish_non_exhaustive()
    }
}

impl SqliteMessageStore {
    /// Opens (creating if needed) the store at `db_path` and ensures its schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the parent directory or the database
    /// cannot be created, or the primary table cannot be set up.
    pub fn open(db_path: impl Into<PathBuf>, options: StoreOptions) -> Result<Self> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::storage("create_db_dir", e))?;
        }

        let store = Self {
            db_path,
            options,
            sanitizer: Box::new(TextSanitizer::new()),
            capability: AtomicU8::new(FullTextCapability::Unavailable.to_u8()),
        };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Replaces the sanitizer applied on every write.
    #[must_use]
    pub fn with_sanitizer(mut self, sanitizer: impl Sanitizer + 'static) -> Self {
        self.sanitizer = Box::new(sanitizer);
        self
    }

    /// Returns the database path.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Returns the options the store was opened with.
    #[must_use]
    pub const fn options(&self) -> StoreOptions {
        self.options
    }

    /// Returns the full-text capability resolved by the last schema setup.
    pub fn capability(&self) -> FullTextCapability {
        FullTextCapability::from_u8(self.capability.load(Ordering::Acquire))
    }

    /// Creates missing tables and resolves the full-text capability.
    ///
    /// Idempotent. Runs once from [`SqliteMessageStore::open`]; call again
    /// only before write or query traffic starts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the primary table cannot be created.
    #[instrument(skip(self), fields(operation = "ensure_schema", backend = "sqlite"))]
    pub fn ensure_schema(&self) -> Result<FullTextCapability> {
        let start = Instant::now();
        let result = self.with_connection(|conn| schema::ensure_schema(conn, self.options.full_text));
        record_operation_metrics("ensure_schema", start, status_label(&result));

        let capability = result?;
        self.capability.store(capability.to_u8(), Ordering::Release);
        tracing::info!(
            db_path = %self.db_path.display(),
            full_text = %capability,
            "Message store ready"
        );
        Ok(capability)
    }

    /// Counts primary and mirror rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the primary table cannot be counted.
    pub fn counts(&self) -> Result<MessageCounts> {
        let available = self.capability().is_available();
        self.with_connection(|conn| {
            let messages = count_rows(conn, "SELECT COUNT(*) FROM messages")
                .map_err(|e| Error::storage("count_messages", e))?;
            let mirrored = if available {
                count_rows(conn, "SELECT COUNT(*) FROM messages_fts").ok()
            } else {
                None
            };
            Ok(MessageCounts { messages, mirrored })
        })
    }

    fn with_connection<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        connection::with_connection(&self.db_path, f)
    }

    fn write_message(
        &self,
        id: &MessageId,
        channel: &str,
        timestamp: DateTime<Utc>,
        text: &str,
    ) -> Result<SaveOutcome> {
        if id.as_str().trim().is_empty() {
            return Err(Error::InvalidInput("message id must not be empty".to_string()));
        }
        if channel.trim().is_empty() {
            return Err(Error::InvalidInput(format!(
                "channel must not be empty (message {id})"
            )));
        }

        if !is_storable_timestamp(&timestamp) {
            return Err(Error::InvalidInput(format!(
                "timestamp {timestamp} outside years 0000-9999 (message {id})"
            )));
        }

        let text = self.sanitizer.sanitize(text);
        if text.is_empty() {
            tracing::debug!("Message text empty after sanitization, skipping");
            return Ok(SaveOutcome::Skipped);
        }

        let timestamp = format_timestamp(&timestamp);
        let mirror = self.capability().is_available();

        self.with_connection(|conn| {
            let inserted = conn
                .execute(
                    "INSERT OR IGNORE INTO messages (id, channel, timestamp, text)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![id.as_str(), channel, timestamp, text],
                )
                .map_err(|e| Error::storage("insert_message", e))?;

            if inserted == 0 {
                tracing::debug!("Duplicate message id, keeping first write");
                return Ok(SaveOutcome::Duplicate);
            }

            if mirror {
                mirror_message(conn, id, channel, &timestamp, &text);
            }
            Ok(SaveOutcome::Inserted)
        })
    }

    fn full_text_scan(
        &self,
        expression: &str,
        start: &str,
        end: &str,
        max_docs: usize,
    ) -> Result<Vec<DigestEntry>> {
        self.with_connection(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT channel, text
                     FROM messages_fts
                     WHERE messages_fts MATCH ?1
                       AND timestamp BETWEEN ?2 AND ?3
                     ORDER BY timestamp ASC, id ASC
                     LIMIT ?4",
                )
                .map_err(|e| Error::storage("prepare_match", e))?;

            let rows = stmt
                .query_map(
                    params![expression, start, end, sql_limit(Some(max_docs))],
                    read_entry,
                )
                .map_err(|e| Error::storage("execute_match", e))?;

            rows.collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| Error::storage("read_match_row", e))
        })
    }
}

/// Inserts the mirror row for a freshly inserted message.
///
/// Failures are logged and counted; the primary row already stands.
fn mirror_message(conn: &Connection, id: &MessageId, channel: &str, timestamp: &str, text: &str) {
    let result = conn.execute(
        "INSERT INTO messages_fts (id, channel, timestamp, text) VALUES (?1, ?2, ?3, ?4)",
        params![id.as_str(), channel, timestamp, text],
    );

    if let Err(e) = result {
        tracing::warn!(
            table = MESSAGES_FTS_TABLE,
            error = %e,
            "Failed to insert into full-text mirror; message stored without relevance indexing"
        );
        record_mirror_failure();
    }
}

fn range_scan(
    conn: &Connection,
    start: &str,
    end: &str,
    limit: Option<usize>,
) -> Result<Vec<DigestEntry>> {
    let mut stmt = conn
        .prepare(
            "SELECT channel, text
             FROM messages
             WHERE timestamp BETWEEN ?1 AND ?2
             ORDER BY timestamp ASC, id ASC
             LIMIT ?3",
        )
        .map_err(|e| Error::storage("prepare_query_range", e))?;

    let rows = stmt
        .query_map(params![start, end, sql_limit(limit)], read_entry)
        .map_err(|e| Error::storage("execute_query_range", e))?;

    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::storage("read_range_row", e))
}

fn read_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<DigestEntry> {
    Ok(DigestEntry {
        channel: row.get(0)?,
        text: row.get(1)?,
    })
}

fn count_rows(conn: &Connection, sql: &str) -> rusqlite::Result<u64> {
    conn.query_row(sql, [], |row| row.get::<_, i64>(0))
        .map(|n| u64::try_from(n).unwrap_or(0))
}

/// `LIMIT` value for an optional cap; negative means unbounded in `SQLite`.
fn sql_limit(limit: Option<usize>) -> i64 {
    limit.map_or(-1, |n| i64::try_from(n).unwrap_or(i64::MAX))
}

impl MessageBackend for SqliteMessageStore {
    #[instrument(
        skip(self, id, channel, timestamp, text),
        fields(
            operation = "save_message",
            backend = "sqlite",
            message.id = %id.as_str(),
            channel = %channel
        )
    )]
    fn save_message(
        &self,
        id: &MessageId,
        channel: &str,
        timestamp: DateTime<Utc>,
        text: &str,
    ) -> Result<SaveOutcome> {
        let start = Instant::now();
        let result = self.write_message(id, channel, timestamp, text);
        record_operation_metrics("save_message", start, status_label(&result));
        result
    }

    #[instrument(
        skip(self),
        fields(operation = "query_range", backend = "sqlite")
    )]
    fn query_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: Option<usize>,
    ) -> Result<Vec<DigestEntry>> {
        let started = Instant::now();
        let (start, end) = (format_bound(&start), format_bound(&end));
        let result = self.with_connection(|conn| range_scan(conn, &start, &end, limit));
        record_operation_metrics("query_range", started, status_label(&result));
        result
    }

    #[instrument(
        skip(self, keywords),
        fields(operation = "query_relevant", backend = "sqlite", keywords = keywords.len())
    )]
    fn query_relevant(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        max_docs: usize,
        keywords: &KeywordSet,
    ) -> Result<Vec<DigestEntry>> {
        let started = Instant::now();
        let window = (format_bound(&start), format_bound(&end));

        let fallback_reason = match build_match_expression(keywords) {
            None => "no_keywords",
            Some(_) if !self.capability().is_available() => self.capability().as_str(),
            Some(expression) => {
                match self.full_text_scan(&expression, &window.0, &window.1, max_docs) {
                    Ok(rows) if !rows.is_empty() => {
                        tracing::info!(
                            start = %window.0,
                            end = %window.1,
                            returned = rows.len(),
                            max_docs,
                            "Full-text retrieval returned messages"
                        );
                        record_operation_metrics("query_relevant", started, "success");
                        return Ok(rows);
                    },
                    Ok(_) => {
                        tracing::info!(
                            start = %window.0,
                            end = %window.1,
                            "Full-text retrieval returned 0 rows, falling back to range scan"
                        );
                        "no_matches"
                    },
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            "Full-text retrieval failed, falling back to range scan"
                        );
                        "index_error"
                    },
                }
            },
        };

        tracing::debug!(reason = fallback_reason, "Relevance query using range scan");
        record_fallback(fallback_reason);
        let result = self.query_range(start, end, Some(max_docs));
        record_operation_metrics("query_relevant", started, status_label(&result));
        result
    }
}
