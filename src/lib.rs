//! # Teledigest
//!
//! Message store behind channel digests.
//!
//! Teledigest persists a continuous stream of short channel messages and
//! serves them back over arbitrary time windows, either as a plain
//! chronological scan or as a keyword-relevance scan that narrows the window
//! to messages about a configured topic set.
//!
//! ## Features
//!
//! - Single `SQLite` file holding the primary `messages` table
//! - Best-effort FTS5 mirror for keyword relevance, with transparent fallback
//! - Idempotent writes: the first write of a message id wins
//! - Calendar-day and rolling 24-hour window helpers
//!
//! ## Example
//!
//! ```rust,ignore
//! use teledigest::{DigestService, KeywordSet, MessageBackend, MessageId, SqliteMessageStore, StoreOptions};
//!
//! let store = SqliteMessageStore::open("digest.db", StoreOptions::default())?;
//! store.save_message(&MessageId::new("chan-1:42"), "chan-1", timestamp, "NATO aid package")?;
//!
//! let service = DigestService::new(store, KeywordSet::parse(["NATO", "ракет*"]), 200);
//! let entries = service.relevant_messages_last_24h()?;
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

pub mod cli;
pub mod config;
pub mod models;
pub mod observability;
pub mod security;
pub mod services;
pub mod storage;

pub use config::DigestConfig;
pub use models::{
    DigestEntry, Keyword, KeywordSet, Message, MessageId, SaveOutcome, TimeWindow, day_window,
    day_window_in, rolling_24h_window,
};
pub use security::{Sanitizer, TextSanitizer};
pub use services::DigestService;
pub use storage::{FullTextCapability, MessageBackend, SqliteMessageStore, StoreOptions};

/// Error type for teledigest operations.
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Empty message id or channel, malformed dates, malformed ingest lines |
/// | `Storage` | The primary `messages` table cannot be opened, written, or queried |
/// | `OperationFailed` | Configuration, logging, or other I/O outside the store fails |
///
/// Failures of the full-text mirror never surface here; they are logged and
/// the store degrades to unfiltered retrieval.
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The system of record failed.
    ///
    /// Raised when:
    /// - The database file cannot be opened or configured
    /// - The `messages` table or its indices cannot be created
    /// - A primary insert fails for a reason other than a duplicate id
    /// - A range query faults
    ///
    /// Never retried internally; the caller decides.
    #[error("storage operation '{operation}' failed: {cause}")]
    Storage {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// An operation outside the store failed.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

impl Error {
    /// Builds a [`Error::Storage`] from an operation name and any displayable cause.
    pub(crate) fn storage(operation: &str, cause: impl std::fmt::Display) -> Self {
        Self::Storage {
            operation: operation.to_string(),
            cause: cause.to_string(),
        }
    }

    /// Returns true if the error came from the primary store.
    #[must_use]
    pub const fn is_storage(&self) -> bool {
        matches!(self, Self::Storage { .. })
    }
}

/// Result type alias for teledigest operations.
pub type Result<T> = std::result::Result<T, Error>;
