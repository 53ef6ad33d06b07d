//! Digest retrieval service.
//!
//! Packages the three request shapes digest builders use (explicit window,
//! calendar day, rolling 24 hours) over any [`MessageBackend`], in both
//! chronological and keyword-relevance modes.

use crate::config::DigestConfig;
use crate::models::{
    DigestEntry, KeywordSet, Message, MessageId, SaveOutcome, TimeWindow, day_window,
    rolling_24h_window,
};
use crate::storage::{MessageBackend, SqliteMessageStore};
use crate::Result;
use chrono::{DateTime, NaiveDate, Utc};

/// Default cap on rows returned by relevance queries.
pub const DEFAULT_MAX_DOCS: usize = 200;

/// Retrieval service for digest builders.
///
/// Holds the configured keyword set and row cap so callers only pick a
/// window.
#[derive(Debug)]
pub struct DigestService<B: MessageBackend> {
    backend: B,
    keywords: KeywordSet,
    max_docs: usize,
}

impl DigestService<SqliteMessageStore> {
    /// Opens the `SQLite` store named by `config` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Storage`] if the store cannot be opened.
    pub fn open(config: &DigestConfig) -> Result<Self> {
        let store = SqliteMessageStore::open(&config.db_path, config.store_options())?;
        Ok(Self::from_config(store, config))
    }
}

impl<B: MessageBackend> DigestService<B> {
    /// Creates a service over `backend`.
    #[must_use]
    pub const fn new(backend: B, keywords: KeywordSet, max_docs: usize) -> Self {
        Self {
            backend,
            keywords,
            max_docs,
        }
    }

    /// Creates a service using the keywords and row cap from `config`.
    #[must_use]
    pub fn from_config(backend: B, config: &DigestConfig) -> Self {
        Self::new(backend, config.keywords(), config.max_docs)
    }

    /// Overrides the relevance row cap.
    #[must_use]
    pub fn with_max_docs(mut self, max_docs: usize) -> Self {
        self.max_docs = max_docs;
        self
    }

    /// Returns the underlying backend.
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the configured keyword set.
    pub const fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    /// Returns the relevance row cap.
    pub const fn max_docs(&self) -> usize {
        self.max_docs
    }

    /// Stores one message.
    ///
    /// # Errors
    ///
    /// See [`MessageBackend::save_message`].
    pub fn save_message(
        &self,
        id: &MessageId,
        channel: &str,
        timestamp: DateTime<Utc>,
        text: &str,
    ) -> Result<SaveOutcome> {
        self.backend.save_message(id, channel, timestamp, text)
    }

    /// Stores a [`Message`].
    ///
    /// # Errors
    ///
    /// See [`MessageBackend::save_message`].
    pub fn save(&self, message: &Message) -> Result<SaveOutcome> {
        self.backend.save(message)
    }

    /// All messages in `window`, oldest first, optionally capped.
    ///
    /// # Errors
    ///
    /// Returns an error if the primary query fails.
    pub fn query_range(&self, window: TimeWindow, limit: Option<usize>) -> Result<Vec<DigestEntry>> {
        self.backend.query_range(window.start, window.end, limit)
    }

    /// Messages in `window` matching the configured keywords.
    ///
    /// # Errors
    ///
    /// Returns an error if the fallback range query fails.
    pub fn query_relevant(&self, window: TimeWindow) -> Result<Vec<DigestEntry>> {
        self.backend
            .query_relevant(window.start, window.end, self.max_docs, &self.keywords)
    }

    /// Messages of one UTC calendar day, oldest first, optionally capped.
    ///
    /// # Errors
    ///
    /// Returns an error if the primary query fails.
    pub fn messages_for_day(
        &self,
        date: NaiveDate,
        limit: Option<usize>,
    ) -> Result<Vec<DigestEntry>> {
        self.query_range(day_window(date), limit)
    }

    /// Relevant messages of one UTC calendar day.
    ///
    /// # Errors
    ///
    /// Returns an error if the fallback range query fails.
    pub fn relevant_messages_for_day(&self, date: NaiveDate) -> Result<Vec<DigestEntry>> {
        self.query_relevant(day_window(date))
    }

    /// Messages of the last 24 hours, optionally capped.
    ///
    /// # Errors
    ///
    /// Returns an error if the primary query fails.
    pub fn messages_last_24h(&self, limit: Option<usize>) -> Result<Vec<DigestEntry>> {
        self.messages_last_24h_at(Utc::now(), limit)
    }

    /// Messages of the 24 hours ending at `now`, optionally capped.
    ///
    /// # Errors
    ///
    /// Returns an error if the primary query fails.
    pub fn messages_last_24h_at(
        &self,
        now: DateTime<Utc>,
        limit: Option<usize>,
    ) -> Result<Vec<DigestEntry>> {
        self.query_range(rolling_24h_window(now), limit)
    }

    /// Relevant messages of the last 24 hours.
    ///
    /// # Errors
    ///
    /// Returns an error if the fallback range query fails.
    pub fn relevant_messages_last_24h(&self) -> Result<Vec<DigestEntry>> {
        self.relevant_messages_last_24h_at(Utc::now())
    }

    /// Relevant messages of the 24 hours ending at `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the fallback range query fails.
    pub fn relevant_messages_last_24h_at(&self, now: DateTime<Utc>) -> Result<Vec<DigestEntry>> {
        self.query_relevant(rolling_24h_window(now))
    }
}
