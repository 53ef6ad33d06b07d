//! Storage backend traits.

use crate::Result;
use crate::models::{DigestEntry, KeywordSet, Message, MessageId, SaveOutcome};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Message storage with chronological and keyword-relevance retrieval.
///
/// Implementations own the primary record store and any derived search
/// index. Only the system of record may surface errors: a failing index
/// degrades relevance queries to range scans.
pub trait MessageBackend: Send + Sync {
    /// Stores a message. The first write of an id wins.
    ///
    /// # Errors
    ///
    /// Returns an error if the id or channel is empty, or if the primary
    /// insert fails.
    fn save_message(
        &self,
        id: &MessageId,
        channel: &str,
        timestamp: DateTime<Utc>,
        text: &str,
    ) -> Result<SaveOutcome>;

    /// Returns messages with `start <= timestamp <= end`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the primary query fails.
    fn query_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: Option<usize>,
    ) -> Result<Vec<DigestEntry>>;

    /// Returns messages in the window matching any keyword, oldest first.
    ///
    /// Falls back to `query_range(start, end, Some(max_docs))` when the
    /// keyword set is empty, the index is unusable, or nothing matches.
    ///
    /// # Errors
    ///
    /// Returns an error only if the fallback range query fails.
    fn query_relevant(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        max_docs: usize,
        keywords: &KeywordSet,
    ) -> Result<Vec<DigestEntry>>;

    /// Stores a [`Message`].
    ///
    /// # Errors
    ///
    /// See [`MessageBackend::save_message`].
    fn save(&self, message: &Message) -> Result<SaveOutcome> {
        self.save_message(
            &message.id,
            &message.channel,
            message.timestamp,
            &message.text,
        )
    }
}

impl<B: MessageBackend + ?Sized> MessageBackend for Arc<B> {
    fn save_message(
        &self,
        id: &MessageId,
        channel: &str,
        timestamp: DateTime<Utc>,
        text: &str,
    ) -> Result<SaveOutcome> {
        (**self).save_message(id, channel, timestamp, text)
    }

    fn query_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: Option<usize>,
    ) -> Result<Vec<DigestEntry>> {
        (**self).query_range(start, end, limit)
    }

    fn query_relevant(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        max_docs: usize,
        keywords: &KeywordSet,
    ) -> Result<Vec<DigestEntry>> {
        (**self).query_relevant(start, end, max_docs, keywords)
    }
}
