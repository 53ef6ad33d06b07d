//! Storage layer.
//!
//! [`MessageBackend`] is the seam between retrieval logic and the database.
//! The only implementation is [`SqliteMessageStore`]: a primary `messages`
//! table that is the system of record, plus an FTS5 mirror used for keyword
//! relevance.

// Dropping connections at the end of each closure is the intended scope.
#![allow(clippy::significant_drop_tightening)]

pub mod sqlite;
mod traits;

pub use sqlite::{FullTextCapability, MessageCounts, SqliteMessageStore, StoreOptions};
pub use traits::MessageBackend;
