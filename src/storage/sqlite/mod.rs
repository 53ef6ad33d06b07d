//! `SQLite` message store.
//!
//! ## Module Structure
//!
//! - [`connection`]: per-operation connections and pragma setup
//! - [`schema`]: table creation and the full-text capability flag
//! - [`fts`]: FTS5 match expressions built from keyword sets
//! - [`store`]: [`SqliteMessageStore`], the write and query paths
//! - `metrics`: operation and fallback counters
//!
//! Every operation opens its own connection. WAL mode lets readers proceed
//! while a writer holds the database.

pub mod connection;
pub mod fts;
mod metrics;
pub mod schema;
mod store;

pub use connection::{BUSY_TIMEOUT_MS, configure_connection, open_connection, with_connection};
pub use fts::build_match_expression;
pub use schema::{FullTextCapability, MESSAGES_FTS_TABLE, MESSAGES_TABLE, ensure_schema};
pub use store::{MessageCounts, SqliteMessageStore, StoreOptions};
