//! Command handlers module.
//!
//! - `store.rs`: database commands (init, save, ingest, status)
//! - `query.rs`: retrieval commands (range, relevant)

mod query;
mod store;

pub use query::{cmd_range, cmd_relevant};
pub use store::{cmd_ingest, cmd_init, cmd_save, cmd_status};
