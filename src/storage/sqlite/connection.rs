//! Connection scope for the `SQLite` message store.
//!
//! Every logical operation (one write, one query) opens its own handle,
//! configures it, runs, and drops it. Nothing holds a connection between
//! calls, so readers on other threads never wait on a shared mutex; WAL mode
//! and the busy timeout arbitrate at the file level instead.

use crate::{Error, Result};
use rusqlite::Connection;
use std::path::Path;

/// Busy timeout applied to every connection, in milliseconds.
pub const BUSY_TIMEOUT_MS: u32 = 5000;

/// Configures a `SQLite` connection for concurrent readers and one writer.
///
/// # Configuration Applied
///
/// - **WAL mode**: readers proceed while the writer appends
/// - **NORMAL synchronous**: balances durability with performance
/// - **`busy_timeout`**: waits up to 5 seconds on lock contention
///
/// Pragma failures are ignored; an unconfigured connection still works.
pub fn configure_connection(conn: &Connection) {
    // journal_mode returns a row ("wal"), so it cannot go through execute_batch
    let _ = conn.pragma_update(None, "journal_mode", "WAL");
    let _ = conn.pragma_update(None, "synchronous", "NORMAL");
    let _ = conn.pragma_update(None, "busy_timeout", BUSY_TIMEOUT_MS);
}

/// Opens and configures a connection to the database at `path`.
///
/// # Errors
///
/// Returns [`Error::Storage`] if the file cannot be opened.
pub fn open_connection(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path).map_err(|e| Error::storage("open_sqlite", e))?;
    configure_connection(&conn);
    Ok(conn)
}

/// Runs `f` with a fresh connection and releases it afterwards.
///
/// The handle is dropped when this function returns, whichever way `f`
/// exits.
///
/// # Errors
///
/// Returns [`Error::Storage`] if the database cannot be opened, or whatever
/// `f` returns.
pub fn with_connection<T, F>(path: &Path, f: F) -> Result<T>
where
    F: FnOnce(&Connection) -> Result<T>,
{
    let conn = open_connection(path)?;
    let result = f(&conn);
    drop(conn);
    result
}
