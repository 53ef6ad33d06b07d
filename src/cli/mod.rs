//! CLI support shared by the `teledigest` binary.
//!
//! The binary's command handlers stay thin; window selection, output
//! rendering, and JSON-lines ingestion live here so they can be tested
//! without a process boundary.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `init` | Create the database and report full-text capability |
//! | `save` | Store one message |
//! | `ingest` | Store messages from JSON lines (file or stdin) |
//! | `range` | Print every message in a window |
//! | `relevant` | Print keyword-relevant messages in a window |
//! | `status` | Show database path, capability, and row counts |
//!
//! # Example Usage
//!
//! ```bash
//! teledigest save --id news:1 --channel news --timestamp 2024-05-01T10:00:00Z "NATO aid package"
//! teledigest relevant --day 2024-05-01 --format json
//! teledigest range --last-24h --limit 50
//! ```

mod ingest;
mod output;
mod window;

pub use ingest::{IngestSummary, ingest_lines, parse_line};
pub use output::{OutputFormat, write_entries};
pub use window::{WindowArgs, parse_day};
