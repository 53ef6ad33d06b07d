//! Rendering of digest entries.

use crate::models::DigestEntry;
use crate::{Error, Result};
use clap::ValueEnum;
use std::io::Write;

/// Output format for query commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// `[channel] text`, one entry per block.
    #[default]
    Text,
    /// A JSON array of `{channel, text}` objects.
    Json,
}

/// Writes `entries` to `out` in `format`.
///
/// # Errors
///
/// Returns [`Error::OperationFailed`] if writing fails.
pub fn write_entries<W: Write>(out: &mut W, entries: &[DigestEntry], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, entries).map_err(write_error)?;
            writeln!(out).map_err(write_error)
        },
        OutputFormat::Text => {
            for entry in entries {
                // Continuation lines are indented under the channel tag
                let text = entry.text.replace('\n', "\n    ");
                writeln!(out, "[{}] {text}", entry.channel).map_err(write_error)?;
            }
            Ok(())
        },
    }
}

fn write_error(e: impl std::fmt::Display) -> Error {
    Error::OperationFailed {
        operation: "write_output".to_string(),
        cause: e.to_string(),
    }
}
