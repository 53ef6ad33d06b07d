//! Observability: structured logging through `tracing`.
//!
//! Storage operations also emit `metrics` counters and histograms; installing
//! a recorder for them is left to the host process.

mod logging;

pub use logging::{ENV_LOG_FILTER, LogFormat, LoggingConfig};

use crate::{Error, Result};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static OBSERVABILITY_INIT: OnceLock<()> = OnceLock::new();

/// Installs the global `tracing` subscriber.
///
/// Logs go to stderr unless a file is configured, so command output on
/// stdout stays clean. ANSI colors are only used on stderr.
///
/// # Errors
///
/// Returns an error if logging was already initialized, the filter directive
/// is invalid, or the log file cannot be opened.
pub fn init(config: &LoggingConfig) -> Result<()> {
    if OBSERVABILITY_INIT.get().is_some() {
        return Err(failed("observability_init", "observability already initialized"));
    }

    let filter = EnvFilter::try_new(&config.filter)
        .map_err(|e| failed("parse_log_filter", format!("{}: {e}", config.filter)))?;

    let (writer, ansi) = match &config.file {
        Some(path) => (BoxMakeWriter::new(Mutex::new(open_log_file(path)?)), false),
        None => (BoxMakeWriter::new(io::stderr), true),
    };

    let installed = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_target(true),
            )
            .with(filter)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(writer)
                    .with_ansi(ansi)
                    .with_target(true),
            )
            .with(filter)
            .try_init(),
    };
    installed.map_err(|e| failed("observability_init", e.to_string()))?;

    OBSERVABILITY_INIT
        .set(())
        .map_err(|()| failed("observability_init", "failed to mark observability initialized"))
}

/// Opens `path` for appending, creating parent directories.
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| failed("create_log_dir", e.to_string()))?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| failed("open_log_file", format!("{}: {e}", path.display())))
}

fn failed(operation: &str, cause: impl Into<String>) -> Error {
    Error::OperationFailed {
        operation: operation.to_string(),
        cause: cause.into(),
    }
}
