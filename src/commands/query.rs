//! Retrieval command handlers.

use chrono::Utc;
use teledigest::cli::{OutputFormat, WindowArgs, write_entries};
use teledigest::config::DigestConfig;
use teledigest::DigestService;

/// Range command.
pub fn cmd_range(
    config: &DigestConfig,
    window: &WindowArgs,
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let window = window.resolve(Utc::now())?;
    let service = DigestService::open(config)?;

    let entries = service.query_range(window, limit)?;
    tracing::debug!(%window, returned = entries.len(), "Range query finished");
    write_entries(&mut std::io::stdout().lock(), &entries, format)?;
    Ok(())
}

/// Relevant command.
pub fn cmd_relevant(
    config: &DigestConfig,
    window: &WindowArgs,
    max_docs: Option<usize>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let window = window.resolve(Utc::now())?;
    let mut service = DigestService::open(config)?;
    if let Some(max_docs) = max_docs {
        service = service.with_max_docs(max_docs);
    }

    let entries = service.query_relevant(window)?;
    tracing::debug!(%window, returned = entries.len(), "Relevance query finished");
    write_entries(&mut std::io::stdout().lock(), &entries, format)?;
    Ok(())
}
