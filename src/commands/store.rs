//! Database command handlers.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use teledigest::cli::{OutputFormat, ingest_lines};
use teledigest::config::DigestConfig;
use teledigest::models::parse_timestamp;
use teledigest::{MessageBackend, MessageId, SqliteMessageStore};

/// Init command.
pub fn cmd_init(config: &DigestConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteMessageStore::open(&config.db_path, config.store_options())?;

    println!("Database: {}", store.db_path().display());
    println!("Full-text: {}", store.capability());
    Ok(())
}

/// Save command.
pub fn cmd_save(
    config: &DigestConfig,
    id: String,
    channel: String,
    timestamp: String,
    text: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let timestamp = parse_timestamp(&timestamp)?;
    let store = SqliteMessageStore::open(&config.db_path, config.store_options())?;

    let outcome = store.save_message(&MessageId::new(id), &channel, timestamp, &text)?;
    println!("{outcome}");
    Ok(())
}

/// Ingest command.
pub fn cmd_ingest(
    config: &DigestConfig,
    file: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteMessageStore::open(&config.db_path, config.store_options())?;

    let summary = match file {
        Some(path) => {
            let file = File::open(&path)
                .map_err(|e| format!("cannot open {}: {e}", path.display()))?;
            ingest_lines(&store, BufReader::new(file))?
        },
        None => ingest_lines(&store, io::stdin().lock())?,
    };

    println!(
        "Ingested {} messages: {} inserted, {} duplicate, {} skipped",
        summary.total(),
        summary.inserted,
        summary.duplicates,
        summary.skipped
    );
    Ok(())
}

/// Status command.
pub fn cmd_status(
    config: &DigestConfig,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteMessageStore::open(&config.db_path, config.store_options())?;
    let counts = store.counts()?;
    let keywords = config.keywords();

    match format {
        OutputFormat::Json => {
            let status = serde_json::json!({
                "version": env!("CARGO_PKG_VERSION"),
                "db_path": store.db_path().display().to_string(),
                "full_text": store.capability().as_str(),
                "messages": counts.messages,
                "mirrored": counts.mirrored,
                "keywords": keywords.iter().map(ToString::to_string).collect::<Vec<_>>(),
                "max_docs": config.max_docs,
            });
            println!("{}", serde_json::to_string_pretty(&status)?);
        },
        OutputFormat::Text => {
            println!("Teledigest Status");
            println!("=================");
            println!();
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!("Database: {}", store.db_path().display());
            println!("Full-text: {}", store.capability());
            println!("Messages: {}", counts.messages);
            match counts.mirrored {
                Some(mirrored) => println!("Mirrored: {mirrored}"),
                None => println!("Mirrored: n/a"),
            }
            println!("Keywords: {}", keywords.len());
            println!("Max docs: {}", config.max_docs);
        },
    }
    Ok(())
}
