//! Binary entry point for teledigest.
//!
//! This binary provides the CLI interface for the teledigest message store.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use teledigest::cli::{OutputFormat, WindowArgs};
use teledigest::config::DigestConfig;
use teledigest::observability::{self, LoggingConfig};

/// Teledigest - message store behind channel digests.
#[derive(Parser)]
#[command(name = "teledigest")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Create the database and report full-text capability.
    Init,

    /// Store one message.
    Save {
        /// Source-assigned message id.
        #[arg(long)]
        id: String,

        /// Channel the message was posted in.
        #[arg(long)]
        channel: String,

        /// Post time, RFC 3339.
        #[arg(long)]
        timestamp: String,

        /// Message text.
        text: String,
    },

    /// Store messages from JSON lines.
    Ingest {
        /// Input file (default: stdin).
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Print every message in a window, oldest first.
    Range {
        #[command(flatten)]
        window: WindowArgs,

        /// Maximum number of messages.
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print keyword-relevant messages in a window, oldest first.
    Relevant {
        #[command(flatten)]
        window: WindowArgs,

        /// Maximum number of messages (default: from config).
        #[arg(short, long)]
        max_docs: Option<usize>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show database path, capability, and row counts.
    Status {
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

/// Main entry point.
fn main() -> ExitCode {
    // A missing .env is the normal case
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match DigestConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    let logging = LoggingConfig::from_settings(Some(&config.logging), cli.verbose);
    if let Err(e) = observability::init(&logging) {
        eprintln!("Failed to initialize observability: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(cli: Cli, config: &DigestConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Init => commands::cmd_init(config),

        Commands::Save {
            id,
            channel,
            timestamp,
            text,
        } => commands::cmd_save(config, id, channel, timestamp, text),

        Commands::Ingest { file } => commands::cmd_ingest(config, file),

        Commands::Range {
            window,
            limit,
            format,
        } => commands::cmd_range(config, &window, limit, format),

        Commands::Relevant {
            window,
            max_docs,
            format,
        } => commands::cmd_relevant(config, &window, max_docs, format),

        Commands::Status { format } => commands::cmd_status(config, format),
    }
}
