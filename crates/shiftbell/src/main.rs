// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shiftbell - shift schedule ingestion and reminder notifications.
//!
//! This is the binary entry point.

mod app;
mod commands;
mod doctor;
mod serve;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use shiftbell_config::ShiftbellConfig;
use shiftbell_core::date::parse_date;
use shiftbell_core::{DocumentRef, ShiftbellError};

/// Bucket used by `upload` and `ingest` when none is given.
const DEFAULT_BUCKET: &str = "shifts";

/// Shiftbell - shift schedule ingestion and reminder notifications.
#[derive(Parser, Debug)]
#[command(name = "shiftbell", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Ingest an uploaded schedule document into the shift store.
    Ingest {
        /// Bucket holding the document.
        #[arg(long, default_value = DEFAULT_BUCKET, conflicts_with = "event")]
        bucket: String,
        /// Object key of the document.
        #[arg(long, required_unless_present = "event")]
        key: Option<String>,
        /// Process an object-created event JSON file instead (`-` for stdin).
        #[arg(long)]
        event: Option<PathBuf>,
    },
    /// Upload a schedule file to the filesystem source and ingest it.
    Upload {
        /// Schedule JSON file.
        file: PathBuf,
        #[arg(long, default_value = DEFAULT_BUCKET)]
        bucket: String,
        /// Object key (defaults to the file name).
        #[arg(long)]
        key: Option<String>,
        /// Only upload; do not fire the upload event.
        #[arg(long)]
        no_ingest: bool,
    },
    /// Compute today's/tomorrow's reminder and send it.
    Remind {
        /// Evaluate as if it were this RFC 3339 instant.
        #[arg(long, value_parser = parse_instant)]
        now: Option<DateTime<Utc>>,
        /// Print the reminder without sending it.
        #[arg(long)]
        dry_run: bool,
    },
    /// Run reminders on the configured cron schedule until stopped.
    Serve,
    /// List stored shifts in date order.
    Show {
        /// First date to list (YYYY-MM-DD).
        #[arg(long, value_parser = parse_day)]
        from: Option<NaiveDate>,
        #[arg(long, default_value_t = 30)]
        limit: usize,
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Check configuration, store, source, transport and schedule.
    Doctor {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp like 2024-03-09T10:00:00Z: {e}"))
}

fn parse_day(raw: &str) -> Result<NaiveDate, String> {
    parse_date(raw).map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

fn load_config(path: Option<&PathBuf>) -> Option<ShiftbellConfig> {
    let loaded = match path {
        Some(path) => shiftbell_config::load_and_validate_path(path),
        None => shiftbell_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => Some(config),
        Err(errors) => {
            shiftbell_config::render_errors(&errors);
            None
        }
    }
}

async fn dispatch(command: Commands, config: ShiftbellConfig) -> Result<bool, ShiftbellError> {
    match command {
        Commands::Ingest {
            event: Some(event), ..
        } => commands::run_ingest_event(config, &event).await,
        Commands::Ingest { bucket, key, .. } => {
            let key = key.ok_or_else(|| ShiftbellError::Config("--key is required".into()))?;
            commands::run_ingest(config, DocumentRef::new(bucket, key)).await?;
            Ok(true)
        }
        Commands::Upload {
            file,
            bucket,
            key,
            no_ingest,
        } => commands::run_upload(config, &file, bucket, key, no_ingest).await,
        Commands::Remind { now, dry_run } => {
            commands::run_remind(config, now, dry_run).await?;
            Ok(true)
        }
        Commands::Serve => {
            serve::run_serve(config).await?;
            Ok(true)
        }
        Commands::Show {
            from,
            limit,
            json,
            plain,
        } => {
            commands::run_show(config, from, limit, json, plain).await?;
            Ok(true)
        }
        Commands::Doctor { plain } => doctor::run_doctor(&config, plain).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(config) = load_config(cli.config.as_ref()) else {
        return ExitCode::FAILURE;
    };
    serve::init_tracing(&config.general.log_level);

    match dispatch(cli.command, config).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, kind = e.kind(), "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
