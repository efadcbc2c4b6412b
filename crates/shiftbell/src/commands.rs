// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ingest`, `upload`, `remind` and `show`.

use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde_json::json;
use tokio::io::AsyncReadExt;
use tracing::info;

use shiftbell_config::model::SourceKind;
use shiftbell_config::ShiftbellConfig;
use shiftbell_core::date::format_date;
use shiftbell_core::{DocumentRef, ReminderResult, ShiftStore, ShiftbellError};
use shiftbell_ingest::FsSource;
use shiftbell_notify::LogDispatcher;
use shiftbell_reminder::{ReminderOutcome, ReminderPlan};

use crate::app::App;

/// Build the object-created event a store would emit for `doc`.
pub fn upload_event(doc: &DocumentRef) -> serde_json::Value {
    let key = utf8_percent_encode(&doc.key, NON_ALPHANUMERIC).to_string();
    json!({
        "Records": [{
            "s3": {
                "bucket": { "name": doc.bucket },
                "object": { "key": key }
            }
        }]
    })
}

/// `shiftbell ingest --bucket B --key K`
pub async fn run_ingest(config: ShiftbellConfig, doc: DocumentRef) -> Result<(), ShiftbellError> {
    let app = App::open(config).await?;
    let written = app.ingestor()?.ingest(&doc).await?;
    println!("stored {written} shift(s) from {doc}");
    app.shutdown().await
}

/// `shiftbell ingest --event FILE` (`-` reads stdin). Prints the handler
/// response and returns whether it reported success.
pub async fn run_ingest_event(
    config: ShiftbellConfig,
    event: &Path,
) -> Result<bool, ShiftbellError> {
    let raw = if event == Path::new("-") {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .map_err(|e| ShiftbellError::Internal(format!("failed to read stdin: {e}")))?;
        buf
    } else {
        tokio::fs::read_to_string(event).await.map_err(|e| {
            ShiftbellError::Internal(format!("failed to read {}: {e}", event.display()))
        })?
    };
    let event: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|e| ShiftbellError::parse("$", format!("event is not JSON: {e}")))?;

    let app = App::open(config).await?;
    let response = app.ingestor()?.handle_upload_event(&event).await;
    println!("{}", response.to_json());
    app.shutdown().await?;
    Ok(response.is_success())
}

/// `shiftbell upload FILE`: copy a schedule into the filesystem source and,
/// unless `no_ingest`, fire the upload event for it.
pub async fn run_upload(
    config: ShiftbellConfig,
    file: &Path,
    bucket: String,
    key: Option<String>,
    no_ingest: bool,
) -> Result<bool, ShiftbellError> {
    if config.source.kind != SourceKind::Filesystem {
        return Err(ShiftbellError::Config(
            "upload writes to the filesystem source; set source.kind = \"filesystem\"".into(),
        ));
    }

    let key = match key {
        Some(key) => key,
        None => file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                ShiftbellError::Config(format!("cannot derive a key from {}", file.display()))
            })?,
    };
    let contents = tokio::fs::read(file).await.map_err(|e| ShiftbellError::Retrieval {
        message: format!("failed to read {}: {e}", file.display()),
        source: Some(Box::new(e)),
    })?;

    let doc = DocumentRef::new(bucket, key);
    let source = FsSource::new(&config.source.root);
    let path = source.put_object(&doc, &contents).await?;
    println!("uploaded {} to {doc}", file.display());
    info!(path = %path.display(), "schedule uploaded");

    if no_ingest {
        return Ok(true);
    }

    let app = App::open(config).await?;
    let response = app.ingestor()?.handle_upload_event(&upload_event(&doc)).await;
    println!("{}", response.to_json());
    app.shutdown().await?;
    Ok(response.is_success())
}

fn print_reminder(result: &ReminderResult) {
    println!("Subject: {}", result.subject);
    println!();
    println!("{}", result.body);
}

fn print_suppressed(missing: &[NaiveDate]) {
    let dates: Vec<String> = missing.iter().map(|d| format_date(*d)).collect();
    println!("no reminder: no shift scheduled for {}", dates.join(", "));
}

/// `shiftbell remind [--now T] [--dry-run]`
pub async fn run_remind(
    config: ShiftbellConfig,
    now: Option<DateTime<Utc>>,
    dry_run: bool,
) -> Result<(), ShiftbellError> {
    let app = App::open(config).await?;
    let now = now.unwrap_or_else(Utc::now);

    if dry_run {
        let reminder = app.reminder_with(Arc::new(LogDispatcher))?;
        match reminder.plan_at(now).await? {
            ReminderPlan::Send(result) => print_reminder(&result),
            ReminderPlan::Suppress { missing } => print_suppressed(&missing),
        }
    } else {
        match app.reminder()?.run_at(now).await? {
            ReminderOutcome::Sent { result, delivery } => {
                print_reminder(&result);
                println!();
                println!("sent (delivery {})", delivery.0);
            }
            ReminderOutcome::Suppressed { missing } => print_suppressed(&missing),
        }
    }

    app.shutdown().await
}

/// `shiftbell show [--from DATE] [--limit N] [--json]`
pub async fn run_show(
    config: ShiftbellConfig,
    from: Option<NaiveDate>,
    limit: usize,
    json_output: bool,
    plain: bool,
) -> Result<(), ShiftbellError> {
    let app = App::open(config).await?;
    let entries = app.store.list(from, limit).await?;

    if json_output {
        let value = serde_json::to_string_pretty(&entries)
            .map_err(|e| ShiftbellError::Internal(format!("failed to serialize shifts: {e}")))?;
        println!("{value}");
    } else if entries.is_empty() {
        println!("no shifts stored");
    } else {
        let use_color = !plain && std::io::stdout().is_terminal();
        for entry in &entries {
            let date = format_date(entry.date);
            if use_color {
                use colored::Colorize;
                println!("  {}  {}", date.bold(), entry.label);
            } else {
                println!("  {date}  {}", entry.label);
            }
        }
    }

    app.shutdown().await
}
