// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `shiftbell doctor` command implementation.
//!
//! Runs diagnostic checks against the configured store, document source,
//! dispatcher and schedule to surface problems before the first reminder run.

use std::io::IsTerminal;
use std::time::{Duration, Instant};

use chrono::Utc;
use shiftbell_config::ShiftbellConfig;
use shiftbell_core::date::format_date;
use shiftbell_core::{HealthStatus, PluginAdapter, ShiftStore, ShiftbellError};
use shiftbell_ingest::build_source;
use shiftbell_notify::build_dispatcher;
use shiftbell_reminder::{target_dates, ReminderSettings};
use shiftbell_storage::SqliteShiftStore;

use crate::serve::{next_fire, parse_cron};

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>, start: Instant) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
            duration: start.elapsed(),
        }
    }

    fn from_health(
        name: &str,
        health: Result<HealthStatus, ShiftbellError>,
        start: Instant,
    ) -> Self {
        match health {
            Ok(HealthStatus::Healthy) => Self::new(name, CheckStatus::Pass, "healthy", start),
            Ok(HealthStatus::Degraded(msg)) => Self::new(name, CheckStatus::Warn, msg, start),
            Ok(HealthStatus::Unhealthy(msg)) => Self::new(name, CheckStatus::Fail, msg, start),
            Err(e) => Self::new(name, CheckStatus::Fail, e.to_string(), start),
        }
    }
}

/// Run every check; returns `false` if any check failed.
pub async fn run_doctor(config: &ShiftbellConfig, plain: bool) -> Result<bool, ShiftbellError> {
    let use_color = !plain && std::io::stdout().is_terminal();

    let mut results = Vec::new();
    let store = open_store(config, &mut results).await;
    results.push(check_source(config).await);
    results.push(check_dispatcher(config).await);
    results.push(check_schedule(config));
    if let Some(store) = &store {
        results.push(check_upcoming(config, store).await);
        store.shutdown().await?;
    }

    println!();
    println!("  shiftbell doctor");
    println!("  {}", "-".repeat(50));

    let mut fail_count = 0;
    let mut warn_count = 0;

    for result in &results {
        let duration_ms = result.duration.as_millis();
        let line = match result.status {
            CheckStatus::Pass => {
                if use_color {
                    use colored::Colorize;
                    format!(
                        "    {} {:<18} {} ({duration_ms}ms)",
                        "✓".green(),
                        result.name,
                        result.message
                    )
                } else {
                    format!("    [OK]   {:<18} {} ({duration_ms}ms)", result.name, result.message)
                }
            }
            CheckStatus::Warn => {
                warn_count += 1;
                if use_color {
                    use colored::Colorize;
                    format!(
                        "    {} {:<18} {} ({duration_ms}ms)",
                        "!".yellow(),
                        result.name,
                        result.message.yellow()
                    )
                } else {
                    format!("    [WARN] {:<18} {} ({duration_ms}ms)", result.name, result.message)
                }
            }
            CheckStatus::Fail => {
                fail_count += 1;
                if use_color {
                    use colored::Colorize;
                    format!(
                        "    {} {:<18} {} ({duration_ms}ms)",
                        "✗".red(),
                        result.name,
                        result.message.red()
                    )
                } else {
                    format!("    [FAIL] {:<18} {} ({duration_ms}ms)", result.name, result.message)
                }
            }
        };
        println!("{line}");
    }

    println!();
    if fail_count > 0 || warn_count > 0 {
        let issues = fail_count + warn_count;
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }
    println!();

    Ok(fail_count == 0)
}

async fn open_store(
    config: &ShiftbellConfig,
    results: &mut Vec<CheckResult>,
) -> Option<SqliteShiftStore> {
    let start = Instant::now();
    match SqliteShiftStore::open(config.storage.clone()).await {
        Ok(store) => {
            let health = store.health_check().await;
            results.push(CheckResult::from_health("Shift store", health, start));
            Some(store)
        }
        Err(e) => {
            results.push(CheckResult::new(
                "Shift store",
                CheckStatus::Fail,
                format!("open failed: {e}"),
                start,
            ));
            None
        }
    }
}

async fn check_source(config: &ShiftbellConfig) -> CheckResult {
    let start = Instant::now();
    match build_source(&config.source) {
        Ok(source) => {
            CheckResult::from_health("Document source", source.health_check().await, start)
        }
        Err(e) => CheckResult::new("Document source", CheckStatus::Fail, e.to_string(), start),
    }
}

async fn check_dispatcher(config: &ShiftbellConfig) -> CheckResult {
    let start = Instant::now();
    match build_dispatcher(config) {
        Ok(dispatcher) => {
            let mut result =
                CheckResult::from_health("Dispatcher", dispatcher.health_check().await, start);
            if result.status == CheckStatus::Pass {
                result.message = format!("{} transport healthy", dispatcher.name());
            }
            result
        }
        Err(e) => CheckResult::new("Dispatcher", CheckStatus::Fail, e.to_string(), start),
    }
}

fn check_schedule(config: &ShiftbellConfig) -> CheckResult {
    let start = Instant::now();
    let settings = match ReminderSettings::from_config(config) {
        Ok(settings) => settings,
        Err(e) => return CheckResult::new("Schedule", CheckStatus::Fail, e.to_string(), start),
    };
    match parse_cron(&config.schedule.cron)
        .and_then(|cron| next_fire(&cron, Utc::now(), settings.timezone))
    {
        Ok(next) => CheckResult::new(
            "Schedule",
            CheckStatus::Pass,
            format!("next run {}", next.with_timezone(&settings.timezone).to_rfc3339()),
            start,
        ),
        Err(e) => CheckResult::new("Schedule", CheckStatus::Fail, e.to_string(), start),
    }
}

/// Warn when the next run would find nothing to send.
async fn check_upcoming(config: &ShiftbellConfig, store: &SqliteShiftStore) -> CheckResult {
    let start = Instant::now();
    let settings = match ReminderSettings::from_config(config) {
        Ok(settings) => settings,
        Err(e) => {
            return CheckResult::new("Upcoming shifts", CheckStatus::Fail, e.to_string(), start);
        }
    };

    let mut missing = Vec::new();
    for date in target_dates(Utc::now(), settings.timezone, settings.window) {
        match store.get(date).await {
            Ok(Some(_)) => {}
            Ok(None) => missing.push(format_date(date)),
            Err(e) => {
                return CheckResult::new("Upcoming shifts", CheckStatus::Fail, e.to_string(), start)
            }
        }
    }

    if missing.is_empty() {
        CheckResult::new("Upcoming shifts", CheckStatus::Pass, "scheduled", start)
    } else {
        CheckResult::new(
            "Upcoming shifts",
            CheckStatus::Warn,
            format!("nothing stored for {}", missing.join(", ")),
            start,
        )
    }
}
