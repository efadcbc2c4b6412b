// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks constraints serde cannot express: parseable time zone, non-empty
//! paths, a cron expression croner accepts, and the settings each selected
//! transport and source requires.

use croner::Cron;
use shiftbell_core::date::parse_offset;

use crate::diagnostic::ConfigError;
use crate::model::{ShiftbellConfig, SourceKind, SuppressionMode, TransportKind};

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &ShiftbellConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    if config.storage.database_path.trim().is_empty() {
        fail("storage.database_path must not be empty".to_string());
    }

    match config.source.kind {
        SourceKind::Filesystem => {
            if config.source.root.trim().is_empty() {
                fail("source.root must not be empty when source.kind = \"filesystem\"".to_string());
            }
        }
        SourceKind::Http => match config.source.base_url.as_deref().map(str::trim) {
            None | Some("") => {
                fail("source.base_url is required when source.kind = \"http\"".to_string())
            }
            Some(url) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                fail(format!("source.base_url `{url}` must start with http:// or https://"))
            }
            Some(_) => {}
        },
    }

    if parse_offset(&config.reminder.timezone).is_none() {
        fail(format!(
            "reminder.timezone `{}` is not `UTC` or a fixed offset like `+08:00`",
            config.reminder.timezone
        ));
    }

    if config.reminder.suppression == SuppressionMode::Lenient
        && config.reminder.placeholder.trim().is_empty()
    {
        fail("reminder.placeholder must not be empty under lenient suppression".to_string());
    }

    let destination_missing = config
        .dispatch
        .destination
        .as_deref()
        .is_none_or(|d| d.trim().is_empty());

    match config.dispatch.transport {
        TransportKind::Email => {
            if destination_missing {
                fail("dispatch.destination (recipient address) is required for email".to_string());
            }
            if config.email.smtp_host.as_deref().is_none_or(|h| h.trim().is_empty()) {
                fail("email.smtp_host is required when dispatch.transport = \"email\"".to_string());
            }
            if config.email.sender.as_deref().is_none_or(|s| !s.contains('@')) {
                fail("email.sender must be set to an email address".to_string());
            }
            if config.email.username.is_some() != config.email.password.is_some() {
                fail("email.username and email.password must be set together".to_string());
            }
        }
        TransportKind::Topic => {
            if destination_missing {
                fail("dispatch.destination (topic name) is required for topic".to_string());
            }
            match config.topic.url.as_deref() {
                Some(url) if url.starts_with("http://") || url.starts_with("https://") => {}
                Some(url) => fail(format!("topic.url `{url}` must start with http:// or https://")),
                None => {
                    fail("topic.url is required when dispatch.transport = \"topic\"".to_string())
                }
            }
        }
        TransportKind::Log => {}
    }

    if let Err(e) = config.schedule.cron.parse::<Cron>() {
        fail(format!("schedule.cron `{}` is invalid: {e}", config.schedule.cron));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
