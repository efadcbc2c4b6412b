// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Shiftbell.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Top-level Shiftbell configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ShiftbellConfig {
    /// Process-wide settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Shift store settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Where uploaded schedule documents are read from.
    #[serde(default)]
    pub source: SourceConfig,

    /// Reminder window, time zone, and suppression policy.
    #[serde(default)]
    pub reminder: ReminderConfig,

    /// Notification transport selection and destination.
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// SMTP settings for the email transport.
    #[serde(default)]
    pub email: EmailConfig,

    /// HTTP push-topic settings for the topic transport.
    #[serde(default)]
    pub topic: TopicConfig,

    /// Cron schedule used by `shiftbell serve`.
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

/// Process-wide settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Shift store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("shiftbell").join("shifts.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("shifts.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Kind of document source.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SourceKind {
    /// A local directory whose subdirectories act as buckets.
    #[default]
    Filesystem,
    /// An HTTP object endpoint serving `{base_url}/{bucket}/{key}`.
    Http,
}

/// Document source configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,

    /// Root directory for the filesystem source.
    #[serde(default = "default_source_root")]
    pub root: String,

    /// Base URL for the HTTP source. Required when `kind = "http"`.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Request timeout for the HTTP source, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            root: default_source_root(),
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_source_root() -> String {
    dirs::data_dir()
        .map(|p| p.join("shiftbell").join("uploads"))
        .unwrap_or_else(|| std::path::PathBuf::from("uploads"))
        .to_string_lossy()
        .into_owned()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Which dates a reminder covers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReminderWindow {
    /// Only the day after "today".
    #[default]
    Tomorrow,
    /// Today, then tomorrow.
    TodayAndTomorrow,
}

/// What to do when a target date has no stored shift.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SuppressionMode {
    /// Send nothing if any target date is missing.
    #[default]
    Strict,
    /// Fill missing dates with the placeholder and always send.
    Lenient,
}

/// Reminder computation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReminderConfig {
    /// `UTC` or a fixed offset such as `+08:00`.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    #[serde(default)]
    pub window: ReminderWindow,

    #[serde(default)]
    pub suppression: SuppressionMode,

    /// Label used for missing dates under the lenient policy.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            window: ReminderWindow::default(),
            suppression: SuppressionMode::default(),
            placeholder: default_placeholder(),
        }
    }
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_placeholder() -> String {
    "No shift scheduled".to_string()
}

/// Notification transport.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TransportKind {
    /// SMTP email.
    Email,
    /// HTTP push topic.
    Topic,
    /// Write the notification to the log only.
    #[default]
    Log,
}

/// Dispatch configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DispatchConfig {
    #[serde(default)]
    pub transport: TransportKind,

    /// Recipient address (email) or topic name (topic).
    #[serde(default)]
    pub destination: Option<String>,
}

/// SMTP configuration for the email transport.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EmailConfig {
    #[serde(default)]
    pub smtp_host: Option<String>,

    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    /// `From` address for reminder mail.
    #[serde(default)]
    pub sender: Option<String>,

    /// Use STARTTLS instead of implicit TLS.
    #[serde(default = "default_starttls")]
    pub starttls: bool,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: None,
            smtp_port: default_smtp_port(),
            username: None,
            password: None,
            sender: None,
            starttls: default_starttls(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_smtp_port() -> u16 {
    587
}

fn default_starttls() -> bool {
    true
}

/// HTTP push-topic configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TopicConfig {
    /// Base URL of the topic server; the destination is appended as a path segment.
    #[serde(default)]
    pub url: Option<String>,

    /// Bearer token sent with each publish.
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TopicConfig {
    fn default() -> Self {
        Self {
            url: None,
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Cron schedule configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleConfig {
    /// Cron expression (5 or 6 fields) evaluated in `reminder.timezone`.
    #[serde(default = "default_cron")]
    pub cron: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            cron: default_cron(),
        }
    }
}

fn default_cron() -> String {
    "0 20 * * *".to_string()
}
