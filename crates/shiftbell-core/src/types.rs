// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across adapter traits and handlers.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A single scheduled shift, keyed by calendar date.
///
/// Serializes as `{"date": "YYYY-MM-DD", "shift": "<label>"}`, mirroring the
/// upload document's field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftEntry {
    pub date: NaiveDate,
    #[serde(rename = "shift")]
    pub label: String,
}

impl ShiftEntry {
    pub fn new(date: NaiveDate, label: impl Into<String>) -> Self {
        Self {
            date,
            label: label.into(),
        }
    }
}

/// A parsed upload document: the ordered list of shifts it describes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDocument {
    pub shifts: Vec<ShiftEntry>,
}

/// Location of one uploaded document inside a document source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentRef {
    /// Bucket (container) name.
    pub bucket: String,
    /// Object key inside the bucket.
    pub key: String,
}

impl DocumentRef {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

/// One resolved line of a reminder: the date and the label shown for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedShift {
    pub date: NaiveDate,
    pub label: String,
    /// `true` when no entry existed and `label` is the placeholder.
    pub placeholder: bool,
}

/// The formatted reminder produced by reminder computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderResult {
    pub subject: String,
    pub body: String,
    pub shifts: Vec<ResolvedShift>,
}

/// A message handed to a notification dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Email address, topic name, or other transport-specific destination.
    pub destination: String,
    pub subject: String,
    pub body: String,
}

/// Identifier returned by a dispatcher for an accepted notification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeliveryId(pub String);

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the role an adapter plays.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Store,
    Source,
    Dispatcher,
}

/// Status reported by a handler to whatever triggered it.
///
/// Serializes in the `{"statusCode": 200, "body": "{\"message\": ...}"}`
/// shape expected by function-style trigger runtimes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerResponse {
    pub status_code: u16,
    pub message: String,
}

impl HandlerResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status_code: 500,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn to_json(&self) -> serde_json::Value {
        let body = serde_json::json!({ "message": self.message }).to_string();
        serde_json::json!({
            "statusCode": self.status_code,
            "body": body,
        })
    }
}
