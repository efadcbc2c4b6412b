// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for Shiftbell.

use thiserror::Error;

/// The primary error type used across all Shiftbell adapter traits and handlers.
#[derive(Debug, Error)]
pub enum ShiftbellError {
    /// Configuration errors (invalid TOML, missing required fields, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// A schedule document (or its source) could not be reached or does not exist.
    #[error("retrieval error: {message}")]
    Retrieval {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A schedule document is structurally malformed.
    ///
    /// `path` names the offending field, e.g. `shifts[2].date`.
    #[error("parse error at `{path}`: {message}")]
    Parse { path: String, message: String },

    /// Shift store backend errors (connection, query failure, migration).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Notification transport failure.
    #[error("dispatch error: {message}")]
    Dispatch {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ShiftbellError {
    /// Short, stable name of the error category, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Retrieval { .. } => "retrieval",
            Self::Parse { .. } => "parse",
            Self::Storage { .. } => "storage",
            Self::Dispatch { .. } => "dispatch",
            Self::Internal(_) => "internal",
        }
    }

    /// Build a [`ShiftbellError::Parse`] for the given field path.
    pub fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}
