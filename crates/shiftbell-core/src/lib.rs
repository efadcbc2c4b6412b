// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Shiftbell.
//!
//! This crate provides the error taxonomy, domain types, date helpers, and
//! the adapter traits through which ingestion and reminders reach their
//! collaborators (shift store, document source, notification dispatcher,
//! clock). Backends live in their own crates and implement traits defined here.

pub mod date;
pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ShiftbellError;
pub use types::{
    AdapterType, DeliveryId, DocumentRef, HandlerResponse, HealthStatus, Notification,
    ReminderResult, ResolvedShift, ScheduleDocument, ShiftEntry,
};

pub use traits::{
    Clock, DocumentSource, NotificationDispatcher, PluginAdapter, ShiftStore, SystemClock,
};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn shiftbell_error_has_all_variants() {
        let errors = [
            ShiftbellError::Config("test".into()),
            ShiftbellError::Retrieval {
                message: "test".into(),
                source: None,
            },
            ShiftbellError::parse("shifts[0].date", "missing"),
            ShiftbellError::Storage {
                source: Box::new(std::io::Error::other("test")),
            },
            ShiftbellError::Dispatch {
                message: "test".into(),
                source: None,
            },
            ShiftbellError::Internal("test".into()),
        ];
        let kinds: Vec<&str> = errors.iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            ["config", "retrieval", "parse", "storage", "dispatch", "internal"]
        );
    }

    #[test]
    fn parse_error_names_the_field() {
        let err = ShiftbellError::parse("shifts[2].shift", "expected a string");
        assert_eq!(
            err.to_string(),
            "parse error at `shifts[2].shift`: expected a string"
        );
    }

    #[test]
    fn shift_entry_serializes_with_shift_field() {
        let entry = ShiftEntry::new(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(), "Morning");
        let json = serde_json::to_value(&entry).expect("should serialize");
        assert_eq!(
            json,
            serde_json::json!({ "date": "2024-03-10", "shift": "Morning" })
        );
    }

    #[test]
    fn adapter_type_display_round_trip() {
        use std::str::FromStr;

        for variant in [AdapterType::Store, AdapterType::Source, AdapterType::Dispatcher] {
            let parsed = AdapterType::from_str(&variant.to_string()).expect("should parse back");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn handler_response_json_shape() {
        let ok = HandlerResponse::ok("Shifts stored successfully!");
        assert!(ok.is_success());
        assert_eq!(
            ok.to_json(),
            serde_json::json!({
                "statusCode": 200,
                "body": "{\"message\":\"Shifts stored successfully!\"}",
            })
        );

        let failed = HandlerResponse::error("Error processing file!");
        assert!(!failed.is_success());
        assert_eq!(failed.to_json()["statusCode"], 500);
    }

    #[test]
    fn document_ref_display() {
        let doc = DocumentRef::new("schedules", "2024/march.json");
        assert_eq!(doc.to_string(), "schedules/2024/march.json");
    }

    #[test]
    fn system_clock_is_a_clock() {
        fn _assert_clock<T: Clock>() {}
        _assert_clock::<SystemClock>();
    }
}
