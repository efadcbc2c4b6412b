// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Shiftbell configuration system.

use shiftbell_config::diagnostic::ConfigError;
use shiftbell_config::model::{
    ReminderWindow, ShiftbellConfig, SourceKind, SuppressionMode, TransportKind,
};
use shiftbell_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known sections deserializes successfully.
#[test]
fn valid_toml_deserializes_into_shiftbell_config() {
    let toml = r#"
[general]
log_level = "debug"

[storage]
database_path = "/tmp/shifts.db"
wal_mode = false

[source]
kind = "http"
base_url = "http://objects.local:9000"
timeout_secs = 5

[reminder]
timezone = "+08:00"
window = "today_and_tomorrow"
suppression = "lenient"
placeholder = "Off"

[dispatch]
transport = "topic"
destination = "shift-reminders"

[topic]
url = "https://push.example.com"
token = "tk_123"

[schedule]
cron = "0 0 20 * * *"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.general.log_level, "debug");
    assert_eq!(config.storage.database_path, "/tmp/shifts.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.source.kind, SourceKind::Http);
    assert_eq!(config.source.base_url.as_deref(), Some("http://objects.local:9000"));
    assert_eq!(config.source.timeout_secs, 5);
    assert_eq!(config.reminder.timezone, "+08:00");
    assert_eq!(config.reminder.window, ReminderWindow::TodayAndTomorrow);
    assert_eq!(config.reminder.suppression, SuppressionMode::Lenient);
    assert_eq!(config.reminder.placeholder, "Off");
    assert_eq!(config.dispatch.transport, TransportKind::Topic);
    assert_eq!(config.dispatch.destination.as_deref(), Some("shift-reminders"));
    assert_eq!(config.topic.token.as_deref(), Some("tk_123"));
    assert_eq!(config.schedule.cron, "0 0 20 * * *");
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.general.log_level, "info");
    assert!(config.storage.database_path.ends_with("shifts.db"));
    assert!(config.storage.wal_mode);
    assert_eq!(config.source.kind, SourceKind::Filesystem);
    assert!(config.source.root.ends_with("uploads"));
    assert_eq!(config.reminder.timezone, "UTC");
    assert_eq!(config.reminder.window, ReminderWindow::Tomorrow);
    assert_eq!(config.reminder.suppression, SuppressionMode::Strict);
    assert_eq!(config.reminder.placeholder, "No shift scheduled");
    assert_eq!(config.dispatch.transport, TransportKind::Log);
    assert!(config.dispatch.destination.is_none());
    assert_eq!(config.email.smtp_port, 587);
    assert!(config.email.starttls);
    assert_eq!(config.schedule.cron, "0 20 * * *");
}

/// Dotted-key overrides (the shape env vars are mapped to) win over TOML.
#[test]
fn dotted_override_wins_over_toml() {
    use figment::{
        providers::{Format, Serialized, Toml},
        Figment,
    };

    let config: ShiftbellConfig = Figment::new()
        .merge(Serialized::defaults(ShiftbellConfig::default()))
        .merge(Toml::string("[reminder]\ntimezone = \"+01:00\"\n"))
        .merge(("reminder.timezone", "-05:00"))
        .extract()
        .expect("should merge override");

    assert_eq!(config.reminder.timezone, "-05:00");
}

/// Unknown field in [reminder] is rejected with a suggestion.
#[test]
fn unknown_key_produces_suggestion() {
    let toml = r#"
[reminder]
timzone = "UTC"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    let found = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "timzone"
                && suggestion.as_deref() == Some("timezone")
                && valid_keys.contains("suppression")
        })
    });
    assert!(found, "expected UnknownKey for `timzone`, got: {errors:?}");
}

/// A misspelled policy value is reported with the accepted variants.
#[test]
fn unknown_enum_value_lists_choices() {
    let toml = r#"
[reminder]
window = "tomorow"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown variant");
    let found = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownValue { value, suggestion, expected, .. } if {
            value == "tomorow"
                && suggestion.as_deref() == Some("tomorrow")
                && expected.contains("today_and_tomorrow")
        })
    });
    assert!(found, "expected UnknownValue for `tomorow`, got: {errors:?}");
}

/// Unexpected top-level section is rejected by deny_unknown_fields.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[sns]
topic_arn = "arn:aws:sns:..."
"#;

    let err = load_config_from_str(toml).expect_err("unknown top-level section should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("sns"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// Wrong value type is reported as InvalidType.
#[test]
fn invalid_type_is_reported() {
    let toml = r#"
[email]
smtp_port = "twenty-five"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject invalid type");
    assert!(
        errors
            .iter()
            .any(|e| matches!(
                e,
                ConfigError::InvalidType { key, .. } if key.contains("smtp_port")
            )),
        "got: {errors:?}"
    );
}

/// Semantic validation runs after a successful parse.
#[test]
fn validation_runs_after_parse() {
    let toml = r#"
[dispatch]
transport = "email"
"#;

    let errors = load_and_validate_str(toml).expect_err("incomplete email setup should fail");
    assert!(errors
        .iter()
        .all(|e| matches!(e, ConfigError::Validation { .. })));
    assert!(errors.len() >= 3);
}

/// ConfigError renders through miette's graphical handler.
#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let error = ConfigError::UnknownValue {
        key: "reminder.suppression".to_string(),
        value: "strikt".to_string(),
        suggestion: Some("strict".to_string()),
        expected: "strict, lenient".to_string(),
        span: None,
        src: None,
    };

    let help = error.help().expect("should have help text").to_string();
    assert!(help.contains("did you mean `strict`"), "got: {help}");

    let mut buf = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut buf, &error)
        .expect("should render without error");
    assert!(buf.contains("strikt"));
}
