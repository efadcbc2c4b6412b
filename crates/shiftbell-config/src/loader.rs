// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./shiftbell.toml` > `~/.config/shiftbell/shiftbell.toml` >
//! `/etc/shiftbell/shiftbell.toml` with environment variable overrides via `SHIFTBELL_` prefix.

// figment::Error is external and cannot be boxed without a wrapper.
#![allow(clippy::result_large_err)]

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::ShiftbellConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/shiftbell/shiftbell.toml";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "shiftbell.toml";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/shiftbell/shiftbell.toml` (system-wide)
/// 3. `~/.config/shiftbell/shiftbell.toml` (user XDG config)
/// 4. `./shiftbell.toml` (local directory)
/// 5. `SHIFTBELL_*` environment variables
pub fn load_config() -> Result<ShiftbellConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<ShiftbellConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ShiftbellConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ShiftbellConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ShiftbellConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ShiftbellConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// `~/.config/shiftbell/shiftbell.toml`, if the platform has a config dir.
pub fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("shiftbell").join(LOCAL_CONFIG_FILE))
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so that keys containing
/// underscores survive: `SHIFTBELL_STORAGE_DATABASE_PATH` must map to
/// `storage.database_path`, not `storage.database.path`.
fn env_provider() -> Env {
    Env::prefixed("SHIFTBELL_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a lowercased, prefix-stripped env var name onto a dotted config key.
fn map_env_key(key: &str) -> String {
    const SECTIONS: [&str; 8] = [
        "general", "storage", "source", "reminder", "dispatch", "email", "topic", "schedule",
    ];
    for section in SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}
