// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles a temp-dir SQLite shift store, a mock document
//! source, a capturing dispatcher and a fixed clock, plus a config pointing
//! at the temp database. Ingestion and reminder tests build their pipelines
//! from these handles.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use shiftbell_config::model::{ShiftbellConfig, StorageConfig};
use shiftbell_core::{
    Clock, DocumentSource, NotificationDispatcher, ShiftEntry, ShiftStore, ShiftbellError,
};
use shiftbell_storage::SqliteShiftStore;

use crate::clock::FixedClock;
use crate::mock_dispatcher::MockDispatcher;
use crate::mock_source::MockSource;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    shifts: Vec<ShiftEntry>,
    now: DateTime<Utc>,
    failing_dispatch: bool,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            shifts: Vec::new(),
            now: Utc.with_ymd_and_hms(2024, 3, 9, 10, 0, 0).single().unwrap_or_default(),
            failing_dispatch: false,
        }
    }

    /// Seed the store with these entries.
    pub fn with_shifts(mut self, shifts: impl IntoIterator<Item = ShiftEntry>) -> Self {
        self.shifts.extend(shifts);
        self
    }

    /// Seed one `YYYY-MM-DD` / label pair.
    ///
    /// # Panics
    /// If `date` is not a valid ISO date.
    pub fn with_shift(mut self, date: &str, label: &str) -> Self {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("ISO date");
        self.shifts.push(ShiftEntry::new(date, label));
        self
    }

    /// Pin the clock (defaults to 2024-03-09T10:00:00Z).
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn with_failing_dispatch(mut self) -> Self {
        self.failing_dispatch = true;
        self
    }

    /// Build the test harness, creating the temp database.
    pub async fn build(self) -> Result<TestHarness, ShiftbellError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| ShiftbellError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("shifts.db");

        let storage = StorageConfig {
            database_path: db_path.to_string_lossy().to_string(),
            wal_mode: true,
        };
        let store = SqliteShiftStore::open(storage.clone()).await?;
        if !self.shifts.is_empty() {
            store.put_batch(&self.shifts).await?;
        }

        let dispatcher = if self.failing_dispatch {
            MockDispatcher::failing()
        } else {
            MockDispatcher::new()
        };

        let config = ShiftbellConfig {
            storage,
            ..ShiftbellConfig::default()
        };

        Ok(TestHarness {
            store: Arc::new(store),
            source: Arc::new(MockSource::new()),
            dispatcher: Arc::new(dispatcher),
            clock: Arc::new(FixedClock::new(self.now)),
            config,
            _temp_dir: temp_dir,
        })
    }
}

/// A fully-wired test environment.
///
/// The temp directory lives as long as the harness.
pub struct TestHarness {
    pub store: Arc<SqliteShiftStore>,
    pub source: Arc<MockSource>,
    pub dispatcher: Arc<MockDispatcher>,
    pub clock: Arc<FixedClock>,
    pub config: ShiftbellConfig,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    pub fn shift_store(&self) -> Arc<dyn ShiftStore> {
        self.store.clone()
    }

    pub fn document_source(&self) -> Arc<dyn DocumentSource> {
        self.source.clone()
    }

    pub fn notification_dispatcher(&self) -> Arc<dyn NotificationDispatcher> {
        self.dispatcher.clone()
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }
}
