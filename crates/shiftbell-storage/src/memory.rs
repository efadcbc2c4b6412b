// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory reference implementation of [`ShiftStore`].
//!
//! Used by tests and dry runs. `put_batch` applies entries in order and
//! cannot fail, so every entry before any hypothetical failure is kept.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use shiftbell_core::{
    AdapterType, HealthStatus, PluginAdapter, ShiftEntry, ShiftStore, ShiftbellError,
};

/// A `BTreeMap`-backed shift store.
#[derive(Debug, Default)]
pub struct MemoryShiftStore {
    shifts: RwLock<BTreeMap<NaiveDate, String>>,
}

impl MemoryShiftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `entries` (last duplicate wins).
    pub fn with_entries(entries: impl IntoIterator<Item = ShiftEntry>) -> Self {
        let shifts = entries.into_iter().map(|e| (e.date, e.label)).collect();
        Self {
            shifts: RwLock::new(shifts),
        }
    }

    /// Copy of the full contents, ordered by date.
    pub async fn snapshot(&self) -> Vec<ShiftEntry> {
        self.shifts
            .read()
            .await
            .iter()
            .map(|(date, label)| ShiftEntry::new(*date, label.clone()))
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.shifts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.shifts.read().await.is_empty()
    }
}

#[async_trait]
impl PluginAdapter for MemoryShiftStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Store
    }

    async fn health_check(&self) -> Result<HealthStatus, ShiftbellError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), ShiftbellError> {
        Ok(())
    }
}

#[async_trait]
impl ShiftStore for MemoryShiftStore {
    async fn put(&self, entry: &ShiftEntry) -> Result<(), ShiftbellError> {
        self.shifts
            .write()
            .await
            .insert(entry.date, entry.label.clone());
        Ok(())
    }

    async fn put_batch(&self, entries: &[ShiftEntry]) -> Result<usize, ShiftbellError> {
        let mut shifts = self.shifts.write().await;
        for entry in entries {
            shifts.insert(entry.date, entry.label.clone());
        }
        Ok(entries.len())
    }

    async fn get(&self, date: NaiveDate) -> Result<Option<ShiftEntry>, ShiftbellError> {
        Ok(self
            .shifts
            .read()
            .await
            .get(&date)
            .map(|label| ShiftEntry::new(date, label.clone())))
    }

    async fn list(
        &self,
        from: Option<NaiveDate>,
        limit: usize,
    ) -> Result<Vec<ShiftEntry>, ShiftbellError> {
        let shifts = self.shifts.read().await;
        let start = from.unwrap_or(NaiveDate::MIN);
        Ok(shifts
            .range(start..)
            .take(limit)
            .map(|(date, label)| ShiftEntry::new(*date, label.clone()))
            .collect())
    }
}
