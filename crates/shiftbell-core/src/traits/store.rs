// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shift store trait: a keyed mapping from calendar date to shift label.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::ShiftbellError;
use crate::traits::adapter::PluginAdapter;
use crate::types::ShiftEntry;

/// Persistent mapping from date to shift label.
///
/// Writes are upserts: the last write for a date wins. Absence of an entry
/// is reported as `Ok(None)`, never as an error.
#[async_trait]
pub trait ShiftStore: PluginAdapter {
    /// Inserts or overwrites the entry for `entry.date`.
    async fn put(&self, entry: &ShiftEntry) -> Result<(), ShiftbellError>;

    /// Inserts or overwrites several entries, returning how many were written.
    ///
    /// Backends document their own atomicity. Callers must not assume
    /// all-or-nothing unless the backend says so.
    async fn put_batch(&self, entries: &[ShiftEntry]) -> Result<usize, ShiftbellError>;

    /// Looks up the entry for `date`.
    async fn get(&self, date: NaiveDate) -> Result<Option<ShiftEntry>, ShiftbellError>;

    /// Lists up to `limit` entries ordered by date, starting at `from` if given.
    async fn list(
        &self,
        from: Option<NaiveDate>,
        limit: usize,
    ) -> Result<Vec<ShiftEntry>, ShiftbellError>;
}
