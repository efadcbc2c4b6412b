// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the [`ShiftStore`] trait.

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::OnceCell;
use tracing::debug;

use shiftbell_config::model::StorageConfig;
use shiftbell_core::{
    AdapterType, HealthStatus, PluginAdapter, ShiftEntry, ShiftStore, ShiftbellError,
};

use crate::database::{map_tr_err, Database};
use crate::queries;

/// SQLite-backed shift store.
///
/// Wraps a [`Database`] handle and delegates to [`queries::shifts`]. The
/// database is opened on the first call to [`SqliteShiftStore::initialize`].
///
/// `put_batch` runs in one transaction: a failure writes nothing.
pub struct SqliteShiftStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteShiftStore {
    /// Create a new store with the given configuration.
    ///
    /// The database connection is not opened until [`initialize`](Self::initialize) is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Open the database file and apply migrations.
    pub async fn initialize(&self) -> Result<(), ShiftbellError> {
        let db = Database::open_with(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| ShiftbellError::Storage {
            source: "shift store already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite shift store initialized");
        Ok(())
    }

    /// Create and initialize a store in one step.
    pub async fn open(config: StorageConfig) -> Result<Self, ShiftbellError> {
        let store = Self::new(config);
        store.initialize().await?;
        Ok(store)
    }

    fn db(&self) -> Result<&Database, ShiftbellError> {
        self.db.get().ok_or_else(|| ShiftbellError::Storage {
            source: "shift store not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteShiftStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Store
    }

    async fn health_check(&self) -> Result<HealthStatus, ShiftbellError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.query_row("SELECT COUNT(*) FROM shifts", [], |row| row.get::<_, i64>(0))?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), ShiftbellError> {
        if let Some(db) = self.db.get() {
            db.checkpoint().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl ShiftStore for SqliteShiftStore {
    async fn put(&self, entry: &ShiftEntry) -> Result<(), ShiftbellError> {
        queries::shifts::upsert_shift(self.db()?, entry).await
    }

    async fn put_batch(&self, entries: &[ShiftEntry]) -> Result<usize, ShiftbellError> {
        queries::shifts::upsert_shifts(self.db()?, entries).await
    }

    async fn get(&self, date: NaiveDate) -> Result<Option<ShiftEntry>, ShiftbellError> {
        queries::shifts::get_shift(self.db()?, date).await
    }

    async fn list(
        &self,
        from: Option<NaiveDate>,
        limit: usize,
    ) -> Result<Vec<ShiftEntry>, ShiftbellError> {
        queries::shifts::list_shifts(self.db()?, from, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string(),
            wal_mode: true,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[tokio::test]
    async fn implements_plugin_adapter() {
        let store = SqliteShiftStore::new(make_config("unused.db"));
        assert_eq!(store.name(), "sqlite");
        assert_eq!(store.version(), semver::Version::new(0, 1, 0));
        assert_eq!(store.adapter_type(), AdapterType::Store);
    }

    #[tokio::test]
    async fn operations_fail_before_initialize() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("no_init.db");
        let store = SqliteShiftStore::new(make_config(db_path.to_str().unwrap()));

        assert!(store.health_check().await.is_err());
        let err = store.get(day(10)).await.unwrap_err();
        assert_eq!(err.kind(), "storage");
    }

    #[tokio::test]
    async fn initialize_twice_returns_error() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("double_init.db");
        let store = SqliteShiftStore::new(make_config(db_path.to_str().unwrap()));

        store.initialize().await.unwrap();
        assert!(store.initialize().await.is_err());
    }

    #[tokio::test]
    async fn entries_survive_reopen() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("persist.db");
        let path = db_path.to_str().unwrap();

        {
            let store = SqliteShiftStore::open(make_config(path)).await.unwrap();
            store.put(&ShiftEntry::new(day(10), "Morning")).await.unwrap();
            assert_eq!(store.health_check().await.unwrap(), HealthStatus::Healthy);
            store.shutdown().await.unwrap();
        }

        let store = SqliteShiftStore::open(make_config(path)).await.unwrap();
        let entry = store.get(day(10)).await.unwrap().unwrap();
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            serde_json::json!({ "date": "2024-03-10", "shift": "Morning" })
        );
    }
}
