// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator wiring shared by every subcommand.
//!
//! Everything is built from the loaded config and passed in explicitly;
//! nothing is stored in globals.

use std::sync::Arc;

use shiftbell_config::ShiftbellConfig;
use shiftbell_core::{NotificationDispatcher, PluginAdapter, ShiftbellError, SystemClock};
use shiftbell_ingest::{build_source, Ingestor};
use shiftbell_notify::build_dispatcher;
use shiftbell_reminder::{Reminder, ReminderSettings};
use shiftbell_storage::SqliteShiftStore;
use tracing::debug;

pub struct App {
    pub config: ShiftbellConfig,
    pub store: Arc<SqliteShiftStore>,
}

impl App {
    /// Open the shift store described by `config`.
    pub async fn open(config: ShiftbellConfig) -> Result<Self, ShiftbellError> {
        let store = SqliteShiftStore::open(config.storage.clone()).await?;
        Ok(Self {
            config,
            store: Arc::new(store),
        })
    }

    pub fn ingestor(&self) -> Result<Ingestor, ShiftbellError> {
        let source = build_source(&self.config.source)?;
        debug!(source = source.name(), "document source ready");
        Ok(Ingestor::new(source, self.store.clone()))
    }

    /// Reminder using the configured transport.
    pub fn reminder(&self) -> Result<Reminder, ShiftbellError> {
        let dispatcher = build_dispatcher(&self.config)?;
        debug!(dispatcher = dispatcher.name(), "notification dispatcher ready");
        self.reminder_with(dispatcher)
    }

    pub fn reminder_with(
        &self,
        dispatcher: Arc<dyn NotificationDispatcher>,
    ) -> Result<Reminder, ShiftbellError> {
        let settings = ReminderSettings::from_config(&self.config)?;
        Ok(Reminder::new(
            self.store.clone(),
            dispatcher,
            Arc::new(SystemClock),
            settings,
        ))
    }

    pub async fn shutdown(&self) -> Result<(), ShiftbellError> {
        self.store.shutdown().await
    }
}
