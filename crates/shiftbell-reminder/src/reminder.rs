// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The reminder service: look up, decide, format, dispatch.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use tracing::{error, info};

use shiftbell_config::model::{ReminderWindow, ShiftbellConfig};
use shiftbell_core::date::{format_date, parse_offset};
use shiftbell_core::{
    Clock, DeliveryId, HandlerResponse, Notification, NotificationDispatcher, PluginAdapter,
    ReminderResult, ShiftStore, ShiftbellError,
};

use crate::format::format_reminder;
use crate::policy::{resolve, Resolution, SuppressionPolicy};
use crate::window::target_dates;

pub const SENT_MESSAGE: &str = "Reminder sent!";
pub const SUPPRESSED_MESSAGE: &str = "No reminder needed.";
pub const FAILED_MESSAGE: &str = "Error sending reminder!";

/// Destination used when `dispatch.destination` is unset (log transport).
const DEFAULT_DESTINATION: &str = "stdout";

/// The policy knobs a reminder run is parameterized by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderSettings {
    pub timezone: FixedOffset,
    pub window: ReminderWindow,
    pub policy: SuppressionPolicy,
    pub destination: String,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            timezone: Utc.fix(),
            window: ReminderWindow::Tomorrow,
            policy: SuppressionPolicy::Strict,
            destination: DEFAULT_DESTINATION.to_string(),
        }
    }
}

impl ReminderSettings {
    pub fn from_config(config: &ShiftbellConfig) -> Result<Self, ShiftbellError> {
        let timezone = parse_offset(&config.reminder.timezone).ok_or_else(|| {
            ShiftbellError::Config(format!(
                "reminder.timezone `{}` is not a fixed offset",
                config.reminder.timezone
            ))
        })?;
        Ok(Self {
            timezone,
            window: config.reminder.window,
            policy: SuppressionPolicy::from_config(&config.reminder),
            destination: config
                .dispatch
                .destination
                .clone()
                .unwrap_or_else(|| DEFAULT_DESTINATION.to_string()),
        })
    }
}

/// What a reminder run would do, before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderPlan {
    Send(ReminderResult),
    Suppress { missing: Vec<NaiveDate> },
}

/// What a reminder run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderOutcome {
    Sent {
        result: ReminderResult,
        delivery: DeliveryId,
    },
    Suppressed {
        missing: Vec<NaiveDate>,
    },
}

/// Reminder computation over injected collaborators.
#[derive(Clone)]
pub struct Reminder {
    store: Arc<dyn ShiftStore>,
    dispatcher: Arc<dyn NotificationDispatcher>,
    clock: Arc<dyn Clock>,
    settings: ReminderSettings,
}

impl Reminder {
    pub fn new(
        store: Arc<dyn ShiftStore>,
        dispatcher: Arc<dyn NotificationDispatcher>,
        clock: Arc<dyn Clock>,
        settings: ReminderSettings,
    ) -> Self {
        Self {
            store,
            dispatcher,
            clock,
            settings,
        }
    }

    pub fn settings(&self) -> &ReminderSettings {
        &self.settings
    }

    /// Decide what to send at `now`. Reads the store, never dispatches.
    pub async fn plan_at(&self, now: DateTime<Utc>) -> Result<ReminderPlan, ShiftbellError> {
        let dates = target_dates(now, self.settings.timezone, self.settings.window);
        info!(
            dates = ?dates.iter().map(|d| format_date(*d)).collect::<Vec<_>>(),
            window = %self.settings.window,
            "checking shift schedule"
        );

        let mut lookups = Vec::with_capacity(dates.len());
        for date in dates {
            lookups.push((date, self.store.get(date).await?));
        }

        Ok(match resolve(&self.settings.policy, lookups) {
            Resolution::Resolved { first, rest } => {
                ReminderPlan::Send(format_reminder(first, rest))
            }
            Resolution::Suppressed { missing } => ReminderPlan::Suppress { missing },
        })
    }

    /// [`plan_at`](Self::plan_at) using the injected clock.
    pub async fn plan(&self) -> Result<ReminderPlan, ShiftbellError> {
        self.plan_at(self.clock.now()).await
    }

    /// Plan at `now` and dispatch the result, if any. No retry.
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<ReminderOutcome, ShiftbellError> {
        match self.plan_at(now).await? {
            ReminderPlan::Suppress { missing } => {
                info!(
                    missing = ?missing.iter().map(|d| format_date(*d)).collect::<Vec<_>>(),
                    "no shift scheduled, reminder suppressed"
                );
                Ok(ReminderOutcome::Suppressed { missing })
            }
            ReminderPlan::Send(result) => {
                let notification = Notification {
                    destination: self.settings.destination.clone(),
                    subject: result.subject.clone(),
                    body: result.body.clone(),
                };
                info!(
                    dispatcher = self.dispatcher.name(),
                    subject = %notification.subject,
                    "sending reminder notification"
                );
                let delivery = self.dispatcher.dispatch(&notification).await?;
                info!(delivery = %delivery.0, "reminder dispatched");
                Ok(ReminderOutcome::Sent { result, delivery })
            }
        }
    }

    /// [`run_at`](Self::run_at) using the injected clock.
    pub async fn run(&self) -> Result<ReminderOutcome, ShiftbellError> {
        self.run_at(self.clock.now()).await
    }

    /// Entry point for scheduled triggers.
    ///
    /// Errors are logged and reported as a 500 response.
    pub async fn handle_scheduled(&self) -> HandlerResponse {
        match self.run().await {
            Ok(ReminderOutcome::Sent { .. }) => HandlerResponse::ok(SENT_MESSAGE),
            Ok(ReminderOutcome::Suppressed { .. }) => HandlerResponse::ok(SUPPRESSED_MESSAGE),
            Err(e) => {
                error!(error = %e, kind = e.kind(), "reminder run failed");
                HandlerResponse::error(FAILED_MESSAGE)
            }
        }
    }
}
