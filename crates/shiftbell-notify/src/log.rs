// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dispatcher that only writes the notification to the log.

use async_trait::async_trait;
use tracing::info;

use shiftbell_core::{
    AdapterType, DeliveryId, HealthStatus, Notification, NotificationDispatcher, PluginAdapter,
    ShiftbellError,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct LogDispatcher;

#[async_trait]
impl PluginAdapter for LogDispatcher {
    fn name(&self) -> &str {
        "log"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Dispatcher
    }

    async fn health_check(&self) -> Result<HealthStatus, ShiftbellError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), ShiftbellError> {
        Ok(())
    }
}

#[async_trait]
impl NotificationDispatcher for LogDispatcher {
    async fn dispatch(&self, notification: &Notification) -> Result<DeliveryId, ShiftbellError> {
        let id = format!("log-{}", uuid::Uuid::new_v4());
        info!(
            delivery = %id,
            destination = %notification.destination,
            subject = %notification.subject,
            body = %notification.body,
            "notification"
        );
        Ok(DeliveryId(id))
    }
}
