// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock notification dispatcher for deterministic testing.
//!
//! `MockDispatcher` captures every notification passed to `dispatch()` for
//! later assertion, and can be switched into a failing mode to exercise
//! dispatch error paths.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use shiftbell_core::{
    AdapterType, DeliveryId, HealthStatus, Notification, NotificationDispatcher, PluginAdapter,
    ShiftbellError,
};

/// A capturing notification dispatcher.
pub struct MockDispatcher {
    sent: Arc<Mutex<Vec<Notification>>>,
    fail: AtomicBool,
}

impl MockDispatcher {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail: AtomicBool::new(false),
        }
    }

    /// A dispatcher whose every `dispatch()` call fails.
    pub fn failing() -> Self {
        let dispatcher = Self::new();
        dispatcher.set_failing(true);
        dispatcher
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// All notifications accepted so far, oldest first.
    pub async fn sent(&self) -> Vec<Notification> {
        self.sent.lock().await.clone()
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    pub async fn clear(&self) {
        self.sent.lock().await.clear();
    }
}

impl Default for MockDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockDispatcher {
    fn name(&self) -> &str {
        "mock-dispatcher"
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
impl NotificationDispatcher for MockDispatcher {
    async fn dispatch(&self, notification: &Notification) -> Result<DeliveryId, ShiftbellError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ShiftbellError::Dispatch {
                message: "mock dispatcher configured to fail".into(),
                source: None,
            });
        }
        self.sent.lock().await.push(notification.clone());
        Ok(DeliveryId(format!("mock-{}", uuid::Uuid::new_v4())))
    }
}
