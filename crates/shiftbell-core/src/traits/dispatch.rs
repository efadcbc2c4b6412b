// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification dispatcher trait (email, push topic, ...).

use async_trait::async_trait;

use crate::error::ShiftbellError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{DeliveryId, Notification};

/// Hands a formatted notification to an external transport.
#[async_trait]
pub trait NotificationDispatcher: PluginAdapter {
    /// Sends `notification`, failing with [`ShiftbellError::Dispatch`] when the
    /// transport rejects it. Implementations do not retry.
    async fn dispatch(&self, notification: &Notification) -> Result<DeliveryId, ShiftbellError>;
}
