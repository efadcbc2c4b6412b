// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SMTP email dispatcher.
//!
//! Sends plain-text mail through lettre's tokio transport. The recipient is
//! the notification's destination; the sender comes from `[email] sender`.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use shiftbell_config::model::EmailConfig;
use shiftbell_core::{
    AdapterType, DeliveryId, HealthStatus, Notification, NotificationDispatcher, PluginAdapter,
    ShiftbellError,
};

pub struct EmailDispatcher {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl EmailDispatcher {
    pub fn new(config: &EmailConfig) -> Result<Self, ShiftbellError> {
        let host = config
            .smtp_host
            .as_deref()
            .ok_or_else(|| ShiftbellError::Config("email.smtp_host is not set".into()))?;
        let sender = config
            .sender
            .as_deref()
            .ok_or_else(|| ShiftbellError::Config("email.sender is not set".into()))?
            .parse::<Mailbox>()
            .map_err(|e| ShiftbellError::Config(format!("invalid email.sender: {e}")))?;

        let mut builder = if config.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host).map_err(|e| {
                ShiftbellError::Config(format!("invalid SMTP relay `{host}`: {e}"))
            })?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
        };
        builder = builder
            .port(config.smtp_port)
            .timeout(Some(Duration::from_secs(config.timeout_secs)));
        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            sender,
        })
    }

    /// Build the RFC 5322 message for `notification`.
    pub fn compose(&self, notification: &Notification) -> Result<Message, ShiftbellError> {
        let recipient = notification.destination.parse::<Mailbox>().map_err(|e| {
            ShiftbellError::Dispatch {
                message: format!("invalid recipient `{}`: {e}", notification.destination),
                source: Some(Box::new(e)),
            }
        })?;
        Message::builder()
            .from(self.sender.clone())
            .to(recipient)
            .subject(notification.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(notification.body.clone())
            .map_err(|e| ShiftbellError::Dispatch {
                message: format!("failed to build email: {e}"),
                source: Some(Box::new(e)),
            })
    }
}

#[async_trait]
impl PluginAdapter for EmailDispatcher {
    fn name(&self) -> &str {
        "email"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Dispatcher
    }

    async fn health_check(&self) -> Result<HealthStatus, ShiftbellError> {
        match self.transport.test_connection().await {
            Ok(true) => Ok(HealthStatus::Healthy),
            Ok(false) => Ok(HealthStatus::Degraded("SMTP server did not answer NOOP".into())),
            Err(e) => Ok(HealthStatus::Unhealthy(format!("SMTP connection failed: {e}"))),
        }
    }

    async fn shutdown(&self) -> Result<(), ShiftbellError> {
        Ok(())
    }
}

#[async_trait]
impl NotificationDispatcher for EmailDispatcher {
    async fn dispatch(&self, notification: &Notification) -> Result<DeliveryId, ShiftbellError> {
        let message = self.compose(notification)?;
        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| ShiftbellError::Dispatch {
                message: format!("SMTP send failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let id = response.first_line().unwrap_or_default().to_string();
        debug!(code = %response.code(), reply = %id, "SMTP server accepted message");
        Ok(DeliveryId(id))
    }
}
