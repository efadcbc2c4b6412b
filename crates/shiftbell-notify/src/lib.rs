// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification dispatch backends for Shiftbell.
//!
//! - [`EmailDispatcher`]: SMTP via lettre
//! - [`TopicDispatcher`]: HTTP push topic via reqwest
//! - [`LogDispatcher`]: writes the notification to the log (dry runs)
//!
//! None of them retry. A rejected notification surfaces as
//! [`ShiftbellError::Dispatch`].

pub mod email;
pub mod log;
pub mod topic;

use std::sync::Arc;

use shiftbell_config::model::{ShiftbellConfig, TransportKind};
use shiftbell_core::{NotificationDispatcher, ShiftbellError};

pub use email::EmailDispatcher;
pub use log::LogDispatcher;
pub use topic::TopicDispatcher;

/// Construct the dispatcher selected by `[dispatch] transport`.
pub fn build_dispatcher(
    config: &ShiftbellConfig,
) -> Result<Arc<dyn NotificationDispatcher>, ShiftbellError> {
    Ok(match config.dispatch.transport {
        TransportKind::Email => Arc::new(EmailDispatcher::new(&config.email)?),
        TransportKind::Topic => Arc::new(TopicDispatcher::new(&config.topic)?),
        TransportKind::Log => Arc::new(LogDispatcher),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiftbell_core::PluginAdapter;

    #[test]
    fn defaults_to_log_transport() {
        let dispatcher = build_dispatcher(&ShiftbellConfig::default()).unwrap();
        assert_eq!(dispatcher.name(), "log");
    }

    #[tokio::test]
    async fn selects_configured_transport() {
        let mut config = ShiftbellConfig::default();
        config.dispatch.transport = TransportKind::Topic;
        config.topic.url = Some("http://push.local/topics".into());
        assert_eq!(build_dispatcher(&config).unwrap().name(), "topic");

        config.dispatch.transport = TransportKind::Email;
        config.email.smtp_host = Some("localhost".into());
        config.email.sender = Some("shiftbell@example.com".into());
        assert_eq!(build_dispatcher(&config).unwrap().name(), "email");
    }

    #[test]
    fn incomplete_transport_config_is_error() {
        let mut config = ShiftbellConfig::default();
        config.dispatch.transport = TransportKind::Topic;
        assert!(build_dispatcher(&config).is_err());
    }
}
