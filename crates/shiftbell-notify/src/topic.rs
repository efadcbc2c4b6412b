// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP push-topic dispatcher.
//!
//! Publishes `{"subject": .., "message": ..}` with `POST {url}/{topic}`,
//! where the topic is the notification's destination.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

use shiftbell_config::model::TopicConfig;
use shiftbell_core::{
    AdapterType, DeliveryId, HealthStatus, Notification, NotificationDispatcher, PluginAdapter,
    ShiftbellError,
};

#[derive(Debug, Serialize)]
struct PublishRequest<'a> {
    subject: &'a str,
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct PublishResponse {
    #[serde(alias = "message_id", alias = "MessageId")]
    id: String,
}

#[derive(Debug, Clone)]
pub struct TopicDispatcher {
    client: reqwest::Client,
    base_url: String,
}

impl TopicDispatcher {
    pub fn new(config: &TopicConfig) -> Result<Self, ShiftbellError> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| ShiftbellError::Config("topic.url is not set".into()))?;

        let mut headers = HeaderMap::new();
        if let Some(token) = &config.token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                    ShiftbellError::Config(format!("invalid topic token header value: {e}"))
                })?,
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ShiftbellError::Dispatch {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: url.trim_end_matches('/').to_string(),
        })
    }

    fn topic_url(&self, topic: &str) -> String {
        format!("{}/{}", self.base_url, topic.trim_start_matches('/'))
    }
}

#[async_trait]
impl PluginAdapter for TopicDispatcher {
    fn name(&self) -> &str {
        "topic"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Dispatcher
    }

    async fn health_check(&self) -> Result<HealthStatus, ShiftbellError> {
        match self.client.head(&self.base_url).send().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "{} unreachable: {e}",
                self.base_url
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), ShiftbellError> {
        Ok(())
    }
}

#[async_trait]
impl NotificationDispatcher for TopicDispatcher {
    async fn dispatch(&self, notification: &Notification) -> Result<DeliveryId, ShiftbellError> {
        let url = self.topic_url(&notification.destination);
        let response = self
            .client
            .post(&url)
            .json(&PublishRequest {
                subject: &notification.subject,
                message: &notification.body,
            })
            .send()
            .await
            .map_err(|e| ShiftbellError::Dispatch {
                message: format!("POST {url} failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, topic = %notification.destination, "publish response received");

        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(ShiftbellError::Dispatch {
                message: format!("topic publish returned {status}: {body}"),
                source: None,
            });
        }

        // Endpoints that do not echo an id still accepted the message.
        let id = serde_json::from_str::<PublishResponse>(&body)
            .map(|r| r.id)
            .unwrap_or_else(|_| uuid::Uuid::new_v4().to_string());
        Ok(DeliveryId(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn dispatcher(server: &MockServer, token: Option<&str>) -> TopicDispatcher {
        TopicDispatcher::new(&TopicConfig {
            url: Some(format!("{}/topics/", server.uri())),
            token: token.map(str::to_string),
            timeout_secs: 5,
        })
        .unwrap()
    }

    fn note() -> Notification {
        Notification {
            destination: "shift-reminders".into(),
            subject: "Reminder: Your Shift for 2024-03-10".into(),
            body: "Your shift for 2024-03-10 is: Morning.".into(),
        }
    }

    #[tokio::test]
    async fn publishes_subject_and_message_with_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/topics/shift-reminders"))
            .and(header("authorization", "Bearer s3cret"))
            .and(body_json(serde_json::json!({
                "subject": "Reminder: Your Shift for 2024-03-10",
                "message": "Your shift for 2024-03-10 is: Morning."
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "MessageId": "m-42" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let id = dispatcher(&server, Some("s3cret")).dispatch(&note()).await.unwrap();
        assert_eq!(id, DeliveryId("m-42".into()));
    }

    #[tokio::test]
    async fn accepted_without_id_gets_generated_one() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(202))
            .mount(&server)
            .await;

        let id = dispatcher(&server, None).dispatch(&note()).await.unwrap();
        assert!(!id.0.is_empty());
    }

    #[tokio::test]
    async fn rejection_is_dispatch_error_and_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("throttled"))
            .expect(1)
            .mount(&server)
            .await;

        let err = dispatcher(&server, None).dispatch(&note()).await.unwrap_err();
        assert_eq!(err.kind(), "dispatch");
        assert!(err.to_string().contains("throttled"), "got: {err}");
    }

    #[test]
    fn missing_url_is_config_error() {
        assert!(matches!(
            TopicDispatcher::new(&TopicConfig::default()),
            Err(ShiftbellError::Config(_))
        ));
    }
}
