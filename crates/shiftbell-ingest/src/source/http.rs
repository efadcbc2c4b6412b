// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP object endpoint: `GET {base_url}/{bucket}/{key}`.

use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::StatusCode;
use tracing::debug;

use shiftbell_core::{
    AdapterType, DocumentRef, DocumentSource, HealthStatus, PluginAdapter, ShiftbellError,
};

/// Characters escaped inside one URL path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Document source that downloads objects over HTTP.
///
/// No retries: a failed download surfaces as [`ShiftbellError::Retrieval`].
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ShiftbellError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ShiftbellError::Retrieval {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of `doc`. Bucket and key segments are percent-encoded; `/` in
    /// the key stays a path separator.
    pub fn object_url(&self, doc: &DocumentRef) -> String {
        let key: Vec<String> = doc
            .key
            .trim_start_matches('/')
            .split('/')
            .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
            .collect();
        format!(
            "{}/{}/{}",
            self.base_url,
            utf8_percent_encode(&doc.bucket, SEGMENT),
            key.join("/")
        )
    }
}

#[async_trait]
impl PluginAdapter for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Source
    }

    async fn health_check(&self) -> Result<HealthStatus, ShiftbellError> {
        // Reachability only; any HTTP status means the endpoint answered.
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
impl DocumentSource for HttpSource {
    async fn fetch(&self, doc: &DocumentRef) -> Result<Vec<u8>, ShiftbellError> {
        let url = self.object_url(doc);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ShiftbellError::Retrieval {
                message: format!("GET {url} failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, document = %doc, "object response received");

        if status == StatusCode::NOT_FOUND {
            return Err(ShiftbellError::Retrieval {
                message: format!("document `{doc}` not found"),
                source: None,
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ShiftbellError::Retrieval {
                message: format!("GET {url} returned {status}: {body}"),
                source: None,
            });
        }

        let bytes = response.bytes().await.map_err(|e| ShiftbellError::Retrieval {
            message: format!("failed to read body of {url}: {e}"),
            source: Some(Box::new(e)),
        })?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source(server: &MockServer) -> HttpSource {
        HttpSource::new(&format!("{}/", server.uri()), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn fetch_downloads_object() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/shifts/march.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"shifts":[]}"#))
            .expect(1)
            .mount(&server)
            .await;

        let bytes = source(&server)
            .fetch(&DocumentRef::new("shifts", "march.json"))
            .await
            .unwrap();
        assert_eq!(bytes, br#"{"shifts":[]}"#);
    }

    #[test]
    fn object_url_escapes_reserved_characters() {
        let src = HttpSource::new("http://objects.local/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            src.object_url(&DocumentRef::new("shifts", "2024/march rota?v=2#1%.json")),
            "http://objects.local/shifts/2024/march%20rota%3Fv=2%231%25.json"
        );
    }

    #[tokio::test]
    async fn fetch_key_with_hash_reaches_the_object() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/shifts/rota%231.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"shifts":[]}"#))
            .expect(1)
            .mount(&server)
            .await;

        let bytes = source(&server)
            .fetch(&DocumentRef::new("shifts", "rota#1.json"))
            .await
            .unwrap();
        assert_eq!(bytes, br#"{"shifts":[]}"#);
    }

    #[tokio::test]
    async fn fetch_404_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = source(&server)
            .fetch(&DocumentRef::new("shifts", "absent.json"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "retrieval");
        assert!(err.to_string().contains("not found"), "got: {err}");
    }

    #[tokio::test]
    async fn fetch_server_error_includes_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
            .mount(&server)
            .await;

        let err = source(&server)
            .fetch(&DocumentRef::new("shifts", "march.json"))
            .await
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("503") && msg.contains("busy"), "got: {msg}");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_retrieval_error() {
        let src = HttpSource::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        let err = src
            .fetch(&DocumentRef::new("shifts", "march.json"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "retrieval");
    }
}
