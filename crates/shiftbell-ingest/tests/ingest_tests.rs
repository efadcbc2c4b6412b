// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ingestion against the SQLite store, mock, filesystem and HTTP sources.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;
use shiftbell_core::{DocumentRef, ShiftEntry, ShiftStore};
use shiftbell_ingest::{FsSource, Ingestor};
use shiftbell_storage::MemoryShiftStore;
use shiftbell_test_utils::TestHarness;

const MARCH: &str = r#"{"shifts":[
    {"date":"2024-03-10","shift":"Morning"},
    {"date":"2024-03-11","shift":"Afternoon"},
    {"date":"2024-03-12","shift":"Night"}
]}"#;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn upload_event(bucket: &str, key: &str) -> serde_json::Value {
    json!({
        "Records": [{
            "s3": { "bucket": { "name": bucket }, "object": { "key": key } }
        }]
    })
}

#[tokio::test]
async fn single_entry_document_is_readable_from_store() {
    let harness = TestHarness::builder().build().await.unwrap();
    let doc = DocumentRef::new("shifts", "shifts.json");
    harness
        .source
        .insert(doc.clone(), r#"{"shifts":[{"date":"2024-03-10","shift":"Morning"}]}"#)
        .await;

    let ingestor = Ingestor::new(harness.document_source(), harness.shift_store());
    assert_eq!(ingestor.ingest(&doc).await.unwrap(), 1);

    let entry = harness.store.get(day(10)).await.unwrap().unwrap();
    assert_eq!(
        serde_json::to_value(&entry).unwrap(),
        json!({ "date": "2024-03-10", "shift": "Morning" })
    );
}

#[tokio::test]
async fn ingesting_twice_is_idempotent() {
    let harness = TestHarness::builder().build().await.unwrap();
    let doc = DocumentRef::new("shifts", "march.json");
    harness.source.insert(doc.clone(), MARCH).await;
    let ingestor = Ingestor::new(harness.document_source(), harness.shift_store());

    ingestor.ingest(&doc).await.unwrap();
    let once = harness.store.list(None, 100).await.unwrap();
    ingestor.ingest(&doc).await.unwrap();
    let twice = harness.store.list(None, 100).await.unwrap();

    assert_eq!(once.len(), 3);
    assert_eq!(once, twice);
}

#[tokio::test]
async fn later_document_overwrites_earlier_dates() {
    let store = Arc::new(MemoryShiftStore::new());
    let source = Arc::new(shiftbell_test_utils::MockSource::new());
    let first = DocumentRef::new("shifts", "v1.json");
    let second = DocumentRef::new("shifts", "v2.json");
    source.insert(first.clone(), MARCH).await;
    source
        .insert(second.clone(), r#"{"shifts":[{"date":"2024-03-10","shift":"Afternoon"}]}"#)
        .await;

    let ingestor = Ingestor::new(source, store.clone());
    ingestor.ingest(&first).await.unwrap();
    ingestor.ingest(&second).await.unwrap();

    assert_eq!(store.get(day(10)).await.unwrap().unwrap().label, "Afternoon");
    assert_eq!(store.get(day(11)).await.unwrap().unwrap().label, "Afternoon");
    assert_eq!(store.len().await, 3);
}

#[tokio::test]
async fn missing_shifts_key_leaves_store_unchanged() {
    let store = Arc::new(MemoryShiftStore::with_entries([ShiftEntry::new(day(1), "Morning")]));
    let source = Arc::new(shiftbell_test_utils::MockSource::new());
    let doc = DocumentRef::new("shifts", "bad.json");
    source.insert(doc.clone(), r#"{"schedule":[]}"#).await;

    let err = Ingestor::new(source, store.clone()).ingest(&doc).await.unwrap_err();

    assert_eq!(err.kind(), "parse");
    assert_eq!(store.snapshot().await, vec![ShiftEntry::new(day(1), "Morning")]);
}

#[tokio::test]
async fn malformed_date_late_in_document_writes_nothing() {
    let harness = TestHarness::builder().build().await.unwrap();
    let doc = DocumentRef::new("shifts", "typo.json");
    harness
        .source
        .insert(
            doc.clone(),
            r#"{"shifts":[{"date":"2024-03-10","shift":"Morning"},{"date":"2024-13-01","shift":"Night"}]}"#,
        )
        .await;

    let err = Ingestor::new(harness.document_source(), harness.shift_store())
        .ingest(&doc)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("shifts[1].date"), "got: {err}");
    assert!(harness.store.list(None, 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_document_is_retrieval_error() {
    let harness = TestHarness::builder().build().await.unwrap();
    let err = Ingestor::new(harness.document_source(), harness.shift_store())
        .ingest(&DocumentRef::new("shifts", "nope.json"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "retrieval");
}

#[tokio::test]
async fn upload_event_reports_success() {
    let harness = TestHarness::builder().build().await.unwrap();
    harness
        .source
        .insert(DocumentRef::new("test-bucket", "test.json"), MARCH)
        .await;
    let ingestor = Ingestor::new(harness.document_source(), harness.shift_store());

    let response = ingestor
        .handle_upload_event(&upload_event("test-bucket", "test.json"))
        .await;

    assert_eq!(
        response.to_json(),
        json!({ "statusCode": 200, "body": "{\"message\":\"Shifts stored successfully!\"}" })
    );
    assert_eq!(harness.store.list(None, 10).await.unwrap().len(), 3);
}

#[tokio::test]
async fn upload_event_failures_report_500() {
    let harness = TestHarness::builder().build().await.unwrap();
    let ingestor = Ingestor::new(harness.document_source(), harness.shift_store());

    let missing_object = ingestor
        .handle_upload_event(&upload_event("test-bucket", "absent.json"))
        .await;
    assert_eq!(missing_object.status_code, 500);
    assert_eq!(missing_object.message, "Error processing file!");

    let malformed_event = ingestor.handle_upload_event(&json!({ "Records": [] })).await;
    assert!(!malformed_event.is_success());
}

#[tokio::test]
async fn filesystem_upload_then_event_ingests() {
    let dir = tempfile::tempdir().unwrap();
    let source = Arc::new(FsSource::new(dir.path()));
    let doc = DocumentRef::new("shifts", "rota march.json");
    source.put_object(&doc, MARCH.as_bytes()).await.unwrap();

    let store = Arc::new(MemoryShiftStore::new());
    let response = Ingestor::new(source, store.clone())
        .handle_upload_event(&upload_event("shifts", "rota+march.json"))
        .await;

    assert!(response.is_success(), "got {response:?}");
    assert_eq!(store.len().await, 3);
}

#[tokio::test]
async fn http_upload_event_with_escaped_key_ingests() {
    use std::time::Duration;

    use shiftbell_ingest::HttpSource;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shifts/rota%231.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(MARCH))
        .expect(1)
        .mount(&server)
        .await;

    let source = Arc::new(HttpSource::new(&server.uri(), Duration::from_secs(5)).unwrap());
    let store = Arc::new(MemoryShiftStore::new());
    let response = Ingestor::new(source, store.clone())
        .handle_upload_event(&upload_event("shifts", "rota%231.json"))
        .await;

    assert!(response.is_success(), "got {response:?}");
    assert_eq!(store.get(day(12)).await.unwrap().unwrap().label, "Night");
}
