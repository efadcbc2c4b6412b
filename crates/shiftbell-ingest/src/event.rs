// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Object-created upload events.
//!
//! The upload handler is triggered with the notification shape object stores
//! emit when a file lands in a bucket:
//!
//! ```json
//! {"Records":[{"s3":{"bucket":{"name":"shifts"},"object":{"key":"march.json"}}}]}
//! ```
//!
//! Only the first record is consumed.

use percent_encoding::percent_decode_str;
use serde::Deserialize;
use shiftbell_core::{DocumentRef, ShiftbellError};

#[derive(Debug, Deserialize)]
struct EventEnvelope {
    #[serde(rename = "Records")]
    records: Vec<EventRecord>,
}

#[derive(Debug, Deserialize)]
struct EventRecord {
    s3: ObjectEntity,
}

#[derive(Debug, Deserialize)]
struct ObjectEntity {
    bucket: BucketEntity,
    object: ObjectKey,
}

#[derive(Debug, Deserialize)]
struct BucketEntity {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ObjectKey {
    key: String,
}

/// The document an upload event points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadEvent {
    pub bucket: String,
    pub key: String,
}

impl UploadEvent {
    /// Extract the first record's bucket and (URL-decoded) key.
    pub fn from_json(event: &serde_json::Value) -> Result<Self, ShiftbellError> {
        let envelope = EventEnvelope::deserialize(event)
            .map_err(|e| ShiftbellError::parse("Records", e.to_string()))?;
        let record = envelope
            .records
            .into_iter()
            .next()
            .ok_or_else(|| ShiftbellError::parse("Records", "event contains no records"))?;

        let key = decode_key(&record.s3.object.key)?;
        if key.is_empty() {
            return Err(ShiftbellError::parse(
                "Records[0].s3.object.key",
                "object key is empty",
            ));
        }

        Ok(Self {
            bucket: record.s3.bucket.name,
            key,
        })
    }

    pub fn document(&self) -> DocumentRef {
        DocumentRef::new(&self.bucket, &self.key)
    }
}

/// Object keys arrive form-encoded: `+` is a space and `%XX` an escaped byte.
fn decode_key(raw: &str) -> Result<String, ShiftbellError> {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|key| key.into_owned())
        .map_err(|e| ShiftbellError::parse("Records[0].s3.object.key", e.to_string()))
}
