// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fetch, parse and persist one uploaded schedule.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info};

use shiftbell_core::{DocumentRef, DocumentSource, HandlerResponse, ShiftStore, ShiftbellError};

use crate::event::UploadEvent;
use crate::parser::parse_document;

pub const STORED_MESSAGE: &str = "Shifts stored successfully!";
pub const FAILED_MESSAGE: &str = "Error processing file!";

/// Schedule ingestion over injected collaborators.
#[derive(Clone)]
pub struct Ingestor {
    source: Arc<dyn DocumentSource>,
    store: Arc<dyn ShiftStore>,
}

impl Ingestor {
    pub fn new(source: Arc<dyn DocumentSource>, store: Arc<dyn ShiftStore>) -> Self {
        Self { source, store }
    }

    /// Ingest the document at `doc`, returning how many entries were written.
    ///
    /// The whole document is parsed and its dates validated before the first
    /// write, so a parse failure leaves the store untouched.
    pub async fn ingest(&self, doc: &DocumentRef) -> Result<usize, ShiftbellError> {
        info!(document = %doc, "processing schedule document");

        let bytes = self.source.fetch(doc).await?;
        debug!(document = %doc, raw = %String::from_utf8_lossy(&bytes), "raw schedule document");

        let schedule = parse_document(&bytes)?;
        let written = self.store.put_batch(&schedule.shifts).await?;

        info!(document = %doc, written, "shifts stored");
        Ok(written)
    }

    /// Entry point for object-created triggers.
    ///
    /// Never fails: errors are logged and reported as a 500 response.
    pub async fn handle_upload_event(&self, event: &Value) -> HandlerResponse {
        info!(event = %event, "received upload event");

        let result = match UploadEvent::from_json(event) {
            Ok(upload) => self.ingest(&upload.document()).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(_) => HandlerResponse::ok(STORED_MESSAGE),
            Err(e) => {
                error!(error = %e, kind = e.kind(), "error processing file");
                HandlerResponse::error(FAILED_MESSAGE)
            }
        }
    }
}
