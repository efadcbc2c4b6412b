// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Schedule ingestion for Shiftbell.
//!
//! An uploaded document is fetched from a [`DocumentSource`], parsed into a
//! [`ScheduleDocument`](shiftbell_core::ScheduleDocument) and written to the
//! shift store with last-write-wins upserts. Re-ingesting the same document
//! leaves the store unchanged.
//!
//! [`DocumentSource`]: shiftbell_core::DocumentSource

pub mod event;
pub mod parser;
pub mod pipeline;
pub mod source;

pub use event::UploadEvent;
pub use parser::parse_document;
pub use pipeline::Ingestor;
pub use source::{build_source, FsSource, HttpSource};
