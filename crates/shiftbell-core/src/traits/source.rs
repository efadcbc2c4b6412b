// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document source trait for uploaded schedule files.

use async_trait::async_trait;

use crate::error::ShiftbellError;
use crate::traits::adapter::PluginAdapter;
use crate::types::DocumentRef;

/// Something that yields the raw bytes of an uploaded document.
#[async_trait]
pub trait DocumentSource: PluginAdapter {
    /// Fetches the full contents of `doc`.
    ///
    /// Fails with [`ShiftbellError::Retrieval`] when the source is
    /// unreachable or the document does not exist.
    async fn fetch(&self, doc: &DocumentRef) -> Result<Vec<u8>, ShiftbellError>;
}
