// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document sources the upload handler can read from.

pub mod fs;
pub mod http;

use std::sync::Arc;
use std::time::Duration;

use shiftbell_config::model::{SourceConfig, SourceKind};
use shiftbell_core::{DocumentSource, ShiftbellError};

pub use fs::FsSource;
pub use http::HttpSource;

/// Construct the document source selected by `[source] kind`.
pub fn build_source(config: &SourceConfig) -> Result<Arc<dyn DocumentSource>, ShiftbellError> {
    match config.kind {
        SourceKind::Filesystem => Ok(Arc::new(FsSource::new(&config.root))),
        SourceKind::Http => {
            let base_url = config.base_url.as_deref().ok_or_else(|| {
                ShiftbellError::Config("source.base_url is required for the http source".into())
            })?;
            let source = HttpSource::new(base_url, Duration::from_secs(config.timeout_secs))?;
            Ok(Arc::new(source))
        }
    }
}
