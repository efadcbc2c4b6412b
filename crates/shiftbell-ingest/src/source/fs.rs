// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local directory treated as an object store: `<root>/<bucket>/<key>`.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use shiftbell_core::{
    AdapterType, DocumentRef, DocumentSource, HealthStatus, PluginAdapter, ShiftbellError,
};

/// Filesystem-backed document source.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `doc` to a path under the root, refusing anything that
    /// would escape it.
    pub fn object_path(&self, doc: &DocumentRef) -> Result<PathBuf, ShiftbellError> {
        let mut path = self.root.clone();
        for part in [doc.bucket.as_str(), doc.key.as_str()] {
            let relative = Path::new(part);
            if part.is_empty()
                || relative
                    .components()
                    .any(|c| !matches!(c, Component::Normal(_)))
            {
                return Err(ShiftbellError::Retrieval {
                    message: format!("invalid document reference `{doc}`"),
                    source: None,
                });
            }
            path.push(relative);
        }
        Ok(path)
    }

    /// Store `contents` at `doc`, creating the bucket directory if needed.
    pub async fn put_object(
        &self,
        doc: &DocumentRef,
        contents: &[u8],
    ) -> Result<PathBuf, ShiftbellError> {
        let path = self.object_path(doc)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| ShiftbellError::Retrieval {
                message: format!("failed to create {}: {e}", parent.display()),
                source: Some(Box::new(e)),
            })?;
        }
        tokio::fs::write(&path, contents).await.map_err(|e| ShiftbellError::Retrieval {
            message: format!("failed to write {}: {e}", path.display()),
            source: Some(Box::new(e)),
        })?;
        debug!(document = %doc, bytes = contents.len(), "object stored");
        Ok(path)
    }
}

#[async_trait]
impl PluginAdapter for FsSource {
    fn name(&self) -> &str {
        "filesystem"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Source
    }

    async fn health_check(&self) -> Result<HealthStatus, ShiftbellError> {
        match tokio::fs::metadata(&self.root).await {
            Ok(meta) if meta.is_dir() => Ok(HealthStatus::Healthy),
            Ok(_) => Ok(HealthStatus::Unhealthy(format!(
                "{} is not a directory",
                self.root.display()
            ))),
            Err(_) => Ok(HealthStatus::Degraded(format!(
                "{} does not exist yet",
                self.root.display()
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), ShiftbellError> {
        Ok(())
    }
}

#[async_trait]
impl DocumentSource for FsSource {
    async fn fetch(&self, doc: &DocumentRef) -> Result<Vec<u8>, ShiftbellError> {
        let path = self.object_path(doc)?;
        tokio::fs::read(&path).await.map_err(|e| {
            let message = if e.kind() == std::io::ErrorKind::NotFound {
                format!("document `{doc}` not found")
            } else {
                format!("failed to read `{doc}`: {e}")
            };
            ShiftbellError::Retrieval {
                message,
                source: Some(Box::new(e)),
            }
        })
    }
}
