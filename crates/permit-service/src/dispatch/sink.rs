//! Delivery targets for rendered permit documents.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info};

use permit_core::config::PortalConfig;
use permit_core::error::{AppError, ErrorKind};
use permit_core::result::AppResult;

/// Result of trying to open an immediate print view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewOutcome {
    /// The document is showing and printing can start.
    Opened,
    /// No view could be opened, e.g. a popup blocker.
    Blocked,
}

/// Where rendered documents go.
#[async_trait]
pub trait DocumentSink: Send + Sync + 'static {
    /// Try to open a print view streaming `html`.
    async fn open_view(&self, html: &str) -> AppResult<ViewOutcome>;

    /// Save `html` as a downloadable file named `filename`.
    async fn download(&self, filename: &str, html: &str) -> AppResult<()>;
}

/// Headless sink: never opens a view, saves downloads into a directory.
#[derive(Debug, Clone)]
pub struct DirectoryDocumentSink {
    /// Directory receiving downloads.
    root: PathBuf,
}

impl DirectoryDocumentSink {
    /// Sink writing under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Sink writing under the configured download directory.
    pub fn from_config(config: &PortalConfig) -> Self {
        Self::new(&config.download_dir)
    }

    /// Directory receiving downloads.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl DocumentSink for DirectoryDocumentSink {
    async fn open_view(&self, _html: &str) -> AppResult<ViewOutcome> {
        debug!("No viewing context available, falling back to download");
        Ok(ViewOutcome::Blocked)
    }

    async fn download(&self, filename: &str, html: &str) -> AppResult<()> {
        if filename.is_empty() || filename.contains(['/', '\\']) || filename.starts_with('.') {
            return Err(AppError::validation(format!(
                "Invalid download filename: {filename}"
            )));
        }

        fs::create_dir_all(&self.root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::DeliveryFailed,
                format!("Failed to create download directory: {}", self.root.display()),
                e,
            )
        })?;

        let path = self.root.join(filename);
        fs::write(&path, html).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::DeliveryFailed,
                format!("Failed to save document: {}", path.display()),
                e,
            )
        })?;

        info!(path = %path.display(), bytes = html.len(), "Document saved");
        Ok(())
    }
}
