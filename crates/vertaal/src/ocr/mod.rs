//! OCR backends.
//!
//! Image uploads pass through the [`OcrBackend`] trait before entering the
//! text translation path. The shipped implementation shells out to the
//! Tesseract binary; tests inject their own backends.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub mod tesseract;

pub use tesseract::TesseractOcr;

/// Trait for OCR engines.
///
/// Failures (non-zero exit, diagnostic output, missing path) surface as
/// `Upstream` errors and are never retried.
#[async_trait]
pub trait OcrBackend: Send + Sync {
    /// Recognize text in the image at `path`.
    async fn recognize(&self, path: &Path) -> Result<String>;
}

/// RAII guard for automatic temporary file cleanup.
///
/// Uploaded files are scoped per request: the guard is created the moment
/// the pipeline takes ownership of the path, so deletion happens exactly
/// once on every exit path (success, translation failure, parse failure,
/// or I/O failure).
pub struct TempFile {
    path: PathBuf,
}

impl TempFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to remove temporary file");
        }
    }
}
