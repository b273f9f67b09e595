//! Tesseract subprocess backend.
//!
//! Invokes the `tesseract` binary against an image file and reads the
//! recognized text from stdout. Tesseract must be installed and in PATH:
//!
//! - **macOS**: `brew install tesseract`
//! - **Linux**: `apt install tesseract-ocr` or `dnf install tesseract`
//! - **Windows**: `winget install UB-Mannheim.TesseractOCR`

use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;
use tokio::time::{Duration, timeout};

use crate::error::{Result, VertaalError};
use crate::ocr::OcrBackend;

/// Default timeout for a recognition run (60 seconds)
const OCR_TIMEOUT_SECONDS: u64 = 60;

/// OCR backend shelling out to the Tesseract binary.
#[derive(Debug, Clone, Default)]
pub struct TesseractOcr {
    /// Recognition language passed as `-l` (None = Tesseract default)
    pub language: Option<String>,
}

impl TesseractOcr {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OcrBackend for TesseractOcr {
    async fn recognize(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(VertaalError::upstream(format!(
                "image file not found: {}",
                path.display()
            )));
        }

        let mut command = Command::new("tesseract");
        command
            .arg(path)
            .arg("stdout")
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped());
        if let Some(language) = &self.language {
            command.arg("-l").arg(language);
        }

        let child = command.spawn().map_err(|e| {
            VertaalError::upstream_with_source(
                "failed to execute tesseract (is it installed and in PATH?)",
                e,
            )
        })?;

        let output = match timeout(Duration::from_secs(OCR_TIMEOUT_SECONDS), child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(VertaalError::upstream_with_source("failed to wait for tesseract", e));
            }
            Err(_) => {
                return Err(VertaalError::upstream(format!(
                    "tesseract timed out after {} seconds",
                    OCR_TIMEOUT_SECONDS
                )));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::error!(status = ?output.status, "tesseract failed");
            return Err(VertaalError::upstream(format!("tesseract failed: {}", stderr)));
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_upstream_error() {
        let ocr = TesseractOcr::new();
        let err = ocr.recognize(Path::new("/nonexistent/image.png")).await.unwrap_err();
        assert!(matches!(err, VertaalError::Upstream { .. }));
        assert!(err.to_string().contains("not found"));
    }
}
