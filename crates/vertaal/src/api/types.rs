//! API request and response types.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::ocr::OcrBackend;
use crate::translate::TranslationBackend;

/// API server state.
///
/// Configuration is read-only after startup. The translation and OCR
/// backends are trait objects so tests (or alternative deployments) can
/// inject their own implementations.
#[derive(Clone)]
pub struct ApiState {
    pub config: Arc<ServiceConfig>,
    pub translator: Arc<dyn TranslationBackend>,
    pub ocr: Arc<dyn OcrBackend>,
}

/// Success envelope: `{"data": ..., "error": null}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    pub error: Option<serde_json::Value>,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { data, error: None }
    }
}

/// Error envelope: `{"code": ..., "message": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub code: u16,
    pub message: String,
}

/// Public root response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub status: String,
    pub version: String,
}

/// Request body for `POST /translate/text`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateTextRequest {
    pub text: String,
}

/// Request body for `POST /translate/xtz` (inline markup).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateMarkupRequest {
    pub html: String,
}

/// Translation payload of text and image responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationData {
    pub translation: String,
}

/// Translation payload of markup responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkupData {
    pub html: String,
}
