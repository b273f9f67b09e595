//! Vertaal - Markup-Aware Translation Backend
//!
//! Vertaal accepts plain text, scanned images, or HTML documents and returns
//! a translated counterpart, delegating language translation to an external
//! web service and text recognition to an external OCR tool.
//!
//! The core is the markup-aware pipeline: it walks a document while tracking
//! which regions are translatable versus opaque, extracts the ordered list
//! of translatable text fragments, sends a reduced batch (blank fragments
//! never leave the process) to the translation service in a single call, and
//! reconstructs a structurally faithful document with the translated text
//! spliced back in.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use vertaal::config::ServiceConfig;
//!
//! #[tokio::main]
//! async fn main() -> vertaal::Result<()> {
//!     let config = ServiceConfig::discover()?.unwrap_or_default().with_env_overrides();
//!     vertaal::api::serve_with_config("127.0.0.1", 3160, config).await
//! }
//! ```
//!
//! # Architecture
//!
//! - `markup` - tokenizer, tag classification, and reconstruction
//! - `batch` - reduce/expand index mapping around the translation call
//! - `translate` - translation service backends behind a trait
//! - `ocr` - OCR backends behind a trait, plus temp-file lifetime handling
//! - `pipeline` - per-request orchestration
//! - `api` - axum HTTP surface (feature `api`, on by default)

#![deny(unsafe_code)]

pub mod batch;
pub mod config;
pub mod error;
pub mod markup;
pub mod ocr;
pub mod pipeline;
pub mod translate;

#[cfg(feature = "api")]
pub mod api;

pub use config::ServiceConfig;
pub use error::{Result, VertaalError};
pub use markup::{SegmentOptions, Token, reconstruct, segment, translation_units};
pub use ocr::{OcrBackend, TesseractOcr};
pub use translate::{TranslatedUnit, TranslationBackend, WatsonTranslator};
