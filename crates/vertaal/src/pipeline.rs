//! Per-request translation pipelines.
//!
//! Each entry point runs one request end to end: all intermediate state is
//! created here, lives for the duration of the run, and is discarded with
//! the response. The pipeline is single-threaded per request; it suspends
//! only at the translation and OCR adapter boundaries, and upstream failures
//! are surfaced once, never retried.

use std::path::PathBuf;

use crate::batch;
use crate::error::Result;
use crate::markup::{SegmentOptions, reconstruct, segment, translation_units};
use crate::ocr::{OcrBackend, TempFile};
use crate::translate::TranslationBackend;

/// Translate an ordered unit list through the reduce/translate/expand chain.
///
/// Blank units are carried through unchanged. When every unit is blank the
/// translation backend is not invoked at all and the input is returned
/// untouched; an empty payload must never reach the service.
pub async fn translate_units(
    backend: &dyn TranslationBackend,
    units: Vec<String>,
    source: &str,
    target: &str,
) -> Result<Vec<String>> {
    let (reduced, positions) = batch::reduce(&units);
    if reduced.is_empty() {
        return Ok(units);
    }

    let translated = backend.translate(&reduced, source, target).await?;
    let results: Vec<String> = translated.into_iter().map(|unit| unit.translation).collect();

    batch::expand(&units, &positions, results)
}

/// Translate a single plain-text fragment.
pub async fn translate_text(
    backend: &dyn TranslationBackend,
    text: &str,
    source: &str,
    target: &str,
) -> Result<String> {
    let units = vec![text.to_string()];
    let mut results = translate_units(backend, units, source, target).await?;
    // translate_units preserves length, so index 0 always exists.
    Ok(results.remove(0))
}

/// Translate a markup document, preserving its structure.
///
/// Runs the full chain: segment, collect translation units, reduce,
/// translate (skipped when the reduced batch is empty), expand, and
/// reconstruct. Opaque regions pass through verbatim.
pub async fn translate_markup(
    backend: &dyn TranslationBackend,
    markup: &str,
    source: &str,
    target: &str,
    options: &SegmentOptions,
) -> Result<String> {
    let tokens = segment(markup, options)?;
    let units = translation_units(&tokens);
    let results = translate_units(backend, units, source, target).await?;
    reconstruct(&tokens, &results)
}

/// Recognize and translate an uploaded image file.
///
/// Takes ownership of the temporary file: it is deleted exactly once on
/// every exit path, including OCR and translation failures.
pub async fn translate_image(
    backend: &dyn TranslationBackend,
    ocr: &dyn OcrBackend,
    path: PathBuf,
    source: &str,
    target: &str,
) -> Result<String> {
    let guard = TempFile::new(path);
    let text = ocr.recognize(guard.path()).await?;
    translate_text(backend, &text, source, target).await
}
