//! API request handlers.
//!
//! Every handler follows the same order the service has always used: the
//! translator configuration check comes first, then payload validation, then
//! the pipeline run. Uploaded files are written to a per-request temporary
//! path whose ownership moves into the pipeline, which guarantees deletion
//! on all exit paths.

use axum::{
    Json,
    extract::{Multipart, State},
};

use crate::error::VertaalError;
use crate::markup::SegmentOptions;
use crate::pipeline;

use super::{
    error::ApiError,
    types::{
        ApiState, Envelope, MarkupData, RootResponse, TranslateMarkupRequest, TranslateTextRequest, TranslationData,
    },
};

/// Public root endpoint handler.
///
/// GET /
///
/// The only route that does not require an API key.
pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Plain-text translation handler.
///
/// POST /translate/text with JSON body `{"text": ...}`.
pub async fn translate_text_handler(
    State(state): State<ApiState>,
    Json(request): Json<TranslateTextRequest>,
) -> Result<Json<Envelope<TranslationData>>, ApiError> {
    state.translator.ready()?;

    if request.text.is_empty() {
        return Err(VertaalError::validation("Nothing to translate").into());
    }

    let translation = pipeline::translate_text(
        state.translator.as_ref(),
        &request.text,
        &state.config.translator.source_lang,
        &state.config.translator.target_lang,
    )
    .await?;

    Ok(Json(Envelope::new(TranslationData { translation })))
}

/// Image translation handler.
///
/// POST /translate/image with multipart field `image`.
pub async fn translate_image_handler(
    State(state): State<ApiState>,
    multipart: Multipart,
) -> Result<Json<Envelope<TranslationData>>, ApiError> {
    state.translator.ready()?;

    let image = read_field_bytes(multipart, "image")
        .await?
        .ok_or_else(|| VertaalError::validation("Nothing to translate"))?;

    let temp_path = std::env::temp_dir().join(format!(
        "vertaal_upload_{}_{}.img",
        std::process::id(),
        uuid::Uuid::new_v4()
    ));
    tokio::fs::write(&temp_path, &image).await.map_err(VertaalError::Io)?;

    // translate_image takes ownership of the file and deletes it on every
    // exit path.
    let translation = pipeline::translate_image(
        state.translator.as_ref(),
        state.ocr.as_ref(),
        temp_path,
        &state.config.translator.source_lang,
        &state.config.translator.target_lang,
    )
    .await?;

    Ok(Json(Envelope::new(TranslationData { translation })))
}

/// Markup file translation handler.
///
/// POST /translate/html with multipart field `html` (a file upload).
pub async fn translate_html_handler(
    State(state): State<ApiState>,
    multipart: Multipart,
) -> Result<Json<Envelope<MarkupData>>, ApiError> {
    state.translator.ready()?;

    let upload = read_field_bytes(multipart, "html")
        .await?
        .ok_or_else(|| VertaalError::validation("Nothing to translate"))?;
    let markup = String::from_utf8_lossy(&upload).into_owned();

    translate_markup(&state, &markup).await
}

/// Inline markup translation handler.
///
/// POST /translate/xtz with JSON body `{"html": ...}`.
pub async fn translate_xtz_handler(
    State(state): State<ApiState>,
    Json(request): Json<TranslateMarkupRequest>,
) -> Result<Json<Envelope<MarkupData>>, ApiError> {
    state.translator.ready()?;

    translate_markup(&state, &request.html).await
}

async fn translate_markup(state: &ApiState, markup: &str) -> Result<Json<Envelope<MarkupData>>, ApiError> {
    if markup.is_empty() {
        return Err(VertaalError::validation("Nothing to translate").into());
    }

    let options = SegmentOptions {
        legacy_opacity: state.config.markup.legacy_opacity,
    };

    let html = pipeline::translate_markup(
        state.translator.as_ref(),
        markup,
        &state.config.translator.source_lang,
        &state.config.translator.target_lang,
        &options,
    )
    .await?;

    Ok(Json(Envelope::new(MarkupData { html })))
}

/// Read the named multipart field as raw bytes, ignoring other fields.
async fn read_field_bytes(mut multipart: Multipart, name: &str) -> Result<Option<Vec<u8>>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError(VertaalError::validation(e.to_string())))?
    {
        if field.name() == Some(name) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError(VertaalError::validation(e.to_string())))?;
            return Ok(Some(bytes.to_vec()));
        }
    }

    Ok(None)
}
