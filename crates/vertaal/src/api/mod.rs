//! REST API server for the translation backend.
//!
//! # Endpoints
//!
//! - `GET /` - Public root / health check (no API key required)
//! - `POST /translate/text` - Translate a plain-text fragment (JSON body)
//! - `POST /translate/image` - OCR an uploaded image, then translate
//! - `POST /translate/html` - Translate an uploaded markup file
//! - `POST /translate/xtz` - Translate inline markup (JSON body)
//!
//! All `/translate/*` routes require an `api-key` header matching the
//! configured allow-list; unauthorized requests receive a 404 envelope so
//! the endpoints stay invisible to probing.
//!
//! Success responses use the `{"data": ..., "error": null}` envelope,
//! errors use `{"code": ..., "message": ...}`.
//!
//! # cURL Examples
//!
//! ```bash
//! # Plain text
//! curl -H "api-key: alpha" -H "content-type: application/json" \
//!      -d '{"text":"Hallo"}' http://localhost:3160/translate/text
//!
//! # Markup file upload
//! curl -H "api-key: alpha" -F "html=@page.html" \
//!      http://localhost:3160/translate/html
//!
//! # Scanned image
//! curl -H "api-key: alpha" -F "image=@scan.png" \
//!      http://localhost:3160/translate/image
//! ```

mod error;
mod handlers;
mod server;
mod types;

pub use error::ApiError;
pub use server::{create_router, create_router_with_backends, serve, serve_with_config};
pub use types::{
    ApiState, Envelope, ErrorEnvelope, MarkupData, RootResponse, TranslateMarkupRequest, TranslateTextRequest,
    TranslationData,
};
