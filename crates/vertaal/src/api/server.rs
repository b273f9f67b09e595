//! API server setup and configuration.

use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use axum::{
    Router,
    extract::{DefaultBodyLimit, Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::error::VertaalError;
use crate::ocr::{OcrBackend, TesseractOcr};
use crate::translate::{TranslationBackend, WatsonTranslator};

use super::{
    error::ApiError,
    handlers::{
        root_handler, translate_html_handler, translate_image_handler, translate_text_handler, translate_xtz_handler,
    },
    types::ApiState,
};

/// Default maximum request body size (25 MB).
const DEFAULT_MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Parse the upload size limit from `VERTAAL_MAX_UPLOAD_SIZE_MB`.
///
/// Falls back to the 25 MB default when unset or invalid.
fn parse_body_limit_from_env() -> usize {
    if let Ok(value) = std::env::var("VERTAAL_MAX_UPLOAD_SIZE_MB") {
        match value.parse::<usize>() {
            Ok(mb) if mb > 0 => {
                tracing::info!("Upload size limit configured from environment: {} MB", mb);
                return mb * 1024 * 1024;
            }
            _ => {
                tracing::warn!(
                    "Failed to parse VERTAAL_MAX_UPLOAD_SIZE_MB='{}', must be a positive integer",
                    value
                );
            }
        }
    }
    DEFAULT_MAX_BODY_BYTES
}

/// API-key gate for every route except the public root.
///
/// Unauthorized requests get a 404 envelope, deliberately not 401.
async fn require_api_key(State(state): State<ApiState>, request: Request, next: Next) -> Response {
    let presented = request
        .headers()
        .get("api-key")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    if state.config.auth.is_registered(presented) {
        next.run(request).await
    } else {
        ApiError(VertaalError::Auth("missing or unrecognized API key".to_string())).into_response()
    }
}

/// Create the API router with the default backends (Watson + Tesseract).
pub fn create_router(config: ServiceConfig) -> Router {
    let translator = Arc::new(WatsonTranslator::new(config.translator.clone()));
    let ocr = Arc::new(TesseractOcr::new());
    create_router_with_backends(config, translator, ocr)
}

/// Create the API router with injected backends.
///
/// This is how tests run the full HTTP surface without a live translation
/// service or OCR binary.
pub fn create_router_with_backends(
    config: ServiceConfig,
    translator: Arc<dyn TranslationBackend>,
    ocr: Arc<dyn OcrBackend>,
) -> Router {
    let state = ApiState {
        config: Arc::new(config),
        translator,
        ocr,
    };

    let protected = Router::new()
        .route("/translate/text", post(translate_text_handler))
        .route("/translate/image", post(translate_image_handler))
        .route("/translate/html", post(translate_html_handler))
        .route("/translate/xtz", post(translate_xtz_handler))
        .layer(middleware::from_fn_with_state(state.clone(), require_api_key));

    Router::new()
        .route("/", get(root_handler))
        .merge(protected)
        .layer(DefaultBodyLimit::max(parse_body_limit_from_env()))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server with config file discovery.
///
/// Searches for `vertaal.toml` in the current and parent directories, then
/// applies environment overrides. A missing translator credential or
/// endpoint is not a startup error; it surfaces on first use.
pub async fn serve(host: impl AsRef<str>, port: u16) -> crate::error::Result<()> {
    let config = match ServiceConfig::discover()? {
        Some(config) => {
            tracing::info!("Loaded service config from discovered file");
            config
        }
        None => {
            tracing::info!("No config file found, using default configuration");
            ServiceConfig::default()
        }
    };

    serve_with_config(host, port, config.with_env_overrides()).await
}

/// Start the API server with an explicit config.
pub async fn serve_with_config(host: impl AsRef<str>, port: u16, config: ServiceConfig) -> crate::error::Result<()> {
    let ip: IpAddr = host
        .as_ref()
        .parse()
        .map_err(|e| VertaalError::validation(format!("Invalid host address: {}", e)))?;

    let addr = SocketAddr::new(ip, port);
    let app = create_router(config);

    tracing::info!("Starting vertaal API server on http://{}:{}", ip, port);

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(VertaalError::Io)?;

    axum::serve(listener, app)
        .await
        .map_err(|e| VertaalError::Other(e.to_string()))?;

    Ok(())
}
