//! API error mapping.
//!
//! Every pipeline error is recovered at the request boundary into the JSON
//! error envelope `{code, message}`. Auth failures deliberately map to 404
//! rather than 401, so probing clients cannot tell a protected endpoint from
//! a missing one.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::VertaalError;

use super::types::ErrorEnvelope;

/// Wrapper turning a [`VertaalError`] into an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub VertaalError);

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            VertaalError::Auth(_) => StatusCode::NOT_FOUND,
            // Non-standard, kept for compatibility with existing clients.
            VertaalError::Validation { .. } => StatusCode::PAYMENT_REQUIRED,
            VertaalError::Config { .. }
            | VertaalError::Parsing { .. }
            | VertaalError::Upstream { .. }
            | VertaalError::Io(_)
            | VertaalError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match &self.0 {
            // Never reveal that the endpoint exists.
            VertaalError::Auth(_) => "Not found".to_string(),
            VertaalError::Config { .. } => "We cannot proceed at this moment".to_string(),
            VertaalError::Validation { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<VertaalError> for ApiError {
    fn from(error: VertaalError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self.0 {
            VertaalError::Auth(_) => {
                tracing::debug!(error = %self.0, "rejected unauthenticated request")
            }
            VertaalError::Validation { .. } => {
                tracing::debug!(error = %self.0, "rejected invalid request")
            }
            other => tracing::error!(error = %other, "request failed"),
        }

        let envelope = ErrorEnvelope {
            code: status.as_u16(),
            message: self.message(),
        };

        (status, Json(envelope)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_maps_to_404_not_found() {
        let err = ApiError(VertaalError::Auth("bad key".to_string()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Not found");
    }

    #[test]
    fn test_validation_maps_to_402() {
        let err = ApiError(VertaalError::validation("Nothing to translate"));
        assert_eq!(err.status(), StatusCode::PAYMENT_REQUIRED);
        assert_eq!(err.message(), "Nothing to translate");
    }

    #[test]
    fn test_config_maps_to_500_with_generic_message() {
        let err = ApiError(VertaalError::config("endpoint unset"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "We cannot proceed at this moment");
    }

    #[test]
    fn test_upstream_maps_to_500() {
        let err = ApiError(VertaalError::upstream("service down"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_parsing_maps_to_500() {
        let err = ApiError(VertaalError::parsing("bad markup"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
