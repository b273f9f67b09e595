//! IBM Watson Language Translator backend.
//!
//! Speaks the v3 `/translate` JSON contract: the request carries the text
//! batch plus a `model-id` of the form `<source>-<target>`, authenticated
//! with HTTP basic auth where the username is the literal `apikey`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::TranslatorConfig;
use crate::error::{Result, VertaalError};
use crate::translate::{TranslatedUnit, TranslationBackend};

/// Basic-auth username expected by the Watson endpoint.
const BASIC_AUTH_USER: &str = "apikey";

/// Translation backend talking to a Watson-compatible HTTP endpoint.
#[derive(Debug, Clone)]
pub struct WatsonTranslator {
    config: TranslatorConfig,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    text: &'a [String],
    #[serde(rename = "model-id")]
    model_id: String,
    source: &'a str,
    target: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<TranslatedUnit>,
}

impl WatsonTranslator {
    /// Create a backend from translator settings.
    ///
    /// Missing credential or endpoint is not an error here; it surfaces as a
    /// `Config` error on first use, via [`TranslationBackend::ready`].
    pub fn new(config: TranslatorConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .unwrap_or_default();

        Self { config, client }
    }

    fn credentials(&self) -> Result<(&str, &str)> {
        let url = self
            .config
            .url
            .as_deref()
            .ok_or_else(|| VertaalError::config("translation service endpoint is not set"))?;
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| VertaalError::config("translation service credential is not set"))?;
        Ok((url, api_key))
    }
}

#[async_trait]
impl TranslationBackend for WatsonTranslator {
    fn ready(&self) -> Result<()> {
        self.credentials().map(|_| ())
    }

    async fn translate(&self, texts: &[String], source: &str, target: &str) -> Result<Vec<TranslatedUnit>> {
        let (url, api_key) = self.credentials()?;

        let request = TranslateRequest {
            text: texts,
            model_id: format!("{}-{}", source, target),
            source,
            target,
        };

        let response = self
            .client
            .post(url)
            .basic_auth(BASIC_AUTH_USER, Some(api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| VertaalError::upstream_with_source("translation service unreachable", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, "translation service returned an error");
            return Err(VertaalError::upstream(format!(
                "translation service responded with {}: {}",
                status, body
            )));
        }

        let parsed: TranslateResponse = response
            .json()
            .await
            .map_err(|e| VertaalError::upstream_with_source("invalid translation service response", e))?;

        if parsed.translations.len() < texts.len() {
            return Err(VertaalError::upstream(format!(
                "translation count mismatch: requested {}, received {}",
                texts.len(),
                parsed.translations.len()
            )));
        }

        Ok(parsed.translations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_backend_is_not_ready() {
        let backend = WatsonTranslator::new(TranslatorConfig::default());
        let err = backend.ready().unwrap_err();
        assert!(matches!(err, VertaalError::Config { .. }));
    }

    #[test]
    fn test_missing_credential_is_config_error() {
        let config = TranslatorConfig {
            url: Some("https://translate.example".to_string()),
            ..TranslatorConfig::default()
        };
        let backend = WatsonTranslator::new(config);
        let err = backend.ready().unwrap_err();
        assert!(matches!(err, VertaalError::Config { .. }));
        assert!(err.to_string().contains("credential"));
    }

    #[test]
    fn test_configured_backend_is_ready() {
        let config = TranslatorConfig {
            url: Some("https://translate.example".to_string()),
            api_key: Some("secret".to_string()),
            ..TranslatorConfig::default()
        };
        let backend = WatsonTranslator::new(config);
        assert!(backend.ready().is_ok());
    }

    #[test]
    fn test_request_serialization_uses_model_id() {
        let texts = vec!["Hallo".to_string()];
        let request = TranslateRequest {
            text: &texts,
            model_id: "nl-en".to_string(),
            source: "nl",
            target: "en",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model-id"], "nl-en");
        assert_eq!(json["text"][0], "Hallo");
        assert_eq!(json["source"], "nl");
        assert_eq!(json["target"], "en");
    }

    #[tokio::test]
    async fn test_unconfigured_translate_fails_before_network() {
        let backend = WatsonTranslator::new(TranslatorConfig::default());
        let err = backend
            .translate(&["Hallo".to_string()], "nl", "en")
            .await
            .unwrap_err();
        assert!(matches!(err, VertaalError::Config { .. }));
    }
}
