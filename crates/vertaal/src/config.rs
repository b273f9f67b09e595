//! Configuration loading and management.
//!
//! Process-wide configuration is read once at startup and treated as
//! read-only afterwards. It can be loaded from a TOML file, discovered in
//! the directory hierarchy, or overridden from environment variables.
//!
//! A missing translator credential or endpoint is deliberately NOT a startup
//! error: it surfaces as a `Config` error on the first request that needs
//! the translator.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, VertaalError};

/// Default request timeout against the translation service, in seconds.
const DEFAULT_TRANSLATOR_TIMEOUT_SECONDS: u64 = 30;

/// Main service configuration.
///
/// # Example
///
/// ```rust
/// use vertaal::config::ServiceConfig;
///
/// // Create with defaults
/// let config = ServiceConfig::default();
///
/// // Load from TOML file
/// // let config = ServiceConfig::from_toml_file("vertaal.toml")?;
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Translation service settings
    #[serde(default)]
    pub translator: TranslatorConfig,

    /// API-key allow-list for the HTTP surface
    #[serde(default)]
    pub auth: AuthConfig,

    /// Markup pipeline settings
    #[serde(default)]
    pub markup: MarkupConfig,
}

/// Translation service settings.
///
/// `url` and `api_key` are both required before the first translation call;
/// their absence is a `Config` error checked before any per-request error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Translation service endpoint URL
    #[serde(default)]
    pub url: Option<String>,

    /// Translation service credential
    #[serde(default)]
    pub api_key: Option<String>,

    /// Source locale for translation requests
    #[serde(default = "default_source_lang")]
    pub source_lang: String,

    /// Target locale for translation requests
    #[serde(default = "default_target_lang")]
    pub target_lang: String,

    /// Timeout for a single translation request, in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            source_lang: default_source_lang(),
            target_lang: default_target_lang(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// API-key allow-list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Keys accepted in the `api-key` request header
    #[serde(default)]
    pub registered_keys: Vec<String>,
}

impl AuthConfig {
    /// Whether the given key is in the allow-list.
    pub fn is_registered(&self, key: &str) -> bool {
        self.registered_keys.iter().any(|k| k == key)
    }
}

/// Markup pipeline settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarkupConfig {
    /// Reproduce the original single-flag opacity tracking, where any close
    /// tag clears the opaque state regardless of nesting. Off by default;
    /// the scoped stack-based rule is used instead.
    #[serde(default)]
    pub legacy_opacity: bool,
}

fn default_source_lang() -> String {
    "nl".to_string()
}

fn default_target_lang() -> String {
    "en".to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TRANSLATOR_TIMEOUT_SECONDS
}

impl ServiceConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(VertaalError::Io)?;
        let config: ServiceConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Discover a `vertaal.toml` in the current directory or any parent.
    ///
    /// Returns `Ok(None)` when no config file exists; callers fall back to
    /// defaults plus environment overrides.
    pub fn discover() -> Result<Option<Self>> {
        let mut current = std::env::current_dir().map_err(VertaalError::Io)?;

        loop {
            let vertaal_toml = current.join("vertaal.toml");
            if vertaal_toml.exists() {
                return Ok(Some(Self::from_toml_file(vertaal_toml)?));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }

    /// Apply environment variable overrides on top of this configuration.
    ///
    /// Recognized variables:
    ///
    /// - `VERTAAL_TRANSLATOR_URL`
    /// - `VERTAAL_TRANSLATOR_API_KEY`
    /// - `VERTAAL_SOURCE_LANG` / `VERTAAL_TARGET_LANG`
    /// - `VERTAAL_REGISTERED_KEYS` (comma-separated)
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("VERTAAL_TRANSLATOR_URL")
            && !url.is_empty()
        {
            self.translator.url = Some(url);
        }
        if let Ok(key) = std::env::var("VERTAAL_TRANSLATOR_API_KEY")
            && !key.is_empty()
        {
            self.translator.api_key = Some(key);
        }
        if let Ok(lang) = std::env::var("VERTAAL_SOURCE_LANG")
            && !lang.is_empty()
        {
            self.translator.source_lang = lang;
        }
        if let Ok(lang) = std::env::var("VERTAAL_TARGET_LANG")
            && !lang.is_empty()
        {
            self.translator.target_lang = lang;
        }
        if let Ok(keys) = std::env::var("VERTAAL_REGISTERED_KEYS") {
            let keys: Vec<String> = keys
                .split(',')
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect();
            if !keys.is_empty() {
                self.auth.registered_keys = keys;
            }
        }
        self
    }
}
