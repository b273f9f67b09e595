//! Translation backends.
//!
//! The pipeline talks to translation services through the
//! [`TranslationBackend`] trait, so the core logic is testable without a
//! live network dependency. The shipped implementation is
//! [`watson::WatsonTranslator`]; tests inject their own backends.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Result;

pub mod watson;

pub use watson::WatsonTranslator;

/// One translated string, in the same position as its input.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TranslatedUnit {
    /// The translated text
    pub translation: String,
}

/// Trait for translation service backends.
///
/// Backends must be thread-safe (`Send + Sync`) so one instance can serve
/// concurrent requests.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Check process-wide configuration before any per-request work.
    ///
    /// A missing credential or endpoint is a `Config` error, distinct from
    /// and checked before any per-request error. The default implementation
    /// reports ready.
    fn ready(&self) -> Result<()> {
        Ok(())
    }

    /// Translate an ordered list of strings.
    ///
    /// The returned list must match `texts` in length and order. Failures
    /// (unreachable service, non-2xx status, short result list) surface as
    /// `Upstream` errors and are never retried.
    async fn translate(&self, texts: &[String], source: &str, target: &str) -> Result<Vec<TranslatedUnit>>;
}
