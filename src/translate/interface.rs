use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::validation::{self, ValidationError};

/// Source tag asking the remote service to detect the language itself
pub const AUTO_DETECT: &str = "auto";

/// A single validated translation request.
///
/// Only constructible through [`TranslationRequest::new`], so every value
/// holds trimmed, non-empty text within the length limit and a usable
/// language pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    text: String,
    source_lang: String,
    target_lang: String,
}

impl TranslationRequest {
    pub fn new(
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<Self, ValidationError> {
        validation::validate(text, source_lang, target_lang)?;
        Ok(Self {
            text: text.trim().to_string(),
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source_lang(&self) -> &str {
        &self.source_lang
    }

    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }

    pub fn is_auto_detect(&self) -> bool {
        self.source_lang == AUTO_DETECT
    }
}

/// Outcome of a translation, either from the remote service or simulated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub translated_text: String,
    pub is_simulated: bool,
}

impl TranslationResult {
    pub fn remote(translated_text: String) -> Self {
        Self {
            translated_text,
            is_simulated: false,
        }
    }

    pub fn simulated(translated_text: String) -> Self {
        Self {
            translated_text,
            is_simulated: true,
        }
    }
}

/// Failures of a single remote translation call
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),

    #[error("no translation API key configured")]
    MissingCredential,

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

// The request URL carries the API key, so it never ends up in the message
impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        RemoteError::Network(e.without_url())
    }
}

/// A remote translation service.
///
/// Implementations make exactly one attempt per call and keep no state
/// between calls.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Translate `text`; `source_lang` of `None` lets the service detect it
    async fn call(
        &self,
        text: &str,
        source_lang: Option<&str>,
        target_lang: &str,
    ) -> Result<String, RemoteError>;

    /// Whether a credential is available; calls fail fast without one
    fn has_credential(&self) -> bool;
}
