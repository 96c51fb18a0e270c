use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use super::fallback::generate_fallback;
use super::interface::{RemoteError, TranslationBackend, TranslationRequest, TranslationResult};
use super::status::StatusSink;

pub const STATUS_IN_PROGRESS: &str = "Translating...";
pub const STATUS_COMPLETE: &str = "Translation complete";
pub const STATUS_DEMO_COMPLETE: &str = "Demo translation complete";
pub const STATUS_MISSING_KEY: &str = "Please add your translation API key to the configuration";

/// Turns a validated request into a result, degrading to a simulated
/// translation when the remote service fails.
///
/// Remote failures are reported on the status sink and logged, but the caller
/// always receives a result. This hides real outages behind a "demo" success,
/// which is what the widget expects today.
pub struct TranslationOrchestrator {
    backend: Arc<dyn TranslationBackend>,
    fallback_delay: Duration,
}

impl TranslationOrchestrator {
    pub fn new(backend: Arc<dyn TranslationBackend>, fallback_delay: Duration) -> Self {
        Self {
            backend,
            fallback_delay,
        }
    }

    pub fn has_credential(&self) -> bool {
        self.backend.has_credential()
    }

    pub async fn translate(
        &self,
        request: &TranslationRequest,
        status: &dyn StatusSink,
    ) -> TranslationResult {
        status.report(STATUS_IN_PROGRESS, false);

        let source_lang = if request.is_auto_detect() {
            None
        } else {
            Some(request.source_lang())
        };

        match self
            .backend
            .call(request.text(), source_lang, request.target_lang())
            .await
        {
            Ok(translated_text) => {
                info!(
                    "Translated {} -> {}",
                    request.source_lang(),
                    request.target_lang()
                );
                status.report(STATUS_COMPLETE, false);
                TranslationResult::remote(translated_text)
            }
            Err(e) => {
                error!("Translation error: {}", e);
                let message = match e {
                    RemoteError::MissingCredential => STATUS_MISSING_KEY.to_string(),
                    other => format!("Translation failed: {}", other),
                };
                status.report(&message, true);
                self.simulate(request, status).await
            }
        }
    }

    async fn simulate(
        &self,
        request: &TranslationRequest,
        status: &dyn StatusSink,
    ) -> TranslationResult {
        if !self.fallback_delay.is_zero() {
            tokio::time::sleep(self.fallback_delay).await;
        }

        let translated_text = generate_fallback(request);
        status.report(STATUS_DEMO_COMPLETE, false);
        TranslationResult::simulated(translated_text)
    }
}
