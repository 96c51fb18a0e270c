use std::sync::Arc;
use anyhow::Result;
use tracing::{info, warn};
use crate::config_manager::translation::TranslationConfig;
use super::client::GoogleTranslateClient;
use super::interface::TranslationBackend;
use super::orchestrator::TranslationOrchestrator;

/// Factory for creating the translation backend and orchestrator
pub struct TranslatorFactory;

impl TranslatorFactory {
    /// Create a remote translation client from configuration
    pub fn create_backend(config: &TranslationConfig) -> Result<Arc<dyn TranslationBackend>> {
        info!("Initializing translation client: {}", config.api_url);

        let api_key = config.resolved_api_key();
        if api_key.is_none() {
            warn!("No translation API key configured, every request will use the demo fallback");
        }

        let client = GoogleTranslateClient::new(
            config.api_url.clone(),
            api_key,
            config.request_timeout(),
        )?;

        Ok(Arc::new(client))
    }

    pub fn create_orchestrator(config: &TranslationConfig) -> Result<TranslationOrchestrator> {
        let backend = Self::create_backend(config)?;
        Ok(TranslationOrchestrator::new(backend, config.fallback_delay()))
    }
}
