use std::sync::Arc;
use dashmap::DashMap;
use serde::Serialize;
use uuid::Uuid;

use crate::config_manager::Config;
use crate::translate::{TranslationOrchestrator, TranslatorFactory, AUTO_DETECT};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub orchestrator: Arc<TranslationOrchestrator>,
    pub sessions: Arc<DashMap<String, WidgetSession>>,
}

/// What one connected widget currently shows in its two panes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetSession {
    pub source_lang: String,
    pub target_lang: String,
    pub source_text: String,
    pub translated_text: String,
}

impl Default for WidgetSession {
    fn default() -> Self {
        Self {
            source_lang: AUTO_DETECT.to_string(),
            target_lang: "en".to_string(),
            source_text: String::new(),
            translated_text: String::new(),
        }
    }
}

impl WidgetSession {
    /// Exchange the language selections, and the pane contents when a
    /// translation is showing
    pub fn swap_languages(&mut self) {
        std::mem::swap(&mut self.source_lang, &mut self.target_lang);

        if !self.translated_text.is_empty() {
            std::mem::swap(&mut self.source_text, &mut self.translated_text);
        }
    }
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let orchestrator = TranslatorFactory::create_orchestrator(&config.translation_config)?;
        Ok(Self::with_orchestrator(config, orchestrator))
    }

    pub fn with_orchestrator(config: Config, orchestrator: TranslationOrchestrator) -> Self {
        Self {
            config,
            orchestrator: Arc::new(orchestrator),
            sessions: Arc::new(DashMap::new()),
        }
    }

    pub fn generate_client_uid(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_without_translation_keeps_text() {
        let mut session = WidgetSession {
            source_lang: "en".to_string(),
            target_lang: "fr".to_string(),
            source_text: "Hello".to_string(),
            translated_text: String::new(),
        };
        session.swap_languages();

        assert_eq!(session.source_lang, "fr");
        assert_eq!(session.target_lang, "en");
        assert_eq!(session.source_text, "Hello");
        assert!(session.translated_text.is_empty());
    }

    #[test]
    fn swap_with_translation_exchanges_panes() {
        let mut session = WidgetSession {
            source_lang: "en".to_string(),
            target_lang: "es".to_string(),
            source_text: "Hello".to_string(),
            translated_text: "Hola".to_string(),
        };
        session.swap_languages();

        assert_eq!(session.source_lang, "es");
        assert_eq!(session.target_lang, "en");
        assert_eq!(session.source_text, "Hola");
        assert_eq!(session.translated_text, "Hello");
    }

    #[test]
    fn swapping_auto_moves_it_to_target() {
        let mut session = WidgetSession::default();
        session.swap_languages();
        assert_eq!(session.source_lang, "en");
        assert_eq!(session.target_lang, AUTO_DETECT);
    }

    #[tokio::test]
    async fn client_uids_are_unique() {
        let state = AppState::new(Config::default()).await.unwrap();
        assert_ne!(state.generate_client_uid(), state.generate_client_uid());
    }
}
