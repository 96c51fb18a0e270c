use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable that overrides the configured API key
pub const API_KEY_ENV: &str = "TRANSLATE_API_KEY";

/// Settings for the remote translation service and the demo fallback
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    #[serde(rename = "api_url")]
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(rename = "api_key")]
    #[serde(default)]
    pub api_key: Option<String>,

    /// Pause before a simulated translation is returned, 0 to disable
    #[serde(rename = "fallback_delay_ms")]
    #[serde(default = "default_fallback_delay_ms")]
    pub fallback_delay_ms: u64,

    #[serde(rename = "request_timeout_secs")]
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_api_url() -> String {
    "https://translation.googleapis.com/language/translate/v2".to_string()
}

fn default_fallback_delay_ms() -> u64 {
    1000
}

impl TranslationConfig {
    /// The key to use, preferring the environment over the config file
    pub fn resolved_api_key(&self) -> Option<String> {
        resolve_api_key(self.api_key.as_deref(), std::env::var(API_KEY_ENV).ok())
    }

    pub fn fallback_delay(&self) -> Duration {
        Duration::from_millis(self.fallback_delay_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

fn resolve_api_key(configured: Option<&str>, from_env: Option<String>) -> Option<String> {
    from_env
        .filter(|key| !key.trim().is_empty())
        .or_else(|| configured.map(str::to_string))
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: None,
            fallback_delay_ms: default_fallback_delay_ms(),
            request_timeout_secs: None,
        }
    }
}
