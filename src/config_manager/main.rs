use serde::{Deserialize, Serialize};
use crate::config_manager::system::SystemConfig;
use crate::config_manager::translation::TranslationConfig;

/// Main configuration for the application, stored as YAML or JSON-LD
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "@context")]
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,

    #[serde(rename = "system_config")]
    #[serde(default)]
    pub system_config: SystemConfig,

    #[serde(rename = "translation_config")]
    #[serde(default)]
    pub translation_config: TranslationConfig,
}

impl Config {
    /// Load configuration from a YAML, JSON or JSON-LD file
    pub fn load(path: &str) -> anyhow::Result<Self> {
        use crate::config_manager::utils::{read_config, validate_config};
        let value = read_config(path)?;
        validate_config(value)
    }
}
