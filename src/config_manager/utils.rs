use std::fs;
use std::path::Path;
use anyhow::Result;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config_manager::main::Config;

/// Read a configuration file with environment variable substitution.
///
/// The file is parsed first; `${VAR_NAME}` is then replaced inside string
/// values only, with the variable's value or an empty string when it is
/// unset. Substituted values stay strings whatever they contain. Files ending
/// in `.json` or `.jsonld` are parsed as JSON, everything else as YAML.
pub fn read_config(config_path: &str) -> Result<Value> {
    if !Path::new(config_path).exists() {
        anyhow::bail!("Configuration file not found: {}", config_path);
    }

    let content = load_text_file_with_guess_encoding(config_path)?;
    if content.trim().is_empty() {
        anyhow::bail!("Configuration file is empty: {}", config_path);
    }

    let path_lower = config_path.to_lowercase();
    let mut value: Value = if path_lower.ends_with(".jsonld") || path_lower.ends_with(".json") {
        serde_json::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };

    let pattern = Regex::new(r"\$\{(\w+)\}").unwrap();
    substitute_env_vars(&mut value, &pattern);
    Ok(value)
}

fn substitute_env_vars(value: &mut Value, pattern: &Regex) {
    match value {
        Value::String(text) => {
            if pattern.is_match(text) {
                let replaced = pattern.replace_all(text, |caps: &regex::Captures| {
                    let var_name = &caps[1];
                    std::env::var(var_name).unwrap_or_else(|_| {
                        debug!("Environment variable {} is not set", var_name);
                        String::new()
                    })
                });
                *text = replaced.into_owned();
            }
        }
        Value::Array(items) => {
            for item in items {
                substitute_env_vars(item, pattern);
            }
        }
        Value::Object(map) => {
            for (_, item) in map.iter_mut() {
                substitute_env_vars(item, pattern);
            }
        }
        _ => {}
    }
}

/// Validate configuration data against the Config model
pub fn validate_config(config_data: Value) -> Result<Config> {
    let config: Config = serde_json::from_value(config_data)?;
    Ok(config)
}

/// Load a text file, stripping a BOM and falling back to GBK for non-UTF-8 bytes
pub fn load_text_file_with_guess_encoding(file_path: &str) -> Result<String> {
    let bytes = fs::read(file_path)?;

    let (text, _, had_errors) = encoding_rs::UTF_8.decode(&bytes);
    if !had_errors {
        return Ok(text.into_owned());
    }

    warn!("{} is not valid UTF-8, decoding as GBK", file_path);
    let (text, _, _) = encoding_rs::GBK.decode(&bytes);
    Ok(text.into_owned())
}
