// src/config.rs
use std::env;
use std::time::Duration;

const DEFAULT_BIND: &str = "0.0.0.0:8080";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_OPENAI_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;
const PLACEHOLDER_KEY: &str = "your_api_key_here";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_timeout: Duration,
    pub max_upload_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND.to_string(),
            openai_api_key: None,
            openai_model: DEFAULT_MODEL.to_string(),
            openai_timeout: Duration::from_secs(DEFAULT_OPENAI_TIMEOUT_SECS),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Missing or malformed values
    /// fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            bind_address: lookup("HOLOBRAND_BIND").unwrap_or(defaults.bind_address),
            openai_api_key: lookup("OPENAI_API_KEY")
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty() && k != PLACEHOLDER_KEY),
            openai_model: lookup("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            openai_timeout: lookup("OPENAI_TIMEOUT_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.openai_timeout),
            max_upload_bytes: lookup("HOLOBRAND_MAX_UPLOAD_BYTES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_upload_bytes),
        }
    }
}
