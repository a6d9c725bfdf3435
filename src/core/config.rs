use std::env;
use std::time::Duration;

use crate::openai::DEFAULT_API_HOSTNAME;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

// Available models (03/2025): gpt-4-turbo, gpt-3.5-turbo-0125,
// gpt-4-turbo-vision, gpt-4-turbo-instruct
pub const DEFAULT_MODEL: &str = "gpt-4-turbo";

const DEFAULT_SPINNER_TICK_MS: u64 = 100;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// `None` when the key is missing or empty. Checked once when the
    /// conversation starts.
    pub openai_api_key: Option<String>,
    pub openai_api_hostname: String,
    pub openai_model: String,
    pub spinner_tick: Duration,
}

impl AppConfig {
    /// Builds the config from any environment-style lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let openai_api_key = lookup(API_KEY_VAR).filter(|k| !k.is_empty());
        let openai_api_hostname =
            lookup("ASKGPT_API_HOST").unwrap_or_else(|| DEFAULT_API_HOSTNAME.to_string());
        let openai_model = lookup("ASKGPT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let spinner_tick_ms = lookup("ASKGPT_SPINNER_TICK_MS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_SPINNER_TICK_MS);

        Self {
            openai_api_key,
            openai_api_hostname,
            openai_model,
            spinner_tick: Duration::from_millis(spinner_tick_ms),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }
}
