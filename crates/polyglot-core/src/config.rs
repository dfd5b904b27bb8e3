//! Process-wide configuration, read once at startup.

use std::env;
use std::time::Duration;

use crate::segment::DEFAULT_MAX_SEGMENT_CHARS;

const API_KEY_VAR: &str = "POLYGLOT_API_KEY";
const TARGET_LANG_VAR: &str = "POLYGLOT_TARGET_LANG";
const ENDPOINT_VAR: &str = "POLYGLOT_API_ENDPOINT";

#[derive(Debug, Clone)]
pub struct Config {
    /// Translation provider credential. Absence is surfaced per
    /// request as a configuration error, not at startup.
    pub api_key: Option<String>,
    /// Fixed target language code for this deployment.
    pub target_lang: String,
    /// Provider endpoint override (e.g. pro-tier DeepL).
    pub endpoint: Option<String>,
    /// Maximum characters submitted to the provider per segment.
    pub max_segment_chars: usize,
    /// Extractions shorter than this (after trimming) are treated as
    /// failed rather than passed downstream.
    pub min_text_chars: usize,
    /// Per-call provider timeout.
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            target_lang: "EN".to_string(),
            endpoint: None,
            max_segment_chars: DEFAULT_MAX_SEGMENT_CHARS,
            min_text_chars: 10,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    /// Read configuration from the environment. Binaries call
    /// `dotenvy::dotenv()` first so a local `.env` file works too.
    pub fn from_env() -> Self {
        let mut config = Config::default();
        if let Ok(key) = env::var(API_KEY_VAR)
            && !key.is_empty()
        {
            config.api_key = Some(key);
        }
        if let Ok(lang) = env::var(TARGET_LANG_VAR)
            && !lang.is_empty()
        {
            config.target_lang = lang.to_uppercase();
        }
        if let Ok(endpoint) = env::var(ENDPOINT_VAR)
            && !endpoint.is_empty()
        {
            config.endpoint = Some(endpoint);
        }
        config
    }

    /// Convenience for tests and embedding.
    pub fn with_api_key(key: impl Into<String>) -> Self {
        Self {
            api_key: Some(key.into()),
            ..Self::default()
        }
    }
}
