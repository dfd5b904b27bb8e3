//! DeepL v2 REST client.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use super::Translator;
use crate::Config;

/// Endpoint for free-tier keys; pro keys use `api.deepl.com`, set via
/// the endpoint override.
pub const DEFAULT_ENDPOINT: &str = "https://api-free.deepl.com/v2/translate";

pub struct DeepL {
    api_key: String,
    endpoint: String,
}

impl DeepL {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(api_key: String, endpoint: String) -> Self {
        Self { api_key, endpoint }
    }

    /// Build from process configuration. A missing credential is left
    /// empty here; the pipeline rejects requests before any provider
    /// call is attempted.
    pub fn from_config(config: &Config) -> Self {
        let api_key = config.api_key.clone().unwrap_or_default();
        match &config.endpoint {
            Some(endpoint) => Self::with_endpoint(api_key, endpoint.clone()),
            None => Self::new(api_key),
        }
    }
}

impl Translator for DeepL {
    fn name(&self) -> &str {
        "DeepL"
    }

    fn translate<'a>(
        &'a self,
        text: &'a str,
        target_lang: &'a str,
        client: &'a reqwest::Client,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<String, String>> + Send + 'a>> {
        Box::pin(async move {
            let resp = client
                .post(&self.endpoint)
                .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
                .form(&[("text", text), ("target_lang", target_lang)])
                .timeout(timeout)
                .send()
                .await
                .map_err(|e| e.to_string())?;

            let status = resp.status();
            match status.as_u16() {
                403 => return Err("Authorization failed, check the API key (403)".into()),
                429 => return Err("Rate limited (429)".into()),
                456 => return Err("Translation quota exceeded (456)".into()),
                _ if !status.is_success() => return Err(format!("HTTP {}", status)),
                _ => {}
            }

            let data: serde_json::Value = resp.json().await.map_err(|e| e.to_string())?;
            parse_translation(&data).ok_or_else(|| "malformed provider response".to_string())
        })
    }
}

/// Pull the first translation out of a v2 response body.
fn parse_translation(data: &serde_json::Value) -> Option<String> {
    data["translations"]
        .as_array()?
        .first()?
        .get("text")?
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_a_wellformed_response() {
        let data = json!({
            "translations": [
                { "detected_source_language": "EN", "text": "Bonjour le monde." }
            ]
        });
        assert_eq!(
            parse_translation(&data).as_deref(),
            Some("Bonjour le monde.")
        );
    }

    #[test]
    fn rejects_an_empty_translations_array() {
        let data = json!({ "translations": [] });
        assert!(parse_translation(&data).is_none());
    }

    #[test]
    fn rejects_a_response_without_translations() {
        let data = json!({ "message": "quota exceeded" });
        assert!(parse_translation(&data).is_none());
    }

    #[test]
    fn from_config_applies_the_endpoint_override() {
        let config = Config {
            api_key: Some("key".into()),
            endpoint: Some("https://api.deepl.com/v2/translate".into()),
            ..Config::default()
        };
        let deepl = DeepL::from_config(&config);
        assert_eq!(deepl.endpoint, "https://api.deepl.com/v2/translate");
        assert_eq!(deepl.api_key, "key");
    }
}
