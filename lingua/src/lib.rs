//! Minimal LibreTranslate-compatible machine translation client.
//!
//! This crate provides a focused client for the `POST /translate` endpoint
//! of a LibreTranslate-style service:
//! - Configurable base URL and optional API key
//! - Request timeouts suitable for load-time batch translation
//! - Typed errors distinguishing network, API, and parse failures

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://libretranslate.com";

/// Errors that can occur when using the translation client.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Translation API client.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl Client {
    /// Create a client against the public LibreTranslate instance.
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .connect_timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
        }
    }

    /// Create a client from `LIBRETRANSLATE_URL` and `LIBRETRANSLATE_API_KEY`.
    ///
    /// Both variables are optional; missing values fall back to the public
    /// instance with no key.
    pub fn from_env() -> Self {
        let mut client = Self::new();
        if let Ok(url) = std::env::var("LIBRETRANSLATE_URL") {
            client.base_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(key) = std::env::var("LIBRETRANSLATE_API_KEY") {
            client.api_key = Some(key);
        }
        client
    }

    /// Point the client at a self-hosted instance.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let url: String = base_url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Set the API key sent with every request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Translate `text` from `source` to `target` (ISO 639-1 codes).
    pub async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, Error> {
        let request = TranslateRequest {
            q: text,
            source,
            target,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let response = self
            .http
            .post(format!("{}/translate", self.base_url))
            .headers(headers)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .json::<ApiError>()
                .await
                .map(|e| e.error)
                .unwrap_or_default();
            return Err(Error::Api { status, message });
        }

        let body: TranslateResponse = response
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))?;

        Ok(body.translated_text)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = TranslateRequest {
            q: "You wake up in a mysterious room.",
            source: "en",
            target: "pt",
            format: "text",
            api_key: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["q"], "You wake up in a mysterious room.");
        assert_eq!(json["source"], "en");
        assert_eq!(json["target"], "pt");
        // No api_key field when unset
        assert!(json.get("api_key").is_none());
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{"translatedText": "Você acorda em um quarto misterioso."}"#;
        let parsed: TranslateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.translated_text,
            "Você acorda em um quarto misterioso."
        );
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = Client::new().with_base_url("http://localhost:5000/");
        assert_eq!(client.base_url, "http://localhost:5000");
    }
}
