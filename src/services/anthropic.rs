/*!
 * Anthropic Claude translation service (messages API).
 */

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::language_utils::{get_language_name, is_auto};
use crate::services::TranslationService;

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";

const REQUEST_TIMEOUT_SECS: u64 = 120;
const MAX_TOKENS: u32 = 4096;
const SYSTEM_PROMPT: &str = "You are a professional translator. Translate the text exactly, \
preserving meaning, tone, and formatting. Output only the translation with no commentary.";

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

/// Anthropic Claude client
#[derive(Debug)]
pub struct Anthropic {
    client: Client,
    api_key: String,
    model: String,
}

impl Anthropic {
    /// Create a new client; an empty model falls back to the default
    pub fn new(api_key: &str, model: &str) -> Self {
        let model = if model.is_empty() { DEFAULT_MODEL } else { model };
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl TranslationService for Anthropic {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError> {
        if !self.is_configured() {
            return Err(ProviderError::AuthenticationError(
                "Anthropic: no API key configured".to_string(),
            ));
        }

        let target = get_language_name(target_lang).map_err(|e| {
            ProviderError::UnsupportedLanguage(format!("Unknown target language: {}", e))
        })?;
        let prompt = if is_auto(source_lang) {
            format!("Translate the following text into {}:\n\n{}", target, text)
        } else {
            let source = get_language_name(source_lang).map_err(|e| {
                ProviderError::UnsupportedLanguage(format!("Unknown source language: {}", e))
            })?;
            format!(
                "Translate the following text from {} into {}:\n\n{}",
                source, target, text
            )
        };

        debug!("Sending messages request to Anthropic (model {})", self.model);
        let body = json!({
            "model": self.model,
            "max_tokens": MAX_TOKENS,
            "system": SYSTEM_PROMPT,
            "messages": [
                { "role": "user", "content": prompt },
            ],
        });

        let response = self
            .client
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Anthropic request failed: {}", e)))?;

        let status = response.status();
        match status.as_u16() {
            200 => {
                let parsed = response.json::<MessagesResponse>().await.map_err(|e| {
                    ProviderError::ParseError(format!("Anthropic response: {}", e))
                })?;
                let text: String = parsed
                    .content
                    .into_iter()
                    .map(|block| block.text)
                    .collect::<Vec<_>>()
                    .join("");
                if text.is_empty() {
                    return Err(ProviderError::ParseError(
                        "Anthropic returned no text content".to_string(),
                    ));
                }
                Ok(text.trim().to_string())
            }
            401 | 403 => Err(ProviderError::AuthenticationError(
                "Anthropic: invalid API key".to_string(),
            )),
            429 => Err(ProviderError::RateLimitExceeded(
                "Anthropic: rate limit exceeded".to_string(),
            )),
            code => {
                let body = response.text().await.unwrap_or_default();
                Err(ProviderError::ApiError {
                    status_code: code,
                    message: format!("Anthropic API error: {}", body),
                })
            }
        }
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn name(&self) -> String {
        "Anthropic Claude".to_string()
    }
}
