/*!
 * OpenAI-compatible chat completions client.
 *
 * One client covers every backend that speaks the chat completions wire
 * format: OpenAI itself, OpenRouter, Groq, and self-hosted LocalAI
 * deployments. The constructors differ only in base URL, default model,
 * and the extra headers some gateways want.
 */

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::language_utils::{get_language_name, is_auto};
use crate::services::TranslationService;

const OPENAI_API_URL: &str = "https://api.openai.com/v1";
const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1";
const GROQ_API_URL: &str = "https://api.groq.com/openai/v1";

const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_OPENROUTER_MODEL: &str = "openai/gpt-3.5-turbo";
const DEFAULT_GROQ_MODEL: &str = "mixtral-8x7b-32768";
const DEFAULT_LOCALAI_MODEL: &str = "default";

const REQUEST_TIMEOUT_SECS: u64 = 120;
const SYSTEM_PROMPT: &str = "You are a professional translator. Translate the text exactly, \
preserving meaning, tone, and formatting. Output only the translation with no commentary.";

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// Which backend flavor this client targets; affects display name and
/// gateway-specific headers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flavor {
    OpenAI,
    OpenRouter,
    Groq,
    LocalAI,
}

/// Chat-completions translation client
#[derive(Debug)]
pub struct OpenAICompatible {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    flavor: Flavor,
}

impl OpenAICompatible {
    fn build(base_url: &str, api_key: &str, model: &str, default_model: &str, flavor: Flavor) -> Self {
        let model = if model.is_empty() { default_model } else { model };
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            flavor,
        }
    }

    /// Client for the OpenAI API
    pub fn openai(api_key: &str, model: &str) -> Self {
        Self::build(OPENAI_API_URL, api_key, model, DEFAULT_OPENAI_MODEL, Flavor::OpenAI)
    }

    /// Client for the OpenRouter gateway
    pub fn openrouter(api_key: &str, model: &str) -> Self {
        Self::build(
            OPENROUTER_API_URL,
            api_key,
            model,
            DEFAULT_OPENROUTER_MODEL,
            Flavor::OpenRouter,
        )
    }

    /// Client for the Groq API
    pub fn groq(api_key: &str, model: &str) -> Self {
        Self::build(GROQ_API_URL, api_key, model, DEFAULT_GROQ_MODEL, Flavor::Groq)
    }

    /// Client for a self-hosted LocalAI endpoint; no key required
    pub fn localai(endpoint: &str, model: &str) -> Self {
        Self::build(endpoint, "", model, DEFAULT_LOCALAI_MODEL, Flavor::LocalAI)
    }

    /// Build the translation instruction for the chat request
    fn build_prompt(text: &str, source_lang: &str, target_lang: &str) -> Result<String, ProviderError> {
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
        Ok(prompt)
    }
}

#[async_trait]
impl TranslationService for OpenAICompatible {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError> {
        if !self.is_configured() {
            return Err(ProviderError::AuthenticationError(format!(
                "{}: not configured",
                self.name()
            )));
        }

        let prompt = Self::build_prompt(text, source_lang, target_lang)?;
        let url = format!("{}/chat/completions", self.base_url);
        debug!("Sending chat completion request to {} (model {})", url, self.model);

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt },
            ],
            "temperature": 0.3,
        });

        let mut request = self.client.post(&url).json(&body);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }
        if self.flavor == Flavor::OpenRouter {
            // OpenRouter asks clients to identify themselves
            request = request
                .header("HTTP-Referer", "https://github.com/multitrans")
                .header("X-Title", "multitrans");
        }

        let response = request.send().await.map_err(|e| {
            ProviderError::RequestFailed(format!("{} request failed: {}", self.name(), e))
        })?;

        let status = response.status();
        match status.as_u16() {
            200 => {
                let parsed = response.json::<ChatResponse>().await.map_err(|e| {
                    ProviderError::ParseError(format!("{} response: {}", self.name(), e))
                })?;
                parsed
                    .choices
                    .into_iter()
                    .next()
                    .map(|choice| choice.message.content.trim().to_string())
                    .ok_or_else(|| {
                        ProviderError::ParseError(format!("{} returned no choices", self.name()))
                    })
            }
            401 | 403 => Err(ProviderError::AuthenticationError(format!(
                "{}: invalid API key",
                self.name()
            ))),
            429 => Err(ProviderError::RateLimitExceeded(format!(
                "{}: rate limit exceeded",
                self.name()
            ))),
            code => {
                let body = response.text().await.unwrap_or_default();
                Err(ProviderError::ApiError {
                    status_code: code,
                    message: format!("{} API error: {}", self.name(), body),
                })
            }
        }
    }

    fn is_configured(&self) -> bool {
        match self.flavor {
            // LocalAI needs a reachable endpoint, not a key
            Flavor::LocalAI => Url::parse(&self.base_url).is_ok(),
            _ => !self.api_key.is_empty(),
        }
    }

    fn name(&self) -> String {
        match self.flavor {
            Flavor::OpenAI => "OpenAI".to_string(),
            Flavor::OpenRouter => "OpenRouter".to_string(),
            Flavor::Groq => "Groq".to_string(),
            Flavor::LocalAI => "LocalAI".to_string(),
        }
    }
}
