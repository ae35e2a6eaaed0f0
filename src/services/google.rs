/*!
 * Google Cloud Translation service (v2 API, API-key auth).
 */

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::language_utils::is_auto;
use crate::services::TranslationService;

const API_URL: &str = "https://translation.googleapis.com/language/translate/v2";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Google Translate client
#[derive(Debug)]
pub struct GoogleTranslate {
    client: Client,
    api_key: String,
}

impl GoogleTranslate {
    /// Create a new client; an empty key leaves the service unconfigured
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl TranslationService for GoogleTranslate {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError> {
        if !self.is_configured() {
            return Err(ProviderError::AuthenticationError(
                "Google Translate: no API key configured".to_string(),
            ));
        }

        // Omitting "source" asks the API to detect it
        let mut body = json!({
            "q": text,
            "target": target_lang,
            "format": "text",
        });
        if !is_auto(source_lang) {
            body["source"] = json!(source_lang);
        }

        let response = self
            .client
            .post(API_URL)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                ProviderError::RequestFailed(format!("Google Translate request failed: {}", e))
            })?;

        let status = response.status();
        match status.as_u16() {
            200 => {
                let parsed = response.json::<TranslateResponse>().await.map_err(|e| {
                    ProviderError::ParseError(format!("Google Translate response: {}", e))
                })?;
                parsed
                    .data
                    .translations
                    .into_iter()
                    .next()
                    .map(|t| t.translated_text)
                    .ok_or_else(|| {
                        ProviderError::ParseError(
                            "Google Translate returned no translations".to_string(),
                        )
                    })
            }
            401 | 403 => Err(ProviderError::AuthenticationError(
                "Google Translate: invalid or unauthorized API key".to_string(),
            )),
            429 => Err(ProviderError::RateLimitExceeded(
                "Google Translate: rate limit exceeded".to_string(),
            )),
            code => {
                let body = response.text().await.unwrap_or_default();
                Err(ProviderError::ApiError {
                    status_code: code,
                    message: format!("Google Translate API error: {}", body),
                })
            }
        }
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn name(&self) -> String {
        "Google Translate".to_string()
    }
}
