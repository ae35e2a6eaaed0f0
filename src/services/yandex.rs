/*!
 * Yandex Cloud Translate service (v2 API, Api-Key auth).
 */

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::language_utils::is_auto;
use crate::services::TranslationService;

const API_URL: &str = "https://translate.api.cloud.yandex.net/translate/v2/translate";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
}

/// Yandex Translate client
#[derive(Debug)]
pub struct YandexTranslate {
    client: Client,
    api_key: String,
}

impl YandexTranslate {
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
impl TranslationService for YandexTranslate {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError> {
        if !self.is_configured() {
            return Err(ProviderError::AuthenticationError(
                "Yandex Translate: no API key configured".to_string(),
            ));
        }

        let mut body = json!({
            "texts": [text],
            "targetLanguageCode": target_lang,
        });
        if !is_auto(source_lang) {
            body["sourceLanguageCode"] = json!(source_lang);
        }

        let response = self
            .client
            .post(API_URL)
            .header("Authorization", format!("Api-Key {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                ProviderError::RequestFailed(format!("Yandex Translate request failed: {}", e))
            })?;

        let status = response.status();
        match status.as_u16() {
            200 => {
                let parsed = response.json::<TranslateResponse>().await.map_err(|e| {
                    ProviderError::ParseError(format!("Yandex Translate response: {}", e))
                })?;
                parsed
                    .translations
                    .into_iter()
                    .next()
                    .map(|t| t.text)
                    .ok_or_else(|| {
                        ProviderError::ParseError(
                            "Yandex Translate returned no translations".to_string(),
                        )
                    })
            }
            401 | 403 => Err(ProviderError::AuthenticationError(
                "Yandex Translate: invalid or unauthorized API key".to_string(),
            )),
            429 => Err(ProviderError::RateLimitExceeded(
                "Yandex Translate: rate limit exceeded".to_string(),
            )),
            code => {
                let body = response.text().await.unwrap_or_default();
                Err(ProviderError::ApiError {
                    status_code: code,
                    message: format!("Yandex Translate API error: {}", body),
                })
            }
        }
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn name(&self) -> String {
        "Yandex Translate".to_string()
    }
}
