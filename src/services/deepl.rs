/*!
 * DeepL translation service.
 *
 * Two paths: the official keyed v2 API (free or pro plan URL), and an
 * unauthenticated JSON-RPC endpoint used when no key is configured or when
 * the keyed call fails transiently. Authentication and unsupported-language
 * failures of the keyed call are surfaced, not papered over by the
 * fallback: a malformed key is a configuration mistake the user must see.
 *
 * The unauthenticated endpoint is aggressively rate limited upstream, so
 * all requests to it across the whole process funnel through one shared
 * `RateGate` enforcing a minimum inter-request interval. This is
 * intentional process-lifetime shared state, constructed once and handed
 * to every client by reference.
 */

use async_trait::async_trait;
use log::warn;
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::errors::ProviderError;
use crate::language_utils::{DEEPL_LANGUAGES, deepl_code, is_auto};
use crate::services::TranslationService;
use crate::translation::chunker::split_sentences;

const FREE_API_URL: &str = "https://api-free.deepl.com/v2/translate";
const PRO_API_URL: &str = "https://api.deepl.com/v2/translate";
const UNOFFICIAL_API_URL: &str = "https://www2.deepl.com/jsonrpc";

const REQUEST_TIMEOUT_SECS: u64 = 30;
const FREE_MIN_REQUEST_INTERVAL: Duration = Duration::from_secs(1);
const FREE_MAX_RETRIES: u32 = 3;
const FREE_BACKOFF_BASE_MS: u64 = 2_000;

/// Minimum-interval gate for the unauthenticated endpoint
///
/// Callers `wait()` before each request; the gate sleeps as needed so
/// consecutive requests are at least `min_interval` apart, process-wide.
#[derive(Debug)]
pub struct RateGate {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateGate {
    /// Create a gate with the given minimum inter-request interval
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    /// Block until the interval since the previous request has elapsed,
    /// then claim the current slot
    pub async fn wait(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

// One gate for the whole process; every DeepL client shares it so the
// dispatcher's worker pool cannot multiply the free-endpoint request rate.
static FREE_RATE_GATE: Lazy<Arc<RateGate>> =
    Lazy::new(|| Arc::new(RateGate::new(FREE_MIN_REQUEST_INTERVAL)));

/// Keyed v2 API response
#[derive(Debug, Deserialize)]
struct KeyedResponse {
    translations: Vec<KeyedTranslation>,
}

#[derive(Debug, Deserialize)]
struct KeyedTranslation {
    text: String,
}

/// Unauthenticated JSON-RPC response
#[derive(Debug, Deserialize)]
struct FreeResponse {
    result: Option<FreeResult>,
}

#[derive(Debug, Deserialize)]
struct FreeResult {
    #[serde(default)]
    translations: Vec<FreeTranslation>,
}

#[derive(Debug, Deserialize)]
struct FreeTranslation {
    #[serde(default)]
    beams: Vec<FreeBeam>,
}

#[derive(Debug, Deserialize)]
struct FreeBeam {
    #[serde(default)]
    postprocessed_sentence: String,
}

/// DeepL client
#[derive(Debug)]
pub struct DeepL {
    client: Client,
    api_key: String,
    is_free_plan: bool,
    rate_gate: Arc<RateGate>,
}

impl DeepL {
    /// Create a new DeepL client; an empty key means free-endpoint only
    pub fn new(api_key: impl Into<String>, is_free_plan: bool) -> Self {
        Self::with_rate_gate(api_key, is_free_plan, Arc::clone(&FREE_RATE_GATE))
    }

    /// Create a client with an explicit rate gate (tests use a looser one)
    pub fn with_rate_gate(
        api_key: impl Into<String>,
        is_free_plan: bool,
        rate_gate: Arc<RateGate>,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            is_free_plan,
            rate_gate,
        }
    }

    /// Resolve the target language or fail as unsupported
    fn target_code(target_lang: &str) -> Result<&'static str, ProviderError> {
        deepl_code(target_lang).ok_or_else(|| {
            ProviderError::UnsupportedLanguage(format!(
                "DeepL does not support target language: {}",
                target_lang
            ))
        })
    }

    /// Translate via the official keyed API
    async fn translate_keyed(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError> {
        let target = Self::target_code(target_lang)?;
        let url = if self.is_free_plan { FREE_API_URL } else { PRO_API_URL };

        let mut params: Vec<(&str, &str)> = vec![
            ("auth_key", self.api_key.as_str()),
            ("text", text),
            ("target_lang", target),
            ("preserve_formatting", "1"),
        ];
        let source = if is_auto(source_lang) { None } else { deepl_code(source_lang) };
        if let Some(source) = source {
            params.push(("source_lang", source));
        }

        let response = self
            .client
            .post(url)
            .form(&params)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("DeepL API request failed: {}", e)))?;

        let status = response.status();
        match status.as_u16() {
            200 => {
                let parsed = response.json::<KeyedResponse>().await.map_err(|e| {
                    ProviderError::ParseError(format!("DeepL response: {}", e))
                })?;
                parsed
                    .translations
                    .into_iter()
                    .next()
                    .map(|t| t.text)
                    .ok_or_else(|| {
                        ProviderError::ParseError("DeepL returned no translations".to_string())
                    })
            }
            456 => Err(ProviderError::QuotaExceeded(
                "DeepL: quota exceeded for this account".to_string(),
            )),
            403 => Err(ProviderError::AuthenticationError(
                "DeepL: invalid API key".to_string(),
            )),
            429 => Err(ProviderError::RateLimitExceeded(
                "DeepL: too many requests".to_string(),
            )),
            code => {
                let body = response.text().await.unwrap_or_default();
                Err(ProviderError::ApiError {
                    status_code: code,
                    message: format!("DeepL API error: {}", body),
                })
            }
        }
    }

    /// Translate via the unauthenticated JSON-RPC endpoint
    async fn translate_free(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError> {
        let target = Self::target_code(target_lang)?;
        let source = if is_auto(source_lang) {
            "auto"
        } else {
            deepl_code(source_lang).unwrap_or("auto")
        };

        let sentences = split_sentences(text);
        let jobs: Vec<serde_json::Value> = sentences
            .iter()
            .map(|sentence| json!({ "kind": "default", "raw_en_sentence": sentence }))
            .collect();

        // The endpoint validates that the timestamp is aligned to the count
        // of 'i' characters in the submitted text.
        let mut timestamp = chrono::Utc::now().timestamp_millis();
        let i_count: i64 = sentences
            .iter()
            .map(|s| s.matches('i').count() as i64)
            .sum();
        if i_count > 0 {
            timestamp += i_count - timestamp % i_count;
        }

        let payload = json!({
            "jsonrpc": "2.0",
            "method": "LMT_handle_jobs",
            "id": 1,
            "params": {
                "jobs": jobs,
                "lang": {
                    "user_preferred_langs": ["EN", target],
                    "source_lang_user_selected": source,
                    "target_lang": target,
                },
                "priority": 1,
                "timestamp": timestamp,
            },
        });

        let mut last_error =
            ProviderError::RequestFailed("DeepL free API: no attempts made".to_string());

        for attempt in 0..=FREE_MAX_RETRIES {
            self.rate_gate.wait().await;

            let response = match self
                .client
                .post(UNOFFICIAL_API_URL)
                .header("User-Agent", "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
                .json(&payload)
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    last_error = ProviderError::RequestFailed(format!(
                        "DeepL free API request failed: {}",
                        e
                    ));
                    if attempt < FREE_MAX_RETRIES {
                        let backoff = FREE_BACKOFF_BASE_MS * (1 << attempt);
                        tokio::time::sleep(Duration::from_millis(backoff)).await;
                        continue;
                    }
                    break;
                }
            };

            let status = response.status().as_u16();
            if status == 200 {
                let parsed = response.json::<FreeResponse>().await.map_err(|e| {
                    ProviderError::ParseError(format!("DeepL free API response: {}", e))
                })?;
                let translations = parsed
                    .result
                    .map(|r| r.translations)
                    .filter(|t| !t.is_empty())
                    .ok_or_else(|| {
                        ProviderError::ParseError(
                            "Unexpected response format from DeepL free API".to_string(),
                        )
                    })?;
                let pieces: Vec<String> = translations
                    .into_iter()
                    .filter_map(|t| t.beams.into_iter().next())
                    .map(|beam| beam.postprocessed_sentence)
                    .collect();
                return Ok(pieces.join(" "));
            }

            if status == 429 {
                last_error = ProviderError::RateLimitExceeded(
                    "DeepL free API rate limit exceeded; try again later or use an API key"
                        .to_string(),
                );
                if attempt < FREE_MAX_RETRIES {
                    let backoff = FREE_BACKOFF_BASE_MS * (1 << attempt);
                    tokio::time::sleep(Duration::from_millis(backoff)).await;
                    continue;
                }
                break;
            }

            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status_code: status,
                message: format!("DeepL free API error: {}", body),
            });
        }

        Err(last_error)
    }
}

#[async_trait]
impl TranslationService for DeepL {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError> {
        if !self.api_key.is_empty() {
            match self.translate_keyed(text, source_lang, target_lang).await {
                Ok(translated) => return Ok(translated),
                Err(e) if e.is_transient() => {
                    warn!("DeepL keyed call failed ({}), falling back to free endpoint", e);
                }
                Err(e) => return Err(e),
            }
        }
        self.translate_free(text, source_lang, target_lang).await
    }

    fn is_configured(&self) -> bool {
        // The unauthenticated endpoint works without credentials
        true
    }

    fn name(&self) -> String {
        if self.api_key.is_empty() {
            "DeepL (Free)".to_string()
        } else {
            "DeepL".to_string()
        }
    }

    fn supported_languages(&self) -> Vec<&'static str> {
        DEEPL_LANGUAGES.to_vec()
    }
}
