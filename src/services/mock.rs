/*!
 * Mock translation service for testing.
 *
 * Behaviors cover what dispatcher tests need to provoke:
 * - `MockService::working()` - always succeeds, echoing the input
 * - `MockService::fixed(..)` - always succeeds with a fixed response
 * - `MockService::failing()` - always fails with an API error
 * - `MockService::intermittent(n)` - fails every nth request
 * - `MockService::slow(ms)` - succeeds after a random delay, for
 *   shaking out completion-order assumptions
 */

use async_trait::async_trait;
use rand::Rng;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::services::TranslationService;

/// Behavior mode for the mock service
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Always succeeds, echoing the request
    Working,
    /// Always succeeds with this exact text
    Fixed(String),
    /// Always fails with an API error
    Failing,
    /// Fails every nth request (shared counter across clones)
    Intermittent { fail_every: usize },
    /// Succeeds after a uniformly random delay up to this many milliseconds
    Slow { max_delay_ms: u64 },
}

/// Mock service for testing dispatcher behavior
#[derive(Debug)]
pub struct MockService {
    behavior: MockBehavior,
    configured: bool,
    request_count: Arc<AtomicUsize>,
}

impl MockService {
    /// Create a mock with the given behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            configured: true,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A mock that always succeeds, echoing the input
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// A mock that always returns the given text
    pub fn fixed(text: impl Into<String>) -> Self {
        Self::new(MockBehavior::Fixed(text.into()))
    }

    /// A mock that always fails
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// A mock that fails every `fail_every`th request
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// A mock that sleeps a random duration before answering
    pub fn slow(max_delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { max_delay_ms })
    }

    /// A mock that reports itself as unconfigured
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::working()
        }
    }

    /// Number of translate calls received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }
}

impl Clone for MockService {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior.clone(),
            configured: self.configured,
            request_count: Arc::clone(&self.request_count),
        }
    }
}

#[async_trait]
impl TranslationService for MockService {
    async fn translate(
        &self,
        text: &str,
        _source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Working => Ok(format!("[{}] {}", target_lang, text)),

            MockBehavior::Fixed(response) => Ok(response.clone()),

            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider failure".to_string(),
            }),

            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        status_code: 503,
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                    })
                } else {
                    Ok(format!("[{}] {}", target_lang, text))
                }
            }

            MockBehavior::Slow { max_delay_ms } => {
                let delay = {
                    let mut rng = rand::rng();
                    rng.random_range(0..=*max_delay_ms)
                };
                tokio::time::sleep(Duration::from_millis(delay)).await;
                Ok(format!("[{}] {}", target_lang, text))
            }
        }
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    fn name(&self) -> String {
        "Mock".to_string()
    }
}
