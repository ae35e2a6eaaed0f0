/*!
 * Translation service implementations.
 *
 * This module contains client implementations for the supported translation
 * backends:
 * - DeepL: keyed v2 API with an unauthenticated free-endpoint fallback
 * - Google: Cloud Translation v2 API
 * - Yandex: Cloud Translate v2 API
 * - OpenAI-compatible chat completions (OpenAI, OpenRouter, Groq, LocalAI)
 * - Anthropic: Claude messages API
 *
 * All of them sit behind the `TranslationService` trait, which is the seam
 * the dispatcher depends on; it is indifferent to which backend answers.
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use crate::app_config::Config;
use crate::errors::ProviderError;

pub mod anthropic;
pub mod deepl;
pub mod google;
pub mod mock;
pub mod openai;
pub mod yandex;

/// Common trait for all translation services
///
/// The dispatcher depends only on this three-operation surface. `translate`
/// is a complete request/response exchange; services must map every failure
/// into a `ProviderError` rather than panicking, because the dispatcher
/// absorbs unit errors into the batch output.
#[async_trait]
pub trait TranslationService: Send + Sync + Debug {
    /// Translate text from the source language to the target language
    ///
    /// `source_lang` may be `"auto"`, which is passed through to the
    /// provider's own detection.
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError>;

    /// Whether the service has sufficient credentials (or a working
    /// unauthenticated fallback) to accept requests
    fn is_configured(&self) -> bool;

    /// Human-readable display name
    fn name(&self) -> String;

    /// Supported ISO 639-1 codes; empty means "all languages"
    fn supported_languages(&self) -> Vec<&'static str> {
        Vec::new()
    }
}

/// String-keyed registry of translation services
///
/// Built once from configuration and treated as read-only for the duration
/// of a batch; reloading after a settings change must happen between
/// batches, never concurrently with one.
#[derive(Debug, Default)]
pub struct ServiceRegistry {
    services: HashMap<String, Arc<dyn TranslationService>>,
}

impl ServiceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from application configuration
    ///
    /// Services with an unauthenticated mode (DeepL) are always registered.
    /// Key-only cloud services (Google, Yandex) are registered even without
    /// a key but report unconfigured, so the UI can list them. LLM services
    /// are only registered when a credential (or endpoint) is present.
    pub fn from_config(config: &Config) -> Self {
        let mut registry = Self::new();
        let services = &config.services;

        registry.register(
            "deepl",
            Arc::new(deepl::DeepL::new(
                &services.deepl.api_key,
                services.deepl.plan == "free",
            )),
        );
        registry.register(
            "google",
            Arc::new(google::GoogleTranslate::new(&services.google.api_key)),
        );
        registry.register(
            "yandex",
            Arc::new(yandex::YandexTranslate::new(&services.yandex.api_key)),
        );

        if !services.openai.api_key.is_empty() {
            registry.register(
                "openai",
                Arc::new(openai::OpenAICompatible::openai(
                    &services.openai.api_key,
                    &services.openai.model,
                )),
            );
        }
        if !services.openrouter.api_key.is_empty() {
            registry.register(
                "openrouter",
                Arc::new(openai::OpenAICompatible::openrouter(
                    &services.openrouter.api_key,
                    &services.openrouter.model,
                )),
            );
        }
        if !services.groq.api_key.is_empty() {
            registry.register(
                "groq",
                Arc::new(openai::OpenAICompatible::groq(
                    &services.groq.api_key,
                    &services.groq.model,
                )),
            );
        }
        if !services.anthropic.api_key.is_empty() {
            registry.register(
                "anthropic",
                Arc::new(anthropic::Anthropic::new(
                    &services.anthropic.api_key,
                    &services.anthropic.model,
                )),
            );
        }
        if !services.localai.endpoint.is_empty() {
            registry.register(
                "localai",
                Arc::new(openai::OpenAICompatible::localai(
                    &services.localai.endpoint,
                    &services.localai.model,
                )),
            );
        }

        registry
    }

    /// Register a service under an id, replacing any previous entry
    pub fn register(&mut self, id: &str, service: Arc<dyn TranslationService>) {
        self.services.insert(id.to_string(), service);
    }

    /// Look up a service by id
    pub fn get(&self, id: &str) -> Option<Arc<dyn TranslationService>> {
        self.services.get(id).cloned()
    }

    /// Whether an id is registered
    pub fn contains(&self, id: &str) -> bool {
        self.services.contains_key(id)
    }

    /// All registered service ids, sorted
    pub fn service_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.services.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Ids of services that are ready to accept requests, sorted
    pub fn available_services(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .services
            .iter()
            .filter(|(_, service)| service.is_configured())
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Number of registered services
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
