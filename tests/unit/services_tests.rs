/*!
 * Tests for the service registry and trait surface
 */

use std::sync::Arc;

use multitrans::Config;
use multitrans::services::mock::MockService;
use multitrans::services::{ServiceRegistry, TranslationService};

#[test]
fn test_fromConfig_withAllCredentials_shouldRegisterEveryService() {
    let mut config = Config::default();
    config.services.openai.api_key = "sk-a".to_string();
    config.services.openrouter.api_key = "sk-b".to_string();
    config.services.groq.api_key = "sk-c".to_string();
    config.services.anthropic.api_key = "sk-d".to_string();
    config.services.localai.endpoint = "http://localhost:8080/v1".to_string();

    let registry = ServiceRegistry::from_config(&config);
    assert_eq!(
        registry.service_ids(),
        vec![
            "anthropic",
            "deepl",
            "google",
            "groq",
            "localai",
            "openai",
            "openrouter",
            "yandex"
        ]
    );
}

#[test]
fn test_fromConfig_withKeys_shouldMarkCloudServicesConfigured() {
    let mut config = Config::default();
    config.services.google.api_key = "g-key".to_string();
    config.services.yandex.api_key = "y-key".to_string();

    let registry = ServiceRegistry::from_config(&config);
    let available = registry.available_services();
    assert!(available.contains(&"google".to_string()));
    assert!(available.contains(&"yandex".to_string()));
}

#[tokio::test]
async fn test_traitObject_shouldDispatchThroughRegistry() {
    let mut registry = ServiceRegistry::new();
    registry.register("echo", Arc::new(MockService::working()));

    let service = registry.get("echo").unwrap();
    let translated = service.translate("word", "en", "de").await.unwrap();
    assert_eq!(translated, "[de] word");
    assert_eq!(service.name(), "Mock");
}

#[test]
fn test_supportedLanguages_defaultsToAllLanguages() {
    let service = MockService::working();
    assert!(service.supported_languages().is_empty());
}
