/*!
 * Tests for configuration loading and validation
 */

use crate::common::{create_temp_dir, create_test_file};
use multitrans::Config;

#[test]
fn test_load_withFullFile_shouldReadNestedServiceBlocks() {
    let dir = create_temp_dir().unwrap();
    let content = r#"{
        "source_language": "en",
        "target_language": "fr",
        "chunk_size": 800,
        "max_workers": 4,
        "selected_services": ["deepl", "google"],
        "services": {
            "deepl": { "api_key": "dk", "plan": "pro" },
            "google": { "api_key": "gk" },
            "anthropic": { "api_key": "ak", "model": "claude-3-opus-20240229" }
        }
    }"#;
    let path = create_test_file(&dir.path().to_path_buf(), "conf.json", content).unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.target_language, "fr");
    assert_eq!(config.services.deepl.plan, "pro");
    assert_eq!(config.services.anthropic.model, "claude-3-opus-20240229");
    // Unmentioned services keep their defaults
    assert!(config.services.yandex.api_key.is_empty());
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_withInvalidJson_shouldFail() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(&dir.path().to_path_buf(), "conf.json", "{ broken").unwrap();
    assert!(Config::load(&path).is_err());
}

#[test]
fn test_validate_withBadLanguageCode_shouldFail() {
    let mut config = Config::default();
    config.target_language = "german".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withEmptyServiceSelection_shouldFail() {
    let mut config = Config::default();
    config.selected_services.clear();
    assert!(config.validate().is_err());
}

#[test]
fn test_boundaryValues_shouldValidate() {
    let mut config = Config::default();
    config.chunk_size = 100;
    config.max_workers = 1;
    assert!(config.validate().is_ok());
    config.chunk_size = 5000;
    config.max_workers = 10;
    assert!(config.validate().is_ok());
}
