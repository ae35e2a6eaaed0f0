use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// This module provides functions for validating ISO 639-1 (2-letter)
/// language codes, resolving display names for prompts and the UI, and
/// mapping codes to the uppercase identifiers the DeepL API expects.
///
/// The pseudo-code `"auto"` is accepted everywhere a source language is and
/// means "let the provider decide"; it is passed through unchanged.

/// The pseudo language code for provider-side auto-detection
pub const AUTO_LANGUAGE: &str = "auto";

/// Check whether a code is the auto-detection pseudo code
pub fn is_auto(code: &str) -> bool {
    code.trim().eq_ignore_ascii_case(AUTO_LANGUAGE)
}

/// Validate that a language code is `"auto"` or a valid ISO 639-1 code
pub fn validate_language_code(code: &str) -> Result<()> {
    let normalized = code.trim().to_lowercase();
    if normalized == AUTO_LANGUAGE {
        return Ok(());
    }
    if normalized.len() == 2 && Language::from_639_1(&normalized).is_some() {
        return Ok(());
    }
    Err(anyhow!("Invalid language code: {}", code))
}

/// Get the English display name for a language code
///
/// Used when building LLM prompts ("Translate from English to Russian").
/// `"auto"` resolves to a phrase the prompt can embed directly.
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = code.trim().to_lowercase();
    if normalized == AUTO_LANGUAGE {
        return Ok("the source language".to_string());
    }
    Language::from_639_1(&normalized)
        .map(|lang| lang.to_name().to_string())
        .ok_or_else(|| anyhow!("Unknown language code: {}", code))
}

/// Check if two language codes refer to the same language
pub fn language_codes_match(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a == b {
        return true;
    }
    match (Language::from_639_1(&a), Language::from_639_1(&b)) {
        (Some(la), Some(lb)) => la == lb,
        _ => false,
    }
}

/// ISO 639-1 codes DeepL accepts, lowercase
pub const DEEPL_LANGUAGES: &[&str] = &[
    "bg", "cs", "da", "de", "el", "en", "es", "et", "fi", "fr", "hu", "id", "it", "ja", "ko",
    "lt", "lv", "nl", "pl", "pt", "ro", "ru", "sk", "sl", "sv", "tr", "uk", "zh",
];

/// Map an ISO 639-1 code to the uppercase code DeepL expects
///
/// DeepL supports a fixed subset of languages; anything outside it is an
/// unsupported-language error at the provider boundary.
pub fn deepl_code(code: &str) -> Option<&'static str> {
    match code.trim().to_lowercase().as_str() {
        "en" => Some("EN"),
        "ru" => Some("RU"),
        "de" => Some("DE"),
        "fr" => Some("FR"),
        "es" => Some("ES"),
        "it" => Some("IT"),
        "nl" => Some("NL"),
        "pl" => Some("PL"),
        "pt" => Some("PT"),
        "zh" => Some("ZH"),
        "ja" => Some("JA"),
        "ko" => Some("KO"),
        "bg" => Some("BG"),
        "cs" => Some("CS"),
        "da" => Some("DA"),
        "el" => Some("EL"),
        "et" => Some("ET"),
        "fi" => Some("FI"),
        "hu" => Some("HU"),
        "id" => Some("ID"),
        "lt" => Some("LT"),
        "lv" => Some("LV"),
        "ro" => Some("RO"),
        "sk" => Some("SK"),
        "sl" => Some("SL"),
        "sv" => Some("SV"),
        "tr" => Some("TR"),
        "uk" => Some("UK"),
        _ => None,
    }
}
