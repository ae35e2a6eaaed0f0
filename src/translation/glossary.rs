/*!
 * Glossary of user-defined term replacements.
 *
 * The glossary is applied to translated text as a deterministic
 * post-processing pass: entries are applied longest-original-first so a term
 * that is a substring of a longer term's key is never partially mangled.
 * Matching honors a case-sensitivity flag; case-insensitive matches insert
 * the replacement with its own casing.
 *
 * Persistence is a small JSON file. A legacy format holding a bare map of
 * entries (no wrapper object) is still read; a malformed file degrades to an
 * empty glossary rather than failing the application.
 */

use anyhow::{Result, anyhow};
use log::warn;
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Serialized glossary file format
///
/// Unknown fields are rejected so a legacy bare-map file falls through to
/// the map parse below instead of silently loading as empty.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct GlossaryFile {
    #[serde(default)]
    entries: HashMap<String, String>,
    #[serde(default)]
    case_sensitive: bool,
}

/// A user-defined term-substitution table applied after translation
#[derive(Debug, Clone, Default)]
pub struct Glossary {
    entries: HashMap<String, String>,
    case_sensitive: bool,
}

impl Glossary {
    /// Create an empty glossary
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a glossary from a JSON file
    ///
    /// A missing or malformed file yields an empty glossary; persistence
    /// faults must never block translation.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::new();
        }

        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Could not read glossary file {:?}: {}", path, e);
                return Self::new();
            }
        };

        if let Ok(file) = serde_json::from_str::<GlossaryFile>(&raw) {
            return Self {
                entries: file.entries,
                case_sensitive: file.case_sensitive,
            };
        }

        // Legacy format: a bare map of original -> replacement
        if let Ok(entries) = serde_json::from_str::<HashMap<String, String>>(&raw) {
            return Self {
                entries,
                case_sensitive: false,
            };
        }

        warn!("Glossary file {:?} is malformed, starting empty", path);
        Self::new()
    }

    /// Save the glossary to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = GlossaryFile {
            entries: self.entries.clone(),
            case_sensitive: self.case_sensitive,
        };
        let json = serde_json::to_string_pretty(&file)?;
        fs::write(path.as_ref(), json)
            .map_err(|e| anyhow!("Failed to save glossary: {}", e))
    }

    /// Add or update an entry; both sides must be non-empty
    pub fn add_entry(&mut self, original: &str, replacement: &str) -> Result<()> {
        if original.is_empty() || replacement.is_empty() {
            return Err(anyhow!("Both original and replacement must be non-empty"));
        }
        self.entries
            .insert(original.to_string(), replacement.to_string());
        Ok(())
    }

    /// Remove an entry, returning whether it existed
    pub fn remove_entry(&mut self, original: &str) -> bool {
        self.entries.remove(original).is_some()
    }

    /// Look up the replacement for a term
    pub fn get_entry(&self, original: &str) -> Option<&str> {
        self.entries.get(original).map(String::as_str)
    }

    /// Replace all entries at once
    pub fn set_entries(&mut self, entries: HashMap<String, String>) {
        self.entries = entries;
    }

    /// Import entries from a map, skipping empty keys or values
    pub fn import_entries(&mut self, entries: &HashMap<String, String>) -> usize {
        let mut count = 0;
        for (original, replacement) in entries {
            if !original.is_empty() && !replacement.is_empty() {
                self.entries
                    .insert(original.clone(), replacement.clone());
                count += 1;
            }
        }
        count
    }

    /// Export entries as a map
    pub fn export_entries(&self) -> HashMap<String, String> {
        self.entries.clone()
    }

    /// Remove all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the glossary has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether matching is case-sensitive
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Set case sensitivity for matching
    pub fn set_case_sensitive(&mut self, value: bool) {
        self.case_sensitive = value;
    }

    /// Apply all replacements to a block of text
    ///
    /// Entries are sorted by descending key length so "testing" -> "Y" wins
    /// over "test" -> "X" when both could match.
    pub fn apply(&self, text: &str) -> String {
        if self.entries.is_empty() {
            return text.to_string();
        }

        // Equal-length keys tie-break lexicographically so overlapping
        // entries substitute the same way on every run.
        let mut sorted: Vec<(&String, &String)> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(b.0)));

        let mut result = text.to_string();
        for (original, replacement) in sorted {
            if self.case_sensitive {
                result = result.replace(original.as_str(), replacement);
            } else {
                match RegexBuilder::new(&regex::escape(original))
                    .case_insensitive(true)
                    .build()
                {
                    Ok(pattern) => {
                        result = pattern
                            .replace_all(&result, regex::NoExpand(replacement))
                            .into_owned();
                    }
                    Err(e) => {
                        // Escaped literals should always compile; keep going
                        warn!("Skipping glossary entry '{}': {}", original, e);
                    }
                }
            }
        }

        result
    }
}
