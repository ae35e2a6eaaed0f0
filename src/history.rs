/*!
 * Translation history.
 *
 * A flat JSON list of past batches, newest first, capped so the file does
 * not grow without bound. Unreadable or malformed history is discarded
 * with a warning rather than blocking a new translation.
 */

use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::AppError;

/// Maximum number of entries kept on disk
const MAX_ENTRIES: usize = 100;

/// Characters of source text kept as the entry preview
const PREVIEW_LENGTH: usize = 120;

/// One completed translation batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub source_language: String,
    pub target_language: String,
    pub services: Vec<String>,
    /// Leading fragment of the source text
    pub preview: String,
    /// Joined output per service id
    pub results: HashMap<String, String>,
}

impl HistoryEntry {
    /// Build an entry for a batch that just finished
    pub fn new(
        source_language: &str,
        target_language: &str,
        source_text: &str,
        results: HashMap<String, String>,
    ) -> Self {
        let mut services: Vec<String> = results.keys().cloned().collect();
        services.sort();
        Self {
            timestamp: Utc::now(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
            services,
            preview: make_preview(source_text),
            results,
        }
    }
}

/// Truncate source text to a short preview on a char boundary
fn make_preview(text: &str) -> String {
    let mut preview: String = text.chars().take(PREVIEW_LENGTH).collect();
    if preview.len() < text.len() {
        preview.push('…');
    }
    preview
}

/// Persistent store of past translations
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Load history from a file; missing or malformed files yield an empty store
    pub fn load(path: &Path) -> Self {
        let entries = match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<Vec<HistoryEntry>>(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Discarding malformed history file {}: {}", path.display(), e);
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        Self {
            path: path.to_path_buf(),
            entries,
        }
    }

    /// Prepend an entry, enforce the cap, and write back to disk
    pub fn append(&mut self, entry: HistoryEntry) -> Result<(), AppError> {
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_ENTRIES);
        self.save()
    }

    /// Write the current entries to disk
    pub fn save(&self) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| AppError::Unknown(e.to_string()))?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Entries, newest first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Drop all entries and persist the empty list
    pub fn clear(&mut self) -> Result<(), AppError> {
        self.entries.clear();
        self.save()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
