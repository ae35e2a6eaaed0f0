/*!
 * Tests for the persistent translation history
 */

use std::collections::HashMap;

use crate::common::create_temp_dir;
use multitrans::history::{HistoryEntry, HistoryStore};

fn entry_with_services(preview: &str, services: &[&str]) -> HistoryEntry {
    let results: HashMap<String, String> = services
        .iter()
        .map(|s| (s.to_string(), format!("{} output", s)))
        .collect();
    HistoryEntry::new("en", "de", preview, results)
}

#[test]
fn test_append_shouldPersistAcrossReload() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("history.json");

    let mut store = HistoryStore::load(&path);
    store
        .append(entry_with_services("Guten Tag", &["deepl", "google"]))
        .unwrap();

    let reloaded = HistoryStore::load(&path);
    assert_eq!(reloaded.len(), 1);
    let entry = &reloaded.entries()[0];
    assert_eq!(entry.services, vec!["deepl", "google"]);
    assert_eq!(entry.results["google"], "google output");
}

#[test]
fn test_cap_shouldSurviveReload() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("history.json");

    let mut store = HistoryStore::load(&path);
    for i in 0..60 {
        store
            .append(entry_with_services(&format!("batch {}", i), &["deepl"]))
            .unwrap();
    }
    drop(store);

    let mut reloaded = HistoryStore::load(&path);
    for i in 60..120 {
        reloaded
            .append(entry_with_services(&format!("batch {}", i), &["deepl"]))
            .unwrap();
    }
    assert_eq!(reloaded.len(), 100);
    assert_eq!(reloaded.entries()[0].preview, "batch 119");
}

#[test]
fn test_clear_shouldEmptyStoreAndFile() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("history.json");

    let mut store = HistoryStore::load(&path);
    store
        .append(entry_with_services("to be cleared", &["deepl"]))
        .unwrap();
    store.clear().unwrap();

    assert!(store.is_empty());
    assert!(HistoryStore::load(&path).is_empty());
}
