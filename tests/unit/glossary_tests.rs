/*!
 * Tests for glossary substitution behavior
 */

use std::collections::HashMap;

use crate::common::{create_temp_dir, create_test_file};
use multitrans::translation::Glossary;

#[test]
fn test_apply_withManyEntries_shouldReplaceAllOccurrences() {
    let mut glossary = Glossary::new();
    glossary.add_entry("cat", "кот").unwrap();
    glossary.add_entry("dog", "пёс").unwrap();
    glossary.set_case_sensitive(true);

    let output = glossary.apply("The cat saw a dog. The dog ignored the cat.");
    assert_eq!(output, "The кот saw a пёс. The пёс ignored the кот.");
}

#[test]
fn test_apply_withOverlappingKeys_shouldPreferLongerKeyEverywhere() {
    let mut glossary = Glossary::new();
    glossary.add_entry("New York", "Нью-Йорк").unwrap();
    glossary.add_entry("York", "Йорк").unwrap();
    glossary.set_case_sensitive(true);

    let output = glossary.apply("From New York to York.");
    assert_eq!(output, "From Нью-Йорк to Йорк.");
}

#[test]
fn test_apply_withCyrillicKey_shouldMatchCaseInsensitively() {
    let mut glossary = Glossary::new();
    glossary.add_entry("привет", "hello").unwrap();
    glossary.set_case_sensitive(false);

    assert_eq!(glossary.apply("ПРИВЕТ мир"), "hello мир");
}

#[test]
fn test_removeEntry_shouldStopSubstitution() {
    let mut glossary = Glossary::new();
    glossary.add_entry("term", "X").unwrap();
    assert!(glossary.remove_entry("term"));
    assert!(!glossary.remove_entry("term"));
    assert_eq!(glossary.apply("term"), "term");
}

#[test]
fn test_exportImport_shouldCarryAllEntries() {
    let mut source = Glossary::new();
    source.add_entry("one", "uno").unwrap();
    source.add_entry("two", "dos").unwrap();

    let mut destination = Glossary::new();
    assert_eq!(destination.import_entries(&source.export_entries()), 2);
    assert_eq!(destination.get_entry("two"), Some("dos"));
}

#[test]
fn test_load_withEmptyJsonObject_shouldBeEmptyGlossary() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(&dir.path().to_path_buf(), "glossary.json", "{}").unwrap();

    let glossary = Glossary::load(&path);
    assert!(glossary.is_empty());
    assert!(!glossary.is_case_sensitive());
}

#[test]
fn test_setEntries_shouldReplaceExistingTable() {
    let mut glossary = Glossary::new();
    glossary.add_entry("old", "X").unwrap();

    let mut replacement = HashMap::new();
    replacement.insert("new".to_string(), "Y".to_string());
    glossary.set_entries(replacement);

    assert!(glossary.get_entry("old").is_none());
    assert_eq!(glossary.get_entry("new"), Some("Y"));
}
