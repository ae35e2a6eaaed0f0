/*!
 * Tests for the sentence-aligned chunker
 */

use crate::common::sample_document;
use multitrans::translation::chunker::{split_sentences, split_text};

#[test]
fn test_splitText_withLargeDocument_shouldRespectSizeBoundForEveryChunk() {
    let text = sample_document(100);
    for size in [100, 250, 1000, 5000] {
        let chunks = split_text(&text, size);
        for chunk in &chunks {
            // No single sentence in the sample exceeds the bound, so every
            // chunk must obey it
            assert!(
                chunk.text.chars().count() <= size,
                "chunk of {} chars exceeds bound {}",
                chunk.text.chars().count(),
                size
            );
        }
    }
}

#[test]
fn test_splitText_shouldNeverSplitMidSentence() {
    let text = sample_document(50);
    let chunks = split_text(&text, 150);
    for chunk in &chunks {
        // Every sentence in the sample ends with a period, so every chunk
        // boundary must land on one
        assert!(
            chunk.text.ends_with('.'),
            "chunk ends mid-sentence: {:?}",
            chunk.text
        );
    }
}

#[test]
fn test_splitText_withLargeDocument_shouldPreserveAllText() {
    let text = sample_document(80);
    let chunks = split_text(&text, 300);
    let rejoined = chunks
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    assert_eq!(rejoined, text);
}

#[test]
fn test_splitText_withWhitespaceOnlyInput_shouldYieldSingleChunk() {
    let chunks = split_text("   \n\t  ", 1000);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].index, 0);
}

#[test]
fn test_splitSentences_withAbbreviatedNumbers_shouldKeepThemTogether() {
    let sentences = split_sentences("Version 2.5 shipped today. It fixes 1.5x slowdowns.");
    assert_eq!(sentences.len(), 2);
    assert!(sentences[0].contains("2.5"));
    assert!(sentences[1].contains("1.5x"));
}

#[test]
fn test_splitSentences_withUnicodeText_shouldSplitOnTerminators() {
    let sentences = split_sentences("Привет мир. Как дела?");
    assert_eq!(sentences, vec!["Привет мир.", "Как дела?"]);
}
