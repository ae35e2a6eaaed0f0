/*!
 * Sentence-aligned text chunking.
 *
 * This module splits an unbounded input string into an ordered list of
 * bounded-size chunks without ever splitting mid-sentence. It is a pure
 * function of its inputs and never fails: when the tokenizer finds no
 * sentence boundaries the whole input becomes a single chunk.
 */

/// An ordered, zero-based-indexed piece of source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Position of this chunk in the source document
    pub index: usize,
    /// The chunk text
    pub text: String,
}

/// Split text into sentences using punctuation boundaries
///
/// A sentence ends at `.`, `!` or `?`, except when a `.` directly follows a
/// digit (decimal points like "3.14" must not split). Any trailing text
/// without a terminator is kept as a final sentence. An input with no
/// detectable sentences is returned whole.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut prev_char: Option<char> = None;

    for ch in text.chars() {
        current.push(ch);
        if matches!(ch, '.' | '!' | '?')
            && current.trim().len() > 1
            && !prev_char.is_some_and(|p| p.is_ascii_digit())
        {
            let trimmed = current.trim();
            if !trimmed.is_empty() {
                sentences.push(trimmed.to_string());
            }
            current.clear();
        }
        prev_char = Some(ch);
    }

    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }

    if sentences.is_empty() {
        sentences.push(text.to_string());
    }

    sentences
}

/// Split text into ordered chunks of at most `max_chunk_size` characters
///
/// Sentences are accumulated greedily into the current chunk, joined by a
/// single space, as long as the joined length stays within the limit. A
/// single sentence longer than the limit becomes its own oversized chunk;
/// it is never split. Empty input yields exactly one empty chunk so that
/// downstream bookkeeping (one result slot per chunk) always holds.
pub fn split_text(text: &str, max_chunk_size: usize) -> Vec<Chunk> {
    let sentences = split_sentences(text);
    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();

    for sentence in &sentences {
        let projected = if current.is_empty() {
            sentence.chars().count()
        } else {
            current.chars().count() + 1 + sentence.chars().count()
        };

        if projected <= max_chunk_size {
            if current.is_empty() {
                current.push_str(sentence);
            } else {
                current.push(' ');
                current.push_str(sentence);
            }
        } else {
            if !current.is_empty() {
                chunks.push(current.trim().to_string());
            }
            current = sentence.clone();
        }
    }

    if !current.trim().is_empty() {
        chunks.push(current.trim().to_string());
    }

    if chunks.is_empty() {
        chunks.push(text.trim().to_string());
    }

    chunks
        .into_iter()
        .enumerate()
        .map(|(index, text)| Chunk { index, text })
        .collect()
}
