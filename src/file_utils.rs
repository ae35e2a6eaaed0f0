/*!
 * Document reading and writing.
 *
 * `read_document` dispatches on file extension and returns plain text ready
 * for chunking. Markup formats are reduced to their visible text: HTML tags
 * are stripped, SRT cue numbers and timecodes are dropped, Ren'Py scripts
 * yield only quoted dialogue. Unknown extensions are read as plain text.
 */

use anyhow::{Context, Result};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

static HTML_SCRIPT_STYLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)>").unwrap()
});
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static SRT_TIMECODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{2}:\d{2}:\d{2}[,.]\d{3}\s*-->\s*\d{2}:\d{2}:\d{2}[,.]\d{3}").unwrap()
});
static RENPY_DIALOGUE: Lazy<Regex> = Lazy::new(|| Regex::new(r#""((?:[^"\\]|\\.)*)""#).unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Read a document and extract its translatable text
pub fn read_document(path: &Path) -> Result<String> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let raw = String::from_utf8_lossy(&bytes).into_owned();

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    debug!("Reading {} as .{}", path.display(), extension);

    let text = match extension.as_str() {
        "html" | "htm" => extract_html_text(&raw),
        "srt" => extract_srt_text(&raw),
        "csv" => extract_csv_text(&raw),
        "rpy" => extract_renpy_text(&raw),
        // txt, md and anything else: plain text as-is
        _ => raw,
    };

    Ok(text.trim().to_string())
}

/// Write translated output to a file
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Strip markup from an HTML document, keeping visible text
fn extract_html_text(html: &str) -> String {
    let without_blocks = HTML_SCRIPT_STYLE.replace_all(html, " ");
    let without_tags = HTML_TAG.replace_all(&without_blocks, " ");
    let decoded = without_tags
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");
    WHITESPACE_RUN.replace_all(decoded.trim(), " ").into_owned()
}

/// Keep only the dialogue lines of an SRT subtitle file
fn extract_srt_text(srt: &str) -> String {
    srt.lines()
        .map(str::trim)
        .filter(|line| {
            !line.is_empty()
                && !SRT_TIMECODE.is_match(line)
                && !line.chars().all(|c| c.is_ascii_digit())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Flatten CSV cells into whitespace-separated text
fn extract_csv_text(csv: &str) -> String {
    csv.lines()
        .map(|line| {
            line.split(',')
                .map(|cell| cell.trim().trim_matches('"'))
                .filter(|cell| !cell.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Extract quoted dialogue strings from a Ren'Py script
fn extract_renpy_text(script: &str) -> String {
    script
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .flat_map(|line| {
            RENPY_DIALOGUE
                .captures_iter(line)
                .map(|captures| captures[1].replace("\\\"", "\""))
                .collect::<Vec<_>>()
        })
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
