/*!
 * Tests for document reading and text extraction
 */

use crate::common::{create_temp_dir, create_test_file};
use multitrans::file_utils::read_document;

#[test]
fn test_readDocument_withMarkdown_shouldKeepContentVerbatim() {
    let dir = create_temp_dir().unwrap();
    let content = "# Title\n\nSome *emphasized* text.";
    let path = create_test_file(&dir.path().to_path_buf(), "doc.md", content).unwrap();

    assert_eq!(read_document(&path).unwrap(), content);
}

#[test]
fn test_readDocument_withNestedHtml_shouldDropScriptsAndTags() {
    let dir = create_temp_dir().unwrap();
    let content = "<div><script>var x = '<p>not text</p>';</script>\
                   <p>First.</p><p>Second.</p></div>";
    let path = create_test_file(&dir.path().to_path_buf(), "doc.html", content).unwrap();

    assert_eq!(read_document(&path).unwrap(), "First. Second.");
}

#[test]
fn test_readDocument_withSrtUsingDotTimecodes_shouldStillDropThem() {
    let dir = create_temp_dir().unwrap();
    let content = "1\n00:00:01.000 --> 00:00:02.000\nOnly dialogue stays.\n";
    let path = create_test_file(&dir.path().to_path_buf(), "doc.srt", content).unwrap();

    assert_eq!(read_document(&path).unwrap(), "Only dialogue stays.");
}

#[test]
fn test_readDocument_withRenpyEscapedQuotes_shouldUnescapeThem() {
    let dir = create_temp_dir().unwrap();
    let content = "    e \"She said \\\"hello\\\" to me.\"\n";
    let path = create_test_file(&dir.path().to_path_buf(), "script.rpy", content).unwrap();

    assert_eq!(read_document(&path).unwrap(), "She said \"hello\" to me.");
}

#[test]
fn test_readDocument_withUnknownExtension_shouldReadAsPlainText() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(&dir.path().to_path_buf(), "notes.log", "raw content").unwrap();

    assert_eq!(read_document(&path).unwrap(), "raw content");
}

#[test]
fn test_readDocument_withInvalidUtf8_shouldNotFail() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("doc.txt");
    std::fs::write(&path, [b'o', b'k', 0xFF, b'!']).unwrap();

    let text = read_document(&path).unwrap();
    assert!(text.starts_with("ok"));
}
