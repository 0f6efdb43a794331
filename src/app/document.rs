use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub(crate) const UNTITLED: &str = "Untitled";

/// The single in-memory buffer plus the file it is bound to.
///
/// `file_path` is `None` exactly until an Open or Save binds the buffer to a
/// location. Text is held as lines split on `'\n'` only, so `text()` gives
/// back exactly what was loaded or typed, `'\r'` included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub(crate) lines: Vec<String>,
    pub(crate) file_path: Option<PathBuf>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            file_path: None,
        }
    }

    pub fn from_text(text: &str, file_path: Option<PathBuf>) -> Self {
        Self {
            lines: split_lines(text),
            file_path,
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// The bare file name, or `"Untitled"` while unbound.
    pub fn display_name(&self) -> String {
        self.file_path
            .as_deref()
            .map(file_name_of)
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    pub(crate) fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.text()).with_context(|| format!("{}", path.display()))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("{}", path.display()))
}

pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub(crate) fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_document_is_empty_and_unbound() {
        let doc = Document::new();
        assert_eq!(doc.lines, vec![String::new()]);
        assert_eq!(doc.text(), "");
        assert_eq!(doc.file_path, None);
        assert_eq!(doc.display_name(), "Untitled");
    }

    #[test]
    fn text_survives_line_splitting_exactly() {
        for text in ["", "\n", "a\n", "a\r\nb\r\n", "one\ntwo\n\nthree", "\t x \u{00e9}\n"] {
            assert_eq!(Document::from_text(text, None).text(), text);
        }
    }

    #[test]
    fn display_name_is_file_name_only() {
        let doc = Document::from_text("", Some(PathBuf::from("/tmp/dir/notes.py")));
        assert_eq!(doc.display_name(), "notes.py");
    }

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("round.txt");
        let text = "first line\r\nsecond\n\ttabbed \u{4e2d}\u{6587}\n";
        Document::from_text(text, None).write_to(&path).unwrap();
        assert_eq!(read_text(&path).unwrap(), text);
    }

    #[test]
    fn read_error_mentions_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let err = read_text(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("missing.txt"));
    }
}
