use std::fmt;

/// Line and character counts shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocumentStats {
    pub lines: usize,
    pub chars: usize,
}

impl DocumentStats {
    /// Counts over the whole text. An empty text has zero lines; otherwise
    /// every `'\n'` starts a new one.
    pub fn measure(text: &str) -> Self {
        let chars = text.chars().count();
        let lines = if text.is_empty() {
            0
        } else {
            text.matches('\n').count() + 1
        };
        Self { lines, chars }
    }
}

impl fmt::Display for DocumentStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lines: {} | Characters: {}", self.lines, self.chars)
    }
}
