use super::document::Document;
use super::gutter::LineGutter;
use super::keymap::Keymaps;
use super::menu::MenuState;
use super::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Editing,
    Menu,
}

pub struct App {
    pub(crate) doc: Document,
    pub(crate) cursor_row: usize,
    pub(crate) cursor_col: usize,
    pub(crate) scroll_row: usize,
    pub(crate) scroll_col: usize,
    pub(crate) viewport_rows: usize,
    pub(crate) mode: Mode,
    pub(crate) menu: MenuState,
    pub(crate) title: String,
    pub(crate) status_message: String,
    pub(crate) gutter: LineGutter,
    pub(crate) undo_stack: Vec<EditorState>,
    pub(crate) redo_stack: Vec<EditorState>,
    pub(crate) undo_limit: usize,
    pub(crate) last_edit: Option<EditKind>,
    pub(crate) tab_width: usize,
    pub(crate) theme: Theme,
    pub(crate) keymaps: Keymaps,
}

#[derive(Debug, Clone)]
pub(crate) struct EditorState {
    pub(super) lines: Vec<String>,
    pub(super) cursor_row: usize,
    pub(super) cursor_col: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EditKind {
    Insert,
    Delete,
}

pub(super) fn is_undo_break_char(ch: char) -> bool {
    ch.is_whitespace()
        || matches!(ch, '.' | ',' | ';' | ':' | '!' | '?' | '(' | ')' | '[' | ']' | '{' | '}')
}

pub(super) fn char_to_byte_idx(s: &str, char_idx: usize) -> usize {
    if char_idx == 0 {
        return 0;
    }
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or_else(|| s.len())
}

pub fn char_to_screen_col(s: &str, char_idx: usize, tab_width: usize) -> usize {
    let mut col = 0usize;
    for (i, ch) in s.chars().enumerate() {
        if i >= char_idx {
            break;
        }
        col += char_display_width(ch, col, tab_width);
    }
    col
}

/// Columns `ch` occupies when drawn at screen column `col`. A carriage
/// return left over from CRLF text takes no space.
pub fn char_display_width(ch: char, col: usize, tab_width: usize) -> usize {
    if ch == '\t' {
        let width = tab_width.max(1);
        return width - (col % width);
    }
    if ch == '\r' {
        return 0;
    }
    unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0).max(1)
}
