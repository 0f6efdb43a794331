use super::config::Config;
use super::document::{split_lines, Document};
use super::gutter::LineGutter;
use super::keymap::Keymaps;
use super::menu::MenuState;
use super::stats::DocumentStats;
use super::types::{char_to_byte_idx, is_undo_break_char, EditKind, EditorState, Mode};
use super::App;

pub(crate) const INITIAL_STATUS: &str = "Type your code in here...";

impl App {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        let (theme, _, theme_warning) = config.resolve_theme();
        let (keymaps, key_errors) = Keymaps::from_config(config.keys.as_ref());
        let mut warnings: Vec<String> = theme_warning.into_iter().collect();
        warnings.extend(key_errors);
        let status_message = if warnings.is_empty() {
            INITIAL_STATUS.to_string()
        } else {
            warnings.join("; ")
        };
        let mut app = Self {
            doc: Document::new(),
            cursor_row: 0,
            cursor_col: 0,
            scroll_row: 0,
            scroll_col: 0,
            viewport_rows: 1,
            mode: Mode::Editing,
            menu: MenuState::default(),
            title: String::new(),
            status_message,
            gutter: LineGutter::default(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            undo_limit: 200,
            last_edit: None,
            tab_width: config.tab_width(),
            theme,
            keymaps,
        };
        app.update_title();
        app
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    /// The single text-changed notification: status counts and the gutter
    /// are both rebuilt from the full text.
    pub(crate) fn document_changed(&mut self) {
        let stats = DocumentStats::measure(&self.doc.text());
        self.gutter.render(stats.lines);
        self.set_status(stats.to_string());
    }

    /// Swaps in a whole new document, as New and Open do. Undo history does
    /// not carry over.
    pub(crate) fn replace_document(&mut self, doc: Document) {
        self.doc = doc;
        self.cursor_row = 0;
        self.cursor_col = 0;
        self.scroll_row = 0;
        self.scroll_col = 0;
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.last_edit = None;
        self.document_changed();
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' {
            self.insert_newline();
            return;
        }
        self.begin_edit(EditKind::Insert, !is_undo_break_char(ch));
        self.insert_char_raw(ch);
        self.document_changed();
    }

    pub fn insert_newline(&mut self) {
        self.begin_edit(EditKind::Insert, false);
        self.insert_newline_raw();
        self.document_changed();
    }

    pub fn insert_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.begin_edit(EditKind::Insert, false);
        self.last_edit = None;
        let mut parts = split_lines(text).into_iter();
        if let Some(first) = parts.next() {
            self.insert_str_raw(&first);
        }
        for part in parts {
            self.insert_newline_raw();
            self.insert_str_raw(&part);
        }
        self.document_changed();
    }

    pub fn backspace(&mut self) {
        if self.cursor_col == 0 && self.cursor_row == 0 {
            return;
        }
        self.begin_edit(EditKind::Delete, true);
        if self.cursor_col > 0 {
            let line = &mut self.doc.lines[self.cursor_row];
            let start = char_to_byte_idx(line, self.cursor_col - 1);
            let end = char_to_byte_idx(line, self.cursor_col);
            line.replace_range(start..end, "");
            self.cursor_col -= 1;
        } else {
            let current = self.doc.lines.remove(self.cursor_row);
            self.cursor_row -= 1;
            self.cursor_col = self.line_len(self.cursor_row);
            self.doc.lines[self.cursor_row].push_str(&current);
        }
        self.document_changed();
    }

    pub fn delete_at_cursor(&mut self) {
        let len = self.line_len(self.cursor_row);
        if self.cursor_col >= len && self.cursor_row + 1 >= self.doc.lines.len() {
            return;
        }
        self.begin_edit(EditKind::Delete, true);
        if self.cursor_col < len {
            let line = &mut self.doc.lines[self.cursor_row];
            let start = char_to_byte_idx(line, self.cursor_col);
            let end = char_to_byte_idx(line, self.cursor_col + 1);
            line.replace_range(start..end, "");
        } else {
            let next = self.doc.lines.remove(self.cursor_row + 1);
            self.doc.lines[self.cursor_row].push_str(&next);
        }
        self.document_changed();
    }

    pub fn undo(&mut self) {
        let Some(state) = self.undo_stack.pop() else {
            self.set_status("Nothing to undo");
            return;
        };
        self.redo_stack.push(self.snapshot());
        self.restore(state);
    }

    pub fn redo(&mut self) {
        let Some(state) = self.redo_stack.pop() else {
            self.set_status("Nothing to redo");
            return;
        };
        self.undo_stack.push(self.snapshot());
        self.restore(state);
    }

    pub(crate) fn break_undo_group(&mut self) {
        self.last_edit = None;
    }

    fn begin_edit(&mut self, kind: EditKind, coalesce: bool) {
        if !(coalesce && self.last_edit == Some(kind)) {
            self.record_undo();
        }
        self.last_edit = Some(kind);
    }

    fn record_undo(&mut self) {
        self.undo_stack.push(self.snapshot());
        if self.undo_stack.len() > self.undo_limit {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    fn snapshot(&self) -> EditorState {
        EditorState {
            lines: self.doc.lines.clone(),
            cursor_row: self.cursor_row,
            cursor_col: self.cursor_col,
        }
    }

    fn restore(&mut self, state: EditorState) {
        self.doc.lines = state.lines;
        self.cursor_row = state.cursor_row;
        self.cursor_col = state.cursor_col;
        self.last_edit = None;
        self.clamp_cursor();
        self.document_changed();
    }

    fn insert_char_raw(&mut self, ch: char) {
        let line = &mut self.doc.lines[self.cursor_row];
        let idx = char_to_byte_idx(line, self.cursor_col);
        line.insert(idx, ch);
        self.cursor_col += 1;
    }

    fn insert_str_raw(&mut self, s: &str) {
        let line = &mut self.doc.lines[self.cursor_row];
        let idx = char_to_byte_idx(line, self.cursor_col);
        line.insert_str(idx, s);
        self.cursor_col += s.chars().count();
    }

    fn insert_newline_raw(&mut self) {
        let line = &mut self.doc.lines[self.cursor_row];
        let idx = char_to_byte_idx(line, self.cursor_col);
        let rest = line.split_off(idx);
        self.doc.lines.insert(self.cursor_row + 1, rest);
        self.cursor_row += 1;
        self.cursor_col = 0;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
