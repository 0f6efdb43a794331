use super::types::char_to_screen_col;
use super::App;

impl App {
    pub(crate) fn line_len(&self, row: usize) -> usize {
        self.doc
            .lines
            .get(row)
            .map(|l| l.chars().count())
            .unwrap_or(0)
    }

    pub(crate) fn move_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        } else if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.cursor_col = self.line_len(self.cursor_row);
        }
    }

    pub(crate) fn move_right(&mut self) {
        let len = self.line_len(self.cursor_row);
        if self.cursor_col < len {
            self.cursor_col += 1;
        } else if self.cursor_row + 1 < self.doc.lines.len() {
            self.cursor_row += 1;
            self.cursor_col = 0;
        }
    }

    pub(crate) fn move_up(&mut self) {
        if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.clamp_cursor_col();
        }
    }

    pub(crate) fn move_down(&mut self) {
        if self.cursor_row + 1 < self.doc.lines.len() {
            self.cursor_row += 1;
            self.clamp_cursor_col();
        }
    }

    pub(crate) fn move_line_start(&mut self) {
        self.cursor_col = 0;
    }

    pub(crate) fn move_line_end(&mut self) {
        self.cursor_col = self.line_len(self.cursor_row);
    }

    pub(crate) fn move_page_up(&mut self) {
        let page = self.viewport_rows.max(1);
        self.cursor_row = self.cursor_row.saturating_sub(page);
        self.clamp_cursor_col();
    }

    pub(crate) fn move_page_down(&mut self) {
        let page = self.viewport_rows.max(1);
        let last = self.doc.lines.len().saturating_sub(1);
        self.cursor_row = (self.cursor_row + page).min(last);
        self.clamp_cursor_col();
    }

    pub(crate) fn move_to_top(&mut self) {
        self.cursor_row = 0;
        self.cursor_col = 0;
    }

    pub(crate) fn move_to_bottom(&mut self) {
        self.cursor_row = self.doc.lines.len().saturating_sub(1);
        self.move_line_end();
    }

    pub(crate) fn clamp_cursor(&mut self) {
        let last = self.doc.lines.len().saturating_sub(1);
        if self.cursor_row > last {
            self.cursor_row = last;
        }
        self.clamp_cursor_col();
    }

    fn clamp_cursor_col(&mut self) {
        let len = self.line_len(self.cursor_row);
        if self.cursor_col > len {
            self.cursor_col = len;
        }
    }

    /// Scrolls so the cursor cell is on screen. `scroll_col` is kept in
    /// screen columns so every row shifts by the same amount.
    pub fn ensure_cursor_visible(&mut self, viewport_rows: usize, viewport_cols: usize) {
        let viewport_rows = viewport_rows.max(1);
        let viewport_cols = viewport_cols.max(1);
        self.viewport_rows = viewport_rows;
        if self.cursor_row < self.scroll_row {
            self.scroll_row = self.cursor_row;
        } else if self.cursor_row >= self.scroll_row + viewport_rows {
            self.scroll_row = self.cursor_row.saturating_sub(viewport_rows - 1);
        }

        let line = self.doc.lines.get(self.cursor_row).map(String::as_str).unwrap_or("");
        let cursor_screen = char_to_screen_col(line, self.cursor_col, self.tab_width);
        if cursor_screen < self.scroll_col {
            self.scroll_col = cursor_screen;
        } else if cursor_screen >= self.scroll_col + viewport_cols {
            self.scroll_col = cursor_screen + 1 - viewport_cols;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::document::Document;

    fn app_with(text: &str) -> App {
        let mut app = App::new();
        app.doc = Document::from_text(text, None);
        app
    }

    #[test]
    fn horizontal_moves_wrap_between_lines() {
        let mut app = app_with("ab\ncd");
        app.move_line_end();
        app.move_right();
        assert_eq!((app.cursor_row, app.cursor_col), (1, 0));
        app.move_left();
        assert_eq!((app.cursor_row, app.cursor_col), (0, 2));
    }

    #[test]
    fn vertical_moves_clamp_column() {
        let mut app = app_with("long line\nx\nanother");
        app.move_line_end();
        app.move_down();
        assert_eq!((app.cursor_row, app.cursor_col), (1, 1));
        app.move_down();
        app.move_down();
        assert_eq!(app.cursor_row, 2);
    }

    #[test]
    fn paging_uses_viewport_height() {
        let text = (1..=50).map(|n| n.to_string()).collect::<Vec<_>>().join("\n");
        let mut app = app_with(&text);
        app.ensure_cursor_visible(10, 80);
        app.move_page_down();
        assert_eq!(app.cursor_row, 10);
        app.move_to_bottom();
        assert_eq!((app.cursor_row, app.cursor_col), (49, 2));
        app.ensure_cursor_visible(10, 80);
        assert_eq!(app.scroll_row, 40);
        app.move_page_up();
        app.move_to_top();
        assert_eq!((app.cursor_row, app.cursor_col), (0, 0));
    }

    #[test]
    fn horizontal_scroll_follows_cursor() {
        let mut app = app_with(&"x".repeat(100));
        app.move_line_end();
        app.ensure_cursor_visible(5, 20);
        assert_eq!(app.scroll_col, 81);
        app.move_line_start();
        app.ensure_cursor_visible(5, 20);
        assert_eq!(app.scroll_col, 0);
    }

    #[test]
    fn horizontal_scroll_counts_screen_columns() {
        let mut app = app_with(&"\t".repeat(30));
        app.move_line_end();
        app.ensure_cursor_visible(5, 20);
        assert_eq!(app.scroll_col, 101);
        app.move_left();
        app.ensure_cursor_visible(5, 20);
        assert_eq!(app.scroll_col, 101);
        app.move_to_top();
        app.ensure_cursor_visible(5, 20);
        assert_eq!(app.scroll_col, 0);
    }
}
