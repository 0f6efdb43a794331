use ratatui::layout::{Constraint, Direction, Layout, Margin};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::{char_display_width, char_to_screen_col, App, ChooserMode, FileChooser, Mode, Theme, MENUS};

pub fn ui(f: &mut Frame<'_>, app: &mut App) {
    let size = f.area();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1), Constraint::Length(1)])
        .split(size);

    let menu_area = rows[0];
    let main_area = rows[1];
    let status_area = rows[2];

    render_menu_bar(f, app, menu_area);

    let gutter_width = (app.gutter.width() + 1) as u16;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(gutter_width), Constraint::Min(1)])
        .split(main_area);
    let gutter_area = columns[0];
    let editor_area = columns[1];

    let viewport_rows = editor_area.height as usize;
    let viewport_cols = editor_area.width.max(1) as usize;
    app.ensure_cursor_visible(viewport_rows, viewport_cols);

    let gutter_text = app.gutter.text();
    let mut labels = gutter_text.lines().skip(app.scroll_row);
    let mut gutter_lines: Vec<Line> = Vec::with_capacity(viewport_rows);
    let mut text_lines: Vec<Line> = Vec::with_capacity(viewport_rows);
    for i in 0..viewport_rows {
        let idx = app.scroll_row + i;
        gutter_lines.push(Line::from(format!(
            "{:>width$} ",
            labels.next().unwrap_or(""),
            width = gutter_width.saturating_sub(1) as usize
        )));
        let line = app.doc.lines.get(idx).map(String::as_str).unwrap_or("");
        text_lines.push(Line::from(render_line(
            line,
            app.scroll_col,
            viewport_cols,
            app.tab_width,
        )));
    }

    let gutter = Paragraph::new(gutter_lines)
        .style(Style::default().fg(app.theme.gutter_fg).bg(app.theme.gutter_bg));
    f.render_widget(gutter, gutter_area);

    let editor = Paragraph::new(text_lines)
        .block(Block::default().borders(Borders::NONE))
        .style(Style::default().fg(app.theme.editor_fg).bg(app.theme.editor_bg));
    f.render_widget(editor, editor_area);

    let status = Paragraph::new(app.status_message.clone())
        .style(Style::default().fg(app.theme.status_fg).bg(app.theme.status_bg));
    f.render_widget(status, status_area);

    if app.mode == Mode::Menu {
        render_dropdown(f, app, menu_area, main_area);
        return;
    }

    let line = app.doc.lines.get(app.cursor_row).map(|s| s.as_str()).unwrap_or("");
    let cursor_screen = char_to_screen_col(line, app.cursor_col, app.tab_width);
    let cursor_x = cursor_screen.saturating_sub(app.scroll_col) as u16 + editor_area.x;
    let cursor_y = (app.cursor_row.saturating_sub(app.scroll_row)) as u16 + editor_area.y;
    if cursor_x < editor_area.right() && cursor_y < editor_area.bottom() {
        f.set_cursor_position(Position::new(cursor_x, cursor_y));
    }
}

fn render_menu_bar(f: &mut Frame<'_>, app: &App, area: Rect) {
    let base = Style::default().fg(app.theme.menu_fg).bg(app.theme.menu_bg);
    let highlight = Style::default()
        .fg(app.theme.highlight_fg)
        .bg(app.theme.highlight_bg);
    let mut spans: Vec<Span> = Vec::new();
    let mut used = 0usize;
    for (i, menu) in MENUS.iter().enumerate() {
        let label = format!(" {} ", menu.title);
        used += label.chars().count();
        let style = if app.mode == Mode::Menu && app.menu.menu == i {
            highlight
        } else {
            base
        };
        spans.push(Span::styled(label, style));
    }
    let title_len = app.title.chars().count();
    let width = area.width as usize;
    if used + title_len + 2 <= width {
        spans.push(Span::styled(" ".repeat(width - used - title_len - 1), base));
        spans.push(Span::styled(app.title.clone(), base.add_modifier(Modifier::BOLD)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)).style(base), area);
}

fn menu_title_offset(menu: usize) -> u16 {
    MENUS
        .iter()
        .take(menu)
        .map(|m| m.title.chars().count() as u16 + 2)
        .sum()
}

fn render_dropdown(f: &mut Frame<'_>, app: &App, menu_area: Rect, main_area: Rect) {
    let menu = app.menu.current();
    let rows: Vec<(String, String, bool)> = menu
        .items
        .iter()
        .map(|item| {
            let shortcut = app.keymaps.shortcut_label(item.command).unwrap_or_default();
            (item.label.to_string(), shortcut, item.enabled)
        })
        .collect();
    let label_width = rows.iter().map(|r| r.0.chars().count()).max().unwrap_or(0);
    let shortcut_width = rows.iter().map(|r| r.1.chars().count()).max().unwrap_or(0);
    let inner_width = label_width + shortcut_width + 4;
    let width = (inner_width as u16 + 2).min(main_area.width);
    let height = (rows.len() as u16 + 2).min(main_area.height);
    let x = (menu_area.x + menu_title_offset(app.menu.menu))
        .min(main_area.right().saturating_sub(width));
    let area = Rect {
        x,
        y: main_area.y,
        width,
        height,
    };

    let base = Style::default().fg(app.theme.menu_fg).bg(app.theme.menu_bg);
    let lines: Vec<Line> = rows
        .into_iter()
        .enumerate()
        .map(|(i, (label, shortcut, enabled))| {
            let text = format!(
                " {:<lw$}  {:>sw$} ",
                label,
                shortcut,
                lw = label_width,
                sw = shortcut_width
            );
            let style = if !enabled {
                base.fg(app.theme.disabled_fg)
            } else if i == app.menu.item {
                Style::default()
                    .fg(app.theme.highlight_fg)
                    .bg(app.theme.highlight_bg)
            } else {
                base
            };
            Line::from(Span::styled(text, style))
        })
        .collect();

    f.render_widget(Clear, area);
    let widget = Paragraph::new(lines)
        .style(base)
        .block(Block::default().borders(Borders::ALL).style(base));
    f.render_widget(widget, area);
}

/// Draws the screen columns `start_col..start_col + max_cols` of a line:
/// tabs expanded, carriage returns dropped, other control characters shown
/// as `?`. A character cut by either edge is padded with spaces.
fn render_line(line: &str, start_col: usize, max_cols: usize, tab_width: usize) -> String {
    let mut out = String::new();
    let mut screen_col = 0usize;
    let end_col = start_col + max_cols;
    for ch in line.chars() {
        let width = char_display_width(ch, screen_col, tab_width);
        if screen_col >= end_col {
            break;
        }
        if screen_col >= start_col && screen_col + width <= end_col {
            if ch == '\t' {
                out.push_str(&" ".repeat(width));
            } else if ch.is_control() {
                if width > 0 {
                    out.push('?');
                }
            } else {
                out.push(ch);
            }
        } else if screen_col + width > start_col {
            let visible = (screen_col + width).min(end_col) - screen_col.max(start_col);
            out.push_str(&" ".repeat(visible));
        }
        screen_col += width;
    }
    out
}

pub fn render_chooser(f: &mut Frame<'_>, chooser: &FileChooser, theme: &Theme) {
    let area = f.area();
    let base = Style::default().fg(theme.dialog_fg).bg(theme.dialog_bg);
    let title = match chooser.mode() {
        ChooserMode::Open => " Open ",
        ChooserMode::Save => " Save As ",
    };
    let block = Block::default().borders(Borders::ALL).title(title).style(base);
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(format!("Look in: {}", chooser.dir().display())).style(base),
        rows[0],
    );
    let filter = chooser.active_filter().map(|filter| filter.label).unwrap_or("");
    f.render_widget(
        Paragraph::new(format!("Files of type: {}", filter)).style(base),
        rows[1],
    );

    let list_area = rows[2];
    let list_height = list_area.height as usize;
    if let Some(error) = chooser.error() {
        f.render_widget(
            Paragraph::new(error.to_string())
                .style(base.fg(Color::Red))
                .wrap(Wrap { trim: true }),
            list_area,
        );
    } else {
        let offset = chooser
            .selected_index()
            .saturating_sub(list_height.saturating_sub(1));
        let highlight = Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg);
        let lines: Vec<Line> = chooser
            .entries()
            .iter()
            .enumerate()
            .skip(offset)
            .take(list_height)
            .map(|(i, entry)| {
                let label = if entry.is_dir {
                    format!(" {}/", entry.name)
                } else {
                    format!(" {}", entry.name)
                };
                let style = if i == chooser.selected_index() { highlight } else { base };
                Line::from(Span::styled(label, style))
            })
            .collect();
        f.render_widget(Paragraph::new(lines).style(base), list_area);
    }

    let prompt = "File name: ";
    f.render_widget(
        Paragraph::new(format!("{}{}", prompt, chooser.input())).style(base.add_modifier(Modifier::BOLD)),
        rows[3],
    );
    let confirm = match chooser.mode() {
        ChooserMode::Open => "open",
        ChooserMode::Save => "save",
    };
    f.render_widget(
        Paragraph::new(format!(
            "Enter: {}  Tab: file type  Backspace: up  Esc: cancel",
            confirm
        ))
        .style(base.fg(theme.disabled_fg)),
        rows[4],
    );

    let cursor_x = rows[3].x + (prompt.len() + chooser.input().chars().count()) as u16;
    if cursor_x < rows[3].right() {
        f.set_cursor_position(Position::new(cursor_x, rows[3].y));
    }
}

pub fn render_modal(f: &mut Frame<'_>, title: &str, message: &str, theme: &Theme) {
    let area = f.area();
    let base = Style::default().fg(theme.dialog_fg).bg(theme.dialog_bg);
    let width = area.width.saturating_sub(4).clamp(1, 60);
    let text_width = width.saturating_sub(4).max(1);
    let body = Paragraph::new(message.to_string())
        .style(base)
        .wrap(Wrap { trim: true });
    let body_lines = body.line_count(text_width) as u16;
    let height = body_lines.saturating_add(3).min(area.height);
    let rect = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .style(base);
    let inner = block.inner(rect);
    f.render_widget(Clear, rect);
    f.render_widget(block, rect);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);
    f.render_widget(body, rows[0].inner(Margin::new(1, 0)));
    f.render_widget(
        Paragraph::new("[ OK ]")
            .alignment(Alignment::Center)
            .style(base.add_modifier(Modifier::BOLD)),
        rows[1],
    );
}
