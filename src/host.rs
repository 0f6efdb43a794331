use std::io::{self, Stdout};
use std::path::{Path, PathBuf};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::SetTitle;
use ratatui::prelude::*;

use crate::app::{App, ChooserMode, ChooserResult, FileChooser, FileFilter, Host, Theme};
use crate::logging;
use crate::ui::{render_chooser, render_modal, ui};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Owns the terminal and runs file choosers and message boxes as nested
/// event loops that block until the user answers.
pub struct TerminalHost {
    terminal: Tui,
    theme: Theme,
    shown_title: Option<String>,
}

impl TerminalHost {
    pub fn new(terminal: Tui, theme: Theme) -> Self {
        Self {
            terminal,
            theme,
            shown_title: None,
        }
    }

    /// Draws the editor and pushes the window title when it changed.
    pub fn draw(&mut self, app: &mut App) -> Result<()> {
        self.terminal.draw(|f| ui(f, app))?;
        if self.shown_title.as_deref() != Some(app.title.as_str()) {
            execute!(io::stdout(), SetTitle(&app.title))?;
            self.shown_title = Some(app.title.clone());
        }
        Ok(())
    }

    fn run_chooser(&mut self, mut chooser: FileChooser) -> Result<Option<PathBuf>> {
        loop {
            let theme = &self.theme;
            self.terminal.draw(|f| render_chooser(f, &chooser, theme))?;
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match chooser.process_key(key) {
                ChooserResult::Continue => {}
                ChooserResult::Selected(path) => return Ok(Some(path)),
                ChooserResult::Cancelled => return Ok(None),
            }
        }
    }
}

fn start_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

impl Host for TerminalHost {
    fn choose_file_for_open(&mut self, filters: &[FileFilter]) -> Result<Option<PathBuf>> {
        self.run_chooser(FileChooser::new(ChooserMode::Open, filters, start_dir()))
    }

    fn choose_file_for_save(
        &mut self,
        filters: &[FileFilter],
        suggested: Option<&Path>,
    ) -> Result<Option<PathBuf>> {
        self.run_chooser(FileChooser::for_save(filters, suggested, start_dir()))
    }

    fn show_modal(&mut self, title: &str, message: &str) -> Result<()> {
        logging::log(&format!("{}: {}", title, message));
        loop {
            let theme = &self.theme;
            self.terminal
                .draw(|f| render_modal(f, title, message, theme))?;
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press
                    && matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' '))
                {
                    return Ok(());
                }
            }
        }
    }
}
