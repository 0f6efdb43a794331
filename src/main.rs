mod app;
mod host;
mod logging;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::prelude::*;

use crate::app::{handle_key, handle_paste, load_config, App, Config};
use crate::host::TerminalHost;

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableBracketedPaste)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
    }
}

fn main() -> Result<()> {
    let path = std::env::args().nth(1).map(PathBuf::from);
    logging::log("codenest starting");

    let (config, config_error) = match load_config() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(format!("Config error: {:#}", err))),
    };
    let mut app = App::with_config(&config);
    if let Some(msg) = config_error {
        logging::log(&msg);
        app.set_status(msg);
    }

    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;
    let mut host = TerminalHost::new(terminal, app.theme.clone());

    if let Some(path) = path {
        host.draw(&mut app)?;
        app.open_path(&path, &mut host)?;
    }

    loop {
        host.draw(&mut app)?;
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if handle_key(&mut app, key, &mut host)? {
                    break;
                }
            }
            Event::Paste(text) => handle_paste(&mut app, &text),
            _ => {}
        }
    }

    logging::log("codenest exiting");
    Ok(())
}
