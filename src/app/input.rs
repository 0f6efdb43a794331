use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::dialog::Host;
use super::menu::{menu_for_hotkey, MenuState};
use super::types::Mode;
use super::App;

/// Routes one key press. Returns `Ok(true)` when the editor should exit.
pub fn handle_key(app: &mut App, key: KeyEvent, host: &mut dyn Host) -> Result<bool> {
    match app.mode {
        Mode::Menu => handle_menu_key(app, key, host),
        Mode::Editing => handle_editing_key(app, key, host),
    }
}

pub fn handle_paste(app: &mut App, text: &str) {
    if app.mode == Mode::Editing {
        // Terminals deliver pasted line breaks as CR.
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        app.insert_text(&normalized);
        app.break_undo_group();
    }
}

fn handle_editing_key(app: &mut App, key: KeyEvent, host: &mut dyn Host) -> Result<bool> {
    if let Some(command) = app.keymaps.command_for(&key) {
        return app.dispatch(command, host);
    }

    match (key.code, key.modifiers) {
        (KeyCode::F(10), _) => open_menu(app, 0),
        (KeyCode::Char(ch), KeyModifiers::ALT) => {
            if let Some(menu) = menu_for_hotkey(ch) {
                open_menu(app, menu);
            }
        }
        (KeyCode::Char('z'), KeyModifiers::CONTROL) => app.undo(),
        (KeyCode::Char('y'), KeyModifiers::CONTROL) => app.redo(),
        (KeyCode::Enter, _) => app.insert_newline(),
        (KeyCode::Backspace, _) => app.backspace(),
        (KeyCode::Delete, _) => app.delete_at_cursor(),
        (KeyCode::Tab, _) => app.insert_char('\t'),
        (KeyCode::Char(ch), KeyModifiers::NONE) | (KeyCode::Char(ch), KeyModifiers::SHIFT) => {
            app.insert_char(ch)
        }
        // AltGr arrives as Ctrl+Alt on some terminals.
        (KeyCode::Char(ch), mods) if mods.contains(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            app.insert_char(ch)
        }
        (code, mods) => {
            let ctrl = mods.contains(KeyModifiers::CONTROL);
            let moved = match code {
                KeyCode::Left => {
                    app.move_left();
                    true
                }
                KeyCode::Right => {
                    app.move_right();
                    true
                }
                KeyCode::Up => {
                    app.move_up();
                    true
                }
                KeyCode::Down => {
                    app.move_down();
                    true
                }
                KeyCode::Home if ctrl => {
                    app.move_to_top();
                    true
                }
                KeyCode::End if ctrl => {
                    app.move_to_bottom();
                    true
                }
                KeyCode::Home => {
                    app.move_line_start();
                    true
                }
                KeyCode::End => {
                    app.move_line_end();
                    true
                }
                KeyCode::PageUp => {
                    app.move_page_up();
                    true
                }
                KeyCode::PageDown => {
                    app.move_page_down();
                    true
                }
                _ => false,
            };
            if moved {
                app.break_undo_group();
            }
        }
    }
    Ok(false)
}

fn handle_menu_key(app: &mut App, key: KeyEvent, host: &mut dyn Host) -> Result<bool> {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) | (KeyCode::F(10), _) => app.mode = Mode::Editing,
        (KeyCode::Left, _) => app.menu.prev_menu(),
        (KeyCode::Right, _) => app.menu.next_menu(),
        (KeyCode::Up, _) => app.menu.prev_item(),
        (KeyCode::Down, _) => app.menu.next_item(),
        (KeyCode::Enter, _) => {
            if let Some(command) = app.menu.activate() {
                return app.dispatch(command, host);
            }
        }
        (KeyCode::Char(ch), KeyModifiers::ALT) => {
            if let Some(menu) = menu_for_hotkey(ch) {
                open_menu(app, menu);
            }
        }
        _ => {}
    }
    Ok(false)
}

fn open_menu(app: &mut App, menu: usize) {
    app.menu = MenuState::open(menu);
    app.mode = Mode::Menu;
}
