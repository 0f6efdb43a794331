mod command;
mod config;
mod dialog;
mod document;
mod edit;
mod gutter;
mod input;
mod keymap;
mod menu;
mod motion;
mod stats;
mod theme;
mod types;

pub use config::{load_config, Config};
pub use dialog::{ChooserMode, ChooserResult, FileChooser, FileFilter, Host};
pub use input::{handle_key, handle_paste};
pub use menu::MENUS;
pub use theme::Theme;
pub use types::{char_display_width, char_to_screen_col, App, Mode};
