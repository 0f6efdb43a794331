use std::path::Path;

use anyhow::Result;

use super::dialog::{Host, FILE_FILTERS};
use super::document::{file_name_of, read_text, Document};
use super::types::Mode;
use super::App;
use crate::logging;

pub(crate) const APP_TITLE: &str = "CodeNest Code Editor";
pub(crate) const ABOUT_TITLE: &str = "About";
pub(crate) const ABOUT_TEXT: &str = "CodeNest is a code editor for your code editing needs. \
It can create, save, and update files of various formats. \
New features will be added in the future.";
const ERROR_TITLE: &str = "Error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    New,
    Open,
    Save,
    SaveAs,
    Find,
    Exit,
    About,
}

/// Runs a command. `Ok(true)` asks the caller to quit.
pub type CommandHandler = fn(&mut App, &mut dyn Host) -> Result<bool>;

impl Command {
    #[cfg(test)]
    pub const ALL: [Command; 7] = [
        Command::New,
        Command::Open,
        Command::Save,
        Command::SaveAs,
        Command::Find,
        Command::Exit,
        Command::About,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::New => "new",
            Command::Open => "open",
            Command::Save => "save",
            Command::SaveAs => "save_as",
            Command::Find => "find",
            Command::Exit => "exit",
            Command::About => "about",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "new" => Some(Command::New),
            "open" => Some(Command::Open),
            "save" => Some(Command::Save),
            "save_as" | "saveas" | "save-as" => Some(Command::SaveAs),
            "find" => Some(Command::Find),
            "exit" | "quit" => Some(Command::Exit),
            "about" => Some(Command::About),
            _ => None,
        }
    }

    pub fn handler(self) -> CommandHandler {
        match self {
            Command::New => App::new_file,
            Command::Open => App::open_file,
            Command::Save => App::save_file,
            Command::SaveAs => App::save_file_as,
            Command::Find => App::find,
            Command::Exit => App::exit,
            Command::About => App::about,
        }
    }
}

impl App {
    pub fn dispatch(&mut self, command: Command, host: &mut dyn Host) -> Result<bool> {
        logging::log(&format!("command: {}", command.name()));
        self.mode = Mode::Editing;
        self.break_undo_group();
        (command.handler())(self, host)
    }

    pub(crate) fn update_title(&mut self) {
        self.title = format!("{} - {}", APP_TITLE, self.doc.display_name());
    }

    /// Reads `path` into a fresh document. Read failures are reported through
    /// the host and leave the current document alone.
    pub fn open_path(&mut self, path: &Path, host: &mut dyn Host) -> Result<()> {
        match read_text(path) {
            Ok(text) => {
                logging::log(&format!("opened {}", path.display()));
                self.replace_document(Document::from_text(&text, Some(path.to_path_buf())));
                self.update_title();
                self.set_status(format!("Opened file: {}", file_name_of(path)));
            }
            Err(err) => {
                logging::log(&format!("open failed: {:#}", err));
                host.show_modal(ERROR_TITLE, &format!("Error opening file: {:#}", err))?;
            }
        }
        Ok(())
    }

    fn new_file(&mut self, _host: &mut dyn Host) -> Result<bool> {
        self.replace_document(Document::new());
        self.update_title();
        self.set_status("New file created");
        Ok(false)
    }

    fn open_file(&mut self, host: &mut dyn Host) -> Result<bool> {
        if let Some(path) = host.choose_file_for_open(FILE_FILTERS)? {
            self.open_path(&path, host)?;
        }
        Ok(false)
    }

    // The chosen path is bound before writing, so after a failed first save
    // the next Save retries the same path without asking again.
    fn save_file(&mut self, host: &mut dyn Host) -> Result<bool> {
        let path = match self.doc.file_path.clone() {
            Some(path) => path,
            None => {
                let Some(path) = host.choose_file_for_save(FILE_FILTERS, None)? else {
                    return Ok(false);
                };
                self.doc.file_path = Some(path.clone());
                path
            }
        };
        match self.doc.write_to(&path) {
            Ok(()) => {
                logging::log(&format!("saved {}", path.display()));
                self.update_title();
                self.set_status(format!("Saved file: {}", file_name_of(&path)));
            }
            Err(err) => {
                logging::log(&format!("save failed: {:#}", err));
                host.show_modal(ERROR_TITLE, &format!("Error saving file: {:#}", err))?;
            }
        }
        Ok(false)
    }

    fn save_file_as(&mut self, host: &mut dyn Host) -> Result<bool> {
        let suggested = self.doc.file_path.clone();
        let Some(path) = host.choose_file_for_save(FILE_FILTERS, suggested.as_deref())? else {
            return Ok(false);
        };
        match self.doc.write_to(&path) {
            Ok(()) => {
                logging::log(&format!("saved as {}", path.display()));
                self.set_status(format!("Saved file as: {}", file_name_of(&path)));
                self.doc.file_path = Some(path);
                self.update_title();
            }
            Err(err) => {
                logging::log(&format!("save as failed: {:#}", err));
                host.show_modal(ERROR_TITLE, &format!("Error saving as file: {:#}", err))?;
            }
        }
        Ok(false)
    }

    fn find(&mut self, _host: &mut dyn Host) -> Result<bool> {
        Ok(false)
    }

    fn exit(&mut self, _host: &mut dyn Host) -> Result<bool> {
        Ok(true)
    }

    fn about(&mut self, host: &mut dyn Host) -> Result<bool> {
        host.show_modal(ABOUT_TITLE, ABOUT_TEXT)?;
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::fs;
    use std::path::PathBuf;

    use super::*;
    use crate::app::dialog::FileFilter;

    /// Replays queued dialog answers and records everything it was asked.
    #[derive(Default)]
    struct ScriptedHost {
        open_answers: VecDeque<Option<PathBuf>>,
        save_answers: VecDeque<Option<PathBuf>>,
        open_prompts: usize,
        save_prompts: Vec<Option<PathBuf>>,
        modals: Vec<(String, String)>,
    }

    impl ScriptedHost {
        fn opening(path: Option<PathBuf>) -> Self {
            let mut host = Self::default();
            host.open_answers.push_back(path);
            host
        }

        fn saving(path: Option<PathBuf>) -> Self {
            let mut host = Self::default();
            host.save_answers.push_back(path);
            host
        }
    }

    impl Host for ScriptedHost {
        fn choose_file_for_open(&mut self, filters: &[FileFilter]) -> Result<Option<PathBuf>> {
            assert_eq!(filters, FILE_FILTERS);
            self.open_prompts += 1;
            Ok(self.open_answers.pop_front().flatten())
        }

        fn choose_file_for_save(
            &mut self,
            filters: &[FileFilter],
            suggested: Option<&Path>,
        ) -> Result<Option<PathBuf>> {
            assert_eq!(filters, FILE_FILTERS);
            self.save_prompts.push(suggested.map(Path::to_path_buf));
            Ok(self.save_answers.pop_front().flatten())
        }

        fn show_modal(&mut self, title: &str, message: &str) -> Result<()> {
            self.modals.push((title.to_string(), message.to_string()));
            Ok(())
        }
    }

    fn opened(path: &Path) -> App {
        let mut app = App::new();
        let mut host = ScriptedHost::opening(Some(path.to_path_buf()));
        app.dispatch(Command::Open, &mut host).unwrap();
        assert!(host.modals.is_empty());
        app
    }

    #[test]
    fn dispatch_table_names_round_trip() {
        for command in Command::ALL {
            assert_eq!(Command::from_name(command.name()), Some(command));
        }
        assert_eq!(Command::from_name("Save-As"), Some(Command::SaveAs));
        assert_eq!(Command::from_name("replace"), None);
    }

    #[test]
    fn open_replaces_document_and_updates_title() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "alpha\nbeta\ngamma").unwrap();

        let app = opened(&path);
        assert_eq!(app.doc.text(), "alpha\nbeta\ngamma");
        assert_eq!(app.doc.file_path.as_deref(), Some(path.as_path()));
        assert_eq!(app.title, "CodeNest Code Editor - a.txt");
        assert_eq!(app.status_message, "Opened file: a.txt");
        assert_eq!(app.gutter.labels(), ["1", "2", "3"]);
    }

    #[test]
    fn cancelled_open_changes_nothing() {
        let mut app = App::new();
        app.insert_text("draft");
        let status = app.status_message.clone();
        let mut host = ScriptedHost::opening(None);
        app.dispatch(Command::Open, &mut host).unwrap();
        assert_eq!(host.open_prompts, 1);
        assert_eq!(app.doc.text(), "draft");
        assert_eq!(app.doc.file_path, None);
        assert_eq!(app.status_message, status);
    }

    #[test]
    fn failed_open_reports_and_keeps_document() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("keep.txt");
        fs::write(&existing, "kept").unwrap();
        let mut app = opened(&existing);

        let mut host = ScriptedHost::opening(Some(dir.path().join("missing.txt")));
        app.dispatch(Command::Open, &mut host).unwrap();
        assert_eq!(host.modals.len(), 1);
        assert_eq!(host.modals[0].0, "Error");
        assert!(host.modals[0].1.starts_with("Error opening file: "));
        assert!(host.modals[0].1.contains("missing.txt"));
        assert_eq!(app.doc.text(), "kept");
        assert_eq!(app.doc.file_path.as_deref(), Some(existing.as_path()));
        assert_eq!(app.title, "CodeNest Code Editor - keep.txt");
    }

    #[test]
    fn new_after_open_unbinds_so_save_prompts_again() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "original").unwrap();
        let mut app = opened(&a);

        app.dispatch(Command::New, &mut ScriptedHost::default()).unwrap();
        assert_eq!(app.doc.text(), "");
        assert_eq!(app.doc.file_path, None);
        assert_eq!(app.title, "CodeNest Code Editor - Untitled");
        assert_eq!(app.status_message, "New file created");
        assert!(app.gutter.labels().is_empty());

        app.insert_text("fresh");
        let mut host = ScriptedHost::saving(Some(b.clone()));
        app.dispatch(Command::Save, &mut host).unwrap();
        assert_eq!(host.save_prompts, vec![None]);
        assert_eq!(fs::read_to_string(&a).unwrap(), "original");
        assert_eq!(fs::read_to_string(&b).unwrap(), "fresh");
        assert_eq!(app.status_message, "Saved file: b.txt");
        assert_eq!(app.title, "CodeNest Code Editor - b.txt");
    }

    #[test]
    fn save_as_rebinds_later_saves() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "v1").unwrap();
        let mut app = opened(&a);

        let mut host = ScriptedHost::saving(Some(b.clone()));
        app.dispatch(Command::SaveAs, &mut host).unwrap();
        assert_eq!(host.save_prompts, vec![Some(a.clone())]);
        assert_eq!(app.status_message, "Saved file as: b.txt");
        assert_eq!(app.doc.file_path.as_deref(), Some(b.as_path()));

        app.move_to_bottom();
        app.insert_text(" v2");
        app.dispatch(Command::Save, &mut host).unwrap();
        assert_eq!(host.save_prompts.len(), 1);
        assert_eq!(fs::read_to_string(&b).unwrap(), "v1 v2");
        assert_eq!(fs::read_to_string(&a).unwrap(), "v1");
    }

    #[test]
    fn save_reaches_disk_byte_for_byte() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("code.py");
        let text = "def f():\n\treturn 'x'\r\n\n# \u{00e9}\u{4e2d}\n";
        let mut app = App::new();
        app.insert_text(text);
        app.dispatch(Command::Save, &mut ScriptedHost::saving(Some(path.clone())))
            .unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), text);

        let reopened = opened(&path);
        assert_eq!(reopened.doc.text(), text);
    }

    #[test]
    fn cancelled_save_changes_nothing() {
        let mut app = App::new();
        app.insert_text("unsaved");
        let status = app.status_message.clone();
        let mut host = ScriptedHost::saving(None);
        app.dispatch(Command::Save, &mut host).unwrap();
        assert_eq!(host.save_prompts.len(), 1);
        assert_eq!(app.doc.file_path, None);
        assert_eq!(app.status_message, status);
        assert!(host.modals.is_empty());
    }

    #[test]
    fn failed_first_save_keeps_the_chosen_path() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("no_such_dir").join("x.txt");
        let mut app = App::new();
        app.insert_text("data");
        let mut host = ScriptedHost::saving(Some(bad.clone()));
        app.dispatch(Command::Save, &mut host).unwrap();
        assert_eq!(host.modals.len(), 1);
        assert!(host.modals[0].1.starts_with("Error saving file: "));
        assert_eq!(app.doc.file_path.as_deref(), Some(bad.as_path()));
        assert_eq!(app.title, "CodeNest Code Editor - Untitled");

        app.dispatch(Command::Save, &mut host).unwrap();
        assert_eq!(host.save_prompts.len(), 1);
        assert_eq!(host.modals.len(), 2);
    }

    #[test]
    fn failed_save_as_keeps_previous_binding() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        fs::write(&a, "a").unwrap();
        let mut app = opened(&a);
        let mut host = ScriptedHost::saving(Some(dir.path().join("nope").join("b.txt")));
        app.dispatch(Command::SaveAs, &mut host).unwrap();
        assert!(host.modals[0].1.starts_with("Error saving as file: "));
        assert_eq!(app.doc.file_path.as_deref(), Some(a.as_path()));
        assert_eq!(app.status_message, "Opened file: a.txt");
    }

    #[test]
    fn cancelled_save_as_changes_nothing() {
        let mut app = App::new();
        let mut host = ScriptedHost::saving(None);
        app.dispatch(Command::SaveAs, &mut host).unwrap();
        assert_eq!(app.doc.file_path, None);
        assert_eq!(app.status_message, "Type your code in here...");
    }

    #[test]
    fn find_exit_and_about() {
        let mut app = App::new();
        app.insert_text("text");
        let before = (app.doc.clone(), app.status_message.clone());
        let mut host = ScriptedHost::default();
        assert!(!app.dispatch(Command::Find, &mut host).unwrap());
        assert_eq!((app.doc.clone(), app.status_message.clone()), before);

        assert!(!app.dispatch(Command::About, &mut host).unwrap());
        assert_eq!(host.modals, vec![(ABOUT_TITLE.to_string(), ABOUT_TEXT.to_string())]);

        assert!(app.dispatch(Command::Exit, &mut host).unwrap());
    }
}
