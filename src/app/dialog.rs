use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// One entry of the file-type dropdown in the open/save choosers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub label: &'static str,
    /// Extensions without the dot. Empty means every file matches.
    pub extensions: &'static [&'static str],
}

impl FileFilter {
    pub fn matches(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|x| x.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }

    pub fn default_extension(&self) -> Option<&'static str> {
        self.extensions.first().copied()
    }
}

pub const FILE_FILTERS: &[FileFilter] = &[
    FileFilter { label: "Text Files (*.txt)", extensions: &["txt"] },
    FileFilter { label: "C Files (*.c)", extensions: &["c"] },
    FileFilter { label: "C++ Files (*.cpp)", extensions: &["cpp"] },
    FileFilter { label: "C# Files (*.cs)", extensions: &["cs"] },
    FileFilter { label: "CSS Files (*.css)", extensions: &["css"] },
    FileFilter { label: "HTML Files (*.html)", extensions: &["html"] },
    FileFilter { label: "Java Files (*.java)", extensions: &["java"] },
    FileFilter { label: "JavaScript Files (*.js)", extensions: &["js"] },
    FileFilter { label: "Python Files (*.py)", extensions: &["py"] },
    FileFilter { label: "All Files (*.*)", extensions: &[] },
];

/// The modal collaborators the command handlers need from whatever is
/// hosting the editor. A `None` path means the user cancelled.
pub trait Host {
    fn choose_file_for_open(&mut self, filters: &[FileFilter]) -> Result<Option<PathBuf>>;

    fn choose_file_for_save(
        &mut self,
        filters: &[FileFilter],
        suggested: Option<&Path>,
    ) -> Result<Option<PathBuf>>;

    fn show_modal(&mut self, title: &str, message: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChooserMode {
    Open,
    Save,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChooserEntry {
    pub name: String,
    pub is_dir: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChooserResult {
    Continue,
    Selected(PathBuf),
    Cancelled,
}

/// Navigation state of the file chooser, independent of any terminal.
#[derive(Debug, Clone)]
pub struct FileChooser {
    mode: ChooserMode,
    filters: Vec<FileFilter>,
    filter_index: usize,
    dir: PathBuf,
    entries: Vec<ChooserEntry>,
    selected: usize,
    input: String,
    error: Option<String>,
}

impl FileChooser {
    pub fn new(mode: ChooserMode, filters: &[FileFilter], dir: PathBuf) -> Self {
        let dir = std::path::absolute(&dir).unwrap_or(dir);
        let mut chooser = Self {
            mode,
            filters: filters.to_vec(),
            filter_index: 0,
            dir,
            entries: Vec::new(),
            selected: 0,
            input: String::new(),
            error: None,
        };
        chooser.refresh();
        chooser
    }

    /// A save chooser opened next to `suggested` with its name pre-filled.
    pub fn for_save(filters: &[FileFilter], suggested: Option<&Path>, fallback_dir: PathBuf) -> Self {
        let dir = suggested
            .and_then(|p| p.parent())
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or(fallback_dir);
        let mut chooser = Self::new(ChooserMode::Save, filters, dir);
        if let Some(name) = suggested.and_then(|p| p.file_name()) {
            chooser.input = name.to_string_lossy().into_owned();
        }
        chooser
    }

    pub fn mode(&self) -> ChooserMode {
        self.mode
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[ChooserEntry] {
        &self.entries
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn active_filter(&self) -> Option<&FileFilter> {
        self.filters.get(self.filter_index)
    }

    /// Re-reads the current directory: `..` first, then directories, then
    /// files passing the active filter, each group sorted by name.
    pub fn refresh(&mut self) {
        self.entries.clear();
        self.error = None;
        if self.dir.parent().is_some() {
            self.entries.push(ChooserEntry {
                name: "..".to_string(),
                is_dir: true,
            });
        }
        let mut dirs = Vec::new();
        let mut files = Vec::new();
        match fs::read_dir(&self.dir) {
            Ok(read) => {
                for entry in read.flatten() {
                    let path = entry.path();
                    let name = entry.file_name().to_string_lossy().into_owned();
                    if path.is_dir() {
                        dirs.push(ChooserEntry { name, is_dir: true });
                    } else if self.active_filter().is_none_or(|f| f.matches(&path)) {
                        files.push(ChooserEntry { name, is_dir: false });
                    }
                }
            }
            Err(err) => self.error = Some(format!("{}: {}", self.dir.display(), err)),
        }
        dirs.sort_by(|a, b| a.name.cmp(&b.name));
        files.sort_by(|a, b| a.name.cmp(&b.name));
        self.entries.extend(dirs);
        self.entries.extend(files);
        if self.selected >= self.entries.len() {
            self.selected = 0;
        }
    }

    pub fn process_key(&mut self, key: KeyEvent) -> ChooserResult {
        match key.code {
            KeyCode::Esc => ChooserResult::Cancelled,
            KeyCode::Up => {
                if !self.entries.is_empty() {
                    self.selected = if self.selected == 0 {
                        self.entries.len() - 1
                    } else {
                        self.selected - 1
                    };
                    self.sync_input_with_selection();
                }
                ChooserResult::Continue
            }
            KeyCode::Down => {
                if !self.entries.is_empty() {
                    self.selected = (self.selected + 1) % self.entries.len();
                    self.sync_input_with_selection();
                }
                ChooserResult::Continue
            }
            KeyCode::Tab => {
                self.filter_index = (self.filter_index + 1) % self.filters.len().max(1);
                self.refresh();
                ChooserResult::Continue
            }
            KeyCode::BackTab => {
                let len = self.filters.len().max(1);
                self.filter_index = (self.filter_index + len - 1) % len;
                self.refresh();
                ChooserResult::Continue
            }
            KeyCode::Backspace => {
                if self.input.pop().is_none() {
                    self.go_parent();
                }
                ChooserResult::Continue
            }
            KeyCode::Enter => self.confirm(),
            KeyCode::Char(ch)
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.input.push(ch);
                ChooserResult::Continue
            }
            _ => ChooserResult::Continue,
        }
    }

    fn sync_input_with_selection(&mut self) {
        match self.entries.get(self.selected) {
            Some(entry) if !entry.is_dir => self.input = entry.name.clone(),
            _ => self.input.clear(),
        }
    }

    fn confirm(&mut self) -> ChooserResult {
        let typed = self.input.trim();
        if !typed.is_empty() {
            let candidate = self.dir.join(typed);
            if candidate.is_dir() {
                self.change_dir(candidate);
                return ChooserResult::Continue;
            }
            return ChooserResult::Selected(self.finish_path(candidate));
        }
        let Some(entry) = self.entries.get(self.selected).cloned() else {
            return ChooserResult::Continue;
        };
        if entry.is_dir {
            if entry.name == ".." {
                self.go_parent();
            } else {
                self.change_dir(self.dir.join(&entry.name));
            }
            return ChooserResult::Continue;
        }
        ChooserResult::Selected(self.finish_path(self.dir.join(&entry.name)))
    }

    fn finish_path(&self, path: PathBuf) -> PathBuf {
        if self.mode != ChooserMode::Save || path.extension().is_some() {
            return path;
        }
        match self.active_filter().and_then(FileFilter::default_extension) {
            Some(ext) => path.with_extension(ext),
            None => path,
        }
    }

    fn change_dir(&mut self, dir: PathBuf) {
        self.dir = fs::canonicalize(&dir).unwrap_or(dir);
        self.selected = 0;
        self.input.clear();
        self.refresh();
    }

    fn go_parent(&mut self) {
        if let Some(parent) = self.dir.parent() {
            self.dir = parent.to_path_buf();
            self.selected = 0;
            self.input.clear();
            self.refresh();
        }
    }
}
