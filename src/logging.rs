use std::fs;
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;

pub fn timestamp_prefix() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Appends a line to `~/.config/codenest/codenest.log` when `CODENEST_LOG=1`.
///
/// The terminal is in raw mode for the whole session, so this is the only
/// place diagnostics can go.
pub fn log(message: &str) {
    if std::env::var("CODENEST_LOG").ok().as_deref() != Some("1") {
        return;
    }
    let Some(home) = std::env::var_os("HOME") else {
        return;
    };
    let mut path = PathBuf::from(home);
    path.push(".config/codenest");
    let _ = fs::create_dir_all(&path);
    path.push("codenest.log");
    if let Ok(mut file) = fs::OpenOptions::new().create(true).append(true).open(path) {
        let _ = writeln!(file, "{} {}", timestamp_prefix(), message);
    }
}
