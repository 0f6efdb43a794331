use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::command::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct KeySpec {
    pub(crate) code: KeyCode,
    pub(crate) mods: KeyModifiers,
}

impl KeySpec {
    /// Letters are stored lowercase whenever Shift is part of the chord, so
    /// `Ctrl+Shift+S` matches whether the terminal reports `S` or `s`.
    fn normalized(code: KeyCode, mods: KeyModifiers) -> Self {
        let mods = mods & (KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT | KeyModifiers::SUPER);
        let code = match code {
            KeyCode::Char(ch) if mods.contains(KeyModifiers::SHIFT) => {
                KeyCode::Char(ch.to_ascii_lowercase())
            }
            KeyCode::Char(ch) if ch.is_ascii_uppercase() => {
                return Self {
                    code: KeyCode::Char(ch.to_ascii_lowercase()),
                    mods: mods | KeyModifiers::SHIFT,
                };
            }
            other => other,
        };
        Self { code, mods }
    }

    pub(crate) fn from_event(key: &KeyEvent) -> Self {
        Self::normalized(key.code, key.modifiers)
    }
}

/// Key chord to command table.
#[derive(Debug, Clone)]
pub(crate) struct Keymaps {
    bindings: HashMap<KeySpec, Command>,
}

impl Keymaps {
    pub(crate) fn command_for(&self, key: &KeyEvent) -> Option<Command> {
        self.bindings.get(&KeySpec::from_event(key)).copied()
    }

    pub(crate) fn from_config(cfg: Option<&HashMap<String, String>>) -> (Self, Vec<String>) {
        let mut keymaps = Keymaps::default();
        let mut errors = Vec::new();
        let Some(map) = cfg else {
            return (keymaps, errors);
        };

        let mut entries: Vec<(&String, &String)> = map.iter().collect();
        entries.sort();
        for (lhs, rhs) in entries {
            let Some(spec) = parse_key(lhs) else {
                errors.push(format!("Invalid key: {}", lhs));
                continue;
            };
            let action = rhs.trim().to_ascii_lowercase();
            if action == "noop" || action == "no-op" {
                keymaps.bindings.remove(&spec);
                continue;
            }
            let Some(command) = Command::from_name(&action) else {
                errors.push(format!("Invalid command: {}", rhs));
                continue;
            };
            keymaps.bindings.insert(spec, command);
        }

        (keymaps, errors)
    }

    /// Label shown next to a menu item: the shortest binding, ties broken
    /// alphabetically.
    pub(crate) fn shortcut_label(&self, command: Command) -> Option<String> {
        self.bindings
            .iter()
            .filter(|(_, c)| **c == command)
            .map(|(spec, _)| format_key_spec(spec))
            .min_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
    }
}

impl Default for Keymaps {
    fn default() -> Self {
        let defaults = [
            ("<C-n>", Command::New),
            ("<C-o>", Command::Open),
            ("<C-s>", Command::Save),
            ("<F12>", Command::SaveAs),
            ("<C-S-s>", Command::SaveAs),
            ("<C-f>", Command::Find),
            ("<C-q>", Command::Exit),
            ("<F1>", Command::About),
        ];
        let mut bindings = HashMap::new();
        for (key, command) in defaults {
            if let Some(spec) = parse_key(key) {
                bindings.insert(spec, command);
            }
        }
        Keymaps { bindings }
    }
}

pub(crate) fn parse_key(raw: &str) -> Option<KeySpec> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
        Some(inner) => parse_bracketed_key(inner),
        None if trimmed.chars().count() == 1 => {
            let ch = trimmed.chars().next()?;
            Some(KeySpec::normalized(KeyCode::Char(ch), KeyModifiers::NONE))
        }
        None => None,
    }
}

fn parse_bracketed_key(raw: &str) -> Option<KeySpec> {
    let parts: Vec<&str> = raw.split('-').collect();
    if parts.is_empty() {
        return None;
    }
    let mut mods = KeyModifiers::NONE;
    for part in &parts[0..parts.len().saturating_sub(1)] {
        match part.to_ascii_lowercase().as_str() {
            "c" | "ctrl" | "control" => mods |= KeyModifiers::CONTROL,
            "m" | "a" | "alt" | "meta" => mods |= KeyModifiers::ALT,
            "d" | "cmd" | "super" => mods |= KeyModifiers::SUPER,
            "s" | "shift" => mods |= KeyModifiers::SHIFT,
            _ => return None,
        }
    }
    let key = *parts.last()?;
    let code = parse_named_key(key)?;
    Some(KeySpec::normalized(code, mods))
}

fn parse_named_key(raw: &str) -> Option<KeyCode> {
    let lower = raw.to_ascii_lowercase();
    let code = match lower.as_str() {
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "backspace" | "bs" => KeyCode::Backspace,
        "tab" => KeyCode::Tab,
        "enter" | "cr" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "space" => KeyCode::Char(' '),
        "delete" | "del" => KeyCode::Delete,
        "insert" | "ins" => KeyCode::Insert,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        _ => {
            if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                if (1..=12).contains(&n) {
                    return Some(KeyCode::F(n));
                }
                return None;
            }
            if raw.chars().count() == 1 {
                KeyCode::Char(raw.chars().next()?)
            } else {
                return None;
            }
        }
    };
    Some(code)
}

fn format_key_spec(spec: &KeySpec) -> String {
    let mut parts: Vec<String> = Vec::new();
    if spec.mods.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl".to_string());
    }
    if spec.mods.contains(KeyModifiers::ALT) {
        parts.push("Alt".to_string());
    }
    if spec.mods.contains(KeyModifiers::SUPER) {
        parts.push("Super".to_string());
    }
    if spec.mods.contains(KeyModifiers::SHIFT) {
        parts.push("Shift".to_string());
    }
    parts.push(format_key_code(spec.code));
    parts.join("+")
}

fn format_key_code(code: KeyCode) -> String {
    match code {
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Insert => "Insert".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(ch) => ch.to_ascii_uppercase().to_string(),
        _ => "Key".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(code: KeyCode, mods: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, mods)
    }

    #[test]
    fn default_bindings_cover_every_command() {
        let keymaps = Keymaps::default();
        for command in Command::ALL {
            assert!(keymaps.shortcut_label(command).is_some(), "{:?}", command);
        }
        assert_eq!(keymaps.shortcut_label(Command::Save).as_deref(), Some("Ctrl+S"));
        assert_eq!(keymaps.shortcut_label(Command::SaveAs).as_deref(), Some("F12"));
    }

    #[test]
    fn shifted_letters_match_either_case() {
        let keymaps = Keymaps::default();
        let upper = event(KeyCode::Char('S'), KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        let lower = event(KeyCode::Char('s'), KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        assert_eq!(keymaps.command_for(&upper), Some(Command::SaveAs));
        assert_eq!(keymaps.command_for(&lower), Some(Command::SaveAs));
        let plain = event(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(keymaps.command_for(&plain), Some(Command::Save));
        assert_eq!(keymaps.command_for(&event(KeyCode::Char('s'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn config_overrides_and_unbinds() {
        let mut map = HashMap::new();
        map.insert("<C-w>".to_string(), "save".to_string());
        map.insert("<C-q>".to_string(), "noop".to_string());
        map.insert("<C-x>".to_string(), "explode".to_string());
        map.insert("<Hyper-x>".to_string(), "exit".to_string());
        let (keymaps, errors) = Keymaps::from_config(Some(&map));
        assert_eq!(
            keymaps.command_for(&event(KeyCode::Char('w'), KeyModifiers::CONTROL)),
            Some(Command::Save)
        );
        assert_eq!(keymaps.command_for(&event(KeyCode::Char('q'), KeyModifiers::CONTROL)), None);
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&"Invalid command: explode".to_string()));
        assert!(errors.contains(&"Invalid key: <Hyper-x>".to_string()));
    }

    #[test]
    fn parses_function_keys() {
        assert_eq!(parse_key("<F10>").map(|s| s.code), Some(KeyCode::F(10)));
        assert!(parse_key("<F13>").is_none());
        assert!(parse_key("").is_none());
        assert!(parse_key("abc").is_none());
    }
}
