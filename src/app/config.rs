use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use ratatui::prelude::Color;
use serde::Deserialize;

use super::theme::Theme;

pub(crate) const DEFAULT_TAB_WIDTH: usize = 4;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    pub(crate) theme: Option<String>,
    pub(crate) tab_width: Option<usize>,
    pub(crate) themes: Option<HashMap<String, ThemeOverride>>,
    pub(crate) keys: Option<HashMap<String, String>>,
}

pub fn load_config() -> Result<Config> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    candidates.push(PathBuf::from("codenest.toml"));
    candidates.push(PathBuf::from(".codenest.toml"));
    if let Ok(home) = std::env::var("HOME") {
        candidates.push(PathBuf::from(home).join(".config/codenest/config.toml"));
    }

    for path in candidates {
        if !path.exists() {
            continue;
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        return parse_config(&content).with_context(|| format!("parsing {}", path.display()));
    }
    Ok(Config::default())
}

pub(crate) fn parse_config(content: &str) -> Result<Config> {
    let cfg: Config = toml::from_str(content)?;
    Ok(cfg)
}

impl Config {
    pub(crate) fn tab_width(&self) -> usize {
        match self.tab_width {
            Some(width) if width > 0 => width,
            _ => DEFAULT_TAB_WIDTH,
        }
    }

    /// Resolves the named theme and applies any `[themes.<name>]` overrides.
    /// Unknown names fall back to the default theme and are reported.
    pub(crate) fn resolve_theme(&self) -> (Theme, String, Option<String>) {
        let requested = self.theme.clone().unwrap_or_else(|| "dark".to_string());
        let (mut theme, name, warning) = match Theme::from_name(&requested) {
            Some(theme) => (theme, requested.to_ascii_lowercase(), None),
            None => (
                Theme::default_theme(),
                "dark".to_string(),
                Some(format!("Unknown theme: {}", requested)),
            ),
        };
        if let Some(overrides) = self.themes.as_ref().and_then(|m| m.get(&name)) {
            apply_theme_overrides(&mut theme, overrides);
        }
        (theme, name, warning)
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub(crate) struct ThemeOverride {
    pub(crate) menu_fg: Option<String>,
    pub(crate) menu_bg: Option<String>,
    pub(crate) editor_fg: Option<String>,
    pub(crate) editor_bg: Option<String>,
    pub(crate) gutter_fg: Option<String>,
    pub(crate) gutter_bg: Option<String>,
    pub(crate) status_fg: Option<String>,
    pub(crate) status_bg: Option<String>,
    pub(crate) dialog_fg: Option<String>,
    pub(crate) dialog_bg: Option<String>,
    pub(crate) highlight_fg: Option<String>,
    pub(crate) highlight_bg: Option<String>,
    pub(crate) disabled_fg: Option<String>,
}

pub(crate) fn apply_theme_overrides(theme: &mut Theme, overrides: &ThemeOverride) {
    override_color(&mut theme.menu_fg, &overrides.menu_fg);
    override_color(&mut theme.menu_bg, &overrides.menu_bg);
    override_color(&mut theme.editor_fg, &overrides.editor_fg);
    override_color(&mut theme.editor_bg, &overrides.editor_bg);
    override_color(&mut theme.gutter_fg, &overrides.gutter_fg);
    override_color(&mut theme.gutter_bg, &overrides.gutter_bg);
    override_color(&mut theme.status_fg, &overrides.status_fg);
    override_color(&mut theme.status_bg, &overrides.status_bg);
    override_color(&mut theme.dialog_fg, &overrides.dialog_fg);
    override_color(&mut theme.dialog_bg, &overrides.dialog_bg);
    override_color(&mut theme.highlight_fg, &overrides.highlight_fg);
    override_color(&mut theme.highlight_bg, &overrides.highlight_bg);
    override_color(&mut theme.disabled_fg, &overrides.disabled_fg);
}

fn override_color(slot: &mut Color, value: &Option<String>) {
    if let Some(color) = value.as_deref().and_then(parse_color) {
        *slot = color;
    }
}

fn parse_color(value: &str) -> Option<Color> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
