use ratatui::prelude::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    pub(crate) menu_fg: Color,
    pub(crate) menu_bg: Color,
    pub(crate) editor_fg: Color,
    pub(crate) editor_bg: Color,
    pub(crate) gutter_fg: Color,
    pub(crate) gutter_bg: Color,
    pub(crate) status_fg: Color,
    pub(crate) status_bg: Color,
    pub(crate) dialog_fg: Color,
    pub(crate) dialog_bg: Color,
    pub(crate) highlight_fg: Color,
    pub(crate) highlight_bg: Color,
    pub(crate) disabled_fg: Color,
}

impl Theme {
    pub(crate) fn default_theme() -> Self {
        Self::dark()
    }

    pub(crate) fn dark() -> Self {
        Self {
            menu_fg: Color::White,
            menu_bg: Color::Rgb(112, 128, 144),
            editor_fg: Color::White,
            editor_bg: Color::Black,
            gutter_fg: Color::White,
            gutter_bg: Color::Black,
            status_fg: Color::White,
            status_bg: Color::Black,
            dialog_fg: Color::White,
            dialog_bg: Color::Rgb(48, 48, 48),
            highlight_fg: Color::Black,
            highlight_bg: Color::Rgb(169, 169, 169),
            disabled_fg: Color::DarkGray,
        }
    }

    pub(crate) fn light() -> Self {
        Self {
            menu_fg: Color::Black,
            menu_bg: Color::Rgb(220, 220, 220),
            editor_fg: Color::Black,
            editor_bg: Color::White,
            gutter_fg: Color::DarkGray,
            gutter_bg: Color::Rgb(240, 240, 240),
            status_fg: Color::Black,
            status_bg: Color::Rgb(220, 220, 220),
            dialog_fg: Color::Black,
            dialog_bg: Color::Rgb(245, 245, 245),
            highlight_fg: Color::White,
            highlight_bg: Color::Rgb(0, 120, 215),
            disabled_fg: Color::Gray,
        }
    }

    pub(crate) fn slate() -> Self {
        Self {
            menu_fg: Color::White,
            menu_bg: Color::Rgb(47, 79, 79),
            editor_fg: Color::Rgb(200, 200, 200),
            editor_bg: Color::Rgb(30, 34, 40),
            gutter_fg: Color::Rgb(120, 130, 140),
            gutter_bg: Color::Rgb(30, 34, 40),
            status_fg: Color::Rgb(200, 200, 200),
            status_bg: Color::Rgb(47, 79, 79),
            dialog_fg: Color::Rgb(200, 200, 200),
            dialog_bg: Color::Rgb(40, 44, 52),
            highlight_fg: Color::Black,
            highlight_bg: Color::Rgb(102, 153, 204),
            disabled_fg: Color::Rgb(90, 90, 90),
        }
    }

    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            "slate" => Some(Self::slate()),
            _ => None,
        }
    }
}
