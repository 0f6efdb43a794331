use super::command::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub command: Command,
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Menu {
    pub title: &'static str,
    /// Opens this menu together with Alt.
    pub hotkey: char,
    pub items: &'static [MenuItem],
}

pub const MENUS: &[Menu] = &[
    Menu {
        title: "File",
        hotkey: 'f',
        items: &[
            MenuItem { label: "New", command: Command::New, enabled: true },
            MenuItem { label: "Open", command: Command::Open, enabled: true },
            MenuItem { label: "Save", command: Command::Save, enabled: true },
            MenuItem { label: "Save As", command: Command::SaveAs, enabled: true },
            MenuItem { label: "Exit", command: Command::Exit, enabled: true },
        ],
    },
    Menu {
        title: "Edit",
        hotkey: 'e',
        items: &[MenuItem { label: "Find", command: Command::Find, enabled: false }],
    },
    Menu {
        title: "Help",
        hotkey: 'h',
        items: &[MenuItem { label: "About", command: Command::About, enabled: true }],
    },
];

pub(crate) fn menu_for_hotkey(ch: char) -> Option<usize> {
    let ch = ch.to_ascii_lowercase();
    MENUS.iter().position(|m| m.hotkey == ch)
}

/// Which dropdown is open and which of its items is highlighted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuState {
    pub(crate) menu: usize,
    pub(crate) item: usize,
}

impl MenuState {
    pub(crate) fn open(menu: usize) -> Self {
        let mut state = Self {
            menu: menu.min(MENUS.len() - 1),
            item: 0,
        };
        state.item = state.first_enabled().unwrap_or(0);
        state
    }

    pub(crate) fn current(&self) -> &'static Menu {
        &MENUS[self.menu]
    }

    pub(crate) fn next_menu(&mut self) {
        *self = Self::open((self.menu + 1) % MENUS.len());
    }

    pub(crate) fn prev_menu(&mut self) {
        *self = Self::open((self.menu + MENUS.len() - 1) % MENUS.len());
    }

    /// Moves to the next enabled item, wrapping. Disabled items are never
    /// highlighted.
    pub(crate) fn next_item(&mut self) {
        self.step(1);
    }

    pub(crate) fn prev_item(&mut self) {
        self.step(self.current().items.len().saturating_sub(1));
    }

    /// The command to run if the highlighted item can be activated.
    pub(crate) fn activate(&self) -> Option<Command> {
        self.current()
            .items
            .get(self.item)
            .filter(|item| item.enabled)
            .map(|item| item.command)
    }

    fn step(&mut self, by: usize) {
        let items = self.current().items;
        if items.is_empty() {
            return;
        }
        let mut idx = self.item;
        for _ in 0..items.len() {
            idx = (idx + by) % items.len();
            if items[idx].enabled {
                self.item = idx;
                return;
            }
        }
    }

    fn first_enabled(&self) -> Option<usize> {
        self.current().items.iter().position(|item| item.enabled)
    }
}
