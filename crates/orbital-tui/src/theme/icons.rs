//! Icon sets for Nerd Fonts, Unicode, and ASCII fallback.
//!
//! Item icons arrive as opaque names; this is where they become glyphs.

use orbital_engine::{IconRef, ItemStatus};

/// Icon mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconMode {
    /// Nerd Font icons (default, richest experience).
    #[default]
    Nerd,
    /// Standard Unicode symbols (wide compatibility).
    Unicode,
    /// ASCII-only fallback (maximum compatibility, also used with `NO_COLOR`).
    Ascii,
}

impl IconMode {
    /// Pick the mode from the environment, respecting `NO_COLOR`.
    pub fn from_env() -> Self {
        if std::env::var_os("NO_COLOR").is_some() {
            Self::Ascii
        } else {
            Self::Nerd
        }
    }
}

/// Icon set based on configured mode.
#[derive(Debug, Clone)]
pub struct IconSet {
    mode: IconMode,
}

impl Default for IconSet {
    fn default() -> Self {
        Self::new(IconMode::default())
    }
}

impl IconSet {
    /// Create a new icon set with the specified mode.
    pub fn new(mode: IconMode) -> Self {
        Self { mode }
    }

    /// Get the current icon mode.
    pub fn mode(&self) -> IconMode {
        self.mode
    }

    /// Resolve an item icon name. Unknown names get a generic dot.
    pub fn item(&self, icon: &IconRef) -> &'static str {
        match (icon.name(), self.mode) {
            ("briefcase", IconMode::Nerd) => "󰃖",
            ("briefcase", IconMode::Unicode) => "▣",
            ("briefcase", IconMode::Ascii) => "[B]",

            ("users", IconMode::Nerd) => "󰡉",
            ("users", IconMode::Unicode) => "☺",
            ("users", IconMode::Ascii) => "[U]",

            ("brain", IconMode::Nerd) => "󰧑",
            ("brain", IconMode::Unicode) => "✺",
            ("brain", IconMode::Ascii) => "[M]",

            ("cloud", IconMode::Nerd) => "󰅟",
            ("cloud", IconMode::Unicode) => "☁",
            ("cloud", IconMode::Ascii) => "[C]",

            ("file-check", IconMode::Nerd) => "󰈡",
            ("file-check", IconMode::Unicode) => "✓",
            ("file-check", IconMode::Ascii) => "[F]",

            ("shield", IconMode::Nerd) => "󰒃",
            ("shield", IconMode::Unicode) => "⛨",
            ("shield", IconMode::Ascii) => "[S]",

            (_, IconMode::Nerd) => "󰝥",
            (_, IconMode::Unicode) => "●",
            (_, IconMode::Ascii) => "[*]",
        }
    }

    // === Status Icons ===

    pub fn status(&self, status: ItemStatus) -> &'static str {
        match (status, self.mode) {
            (ItemStatus::Completed, IconMode::Nerd) => "󰄬",
            (ItemStatus::Completed, IconMode::Unicode) => "✓",
            (ItemStatus::Completed, IconMode::Ascii) => "[x]",
            (ItemStatus::InProgress, IconMode::Nerd) => "󰦖",
            (ItemStatus::InProgress, IconMode::Unicode) => "◐",
            (ItemStatus::InProgress, IconMode::Ascii) => "[~]",
            (ItemStatus::Pending, IconMode::Nerd) => "󰅖",
            (ItemStatus::Pending, IconMode::Unicode) => "○",
            (ItemStatus::Pending, IconMode::Ascii) => "[ ]",
        }
    }

    // === Playback Icons ===

    pub fn rotating(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd => "󰑖",
            IconMode::Unicode => "↻",
            IconMode::Ascii => "(>)",
        }
    }

    pub fn paused(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd => "󰏤",
            IconMode::Unicode => "⏸",
            IconMode::Ascii => "(=)",
        }
    }

    // === Orbit Furniture ===

    /// Dot used to draw the orbital track.
    pub fn track(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd | IconMode::Unicode => "·",
            IconMode::Ascii => ".",
        }
    }

    /// Glow trail under a node.
    pub fn glow(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd | IconMode::Unicode => "━",
            IconMode::Ascii => "=",
        }
    }

    /// Marker in front of the node under the keyboard cursor.
    pub fn cursor(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd => "󰅂",
            IconMode::Unicode => "▸",
            IconMode::Ascii => ">",
        }
    }

    /// One cell of the energy gauge, filled or empty.
    pub fn gauge(&self, filled: bool) -> &'static str {
        match (self.mode, filled) {
            (IconMode::Nerd | IconMode::Unicode, true) => "█",
            (IconMode::Nerd | IconMode::Unicode, false) => "░",
            (IconMode::Ascii, true) => "#",
            (IconMode::Ascii, false) => "-",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_nerd_mode() {
        let icons = IconSet::default();
        assert_eq!(icons.mode(), IconMode::Nerd);
    }

    #[test]
    fn test_known_item_icons() {
        let icons = IconSet::new(IconMode::Ascii);
        assert_eq!(icons.item(&IconRef::new("cloud")), "[C]");
        assert_eq!(icons.item(&IconRef::new("shield")), "[S]");

        let icons = IconSet::new(IconMode::Unicode);
        assert_eq!(icons.item(&IconRef::new("cloud")), "☁");
    }

    #[test]
    fn test_unknown_item_icon_falls_back() {
        let icons = IconSet::new(IconMode::Ascii);
        assert_eq!(icons.item(&IconRef::new("rocket")), "[*]");
    }

    #[test]
    fn test_ascii_icons_are_ascii() {
        let icons = IconSet::new(IconMode::Ascii);
        let all = [
            icons.rotating(),
            icons.paused(),
            icons.track(),
            icons.glow(),
            icons.cursor(),
            icons.gauge(true),
            icons.gauge(false),
            icons.status(ItemStatus::Completed),
            icons.status(ItemStatus::InProgress),
            icons.status(ItemStatus::Pending),
        ];
        for icon in all {
            assert!(icon.is_ascii(), "{icon:?} is not ASCII");
        }
    }
}
