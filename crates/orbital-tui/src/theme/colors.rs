//! Catppuccin color palettes for the orbit view.

use orbital_engine::ItemStatus;
use ratatui::style::Color;

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct Theme {
    // Backgrounds
    pub base: Color,
    pub surface: Color,
    pub overlay: Color,

    // Foregrounds, from front of the ring to the back
    pub text: Color,
    pub subtext: Color,
    pub muted: Color,

    // Accents
    pub primary: Color,
    pub secondary: Color,

    // Orbit furniture
    pub track: Color,
    pub core: Color,
    pub glow: Color,

    // Item status
    pub completed: Color,
    pub in_progress: Color,
    pub pending: Color,

    // Borders
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

impl Theme {
    /// Resolve a theme by name (`mocha`, `latte`, `contrast`).
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "mocha" => Some(Self::mocha()),
            "latte" => Some(Self::latte()),
            "contrast" | "high-contrast" => Some(Self::high_contrast()),
            _ => None,
        }
    }

    /// Catppuccin Mocha theme (default dark theme).
    pub fn mocha() -> Self {
        Self {
            base: Color::Rgb(30, 30, 46),       // #1e1e2e
            surface: Color::Rgb(49, 50, 68),    // #313244
            overlay: Color::Rgb(69, 71, 90),    // #45475a

            text: Color::Rgb(205, 214, 244),    // #cdd6f4
            subtext: Color::Rgb(166, 173, 200), // #a6adc8
            muted: Color::Rgb(108, 112, 134),   // #6c7086

            primary: Color::Rgb(180, 190, 254),   // #b4befe (lavender)
            secondary: Color::Rgb(148, 226, 213), // #94e2d5 (teal)

            track: Color::Rgb(88, 91, 112),   // #585b70
            core: Color::Rgb(203, 166, 247),  // #cba6f7 (mauve)
            glow: Color::Rgb(137, 180, 250),  // #89b4fa (blue)

            completed: Color::Rgb(166, 227, 161),   // #a6e3a1 (green)
            in_progress: Color::Rgb(249, 226, 175), // #f9e2af (yellow)
            pending: Color::Rgb(108, 112, 134),     // #6c7086

            border: Color::Rgb(69, 71, 90),            // #45475a
            border_focused: Color::Rgb(180, 190, 254), // #b4befe (lavender)
        }
    }

    /// Catppuccin Latte theme (light theme).
    pub fn latte() -> Self {
        Self {
            base: Color::Rgb(239, 241, 245),    // #eff1f5
            surface: Color::Rgb(230, 233, 239), // #e6e9ef
            overlay: Color::Rgb(220, 224, 232), // #dce0e8

            text: Color::Rgb(76, 79, 105),    // #4c4f69
            subtext: Color::Rgb(92, 95, 119), // #5c5f77
            muted: Color::Rgb(140, 143, 161), // #8c8fa1

            primary: Color::Rgb(114, 135, 253),  // #7287fd (lavender)
            secondary: Color::Rgb(23, 146, 153), // #179299 (teal)

            track: Color::Rgb(172, 176, 190), // #acb0be
            core: Color::Rgb(136, 57, 239),   // #8839ef (mauve)
            glow: Color::Rgb(30, 102, 245),   // #1e66f5 (blue)

            completed: Color::Rgb(64, 160, 43),    // #40a02b (green)
            in_progress: Color::Rgb(223, 142, 29), // #df8e1d (yellow)
            pending: Color::Rgb(140, 143, 161),    // #8c8fa1

            border: Color::Rgb(188, 192, 204),         // #bcc0cc
            border_focused: Color::Rgb(114, 135, 253), // #7287fd (lavender)
        }
    }

    /// High contrast theme for accessibility.
    pub fn high_contrast() -> Self {
        Self {
            base: Color::Black,
            surface: Color::Rgb(20, 20, 20),
            overlay: Color::Rgb(40, 40, 40),

            text: Color::White,
            subtext: Color::Rgb(200, 200, 200),
            muted: Color::Rgb(150, 150, 150),

            primary: Color::Cyan,
            secondary: Color::Magenta,

            track: Color::Rgb(120, 120, 120),
            core: Color::LightMagenta,
            glow: Color::LightBlue,

            completed: Color::Green,
            in_progress: Color::Yellow,
            pending: Color::Rgb(150, 150, 150),

            border: Color::White,
            border_focused: Color::Cyan,
        }
    }

    /// Color of an item status badge.
    pub fn status(&self, status: ItemStatus) -> Color {
        match status {
            ItemStatus::Completed => self.completed,
            ItemStatus::InProgress => self.in_progress,
            ItemStatus::Pending => self.pending,
        }
    }

    /// Foreground shade for a node opacity: front nodes bright, back nodes dim.
    pub fn shade(&self, opacity: f64) -> Color {
        if opacity >= 0.85 {
            self.text
        } else if opacity >= 0.65 {
            self.subtext
        } else {
            self.muted
        }
    }
}
