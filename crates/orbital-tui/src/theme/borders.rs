//! Border sets for the orbit frame, detail cards and overlays.
//!
//! The detail card's border carries the item's status, so a card reads as
//! completed, in progress or pending even without color.

use orbital_engine::ItemStatus;
use ratatui::symbols::border;

use super::icons::IconMode;

/// Plain ASCII box.
const ASCII: border::Set = border::Set {
    top_left: "+",
    top_right: "+",
    bottom_left: "+",
    bottom_right: "+",
    vertical_left: "|",
    vertical_right: "|",
    horizontal_top: "-",
    horizontal_bottom: "-",
};

/// ASCII box with doubled horizontals.
const ASCII_DOUBLE: border::Set = border::Set {
    horizontal_top: "=",
    horizontal_bottom: "=",
    ..ASCII
};

/// ASCII box drawn in hashes.
const ASCII_HEAVY: border::Set = border::Set {
    top_left: "#",
    top_right: "#",
    bottom_left: "#",
    bottom_right: "#",
    vertical_left: "#",
    vertical_right: "#",
    horizontal_top: "#",
    horizontal_bottom: "#",
};

/// Border set for an icon mode.
#[derive(Debug, Clone, Copy)]
pub struct BorderSet {
    ascii: bool,
}

impl Default for BorderSet {
    fn default() -> Self {
        Self::new(IconMode::default())
    }
}

impl BorderSet {
    pub fn new(mode: IconMode) -> Self {
        Self {
            ascii: mode == IconMode::Ascii,
        }
    }

    /// Frame around the orbit view.
    pub fn frame(self) -> border::Set {
        if self.ascii {
            ASCII
        } else {
            border::ROUNDED
        }
    }

    /// Detail card for an item: heavier as the item gets further along.
    pub fn card(self, status: ItemStatus) -> border::Set {
        match (status, self.ascii) {
            (ItemStatus::Completed, false) => border::THICK,
            (ItemStatus::InProgress, false) => border::DOUBLE,
            (ItemStatus::Pending, false) => border::PLAIN,
            (ItemStatus::Completed, true) => ASCII_HEAVY,
            (ItemStatus::InProgress, true) => ASCII_DOUBLE,
            (ItemStatus::Pending, true) => ASCII,
        }
    }

    /// Help overlay.
    pub fn overlay(self) -> border::Set {
        if self.ascii {
            ASCII_DOUBLE
        } else {
            border::THICK
        }
    }
}
