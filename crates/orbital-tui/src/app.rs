//! Application state for the orbit view.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use orbital_engine::{
    HitTarget, ItemId, OrbitalController, OrbitalEngine, RotationTick, Transition,
};
use ratatui::layout::{Position, Rect};
use tracing::debug;

use crate::event::Action;
use crate::layout::{screen_areas, visible_orbit};
use crate::orbit::{node_at, place_nodes, OrbitWidget, Projection};
use crate::theme::{BorderSet, IconMode, IconSet, Theme};

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Engine plus rotation clock.
    pub controller: OrbitalController,

    pub theme: Theme,
    pub icons: IconSet,
    pub borders: BorderSet,

    /// Index of the item under the keyboard cursor.
    pub cursor: Option<usize>,

    /// Whether the help overlay is visible.
    pub show_help: bool,

    /// Whether the app should quit.
    pub should_quit: bool,

    /// Last known terminal area.
    area: Rect,
}

impl App {
    pub fn new(engine: OrbitalEngine, theme: Theme, icon_mode: IconMode) -> Self {
        Self {
            controller: OrbitalController::new(engine),
            theme,
            icons: IconSet::new(icon_mode),
            borders: BorderSet::new(icon_mode),
            cursor: None,
            show_help: false,
            should_quit: false,
            area: Rect::new(0, 0, 80, 24),
        }
    }

    /// App over the default services, ASCII icons, 80x24.
    #[cfg(test)]
    pub fn new_for_test() -> Self {
        let engine = OrbitalEngine::new(
            orbital_engine::default_services(),
            orbital_engine::OrbitalConfig::default(),
        )
        .unwrap();
        Self::new(engine, Theme::default(), IconMode::Ascii)
    }

    pub fn engine(&self) -> &OrbitalEngine {
        self.controller.engine()
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Id of the item under the keyboard cursor.
    pub fn cursor_item(&self) -> Option<ItemId> {
        self.cursor
            .and_then(|index| self.engine().items().get(index))
            .map(|item| item.id)
    }

    /// Inner area the ring is drawn into.
    pub fn orbit_area(&self) -> Rect {
        OrbitWidget::inner(screen_areas(self.area).orbit)
    }

    pub fn projection(&self) -> Projection {
        Projection::fit(self.orbit_area(), self.engine().config().radius)
    }

    /// Handle an action.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.should_quit = true;
                }
                return;
            }
            Action::Help => {
                self.show_help = !self.show_help;
                return;
            }
            _ => {}
        }

        // If help is showing, any key closes it
        if self.show_help {
            self.show_help = false;
            return;
        }

        let total = self.engine().items().len();
        match action {
            Action::Back => {
                self.controller.clear_focus();
            }
            Action::Select => {
                if self.cursor.is_none() {
                    self.cursor = self.front_index();
                }
                if let Some(id) = self.cursor_item() {
                    self.controller.toggle_expansion(id);
                }
            }
            Action::Next if total > 0 => {
                self.cursor = Some(self.cursor.map_or(0, |i| (i + 1) % total));
            }
            Action::Prev if total > 0 => {
                self.cursor = Some(self.cursor.map_or(total - 1, |i| (i + total - 1) % total));
            }
            Action::Item(index) if index < total => {
                self.cursor = Some(index);
                if let Some(id) = self.cursor_item() {
                    self.controller.toggle_expansion(id);
                }
            }
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
            self.click_cell(mouse.column, mouse.row);
        }
    }

    /// Resolve a click on cell `(col, row)` and dispatch it.
    ///
    /// Labels and the detail card take precedence; anywhere else inside the
    /// orbit falls back to the engine's hit test. Clicks outside the orbit,
    /// or while a size notice hides the ring, are dropped.
    pub fn click_cell(&mut self, col: u16, row: u16) -> Option<(HitTarget, Transition)> {
        let inner = visible_orbit(self.area)?;
        if !inner.contains(Position::new(col, row)) {
            return None;
        }

        let projection = self.projection();
        let target = {
            let placed = place_nodes(self.engine(), &projection, &self.icons);
            match node_at(&placed, col, row) {
                Some(node) => HitTarget::Item(node.id()),
                None => {
                    let (x, y) = projection.to_layout(col, row);
                    self.controller.hit(x, y)
                }
            }
        };

        if let HitTarget::Item(id) = target {
            self.cursor = self.engine().index_of(id);
        }
        let transition = self.controller.click(target);
        debug!(col, row, ?target, "click");
        Some((target, transition))
    }

    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.area = Rect::new(0, 0, width, height);
    }

    /// Apply a rotation tick. Returns whether the ring moved.
    pub fn on_tick(&mut self, tick: RotationTick) -> bool {
        self.controller.on_tick(tick)
    }

    fn front_index(&self) -> Option<usize> {
        self.engine().paint_order().last().map(|node| node.index)
    }
}
