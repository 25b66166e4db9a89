//! Mapping between layout units and terminal cells.

use ratatui::layout::Rect;

/// Terminal cells are roughly twice as tall as they are wide.
pub const CELL_ASPECT: f64 = 2.0;

/// Extra room around the track, as a fraction of the radius, for labels.
pub const MARGIN: f64 = 0.2;

/// Fits a circle of the configured radius into a terminal area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    area: Rect,
    center_x: f64,
    center_y: f64,
    units_per_col: f64,
    units_per_row: f64,
}

impl Projection {
    /// Scale so `radius * (1 + MARGIN)` fits both axes of `area`.
    pub fn fit(area: Rect, radius: f64) -> Self {
        let extent = radius * (1.0 + MARGIN);
        let half_cols = (f64::from(area.width) / 2.0).max(1.0);
        let half_rows = (f64::from(area.height) / 2.0).max(1.0);

        let units_per_col = (extent / half_cols).max(extent / (half_rows * CELL_ASPECT));
        Self {
            area,
            center_x: f64::from(area.x) + f64::from(area.width) / 2.0,
            center_y: f64::from(area.y) + f64::from(area.height) / 2.0,
            units_per_col,
            units_per_row: units_per_col * CELL_ASPECT,
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Layout units covered by one column.
    pub fn units_per_col(&self) -> f64 {
        self.units_per_col
    }

    /// Cell of the orbit centre.
    pub fn center(&self) -> (u16, u16) {
        self.to_cell_clamped(0.0, 0.0)
    }

    /// Cell containing layout point `(x, y)`, if it lies inside the area.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_cell(&self, x: f64, y: f64) -> Option<(u16, u16)> {
        let col = (self.center_x + x / self.units_per_col).floor();
        let row = (self.center_y + y / self.units_per_row).floor();

        let left = f64::from(self.area.x);
        let top = f64::from(self.area.y);
        let right = f64::from(self.area.right());
        let bottom = f64::from(self.area.bottom());
        if col < left || col >= right || row < top || row >= bottom {
            return None;
        }
        Some((col as u16, row as u16))
    }

    /// Like [`Projection::to_cell`] but pinned to the nearest edge cell.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_cell_clamped(&self, x: f64, y: f64) -> (u16, u16) {
        let max_col = f64::from(self.area.right().saturating_sub(1).max(self.area.x));
        let max_row = f64::from(self.area.bottom().saturating_sub(1).max(self.area.y));
        let col = (self.center_x + x / self.units_per_col)
            .floor()
            .clamp(f64::from(self.area.x), max_col);
        let row = (self.center_y + y / self.units_per_row)
            .floor()
            .clamp(f64::from(self.area.y), max_row);
        (col as u16, row as u16)
    }

    /// Layout point at the centre of cell `(col, row)`.
    pub fn to_layout(&self, col: u16, row: u16) -> (f64, f64) {
        let x = (f64::from(col) + 0.5 - self.center_x) * self.units_per_col;
        let y = (f64::from(row) + 0.5 - self.center_y) * self.units_per_row;
        (x, y)
    }

    /// Number of columns spanned by `units` layout units, at least one.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn cols_for(&self, units: f64) -> u16 {
        (units / self.units_per_col).round().clamp(1.0, f64::from(u16::MAX)) as u16
    }
}
