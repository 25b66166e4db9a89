//! The orbit view: track, core, nodes, and the detail card.

use orbital_engine::{ItemId, OrbitalEngine, TimelineItem, MAX_ENERGY};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use super::placement::{label_text, place_nodes, PlacedNode};
use super::projection::Projection;
use crate::theme::{BorderSet, IconSet, Theme};

/// Smallest inner area the orbit is drawn in.
pub const MIN_ORBIT_WIDTH: u16 = 24;
pub const MIN_ORBIT_HEIGHT: u16 = 8;

/// Dots drawn along the track.
const TRACK_SAMPLES: u32 = 72;

/// Cells in the energy gauge.
const GAUGE_CELLS: usize = 10;

/// Text shown at the centre of the ring.
const CORE_LABEL: &str = "AI";

/// Renders the ring of items held by an [`OrbitalEngine`].
pub struct OrbitWidget<'a> {
    engine: &'a OrbitalEngine,
    theme: &'a Theme,
    icons: &'a IconSet,
    borders: &'a BorderSet,
    cursor: Option<ItemId>,
    title: &'a str,
}

impl<'a> OrbitWidget<'a> {
    pub fn new(
        engine: &'a OrbitalEngine,
        theme: &'a Theme,
        icons: &'a IconSet,
        borders: &'a BorderSet,
    ) -> Self {
        Self {
            engine,
            theme,
            icons,
            borders,
            cursor: None,
            title: " Services ",
        }
    }

    /// Mark the item under the keyboard cursor.
    #[must_use]
    pub fn cursor(mut self, cursor: Option<ItemId>) -> Self {
        self.cursor = cursor;
        self
    }

    #[must_use]
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    /// Inner area the ring is projected into, given the widget's outer area.
    pub fn inner(area: Rect) -> Rect {
        Block::default().borders(Borders::ALL).inner(area)
    }

    /// Whether the ring is drawn into `inner` rather than a size notice.
    pub fn fits(inner: Rect) -> bool {
        inner.width >= MIN_ORBIT_WIDTH && inner.height >= MIN_ORBIT_HEIGHT
    }

    fn render_message(&self, area: Rect, buf: &mut Buffer, text: &str) {
        if area.height == 0 {
            return;
        }
        let row = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
        Paragraph::new(text)
            .style(Style::default().fg(self.theme.muted))
            .alignment(Alignment::Center)
            .render(row, buf);
    }

    fn render_track(&self, projection: &Projection, buf: &mut Buffer) {
        let radius = self.engine.config().radius;
        let style = Style::default().fg(self.theme.track);
        for sample in 0..TRACK_SAMPLES {
            let rad = (f64::from(sample) * 360.0 / f64::from(TRACK_SAMPLES)).to_radians();
            if let Some(pos) = projection.to_cell(radius * rad.cos(), radius * rad.sin()) {
                if let Some(cell) = buf.cell_mut(pos) {
                    cell.set_symbol(self.icons.track()).set_style(style);
                }
            }
        }
    }

    fn render_core(&self, projection: &Projection, buf: &mut Buffer) {
        let (col, row) = projection.center();
        let style = Style::default()
            .fg(self.theme.core)
            .add_modifier(Modifier::BOLD);
        put(buf, projection.area(), col.saturating_sub(1), row, CORE_LABEL, style);
    }

    /// Glow bar under the node, only on cells nothing else has claimed.
    fn render_glow(&self, node: &PlacedNode<'_>, projection: &Projection, buf: &mut Buffer) {
        let area = projection.area();
        let row = node.anchor.1 + 1;
        if row >= area.bottom() {
            return;
        }
        let width = projection.cols_for(node.item.glow_diameter() * node.transform.scale);
        let start = node.anchor.0.saturating_sub(width / 2).max(area.x);
        let end = start.saturating_add(width).min(area.right());
        let style = Style::default().fg(self.theme.glow);
        for col in start..end {
            if let Some(cell) = buf.cell_mut((col, row)) {
                if cell.symbol() == " " {
                    cell.set_symbol(self.icons.glow()).set_style(style);
                }
            }
        }
    }

    fn render_label(&self, node: &PlacedNode<'_>, area: Rect, buf: &mut Buffer) {
        let mut style = Style::default().fg(self.theme.shade(node.transform.opacity));
        if node.transform.scale >= 1.0 || node.expanded {
            style = style.add_modifier(Modifier::BOLD);
        }
        let under_cursor = self.cursor == Some(node.id());
        if under_cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }

        let label = node.label;
        put(buf, area, label.x, label.y, &label_text(node.item, self.icons), style);

        let icon = self.icons.item(&node.item.icon);
        let icon_style = style.fg(self.theme.status(node.item.status));
        put(buf, area, label.x, label.y, icon, icon_style);

        if under_cursor {
            let marker = self.icons.cursor();
            let gap = u16::try_from(marker.width() + 1).unwrap_or(u16::MAX);
            if label.x >= area.x + gap {
                let style = Style::default().fg(self.theme.primary);
                put(buf, area, label.x - gap, label.y, marker, style);
            }
        }
    }

    fn render_card(&self, item: &TimelineItem, card: Rect, buf: &mut Buffer) {
        Clear.render(card, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(self.borders.card(item.status))
            .border_style(Style::default().fg(self.theme.border_focused))
            .title(Line::styled(
                format!(" {} ", item.title),
                Style::default()
                    .fg(self.theme.text)
                    .add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(self.theme.surface));
        let inner = block.inner(card);
        block.render(card, buf);

        let text = Rect::new(
            inner.x.saturating_add(1),
            inner.y,
            inner.width.saturating_sub(2),
            inner.height,
        );
        if text.width == 0 {
            return;
        }
        let mut rows = text.y..text.bottom();

        if let Some(row) = rows.next() {
            let status = format!("{} {}", self.icons.status(item.status), item.status);
            let style = Style::default().fg(self.theme.status(item.status));
            put(buf, text, text.x, row, &status, style);
        }
        if let Some(row) = rows.next() {
            let gauge = energy_gauge(item.clamped_energy(), self.icons);
            put(buf, text, text.x, row, &gauge, Style::default().fg(self.theme.glow));
        }
        let body = Style::default().fg(self.theme.subtext);
        for (row, line) in rows.zip(textwrap::wrap(&item.content, usize::from(text.width))) {
            put(buf, text, text.x, row, &line, body);
        }
    }
}

impl Widget for OrbitWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(self.borders.frame())
            .border_style(Style::default().fg(self.theme.border))
            .title(Line::styled(self.title, Style::default().fg(self.theme.primary)));
        let inner = block.inner(area);
        block.render(area, buf);

        if !Self::fits(inner) {
            self.render_message(inner, buf, "Too small");
            return;
        }

        let projection = Projection::fit(inner, self.engine.config().radius);
        self.render_track(&projection, buf);
        self.render_core(&projection, buf);

        if self.engine.items().is_empty() {
            self.render_message(inner, buf, "No items");
            return;
        }

        let placed = place_nodes(self.engine, &projection, self.icons);
        for node in &placed {
            self.render_glow(node, &projection, buf);
            self.render_label(node, inner, buf);
        }
        // The card goes over everything, whatever its node's depth.
        for node in &placed {
            if let Some(card) = node.card {
                self.render_card(node.item, card, buf);
            }
        }
    }
}

/// `Energy ########-- 88` style gauge line.
pub fn energy_gauge(energy: f64, icons: &IconSet) -> String {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let filled = ((energy / MAX_ENERGY) * GAUGE_CELLS as f64)
        .round()
        .clamp(0.0, GAUGE_CELLS as f64) as usize;
    let bar: String = (0..GAUGE_CELLS)
        .map(|cell| icons.gauge(cell < filled))
        .collect();
    format!("Energy {bar} {energy:.0}")
}

/// Write `text` at `(x, y)`, clipped to `clip`.
fn put(buf: &mut Buffer, clip: Rect, x: u16, y: u16, text: &str, style: Style) {
    if x < clip.x || x >= clip.right() || y < clip.y || y >= clip.bottom() {
        return;
    }
    let max_width = usize::from(clip.right() - x);
    buf.set_stringn(x, y, text, max_width, style);
}
