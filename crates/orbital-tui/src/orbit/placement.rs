//! Placement of nodes and the detail card in terminal cells.
//!
//! Placement is derived from the engine state and the projection alone, so the
//! renderer and the mouse handler always agree on where a node is.

use orbital_engine::{ItemId, NodeTransform, OrbitalEngine, TimelineItem};
use ratatui::layout::{Position, Rect};
use unicode_width::UnicodeWidthStr;

use super::projection::Projection;
use crate::theme::IconSet;

/// Widest the detail card may grow, in columns.
pub const CARD_MAX_WIDTH: u16 = 44;

/// Fixed rows of the card besides the wrapped content: borders, status, gauge.
const CARD_CHROME_ROWS: u16 = 4;

/// A node positioned on the terminal grid.
#[derive(Debug, Clone)]
pub struct PlacedNode<'a> {
    pub item: &'a TimelineItem,
    pub transform: NodeTransform,
    pub expanded: bool,
    /// Cell of the node centre.
    pub anchor: (u16, u16),
    /// Cells covered by the icon and title.
    pub label: Rect,
    /// Detail card, for the expanded node only.
    pub card: Option<Rect>,
}

impl PlacedNode<'_> {
    pub fn id(&self) -> ItemId {
        self.item.id
    }

    /// Whether `(col, row)` lies on the label or the card.
    pub fn contains(&self, col: u16, row: u16) -> bool {
        let pos = Position::new(col, row);
        self.label.contains(pos) || self.card.is_some_and(|card| card.contains(pos))
    }
}

/// Text drawn for a node: icon glyph and title.
pub fn label_text(item: &TimelineItem, icons: &IconSet) -> String {
    format!("{} {}", icons.item(&item.icon), item.title)
}

/// Place every node, back to front.
pub fn place_nodes<'a>(
    engine: &'a OrbitalEngine,
    projection: &Projection,
    icons: &IconSet,
) -> Vec<PlacedNode<'a>> {
    let area = projection.area();
    engine
        .paint_order()
        .into_iter()
        .map(|node| {
            let anchor = projection.to_cell_clamped(node.transform.x, node.transform.y);
            let label = centered_label(anchor, label_width(node.item, icons), area);
            let card = node.expanded.then(|| card_rect(node.item, label, area));
            PlacedNode {
                item: node.item,
                transform: node.transform,
                expanded: node.expanded,
                anchor,
                label,
                card,
            }
        })
        .collect()
}

/// Front-most node under `(col, row)`.
pub fn node_at<'a, 'b>(
    placed: &'b [PlacedNode<'a>],
    col: u16,
    row: u16,
) -> Option<&'b PlacedNode<'a>> {
    placed.iter().rev().find(|node| node.contains(col, row))
}

#[allow(clippy::cast_possible_truncation)]
fn label_width(item: &TimelineItem, icons: &IconSet) -> u16 {
    label_text(item, icons).width().min(usize::from(u16::MAX)) as u16
}

/// One-row rect of `width` centred on `anchor`, shifted to stay inside `area`.
fn centered_label(anchor: (u16, u16), width: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let max_x = area.right().saturating_sub(width);
    let x = anchor.0.saturating_sub(width / 2).clamp(area.x, max_x.max(area.x));
    Rect::new(x, anchor.1, width, 1)
}

/// Card below the label when there is room, above it otherwise.
#[allow(clippy::cast_possible_truncation)]
fn card_rect(item: &TimelineItem, label: Rect, area: Rect) -> Rect {
    let width = CARD_MAX_WIDTH.min(area.width);
    let text_width = usize::from(width.saturating_sub(4).max(1));
    let content_rows = textwrap::wrap(&item.content, text_width)
        .len()
        .min(usize::from(u16::MAX)) as u16;
    let height = (content_rows + CARD_CHROME_ROWS).min(area.height);

    let max_x = area.right().saturating_sub(width).max(area.x);
    let x = (label.x + label.width / 2)
        .saturating_sub(width / 2)
        .clamp(area.x, max_x);

    let below = label.y + 1;
    let y = if below + height <= area.bottom() {
        below
    } else if label.y >= area.y + height {
        label.y - height
    } else {
        area.bottom().saturating_sub(height).max(area.y)
    };

    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::IconMode;
    use orbital_engine::{default_services, OrbitalConfig};

    fn setup(area: Rect) -> (OrbitalEngine, Projection, IconSet) {
        let engine = OrbitalEngine::new(default_services(), OrbitalConfig::default()).unwrap();
        let projection = Projection::fit(area, engine.config().radius);
        (engine, projection, IconSet::new(IconMode::Ascii))
    }

    #[test]
    fn test_labels_stay_inside_area() {
        let area = Rect::new(1, 1, 78, 20);
        let (engine, projection, icons) = setup(area);
        for node in place_nodes(&engine, &projection, &icons) {
            assert!(node.label.x >= area.x);
            assert!(node.label.right() <= area.right());
            assert!(node.label.y >= area.y && node.label.y < area.bottom());
        }
    }

    #[test]
    fn test_front_node_on_the_right() {
        let area = Rect::new(0, 0, 80, 20);
        let (engine, projection, icons) = setup(area);
        let placed = place_nodes(&engine, &projection, &icons);

        // Painted last, so it is the front node: item 1 at angle 0.
        let front = placed.last().unwrap();
        assert_eq!(front.id(), ItemId(1));
        assert!(front.anchor.0 > 50);
        assert_eq!(front.anchor.1, 10);
    }

    #[test]
    fn test_only_expanded_node_has_card() {
        let area = Rect::new(0, 0, 80, 24);
        let (mut engine, projection, icons) = setup(area);
        engine.toggle_expansion(ItemId(3));

        let placed = place_nodes(&engine, &projection, &icons);
        let cards: Vec<_> = placed.iter().filter(|n| n.card.is_some()).collect();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id(), ItemId(3));

        let card = cards[0].card.unwrap();
        assert!(card.right() <= area.right());
        assert!(card.bottom() <= area.bottom());
        assert!(card.height > CARD_CHROME_ROWS);
    }

    #[test]
    fn test_node_at_prefers_front() {
        let area = Rect::new(0, 0, 80, 24);
        let (mut engine, projection, icons) = setup(area);
        engine.toggle_expansion(ItemId(4));
        let placed = place_nodes(&engine, &projection, &icons);

        let focused = placed.iter().find(|n| n.id() == ItemId(4)).unwrap();
        let card = focused.card.unwrap();
        let hit = node_at(&placed, card.x + 1, card.y + 1).unwrap();
        assert_eq!(hit.id(), ItemId(4));

        let label = focused.label;
        assert_eq!(node_at(&placed, label.x, label.y).unwrap().id(), ItemId(4));
    }

    #[test]
    fn test_empty_space_has_no_node() {
        let area = Rect::new(0, 0, 80, 24);
        let (engine, projection, icons) = setup(area);
        let placed = place_nodes(&engine, &projection, &icons);
        let (cx, cy) = projection.center();
        assert!(node_at(&placed, cx, cy).is_none());
    }

    #[test]
    fn test_label_text() {
        let icons = IconSet::new(IconMode::Ascii);
        let item = &default_services()[3];
        assert_eq!(label_text(item, &icons), "[C] Cloud Agents");
    }
}
