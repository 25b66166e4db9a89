//! Pointer hit testing.
//!
//! A press resolves to exactly one target. Item hits win over the background,
//! so an item click is never also seen as a background click.

use crate::engine::NodeView;
use crate::item::ItemId;

/// What a pointer press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Item(ItemId),
    Background,
}

/// Resolve a press at `(x, y)` in layout units (orbit centre at the origin).
///
/// Each node is a disc of `base_radius * scale`. When discs overlap the one
/// drawn on top (highest z-order, later index on ties) wins.
pub fn hit_test(nodes: &[NodeView<'_>], x: f64, y: f64, base_radius: f64) -> HitTarget {
    nodes
        .iter()
        .filter(|node| {
            let dx = x - node.transform.x;
            let dy = y - node.transform.y;
            let reach = base_radius * node.transform.scale;
            dx * dx + dy * dy <= reach * reach
        })
        .max_by_key(|node| (node.transform.z_order, node.index))
        .map_or(HitTarget::Background, |node| HitTarget::Item(node.item.id))
}
