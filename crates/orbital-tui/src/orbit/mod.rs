//! The orbital ring drawn on a terminal grid.
//!
//! - [`Projection`] maps layout units to cells, compensating for cell aspect.
//! - [`place_nodes`] decides which cells each node and the detail card cover.
//! - [`OrbitWidget`] paints it all.

mod placement;
mod projection;
mod widget;

pub use placement::{label_text, node_at, place_nodes, PlacedNode};
pub use projection::Projection;
pub use widget::{energy_gauge, OrbitWidget, MIN_ORBIT_HEIGHT, MIN_ORBIT_WIDTH};
