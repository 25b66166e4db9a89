//! orbital-engine: Headless radial orbital layout engine
//!
//! This crate arranges items on a continuously rotating circular track:
//! - Configuration and item loading
//! - Pure orbit geometry (position, depth order, opacity, scale)
//! - The focus/rotation state machine
//! - A cancellable rotation clock and the controller that owns it
//! - Pointer hit testing

pub mod config;
pub mod controller;
pub mod engine;
pub mod geometry;
pub mod hit;
pub mod item;
pub mod rotator;

// Re-export commonly used types
pub use config::{ConfigError, OrbitalConfig, Range};
pub use controller::OrbitalController;
pub use engine::{NodeView, OrbitalEngine, Phase, Transition};
pub use geometry::{advance_angle, compute_position, LayoutParams, NodeTransform};
pub use hit::{hit_test, HitTarget};
pub use item::{
    default_services, load_items, validate_items, IconRef, ItemError, ItemId, ItemStatus,
    TimelineItem, MAX_ENERGY,
};
pub use rotator::{RotationTick, Rotator};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
