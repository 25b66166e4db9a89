//! Orbital layout engine state machine.
//!
//! The engine owns the rotation angle and the focused item. Autoplay is not
//! stored: it is on exactly when nothing is focused, so the coupling between
//! expansion and rotation cannot drift.

use std::fmt;

use tracing::{debug, trace};

use crate::config::{ConfigError, OrbitalConfig};
use crate::geometry::{advance_angle, LayoutParams, NodeTransform};
use crate::item::{ItemId, TimelineItem};

/// Engine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing expanded, the ring turns.
    #[default]
    Rotating,
    /// One item expanded, the ring is frozen.
    Focused(ItemId),
}

impl Phase {
    pub fn focused(self) -> Option<ItemId> {
        match self {
            Self::Rotating => None,
            Self::Focused(id) => Some(id),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rotating => write!(f, "Rotating"),
            Self::Focused(id) => write!(f, "Focused({id})"),
        }
    }
}

/// Result of a click operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
}

impl Transition {
    /// Whether autoplay went from on to off.
    pub fn pauses(&self) -> bool {
        self.from == Phase::Rotating && self.to != Phase::Rotating
    }

    /// Whether autoplay went from off to on.
    pub fn resumes(&self) -> bool {
        self.from != Phase::Rotating && self.to == Phase::Rotating
    }

    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Everything the view needs to draw one node.
#[derive(Debug, Clone, Copy)]
pub struct NodeView<'a> {
    pub index: usize,
    pub item: &'a TimelineItem,
    /// Transform as drawn, with the focus overrides applied.
    pub transform: NodeTransform,
    pub expanded: bool,
}

/// Radial orbital layout engine.
#[derive(Debug, Clone)]
pub struct OrbitalEngine {
    items: Vec<TimelineItem>,
    config: OrbitalConfig,
    params: LayoutParams,
    angle_deg: f64,
    focus: Option<ItemId>,
}

impl OrbitalEngine {
    /// Create an engine in the initial state: angle 0, nothing focused, rotating.
    ///
    /// Fails if `config` does not pass [`OrbitalConfig::validate`].
    pub fn new(items: Vec<TimelineItem>, config: OrbitalConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let params = LayoutParams::from(&config);
        Ok(Self {
            items,
            config,
            params,
            angle_deg: 0.0,
            focus: None,
        })
    }

    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }

    pub fn config(&self) -> &OrbitalConfig {
        &self.config
    }

    /// Current rotation angle in `[0, 360)`.
    pub fn angle(&self) -> f64 {
        self.angle_deg
    }

    pub fn auto_rotate(&self) -> bool {
        self.focus.is_none()
    }

    pub fn focused(&self) -> Option<ItemId> {
        self.focus
    }

    pub fn focused_item(&self) -> Option<&TimelineItem> {
        self.focus.and_then(|id| self.item(id))
    }

    pub fn phase(&self) -> Phase {
        self.focus.map_or(Phase::Rotating, Phase::Focused)
    }

    pub fn is_expanded(&self, id: ItemId) -> bool {
        self.focus == Some(id)
    }

    pub fn item(&self, id: ItemId) -> Option<&TimelineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Advance the ring by one step.
    ///
    /// Returns `false` without touching the angle while an item is focused.
    pub fn tick(&mut self) -> bool {
        if !self.auto_rotate() {
            return false;
        }
        self.angle_deg = advance_angle(
            self.angle_deg,
            self.config.step_deg,
            self.config.angle_precision,
        );
        trace!(angle = self.angle_deg, "rotation tick");
        true
    }

    /// Expand `id` (collapsing any other item) or collapse it if already expanded.
    ///
    /// Unknown ids leave the state untouched.
    pub fn toggle_expansion(&mut self, id: ItemId) -> Transition {
        let from = self.phase();
        if self.item(id).is_none() {
            debug!(%id, "toggle ignored: unknown item");
            return Transition { from, to: from };
        }

        self.focus = if self.focus == Some(id) { None } else { Some(id) };

        let transition = Transition {
            from,
            to: self.phase(),
        };
        debug!(from = %transition.from, to = %transition.to, "toggle expansion");
        transition
    }

    /// Collapse everything and resume rotation; the angle is kept.
    pub fn clear_focus(&mut self) -> Transition {
        let from = self.phase();
        self.focus = None;
        if from != Phase::Rotating {
            debug!(%from, "focus cleared");
        }
        Transition {
            from,
            to: Phase::Rotating,
        }
    }

    /// Raw transform of the item at `index` for the current angle.
    pub fn position(&self, index: usize) -> NodeTransform {
        self.params.compute(index, self.items.len(), self.angle_deg)
    }

    /// Views of every item, in input order.
    pub fn nodes(&self) -> Vec<NodeView<'_>> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let expanded = self.is_expanded(item.id);
                let mut transform = self.position(index);
                if expanded {
                    transform.z_order = self.config.focused_z_order;
                    transform.opacity = 1.0;
                }
                NodeView {
                    index,
                    item,
                    transform,
                    expanded,
                }
            })
            .collect()
    }

    /// Views sorted back to front, the order they should be painted in.
    pub fn paint_order(&self) -> Vec<NodeView<'_>> {
        let mut nodes = self.nodes();
        nodes.sort_by_key(|node| node.transform.z_order);
        nodes
    }
}
