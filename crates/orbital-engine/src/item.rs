//! Timeline items placed on the orbit.
//!
//! Items are supplied by the host and never mutated by the engine.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// Upper bound of the energy scale.
pub const MAX_ENERGY: f64 = 100.0;

/// Unique key of a timeline item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque reference to a renderable symbol.
///
/// The engine never interprets it; the view layer resolves the name to a glyph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconRef(String);

impl IconRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Display status of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ItemStatus {
    Completed,
    InProgress,
    #[default]
    Pending,
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::InProgress => write!(f, "in-progress"),
            Self::Pending => write!(f, "pending"),
        }
    }
}

/// A single item on the orbital track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineItem {
    pub id: ItemId,
    pub title: String,
    pub content: String,
    pub icon: IconRef,
    #[serde(default)]
    pub status: ItemStatus,
    /// Glow strength in `0..=100`.
    #[serde(default)]
    pub energy: f64,
}

impl TimelineItem {
    pub fn new(
        id: u32,
        title: impl Into<String>,
        content: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: ItemId(id),
            title: title.into(),
            content: content.into(),
            icon: IconRef::new(icon),
            status: ItemStatus::default(),
            energy: 0.0,
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_energy(mut self, energy: f64) -> Self {
        self.energy = energy;
        self
    }

    /// Energy clamped to `0..=MAX_ENERGY`.
    pub fn clamped_energy(&self) -> f64 {
        if self.energy.is_nan() {
            return 0.0;
        }
        self.energy.clamp(0.0, MAX_ENERGY)
    }

    /// Diameter of the glow around the node, in layout units.
    pub fn glow_diameter(&self) -> f64 {
        self.clamped_energy() * 0.4 + 50.0
    }
}

/// Load an item list from a JSON array and check it.
pub fn load_items(path: &Path) -> Result<Vec<TimelineItem>, ItemError> {
    let content = std::fs::read_to_string(path).map_err(ItemError::Io)?;
    let items: Vec<TimelineItem> = serde_json::from_str(&content).map_err(ItemError::Parse)?;
    validate_items(&items)?;
    Ok(items)
}

/// Reject item lists where two items share an id.
pub fn validate_items(items: &[TimelineItem]) -> Result<(), ItemError> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id) {
            return Err(ItemError::DuplicateId(item.id));
        }
    }
    Ok(())
}

/// The six services shown on the company landing page.
pub fn default_services() -> Vec<TimelineItem> {
    vec![
        TimelineItem::new(
            1,
            "White-Label AI",
            "Your brand. Our brain. Ship AI products tomorrow without hiring a single engineer.",
            "briefcase",
        )
        .with_status(ItemStatus::Completed)
        .with_energy(100.0),
        TimelineItem::new(
            2,
            "Your AI Team",
            "We don't consult. We build. Your dedicated AI team: embedded, accountable, shipping.",
            "users",
        )
        .with_status(ItemStatus::Completed)
        .with_energy(95.0),
        TimelineItem::new(
            3,
            "Private LLMs",
            "Your data never leaves. Models trained on your knowledge, running on your metal.",
            "brain",
        )
        .with_status(ItemStatus::Completed)
        .with_energy(90.0),
        TimelineItem::new(
            4,
            "Cloud Agents",
            "Autonomous systems that work while you sleep. Monitor. Decide. Act. Repeat.",
            "cloud",
        )
        .with_status(ItemStatus::Completed)
        .with_energy(88.0),
        TimelineItem::new(
            5,
            "Compliance",
            "ADA. 508. WCAG. We find every violation. We fix them. Automatically.",
            "file-check",
        )
        .with_status(ItemStatus::Completed)
        .with_energy(85.0),
        TimelineItem::new(
            6,
            "Security",
            "Air-gapped. Zero-trust. Paranoid by design. Your secrets stay yours.",
            "shield",
        )
        .with_status(ItemStatus::Completed)
        .with_energy(92.0),
    ]
}

/// Item list errors.
#[derive(Debug, thiserror::Error)]
pub enum ItemError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Duplicate item id: {0}")]
    DuplicateId(ItemId),
}
