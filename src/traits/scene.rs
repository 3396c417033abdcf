use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Stable identifier of a selectable body
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyId(pub String);

impl BodyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BodyId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Whether a body is the single centred one or one of the moving ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    Primary,
    Orbiting,
}

/// Snapshot of a selectable body, taken when the registry is queried
#[derive(Debug, Clone, PartialEq)]
pub struct Selectable {
    pub id: BodyId,
    pub kind: BodyKind,
    pub position: Vec3,
    /// Picking radius in world units
    pub radius: f32,
}

/// A body the user chose, with its position frozen at selection time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub id: BodyId,
    pub kind: BodyKind,
    pub target: Vec3,
}

impl From<&Selectable> for Selection {
    fn from(value: &Selectable) -> Self {
        Self {
            id: value.id.clone(),
            kind: value.kind,
            target: value.position,
        }
    }
}

/// Live view of the scene's selectable bodies.
///
/// The scene owns the bodies; callers only read current positions.
pub trait SelectableRegistry {
    /// Every selectable body with its current world position
    fn list_selectable(&self) -> Vec<Selectable>;

    /// Current state of a single body
    fn find(&self, id: &BodyId) -> Option<Selectable> {
        self.list_selectable().into_iter().find(|s| &s.id == id)
    }
}
