use glam::Vec2;

use crate::camera::{Pose, Projection};
use crate::math::Ray;
use crate::traits::{BodyId, Selectable, SelectableRegistry};

/// Nearest selectable under the pointer
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub body: Selectable,
    /// Distance along the ray to the first intersection
    pub distance: f32,
}

/// Ray-vs-sphere picking against the registry's live positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Picker {
    /// Added to every body's radius
    tolerance: f32,
}

impl Picker {
    pub fn new(tolerance: f32) -> Self {
        Self {
            tolerance: tolerance.max(0.0),
        }
    }

    /// Closest body hit by `ray`; earlier bodies win exact ties
    pub fn pick(&self, ray: &Ray, bodies: &[Selectable]) -> Option<Hit> {
        let mut best: Option<Hit> = None;

        for body in bodies {
            let Some(distance) = ray.intersect_sphere(body.position, body.radius + self.tolerance)
            else {
                continue;
            };
            if best.as_ref().map_or(true, |b| distance < b.distance) {
                best = Some(Hit {
                    body: body.clone(),
                    distance,
                });
            }
        }

        best
    }

    /// Pick through the pointer at `ndc` from the camera at `pose`
    pub fn pick_from_camera(
        &self,
        pose: &Pose,
        projection: &Projection,
        ndc: Vec2,
        registry: &dyn SelectableRegistry,
    ) -> Option<Hit> {
        let ray = projection.ray_through(pose, ndc);
        self.pick(&ray, &registry.list_selectable())
    }
}

/// Edge-triggered hover notification
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverEvent {
    Enter(BodyId),
    Leave(BodyId),
}

/// Remembers the hovered body so enter/leave fire only on change
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoverTracker {
    current: Option<BodyId>,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&BodyId> {
        self.current.as_ref()
    }

    /// Feed this frame's hit. A change of body yields leave-then-enter.
    pub fn update(&mut self, hovered: Option<&BodyId>) -> Vec<HoverEvent> {
        if self.current.as_ref() == hovered {
            return Vec::new();
        }

        let mut events = Vec::with_capacity(2);
        if let Some(previous) = self.current.take() {
            events.push(HoverEvent::Leave(previous));
        }
        if let Some(next) = hovered {
            self.current = Some(next.clone());
            events.push(HoverEvent::Enter(next.clone()));
        }
        events
    }

    /// Drop the hover, e.g. when picking is suspended
    pub fn clear(&mut self) -> Option<HoverEvent> {
        self.current.take().map(HoverEvent::Leave)
    }
}
