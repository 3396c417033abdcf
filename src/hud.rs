//! Observers that react to the camera after it has been written each frame:
//! the custom cursor, planet labels with proximity hints, the scroll
//! indicator and per-body hover scale.

use std::collections::HashMap;

use glam::{Vec2, Vec3};
use serde::Serialize;

use crate::config::{CursorConfig, ProximityConfig, ViewerConfig};
use crate::core::timer::FixedHz;
use crate::math::follow_factor;
use crate::traits::{BodyId, BodyKind, Selectable};

/// Label opacity steps are tuned for this rate
const LABEL_HZ: f32 = 60.0;
const MAX_LABEL_STEPS: u32 = 8;
const LABEL_STEP: f32 = 0.05;
const LABEL_MAX_OPACITY: f32 = 0.8;
const LABEL_FADE: f32 = 0.05;
const LABEL_EPSILON: f32 = 0.001;

/// Progress past which the "scroll to explore" hint goes away for good
const SCROLL_HINT_THRESHOLD: f32 = 0.05;

/// Ring cursor that trails the pointer
#[derive(Debug, Clone, PartialEq)]
pub struct CursorState {
    position: Vec2,
    target: Vec2,
    smoothing: f32,
    size: f32,
    hover_size: f32,
    hovering: bool,
    visible: bool,
}

impl CursorState {
    pub fn new(config: &CursorConfig) -> Self {
        Self {
            position: Vec2::ZERO,
            target: Vec2::ZERO,
            smoothing: config.smoothing,
            size: config.size,
            hover_size: config.hover_size,
            hovering: false,
            visible: true,
        }
    }

    /// Pointer in window pixels
    pub fn set_pointer(&mut self, pixel: Vec2) {
        self.target = pixel;
    }

    pub fn set_hovering(&mut self, hovering: bool) {
        self.hovering = hovering;
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.hovering = false;
    }

    pub fn update(&mut self, delta: f32) {
        let t = follow_factor(self.smoothing, delta);
        self.position += (self.target - self.position) * t;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn size(&self) -> f32 {
        if self.hovering {
            self.hover_size
        } else {
            self.size
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Label {
    id: BodyId,
    opacity: f32,
}

/// Planet name labels: solid on hover, faint when the camera is close
#[derive(Debug, Clone)]
pub struct LabelBoard {
    labels: Vec<Label>,
    stepper: FixedHz,
    proximity: ProximityConfig,
    hovered: Option<BodyId>,
}

impl LabelBoard {
    pub fn new(config: &ProximityConfig) -> Self {
        Self {
            labels: Vec::new(),
            stepper: FixedHz::new(LABEL_HZ),
            proximity: config.clone(),
            hovered: None,
        }
    }

    pub fn set_hovered(&mut self, hovered: Option<BodyId>) {
        self.hovered = hovered;
    }

    pub fn opacity(&self, id: &BodyId) -> f32 {
        self.labels
            .iter()
            .find(|l| &l.id == id)
            .map_or(0.0, |l| l.opacity)
    }

    /// Labels that are at least faintly visible
    pub fn visible(&self) -> impl Iterator<Item = (&BodyId, f32)> {
        self.labels
            .iter()
            .filter(|l| l.opacity > LABEL_EPSILON)
            .map(|l| (&l.id, l.opacity))
    }

    fn proximity_target(&self, camera: Vec3, body: Vec3) -> f32 {
        let dist = camera.distance(body);
        if dist < self.proximity.distance {
            (1.0 - dist / self.proximity.distance) * self.proximity.max_opacity
        } else {
            0.0
        }
    }

    /// Step label opacities at a fixed 60 Hz. Only orbiting bodies carry labels.
    pub fn update(&mut self, delta: f32, camera: Vec3, bodies: &[Selectable]) {
        self.labels
            .retain(|l| bodies.iter().any(|b| b.id == l.id));
        for body in bodies.iter().filter(|b| b.kind == BodyKind::Orbiting) {
            if !self.labels.iter().any(|l| l.id == body.id) {
                self.labels.push(Label {
                    id: body.id.clone(),
                    opacity: 0.0,
                });
            }
        }

        let steps = self.stepper.steps(delta, MAX_LABEL_STEPS);
        for _ in 0..steps {
            for i in 0..self.labels.len() {
                let hovered = self.hovered.as_ref() == Some(&self.labels[i].id);
                let target = if hovered {
                    None
                } else {
                    bodies
                        .iter()
                        .find(|b| b.id == self.labels[i].id)
                        .map(|b| self.proximity_target(camera, b.position))
                };

                let label = &mut self.labels[i];
                match target {
                    None => {
                        label.opacity = (label.opacity + LABEL_STEP).min(LABEL_MAX_OPACITY);
                    }
                    Some(target) => {
                        label.opacity += (target - label.opacity) * LABEL_FADE;
                        if target == 0.0 && label.opacity <= LABEL_EPSILON {
                            label.opacity = 0.0;
                        }
                    }
                }
            }
        }
    }
}

/// Scroll position readout
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollIndicator {
    pub thumb: f32,
    pub hint_visible: bool,
}

impl Default for ScrollIndicator {
    fn default() -> Self {
        Self {
            thumb: 0.0,
            hint_visible: true,
        }
    }
}

impl ScrollIndicator {
    pub fn update(&mut self, progress: f32) {
        self.thumb = progress.clamp(0.0, 1.0);
        if self.thumb > SCROLL_HINT_THRESHOLD {
            self.hint_visible = false;
        }
    }
}

/// Everything drawn on top of the scene
#[derive(Debug, Clone)]
pub struct Hud {
    pub cursor: CursorState,
    pub labels: LabelBoard,
    pub scroll: ScrollIndicator,
    hover_scale: f32,
    scales: HashMap<BodyId, f32>,
}

impl Hud {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            cursor: CursorState::new(&config.cursor),
            labels: LabelBoard::new(&config.proximity),
            scroll: ScrollIndicator::default(),
            hover_scale: config.interaction.hover_scale,
            scales: HashMap::new(),
        }
    }

    /// Pointer moved onto `hovered` (or off every body)
    pub fn set_hovered(&mut self, hovered: Option<&BodyId>) {
        self.cursor.set_hovering(hovered.is_some());
        self.labels.set_hovered(hovered.cloned());
        self.scales.clear();
        if let Some(id) = hovered {
            self.scales.insert(id.clone(), self.hover_scale);
        }
    }

    /// Renderer-facing target scale of a body
    pub fn scale_of(&self, id: &BodyId) -> f32 {
        self.scales.get(id).copied().unwrap_or(1.0)
    }

    pub fn update(&mut self, delta: f32, progress: f32, camera: Vec3, bodies: &[Selectable]) {
        self.cursor.update(delta);
        self.labels.update(delta, camera, bodies);
        self.scroll.update(progress);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planet(id: &str, position: Vec3) -> Selectable {
        Selectable {
            id: BodyId::new(id),
            kind: BodyKind::Orbiting,
            position,
            radius: 1.0,
        }
    }

    #[test]
    fn cursor_trails_pointer() {
        let mut cursor = CursorState::new(&CursorConfig::default());
        cursor.set_pointer(Vec2::new(100.0, 0.0));
        cursor.update(1.0 / 60.0);
        assert!((cursor.position().x - 15.0).abs() < 0.01);

        cursor.set_hovering(true);
        assert_eq!(cursor.size(), 40.0);
        cursor.hide();
        assert!(!cursor.is_visible());
        assert_eq!(cursor.size(), 20.0);
    }

    #[test]
    fn hovered_label_rises_to_cap() {
        let mut labels = LabelBoard::new(&ProximityConfig::default());
        let far = [planet("a", Vec3::new(0.0, 0.0, -500.0))];
        labels.set_hovered(Some(BodyId::new("a")));

        labels.update(1.0 / 60.0 + 1e-4, Vec3::ZERO, &far);
        assert!((labels.opacity(&BodyId::new("a")) - 0.05).abs() < 1e-6);

        for _ in 0..60 {
            labels.update(1.0 / 60.0, Vec3::ZERO, &far);
        }
        assert_eq!(labels.opacity(&BodyId::new("a")), 0.8);
    }

    #[test]
    fn proximity_hint_is_faint() {
        let mut labels = LabelBoard::new(&ProximityConfig::default());
        let near = [planet("a", Vec3::new(0.0, 0.0, -15.0))];
        for _ in 0..600 {
            labels.update(1.0 / 60.0, Vec3::ZERO, &near);
        }
        // Halfway inside the radius → half of max opacity
        assert!((labels.opacity(&BodyId::new("a")) - 0.1).abs() < 1e-3);

        let far = [planet("a", Vec3::new(0.0, 0.0, -100.0))];
        for _ in 0..600 {
            labels.update(1.0 / 60.0, Vec3::ZERO, &far);
        }
        assert_eq!(labels.opacity(&BodyId::new("a")), 0.0);
        assert_eq!(labels.visible().count(), 0);
    }

    #[test]
    fn primary_bodies_have_no_label() {
        let mut labels = LabelBoard::new(&ProximityConfig::default());
        let sun = Selectable {
            kind: BodyKind::Primary,
            ..planet("sun", Vec3::ZERO)
        };
        labels.set_hovered(Some(BodyId::new("sun")));
        labels.update(1.0, Vec3::ZERO, &[sun]);
        assert_eq!(labels.opacity(&BodyId::new("sun")), 0.0);
    }

    #[test]
    fn scroll_hint_hides_for_good() {
        let mut indicator = ScrollIndicator::default();
        indicator.update(0.04);
        assert!(indicator.hint_visible);
        indicator.update(0.06);
        assert!(!indicator.hint_visible);
        indicator.update(0.0);
        assert!(!indicator.hint_visible);
        assert_eq!(indicator.thumb, 0.0);
    }

    #[test]
    fn hover_scale_applies_to_one_body() {
        let mut hud = Hud::new(&ViewerConfig::default());
        let a = BodyId::new("a");
        hud.set_hovered(Some(&a));
        assert_eq!(hud.scale_of(&a), 1.15);
        assert_eq!(hud.scale_of(&BodyId::new("b")), 1.0);
        hud.set_hovered(None);
        assert_eq!(hud.scale_of(&a), 1.0);
    }
}
