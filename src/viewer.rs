//! Per-frame orchestration.
//!
//! One tick runs in a fixed order: queued input is applied, exactly one camera
//! writer runs inside the director, then the observers (overlay, hover, cursor,
//! labels, scroll indicator) update from the freshly written pose.

use glam::Vec2;

use crate::camera::{pixel_to_ndc, Pose, Projection};
use crate::config::ViewerConfig;
use crate::core::director::{CameraDirector, CameraMode, DirectorEvent, PathInput, WriteAuthority};
use crate::core::parallax::MouseParallax;
use crate::core::picking::{Hit, HoverEvent, HoverTracker, Picker};
use crate::core::scroll::ScrubbedScroll;
use crate::frame::FrameInfo;
use crate::hud::Hud;
use crate::overlay::FadeOverlay;
use crate::traits::{
    BodyId, CameraSink, OverlayCoordinator, ScrollSource, Selectable, SelectableRegistry,
    Selection, ViewerInput,
};
use crate::types::CameraUniform;

pub const DEFAULT_VIEWPORT: (u32, u32) = (1280, 720);

/// Everything that happened in one tick
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    pub frame: u64,
    pub time: f32,
    pub mode: CameraMode,
    pub writer: WriteAuthority,
    pub pose: Pose,
    pub uniform: CameraUniform,
    pub progress: f32,
    /// Scroll progress moved this tick
    pub progress_changed: bool,
    pub hovered: Option<BodyId>,
    pub selection: Option<BodyId>,
    pub overlay_hidden: bool,
    pub events: Vec<DirectorEvent>,
    pub hover_events: Vec<HoverEvent>,
}

impl FrameOutput {
    /// Push the camera to `sink` if anything wrote it this frame
    pub fn write_to(&self, sink: &mut dyn CameraSink) -> bool {
        if self.writer == WriteAuthority::Hold {
            return false;
        }
        sink.write_camera(self.frame, &self.uniform);
        true
    }
}

/// Camera choreography plus its observers, driven one frame at a time
pub struct Viewer<O: OverlayCoordinator = FadeOverlay> {
    director: CameraDirector,
    scroll: ScrubbedScroll,
    parallax: MouseParallax,
    picker: Picker,
    hover: HoverTracker,
    overlay: O,
    hud: Hud,
    projection: Projection,
    viewport: (u32, u32),
    /// Pointer in window pixels
    pointer: Option<Vec2>,
    pending: Vec<ViewerInput>,
}

impl Viewer<FadeOverlay> {
    pub fn new(config: &ViewerConfig) -> Self {
        Self::with_overlay(config, FadeOverlay::new(&config.ui))
    }
}

impl<O: OverlayCoordinator> Viewer<O> {
    pub fn with_overlay(config: &ViewerConfig, overlay: O) -> Self {
        let (width, height) = DEFAULT_VIEWPORT;
        let camera = &config.camera;
        Self {
            director: CameraDirector::from_config(config),
            scroll: ScrubbedScroll::new(&config.scroll),
            parallax: MouseParallax::new(&config.parallax),
            picker: Picker::new(config.interaction.hit_tolerance),
            hover: HoverTracker::new(),
            overlay,
            hud: Hud::new(config),
            projection: Projection::new(
                camera.fov,
                width as f32 / height as f32,
                camera.near,
                camera.far,
            ),
            viewport: (width, height),
            pointer: None,
            pending: Vec::new(),
        }
    }

    pub fn director(&self) -> &CameraDirector {
        &self.director
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn mode(&self) -> CameraMode {
        self.director.mode()
    }

    pub fn pose(&self) -> Pose {
        self.director.pose()
    }

    pub fn progress(&self) -> f32 {
        self.scroll.current_progress()
    }

    pub fn hovered(&self) -> Option<&BodyId> {
        self.hover.current()
    }

    /// Queue input for the next tick
    pub fn push_input(&mut self, input: ViewerInput) {
        self.pending.push(input);
    }

    pub fn extend_inputs(&mut self, inputs: impl IntoIterator<Item = ViewerInput>) {
        self.pending.extend(inputs);
    }

    fn pointer_ndc(&self) -> Option<Vec2> {
        let (width, height) = self.viewport;
        self.pointer
            .map(|p| pixel_to_ndc(p.x, p.y, width, height))
    }

    fn pick(&self, bodies: &[Selectable]) -> Option<Hit> {
        let ndc = self.pointer_ndc()?;
        let ray = self.projection.ray_through(&self.director.pose(), ndc);
        self.picker.pick(&ray, bodies)
    }

    fn apply_input(&mut self, input: ViewerInput, registry: &dyn SelectableRegistry) {
        let scroll_driven = self.director.mode() == CameraMode::ScrollDriven;

        match input {
            ViewerInput::PointerMoved { x, y } => {
                let pixel = Vec2::new(x, y);
                self.pointer = Some(pixel);
                self.hud.cursor.set_pointer(pixel);
                if let Some(ndc) = self.pointer_ndc() {
                    self.parallax.set_pointer(ndc);
                }
            }
            ViewerInput::PointerLeft => {
                self.pointer = None;
                self.parallax.clear_pointer();
            }
            ViewerInput::Click => match self.director.mode() {
                CameraMode::ScrollDriven => {
                    if let Some(hit) = self.pick(&registry.list_selectable()) {
                        log::info!("selected {} at distance {:.2}", hit.body.id, hit.distance);
                        self.director.select(Selection::from(&hit.body));
                    }
                }
                CameraMode::Orbiting => {
                    self.director.cancel(&mut self.overlay);
                }
                mode => log::debug!("ignoring click while {:?}", mode),
            },
            ViewerInput::Back => {
                self.director.cancel(&mut self.overlay);
            }
            ViewerInput::Scroll { delta } if scroll_driven => self.scroll.apply(delta),
            ViewerInput::ScrollTo { progress } if scroll_driven => {
                self.scroll.set_target(progress)
            }
            ViewerInput::Scroll { .. } | ViewerInput::ScrollTo { .. } => {
                log::debug!("scroll locked while {:?}", self.director.mode());
            }
            ViewerInput::Select { id } => match registry.find(&id) {
                Some(body) => {
                    self.director.select(Selection::from(&body));
                }
                None => log::warn!("no selectable body named {}", id),
            },
            ViewerInput::Resize { width, height } => {
                if width > 0 && height > 0 {
                    self.viewport = (width, height);
                    self.projection.set_viewport(width, height);
                }
            }
        }
    }

    fn observe_events(&mut self, events: &[DirectorEvent]) {
        for event in events {
            match event {
                DirectorEvent::Arrived(_) => self.hud.cursor.hide(),
                DirectorEvent::ReturnStarted(_) => self.hud.cursor.show(),
                _ => {}
            }
        }
    }

    fn update_hover(&mut self, bodies: &[Selectable]) -> Vec<HoverEvent> {
        let events = if self.director.mode() == CameraMode::ScrollDriven {
            let hit = self.pick(bodies);
            self.hover.update(hit.as_ref().map(|h| &h.body.id))
        } else {
            self.hover.clear().into_iter().collect()
        };

        if !events.is_empty() {
            self.hud.set_hovered(self.hover.current());
        }
        events
    }

    /// Advance one frame against the scene's live bodies
    pub fn tick(&mut self, frame: &FrameInfo, registry: &dyn SelectableRegistry) -> FrameOutput {
        let delta = frame.delta.max(0.0);

        for input in std::mem::take(&mut self.pending) {
            self.apply_input(input, registry);
        }

        // Scroll and parallax are frozen away from the path so the return lands where it left
        let on_path = self.director.mode() == CameraMode::ScrollDriven;
        if on_path {
            self.scroll.update(delta);
        }
        let progress_changed = self.scroll.take_changed();
        let progress = self.scroll.current_progress();
        let parallax = if on_path {
            self.parallax.update(delta)
        } else {
            self.parallax.offset()
        };

        let write = self.director.tick(
            delta,
            PathInput { progress, parallax },
            &mut self.overlay,
        );
        self.overlay.update(delta);

        let events = self.director.drain_events();
        self.observe_events(&events);

        let bodies = registry.list_selectable();
        let hover_events = self.update_hover(&bodies);
        self.hud
            .update(delta, progress, write.pose.position, &bodies);

        FrameOutput {
            frame: frame.number,
            time: frame.time,
            mode: write.mode,
            writer: write.authority,
            pose: write.pose,
            uniform: write.pose.to_uniform(frame.time, &self.projection),
            progress,
            progress_changed,
            hovered: self.hover.current().cloned(),
            selection: self.director.selection().map(|s| s.id.clone()),
            overlay_hidden: self.overlay.is_hidden(),
            events,
            hover_events,
        }
    }
}
