//! Camera mode state machine
//!
//! The director is the only place that decides who writes the camera pose.
//! Each tick exactly one of the path, the transition engine or the orbit
//! generator produces the pose (or nobody does, while the return flight waits
//! for the overlay to finish hiding).
//!
//! ```text
//! ScrollDriven --select--> TransitioningIn --arrived--> Orbiting
//!      ^                                                   |
//!      +------returned------ TransitioningOut <--cancel----+
//! ```

use glam::{Vec2, Vec3};
use serde::Serialize;

use crate::camera::Pose;
use crate::config::{OrbitCameraConfig, ViewerConfig};
use crate::core::orbit::OrbitMotion;
use crate::core::path::PathInterpolator;
use crate::core::timer::Countdown;
use crate::core::transition::{TransitionEngine, TransitionId, TransitionStatus};
use crate::math::Easing;
use crate::traits::{OverlayCoordinator, Selection};

/// Public view of the director's state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    ScrollDriven,
    TransitioningIn,
    Orbiting,
    TransitioningOut,
}

/// Which component wrote the pose in a given tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteAuthority {
    Path,
    Transition,
    Orbit,
    /// Nobody wrote; the pose is unchanged from the previous tick
    Hold,
}

/// Notifications for observers, drained by the host after each tick
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DirectorEvent {
    ModeChanged { from: CameraMode, to: CameraMode },
    Selected(Selection),
    /// Cancellation arrived mid-flight and will apply on arrival
    CancelQueued,
    /// Flight finished; overlay show has been requested
    Arrived(Selection),
    /// Cancellation accepted; overlay hide has been requested
    ReturnStarted(Selection),
    /// Overlay never reported hidden; the return flight started anyway
    OverlayTimedOut,
    /// Back on the path at the saved pose
    Returned,
}

/// Outcome of one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameWrite {
    pub authority: WriteAuthority,
    pub pose: Pose,
    pub mode: CameraMode,
}

/// Per-tick input for the scroll-driven path
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PathInput {
    pub progress: f32,
    pub parallax: Vec2,
}

impl PathInput {
    pub fn new(progress: f32) -> Self {
        Self {
            progress,
            parallax: Vec2::ZERO,
        }
    }
}

/// Flight and orbit tuning used by the director
#[derive(Debug, Clone, PartialEq)]
pub struct DirectorSettings {
    /// Orbit entry pose relative to the selected body
    pub orbit_offset: Vec3,
    pub flight_duration: f32,
    pub return_duration: f32,
    pub easing: Easing,
    pub overlay_hide_timeout: f32,
    pub orbit: OrbitCameraConfig,
}

impl DirectorSettings {
    pub fn from_config(config: &ViewerConfig) -> Self {
        let interaction = &config.interaction;
        Self {
            orbit_offset: interaction.orbit_offset(),
            flight_duration: interaction.transition_duration,
            return_duration: interaction.return_duration(),
            easing: interaction.easing,
            overlay_hide_timeout: interaction.overlay_hide_timeout,
            orbit: config.orbit_camera.clone(),
        }
    }
}

#[derive(Debug, Clone)]
enum ReturnPhase {
    AwaitingOverlay { fallback: Countdown },
    Flying { flight: TransitionId },
}

#[derive(Debug, Clone)]
enum ModeState {
    ScrollDriven,
    TransitioningIn {
        selection: Selection,
        flight: TransitionId,
        cancel_queued: bool,
    },
    Orbiting {
        selection: Selection,
        orbit: OrbitMotion,
    },
    TransitioningOut {
        selection: Selection,
        phase: ReturnPhase,
    },
}

impl ModeState {
    fn mode(&self) -> CameraMode {
        match self {
            ModeState::ScrollDriven => CameraMode::ScrollDriven,
            ModeState::TransitioningIn { .. } => CameraMode::TransitioningIn,
            ModeState::Orbiting { .. } => CameraMode::Orbiting,
            ModeState::TransitioningOut { .. } => CameraMode::TransitioningOut,
        }
    }
}

/// Owner of the camera pose and the mode that decides who writes it
#[derive(Debug)]
pub struct CameraDirector {
    path: PathInterpolator,
    engine: TransitionEngine,
    settings: DirectorSettings,
    state: ModeState,
    pose: Pose,
    /// Pose to return to, captured when leaving the path
    saved: Option<Pose>,
    events: Vec<DirectorEvent>,
}

impl CameraDirector {
    pub fn new(path: PathInterpolator, settings: DirectorSettings) -> Self {
        let pose = path.evaluate(0.0);
        Self {
            path,
            engine: TransitionEngine::new(),
            settings,
            state: ModeState::ScrollDriven,
            pose,
            saved: None,
            events: Vec::new(),
        }
    }

    pub fn from_config(config: &ViewerConfig) -> Self {
        Self::new(
            PathInterpolator::from_config(&config.camera),
            DirectorSettings::from_config(config),
        )
    }

    pub fn mode(&self) -> CameraMode {
        self.state.mode()
    }

    /// Pose written by the most recent tick
    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn path(&self) -> &PathInterpolator {
        &self.path
    }

    pub fn settings(&self) -> &DirectorSettings {
        &self.settings
    }

    pub fn saved_pose(&self) -> Option<Pose> {
        self.saved
    }

    /// Body the camera is flying to, orbiting, or leaving
    pub fn selection(&self) -> Option<&Selection> {
        match &self.state {
            ModeState::ScrollDriven => None,
            ModeState::TransitioningIn { selection, .. }
            | ModeState::Orbiting { selection, .. }
            | ModeState::TransitioningOut { selection, .. } => Some(selection),
        }
    }

    pub fn orbit(&self) -> Option<&OrbitMotion> {
        match &self.state {
            ModeState::Orbiting { orbit, .. } => Some(orbit),
            _ => None,
        }
    }

    pub fn is_cancel_queued(&self) -> bool {
        matches!(
            self.state,
            ModeState::TransitioningIn {
                cancel_queued: true,
                ..
            }
        )
    }

    /// True while the return waits for the overlay to finish hiding
    pub fn is_awaiting_overlay(&self) -> bool {
        matches!(
            self.state,
            ModeState::TransitioningOut {
                phase: ReturnPhase::AwaitingOverlay { .. },
                ..
            }
        )
    }

    /// Orbit-entry pose for a body at `target`
    pub fn entry_pose(&self, target: Vec3) -> Pose {
        Pose::new(target + self.settings.orbit_offset, target)
    }

    pub fn drain_events(&mut self) -> Vec<DirectorEvent> {
        std::mem::take(&mut self.events)
    }

    fn set_state(&mut self, state: ModeState) {
        let from = self.state.mode();
        let to = state.mode();
        self.state = state;
        if from != to {
            log::info!("camera mode {:?} -> {:?}", from, to);
            self.events.push(DirectorEvent::ModeChanged { from, to });
        }
    }

    /// Fly to `selection`. Only accepted while scroll-driven.
    pub fn select(&mut self, selection: Selection) -> bool {
        if !matches!(self.state, ModeState::ScrollDriven) {
            log::debug!(
                "ignoring selection of {} while {:?}",
                selection.id,
                self.mode()
            );
            return false;
        }

        self.saved = Some(self.pose);
        let destination = self.entry_pose(selection.target);
        let flight = self.engine.start(
            self.pose,
            destination,
            self.settings.flight_duration,
            self.settings.easing,
        );

        self.events.push(DirectorEvent::Selected(selection.clone()));
        self.set_state(ModeState::TransitioningIn {
            selection,
            flight,
            cancel_queued: false,
        });
        true
    }

    /// Leave orbit. Mid-flight cancellations are queued until arrival;
    /// anywhere else the request is ignored.
    pub fn cancel(&mut self, overlay: &mut dyn OverlayCoordinator) -> bool {
        match &mut self.state {
            ModeState::Orbiting { .. } => {
                self.begin_return(overlay);
                true
            }
            ModeState::TransitioningIn { cancel_queued, .. } => {
                if !*cancel_queued {
                    *cancel_queued = true;
                    self.events.push(DirectorEvent::CancelQueued);
                }
                true
            }
            _ => {
                log::debug!("ignoring cancel while {:?}", self.mode());
                false
            }
        }
    }

    fn begin_return(&mut self, overlay: &mut dyn OverlayCoordinator) {
        let ModeState::Orbiting { selection, .. } = &self.state else {
            return;
        };
        let selection = selection.clone();

        overlay.hide_all();
        self.events
            .push(DirectorEvent::ReturnStarted(selection.clone()));
        self.set_state(ModeState::TransitioningOut {
            selection,
            phase: ReturnPhase::AwaitingOverlay {
                fallback: Countdown::started(self.settings.overlay_hide_timeout),
            },
        });
    }

    fn arrive(&mut self, overlay: &mut dyn OverlayCoordinator) {
        let ModeState::TransitioningIn {
            selection,
            cancel_queued,
            ..
        } = &self.state
        else {
            return;
        };
        let selection = selection.clone();
        let cancel_queued = *cancel_queued;

        // Orbit centre is frozen at the selection-time position
        let orbit =
            OrbitMotion::entered_from(selection.target, self.pose.position, &self.settings.orbit);

        overlay.show_for(&selection);
        self.events.push(DirectorEvent::Arrived(selection.clone()));
        self.set_state(ModeState::Orbiting { selection, orbit });

        if cancel_queued {
            self.begin_return(overlay);
        }
    }

    fn finish_return(&mut self) {
        self.saved = None;
        self.events.push(DirectorEvent::Returned);
        self.set_state(ModeState::ScrollDriven);
    }

    /// Advance one frame. Exactly one component writes the pose (or none, while holding).
    pub fn tick(
        &mut self,
        delta: f32,
        input: PathInput,
        overlay: &mut dyn OverlayCoordinator,
    ) -> FrameWrite {
        let authority = match &mut self.state {
            ModeState::ScrollDriven => {
                self.pose = self
                    .path
                    .evaluate_with_parallax(input.progress, input.parallax);
                WriteAuthority::Path
            }
            ModeState::Orbiting { orbit, .. } => {
                self.pose = orbit.tick(delta);
                WriteAuthority::Orbit
            }
            ModeState::TransitioningIn { flight, .. } => {
                let flight = *flight;
                self.advance_flight(delta, flight, overlay)
            }
            ModeState::TransitioningOut {
                phase: ReturnPhase::Flying { flight },
                ..
            } => {
                let flight = *flight;
                self.advance_flight(delta, flight, overlay)
            }
            ModeState::TransitioningOut {
                phase: ReturnPhase::AwaitingOverlay { fallback },
                ..
            } => {
                let timed_out = fallback.tick(delta);
                let hidden = overlay.is_hidden();
                if hidden || timed_out {
                    if !hidden {
                        log::warn!("overlay did not finish hiding; returning anyway");
                        self.events.push(DirectorEvent::OverlayTimedOut);
                    }
                    self.start_return_flight();
                }
                WriteAuthority::Hold
            }
        };

        FrameWrite {
            authority,
            pose: self.pose,
            mode: self.mode(),
        }
    }

    fn start_return_flight(&mut self) {
        // Without a saved pose fall back to the start of the path
        let destination = self.saved.unwrap_or_else(|| self.path.evaluate(0.0));
        let flight = self.engine.start(
            self.pose,
            destination,
            self.settings.return_duration,
            self.settings.easing,
        );
        if let ModeState::TransitioningOut { phase, .. } = &mut self.state {
            *phase = ReturnPhase::Flying { flight };
        }
    }

    fn advance_flight(
        &mut self,
        delta: f32,
        expected: TransitionId,
        overlay: &mut dyn OverlayCoordinator,
    ) -> WriteAuthority {
        match self.engine.tick(delta) {
            TransitionStatus::Running(pose) => {
                self.pose = pose;
                WriteAuthority::Transition
            }
            TransitionStatus::Completed { id, pose } if id == expected => {
                self.pose = pose;
                match self.state.mode() {
                    CameraMode::TransitioningIn => self.arrive(overlay),
                    CameraMode::TransitioningOut => self.finish_return(),
                    _ => {}
                }
                WriteAuthority::Transition
            }
            TransitionStatus::Completed { id, .. } => {
                log::warn!("dropping completion of stale transition {:?}", id);
                WriteAuthority::Hold
            }
            TransitionStatus::Idle => {
                log::warn!("no flight in the air while {:?}", self.mode());
                WriteAuthority::Hold
            }
        }
    }
}
