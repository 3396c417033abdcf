use crate::camera::Pose;
use crate::math::{lerp_exact, Easing};

/// Completion token handed out by [`TransitionEngine::start`].
///
/// The engine reports `Completed` with this id exactly once, and never for a
/// flight that was superseded by a later `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionId(u64);

#[derive(Debug, Clone, Copy, PartialEq)]
struct Flight {
    id: TransitionId,
    from: Pose,
    to: Pose,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl Flight {
    fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    /// Position eased along the straight line; facing stays on the destination's focal point
    fn pose_at(&self, eased: f32) -> Pose {
        Pose::new(
            lerp_exact(self.from.position, self.to.position, eased),
            self.to.target,
        )
    }
}

/// Result of advancing the engine by one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionStatus {
    Idle,
    Running(Pose),
    /// Final frame of a flight; the pose is exactly the destination
    Completed { id: TransitionId, pose: Pose },
}

impl TransitionStatus {
    pub fn pose(&self) -> Option<Pose> {
        match self {
            TransitionStatus::Idle => None,
            TransitionStatus::Running(pose) | TransitionStatus::Completed { pose, .. } => {
                Some(*pose)
            }
        }
    }
}

/// Timed, eased fly-to between two poses. At most one flight is alive at a time.
///
/// Only the position is interpolated. Every frame of a flight looks at the
/// destination's target, so the camera turns to face where it is going at once.
#[derive(Debug, Default)]
pub struct TransitionEngine {
    active: Option<Flight>,
    next_id: u64,
}

impl TransitionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a flight. Any flight still in the air is dropped without completing.
    pub fn start(&mut self, from: Pose, to: Pose, duration: f32, easing: Easing) -> TransitionId {
        let id = TransitionId(self.next_id);
        self.next_id += 1;

        if let Some(old) = self.active.take() {
            log::debug!("transition {:?} superseded by {:?}", old.id, id);
        }

        self.active = Some(Flight {
            id,
            from,
            to,
            duration,
            elapsed: 0.0,
            easing,
        });
        id
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Advance by `delta` seconds
    pub fn tick(&mut self, delta: f32) -> TransitionStatus {
        let Some(flight) = self.active.as_mut() else {
            return TransitionStatus::Idle;
        };

        flight.elapsed += delta.max(0.0);
        let t = flight.progress();

        if t >= 1.0 {
            let done = *flight;
            self.active = None;
            return TransitionStatus::Completed {
                id: done.id,
                pose: done.to,
            };
        }

        TransitionStatus::Running(flight.pose_at(flight.easing.apply(t)))
    }
}
