use glam::Vec3;
use orrery::camera::Pose;
use orrery::config::ViewerConfig;
use orrery::core::{
    CameraDirector, CameraMode, DirectorEvent, PathInput, TransitionEngine, TransitionStatus,
    WriteAuthority,
};
use orrery::math::Easing;
use orrery::traits::{BodyId, BodyKind, OverlayCoordinator, Selection};

/// Overlay that hides after a fixed number of polls
struct MockOverlay {
    shows: Vec<BodyId>,
    hides: usize,
    polls_until_hidden: usize,
    remaining: usize,
}

impl MockOverlay {
    fn instant() -> Self {
        Self::slow(0)
    }

    fn slow(polls: usize) -> Self {
        Self {
            shows: Vec::new(),
            hides: 0,
            polls_until_hidden: polls,
            remaining: 0,
        }
    }
}

impl OverlayCoordinator for MockOverlay {
    fn show_for(&mut self, selection: &Selection) {
        self.shows.push(selection.id.clone());
    }

    fn hide_all(&mut self) {
        self.hides += 1;
        self.remaining = self.polls_until_hidden;
    }

    fn is_hidden(&self) -> bool {
        self.remaining == 0
    }

    fn update(&mut self, _delta: f32) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

const DT: f32 = 1.0 / 60.0;

fn body_a() -> Selection {
    Selection {
        id: BodyId::new("a"),
        kind: BodyKind::Orbiting,
        target: Vec3::new(10.0, 0.0, 0.0),
    }
}

fn step(director: &mut CameraDirector, overlay: &mut MockOverlay, progress: f32) -> (WriteAuthority, Pose, CameraMode) {
    let write = director.tick(DT, PathInput::new(progress), overlay);
    overlay.update(DT);
    (write.authority, write.pose, write.mode)
}

/// Writer allowed for the mode reported after a tick
fn authority_matches(mode: CameraMode, writer: WriteAuthority) -> bool {
    match mode {
        CameraMode::ScrollDriven => matches!(writer, WriteAuthority::Path | WriteAuthority::Transition),
        CameraMode::TransitioningIn => writer == WriteAuthority::Transition,
        CameraMode::Orbiting => matches!(writer, WriteAuthority::Orbit | WriteAuthority::Transition),
        CameraMode::TransitioningOut => {
            matches!(writer, WriteAuthority::Transition | WriteAuthority::Hold)
        }
    }
}

#[cfg(test)]
mod transition_restart_tests {
    use super::*;

    #[test]
    fn test_restart_never_completes_discarded_flight() {
        let mut engine = TransitionEngine::new();
        let a = Pose::new(Vec3::ZERO, Vec3::NEG_Z);
        let b = Pose::new(Vec3::new(100.0, 0.0, 0.0), Vec3::new(100.0, 0.0, -1.0));
        let c = Pose::new(Vec3::new(0.0, 50.0, 0.0), Vec3::new(0.0, 50.0, -1.0));

        let first = engine.start(a, b, 1.0, Easing::DEFAULT_FLIGHT);
        let mut last = a;
        for _ in 0..30 {
            last = engine.tick(DT).pose().unwrap();
        }

        let second = engine.start(last, c, 1.0, Easing::DEFAULT_FLIGHT);
        let mut completions = Vec::new();
        let mut max_jump: f32 = 0.0;
        for _ in 0..120 {
            let status = engine.tick(DT);
            if let Some(pose) = status.pose() {
                max_jump = max_jump.max(pose.position.distance(last.position));
                assert_eq!(pose.target, c.target, "restarted flight must face its own destination");
                last = pose;
            }
            if let TransitionStatus::Completed { id, .. } = status {
                completions.push(id);
            }
        }

        assert_eq!(completions, vec![second]);
        assert!(!completions.contains(&first));
        assert_eq!(last, c);
        // power3.inOut peaks at 3x the average speed: 3 * 100 units/s / 60
        assert!(max_jump < 5.1, "restart jumped {}", max_jump);
    }
}

#[cfg(test)]
mod camera_director_tests {
    use super::*;

    #[test]
    fn test_selection_lands_on_entry_pose() {
        let mut director = CameraDirector::from_config(&ViewerConfig::default());
        let mut overlay = MockOverlay::instant();
        step(&mut director, &mut overlay, 0.0);

        assert!(director.select(body_a()));
        let mut frames = 0;
        let (writer, pose, mode) = loop {
            frames += 1;
            let result = step(&mut director, &mut overlay, 0.0);
            if result.2 != CameraMode::TransitioningIn || frames > 200 {
                break result;
            }
        };

        // 1.8 s at 60 Hz, give or take a frame of rounding
        assert!((107..=110).contains(&frames), "arrived after {} frames", frames);
        assert_eq!(writer, WriteAuthority::Transition);
        assert_eq!(mode, CameraMode::Orbiting);
        assert_eq!(pose.position, Vec3::new(18.0, 3.0, 4.0));
        assert_eq!(pose.target, Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(overlay.shows, vec![BodyId::new("a")]);
    }

    #[test]
    fn test_orbit_picks_up_without_a_jump() {
        let mut director = CameraDirector::from_config(&ViewerConfig::default());
        let mut overlay = MockOverlay::instant();
        director.select(body_a());

        let mut landed = None;
        for _ in 0..200 {
            let (_, pose, mode) = step(&mut director, &mut overlay, 0.0);
            if mode == CameraMode::Orbiting {
                landed = Some(pose);
                break;
            }
        }
        let mut last = landed.expect("flight should land").position;

        for frame in 0..120 {
            let (writer, pose, _) = step(&mut director, &mut overlay, 0.0);
            assert_eq!(writer, WriteAuthority::Orbit);
            let jump = pose.position.distance(last);
            assert!(jump < 0.05, "orbit frame {} moved {}", frame, jump);
            last = pose.position;
        }
    }

    #[test]
    fn test_return_restores_saved_pose() {
        let mut director = CameraDirector::from_config(&ViewerConfig::default());
        let mut overlay = MockOverlay::slow(12);
        step(&mut director, &mut overlay, 0.42);
        let saved = director.pose();

        director.select(body_a());
        for _ in 0..200 {
            step(&mut director, &mut overlay, 0.42);
        }
        assert_eq!(director.mode(), CameraMode::Orbiting);
        assert_eq!(director.saved_pose(), Some(saved));

        assert!(director.cancel(&mut overlay));
        assert_eq!(overlay.hides, 1);

        let mut holds = 0;
        for _ in 0..300 {
            let (writer, _, mode) = step(&mut director, &mut overlay, 0.42);
            if writer == WriteAuthority::Hold {
                holds += 1;
            }
            if mode == CameraMode::ScrollDriven {
                break;
            }
        }

        assert!(holds >= 11, "expected to wait for the overlay, held {} frames", holds);
        assert_eq!(director.mode(), CameraMode::ScrollDriven);
        assert_eq!(director.pose(), saved);
        assert_eq!(director.saved_pose(), None);

        let (writer, pose, _) = step(&mut director, &mut overlay, 0.42);
        assert_eq!(writer, WriteAuthority::Path);
        assert_eq!(pose, saved);
    }

    #[test]
    fn test_same_tick_select_and_cancel_is_deterministic() {
        let run = || {
            let mut director = CameraDirector::from_config(&ViewerConfig::default());
            let mut overlay = MockOverlay::slow(3);
            director.select(body_a());
            director.cancel(&mut overlay);

            let mut trace = Vec::new();
            for _ in 0..400 {
                let (writer, pose, mode) = step(&mut director, &mut overlay, 0.0);
                assert!(
                    authority_matches(mode, writer),
                    "{:?} wrote while {:?}",
                    writer,
                    mode
                );
                trace.push((writer, pose, mode));
            }
            (trace, overlay.shows.len(), overlay.hides, director.mode())
        };

        let (first, shows, hides, mode) = run();
        let (second, ..) = run();
        assert_eq!(first, second);
        assert_eq!(shows, 1);
        assert_eq!(hides, 1);
        assert_eq!(mode, CameraMode::ScrollDriven);
        assert!(first.iter().all(|(_, _, m)| *m != CameraMode::Orbiting));
    }

    #[test]
    fn test_invalid_requests_are_ignored() {
        let mut director = CameraDirector::from_config(&ViewerConfig::default());
        let mut overlay = MockOverlay::instant();

        assert!(!director.cancel(&mut overlay));
        director.select(body_a());
        assert!(!director.select(Selection {
            id: BodyId::new("b"),
            ..body_a()
        }));

        for _ in 0..200 {
            step(&mut director, &mut overlay, 0.0);
        }
        director.cancel(&mut overlay);
        // Second cancel during the return is ignored
        assert!(!director.cancel(&mut overlay));
        assert_eq!(overlay.hides, 1);
    }

    #[test]
    fn test_mode_change_events_are_ordered() {
        let mut director = CameraDirector::from_config(&ViewerConfig::default());
        let mut overlay = MockOverlay::instant();
        director.select(body_a());
        for _ in 0..200 {
            step(&mut director, &mut overlay, 0.0);
        }
        director.cancel(&mut overlay);
        for _ in 0..200 {
            step(&mut director, &mut overlay, 0.0);
        }

        let events = director.drain_events();
        let arrived = events
            .iter()
            .position(|e| matches!(e, DirectorEvent::Arrived(_)))
            .unwrap();
        let return_started = events
            .iter()
            .position(|e| matches!(e, DirectorEvent::ReturnStarted(_)))
            .unwrap();
        let returned = events
            .iter()
            .position(|e| matches!(e, DirectorEvent::Returned))
            .unwrap();
        assert!(arrived < return_started && return_started < returned);
    }
}
