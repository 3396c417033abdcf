use orrery::config::ViewerConfig;
use orrery::core::{CameraMode, DirectorEvent, WriteAuthority};
use orrery::script::{replay, FrameRecord, Script};
use orrery::traits::BodyId;

const ROUND_TRIP: &str = r#"{
    "duration": 7.0,
    "inputs": [
        { "at": 0.0, "input": { "type": "scroll", "delta": { "lines": 10 } } },
        { "at": 1.0, "input": { "type": "select", "id": "helix" } },
        { "at": 4.0, "input": { "type": "back" } },
        { "at": 4.5, "input": { "type": "scroll", "delta": { "lines": 10 } } }
    ]
}"#;

fn round_trip() -> Vec<FrameRecord> {
    let script = Script::from_json_str(ROUND_TRIP).unwrap();
    replay(&script, &ViewerConfig::default(), 60.0)
}

fn first_event(records: &[FrameRecord], pred: impl Fn(&DirectorEvent) -> bool) -> Option<usize> {
    records
        .iter()
        .position(|r| r.events.iter().any(|e| pred(e)))
}

#[cfg(test)]
mod replay_tests {
    use super::*;

    #[test]
    fn test_round_trip_visits_every_mode_in_order() {
        let records = round_trip();
        assert_eq!(records.len(), 420);

        let mut modes: Vec<CameraMode> = Vec::new();
        for record in &records {
            if modes.last() != Some(&record.mode) {
                modes.push(record.mode);
            }
        }
        assert_eq!(
            modes,
            vec![
                CameraMode::ScrollDriven,
                CameraMode::TransitioningIn,
                CameraMode::Orbiting,
                CameraMode::TransitioningOut,
                CameraMode::ScrollDriven,
            ]
        );

        let last = records.last().unwrap();
        assert_eq!(last.writer, WriteAuthority::Path);
        assert_eq!(last.selection, None);
        assert!(last.overlay_hidden);
    }

    #[test]
    fn test_events_fire_once_and_in_order() {
        let records = round_trip();
        let selected = first_event(&records, |e| matches!(e, DirectorEvent::Selected(_))).unwrap();
        let arrived = first_event(&records, |e| matches!(e, DirectorEvent::Arrived(_))).unwrap();
        let started = first_event(&records, |e| matches!(e, DirectorEvent::ReturnStarted(_))).unwrap();
        let returned = first_event(&records, |e| matches!(e, DirectorEvent::Returned)).unwrap();

        assert!(selected < arrived && arrived < started && started < returned);
        // Selected on the frame at 1.0 s, landing 1.8 s later
        assert!((arrived - selected).abs_diff(108) <= 2, "flight took {} frames", arrived - selected);

        let arrivals = records
            .iter()
            .flat_map(|r| r.events.iter())
            .filter(|e| matches!(e, DirectorEvent::Arrived(_)))
            .count();
        assert_eq!(arrivals, 1);
        assert!(records
            .iter()
            .flat_map(|r| r.events.iter())
            .all(|e| !matches!(e, DirectorEvent::OverlayTimedOut)));
    }

    #[test]
    fn test_progress_is_frozen_while_away() {
        let records = round_trip();
        let away: Vec<&FrameRecord> = records
            .iter()
            .filter(|r| r.mode != CameraMode::ScrollDriven)
            .collect();
        assert!(!away.is_empty());

        let frozen = away[0].progress;
        assert!(away.iter().all(|r| r.progress == frozen));
        assert!(frozen > 0.0 && frozen < 0.2);
        assert!(away
            .iter()
            .all(|r| r.selection == Some(BodyId::new("helix"))));
    }

    #[test]
    fn test_return_lands_where_the_flight_left() {
        let records = round_trip();
        let left = records
            .iter()
            .position(|r| r.mode == CameraMode::TransitioningIn)
            .unwrap();
        let back = records
            .iter()
            .rposition(|r| r.mode != CameraMode::ScrollDriven)
            .unwrap()
            + 1;

        assert_eq!(records[back].mode, CameraMode::ScrollDriven);
        assert_eq!(records[back].position, records[left - 1].position);
        assert_eq!(records[back].target, records[left - 1].target);
    }

    #[test]
    fn test_camera_writer_matches_mode() {
        for record in round_trip() {
            let allowed = match record.mode {
                CameraMode::ScrollDriven => {
                    matches!(record.writer, WriteAuthority::Path | WriteAuthority::Transition)
                }
                CameraMode::TransitioningIn => record.writer == WriteAuthority::Transition,
                CameraMode::Orbiting => {
                    matches!(record.writer, WriteAuthority::Orbit | WriteAuthority::Transition)
                }
                CameraMode::TransitioningOut => {
                    matches!(record.writer, WriteAuthority::Transition | WriteAuthority::Hold)
                }
            };
            assert!(allowed, "{:?} wrote at frame {} while {:?}", record.writer, record.frame, record.mode);
        }
    }
}
