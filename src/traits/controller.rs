use serde::{Deserialize, Serialize};

use super::scene::BodyId;

/// Wheel movement, in whichever unit the platform reports
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDelta {
    Lines(f32),
    Pixels(f32),
}

/// Host-independent user input, consumed once per frame by the viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewerInput {
    /// Pointer position in physical pixels
    PointerMoved { x: f32, y: f32 },
    PointerLeft,
    /// Primary button pressed at the last pointer position
    Click,
    /// Leave orbit (escape key, secondary button, close button)
    Back,
    Scroll { delta: ScrollDelta },
    /// Jump the scroll position directly, progress in [0, 1]
    ScrollTo { progress: f32 },
    /// Select a body by id without picking
    Select { id: BodyId },
    Resize { width: u32, height: u32 },
}

/// Source of viewer input, drained once per frame
pub trait Controller {
    /// Inputs received since the last drain, in arrival order
    fn drain_inputs(&mut self) -> Vec<ViewerInput>;

    /// Last known pointer position, if the pointer is inside the view
    fn pointer(&self) -> Option<(f32, f32)>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_json_shape() {
        let input: ViewerInput =
            serde_json::from_str(r#"{"type":"pointer_moved","x":10.0,"y":20.0}"#).unwrap();
        assert_eq!(input, ViewerInput::PointerMoved { x: 10.0, y: 20.0 });

        let input: ViewerInput =
            serde_json::from_str(r#"{"type":"scroll","delta":{"lines":-3.0}}"#).unwrap();
        assert_eq!(
            input,
            ViewerInput::Scroll {
                delta: ScrollDelta::Lines(-3.0)
            }
        );

        let input: ViewerInput =
            serde_json::from_str(r#"{"type":"select","id":"helix"}"#).unwrap();
        assert_eq!(
            input,
            ViewerInput::Select {
                id: BodyId::new("helix")
            }
        );
    }

    #[test]
    fn test_unit_variants() {
        let input: ViewerInput = serde_json::from_str(r#"{"type":"back"}"#).unwrap();
        assert_eq!(input, ViewerInput::Back);
        assert_eq!(
            serde_json::to_string(&ViewerInput::Click).unwrap(),
            r#"{"type":"click"}"#
        );
    }

    struct MockController {
        queued: Vec<ViewerInput>,
    }

    impl Controller for MockController {
        fn drain_inputs(&mut self) -> Vec<ViewerInput> {
            std::mem::take(&mut self.queued)
        }

        fn pointer(&self) -> Option<(f32, f32)> {
            None
        }
    }

    #[test]
    fn test_controller_drains_once() {
        let mut controller = MockController {
            queued: vec![ViewerInput::Click, ViewerInput::Back],
        };
        assert_eq!(controller.drain_inputs().len(), 2);
        assert!(controller.drain_inputs().is_empty());
        assert_eq!(controller.pointer(), None);
    }
}
