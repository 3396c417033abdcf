pub mod director;
pub mod input_adapter;
pub mod orbit;
pub mod parallax;
pub mod path;
pub mod picking;
pub mod scroll;
pub mod timer;
pub mod transition;

pub use director::{CameraDirector, CameraMode, DirectorEvent, DirectorSettings, FrameWrite, PathInput, WriteAuthority};
pub use input_adapter::WinitController;
pub use orbit::OrbitMotion;
pub use parallax::MouseParallax;
pub use path::PathInterpolator;
pub use picking::{Hit, HoverEvent, HoverTracker, Picker};
pub use scroll::ScrubbedScroll;
pub use timer::{Countdown, FixedHz};
pub use transition::{TransitionEngine, TransitionId, TransitionStatus};
