pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod frame;
pub mod hud;
pub mod math;
pub mod overlay;
pub mod scene;
pub mod script;
pub mod traits;
pub mod types;
pub mod viewer;

pub use camera::{Pose, Projection};
pub use config::{ConfigError, ViewerConfig};
pub use scene::SolarSystem;
pub use viewer::{FrameOutput, Viewer};
