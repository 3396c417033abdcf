pub mod camera;
pub mod controller;
pub mod frame;
pub mod overlay;
pub mod scene;
pub mod scroll;

pub use camera::*;
pub use controller::*;
pub use frame::*;
pub use overlay::*;
pub use scene::*;
pub use scroll::*;
