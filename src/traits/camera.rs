use crate::types::CameraUniform;

/// Renderer-side receiver of the camera written each frame
pub trait CameraSink {
    /// Apply the camera computed for frame `frame`
    fn write_camera(&mut self, frame: u64, uniform: &CameraUniform);
}

/// Keeps only the latest camera; handy for hosts that render lazily
#[derive(Debug, Clone, Copy, Default)]
pub struct LatestCamera {
    pub frame: Option<u64>,
    pub uniform: Option<CameraUniform>,
}

impl CameraSink for LatestCamera {
    fn write_camera(&mut self, frame: u64, uniform: &CameraUniform) {
        self.frame = Some(frame);
        self.uniform = Some(*uniform);
    }
}
