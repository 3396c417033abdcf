//! Headless replay of a timed input script.
//!
//! A script is a JSON document listing inputs with the time they occur:
//!
//! ```json
//! {
//!   "duration": 6.0,
//!   "inputs": [
//!     { "at": 0.0, "input": { "type": "scroll", "delta": { "lines": 10 } } },
//!     { "at": 2.0, "input": { "type": "select", "id": "helix" } },
//!     { "at": 5.0, "input": { "type": "back" } }
//!   ]
//! }
//! ```

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::ViewerConfig;
use crate::core::director::{CameraMode, DirectorEvent, WriteAuthority};
use crate::core::picking::HoverEvent;
use crate::frame::FixedStepFrames;
use crate::scene::SolarSystem;
use crate::traits::{BodyId, ViewerInput};
use crate::viewer::{FrameOutput, Viewer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedInput {
    /// Seconds from the start of the replay
    pub at: f32,
    pub input: ViewerInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Total replay length in seconds
    pub duration: f32,
    #[serde(default)]
    pub inputs: Vec<TimedInput>,
}

impl Script {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut script: Script = serde_json::from_str(json).context("Failed to parse script")?;
        script.validate()?;
        script
            .inputs
            .sort_by(|a, b| a.at.total_cmp(&b.at));
        Ok(script)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script: {}", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("Invalid script: {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            bail!("script duration must be positive, got {}", self.duration);
        }
        if let Some(bad) = self
            .inputs
            .iter()
            .find(|i| !i.at.is_finite() || i.at < 0.0)
        {
            bail!("input time must be a non-negative number, got {}", bad.at);
        }
        Ok(())
    }

    pub fn frame_count(&self, fps: f32) -> u64 {
        (self.duration * fps).ceil().max(0.0) as u64
    }
}

/// One line of replay output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameRecord {
    pub frame: u64,
    pub time: f32,
    pub mode: CameraMode,
    pub writer: WriteAuthority,
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub progress: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovered: Option<BodyId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<BodyId>,
    pub overlay_hidden: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<DirectorEvent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hover_events: Vec<HoverEvent>,
}

impl From<FrameOutput> for FrameRecord {
    fn from(out: FrameOutput) -> Self {
        Self {
            frame: out.frame,
            time: out.time,
            mode: out.mode,
            writer: out.writer,
            position: out.pose.position.to_array(),
            target: out.pose.target.to_array(),
            progress: out.progress,
            hovered: out.hovered,
            selection: out.selection,
            overlay_hidden: out.overlay_hidden,
            events: out.events,
            hover_events: out.hover_events,
        }
    }
}

/// Replay `script` against the demo scene, handing every frame to `on_frame`
pub fn replay_with(
    script: &Script,
    config: &ViewerConfig,
    fps: f32,
    mut on_frame: impl FnMut(&FrameRecord),
) -> Viewer {
    let mut viewer = Viewer::new(config);
    let mut system = SolarSystem::from_config(&config.system);
    let mut frames = FixedStepFrames::new(fps);
    let total = script.frame_count(frames.rate());

    log::info!(
        "replaying {} inputs over {} frames",
        script.inputs.len(),
        total
    );

    let mut next_input = 0;
    for frame in frames.by_ref().take(total as usize) {
        while let Some(timed) = script.inputs.get(next_input) {
            if timed.at > frame.time {
                break;
            }
            viewer.push_input(timed.input.clone());
            next_input += 1;
        }

        system.update(frame.delta);
        let record = FrameRecord::from(viewer.tick(&frame, &system));
        on_frame(&record);
    }

    viewer
}

/// Replay and collect every frame
pub fn replay(script: &Script, config: &ViewerConfig, fps: f32) -> Vec<FrameRecord> {
    let mut records = Vec::new();
    replay_with(script, config, fps, |record| records.push(record.clone()));
    records
}
