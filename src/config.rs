//! Viewer configuration
//!
//! Loaded once at startup from JSON and immutable afterwards. Every section
//! falls back to its defaults, so a file only needs the values it changes.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::math::Easing;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("`{field}` must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("`{field}` must be finite")]
    NotFinite { field: &'static str },

    #[error("`{field}` must be within [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("clip planes out of order: near {near}, far {far}")]
    ClipPlanes { near: f32, far: f32 },

    #[error("duplicate body id `{0}`")]
    DuplicateBody(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub start_position: Vec3,
    pub end_position: Vec3,
    /// Distance ahead of the camera along the path that it looks at
    pub look_ahead_offset: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 55.0,
            near: 0.1,
            far: 2000.0,
            start_position: Vec3::new(0.0, 8.0, 60.0),
            end_position: Vec3::new(0.0, 4.0, -180.0),
            look_ahead_offset: 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub hover_scale: f32,
    /// Horizontal offset of the orbit entry pose from the selected body
    pub orbit_distance: f32,
    pub orbit_height: f32,
    /// Seconds for the fly-to flight
    pub transition_duration: f32,
    /// Return flight lasts `transition_duration * return_duration_factor`
    pub return_duration_factor: f32,
    pub easing: Easing,
    /// Extra world-space radius added to every body when picking
    pub hit_tolerance: f32,
    /// Seconds to wait for the overlay to report hidden before returning anyway
    pub overlay_hide_timeout: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            hover_scale: 1.15,
            orbit_distance: 8.0,
            orbit_height: 3.0,
            transition_duration: 1.8,
            return_duration_factor: 0.8,
            easing: Easing::DEFAULT_FLIGHT,
            hit_tolerance: 0.25,
            overlay_hide_timeout: 2.0,
        }
    }
}

impl InteractionConfig {
    pub fn orbit_offset(&self) -> Vec3 {
        Vec3::new(
            self.orbit_distance,
            self.orbit_height,
            self.orbit_distance * 0.5,
        )
    }

    pub fn return_duration(&self) -> f32 {
        self.transition_duration * self.return_duration_factor
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitCameraConfig {
    /// Radians per second
    pub speed: f32,
    pub radius: f32,
    pub height: f32,
    pub bob_amplitude: f32,
}

impl Default for OrbitCameraConfig {
    fn default() -> Self {
        Self {
            speed: 0.15,
            radius: 10.0,
            height: 3.0,
            bob_amplitude: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub intensity: f32,
    /// Per-frame follow factor at 60 Hz
    pub smoothing: f32,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            intensity: 0.8,
            smoothing: 0.04,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Seconds the reported progress lags behind the raw input (0 = immediate)
    pub scrub: f32,
    /// Progress per wheel line
    pub line_step: f32,
    /// Progress per wheel pixel
    pub pixel_step: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            scrub: 1.5,
            line_step: 0.02,
            pixel_step: 0.0002,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    pub size: f32,
    pub hover_size: f32,
    /// Per-frame follow factor at 60 Hz
    pub smoothing: f32,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            size: 20.0,
            hover_size: 40.0,
            smoothing: 0.15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProximityConfig {
    pub distance: f32,
    pub max_opacity: f32,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            distance: 30.0,
            max_opacity: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub overlay_fade_in: f32,
    pub overlay_fade_out: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            overlay_fade_in: 0.6,
            overlay_fade_out: 0.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SunConfig {
    pub id: String,
    pub title: String,
    pub radius: f32,
    pub position: Vec3,
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            id: "sun".to_string(),
            title: "About".to_string(),
            radius: 5.0,
            position: Vec3::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetConfig {
    pub id: String,
    pub title: String,
    /// Orbit radius around the sun
    pub distance: f32,
    pub radius: f32,
    /// Relative orbit speed, scaled by `SystemConfig::orbit_speed`
    #[serde(default = "default_planet_speed")]
    pub orbit_speed: f32,
    /// Starting angle in radians
    #[serde(default)]
    pub phase: f32,
    /// Vertical wobble as a fraction of the orbit radius
    #[serde(default)]
    pub tilt: f32,
}

fn default_planet_speed() -> f32 {
    1.0
}

impl PlanetConfig {
    pub fn new(id: &str, title: &str, distance: f32, radius: f32) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            distance,
            radius,
            orbit_speed: 1.0,
            phase: 0.0,
            tilt: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub sun: SunConfig,
    /// Base orbit speed for planets, radians per second
    pub orbit_speed: f32,
    pub planets: Vec<PlanetConfig>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            sun: SunConfig::default(),
            orbit_speed: 0.15,
            planets: vec![
                PlanetConfig {
                    phase: 0.4,
                    tilt: 0.04,
                    ..PlanetConfig::new("aurora", "Aurora", 18.0, 1.6)
                },
                PlanetConfig {
                    orbit_speed: 0.7,
                    phase: 2.1,
                    tilt: -0.03,
                    ..PlanetConfig::new("meridian", "Meridian", 32.0, 2.4)
                },
                PlanetConfig {
                    orbit_speed: 0.45,
                    phase: 4.0,
                    tilt: 0.06,
                    ..PlanetConfig::new("helix", "Helix", 48.0, 3.2)
                },
                PlanetConfig {
                    orbit_speed: 0.3,
                    phase: 5.3,
                    tilt: -0.05,
                    ..PlanetConfig::new("ember", "Ember", 66.0, 2.0)
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub camera: CameraConfig,
    pub interaction: InteractionConfig,
    pub orbit_camera: OrbitCameraConfig,
    pub parallax: ParallaxConfig,
    pub scroll: ScrollConfig,
    pub cursor: CursorConfig,
    pub proximity: ProximityConfig,
    pub ui: UiConfig,
    pub system: SystemConfig,
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        Err(ConfigError::NotFinite { field })
    } else if value <= 0.0 {
        Err(ConfigError::NotPositive { field, value })
    } else {
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    in_range(field, value, 0.0, f32::MAX)
}

fn in_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        Err(ConfigError::NotFinite { field })
    } else if value < min || value > max {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    } else {
        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field })
    }
}

fn finite_vec(field: &'static str, value: Vec3) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field })
    }
}

impl ViewerConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ViewerConfig =
            serde_json::from_str(json).context("Failed to parse viewer config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Invalid config: {}", path.display()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let camera = &self.camera;
        in_range("camera.fov", camera.fov, 1.0, 179.0)?;
        positive("camera.near", camera.near)?;
        positive("camera.far", camera.far)?;
        if camera.near >= camera.far {
            return Err(ConfigError::ClipPlanes {
                near: camera.near,
                far: camera.far,
            });
        }
        finite_vec("camera.start_position", camera.start_position)?;
        finite_vec("camera.end_position", camera.end_position)?;
        non_negative("camera.look_ahead_offset", camera.look_ahead_offset)?;

        let interaction = &self.interaction;
        positive("interaction.hover_scale", interaction.hover_scale)?;
        non_negative("interaction.orbit_distance", interaction.orbit_distance)?;
        finite("interaction.orbit_height", interaction.orbit_height)?;
        positive("interaction.transition_duration", interaction.transition_duration)?;
        positive(
            "interaction.return_duration_factor",
            interaction.return_duration_factor,
        )?;
        non_negative("interaction.hit_tolerance", interaction.hit_tolerance)?;
        positive("interaction.overlay_hide_timeout", interaction.overlay_hide_timeout)?;

        let orbit = &self.orbit_camera;
        finite("orbit_camera.speed", orbit.speed)?;
        positive("orbit_camera.radius", orbit.radius)?;
        finite("orbit_camera.height", orbit.height)?;
        non_negative("orbit_camera.bob_amplitude", orbit.bob_amplitude)?;

        non_negative("parallax.intensity", self.parallax.intensity)?;
        in_range("parallax.smoothing", self.parallax.smoothing, 0.0, 1.0)?;
        non_negative("scroll.scrub", self.scroll.scrub)?;
        non_negative("scroll.line_step", self.scroll.line_step)?;
        non_negative("scroll.pixel_step", self.scroll.pixel_step)?;
        in_range("cursor.smoothing", self.cursor.smoothing, 0.0, 1.0)?;
        positive("proximity.distance", self.proximity.distance)?;
        in_range("proximity.max_opacity", self.proximity.max_opacity, 0.0, 1.0)?;
        non_negative("ui.overlay_fade_in", self.ui.overlay_fade_in)?;
        non_negative("ui.overlay_fade_out", self.ui.overlay_fade_out)?;

        let system = &self.system;
        positive("system.sun.radius", system.sun.radius)?;
        finite_vec("system.sun.position", system.sun.position)?;
        finite("system.orbit_speed", system.orbit_speed)?;

        let mut ids = HashSet::new();
        ids.insert(system.sun.id.as_str());
        for planet in &system.planets {
            if !ids.insert(planet.id.as_str()) {
                return Err(ConfigError::DuplicateBody(planet.id.clone()));
            }
            positive("system.planets.distance", planet.distance)?;
            positive("system.planets.radius", planet.radius)?;
            finite("system.planets.orbit_speed", planet.orbit_speed)?;
            finite("system.planets.phase", planet.phase)?;
            in_range("system.planets.tilt", planet.tilt, -1.0, 1.0)?;
        }

        Ok(())
    }
}
