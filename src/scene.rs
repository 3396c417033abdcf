use glam::Vec3;

use crate::config::{PlanetConfig, SystemConfig};
use crate::traits::{BodyId, BodyKind, Selectable, SelectableRegistry};

/// Circular orbit of a planet around the sun
#[derive(Debug, Clone, Copy, PartialEq)]
struct PlanetOrbit {
    distance: f32,
    /// Radians per second
    speed: f32,
    angle: f32,
    tilt: f32,
}

impl PlanetOrbit {
    fn offset(&self) -> Vec3 {
        let a = self.angle;
        Vec3::new(
            a.cos() * self.distance,
            (a * 0.5).sin() * self.tilt * self.distance,
            a.sin() * self.distance,
        )
    }
}

/// A sun or planet in the demo scene
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub id: BodyId,
    pub title: String,
    pub kind: BodyKind,
    pub radius: f32,
    pub position: Vec3,
    orbit: Option<PlanetOrbit>,
}

impl Body {
    pub fn orbit_angle(&self) -> Option<f32> {
        self.orbit.map(|o| o.angle)
    }

    fn as_selectable(&self) -> Selectable {
        Selectable {
            id: self.id.clone(),
            kind: self.kind,
            position: self.position,
            radius: self.radius,
        }
    }
}

/// Demo scene: one primary sun with planets circling it
#[derive(Debug, Clone, PartialEq)]
pub struct SolarSystem {
    center: Vec3,
    bodies: Vec<Body>,
}

impl SolarSystem {
    pub fn from_config(config: &SystemConfig) -> Self {
        let center = config.sun.position;

        let sun = Body {
            id: BodyId::new(config.sun.id.as_str()),
            title: config.sun.title.clone(),
            kind: BodyKind::Primary,
            radius: config.sun.radius,
            position: center,
            orbit: None,
        };

        let planets = config
            .planets
            .iter()
            .map(|planet| Self::planet(center, planet, config.orbit_speed));

        let bodies: Vec<Body> = std::iter::once(sun).chain(planets).collect();
        log::debug!("solar system with {} bodies", bodies.len());

        Self { center, bodies }
    }

    fn planet(center: Vec3, config: &PlanetConfig, base_speed: f32) -> Body {
        let orbit = PlanetOrbit {
            distance: config.distance,
            speed: base_speed * config.orbit_speed,
            angle: config.phase,
            tilt: config.tilt,
        };
        Body {
            id: BodyId::new(config.id.as_str()),
            title: config.title.clone(),
            kind: BodyKind::Orbiting,
            radius: config.radius,
            position: center + orbit.offset(),
            orbit: Some(orbit),
        }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: &BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| &b.id == id)
    }

    /// Advance every planet along its orbit
    pub fn update(&mut self, delta: f32) {
        let center = self.center;
        for body in &mut self.bodies {
            if let Some(orbit) = &mut body.orbit {
                orbit.angle += orbit.speed * delta;
                body.position = center + orbit.offset();
            }
        }
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::from_config(&SystemConfig::default())
    }
}

impl SelectableRegistry for SolarSystem {
    fn list_selectable(&self) -> Vec<Selectable> {
        self.bodies.iter().map(Body::as_selectable).collect()
    }

    fn find(&self, id: &BodyId) -> Option<Selectable> {
        self.body(id).map(Body::as_selectable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_planet(tilt: f32) -> SystemConfig {
        SystemConfig {
            orbit_speed: 1.0,
            planets: vec![PlanetConfig {
                tilt,
                ..PlanetConfig::new("p", "P", 10.0, 1.0)
            }],
            ..SystemConfig::default()
        }
    }

    #[test]
    fn sun_is_primary_at_centre() {
        let system = SolarSystem::default();
        let sun = system.body(&BodyId::new("sun")).unwrap();
        assert_eq!(sun.kind, BodyKind::Primary);
        assert_eq!(sun.position, Vec3::ZERO);
        assert_eq!(sun.orbit_angle(), None);
        assert_eq!(system.list_selectable().len(), 5);
    }

    #[test]
    fn planets_start_at_phase() {
        let system = SolarSystem::from_config(&single_planet(0.0));
        let planet = system.find(&BodyId::new("p")).unwrap();
        assert_eq!(planet.kind, BodyKind::Orbiting);
        assert_eq!(planet.position, Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn planets_move_on_update() {
        let mut system = SolarSystem::from_config(&single_planet(0.1));
        system.update(std::f32::consts::PI);

        let planet = system.body(&BodyId::new("p")).unwrap();
        assert!((planet.position.x + 10.0).abs() < 1e-4);
        // Half a turn lifts by sin(π/2) · tilt · distance
        assert!((planet.position.y - 1.0).abs() < 1e-4);
        assert!(planet.position.z.abs() < 1e-4);

        // The sun never moves
        assert_eq!(system.bodies()[0].position, Vec3::ZERO);
    }

    #[test]
    fn unknown_body_is_none() {
        let system = SolarSystem::default();
        assert!(system.find(&BodyId::new("pluto")).is_none());
    }
}
