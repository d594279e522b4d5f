//! Hierarchical orbital motion
//!
//! Bodies live in an arena addressed by [`BodyId`]. Each body owns an
//! ordered list of [`Satellite`] edges pointing at its children; the root
//! (the sun) has no parent. Every frame [`Orrery::advance`] spins each body,
//! moves each satellite along its circular orbit and places it relative to
//! its parent's freshly updated position.

use glam::Vec3;
use serde::Serialize;

use super::catalog::{BodySpec, CatalogError};
use super::params::SimulationParameters;
use crate::consts::*;
use crate::orbital_offset;
use crate::scene::{Pose, SceneSink};

/// Index of a body in its [`Orrery`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BodyId(pub usize);

/// Orbital relationship binding a child body to its parent
#[derive(Debug, Clone, Serialize)]
pub struct Satellite {
    pub body: BodyId,
    /// Orbital period (days)
    pub orbital_period: f32,
    /// Distance from the parent at distance scale 1 (scene units)
    pub distance: f32,
    /// Current orbital angle (radians, unbounded)
    pub angle: f32,
    /// Orbital inclination (radians)
    pub inclination: f32,
}

/// A simulated celestial body
#[derive(Debug, Clone, Serialize)]
pub struct CelestialBody {
    pub name: String,
    /// Render radius at radius scale 1 (scene units)
    pub radius: f32,
    /// Revolutions per day (`1 / rotation period`, 0 for non-spinning bodies)
    pub rotation_rate: f32,
    /// Axial tilt (radians), applied as the X rotation
    pub axial_tilt: f32,
    pub color: u32,
    /// Current spin about the Y axis (radians, unbounded)
    pub spin: f32,
    pub position: Vec3,
    pub satellites: Vec<Satellite>,
}

/// Arena of bodies forming a single orbit tree.
///
/// Only [`Orrery::from_spec`] builds one, so the arena is never empty and
/// every satellite edge points forward to a distinct child.
#[derive(Debug, Clone, Serialize)]
pub struct Orrery {
    bodies: Vec<CelestialBody>,
    parents: Vec<Option<BodyId>>,
}

impl Orrery {
    /// Build an orrery from a physical description.
    ///
    /// Distances become `km / AU * 300`, radii `km / AU * 10000`. Bodies are
    /// stored in pre-order, so the root is always `BodyId(0)`.
    pub fn from_spec(spec: &BodySpec) -> Result<Self, CatalogError> {
        spec.validate()?;

        let mut orrery = Self {
            bodies: Vec::with_capacity(spec.count()),
            parents: Vec::with_capacity(spec.count()),
        };
        orrery.insert(spec, None);
        log::info!(
            "Orrery built: {} bodies rooted at `{}`",
            orrery.len(),
            spec.name
        );
        Ok(orrery)
    }

    fn insert(&mut self, spec: &BodySpec, parent: Option<BodyId>) -> BodyId {
        let id = BodyId(self.bodies.len());
        self.bodies.push(CelestialBody {
            name: spec.name.clone(),
            radius: (spec.radius_km / AU_KM * RADIUS_UNITS_PER_AU) as f32,
            rotation_rate: spec
                .rotation_period_days
                .map(|p| (1.0 / p) as f32)
                .unwrap_or(0.0),
            axial_tilt: spec.axial_tilt_deg.to_radians() as f32,
            color: spec.color,
            spin: 0.0,
            position: Vec3::ZERO,
            satellites: Vec::with_capacity(spec.satellites.len()),
        });
        self.parents.push(parent);

        for sat in &spec.satellites {
            let child = self.insert(&sat.body, Some(id));
            self.bodies[id.0].satellites.push(Satellite {
                body: child,
                orbital_period: sat.orbital_period_days as f32,
                distance: (sat.distance_km / AU_KM * DISTANCE_UNITS_PER_AU) as f32,
                angle: 0.0,
                inclination: sat.inclination_deg.to_radians() as f32,
            });
        }
        id
    }

    pub fn root(&self) -> BodyId {
        BodyId(0)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn body(&self, id: BodyId) -> &CelestialBody {
        &self.bodies[id.0]
    }

    pub fn parent(&self, id: BodyId) -> Option<BodyId> {
        self.parents[id.0]
    }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyId, &CelestialBody)> {
        self.bodies.iter().enumerate().map(|(i, b)| (BodyId(i), b))
    }

    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.bodies.iter().position(|b| b.name == name).map(BodyId)
    }

    /// The satellite edge that binds `id` to its parent
    pub fn orbit_of(&self, id: BodyId) -> Option<&Satellite> {
        let parent = self.parent(id)?;
        self.bodies[parent.0].satellites.iter().find(|s| s.body == id)
    }

    /// Advance every body by one frame.
    ///
    /// Walks the tree parent-first with an explicit stack, visiting
    /// satellites in construction order. Each orbital period must be non-zero,
    /// which [`Orrery::from_spec`] guarantees.
    pub fn advance(&mut self, params: &SimulationParameters) {
        let time_factor = params.time_factor.get();
        let distance_scale = params.distance_scale.get();

        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            let body = &mut self.bodies[id.0];
            body.spin += body.rotation_rate * time_factor / FRAMES_PER_DAY;
            let origin = body.position;

            for i in 0..self.bodies[id.0].satellites.len() {
                let sat = &mut self.bodies[id.0].satellites[i];
                sat.angle += time_factor / sat.orbital_period / FRAMES_PER_DAY;
                let child = sat.body;
                let offset = orbital_offset(sat.distance * distance_scale, sat.angle);
                self.bodies[child.0].position = origin + offset;
            }

            // Reverse push keeps pre-order (first satellite popped first)
            stack.extend(self.bodies[id.0].satellites.iter().rev().map(|s| s.body));
        }
    }

    /// Render pose for a body under the current parameters
    pub fn pose(&self, id: BodyId, params: &SimulationParameters) -> Pose {
        let body = &self.bodies[id.0];
        Pose {
            position: body.position,
            rotation: Vec3::new(body.axial_tilt, body.spin, 0.0),
            scale: Vec3::splat(params.visual_scale()),
        }
    }

    /// Push every body's pose into the renderer, slot = body index
    pub fn sync_scene<S: SceneSink + ?Sized>(&self, params: &SimulationParameters, sink: &mut S) {
        for (id, _) in self.bodies() {
            sink.set_pose(id.0, self.pose(id, params));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::BandPreset;
    use crate::sim::catalog::{inner_planets, solar_system};
    use proptest::prelude::*;

    fn solar() -> Orrery {
        Orrery::from_spec(&solar_system()).unwrap()
    }

    fn assert_orbit_radius(orrery: &Orrery, params: &SimulationParameters) {
        for (id, body) in orrery.bodies() {
            let Some(parent) = orrery.parent(id) else {
                continue;
            };
            let sat = orrery.orbit_of(id).unwrap();
            let expected = sat.distance * params.distance_scale.get();
            let origin = orrery.body(parent).position;
            let actual = body.position.distance(origin);
            // f32 rounding of the absolute position dominates for small moons
            let tolerance = origin.length() * 1e-6 + expected * 1e-4 + 1e-5;
            assert!(
                (actual - expected).abs() <= tolerance,
                "{}: orbit radius {} != {}",
                body.name,
                actual,
                expected
            );
        }
    }

    #[test]
    fn test_from_spec_layout() {
        let orrery = solar();
        assert_eq!(orrery.len(), 16);
        assert_eq!(orrery.body(orrery.root()).name, "sun");
        assert_eq!(orrery.parent(orrery.root()), None);

        let moon = orrery.find("moon").unwrap();
        let earth = orrery.find("earth").unwrap();
        assert_eq!(orrery.parent(moon), Some(earth));

        // Earth sits at ~300 scene units
        let earth_orbit = orrery.orbit_of(earth).unwrap();
        assert!((earth_orbit.distance - 300.0).abs() < 0.01);
    }

    #[test]
    fn test_satellite_edges_form_a_tree() {
        let orrery = solar();
        let mut seen = vec![false; orrery.len()];
        for (id, body) in orrery.bodies() {
            for sat in &body.satellites {
                assert!(sat.body.0 > id.0, "{} links backwards", body.name);
                assert!(!seen[sat.body.0]);
                seen[sat.body.0] = true;
            }
        }
        assert!(!seen[0]);
        assert!(seen[1..].iter().all(|&s| s));

        // Snapshots still serialize for the page
        let json = serde_json::to_value(&orrery).unwrap();
        assert_eq!(json["bodies"].as_array().unwrap().len(), 16);
    }

    #[test]
    fn test_inclination_is_kept_on_the_orbit() {
        let orrery = solar();
        let mars = orrery.find("mars").unwrap();
        let inclination = orrery.orbit_of(mars).unwrap().inclination;
        assert!((inclination.to_degrees() - 1.85).abs() < 1e-4);
        assert!(orrery.orbit_of(orrery.root()).is_none());
    }

    #[test]
    fn test_from_spec_rejects_zero_period() {
        let mut spec = inner_planets();
        spec.satellites[0].orbital_period_days = 0.0;
        assert!(matches!(
            Orrery::from_spec(&spec),
            Err(CatalogError::ZeroOrbitalPeriod { .. })
        ));
    }

    #[test]
    fn test_advance_increments_angles() {
        let mut orrery = solar();
        let params = SimulationParameters::default();
        orrery.advance(&params);

        let earth = orrery.find("earth").unwrap();
        let sat = orrery.orbit_of(earth).unwrap();
        let expected = 1.0 / sat.orbital_period / FRAMES_PER_DAY;
        assert!((sat.angle - expected).abs() < 1e-9);

        let sun = orrery.body(orrery.root());
        assert!((sun.spin - (1.0 / 25.38) / FRAMES_PER_DAY).abs() < 1e-7);
        assert_eq!(sun.position, Vec3::ZERO);
    }

    #[test]
    fn test_time_factor_scales_angle_step() {
        let mut slow = solar();
        let mut fast = solar();
        let base = SimulationParameters::default();
        let mut quick = SimulationParameters::default();
        for _ in 0..70 {
            quick.speed_up();
        }
        slow.advance(&base);
        fast.advance(&quick);

        let mars = slow.find("mars").unwrap();
        let ratio = fast.orbit_of(mars).unwrap().angle / slow.orbit_of(mars).unwrap().angle;
        assert!((ratio - quick.time_factor.get()).abs() < 1e-3);
    }

    #[test]
    fn test_moon_follows_earth() {
        let mut orrery = solar();
        let params = SimulationParameters::default();
        for _ in 0..500 {
            orrery.advance(&params);
        }
        assert_orbit_radius(&orrery, &params);
        let moon = orrery.find("moon").unwrap();
        assert!(orrery.body(moon).position.length() > 250.0);
    }

    #[test]
    fn test_orbits_stay_planar() {
        let mut orrery = solar();
        let params = SimulationParameters::default();
        for _ in 0..10 {
            orrery.advance(&params);
        }
        assert!(orrery.bodies().all(|(_, b)| b.position.y == 0.0));
    }

    #[test]
    fn test_sync_scene_fills_every_slot() {
        let mut orrery = Orrery::from_spec(&inner_planets()).unwrap();
        let params = SimulationParameters::default();
        orrery.advance(&params);

        let mut poses: Vec<Pose> = Vec::new();
        orrery.sync_scene(&params, &mut poses);
        assert_eq!(poses.len(), orrery.len());
        let earth = orrery.find("earth").unwrap();
        assert_eq!(poses[earth.0].position, orrery.body(earth).position);
        assert_eq!(poses[earth.0].scale, Vec3::ONE * params.visual_scale());
    }

    #[test]
    fn test_pose_carries_tilt_and_spin() {
        let mut orrery = solar();
        let params = SimulationParameters::default();
        orrery.advance(&params);
        let uranus = orrery.find("uranus").unwrap();
        let pose = orrery.pose(uranus, &params);
        assert!((pose.rotation.x - 97.86f32.to_radians()).abs() < 1e-5);
        assert!(pose.rotation.y > 0.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_orbit_radius_holds_every_frame(
            frames in 1usize..200,
            distance_steps in -200i32..200,
            speed_steps in 0u32..400,
        ) {
            let mut orrery = solar();
            let mut params = SimulationParameters::with_bands(BandPreset::Classic);
            for _ in 0..speed_steps {
                params.speed_up();
            }
            for _ in 0..distance_steps.unsigned_abs() {
                if distance_steps > 0 {
                    params.distance_scale_up();
                } else {
                    params.distance_scale_down();
                }
            }
            for _ in 0..frames {
                orrery.advance(&params);
                assert_orbit_radius(&orrery, &params);
            }
        }
    }
}
