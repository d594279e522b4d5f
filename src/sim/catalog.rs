//! Body descriptions in physical units
//!
//! A system is a tree of [`BodySpec`]s. Distances and radii are in km,
//! periods in days, angles in degrees. [`Orrery::from_spec`](super::Orrery::from_spec)
//! converts them into scene units.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while turning a body description into an orrery
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("satellite `{name}` has a zero orbital period")]
    ZeroOrbitalPeriod { name: String },
    #[error("body `{name}` has a zero rotation period")]
    ZeroRotationPeriod { name: String },
    #[error("body `{name}` has a non-finite {field}")]
    NonFinite { name: String, field: &'static str },
}

/// A body and the satellites orbiting it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    pub name: String,
    /// Mean radius (km)
    pub radius_km: f64,
    /// Sidereal rotation period (days); `None` for bodies that don't spin
    #[serde(default)]
    pub rotation_period_days: Option<f64>,
    /// Axial tilt (degrees)
    #[serde(default)]
    pub axial_tilt_deg: f64,
    /// Display colour for untextured renderers (0xRRGGBB)
    #[serde(default)]
    pub color: u32,
    #[serde(default)]
    pub satellites: Vec<SatelliteSpec>,
}

/// Orbit of a child body around its parent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatelliteSpec {
    /// Mean distance from the parent (km)
    pub distance_km: f64,
    /// Orbital period (days)
    pub orbital_period_days: f64,
    /// Orbital inclination (degrees). Carried as data, orbits stay planar.
    #[serde(default)]
    pub inclination_deg: f64,
    pub body: BodySpec,
}

impl BodySpec {
    fn new(name: &str, radius_km: f64, rotation_period_days: f64, axial_tilt_deg: f64, color: u32) -> Self {
        Self {
            name: name.to_string(),
            radius_km,
            rotation_period_days: Some(rotation_period_days),
            axial_tilt_deg,
            color,
            satellites: Vec::new(),
        }
    }

    fn orbited_by(mut self, distance_km: f64, orbital_period_days: f64, inclination_deg: f64, body: BodySpec) -> Self {
        self.satellites.push(SatelliteSpec {
            distance_km,
            orbital_period_days,
            inclination_deg,
            body,
        });
        self
    }

    /// Number of bodies in this subtree, including `self`
    pub fn count(&self) -> usize {
        1 + self.satellites.iter().map(|s| s.body.count()).sum::<usize>()
    }

    /// Check every period and measurement in the subtree
    pub fn validate(&self) -> Result<(), CatalogError> {
        let non_finite = |field| CatalogError::NonFinite {
            name: self.name.clone(),
            field,
        };
        if !self.radius_km.is_finite() {
            return Err(non_finite("radius"));
        }
        if !self.axial_tilt_deg.is_finite() {
            return Err(non_finite("axial tilt"));
        }
        match self.rotation_period_days {
            Some(p) if !p.is_finite() => return Err(non_finite("rotation period")),
            Some(p) if p == 0.0 => {
                return Err(CatalogError::ZeroRotationPeriod {
                    name: self.name.clone(),
                });
            }
            _ => {}
        }
        for sat in &self.satellites {
            let name = &sat.body.name;
            if !sat.orbital_period_days.is_finite() || !sat.distance_km.is_finite() {
                return Err(CatalogError::NonFinite {
                    name: name.clone(),
                    field: "orbit",
                });
            }
            if sat.orbital_period_days == 0.0 {
                return Err(CatalogError::ZeroOrbitalPeriod { name: name.clone() });
            }
            sat.body.validate()?;
        }
        Ok(())
    }
}

/// The sun with all eight planets and the major moons
pub fn solar_system() -> BodySpec {
    let earth = BodySpec::new("earth", 6378.1, 0.99726968, 0.0, 0x0000ff)
        .orbited_by(384_399.0, 27.32158, 18.29, BodySpec::new("moon", 1737.1, 27.321582, 6.68, 0xaaaaaa));

    let mars = BodySpec::new("mars", 3397.0, 1.02595675, 0.0, 0xff0000)
        .orbited_by(9377.2, 0.31891023, 1.093, BodySpec::new("phobos", 11.1, 0.31891023, 0.0, 0xff0000))
        .orbited_by(23_460.0, 1.26244, 0.93, BodySpec::new("deimos", 6.2, 1.26244, 0.0, 0x00ff00));

    let jupiter = BodySpec::new("jupiter", 71_492.68, 0.41354, 3.12, 0xaaaa00)
        .orbited_by(421_600.0, 1.769138, 0.04, BodySpec::new("io", 1815.0, 1.7691378, 0.0, 0x808080))
        .orbited_by(670_900.0, 3.551181, 0.47, BodySpec::new("europa", 1569.0, 3.551181, 0.0, 0xc8b89a))
        .orbited_by(1_070_400.0, 7.154553, 1.85, BodySpec::new("ganymede", 2634.1, 7.154553, 0.0, 0x9a8f80))
        .orbited_by(1_882_700.0, 16.68902, 0.2, BodySpec::new("callisto", 2410.3, 16.68902, 0.0, 0x5f5a50));

    BodySpec::new("sun", 696_000.0, 25.38, 7.25, 0xffff00)
        .orbited_by(57_909_175.0, 0.2408467 * 365.0, 7.0, BodySpec::new("mercury", 2439.64, 58.646225, 0.0, 0x222222))
        .orbited_by(108_208_930.0, 0.61519726 * 365.0, 3.39, BodySpec::new("venus", 6051.59, 243.0187, 177.3, 0xff8800))
        .orbited_by(149_597_890.0, 1.0000174 * 365.0, 23.44, earth)
        .orbited_by(227_936_640.0, 1.8808476 * 365.0, 1.85, mars)
        .orbited_by(778_412_010.0, 11.862615 * 365.0, 1.31, jupiter)
        .orbited_by(1_426_725_400.0, 29.447498 * 365.0, 2.48, BodySpec::new("saturn", 60_267.14, 0.44401, 26.73, 0x444444))
        .orbited_by(2_870_972_200.0, 84.016846 * 365.0, 0.76, BodySpec::new("uranus", 25_557.25, 0.71833, 97.86, 0x7fd4e0))
        .orbited_by(4_498_252_900.0, 164.79132 * 365.0, 1.77, BodySpec::new("neptune", 24_766.36, 0.67125, 29.58, 0x3f54ba))
}

/// Flat six-planet system without moons or spin
pub fn inner_planets() -> BodySpec {
    let planet = |name: &str, radius_km: f64, color: u32| BodySpec {
        name: name.to_string(),
        radius_km,
        rotation_period_days: None,
        axial_tilt_deg: 0.0,
        color,
        satellites: Vec::new(),
    };

    let mut sun = planet("sun", 696_350.0, 0xffff00);
    for (distance_km, period, body) in [
        (57_909_100.0, 87.969, planet("mercury", 2439.7, 0x222222)),
        (108_208_000.0, 224.698, planet("venus", 6051.8, 0xff8800)),
        (149_598_261.0, 365.256, planet("earth", 6371.0, 0x0000ff)),
        (227_939_100.0, 686.971, planet("mars", 3396.2, 0xff0000)),
        (778_547_200.0, 4332.59, planet("jupiter", 69_911.0, 0xaaaa00)),
        (1_353_572_956.0, 10_759.22, planet("saturn", 60_268.0, 0x444444)),
    ] {
        sun.satellites.push(SatelliteSpec {
            distance_km,
            orbital_period_days: period,
            inclination_deg: 0.0,
            body,
        });
    }
    sun
}
