//! Simulation module
//!
//! All per-frame logic lives here. Nothing in this module renders or touches
//! the platform:
//! - One step per display frame (or per paced frame)
//! - State passed explicitly, no globals
//! - Stable iteration order (construction order for bodies and walls)

pub mod catalog;
pub mod collision;
pub mod orbit;
pub mod orrery;
pub mod params;
pub mod state;
pub mod tick;

pub use catalog::{BodySpec, CatalogError, SatelliteSpec, inner_planets, solar_system};
pub use collision::{BoundsCheck, check_wall_collision, clamp_to_field, first_wall_hit};
pub use orbit::{BodyId, CelestialBody, Orrery, Satellite};
pub use orrery::{OrreryInput, OrreryState, orrery_tick};
pub use params::{BoundedScale, ScaleError, SimulationParameters};
pub use state::{
    ArcadeEvent, ArcadePhase, ArcadeState, Ball, CameraRig, MAX_PENDING_EVENTS, WallSegment,
    default_walls,
};
pub use tick::{TickInput, tick};
