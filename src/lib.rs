//! Orrery Arcade - orbital orrery and kamikaze-ball simulations
//!
//! Core modules:
//! - `sim`: Per-frame simulation (orbital tree, parameter bands, arcade loop)
//! - `platform`: Keyboard bindings and frame pacing
//! - `scene`: Pose hand-off to an externally owned renderer
//! - `settings`: Data-driven configuration
//! - `web`: wasm-bindgen surface for the browser host

pub mod platform;
pub mod scene;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use scene::{Pose, SceneSink};
pub use settings::{BandPreset, PanTarget, Settings, SettingsError, SystemPreset};

use glam::Vec3;

/// Simulation configuration constants
pub mod consts {
    /// Kilometres per astronomical unit
    pub const AU_KM: f64 = 149_597_870.7;
    /// Scene units per AU for orbital distances
    pub const DISTANCE_UNITS_PER_AU: f64 = 300.0;
    /// Scene units per AU for body radii
    pub const RADIUS_UNITS_PER_AU: f64 = 10_000.0;
    /// Frames per simulated day at time factor 1
    pub const FRAMES_PER_DAY: f32 = 96.0;
    /// Multiplicative step of every scale adjuster
    pub const SCALE_RATIO: f32 = 1.01;
    /// Smallest visual scale handed to the renderer
    pub const MIN_VISUAL_SCALE: f32 = 0.01;

    /// Ball serve position
    pub const BALL_START_X: f32 = 0.0;
    pub const BALL_START_Y: f32 = -400.0;
    /// Hard Y bound of the field
    pub const FIELD_Y_LIMIT: f32 = 450.0;
    /// Reaching this Y wins the round
    pub const WIN_Y: f32 = 400.0;
    /// Hard X bound for steering
    pub const FIELD_X_LIMIT: f32 = 435.0;
    /// Distance below which a wall sample counts as a hit (the ball's radius)
    pub const WALL_HIT_DISTANCE: f32 = 50.0;

    /// Sideways step per tick while steering
    pub const STEER_STEP: f32 = 5.0;
    /// Forward speed change per tick while accelerating/braking
    pub const DELTA_STEP: f32 = 0.05;
    /// Roll speed change per tick while accelerating/braking
    pub const SPIN_STEP: f32 = 0.005;
    /// Serve speed along Y
    pub const SERVE_DELTA: f32 = 1.0;
    /// Roll speed gained per win (and the base for the first round)
    pub const SPIN_PER_WIN: f32 = 0.1;

    /// Camera auto-pan increment per frame
    pub const CAMERA_PAN_STEP: f32 = std::f32::consts::PI / 360.0;
    /// Manual camera acceleration per tick
    pub const CAMERA_ACCEL: f32 = 0.001;
    /// Manual camera speed bound (radians per tick)
    pub const CAMERA_MAX_SPEED: f32 = 0.02;
    /// Camera orbit: distance behind the field and height above it
    pub const CAMERA_BACK: f32 = 800.0;
    pub const CAMERA_HEIGHT: f32 = 650.0;

    /// Score lost on a failed round / gained on a win
    pub const ROUND_PENALTY: u64 = 50;
    pub const WIN_BONUS: u64 = 100;
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(std::f32::consts::TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= std::f32::consts::TAU {
        0.0
    } else {
        wrapped
    }
}

/// Point on a circle of radius `r` in the orbital (XZ) plane
#[inline]
pub fn orbital_offset(r: f32, theta: f32) -> Vec3 {
    Vec3::new(r * theta.cos(), 0.0, r * theta.sin())
}
