//! Per-frame orrery update
//!
//! Moves the bodies (unless paused) and then applies whichever scale
//! controls are held. Scale controls keep working while paused.

use serde::Serialize;

use super::catalog::{BodySpec, CatalogError};
use super::orbit::Orrery;
use super::params::SimulationParameters;
use crate::settings::{BandPreset, Settings};

/// Controls held (or pressed) during a single orrery frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrreryInput {
    pub speed_up: bool,
    pub slow_down: bool,
    pub distance_scale_down: bool,
    pub distance_scale_up: bool,
    pub radius_scale_down: bool,
    pub radius_scale_up: bool,
    /// Pause/resume (one-shot)
    pub toggle_pause: bool,
}

/// Orrery plus its knobs and run flag
#[derive(Debug, Clone, Serialize)]
pub struct OrreryState {
    pub orrery: Orrery,
    pub params: SimulationParameters,
    pub running: bool,
    /// Frames advanced while running
    pub frames: u64,
}

impl OrreryState {
    pub fn new(spec: &BodySpec, bands: BandPreset) -> Result<Self, CatalogError> {
        Ok(Self {
            orrery: Orrery::from_spec(spec)?,
            params: SimulationParameters::with_bands(bands),
            running: true,
            frames: 0,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, CatalogError> {
        Self::new(&settings.system.spec(), settings.bands)
    }
}

/// Advance the orrery by one frame
pub fn orrery_tick(state: &mut OrreryState, input: &OrreryInput) {
    if input.toggle_pause {
        state.running = !state.running;
        log::info!("Orrery {}", if state.running { "resumed" } else { "paused" });
    }

    if state.running {
        state.orrery.advance(&state.params);
        state.frames += 1;
    }

    let params = &mut state.params;
    if input.slow_down {
        params.slow_down();
    }
    if input.speed_up {
        params.speed_up();
    }
    if input.distance_scale_down {
        params.distance_scale_down();
    }
    if input.distance_scale_up {
        params.distance_scale_up();
    }
    if input.radius_scale_down {
        params.radius_scale_down();
    }
    if input.radius_scale_up {
        params.radius_scale_up();
    }
}
