//! Demo configuration
//!
//! Everything a variant of the demos differs in: clamp bands, which system
//! to load, how far the arcade camera pans, the difficulty ramp, the frame
//! throttle and the wall layout. Read from JSON; missing fields fall back to
//! the defaults below.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::WallSegment;

/// Errors raised while reading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("cannot read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("target fps must be positive")]
    ZeroTargetFps,
    #[error("wall {index} has an invalid width {width}")]
    InvalidWall { index: usize, width: f32 },
    #[error("fixed roll speed must be finite, got {0}")]
    InvalidRamp(f32),
}

/// Clamp band presets for the orrery knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BandPreset {
    /// time [0.01, 100], distance/radius [0.0001, 1000]
    #[default]
    Classic,
    /// time [0.01, 100], distance/radius [0.01, 2]
    Compact,
}

/// Which body catalog the orrery starts with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SystemPreset {
    /// Sun, eight planets and their major moons
    #[default]
    Solar,
    /// Six planets, no moons, no spin
    Planets,
}

impl SystemPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            SystemPreset::Solar => "solar",
            SystemPreset::Planets => "planets",
        }
    }

    pub fn spec(&self) -> crate::sim::BodySpec {
        match self {
            SystemPreset::Solar => crate::sim::solar_system(),
            SystemPreset::Planets => crate::sim::inner_planets(),
        }
    }
}

/// Where the arcade camera's opening sweep stops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PanTarget {
    /// π/4
    #[default]
    Quarter,
    /// π/2
    Half,
}

impl PanTarget {
    pub fn angle(&self) -> f32 {
        match self {
            PanTarget::Quarter => std::f32::consts::FRAC_PI_4,
            PanTarget::Half => std::f32::consts::FRAC_PI_2,
        }
    }
}

/// Roll speed given to the ball on every serve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpeedRamp {
    /// `0.1 * (wins + 1)`
    #[default]
    PerWin,
    /// Same speed every round
    Fixed(f32),
}

impl SpeedRamp {
    pub fn serve_spin(&self, wins: u32) -> f32 {
        match *self {
            SpeedRamp::PerWin => crate::consts::SPIN_PER_WIN * (wins + 1) as f32,
            SpeedRamp::Fixed(base) => base,
        }
    }
}

/// Demo settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Orrery ===
    pub bands: BandPreset,
    pub system: SystemPreset,

    // === Arcade ===
    pub camera_pan: PanTarget,
    pub speed_ramp: SpeedRamp,
    pub walls: Vec<WallSegment>,

    // === Frame pacing ===
    /// Step at most this many times per second; `None` follows the display
    pub target_fps: Option<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bands: BandPreset::Classic,
            system: SystemPreset::Solar,
            camera_pan: PanTarget::Quarter,
            speed_ramp: SpeedRamp::PerWin,
            walls: crate::sim::default_walls(),
            target_fps: None,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.target_fps == Some(0) {
            return Err(SettingsError::ZeroTargetFps);
        }
        for (index, wall) in self.walls.iter().enumerate() {
            if !wall.width.is_finite() || wall.width < 0.0 {
                return Err(SettingsError::InvalidWall {
                    index,
                    width: wall.width,
                });
            }
        }
        if let SpeedRamp::Fixed(base) = self.speed_ramp {
            if !base.is_finite() {
                return Err(SettingsError::InvalidRamp(base));
            }
        }
        Ok(())
    }

    /// DOM element holding an optional JSON override
    #[allow(dead_code)]
    const CONFIG_ELEMENT_ID: &'static str = "orrery-config";

    /// Load settings from the page's config element (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = json {
            match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from #{}", Self::CONFIG_ELEMENT_ID);
                    return settings;
                }
                Err(e) => log::warn!("Ignoring page settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native: no page to read from
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
