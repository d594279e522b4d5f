//! Bounded exponential adjusters and the orrery's global knobs
//!
//! Each knob is nudged by a fixed ratio per frame while its control is held
//! and clamped back into its band after every adjustment.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::consts::SCALE_RATIO;
use crate::settings::BandPreset;

/// Rejected band description
#[derive(Debug, Error, PartialEq)]
pub enum ScaleError {
    #[error("band [{min}, {max}] is empty or not finite")]
    InvalidBand { min: f32, max: f32 },
    #[error("step ratio {0} must be finite and greater than 1")]
    InvalidRatio(f32),
    #[error("value {0} is not finite")]
    NonFinite(f32),
}

/// A scalar that grows/shrinks geometrically inside a hard `[min, max]` band
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundedScale {
    value: f32,
    ratio: f32,
    min: f32,
    max: f32,
}

/// Unchecked wire form of [`BoundedScale`]
#[derive(Deserialize)]
struct RawScale {
    value: f32,
    ratio: f32,
    min: f32,
    max: f32,
}

impl<'de> Deserialize<'de> for BoundedScale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawScale::deserialize(deserializer)?;
        Self::try_new(raw.value, raw.ratio, raw.min, raw.max).map_err(serde::de::Error::custom)
    }
}

impl BoundedScale {
    /// `value` is clamped into the band on construction. The band must be
    /// finite and non-empty and `ratio > 1`.
    pub fn new(value: f32, ratio: f32, min: f32, max: f32) -> Self {
        debug_assert!(min <= max && ratio > 1.0);
        Self {
            value: value.clamp(min, max),
            ratio,
            min,
            max,
        }
    }

    /// Checked constructor for bands that come from outside the crate
    pub fn try_new(value: f32, ratio: f32, min: f32, max: f32) -> Result<Self, ScaleError> {
        if !(min.is_finite() && max.is_finite() && min <= max) {
            return Err(ScaleError::InvalidBand { min, max });
        }
        if !(ratio.is_finite() && ratio > 1.0) {
            return Err(ScaleError::InvalidRatio(ratio));
        }
        if !value.is_finite() {
            return Err(ScaleError::NonFinite(value));
        }
        Ok(Self::new(value, ratio, min, max))
    }

    /// Multiply by the ratio, saturating at `max`
    pub fn increase(&mut self) {
        self.value = (self.value * self.ratio).clamp(self.min, self.max);
    }

    /// Divide by the ratio, saturating at `min`
    pub fn decrease(&mut self) {
        self.value = (self.value / self.ratio).clamp(self.min, self.max);
    }

    #[inline]
    pub fn get(&self) -> f32 {
        self.value
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn at_max(&self) -> bool {
        self.value >= self.max
    }

    pub fn at_min(&self) -> bool {
        self.value <= self.min
    }
}

/// Clamp bands for the three knobs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bands {
    pub time: (f32, f32),
    pub distance: (f32, f32),
    pub radius: (f32, f32),
}

impl BandPreset {
    pub fn bands(&self) -> Bands {
        match self {
            BandPreset::Classic => Bands {
                time: (0.01, 100.0),
                distance: (0.0001, 1000.0),
                radius: (0.0001, 1000.0),
            },
            BandPreset::Compact => Bands {
                time: (0.01, 100.0),
                distance: (0.01, 2.0),
                radius: (0.01, 2.0),
            },
        }
    }
}

/// Process-wide simulation knobs, read by every body update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    pub time_factor: BoundedScale,
    pub distance_scale: BoundedScale,
    pub radius_scale: BoundedScale,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self::with_bands(BandPreset::default())
    }
}

impl SimulationParameters {
    /// All knobs start at 1.0 inside the preset's bands
    pub fn with_bands(preset: BandPreset) -> Self {
        let b = preset.bands();
        Self {
            time_factor: BoundedScale::new(1.0, SCALE_RATIO, b.time.0, b.time.1),
            distance_scale: BoundedScale::new(1.0, SCALE_RATIO, b.distance.0, b.distance.1),
            radius_scale: BoundedScale::new(1.0, SCALE_RATIO, b.radius.0, b.radius.1),
        }
    }

    pub fn speed_up(&mut self) {
        self.time_factor.increase();
        if self.time_factor.at_max() {
            log::debug!("time factor saturated at {}", self.time_factor.max());
        }
    }

    pub fn slow_down(&mut self) {
        self.time_factor.decrease();
        if self.time_factor.at_min() {
            log::debug!("time factor saturated at {}", self.time_factor.min());
        }
    }

    pub fn distance_scale_up(&mut self) {
        self.distance_scale.increase();
    }

    pub fn distance_scale_down(&mut self) {
        self.distance_scale.decrease();
    }

    pub fn radius_scale_up(&mut self) {
        self.radius_scale.increase();
    }

    pub fn radius_scale_down(&mut self) {
        self.radius_scale.decrease();
    }

    /// Uniform render scale for every body: `ln(radius_scale * e)`.
    ///
    /// Dampens the knob so a 1000x radius scale renders ~8x larger. Below
    /// `1/e` the logarithm turns negative, so the result is floored at
    /// [`MIN_VISUAL_SCALE`](crate::consts::MIN_VISUAL_SCALE).
    pub fn visual_scale(&self) -> f32 {
        (self.radius_scale.get() * std::f32::consts::E)
            .ln()
            .max(crate::consts::MIN_VISUAL_SCALE)
    }
}
