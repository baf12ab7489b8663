//! Analysis units and validated scalar newtypes

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::InputError;

/// Unit system the arena's zone coordinates are declared in.
/// Tracking samples are always in pixels.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Units {
    #[default]
    #[serde(alias = "px")]
    #[strum(to_string = "pixels", serialize = "px")]
    Pixels,
    #[serde(alias = "cm")]
    #[strum(to_string = "centimeters", serialize = "cm")]
    Centimeters,
    #[serde(alias = "mm")]
    #[strum(to_string = "millimeters", serialize = "mm")]
    Millimeters,
}

impl Units {
    /// Physical units need a pixels-per-unit scale to meet the tracking data.
    pub fn is_physical(self) -> bool {
        !matches!(self, Self::Pixels)
    }
}

/// Frames per second of a tracking stream. Always finite and > 0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Fps(f64);

impl Fps {
    pub const DEFAULT_VALUE: f64 = 25.0;
    pub const DEFAULT: Self = Self(Self::DEFAULT_VALUE);

    pub fn new(val: f64) -> Result<Self, InputError> {
        if val.is_finite() && val > 0.0 {
            Ok(Self(val))
        } else {
            Err(InputError::InvalidFps(val))
        }
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Converts a frame count (or frame index offset) into seconds.
    #[inline]
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        frames as f64 / self.0
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for Fps {
    type Error = InputError;

    fn try_from(val: f64) -> Result<Self, Self::Error> {
        Self::new(val)
    }
}

impl From<Fps> for f64 {
    fn from(fps: Fps) -> Self {
        fps.0
    }
}

impl std::fmt::Display for Fps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} fps", self.0)
    }
}

/// Debounce threshold in seconds. Always finite and >= 0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct DurationSecs(f64);

impl DurationSecs {
    pub const ZERO: Self = Self(0.0);

    pub fn new(val: f64) -> Result<Self, InputError> {
        if val.is_finite() && val >= 0.0 {
            Ok(Self(val))
        } else {
            Err(InputError::InvalidMinDuration(val))
        }
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// True when a span of `frames` at `fps` is strictly shorter than this threshold.
    #[inline]
    pub fn rejects(self, frames: u64, fps: Fps) -> bool {
        fps.frames_to_secs(frames) < self.0
    }
}

impl TryFrom<f64> for DurationSecs {
    type Error = InputError;

    fn try_from(val: f64) -> Result<Self, Self::Error> {
        Self::new(val)
    }
}

impl From<DurationSecs> for f64 {
    fn from(d: DurationSecs) -> Self {
        d.0
    }
}

impl std::fmt::Display for DurationSecs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}s", self.0)
    }
}
