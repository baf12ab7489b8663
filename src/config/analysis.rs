//! Analysis and computation configuration

use serde::{Deserialize, Serialize};

use crate::config::{DurationSecs, Fps};
use crate::error::InputError;

/// The Master Analysis Configuration (immutable blueprint)
#[derive(Clone, Debug)]
pub struct AnalysisConfig {
    /// Frame rate assumed when the caller does not supply one
    pub default_fps: f64,

    /// Debounce threshold for visits and transition runs. 0.0 keeps everything.
    pub min_visit_duration_secs: f64,

    /// Likelihood cutoff below which a sample is treated as missing.
    /// None = every sample with coordinates is classified.
    pub min_confidence: Option<f64>,

    /// Text used for the "no zone matched" sentinel in every output table.
    /// Zone ids may not use it.
    pub unclassified_label: &'static str,
}

pub const ANALYSIS: AnalysisConfig = AnalysisConfig {
    default_fps: Fps::DEFAULT_VALUE,
    min_visit_duration_secs: 0.0,
    min_confidence: None,
    unclassified_label: "unclassified",
};

/// Per-session settings handed to the engine. Defaults come from [`ANALYSIS`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    pub fps: Fps,

    #[serde(default)]
    pub min_duration_secs: DurationSecs,

    #[serde(default)]
    pub min_confidence: Option<f64>,

    /// Restrict visits and transitions to one body part.
    /// None = a frame counts for a zone when any body part is in it.
    #[serde(default)]
    pub body_part: Option<String>,
}

impl EngineSettings {
    pub fn new(fps: f64, min_duration_secs: f64) -> Result<Self, InputError> {
        Ok(Self {
            fps: Fps::new(fps)?,
            min_duration_secs: DurationSecs::new(min_duration_secs)?,
            ..Self::default()
        })
    }

    pub fn with_min_confidence(mut self, min_confidence: f64) -> Result<Self, InputError> {
        if !min_confidence.is_finite() {
            return Err(InputError::InvalidConfidence(min_confidence));
        }
        self.min_confidence = Some(min_confidence);
        Ok(self)
    }

    pub fn with_body_part(mut self, body_part: impl Into<String>) -> Self {
        self.body_part = Some(body_part.into());
        self
    }

    /// Re-checks values that may have bypassed the constructors (e.g. struct literals).
    pub fn validate(&self) -> Result<(), InputError> {
        Fps::new(self.fps.value())?;
        DurationSecs::new(self.min_duration_secs.value())?;
        if let Some(c) = self.min_confidence {
            if !c.is_finite() {
                return Err(InputError::InvalidConfidence(c));
            }
        }
        Ok(())
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            fps: Fps::DEFAULT,
            min_duration_secs: DurationSecs::new(ANALYSIS.min_visit_duration_secs)
                .unwrap_or(DurationSecs::ZERO),
            min_confidence: ANALYSIS.min_confidence,
            body_part: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_blueprint() {
        let settings = EngineSettings::default();
        assert_eq!(settings.fps.value(), ANALYSIS.default_fps);
        assert_eq!(settings.min_duration_secs.value(), 0.0);
        assert_eq!(settings.min_confidence, None);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_new_rejects_bad_values() {
        assert_eq!(
            EngineSettings::new(0.0, 0.0),
            Err(InputError::InvalidFps(0.0))
        );
        assert_eq!(
            EngineSettings::new(25.0, -1.0),
            Err(InputError::InvalidMinDuration(-1.0))
        );
        assert!(
            EngineSettings::default()
                .with_min_confidence(f64::NAN)
                .is_err()
        );
    }

    #[test]
    fn test_deserialize_partial_settings() {
        let settings: EngineSettings =
            serde_json::from_str(r#"{ "fps": 30.0, "body_part": "nose" }"#).unwrap();
        assert_eq!(settings.fps.value(), 30.0);
        assert_eq!(settings.min_duration_secs, DurationSecs::ZERO);
        assert_eq!(settings.body_part.as_deref(), Some("nose"));
    }
}
