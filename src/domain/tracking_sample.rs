use serde::{Deserialize, Serialize};

/// One tracked body part at one frame. Produced upstream; read-only here.
///
/// `x`/`y` of `None` (or NaN/inf) mark a frame where tracking failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingSample {
    /// Frame index from the start of the recording (0-based)
    pub frame: u64,
    #[serde(default)]
    pub timestamp: Option<f64>,
    pub body_part: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl TrackingSample {
    pub fn new(frame: u64, body_part: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            frame,
            timestamp: None,
            body_part: body_part.into(),
            x: Some(x),
            y: Some(y),
            confidence: None,
        }
    }

    /// A sample whose coordinates were lost by the tracker.
    pub fn missing(frame: u64, body_part: impl Into<String>) -> Self {
        Self {
            frame,
            timestamp: None,
            body_part: body_part.into(),
            x: None,
            y: None,
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Both coordinates, if both are present and finite.
    pub fn coords(&self) -> Option<(f64, f64)> {
        match (self.x, self.y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((x, y)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coords_require_both_finite() {
        assert_eq!(TrackingSample::new(0, "nose", 1.0, 2.0).coords(), Some((1.0, 2.0)));
        assert_eq!(TrackingSample::missing(0, "nose").coords(), None);

        let mut half = TrackingSample::new(0, "nose", 1.0, 2.0);
        half.y = None;
        assert_eq!(half.coords(), None);

        assert_eq!(TrackingSample::new(0, "nose", f64::NAN, 2.0).coords(), None);
    }
}
