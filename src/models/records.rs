use serde::{Deserialize, Serialize};

use crate::config::ANALYSIS;

/// Label of a classification: a declared zone, or the explicit sentinel for
/// "no zone matched". The sentinel is a first-class label everywhere (occupancy
/// rows, transitions); it is never represented as a missing value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ZoneLabel {
    Zone(String),
    Unclassified,
}

impl ZoneLabel {
    pub fn zone(id: impl Into<String>) -> Self {
        Self::Zone(id.into())
    }

    pub fn is_unclassified(&self) -> bool {
        matches!(self, Self::Unclassified)
    }

    pub fn zone_id(&self) -> Option<&str> {
        match self {
            Self::Zone(id) => Some(id),
            Self::Unclassified => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Zone(id) => id,
            Self::Unclassified => ANALYSIS.unclassified_label,
        }
    }
}

impl std::fmt::Display for ZoneLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ZoneLabel> for String {
    fn from(label: ZoneLabel) -> Self {
        match label {
            ZoneLabel::Zone(id) => id,
            ZoneLabel::Unclassified => ANALYSIS.unclassified_label.to_string(),
        }
    }
}

impl From<String> for ZoneLabel {
    fn from(s: String) -> Self {
        if s == ANALYSIS.unclassified_label {
            Self::Unclassified
        } else {
            Self::Zone(s)
        }
    }
}

/// One (frame, body part, zone) match, or one unclassified marker per frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub frame: u64,
    pub body_part: String,
    pub zone: ZoneLabel,
    pub x: f64,
    pub y: f64,
}

impl ClassificationRecord {
    pub fn new(frame: u64, body_part: impl Into<String>, zone: ZoneLabel, x: f64, y: f64) -> Self {
        Self {
            frame,
            body_part: body_part.into(),
            zone,
            x,
            y,
        }
    }
}

/// Time spent in one zone by one body part.
/// `percentage` is relative to that body part's classified frames, so rows of
/// overlapping zones can sum past 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneOccupancySummary {
    pub zone: ZoneLabel,
    pub body_part: String,
    pub frame_count: usize,
    pub time_seconds: f64,
    pub percentage: f64,
}

/// One uninterrupted stay inside a zone. `exit_frame` is the first frame outside,
/// saturated at `u64::MAX`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub zone_id: String,
    pub entry_frame: u64,
    pub exit_frame: u64,
    pub frame_count: u64,
    pub duration_seconds: f64,
}

/// Entry/exit/latency metrics for one zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitSummary {
    pub zone: String,
    /// Visits that survived the minimum-duration filter
    pub n_entries: usize,
    pub mean_duration: f64,
    /// Population standard deviation of the surviving durations
    pub duration_stddev: f64,
    pub total_time: f64,
    /// Unfiltered: a single-frame glitch still sets it. None = never entered.
    pub latency_seconds: Option<f64>,
    pub first_entry_frame: Option<u64>,
}

impl VisitSummary {
    pub fn never_entered(zone: impl Into<String>) -> Self {
        Self {
            zone: zone.into(),
            n_entries: 0,
            mean_duration: 0.0,
            duration_stddev: 0.0,
            total_time: 0.0,
            latency_seconds: None,
            first_entry_frame: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub from: ZoneLabel,
    pub to: ZoneLabel,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_serializes_as_plain_string() {
        let json = serde_json::to_string(&vec![ZoneLabel::zone("center"), ZoneLabel::Unclassified])
            .unwrap();
        assert_eq!(json, r#"["center","unclassified"]"#);

        let back: Vec<ZoneLabel> = serde_json::from_str(&json).unwrap();
        assert_eq!(back[1], ZoneLabel::Unclassified);
    }

    #[test]
    fn test_unclassified_sorts_after_zones() {
        let mut labels = vec![
            ZoneLabel::Unclassified,
            ZoneLabel::zone("wall"),
            ZoneLabel::zone("center"),
        ];
        labels.sort();
        assert_eq!(
            labels,
            vec![
                ZoneLabel::zone("center"),
                ZoneLabel::zone("wall"),
                ZoneLabel::Unclassified
            ]
        );
    }
}
