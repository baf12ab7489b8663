//! Error types for zone resolution and analysis calls

use std::path::PathBuf;

use thiserror::Error;

use crate::config::Units;

/// Raised while resolving an arena's zone definitions. Nothing is classified
/// against an arena that failed to resolve.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Proportional zone points at a parent id that was never declared
    #[error("zone '{zone}': parent zone '{parent}' does not exist")]
    MissingParent { zone: String, parent: String },

    /// Proportional parents loop back on themselves
    #[error("zone '{zone}': proportional dependency cycle ({path})")]
    Cycle { zone: String, path: String },

    #[error("zone '{zone}': degenerate geometry: {reason}")]
    DegenerateGeometry { zone: String, reason: String },

    #[error("zone '{zone}': unknown reference point '{point}'")]
    UnknownReferencePoint { zone: String, point: String },

    #[error("zone '{zone}': unknown zone type")]
    UnknownZoneType { zone: String },

    #[error("zone '{zone}' is declared more than once")]
    DuplicateZone { zone: String },

    /// The id collides with the unclassified sentinel label
    #[error("zone id '{zone}' is reserved")]
    ReservedZoneId { zone: String },

    #[error("arena units '{units}' need a positive pixel scale (got {scale:?})")]
    MissingScale { units: Units, scale: Option<f64> },
}

impl ConfigurationError {
    /// The offending zone id, when the error is about a single zone.
    pub fn zone(&self) -> Option<&str> {
        match self {
            Self::MissingParent { zone, .. }
            | Self::Cycle { zone, .. }
            | Self::DegenerateGeometry { zone, .. }
            | Self::UnknownReferencePoint { zone, .. }
            | Self::UnknownZoneType { zone }
            | Self::DuplicateZone { zone }
            | Self::ReservedZoneId { zone } => Some(zone),
            Self::MissingScale { .. } => None,
        }
    }

    pub(crate) fn degenerate(zone: &str, reason: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            zone: zone.to_string(),
            reason: reason.into(),
        }
    }
}

/// Raised at call time for arguments no metric can be derived from.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("frame rate must be a positive finite number (got {0})")]
    InvalidFps(f64),

    #[error("zone '{0}' does not exist in the arena")]
    UnknownZone(String),

    #[error("minimum duration must be a non-negative finite number of seconds (got {0})")]
    InvalidMinDuration(f64),

    #[error("minimum confidence must be a finite number (got {0})")]
    InvalidConfidence(f64),
}

/// Umbrella error for callers that load arenas from disk and run analyses.
#[derive(Error, Debug)]
pub enum ZoneError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {reason}")]
    Parse { path: PathBuf, reason: String },
}
