use serde::{Deserialize, Serialize};

use crate::domain::PointRef;

/// Declarative zone shape, as written in the arena document.
/// Coordinates are in arena units; resolution turns these into pixel-space geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ZoneDefinition {
    /// Axis-aligned box, bounds inclusive
    Rectangle {
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    },
    Circle {
        center: PointRef,
        radius: f64,
    },
    /// Vertices in order; the last connects back to the first.
    Polygon {
        vertices: Vec<PointRef>,
    },
    /// The parent's shape scaled about its centroid.
    /// factor > 1.0 is legal and gives a region larger than the parent.
    Proportional {
        parent: String,
        factor: f64,
    },
    /// Any type tag this engine does not know. Rejected at resolution.
    #[serde(other)]
    Unknown,
}

impl ZoneDefinition {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Rectangle { .. } => "rectangle",
            Self::Circle { .. } => "circle",
            Self::Polygon { .. } => "polygon",
            Self::Proportional { .. } => "proportional",
            Self::Unknown => "unknown",
        }
    }

    /// Zone id this definition depends on, if any.
    pub fn parent(&self) -> Option<&str> {
        match self {
            Self::Proportional { parent, .. } => Some(parent),
            _ => None,
        }
    }

    pub fn rectangle(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self::Rectangle {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub fn circle(center: impl Into<PointRef>, radius: f64) -> Self {
        Self::Circle {
            center: center.into(),
            radius,
        }
    }

    pub fn polygon<P: Into<PointRef>>(vertices: impl IntoIterator<Item = P>) -> Self {
        Self::Polygon {
            vertices: vertices.into_iter().map(Into::into).collect(),
        }
    }

    pub fn proportional(parent: impl Into<String>, factor: f64) -> Self {
        Self::Proportional {
            parent: parent.into(),
            factor,
        }
    }
}

/// A named zone definition. Declaration order is significant: it is the
/// tie-break order when one frame falls in several zones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneEntry {
    pub id: String,
    #[serde(flatten)]
    pub definition: ZoneDefinition,
}

impl ZoneEntry {
    pub fn new(id: impl Into<String>, definition: ZoneDefinition) -> Self {
        Self {
            id: id.into(),
            definition,
        }
    }
}
