use serde::{Deserialize, Serialize};

/// A 2D coordinate in arena units (before resolution) or pixels (after).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Uniform scale about `origin`.
    pub fn scale_about(self, origin: Point, factor: f64) -> Self {
        Self {
            x: origin.x + (self.x - origin.x) * factor,
            y: origin.y + (self.y - origin.y) * factor,
        }
    }

    pub fn scaled(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A point inside a zone definition: either literal coordinates or the name
/// of one of the arena's reference points (e.g. "center").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointRef {
    Literal(Point),
    Named(String),
}

impl PointRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }
}

impl From<Point> for PointRef {
    fn from(p: Point) -> Self {
        Self::Literal(p)
    }
}

impl From<(f64, f64)> for PointRef {
    fn from(xy: (f64, f64)) -> Self {
        Self::Literal(xy.into())
    }
}
