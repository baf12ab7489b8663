use serde::{Deserialize, Serialize};

use crate::domain::Point;

/// Below this absolute shoelace area a polygon's centroid falls back to its vertex mean.
const DEGENERATE_AREA_EPSILON: f64 = 1e-12;

/// Fully resolved zone shape in pixel space.
/// Built once per arena; every containment test reads it immutably.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ZoneGeometry {
    Rectangle {
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    },
    Circle {
        center: Point,
        radius: f64,
    },
    Polygon {
        vertices: Vec<Point>,
    },
}

impl ZoneGeometry {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Rectangle { .. } => "rectangle",
            Self::Circle { .. } => "circle",
            Self::Polygon { .. } => "polygon",
        }
    }

    /// Point-in-zone predicate.
    ///
    /// - Rectangle: inclusive on all four bounds.
    /// - Circle: squared distance <= radius² (no sqrt).
    /// - Polygon: even-odd ray cast towards +x. A point exactly on an edge or
    ///   vertex is inside; that case is decided by an exact collinearity test
    ///   before any crossing is counted.
    ///
    /// Non-finite coordinates are never contained.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        if !(x.is_finite() && y.is_finite()) {
            return false;
        }
        match self {
            Self::Rectangle {
                x_min,
                x_max,
                y_min,
                y_max,
            } => x >= *x_min && x <= *x_max && y >= *y_min && y <= *y_max,
            Self::Circle { center, radius } => {
                let dx = x - center.x;
                let dy = y - center.y;
                dx * dx + dy * dy <= radius * radius
            }
            Self::Polygon { vertices } => polygon_contains(vertices, x, y),
        }
    }

    /// Vectorized [`contains`](Self::contains). Pairs past the shorter slice are ignored.
    pub fn contains_all(&self, xs: &[f64], ys: &[f64]) -> Vec<bool> {
        xs.iter()
            .zip(ys.iter())
            .map(|(&x, &y)| self.contains(x, y))
            .collect()
    }

    /// Rectangle/circle center, or polygon area centroid.
    pub fn centroid(&self) -> Point {
        match self {
            Self::Rectangle {
                x_min,
                x_max,
                y_min,
                y_max,
            } => Point::new((x_min + x_max) / 2.0, (y_min + y_max) / 2.0),
            Self::Circle { center, .. } => *center,
            Self::Polygon { vertices } => polygon_centroid(vertices),
        }
    }

    /// Same shape kind, scaled about its own centroid.
    pub fn scaled(&self, factor: f64) -> Self {
        match self {
            Self::Rectangle {
                x_min,
                x_max,
                y_min,
                y_max,
            } => {
                let c = self.centroid();
                let half_w = (x_max - x_min) / 2.0 * factor;
                let half_h = (y_max - y_min) / 2.0 * factor;
                Self::Rectangle {
                    x_min: c.x - half_w,
                    x_max: c.x + half_w,
                    y_min: c.y - half_h,
                    y_max: c.y + half_h,
                }
            }
            Self::Circle { center, radius } => Self::Circle {
                center: *center,
                radius: radius * factor,
            },
            Self::Polygon { vertices } => {
                let c = polygon_centroid(vertices);
                Self::Polygon {
                    vertices: vertices.iter().map(|v| v.scale_about(c, factor)).collect(),
                }
            }
        }
    }

    /// (min corner, max corner)
    pub fn bounding_box(&self) -> (Point, Point) {
        match self {
            Self::Rectangle {
                x_min,
                x_max,
                y_min,
                y_max,
            } => (Point::new(*x_min, *y_min), Point::new(*x_max, *y_max)),
            Self::Circle { center, radius } => (
                Point::new(center.x - radius, center.y - radius),
                Point::new(center.x + radius, center.y + radius),
            ),
            Self::Polygon { vertices } => {
                let init = (
                    Point::new(f64::INFINITY, f64::INFINITY),
                    Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
                );
                vertices.iter().fold(init, |(lo, hi), v| {
                    (
                        Point::new(lo.x.min(v.x), lo.y.min(v.y)),
                        Point::new(hi.x.max(v.x), hi.y.max(v.y)),
                    )
                })
            }
        }
    }
}

impl std::fmt::Display for ZoneGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Rectangle {
                x_min,
                x_max,
                y_min,
                y_max,
            } => write!(f, "rectangle x[{}, {}] y[{}, {}]", x_min, x_max, y_min, y_max),
            Self::Circle { center, radius } => write!(f, "circle c{} r={}", center, radius),
            Self::Polygon { vertices } => write!(f, "polygon ({} vertices)", vertices.len()),
        }
    }
}

fn polygon_contains(vertices: &[Point], x: f64, y: f64) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = vertices[j];
        let b = vertices[i];

        // Boundary counts as inside
        if on_segment(a, b, x, y) {
            return true;
        }

        // Half-open rule: an edge counts when exactly one endpoint is strictly above y.
        // Horizontal edges never count; a vertex on the ray is counted once.
        if (b.y > y) != (a.y > y) {
            let x_cross = (a.x - b.x) * (y - b.y) / (a.y - b.y) + b.x;
            if x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Exact test: collinear with a-b and within its bounding box.
fn on_segment(a: Point, b: Point, x: f64, y: f64) -> bool {
    let cross = (b.x - a.x) * (y - a.y) - (b.y - a.y) * (x - a.x);
    cross == 0.0
        && x >= a.x.min(b.x)
        && x <= a.x.max(b.x)
        && y >= a.y.min(b.y)
        && y <= a.y.max(b.y)
}

fn signed_area(vertices: &[Point]) -> f64 {
    let n = vertices.len();
    (0..n)
        .map(|i| {
            let p = vertices[i];
            let q = vertices[(i + 1) % n];
            p.x * q.y - q.x * p.y
        })
        .sum::<f64>()
        / 2.0
}

fn polygon_centroid(vertices: &[Point]) -> Point {
    let n = vertices.len();
    if n == 0 {
        return Point::default();
    }

    let area = signed_area(vertices);
    if area.abs() < DEGENERATE_AREA_EPSILON {
        let (sx, sy) = vertices
            .iter()
            .fold((0.0, 0.0), |(sx, sy), v| (sx + v.x, sy + v.y));
        return Point::new(sx / n as f64, sy / n as f64);
    }

    let (cx, cy) = (0..n).fold((0.0, 0.0), |(cx, cy), i| {
        let p = vertices[i];
        let q = vertices[(i + 1) % n];
        let cross = p.x * q.y - q.x * p.y;
        (cx + (p.x + q.x) * cross, cy + (p.y + q.y) * cross)
    });
    Point::new(cx / (6.0 * area), cy / (6.0 * area))
}
