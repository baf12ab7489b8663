// Domain types and value objects
mod arena;
mod point;
mod tracking_sample;
mod zone_definition;

// Re-export commonly used types to the world
pub use arena::Arena;
pub use point::{Point, PointRef};
pub use tracking_sample::TrackingSample;
pub use zone_definition::{ZoneDefinition, ZoneEntry};
