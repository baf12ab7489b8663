mod geometry;
mod records;
mod zone_set;

pub use {
    geometry::ZoneGeometry,
    records::{
        ClassificationRecord, TransitionRecord, VisitRecord, VisitSummary, ZoneLabel,
        ZoneOccupancySummary,
    },
    zone_set::{ResolvedZone, ZoneSet},
};
