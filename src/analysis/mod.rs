// Zone resolution, classification and the per-zone metrics built on it
pub mod classifier;
pub mod occupancy;
pub mod transitions;
pub mod visits;
pub mod zone_resolver;

pub use classifier::{ClassifierSettings, classify, classify_with};
pub use occupancy::{classified_frame_counts, occupancy};
pub use transitions::{TransitionMatrix, ZoneRun, dominant_labels, run_length_encode, transitions, transitions_for};
pub use visits::{
    VisitQuery, in_zone_frames, visit_records, visit_spans, visit_table, visits, visits_for,
};
pub use zone_resolver::resolve;
