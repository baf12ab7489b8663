use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    analysis::TransitionMatrix,
    models::{TransitionRecord, VisitSummary, ZoneOccupancySummary},
    report::ReportSink,
};

/// Everything derived from one subject's tracking stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub subject: String,
    pub sample_count: usize,
    pub record_count: usize,
    /// Distinct classified frames per body part
    pub classified_frames: BTreeMap<String, usize>,
    pub occupancy: Vec<ZoneOccupancySummary>,
    pub visits: Vec<VisitSummary>,
    pub transitions: Vec<TransitionRecord>,
    pub transition_matrix: TransitionMatrix,
}

impl SessionReport {
    pub fn write_to(&self, sink: &mut dyn ReportSink) {
        sink.add_occupancy(&self.subject, &self.occupancy);
        sink.add_visits(&self.subject, &self.visits);
        sink.add_transitions(&self.subject, &self.transitions);
    }

    pub fn visit(&self, zone_id: &str) -> Option<&VisitSummary> {
        self.visits.iter().find(|v| v.zone == zone_id)
    }
}
