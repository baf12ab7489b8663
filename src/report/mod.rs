// Output sinks for session results
mod csv_report;
mod table_report;

pub use csv_report::CsvReport;
pub use table_report::TableReport;

use crate::models::{TransitionRecord, VisitSummary, ZoneOccupancySummary};

/// Destination for per-subject result tables. Sinks are handed in by the caller.
pub trait ReportSink {
    fn add_occupancy(&mut self, subject: &str, rows: &[ZoneOccupancySummary]);
    fn add_visits(&mut self, subject: &str, rows: &[VisitSummary]);
    fn add_transitions(&mut self, subject: &str, rows: &[TransitionRecord]);
}
