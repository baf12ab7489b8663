use tabled::{Table, Tabled, settings::Style};

use crate::{
    models::{TransitionRecord, VisitSummary, ZoneOccupancySummary},
    report::ReportSink,
    utils::{format_seconds, round_to},
};

#[derive(Tabled)]
struct OccupancyRow {
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "Body part")]
    body_part: String,
    #[tabled(rename = "Zone")]
    zone: String,
    #[tabled(rename = "Frames")]
    frames: usize,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "%")]
    pct: f64,
}

#[derive(Tabled)]
struct VisitRow {
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "Zone")]
    zone: String,
    #[tabled(rename = "Entries")]
    entries: usize,
    #[tabled(rename = "Mean stay")]
    mean: String,
    #[tabled(rename = "Sd stay")]
    sd: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Latency")]
    latency: String,
}

#[derive(Tabled)]
struct TransitionRow {
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Count")]
    count: usize,
}

/// Collects rows for terminal display.
#[derive(Default)]
pub struct TableReport {
    occupancy: Vec<OccupancyRow>,
    visits: Vec<VisitRow>,
    transitions: Vec<TransitionRow>,
}

impl TableReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        if !self.occupancy.is_empty() {
            out.push_str("Occupancy\n");
            out.push_str(&Table::new(&self.occupancy).with(Style::modern()).to_string());
            out.push('\n');
        }
        if !self.visits.is_empty() {
            out.push_str("Visits\n");
            out.push_str(&Table::new(&self.visits).with(Style::modern()).to_string());
            out.push('\n');
        }
        if !self.transitions.is_empty() {
            out.push_str("Transitions\n");
            out.push_str(&Table::new(&self.transitions).with(Style::modern()).to_string());
            out.push('\n');
        }
        out
    }
}

impl ReportSink for TableReport {
    fn add_occupancy(&mut self, subject: &str, rows: &[ZoneOccupancySummary]) {
        self.occupancy.extend(rows.iter().map(|r| OccupancyRow {
            subject: subject.to_string(),
            body_part: r.body_part.clone(),
            zone: r.zone.to_string(),
            frames: r.frame_count,
            time: format_seconds(r.time_seconds),
            pct: round_to(r.percentage, 2),
        }));
    }

    fn add_visits(&mut self, subject: &str, rows: &[VisitSummary]) {
        self.visits.extend(rows.iter().map(|r| VisitRow {
            subject: subject.to_string(),
            zone: r.zone.clone(),
            entries: r.n_entries,
            mean: format_seconds(r.mean_duration),
            sd: format_seconds(r.duration_stddev),
            total: format_seconds(r.total_time),
            latency: r
                .latency_seconds
                .map(format_seconds)
                .unwrap_or_else(|| "never".to_string()),
        }));
    }

    fn add_transitions(&mut self, subject: &str, rows: &[TransitionRecord]) {
        self.transitions.extend(rows.iter().map(|r| TransitionRow {
            subject: subject.to_string(),
            from: r.from.to_string(),
            to: r.to.to_string(),
            count: r.count,
        }));
    }
}
