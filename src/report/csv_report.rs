use crate::{
    models::{TransitionRecord, VisitSummary, ZoneOccupancySummary},
    report::ReportSink,
};

const OCCUPANCY_HEADER: &str = "Subject,Body_Part,Zone,Frames,Time_S,Pct";
const VISITS_HEADER: &str = "Subject,Zone,Entries,Mean_Dur_S,Sd_Dur_S,Total_S,Latency_S,First_Entry_Frame";
const TRANSITIONS_HEADER: &str = "Subject,From,To,Count";

/// Buffers one CSV table per metric; headers are written on first use.
#[derive(Debug, Default)]
pub struct CsvReport {
    occupancy: Vec<String>,
    visits: Vec<String>,
    transitions: Vec<String>,
}

impl CsvReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn occupancy_csv(&self) -> String {
        Self::join(&self.occupancy)
    }

    pub fn visits_csv(&self) -> String {
        Self::join(&self.visits)
    }

    pub fn transitions_csv(&self) -> String {
        Self::join(&self.transitions)
    }

    pub fn is_empty(&self) -> bool {
        self.occupancy.is_empty() && self.visits.is_empty() && self.transitions.is_empty()
    }

    pub fn print_all(&self) {
        for (title, table) in [
            ("OCCUPANCY", &self.occupancy),
            ("VISITS", &self.visits),
            ("TRANSITIONS", &self.transitions),
        ] {
            if table.is_empty() {
                continue;
            }
            println!("==================== {} CSV ====================", title);
            for line in table {
                println!("{}", line);
            }
        }
    }

    fn join(lines: &[String]) -> String {
        let mut out = lines.join("\n");
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }

    fn push(buffer: &mut Vec<String>, header: &str, row: String) {
        if buffer.is_empty() {
            buffer.push(header.to_string());
        }
        buffer.push(row);
    }
}

/// Quotes a field only when it would break the row.
fn field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

impl ReportSink for CsvReport {
    fn add_occupancy(&mut self, subject: &str, rows: &[ZoneOccupancySummary]) {
        for r in rows {
            let row = format!(
                "{},{},{},{},{:.3},{:.2}",
                field(subject),
                field(&r.body_part),
                field(r.zone.as_str()),
                r.frame_count,
                r.time_seconds,
                r.percentage
            );
            Self::push(&mut self.occupancy, OCCUPANCY_HEADER, row);
        }
    }

    fn add_visits(&mut self, subject: &str, rows: &[VisitSummary]) {
        for r in rows {
            let row = format!(
                "{},{},{},{:.3},{:.3},{:.3},{},{}",
                field(subject),
                field(&r.zone),
                r.n_entries,
                r.mean_duration,
                r.duration_stddev,
                r.total_time,
                r.latency_seconds.map(|l| format!("{:.3}", l)).unwrap_or_default(),
                r.first_entry_frame.map(|f| f.to_string()).unwrap_or_default()
            );
            Self::push(&mut self.visits, VISITS_HEADER, row);
        }
    }

    fn add_transitions(&mut self, subject: &str, rows: &[TransitionRecord]) {
        for r in rows {
            let row = format!(
                "{},{},{},{}",
                field(subject),
                field(r.from.as_str()),
                field(r.to.as_str()),
                r.count
            );
            Self::push(&mut self.transitions, TRANSITIONS_HEADER, row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ZoneLabel;

    #[test]
    fn test_occupancy_csv() {
        let mut report = CsvReport::new();
        assert!(report.is_empty());
        report.add_occupancy(
            "mouse_1",
            &[ZoneOccupancySummary {
                zone: ZoneLabel::Unclassified,
                body_part: "nose".to_string(),
                frame_count: 50,
                time_seconds: 2.0,
                percentage: 100.0,
            }],
        );
        assert_eq!(
            report.occupancy_csv(),
            "Subject,Body_Part,Zone,Frames,Time_S,Pct\nmouse_1,nose,unclassified,50,2.000,100.00\n"
        );
        assert_eq!(report.visits_csv(), "");
    }

    #[test]
    fn test_visits_csv_leaves_latency_blank_when_never_entered() {
        let mut report = CsvReport::new();
        report.add_visits("m", &[VisitSummary::never_entered("center")]);
        let csv = report.visits_csv();
        assert_eq!(csv.lines().nth(1), Some("m,center,0,0.000,0.000,0.000,,"));
    }

    #[test]
    fn test_visits_csv_reports_duration_spread() {
        let mut report = CsvReport::new();
        let summary = VisitSummary {
            zone: "corner".to_string(),
            n_entries: 2,
            mean_duration: 2.5,
            duration_stddev: 0.5,
            total_time: 5.0,
            latency_seconds: Some(1.0),
            first_entry_frame: Some(2),
        };
        report.add_visits("m", &[summary]);
        let csv = report.visits_csv();
        assert_eq!(csv.lines().next(), Some(VISITS_HEADER));
        assert_eq!(csv.lines().nth(1), Some("m,corner,2,2.500,0.500,5.000,1.000,2"));
    }

    #[test]
    fn test_header_written_once_and_fields_quoted() {
        let mut report = CsvReport::new();
        let row = TransitionRecord {
            from: ZoneLabel::zone("a,b"),
            to: ZoneLabel::Unclassified,
            count: 3,
        };
        report.add_transitions("s1", std::slice::from_ref(&row));
        report.add_transitions("s2", &[row]);
        let csv = report.transitions_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "s1,\"a,b\",unclassified,3");
    }
}
