use std::sync::Arc;

use itertools::Itertools;
use rayon::prelude::*;

use crate::analysis::{
    self, ClassifierSettings, TransitionMatrix, VisitQuery, classified_frame_counts,
};
use crate::config::EngineSettings;
use crate::domain::{Arena, TrackingSample};
use crate::error::InputError;
use crate::models::{
    ClassificationRecord, TransitionRecord, VisitRecord, VisitSummary, ZoneOccupancySummary,
};

use super::session::SessionReport;

/// Runs every analysis against one shared arena with fixed settings.
/// Cheap to clone; the arena is shared, never copied.
#[derive(Debug, Clone)]
pub struct ZoneEngine {
    arena: Arc<Arena>,
    settings: EngineSettings,
    classifier: ClassifierSettings,
    query: VisitQuery,
}

impl ZoneEngine {
    pub fn new(arena: Arc<Arena>, settings: EngineSettings) -> Result<Self, InputError> {
        settings.validate()?;
        let classifier = match settings.min_confidence {
            Some(c) => ClassifierSettings::with_min_confidence(c)?,
            None => ClassifierSettings::default(),
        };
        let query = VisitQuery {
            body_part: settings.body_part.clone(),
        };
        Ok(Self {
            arena,
            settings,
            classifier,
            query,
        })
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    fn fps(&self) -> f64 {
        self.settings.fps.value()
    }

    fn min_duration(&self) -> f64 {
        self.settings.min_duration_secs.value()
    }

    pub fn classify(&self, samples: &[TrackingSample]) -> Vec<ClassificationRecord> {
        analysis::classify_with(samples, self.arena.zones(), &self.classifier)
    }

    pub fn occupancy(
        &self,
        records: &[ClassificationRecord],
    ) -> Result<Vec<ZoneOccupancySummary>, InputError> {
        analysis::occupancy(records, self.fps())
    }

    pub fn visits(
        &self,
        records: &[ClassificationRecord],
        zone_id: &str,
    ) -> Result<VisitSummary, InputError> {
        analysis::visits_for(
            records,
            self.arena.zones(),
            zone_id,
            self.fps(),
            self.min_duration(),
            &self.query,
        )
    }

    pub fn visit_records(
        &self,
        records: &[ClassificationRecord],
        zone_id: &str,
    ) -> Result<Vec<VisitRecord>, InputError> {
        analysis::visit_records(
            records,
            self.arena.zones(),
            zone_id,
            self.fps(),
            self.min_duration(),
            &self.query,
        )
    }

    pub fn visit_table(
        &self,
        records: &[ClassificationRecord],
    ) -> Result<Vec<VisitSummary>, InputError> {
        analysis::visit_table(
            records,
            self.arena.zones(),
            self.fps(),
            self.min_duration(),
            &self.query,
        )
    }

    pub fn transitions(
        &self,
        records: &[ClassificationRecord],
    ) -> Result<Vec<TransitionRecord>, InputError> {
        analysis::transitions_for(
            records,
            self.arena.zones(),
            self.fps(),
            self.min_duration(),
            self.settings.body_part.as_deref(),
        )
    }

    /// Classifies one subject's stream and derives every metric from it.
    pub fn analyze_session(
        &self,
        subject: &str,
        samples: &[TrackingSample],
    ) -> Result<SessionReport, InputError> {
        let records = self.classify(samples);
        let classified_frames = classified_frame_counts(&records);

        for body_part in samples
            .iter()
            .map(|s| s.body_part.as_str())
            .unique()
            .filter(|bp| !classified_frames.contains_key(*bp))
        {
            log::warn!(
                "Subject '{}': body part '{}' has no usable coordinates",
                subject,
                body_part
            );
        }

        let transitions = self.transitions(&records)?;
        let transition_matrix = TransitionMatrix::from_records(&transitions, self.arena.zones());

        let report = SessionReport {
            subject: subject.to_string(),
            sample_count: samples.len(),
            record_count: records.len(),
            occupancy: self.occupancy(&records)?,
            visits: self.visit_table(&records)?,
            transitions,
            transition_matrix,
            classified_frames,
        };

        log::info!(
            "Subject '{}': {} samples -> {} records, {} transitions",
            subject,
            report.sample_count,
            report.record_count,
            report.transition_matrix.total()
        );
        Ok(report)
    }

    /// One report per subject, computed in parallel. Fails on the first
    /// subject whose analysis fails.
    pub fn analyze_sessions(
        &self,
        sessions: &[(String, Vec<TrackingSample>)],
    ) -> Result<Vec<SessionReport>, InputError> {
        crate::trace_time!("Analyze sessions", 50_000, {
            sessions
                .par_iter()
                .map(|(subject, samples)| self.analyze_session(subject, samples))
                .collect()
        })
    }
}

/// `visits` against an arena, rejecting zone ids the arena does not declare.
pub fn visits_in(
    arena: &Arena,
    records: &[ClassificationRecord],
    zone_id: &str,
    fps: f64,
    min_duration: f64,
) -> Result<VisitSummary, InputError> {
    analysis::visits(records, arena.zones(), zone_id, fps, min_duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Units;
    use crate::domain::{ZoneDefinition, ZoneEntry};
    use crate::models::ZoneLabel;
    use std::collections::BTreeMap;

    fn arena() -> Arc<Arena> {
        let arena = Arena::new(
            Some("two_halves".to_string()),
            Units::Pixels,
            None,
            BTreeMap::new(),
            vec![
                ZoneEntry::new("left", ZoneDefinition::rectangle(0.0, 5.0, 0.0, 10.0)),
                ZoneEntry::new("right", ZoneDefinition::rectangle(5.0, 10.0, 0.0, 10.0)),
            ],
        )
        .unwrap();
        Arc::new(arena)
    }

    fn walk(xs: &[f64]) -> Vec<TrackingSample> {
        xs.iter()
            .enumerate()
            .map(|(f, &x)| TrackingSample::new(f as u64, "nose", x, 5.0))
            .collect()
    }

    #[test]
    fn test_new_validates_settings() {
        let mut settings = EngineSettings::default();
        settings.min_confidence = Some(f64::INFINITY);
        assert_eq!(
            ZoneEngine::new(arena(), settings).unwrap_err(),
            InputError::InvalidConfidence(f64::INFINITY)
        );
    }

    #[test]
    fn test_analyze_session() {
        let engine = ZoneEngine::new(arena(), EngineSettings::new(1.0, 0.0).unwrap()).unwrap();
        let samples = walk(&[1.0, 1.0, 8.0, 8.0, 20.0]);
        let report = engine.analyze_session("mouse_1", &samples).unwrap();

        assert_eq!(report.sample_count, 5);
        assert_eq!(report.classified_frames["nose"], 5);
        assert_eq!(report.visit("left").unwrap().n_entries, 1);
        assert_eq!(report.visit("right").unwrap().first_entry_frame, Some(2));
        assert_eq!(report.transition_matrix.total(), 2);
        assert_eq!(
            report.transitions[0],
            TransitionRecord {
                from: ZoneLabel::zone("left"),
                to: ZoneLabel::zone("right"),
                count: 1
            }
        );
    }

    #[test]
    fn test_unknown_zone() {
        let engine = ZoneEngine::new(arena(), EngineSettings::default()).unwrap();
        assert_eq!(
            engine.visits(&[], "middle"),
            Err(InputError::UnknownZone("middle".to_string()))
        );
        assert_eq!(
            visits_in(&arena(), &[], "middle", 25.0, 0.0),
            Err(InputError::UnknownZone("middle".to_string()))
        );
    }

    #[test]
    fn test_analyze_sessions_in_parallel() {
        let engine = ZoneEngine::new(arena(), EngineSettings::new(1.0, 0.0).unwrap()).unwrap();
        let sessions = vec![
            ("a".to_string(), walk(&[1.0, 8.0])),
            ("b".to_string(), walk(&[8.0, 8.0, 8.0])),
        ];
        let reports = engine.analyze_sessions(&sessions).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].subject, "a");
        assert_eq!(reports[1].visit("left").unwrap().n_entries, 0);
        assert_eq!(reports[0], engine.analyze_session("a", &sessions[0].1).unwrap());
    }
}
