use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
    config::{DurationSecs, Fps},
    error::InputError,
    models::{ClassificationRecord, VisitRecord, VisitSummary, ZoneSet},
    utils::mean_and_stddev,
};

/// Which records feed the in-zone frames.
/// With no body part, a frame is in the zone when any body part is in it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitQuery {
    pub body_part: Option<String>,
}

impl VisitQuery {
    pub fn body_part(body_part: impl Into<String>) -> Self {
        Self {
            body_part: Some(body_part.into()),
        }
    }

    fn matches(&self, record: &ClassificationRecord) -> bool {
        self.body_part
            .as_deref()
            .is_none_or(|bp| bp == record.body_part)
    }
}

/// Distinct frames with a selected record inside the zone, ascending.
/// Every other frame, recorded or not, reads as out of zone.
pub fn in_zone_frames(
    records: &[ClassificationRecord],
    zone_id: &str,
    query: &VisitQuery,
) -> BTreeSet<u64> {
    records
        .iter()
        .filter(|r| query.matches(r) && r.zone.zone_id() == Some(zone_id))
        .map(|r| r.frame)
        .collect()
}

/// Runs of consecutive in-zone frames as inclusive `(first, last)` pairs.
/// Any gap between two frames closes the run.
pub fn visit_spans(frames: &BTreeSet<u64>) -> Vec<(u64, u64)> {
    let mut spans: Vec<(u64, u64)> = Vec::new();
    for &frame in frames {
        match spans.last_mut() {
            Some((_, last)) if last.checked_add(1) == Some(frame) => *last = frame,
            _ => spans.push((frame, frame)),
        }
    }
    spans
}

/// Latency to the first entry edge. The edge sits on the last out-of-zone
/// frame, one before the first in-zone frame.
fn latency(first_entry_frame: u64, fps: Fps) -> f64 {
    fps.frames_to_secs(first_entry_frame.saturating_sub(1))
}

/// Visits that survive the minimum-duration filter.
pub fn visit_records(
    records: &[ClassificationRecord],
    zones: &ZoneSet,
    zone_id: &str,
    fps: f64,
    min_duration: f64,
    query: &VisitQuery,
) -> Result<Vec<VisitRecord>, InputError> {
    let (fps, min_duration) = validate(zones, zone_id, fps, min_duration)?;
    let frames = in_zone_frames(records, zone_id, query);
    Ok(surviving(&frames, zone_id, fps, min_duration))
}

/// `exit_frame` is the first frame after the run; it saturates at `u64::MAX`,
/// so `frame_count` is the authoritative length.
fn surviving(
    frames: &BTreeSet<u64>,
    zone_id: &str,
    fps: Fps,
    min_duration: DurationSecs,
) -> Vec<VisitRecord> {
    visit_spans(frames)
        .into_iter()
        .map(|(first, last)| ((last - first).saturating_add(1), first, last))
        .filter(|&(frame_count, _, _)| !min_duration.rejects(frame_count, fps))
        .map(|(frame_count, first, last)| VisitRecord {
            zone_id: zone_id.to_string(),
            entry_frame: first,
            exit_frame: last.saturating_add(1),
            frame_count,
            duration_seconds: fps.frames_to_secs(frame_count),
        })
        .collect()
}

fn validate(
    zones: &ZoneSet,
    zone_id: &str,
    fps: f64,
    min_duration: f64,
) -> Result<(Fps, DurationSecs), InputError> {
    if !zones.contains_zone(zone_id) {
        return Err(InputError::UnknownZone(zone_id.to_string()));
    }
    Ok((Fps::new(fps)?, DurationSecs::new(min_duration)?))
}

/// Entry count, durations and latency for one zone, any body part.
pub fn visits(
    records: &[ClassificationRecord],
    zones: &ZoneSet,
    zone_id: &str,
    fps: f64,
    min_duration: f64,
) -> Result<VisitSummary, InputError> {
    visits_for(records, zones, zone_id, fps, min_duration, &VisitQuery::default())
}

pub fn visits_for(
    records: &[ClassificationRecord],
    zones: &ZoneSet,
    zone_id: &str,
    fps: f64,
    min_duration: f64,
    query: &VisitQuery,
) -> Result<VisitSummary, InputError> {
    let (fps, min_duration) = validate(zones, zone_id, fps, min_duration)?;
    let frames = in_zone_frames(records, zone_id, query);

    // Latency reads the unfiltered frames: a glitch too short to count as a visit still sets it.
    let Some(&first_entry_frame) = frames.first() else {
        log::warn!("Zone '{}' was never occupied", zone_id);
        return Ok(VisitSummary::never_entered(zone_id));
    };

    let kept = surviving(&frames, zone_id, fps, min_duration);
    let durations: Vec<f64> = kept.iter().map(|v| v.duration_seconds).collect();
    let (mean_duration, duration_stddev) = mean_and_stddev(&durations);

    Ok(VisitSummary {
        zone: zone_id.to_string(),
        n_entries: kept.len(),
        mean_duration,
        duration_stddev,
        total_time: durations.iter().sum(),
        latency_seconds: Some(latency(first_entry_frame, fps)),
        first_entry_frame: Some(first_entry_frame),
    })
}

/// One summary per zone of the set, in declaration order.
pub fn visit_table(
    records: &[ClassificationRecord],
    zones: &ZoneSet,
    fps: f64,
    min_duration: f64,
    query: &VisitQuery,
) -> Result<Vec<VisitSummary>, InputError> {
    zones
        .ids()
        .map(|id| visits_for(records, zones, id, fps, min_duration, query))
        .collect()
}
