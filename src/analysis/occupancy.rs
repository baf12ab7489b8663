use std::collections::{BTreeMap, HashMap, HashSet};

use crate::{
    config::{DF, Fps},
    error::InputError,
    models::{ClassificationRecord, ZoneLabel, ZoneOccupancySummary},
};

/// Reduces classification records to time/percentage per (body part, zone).
///
/// - `frame_count`: distinct frames in the group. A frame inside two
///   overlapping zones counts for both, so a body part's percentages may sum
///   past 100.
/// - `percentage`: relative to the body part's distinct classified frames.
///   Frames lost to missing coordinates are in neither numerator nor denominator.
///
/// The `Unclassified` sentinel gets a row like any zone. Rows come out ordered
/// by body part, then label (zone ids alphabetically, sentinel last).
pub fn occupancy(
    records: &[ClassificationRecord],
    fps: f64,
) -> Result<Vec<ZoneOccupancySummary>, InputError> {
    let fps = Fps::new(fps)?;

    let mut classified_frames: HashMap<&str, HashSet<u64>> = HashMap::new();
    let mut zone_frames: BTreeMap<(&str, &ZoneLabel), HashSet<u64>> = BTreeMap::new();

    for r in records {
        classified_frames
            .entry(r.body_part.as_str())
            .or_default()
            .insert(r.frame);
        zone_frames
            .entry((r.body_part.as_str(), &r.zone))
            .or_default()
            .insert(r.frame);
    }

    let summaries: Vec<ZoneOccupancySummary> = zone_frames
        .into_iter()
        .filter_map(|((body_part, zone), frames)| {
            let denominator = classified_frames.get(body_part).map_or(0, HashSet::len);
            if denominator == 0 {
                return None;
            }
            let frame_count = frames.len();
            Some(ZoneOccupancySummary {
                zone: zone.clone(),
                body_part: body_part.to_string(),
                frame_count,
                time_seconds: fps.frames_to_secs(frame_count as u64),
                percentage: 100.0 * frame_count as f64 / denominator as f64,
            })
        })
        .collect();

    if DF.log_classification {
        log::debug!(
            "Occupancy: {} rows over {} body parts at {}",
            summaries.len(),
            classified_frames.len(),
            fps
        );
    }

    Ok(summaries)
}

/// Distinct classified frames per body part (the occupancy denominator).
pub fn classified_frame_counts(records: &[ClassificationRecord]) -> BTreeMap<String, usize> {
    let mut frames: BTreeMap<&str, HashSet<u64>> = BTreeMap::new();
    for r in records {
        frames.entry(r.body_part.as_str()).or_default().insert(r.frame);
    }
    frames
        .into_iter()
        .map(|(bp, f)| (bp.to_string(), f.len()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(frame: u64, body_part: &str, zone: ZoneLabel) -> ClassificationRecord {
        ClassificationRecord::new(frame, body_part, zone, 0.0, 0.0)
    }

    fn find<'a>(
        rows: &'a [ZoneOccupancySummary],
        body_part: &str,
        zone: &ZoneLabel,
    ) -> &'a ZoneOccupancySummary {
        rows.iter()
            .find(|r| r.body_part == body_part && &r.zone == zone)
            .unwrap()
    }

    #[test]
    fn test_partition_sums_to_100() {
        let center = ZoneLabel::zone("center");
        let periphery = ZoneLabel::zone("periphery");
        let records = vec![
            rec(0, "nose", center.clone()),
            rec(1, "nose", center.clone()),
            rec(2, "nose", periphery.clone()),
            rec(3, "nose", periphery.clone()),
            // frame 4 had missing coordinates: no record
            rec(5, "nose", periphery.clone()),
        ];
        let rows = occupancy(&records, 5.0).unwrap();

        let c = find(&rows, "nose", &center);
        assert_eq!(c.frame_count, 2);
        assert!((c.time_seconds - 0.4).abs() < 1e-12);
        assert!((c.percentage - 40.0).abs() < 1e-9);

        let total: f64 = rows.iter().map(|r| r.percentage).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_overlapping_zones_count_the_frame_twice() {
        let a = ZoneLabel::zone("a");
        let b = ZoneLabel::zone("b");
        let records = vec![
            rec(0, "nose", a.clone()),
            rec(0, "nose", b.clone()),
            rec(1, "nose", a.clone()),
        ];
        let rows = occupancy(&records, 1.0).unwrap();

        let frame_sum: usize = rows.iter().map(|r| r.frame_count).sum();
        assert_eq!(frame_sum, 3);
        assert!(frame_sum >= classified_frame_counts(&records)["nose"]);
        assert!((find(&rows, "nose", &a).percentage - 100.0).abs() < 1e-9);
        assert!((find(&rows, "nose", &b).percentage - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_body_parts_have_separate_denominators() {
        let z = ZoneLabel::zone("z");
        let records = vec![
            rec(0, "nose", z.clone()),
            rec(1, "nose", ZoneLabel::Unclassified),
            rec(0, "tail", z.clone()),
        ];
        let rows = occupancy(&records, 1.0).unwrap();
        assert_eq!(rows.len(), 3);
        assert!((find(&rows, "nose", &z).percentage - 50.0).abs() < 1e-9);
        assert!((find(&rows, "tail", &z).percentage - 100.0).abs() < 1e-9);
        assert!(
            (find(&rows, "nose", &ZoneLabel::Unclassified).percentage - 50.0).abs() < 1e-9
        );
        // Ordered by body part, sentinel after zones
        assert_eq!(rows[0].zone, z);
        assert_eq!(rows[1].zone, ZoneLabel::Unclassified);
        assert_eq!(rows[2].body_part, "tail");
    }

    #[test]
    fn test_duplicate_records_do_not_inflate_counts() {
        let z = ZoneLabel::zone("z");
        let records = vec![rec(0, "nose", z.clone()), rec(0, "nose", z.clone())];
        let rows = occupancy(&records, 1.0).unwrap();
        assert_eq!(rows[0].frame_count, 1);
    }

    #[test]
    fn test_no_records_no_rows() {
        assert!(occupancy(&[], 25.0).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_fps() {
        assert_eq!(occupancy(&[], 0.0), Err(InputError::InvalidFps(0.0)));
        assert_eq!(occupancy(&[], -1.0), Err(InputError::InvalidFps(-1.0)));
    }
}
