use std::collections::{BTreeMap, HashMap};

use itertools::Itertools;
use serde::Serialize;

use crate::{
    config::{DF, DurationSecs, Fps},
    error::InputError,
    models::{ClassificationRecord, TransitionRecord, ZoneLabel, ZoneSet},
};

/// Consecutive frames sharing one winning label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneRun {
    pub label: ZoneLabel,
    pub start_frame: u64,
    pub length: u64,
}

/// One label per frame: the first declared zone among the frame's matches.
/// The unclassified sentinel wins only when it is the frame's sole label.
/// Frames without records do not appear.
pub fn dominant_labels(
    records: &[ClassificationRecord],
    zones: &ZoneSet,
    body_part: Option<&str>,
) -> Vec<(u64, ZoneLabel)> {
    let mut winners: BTreeMap<u64, &ZoneLabel> = BTreeMap::new();

    for r in records
        .iter()
        .filter(|r| body_part.is_none_or(|bp| bp == r.body_part))
    {
        winners
            .entry(r.frame)
            .and_modify(|current| {
                if zones.rank(&r.zone) < zones.rank(*current) {
                    *current = &r.zone;
                }
            })
            .or_insert(&r.zone);
    }

    winners
        .into_iter()
        .map(|(frame, label)| (frame, label.clone()))
        .collect()
}

/// Collapses the label sequence into runs. Gaps in the frame numbers do not
/// break a run; `length` counts labelled frames only.
pub fn run_length_encode(labels: &[(u64, ZoneLabel)]) -> Vec<ZoneRun> {
    labels
        .iter()
        .chunk_by(|(_, label)| label.clone())
        .into_iter()
        .filter_map(|(label, mut chunk)| {
            let (start_frame, _) = chunk.next()?;
            Some(ZoneRun {
                label,
                start_frame: *start_frame,
                length: 1 + chunk.count() as u64,
            })
        })
        .collect()
}

/// From→to counts between zones for all body parts pooled.
pub fn transitions(
    records: &[ClassificationRecord],
    zones: &ZoneSet,
    fps: f64,
    min_duration: f64,
) -> Result<Vec<TransitionRecord>, InputError> {
    transitions_for(records, zones, fps, min_duration, None)
}

/// From→to counts between runs that last at least `min_duration`.
///
/// Short runs are dropped before counting and their neighbours become
/// adjacent: `A A B A A A` at 1 fps with a 2 s minimum fuses into a single
/// `A` stay and yields no transition.
pub fn transitions_for(
    records: &[ClassificationRecord],
    zones: &ZoneSet,
    fps: f64,
    min_duration: f64,
    body_part: Option<&str>,
) -> Result<Vec<TransitionRecord>, InputError> {
    let fps = Fps::new(fps)?;
    let min_duration = DurationSecs::new(min_duration)?;

    let runs = run_length_encode(&dominant_labels(records, zones, body_part));
    let total_runs = runs.len();
    let kept: Vec<ZoneRun> = runs
        .into_iter()
        .filter(|run| !min_duration.rejects(run.length, fps))
        .collect();

    let mut counts: HashMap<(&ZoneLabel, &ZoneLabel), usize> = HashMap::new();
    for (a, b) in kept.iter().tuple_windows() {
        if a.label != b.label {
            *counts.entry((&a.label, &b.label)).or_default() += 1;
        }
    }

    if DF.log_transitions {
        log::debug!(
            "Transitions: {} runs, {} kept at {} min, {} distinct pairs",
            total_runs,
            kept.len(),
            min_duration,
            counts.len()
        );
    }

    Ok(counts
        .into_iter()
        .sorted_by(|((af, at), _), ((bf, bt), _)| {
            (zones.rank(af), zones.rank(at)).cmp(&(zones.rank(bf), zones.rank(bt)))
        })
        .map(|((from, to), count)| TransitionRecord {
            from: from.clone(),
            to: to.clone(),
            count,
        })
        .collect())
}

/// Dense count table over the arena's labels, unclassified last.
/// `counts[i][j]` is the number of transitions from `labels[i]` to `labels[j]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionMatrix {
    pub labels: Vec<ZoneLabel>,
    pub counts: Vec<Vec<usize>>,
}

impl TransitionMatrix {
    /// Rows for labels the set does not declare are appended in rank order.
    pub fn from_records(rows: &[TransitionRecord], zones: &ZoneSet) -> Self {
        let mut labels = zones.labels();
        for label in rows
            .iter()
            .flat_map(|r| [&r.from, &r.to])
            .filter(|l| !l.is_unclassified() && !l.zone_id().is_some_and(|id| zones.contains_zone(id)))
            .unique()
            .sorted_by_key(|l| zones.rank(*l))
        {
            // before the sentinel
            labels.insert(labels.len() - 1, label.clone());
        }

        let index: HashMap<&ZoneLabel, usize> =
            labels.iter().enumerate().map(|(i, l)| (l, i)).collect();
        let mut counts = vec![vec![0; labels.len()]; labels.len()];
        for r in rows {
            if let (Some(&i), Some(&j)) = (index.get(&r.from), index.get(&r.to)) {
                counts[i][j] += r.count;
            }
        }

        Self { labels, counts }
    }

    pub fn get(&self, from: &ZoneLabel, to: &ZoneLabel) -> usize {
        let pos = |label: &ZoneLabel| self.labels.iter().position(|l| l == label);
        match (pos(from), pos(to)) {
            (Some(i), Some(j)) => self.counts[i][j],
            _ => 0,
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::zone_resolver::resolve;
    use crate::domain::{ZoneDefinition, ZoneEntry};
    use std::collections::BTreeMap;

    fn zones() -> ZoneSet {
        let entries = vec![
            ZoneEntry::new("a", ZoneDefinition::rectangle(0.0, 4.0, 0.0, 4.0)),
            ZoneEntry::new("b", ZoneDefinition::rectangle(2.0, 6.0, 0.0, 4.0)),
        ];
        resolve(&entries, &BTreeMap::new(), None).unwrap()
    }

    fn rec(frame: u64, zone: &str) -> ClassificationRecord {
        let label = ZoneLabel::from(zone.to_string());
        ClassificationRecord::new(frame, "nose", label, 0.0, 0.0)
    }

    fn sequence(labels: &[&str]) -> Vec<ClassificationRecord> {
        labels
            .iter()
            .enumerate()
            .map(|(frame, zone)| rec(frame as u64, zone))
            .collect()
    }

    #[test]
    fn test_first_declared_zone_wins() {
        let records = vec![
            rec(0, "b"),
            rec(0, "a"),
            rec(1, "unclassified"),
            rec(2, "unclassified"),
            rec(2, "b"),
        ];
        let labels = dominant_labels(&records, &zones(), None);
        assert_eq!(
            labels,
            vec![
                (0, ZoneLabel::zone("a")),
                (1, ZoneLabel::Unclassified),
                (2, ZoneLabel::zone("b")),
            ]
        );
    }

    #[test]
    fn test_run_length_encode_skips_gaps() {
        let records = vec![rec(0, "a"), rec(1, "a"), rec(5, "a"), rec(6, "b")];
        let runs = run_length_encode(&dominant_labels(&records, &zones(), None));
        assert_eq!(
            runs,
            vec![
                ZoneRun {
                    label: ZoneLabel::zone("a"),
                    start_frame: 0,
                    length: 3
                },
                ZoneRun {
                    label: ZoneLabel::zone("b"),
                    start_frame: 6,
                    length: 1
                },
            ]
        );
    }

    #[test]
    fn test_counts_every_change() {
        let records = sequence(&["a", "a", "b", "a", "unclassified", "a"]);
        let rows = transitions(&records, &zones(), 1.0, 0.0).unwrap();
        let a = ZoneLabel::zone("a");
        let b = ZoneLabel::zone("b");
        assert_eq!(
            rows,
            vec![
                TransitionRecord {
                    from: a.clone(),
                    to: b.clone(),
                    count: 1
                },
                TransitionRecord {
                    from: a.clone(),
                    to: ZoneLabel::Unclassified,
                    count: 1
                },
                TransitionRecord {
                    from: b.clone(),
                    to: a.clone(),
                    count: 1
                },
                TransitionRecord {
                    from: ZoneLabel::Unclassified,
                    to: a.clone(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_short_run_fuses_neighbours() {
        let records = sequence(&["a", "a", "b", "a", "a", "a"]);
        assert!(transitions(&records, &zones(), 1.0, 2.0).unwrap().is_empty());
        assert_eq!(transitions(&records, &zones(), 1.0, 0.0).unwrap().len(), 2);
    }

    #[test]
    fn test_body_part_filter() {
        let mut records = sequence(&["a", "b"]);
        records.push(ClassificationRecord::new(0, "tail", ZoneLabel::zone("b"), 0.0, 0.0));
        records.push(ClassificationRecord::new(1, "tail", ZoneLabel::zone("b"), 0.0, 0.0));

        let tail = transitions_for(&records, &zones(), 1.0, 0.0, Some("tail")).unwrap();
        assert!(tail.is_empty());
        let nose = transitions_for(&records, &zones(), 1.0, 0.0, Some("nose")).unwrap();
        assert_eq!(nose.len(), 1);
    }

    #[test]
    fn test_invalid_arguments() {
        assert_eq!(transitions(&[], &zones(), 0.0, 0.0), Err(InputError::InvalidFps(0.0)));
        assert_eq!(
            transitions(&[], &zones(), 1.0, f64::NAN).map_err(|e| matches!(e, InputError::InvalidMinDuration(_))),
            Err(true)
        );
    }

    #[test]
    fn test_matrix() {
        let records = sequence(&["a", "b", "a", "b"]);
        let rows = transitions(&records, &zones(), 1.0, 0.0).unwrap();
        let matrix = TransitionMatrix::from_records(&rows, &zones());

        assert_eq!(
            matrix.labels,
            vec![ZoneLabel::zone("a"), ZoneLabel::zone("b"), ZoneLabel::Unclassified]
        );
        assert_eq!(matrix.counts, vec![vec![0, 2, 0], vec![1, 0, 0], vec![0, 0, 0]]);
        assert_eq!(matrix.get(&ZoneLabel::zone("a"), &ZoneLabel::zone("b")), 2);
        assert_eq!(matrix.total(), 3);
    }
}
