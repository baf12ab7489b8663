use serde::{Deserialize, Serialize};

use crate::{
    config::DF,
    domain::TrackingSample,
    error::InputError,
    models::{ClassificationRecord, ZoneLabel, ZoneSet},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifierSettings {
    /// Samples with a confidence below this are treated like missing coordinates.
    /// Samples that carry no confidence at all are never filtered.
    min_confidence: Option<f64>,
}

impl ClassifierSettings {
    pub fn with_min_confidence(min_confidence: f64) -> Result<Self, InputError> {
        if !min_confidence.is_finite() {
            return Err(InputError::InvalidConfidence(min_confidence));
        }
        Ok(Self {
            min_confidence: Some(min_confidence),
        })
    }

    pub fn min_confidence(&self) -> Option<f64> {
        self.min_confidence
    }

    fn usable_coords(&self, sample: &TrackingSample) -> Option<(f64, f64)> {
        if let (Some(min), Some(conf)) = (self.min_confidence, sample.confidence) {
            if conf < min {
                return None;
            }
        }
        sample.coords()
    }
}

/// Classifies every sample against every zone.
///
/// One record per containing zone (declaration order), or a single
/// `Unclassified` record when nothing matched. Samples without usable
/// coordinates emit nothing, so downstream denominators must count emitted
/// records rather than input samples.
///
/// Output is sorted by (body_part, frame); the sort is stable, so records of
/// one frame keep zone declaration order.
pub fn classify(samples: &[TrackingSample], zones: &ZoneSet) -> Vec<ClassificationRecord> {
    classify_with(samples, zones, &ClassifierSettings::default())
}

pub fn classify_with(
    samples: &[TrackingSample],
    zones: &ZoneSet,
    settings: &ClassifierSettings,
) -> Vec<ClassificationRecord> {
    let mut records = Vec::with_capacity(samples.len());
    let mut dropped = 0usize;

    crate::trace_time!("Classify samples", 5_000, {
        for sample in samples {
            let Some((x, y)) = settings.usable_coords(sample) else {
                dropped += 1;
                continue;
            };

            let before = records.len();
            for zone in zones {
                if zone.geometry.contains(x, y) {
                    records.push(ClassificationRecord::new(
                        sample.frame,
                        sample.body_part.as_str(),
                        ZoneLabel::zone(zone.id.as_str()),
                        x,
                        y,
                    ));
                }
            }
            if records.len() == before {
                records.push(ClassificationRecord::new(
                    sample.frame,
                    sample.body_part.as_str(),
                    ZoneLabel::Unclassified,
                    x,
                    y,
                ));
            }
        }

        records.sort_by(|a, b| {
            a.body_part
                .cmp(&b.body_part)
                .then_with(|| a.frame.cmp(&b.frame))
        });
    });

    if DF.log_classification {
        log::debug!(
            "Classified {} samples against {} zones: {} records, {} samples without usable coordinates",
            samples.len(),
            zones.len(),
            records.len(),
            dropped
        );
    }
    if dropped > 0 && dropped == samples.len() {
        log::warn!("None of the {} samples had usable coordinates", dropped);
    }

    records
}
