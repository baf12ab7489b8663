use std::collections::HashMap;

use serde::Serialize;

use crate::models::{ZoneGeometry, ZoneLabel};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedZone {
    pub id: String,
    pub geometry: ZoneGeometry,
}

/// Resolved zones in declaration order, with O(1) lookup by id.
/// Position in this set is the tie-break rank when a frame matches several zones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneSet {
    zones: Vec<ResolvedZone>,
    index: HashMap<String, usize>,
}

impl ZoneSet {
    pub(crate) fn from_ordered(zones: Vec<ResolvedZone>) -> Self {
        let index = zones
            .iter()
            .enumerate()
            .map(|(i, z)| (z.id.clone(), i))
            .collect();
        Self { zones, index }
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedZone> {
        self.zones.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.zones.iter().map(|z| z.id.as_str())
    }

    pub fn get(&self, id: &str) -> Option<&ZoneGeometry> {
        self.index.get(id).map(|&i| &self.zones[i].geometry)
    }

    pub fn contains_zone(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Declaration position of a zone id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Sort key for labels: declared zones by position, then ids this set does
    /// not know (alphabetical), then the unclassified sentinel.
    pub fn rank<'a>(&self, label: &'a ZoneLabel) -> (usize, &'a str) {
        match label {
            ZoneLabel::Zone(id) => match self.position(id) {
                Some(pos) => (pos, ""),
                None => (self.len(), id.as_str()),
            },
            ZoneLabel::Unclassified => (self.len() + 1, ""),
        }
    }

    /// Every label a classification can produce, in rank order.
    pub fn labels(&self) -> Vec<ZoneLabel> {
        self.ids()
            .map(ZoneLabel::zone)
            .chain(std::iter::once(ZoneLabel::Unclassified))
            .collect()
    }
}

impl<'a> IntoIterator for &'a ZoneSet {
    type Item = &'a ResolvedZone;
    type IntoIter = std::slice::Iter<'a, ResolvedZone>;

    fn into_iter(self) -> Self::IntoIter {
        self.zones.iter()
    }
}
