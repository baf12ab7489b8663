use std::collections::BTreeMap;

use crate::{
    analysis::zone_resolver,
    config::{ArenaConfig, Units},
    domain::{Point, ZoneDefinition, ZoneEntry},
    error::ConfigurationError,
    models::{ZoneGeometry, ZoneSet},
};

/// A resolved arena: the declared zones plus their pixel-space geometry.
/// Immutable once built; share it across analyses behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct Arena {
    name: Option<String>,
    units: Units,
    scale: Option<f64>,
    reference_points: BTreeMap<String, Point>,
    entries: Vec<ZoneEntry>,
    zones: ZoneSet,
    /// Width and height in pixels, when the config declares both.
    extent: Option<(f64, f64)>,
}

impl Arena {
    /// Zones reaching past the declared `width`/`height` are kept but logged.
    pub fn from_config(config: &ArenaConfig) -> Result<Self, ConfigurationError> {
        let arena = Self::new(
            config.name.clone(),
            config.units,
            config.scale,
            config.reference_points.clone(),
            config.zones.clone(),
        )?
        .with_extent(config.width, config.height);

        for id in arena.zones_out_of_bounds() {
            log::warn!(
                "Zone '{}' extends past the {} arena bounds",
                id,
                arena.name.as_deref().unwrap_or("<unnamed>")
            );
        }
        Ok(arena)
    }

    pub fn new(
        name: Option<String>,
        units: Units,
        scale: Option<f64>,
        reference_points: BTreeMap<String, Point>,
        entries: Vec<ZoneEntry>,
    ) -> Result<Self, ConfigurationError> {
        let pixel_scale = if units.is_physical() {
            match scale {
                Some(s) if s.is_finite() && s > 0.0 => Some(s),
                _ => return Err(ConfigurationError::MissingScale { units, scale }),
            }
        } else {
            // Pixel arenas ignore any scale
            None
        };

        let zones = zone_resolver::resolve(&entries, &reference_points, pixel_scale)?;
        log::info!(
            "Arena {} ready: {} zones ({})",
            name.as_deref().unwrap_or("<unnamed>"),
            zones.len(),
            units
        );

        Ok(Self {
            name,
            units,
            scale: pixel_scale,
            reference_points,
            entries,
            zones,
            extent: None,
        })
    }

    /// Sets the arena size in arena units. Ignored unless both sides are
    /// finite and positive.
    pub fn with_extent(mut self, width: Option<f64>, height: Option<f64>) -> Self {
        let to_px = self.scale.unwrap_or(1.0);
        self.extent = match (width, height) {
            (Some(w), Some(h)) if w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0 => {
                Some((w * to_px, h * to_px))
            }
            _ => None,
        };
        self
    }

    /// Pixel extent, `(0, 0)` to `(width, height)`.
    pub fn extent(&self) -> Option<(f64, f64)> {
        self.extent
    }

    /// Ids of zones whose bounding box leaves the extent, in declaration order.
    /// Empty when no extent is set.
    pub fn zones_out_of_bounds(&self) -> Vec<&str> {
        let Some((width, height)) = self.extent else {
            return Vec::new();
        };
        self.zones
            .iter()
            .filter(|z| {
                let (min, max) = z.geometry.bounding_box();
                min.x < 0.0 || min.y < 0.0 || max.x > width || max.y > height
            })
            .map(|z| z.id.as_str())
            .collect()
    }

    /// An arena without zones; every sample classifies as unclassified.
    pub fn empty() -> Self {
        Self {
            name: None,
            units: Units::Pixels,
            scale: None,
            reference_points: BTreeMap::new(),
            entries: Vec::new(),
            zones: ZoneSet::default(),
            extent: None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn units(&self) -> Units {
        self.units
    }

    /// Pixels per unit; `None` for pixel arenas.
    pub fn scale(&self) -> Option<f64> {
        self.scale
    }

    pub fn reference_points(&self) -> &BTreeMap<String, Point> {
        &self.reference_points
    }

    pub fn zones(&self) -> &ZoneSet {
        &self.zones
    }

    pub fn zone_ids(&self) -> impl Iterator<Item = &str> {
        self.zones.ids()
    }

    pub fn geometry(&self, id: &str) -> Option<&ZoneGeometry> {
        self.zones.get(id)
    }

    /// The zone as declared, before resolution.
    pub fn definition(&self, id: &str) -> Option<&ZoneDefinition> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| &e.definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PointRef;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_arena_is_shareable() {
        assert_send_sync::<Arena>();
    }

    #[test]
    fn test_physical_units_are_scaled() {
        let arena = Arena::new(
            Some("box".to_string()),
            Units::Centimeters,
            Some(10.0),
            BTreeMap::from([("c".to_string(), Point::new(5.0, 5.0))]),
            vec![
                ZoneEntry::new("whole", ZoneDefinition::rectangle(0.0, 10.0, 0.0, 10.0)),
                ZoneEntry::new("spot", ZoneDefinition::circle(PointRef::named("c"), 1.0)),
            ],
        )
        .unwrap();

        assert!(arena.geometry("whole").unwrap().contains(99.0, 99.0));
        assert!(!arena.geometry("whole").unwrap().contains(101.0, 50.0));
        assert!(arena.geometry("spot").unwrap().contains(55.0, 50.0));
        assert_eq!(arena.definition("spot").map(ZoneDefinition::kind), Some("circle"));
        assert_eq!(arena.zone_ids().collect::<Vec<_>>(), vec!["whole", "spot"]);
    }

    #[test]
    fn test_physical_units_need_scale() {
        let err = Arena::new(None, Units::Millimeters, None, BTreeMap::new(), vec![]).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MissingScale {
                units: Units::Millimeters,
                scale: None
            }
        );
        assert!(Arena::new(None, Units::Centimeters, Some(0.0), BTreeMap::new(), vec![]).is_err());
    }

    #[test]
    fn test_pixel_arena_ignores_scale() {
        let arena = Arena::new(
            None,
            Units::Pixels,
            Some(3.0),
            BTreeMap::new(),
            vec![ZoneEntry::new("r", ZoneDefinition::rectangle(0.0, 1.0, 0.0, 1.0))],
        )
        .unwrap();
        assert_eq!(arena.scale(), None);
        assert!(!arena.geometry("r").unwrap().contains(2.0, 2.0));
    }

    #[test]
    fn test_unknown_zone() {
        let arena = Arena::empty();
        assert!(arena.zones().is_empty());
        assert_eq!(arena.geometry("center"), None);
        assert!(arena.zones_out_of_bounds().is_empty());
    }

    #[test]
    fn test_zones_out_of_bounds() {
        let config = ArenaConfig {
            units: Units::Centimeters,
            scale: Some(2.0),
            width: Some(50.0),
            height: Some(40.0),
            reference_points: BTreeMap::from([("c".to_string(), Point::new(45.0, 20.0))]),
            zones: vec![
                ZoneEntry::new("floor", ZoneDefinition::rectangle(0.0, 50.0, 0.0, 40.0)),
                ZoneEntry::new("spill", ZoneDefinition::circle(PointRef::named("c"), 10.0)),
                ZoneEntry::new("below", ZoneDefinition::rectangle(10.0, 20.0, -1.0, 5.0)),
            ],
            ..Default::default()
        };
        let arena = Arena::from_config(&config).unwrap();
        assert_eq!(arena.extent(), Some((100.0, 80.0)));
        assert_eq!(arena.zones_out_of_bounds(), vec!["spill", "below"]);

        let unbounded = arena.clone().with_extent(Some(50.0), None);
        assert_eq!(unbounded.extent(), None);
        assert!(unbounded.zones_out_of_bounds().is_empty());
    }
}
