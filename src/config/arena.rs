//! On-disk arena description: units, reference points and the ordered zone list.

use std::{
    collections::BTreeMap,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    config::Units,
    domain::{Point, ZoneEntry},
    error::ZoneError,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArenaConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub units: Units,
    /// Pixels per unit. Required when `units` is physical.
    #[serde(default)]
    pub scale: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub reference_points: BTreeMap<String, Point>,
    /// Declaration order matters: it breaks ties between overlapping zones.
    #[serde(default)]
    pub zones: Vec<ZoneEntry>,
}

impl ArenaConfig {
    /// Reads a YAML (`.yaml`/`.yml`) or JSON document.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ZoneError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ZoneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);

        let parse_err = |reason: String| ZoneError::Parse {
            path: PathBuf::from(path),
            reason,
        };
        let config: Self = if is_yaml(path) {
            serde_yaml::from_reader(reader).map_err(|e| parse_err(e.to_string()))?
        } else {
            serde_json::from_reader(reader).map_err(|e| parse_err(e.to_string()))?
        };

        log::debug!(
            "Loaded arena {:?} from {:?}: {} zones, {} reference points, units {}",
            config.name,
            path,
            config.zones.len(),
            config.reference_points.len(),
            config.units
        );
        Ok(config)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }

    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PointRef, ZoneDefinition};

    const OPEN_FIELD: &str = r#"
name: open_field
units: cm
scale: 4.0
reference_points:
  center: { x: 20.0, y: 20.0 }
zones:
  - id: arena
    type: rectangle
    x_min: 0.0
    x_max: 40.0
    y_min: 0.0
    y_max: 40.0
  - id: center
    type: circle
    center: center
    radius: 5.0
  - id: inner
    type: proportional
    parent: arena
    factor: 0.5
"#;

    #[test]
    fn test_parse_yaml() {
        let config = ArenaConfig::from_yaml_str(OPEN_FIELD).unwrap();
        assert_eq!(config.units, Units::Centimeters);
        assert_eq!(config.scale, Some(4.0));
        assert_eq!(config.reference_points["center"], Point::new(20.0, 20.0));
        assert_eq!(
            config.zones.iter().map(|z| z.id.as_str()).collect::<Vec<_>>(),
            vec!["arena", "center", "inner"]
        );
        assert_eq!(
            config.zones[1].definition,
            ZoneDefinition::Circle {
                center: PointRef::named("center"),
                radius: 5.0
            }
        );
    }

    #[test]
    fn test_parse_json_defaults() {
        let config = ArenaConfig::from_json_str(r#"{"zones": []}"#).unwrap();
        assert_eq!(config.units, Units::Pixels);
        assert!(config.scale.is_none());
        assert!(config.reference_points.is_empty());
    }

    #[test]
    fn test_load_by_extension() {
        let dir = std::env::temp_dir();
        let yaml = dir.join(format!("zone_occupancy_arena_{}.yml", std::process::id()));
        std::fs::write(&yaml, OPEN_FIELD).unwrap();
        let config = ArenaConfig::load(&yaml).unwrap();
        assert_eq!(config.zones.len(), 3);
        std::fs::remove_file(&yaml).unwrap();

        let json = dir.join(format!("zone_occupancy_arena_{}.json", std::process::id()));
        std::fs::write(&json, "not json").unwrap();
        assert!(matches!(ArenaConfig::load(&json), Err(ZoneError::Parse { .. })));
        std::fs::remove_file(&json).unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        let err = ArenaConfig::load("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ZoneError::Io { .. }));
    }
}
