//! Zone definition resolution.
//!
//! Turns declarative [`ZoneEntry`]s into pixel-space [`ZoneGeometry`].
//! Proportional zones hang off a parent, so the entries form a forest over zone
//! ids; it is walked in topological order (Kahn) so every parent is resolved
//! before its children. Any failure aborts the whole resolution.

use std::collections::{BTreeMap, HashMap, VecDeque};

use itertools::Itertools;

use crate::{
    config::{ANALYSIS, DF},
    domain::{Point, PointRef, ZoneDefinition, ZoneEntry},
    error::ConfigurationError,
    models::{ResolvedZone, ZoneGeometry, ZoneSet},
};

/// Resolves every entry into concrete geometry, preserving declaration order.
///
/// `scale` is pixels per arena unit; `None` means coordinates are already in pixels.
pub fn resolve(
    entries: &[ZoneEntry],
    reference_points: &BTreeMap<String, Point>,
    scale: Option<f64>,
) -> Result<ZoneSet, ConfigurationError> {
    check_ids(entries)?;

    let order = resolution_order(entries)?;
    if DF.log_resolution {
        log::debug!(
            "Resolving {} zones in order: {}",
            entries.len(),
            order.iter().map(|&i| entries[i].id.as_str()).join(" -> ")
        );
    }

    let unit_scale = scale.unwrap_or(1.0);
    let mut resolved: Vec<Option<ZoneGeometry>> = vec![None; entries.len()];
    let position: HashMap<&str, usize> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| (e.id.as_str(), i))
        .collect();

    for &idx in &order {
        let entry = &entries[idx];
        let geometry = match &entry.definition {
            ZoneDefinition::Proportional { parent, factor } => {
                check_factor(&entry.id, *factor)?;
                // Topological order guarantees the parent is already resolved
                let parent_geometry = position
                    .get(parent.as_str())
                    .and_then(|&p| resolved[p].as_ref())
                    .ok_or_else(|| ConfigurationError::MissingParent {
                        zone: entry.id.clone(),
                        parent: parent.clone(),
                    })?;
                parent_geometry.scaled(*factor)
            }
            base => resolve_base(&entry.id, base, reference_points, unit_scale)?,
        };

        if DF.log_resolution {
            log::debug!("Zone '{}' ({}) -> {}", entry.id, entry.definition.kind(), geometry);
        }
        resolved[idx] = Some(geometry);
    }

    let zones = entries
        .iter()
        .zip(resolved)
        .filter_map(|(entry, geometry)| {
            geometry.map(|geometry| ResolvedZone {
                id: entry.id.clone(),
                geometry,
            })
        })
        .collect();

    Ok(ZoneSet::from_ordered(zones))
}

/// Duplicate and reserved ids.
fn check_ids(entries: &[ZoneEntry]) -> Result<(), ConfigurationError> {
    if let Some(entry) = entries
        .iter()
        .find(|e| e.id == ANALYSIS.unclassified_label)
    {
        return Err(ConfigurationError::ReservedZoneId {
            zone: entry.id.clone(),
        });
    }
    if let Some(dup) = entries.iter().map(|e| e.id.as_str()).duplicates().next() {
        return Err(ConfigurationError::DuplicateZone {
            zone: dup.to_string(),
        });
    }
    Ok(())
}

/// Kahn's algorithm over parent -> child edges.
/// Roots (non-proportional zones) are seeded in declaration order, so the
/// result is deterministic for a given input.
fn resolution_order(entries: &[ZoneEntry]) -> Result<Vec<usize>, ConfigurationError> {
    let position: HashMap<&str, usize> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| (e.id.as_str(), i))
        .collect();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); entries.len()];
    let mut pending_parent = vec![false; entries.len()];

    for (idx, entry) in entries.iter().enumerate() {
        if let Some(parent) = entry.definition.parent() {
            let &parent_idx =
                position
                    .get(parent)
                    .ok_or_else(|| ConfigurationError::MissingParent {
                        zone: entry.id.clone(),
                        parent: parent.to_string(),
                    })?;
            children[parent_idx].push(idx);
            pending_parent[idx] = true;
        }
    }

    let mut queue: VecDeque<usize> = (0..entries.len())
        .filter(|&i| !pending_parent[i])
        .collect();
    let mut order = Vec::with_capacity(entries.len());

    while let Some(idx) = queue.pop_front() {
        order.push(idx);
        for &child in &children[idx] {
            pending_parent[child] = false;
            queue.push_back(child);
        }
    }

    if order.len() < entries.len() {
        // Whatever is left hangs off a cycle. Report the first one declared.
        let stuck = (0..entries.len())
            .find(|&i| pending_parent[i])
            .unwrap_or_default();
        return Err(ConfigurationError::Cycle {
            zone: entries[stuck].id.clone(),
            path: cycle_path(entries, &position, stuck),
        });
    }

    Ok(order)
}

/// Follows parents from `start` until an id repeats, e.g. "a -> b -> c -> a".
fn cycle_path(entries: &[ZoneEntry], position: &HashMap<&str, usize>, start: usize) -> String {
    let mut seen = vec![false; entries.len()];
    let mut path = Vec::new();
    let mut current = Some(start);

    while let Some(idx) = current {
        path.push(entries[idx].id.as_str());
        if seen[idx] {
            break;
        }
        seen[idx] = true;
        current = entries[idx]
            .definition
            .parent()
            .and_then(|p| position.get(p).copied());
    }

    path.join(" -> ")
}

fn check_factor(zone: &str, factor: f64) -> Result<(), ConfigurationError> {
    if factor.is_finite() && factor > 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::degenerate(
            zone,
            format!("proportional factor must be positive and finite (got {})", factor),
        ))
    }
}

fn lookup_point(
    zone: &str,
    point: &PointRef,
    reference_points: &BTreeMap<String, Point>,
) -> Result<Point, ConfigurationError> {
    let p = match point {
        PointRef::Literal(p) => *p,
        PointRef::Named(name) => *reference_points.get(name).ok_or_else(|| {
            ConfigurationError::UnknownReferencePoint {
                zone: zone.to_string(),
                point: name.clone(),
            }
        })?,
    };
    if !p.is_finite() {
        return Err(ConfigurationError::degenerate(
            zone,
            format!("non-finite coordinate {}", p),
        ));
    }
    Ok(p)
}

/// Rectangle / circle / polygon: validate, then convert arena units to pixels.
fn resolve_base(
    zone: &str,
    definition: &ZoneDefinition,
    reference_points: &BTreeMap<String, Point>,
    unit_scale: f64,
) -> Result<ZoneGeometry, ConfigurationError> {
    match definition {
        ZoneDefinition::Rectangle {
            x_min,
            x_max,
            y_min,
            y_max,
        } => {
            if ![x_min, x_max, y_min, y_max].iter().all(|v| v.is_finite()) {
                return Err(ConfigurationError::degenerate(zone, "non-finite rectangle bound"));
            }
            if x_min >= x_max || y_min >= y_max {
                return Err(ConfigurationError::degenerate(
                    zone,
                    format!(
                        "rectangle needs min < max on both axes (x: {}..{}, y: {}..{})",
                        x_min, x_max, y_min, y_max
                    ),
                ));
            }
            Ok(ZoneGeometry::Rectangle {
                x_min: x_min * unit_scale,
                x_max: x_max * unit_scale,
                y_min: y_min * unit_scale,
                y_max: y_max * unit_scale,
            })
        }
        ZoneDefinition::Circle { center, radius } => {
            let center = lookup_point(zone, center, reference_points)?;
            if !(radius.is_finite() && *radius > 0.0) {
                return Err(ConfigurationError::degenerate(
                    zone,
                    format!("circle radius must be positive (got {})", radius),
                ));
            }
            Ok(ZoneGeometry::Circle {
                center: center.scaled(unit_scale),
                radius: radius * unit_scale,
            })
        }
        ZoneDefinition::Polygon { vertices } => {
            if vertices.len() < 3 {
                return Err(ConfigurationError::degenerate(
                    zone,
                    format!("polygon needs at least 3 vertices (got {})", vertices.len()),
                ));
            }
            let vertices = vertices
                .iter()
                .map(|v| lookup_point(zone, v, reference_points).map(|p| p.scaled(unit_scale)))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(ZoneGeometry::Polygon { vertices })
        }
        ZoneDefinition::Unknown => Err(ConfigurationError::UnknownZoneType {
            zone: zone.to_string(),
        }),
        ZoneDefinition::Proportional { .. } => Err(ConfigurationError::degenerate(
            zone,
            "proportional zone reached base resolution",
        )),
    }
}
