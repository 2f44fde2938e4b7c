//! Scale converter — maps real astronomical measurements into a bounded
//! visual range while preserving relative order.
//!
//! Only planets establish the input bounds; belts and clouds are placed
//! relative to planets afterwards. A per-index spacing term is added on top
//! of the linear mapping so neighboring orbits never collapse onto each
//! other — this trades a little proportionality for guaranteed separation.

use glam::Vec3;
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::types::BodyId;
use crate::catalog::{BodyKind, Catalog};

/// Additive gap between consecutive catalog entries, in visual units.
pub const MINIMUM_ORBIT_SPACING: f64 = 100.0;

/// Where between its anchors a belt sits, on the anchors' scaled radii.
const BELT_ANCHOR_FRACTION: f64 = 0.35;
/// Belt visual width relative to its distance-mapped real width.
const BELT_WIDTH_FRACTION: f64 = 0.2;
/// Oort-style shells sit beyond the outermost orbit bound.
const SHELL_INNER_FACTOR: f64 = 1.5;
const SHELL_OUTER_FACTOR: f64 = 2.0;
/// Sun rendering size relative to the largest planet size.
const SUN_SIZE_FACTOR: f64 = 0.6;

/// Output bounds for one scale preset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleBounds {
    pub min_planet_size: f64,
    pub max_planet_size: f64,
    pub min_orbit_radius: f64,
    pub max_orbit_radius: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("catalog has no planets to establish scale bounds")]
    EmptyCatalog,
}

/// Linear range mapping. A degenerate input range (single-body catalog)
/// maps everything to `out_min` instead of dividing by zero.
pub fn map_range(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    if (in_max - in_min).abs() < f64::EPSILON {
        return out_min;
    }
    (value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Per-body visual placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyLayout {
    Planet {
        orbit_radius: f32,
        size: f32,
        eccentricity: f32,
    },
    Moon {
        parent: BodyId,
        orbit_radius: f32,
        size: f32,
    },
    Belt {
        orbit_radius: f32,
        width: f32,
    },
    Shell {
        inner_radius: f32,
        outer_radius: f32,
    },
}

/// Camera and fog parameters derived from the orbit bounds, so switching
/// presets keeps the view consistent with the new world extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraDefaults {
    pub position: Vec3,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub fog_near: f32,
    pub fog_far: f32,
}

/// The catalog's measurements mapped into renderable units.
#[derive(Debug, Clone)]
pub struct VisualLayout {
    entries: Vec<(BodyId, BodyLayout)>,
    pub sun_size: f32,
    pub camera: CameraDefaults,
}

impl VisualLayout {
    pub fn get(&self, id: BodyId) -> Option<&BodyLayout> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, layout)| layout)
    }

    /// Iterate in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &BodyLayout)> {
        self.entries.iter().map(|(id, layout)| (*id, layout))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Map a catalog into a `VisualLayout` under the given bounds.
/// Pure with respect to its inputs: the catalog is never mutated, so
/// switching presets at runtime is idempotent.
pub fn build_layout(catalog: &Catalog, bounds: &ScaleBounds) -> Result<VisualLayout, LayoutError> {
    let mut dist_min = f64::MAX;
    let mut dist_max = f64::MIN;
    let mut size_min = f64::MAX;
    let mut size_max = f64::MIN;
    let mut planet_count = 0usize;
    for (_, body) in catalog.iter() {
        if let BodyKind::Planet {
            orbit_radius_au,
            size_rel,
            ..
        } = body.kind
        {
            dist_min = dist_min.min(orbit_radius_au);
            dist_max = dist_max.max(orbit_radius_au);
            size_min = size_min.min(size_rel);
            size_max = size_max.max(size_rel);
            planet_count += 1;
        }
    }
    if planet_count == 0 {
        return Err(LayoutError::EmptyCatalog);
    }
    if planet_count == 1 {
        warn!("scale: single-planet catalog — distances collapse to the minimum bound");
    }

    let scale_distance = |au: f64, index: usize| {
        map_range(
            au,
            dist_min,
            dist_max,
            bounds.min_orbit_radius,
            bounds.max_orbit_radius,
        ) + index as f64 * MINIMUM_ORBIT_SPACING
    };
    let scale_size = |size_rel: f64| {
        map_range(
            size_rel,
            size_min,
            size_max,
            bounds.min_planet_size,
            bounds.max_planet_size,
        )
    };
    // Anchors and moon parents are resolved through the same pure mapping,
    // so their scaled values exist regardless of catalog ordering.
    let planet_by_name = |name: &str| -> Option<(BodyId, usize, f64, f64)> {
        catalog
            .iter()
            .enumerate()
            .find_map(|(index, (id, body))| match &body.kind {
                BodyKind::Planet {
                    orbit_radius_au,
                    size_rel,
                    ..
                } if body.name == name => Some((id, index, *orbit_radius_au, *size_rel)),
                _ => None,
            })
    };

    let mut entries = Vec::with_capacity(catalog.len());
    for (index, (id, body)) in catalog.iter().enumerate() {
        match &body.kind {
            BodyKind::Planet {
                orbit_radius_au,
                size_rel,
                eccentricity,
                ..
            } => {
                entries.push((
                    id,
                    BodyLayout::Planet {
                        orbit_radius: scale_distance(*orbit_radius_au, index) as f32,
                        size: scale_size(*size_rel) as f32,
                        eccentricity: *eccentricity,
                    },
                ));
            }
            BodyKind::Moon {
                parent,
                orbit_radius_rel,
                size_rel,
                ..
            } => {
                let Some((parent_id, _, _, parent_size_rel)) = planet_by_name(parent) else {
                    warn!("scale: moon {:?} has no parent {parent:?} — dropped", body.name);
                    continue;
                };
                let parent_size = scale_size(parent_size_rel) as f32;
                entries.push((
                    id,
                    BodyLayout::Moon {
                        parent: parent_id,
                        orbit_radius: parent_size * orbit_radius_rel,
                        size: parent_size * size_rel,
                    },
                ));
            }
            BodyKind::AsteroidBelt {
                orbit_radius_au,
                width_au,
                inner_anchor,
                outer_anchor,
                ..
            } => {
                let orbit_radius = match (planet_by_name(inner_anchor), planet_by_name(outer_anchor))
                {
                    (Some((_, i_idx, i_au, _)), Some((_, o_idx, o_au, _))) => {
                        let inner = scale_distance(i_au, i_idx);
                        let outer = scale_distance(o_au, o_idx);
                        inner + (outer - inner) * BELT_ANCHOR_FRACTION
                    }
                    _ => {
                        warn!(
                            "scale: belt {:?} anchors {inner_anchor:?}/{outer_anchor:?} not found — \
                             falling back to linear distance mapping",
                            body.name
                        );
                        scale_distance(*orbit_radius_au, index)
                    }
                };
                let width = map_range(
                    *width_au,
                    dist_min,
                    dist_max,
                    bounds.min_orbit_radius,
                    bounds.max_orbit_radius,
                ) * BELT_WIDTH_FRACTION;
                entries.push((
                    id,
                    BodyLayout::Belt {
                        orbit_radius: orbit_radius as f32,
                        width: width as f32,
                    },
                ));
            }
            BodyKind::OortCloud { .. } => {
                entries.push((
                    id,
                    BodyLayout::Shell {
                        inner_radius: (bounds.max_orbit_radius * SHELL_INNER_FACTOR) as f32,
                        outer_radius: (bounds.max_orbit_radius * SHELL_OUTER_FACTOR) as f32,
                    },
                ));
            }
        }
    }

    let r = bounds.max_orbit_radius as f32;
    let camera = CameraDefaults {
        position: Vec3::new(0.0, r * 0.3, r * 0.6),
        fov: 60.0,
        near: 0.1,
        far: r * 3.0,
        fog_near: r * 0.5,
        fog_far: r * 2.0,
    };

    Ok(VisualLayout {
        entries,
        sun_size: (bounds.max_planet_size * SUN_SIZE_FACTOR) as f32,
        camera,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::presets::{solar_system, ScalePreset};
    use crate::catalog::{BodyKind, Catalog, CelestialBody};

    fn planet(name: &str, au: f64, size: f64) -> CelestialBody {
        CelestialBody {
            name: name.into(),
            color: [0.5; 3],
            kind: BodyKind::Planet {
                orbit_radius_au: au,
                period_years: 1.0,
                eccentricity: 0.0,
                size_rel: size,
                albedo: 0.3,
            },
        }
    }

    fn belt(name: &str, inner: &str, outer: &str) -> CelestialBody {
        CelestialBody {
            name: name.into(),
            color: [0.4; 3],
            kind: BodyKind::AsteroidBelt {
                orbit_radius_au: 2.7,
                width_au: 1.0,
                particle_count: 100,
                inner_anchor: inner.into(),
                outer_anchor: outer.into(),
            },
        }
    }

    #[test]
    fn map_range_identity() {
        assert_eq!(map_range(0.42, 0.0, 1.0, 0.0, 1.0), 0.42);
        assert_eq!(map_range(0.387, 0.387, 30.069, 250.0, 2000.0), 250.0);
        assert_eq!(map_range(30.069, 0.387, 30.069, 250.0, 2000.0), 2000.0);
    }

    #[test]
    fn map_range_degenerate_input_returns_out_min() {
        assert_eq!(map_range(5.0, 5.0, 5.0, 100.0, 200.0), 100.0);
    }

    #[test]
    fn planet_radii_strictly_increase() {
        let layout = build_layout(&solar_system(), &ScalePreset::Default.bounds()).unwrap();
        let mut last = 0.0;
        for (_, body_layout) in layout.iter() {
            if let BodyLayout::Planet { orbit_radius, .. } = body_layout {
                assert!(*orbit_radius > last, "radius {orbit_radius} not increasing");
                last = *orbit_radius;
            }
        }
    }

    #[test]
    fn innermost_planet_maps_near_min_bound() {
        let catalog = solar_system();
        let bounds = ScalePreset::Default.bounds();
        let layout = build_layout(&catalog, &bounds).unwrap();
        let (mercury, _) = catalog.find_by_name("Mercury").unwrap();
        let BodyLayout::Planet { orbit_radius, .. } = layout.get(mercury).unwrap() else {
            panic!("Mercury should be a planet");
        };
        // Mercury is entry 0, so no spacing term applies.
        assert!((orbit_radius - bounds.min_orbit_radius as f32).abs() < 1e-3);
    }

    #[test]
    fn belt_sits_between_its_anchors() {
        let catalog = solar_system();
        let layout = build_layout(&catalog, &ScalePreset::Default.bounds()).unwrap();
        let radius_of = |name: &str| {
            let (id, _) = catalog.find_by_name(name).unwrap();
            match layout.get(id).unwrap() {
                BodyLayout::Planet { orbit_radius, .. } => *orbit_radius,
                BodyLayout::Belt { orbit_radius, .. } => *orbit_radius,
                other => panic!("unexpected layout {other:?}"),
            }
        };
        let mars = radius_of("Mars");
        let jupiter = radius_of("Jupiter");
        let belt = radius_of("Main Asteroid Belt");
        assert!(belt > mars && belt < jupiter, "{mars} < {belt} < {jupiter}");
        let expected = mars + (jupiter - mars) * BELT_ANCHOR_FRACTION as f32;
        assert!((belt - expected).abs() < 1e-2);
    }

    #[test]
    fn belt_with_missing_anchor_falls_back_to_linear() {
        let catalog = Catalog::new(vec![
            planet("A", 1.0, 1.0),
            planet("B", 10.0, 2.0),
            belt("Lost Belt", "Vulcan", "B"),
        ]);
        let bounds = ScalePreset::Default.bounds();
        let layout = build_layout(&catalog, &bounds).unwrap();
        let (id, _) = catalog.find_by_name("Lost Belt").unwrap();
        let BodyLayout::Belt { orbit_radius, .. } = layout.get(id).unwrap() else {
            panic!("belt layout expected");
        };
        // Plain linear mapping of 2.7 AU at catalog index 2
        let expected = map_range(2.7, 1.0, 10.0, 250.0, 2000.0) + 2.0 * MINIMUM_ORBIT_SPACING;
        assert!((orbit_radius - expected as f32).abs() < 1e-2);
    }

    #[test]
    fn catalog_without_planets_is_an_error() {
        let catalog = Catalog::new(vec![belt("Only Belt", "Mars", "Jupiter")]);
        assert_eq!(
            build_layout(&catalog, &ScalePreset::Default.bounds()).unwrap_err(),
            LayoutError::EmptyCatalog
        );
    }

    #[test]
    fn single_planet_collapses_to_min_bounds() {
        let catalog = Catalog::new(vec![planet("Lonely", 4.0, 2.0)]);
        let bounds = ScalePreset::Default.bounds();
        let layout = build_layout(&catalog, &bounds).unwrap();
        let (id, _) = catalog.find_by_name("Lonely").unwrap();
        let BodyLayout::Planet { orbit_radius, size, .. } = layout.get(id).unwrap() else {
            panic!()
        };
        assert!((orbit_radius - bounds.min_orbit_radius as f32).abs() < 1e-3);
        assert!((size - bounds.min_planet_size as f32).abs() < 1e-3);
    }

    #[test]
    fn sizes_stay_within_bounds() {
        let bounds = ScalePreset::Dramatic.bounds();
        let layout = build_layout(&solar_system(), &bounds).unwrap();
        for (_, body_layout) in layout.iter() {
            if let BodyLayout::Planet { size, .. } = body_layout {
                assert!(*size >= bounds.min_planet_size as f32 - 1e-3);
                assert!(*size <= bounds.max_planet_size as f32 + 1e-3);
            }
        }
    }

    #[test]
    fn camera_defaults_track_orbit_bound() {
        let bounds = ScalePreset::Wide.bounds();
        let layout = build_layout(&solar_system(), &bounds).unwrap();
        let r = bounds.max_orbit_radius as f32;
        assert!((layout.camera.far - r * 3.0).abs() < 1e-3);
        assert!((layout.camera.fog_near - r * 0.5).abs() < 1e-3);
        assert!((layout.camera.fog_far - r * 2.0).abs() < 1e-3);
        assert!((layout.camera.position.y - r * 0.3).abs() < 1e-3);
        assert!((layout.camera.position.z - r * 0.6).abs() < 1e-3);
    }

    #[test]
    fn shell_extends_past_every_orbit() {
        let catalog = solar_system();
        let bounds = ScalePreset::Default.bounds();
        let layout = build_layout(&catalog, &bounds).unwrap();
        let (oort, _) = catalog.find_by_name("Oort Cloud").unwrap();
        let BodyLayout::Shell {
            inner_radius,
            outer_radius,
        } = layout.get(oort).unwrap()
        else {
            panic!("shell layout expected")
        };
        assert!(*inner_radius >= bounds.max_orbit_radius as f32);
        assert!(outer_radius > inner_radius);
    }

    #[test]
    fn moon_rides_its_parent_scale() {
        let catalog = solar_system();
        let layout = build_layout(&catalog, &ScalePreset::Default.bounds()).unwrap();
        let (earth, _) = catalog.find_by_name("Earth").unwrap();
        let (moon, _) = catalog.find_by_name("Moon").unwrap();
        let BodyLayout::Planet { size: earth_size, .. } = layout.get(earth).unwrap() else {
            panic!()
        };
        let BodyLayout::Moon {
            parent,
            orbit_radius,
            size,
        } = layout.get(moon).unwrap()
        else {
            panic!("moon layout expected")
        };
        assert_eq!(*parent, earth);
        assert!((orbit_radius - earth_size * 2.5).abs() < 1e-3);
        assert!((size - earth_size * 0.27).abs() < 1e-3);
    }
}
