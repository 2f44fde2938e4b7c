//! Body catalog — the immutable registry of celestial bodies.
//!
//! Constructed once at startup (or parsed from JSON when the host swaps
//! layouts) and never mutated afterwards; every downstream system reads it
//! by `BodyId`. Malformed entries are dropped at load time with a warning
//! so one bad body cannot take down the whole sky.

pub mod presets;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::types::BodyId;
use crate::systems::orbit;

/// One entry in the catalog. Real astronomical measurements only —
/// nothing here is in renderable units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CelestialBody {
    pub name: String,
    /// Linear RGB in [0, 1].
    pub color: [f32; 3],
    #[serde(flatten)]
    pub kind: BodyKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BodyKind {
    Planet {
        /// Mean distance from the sun in AU.
        orbit_radius_au: f64,
        /// Orbital period in Earth years.
        period_years: f32,
        /// 0 = circle; must stay below 1 for a closed ellipse.
        eccentricity: f32,
        /// Diameter relative to Earth (Earth = 1).
        size_rel: f64,
        /// Reflectivity in [0, 1]; forwarded to the renderer's lighting.
        albedo: f32,
    },
    Moon {
        /// Name of the planet this moon orbits.
        parent: String,
        /// Orbit radius as a multiple of the parent's visual size.
        orbit_radius_rel: f32,
        /// Orbital period in Earth years. Negative = retrograde.
        period_years: f32,
        /// Size as a fraction of the parent's visual size.
        size_rel: f32,
    },
    AsteroidBelt {
        /// Mean distance of the belt's centerline in AU.
        orbit_radius_au: f64,
        /// Radial extent in AU.
        width_au: f64,
        particle_count: u32,
        /// Planets the belt sits between; placement interpolates their
        /// already-scaled orbit radii.
        inner_anchor: String,
        outer_anchor: String,
    },
    OortCloud {
        particle_count: u32,
    },
}

impl CelestialBody {
    pub fn is_planet(&self) -> bool {
        matches!(self.kind, BodyKind::Planet { .. })
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The loaded, validated catalog. `BodyId`s index into catalog order.
#[derive(Debug, Clone)]
pub struct Catalog {
    bodies: Vec<CelestialBody>,
}

impl Catalog {
    /// Build a catalog, dropping entries with impossible orbital
    /// parameters. Dropping is per-entry: the rest of the catalog loads.
    pub fn new(bodies: Vec<CelestialBody>) -> Self {
        let bodies = bodies
            .into_iter()
            .filter(|body| match validate(body) {
                Ok(()) => true,
                Err(reason) => {
                    warn!("catalog: skipping {:?}: {reason}", body.name);
                    false
                }
            })
            .collect();
        Self { bodies }
    }

    /// Parse a catalog from a JSON array of bodies.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let bodies: Vec<CelestialBody> = serde_json::from_str(json)?;
        Ok(Self::new(bodies))
    }

    pub fn get(&self, id: BodyId) -> Option<&CelestialBody> {
        self.bodies.get(id.index())
    }

    /// Iterate in catalog order with stable ids.
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &CelestialBody)> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(i, body)| (BodyId(i as u32), body))
    }

    pub fn find_by_name(&self, name: &str) -> Option<(BodyId, &CelestialBody)> {
        self.iter().find(|(_, body)| body.name == name)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Number of planet entries (the kind that establishes scale bounds).
    pub fn planet_count(&self) -> usize {
        self.bodies.iter().filter(|b| b.is_planet()).count()
    }
}

fn validate(body: &CelestialBody) -> Result<(), String> {
    match &body.kind {
        BodyKind::Planet {
            orbit_radius_au,
            eccentricity,
            period_years,
            size_rel,
            ..
        } => {
            orbit::validate_orbit(*orbit_radius_au as f32, *eccentricity)
                .map_err(|e| e.to_string())?;
            if *period_years <= 0.0 {
                return Err(format!("period {period_years} must be positive"));
            }
            if *size_rel <= 0.0 {
                return Err(format!("size {size_rel} must be positive"));
            }
            Ok(())
        }
        BodyKind::Moon {
            orbit_radius_rel,
            period_years,
            size_rel,
            ..
        } => {
            if *orbit_radius_rel <= 0.0 {
                return Err(format!("orbit radius {orbit_radius_rel} must be positive"));
            }
            if *period_years == 0.0 {
                return Err("period must be non-zero".into());
            }
            if *size_rel <= 0.0 {
                return Err(format!("size {size_rel} must be positive"));
            }
            Ok(())
        }
        BodyKind::AsteroidBelt {
            orbit_radius_au,
            width_au,
            particle_count,
            ..
        } => {
            if *orbit_radius_au <= 0.0 {
                return Err(format!("orbit radius {orbit_radius_au} must be positive"));
            }
            if *width_au < 0.0 {
                return Err(format!("width {width_au} must be non-negative"));
            }
            if *particle_count == 0 {
                return Err("particle count must be positive".into());
            }
            Ok(())
        }
        BodyKind::OortCloud { particle_count } => {
            if *particle_count == 0 {
                return Err("particle count must be positive".into());
            }
            Ok(())
        }
    }
}
