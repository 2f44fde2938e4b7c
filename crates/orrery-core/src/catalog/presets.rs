//! Built-in solar-system data and the named scale presets.
//!
//! Distances in AU, periods in Earth years, sizes as diameters relative to
//! Earth. Presets differ only in the scale converter's output bounds —
//! the astronomical data underneath is always the same.

use serde::{Deserialize, Serialize};

use super::{BodyKind, Catalog, CelestialBody};
use crate::systems::scale::ScaleBounds;

/// Named bound sets for the scale converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalePreset {
    #[default]
    Default,
    Dramatic,
    Wide,
    Realistic,
}

impl ScalePreset {
    pub fn bounds(self) -> ScaleBounds {
        match self {
            ScalePreset::Default | ScalePreset::Realistic => ScaleBounds {
                min_planet_size: 6.0,
                max_planet_size: 45.0,
                min_orbit_radius: 250.0,
                max_orbit_radius: 2000.0,
            },
            ScalePreset::Dramatic => ScaleBounds {
                min_planet_size: 8.0,
                max_planet_size: 60.0,
                min_orbit_radius: 300.0,
                max_orbit_radius: 2500.0,
            },
            ScalePreset::Wide => ScaleBounds {
                min_planet_size: 8.0,
                max_planet_size: 60.0,
                min_orbit_radius: 400.0,
                max_orbit_radius: 3000.0,
            },
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "default" => Some(ScalePreset::Default),
            "dramatic" => Some(ScalePreset::Dramatic),
            "wide" => Some(ScalePreset::Wide),
            "realistic" => Some(ScalePreset::Realistic),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ScalePreset::Default => "default",
            ScalePreset::Dramatic => "dramatic",
            ScalePreset::Wide => "wide",
            ScalePreset::Realistic => "realistic",
        }
    }
}

fn planet(
    name: &str,
    color: [f32; 3],
    orbit_radius_au: f64,
    period_years: f32,
    eccentricity: f32,
    size_rel: f64,
    albedo: f32,
) -> CelestialBody {
    CelestialBody {
        name: name.into(),
        color,
        kind: BodyKind::Planet {
            orbit_radius_au,
            period_years,
            eccentricity,
            size_rel,
            albedo,
        },
    }
}

/// The eight planets, Earth's moon, the main belt, and the Oort cloud.
pub fn solar_system() -> Catalog {
    Catalog::new(vec![
        // Mercury — most eccentric of the planets, very low reflectivity
        planet("Mercury", [0.63, 0.32, 0.18], 0.387, 0.24, 0.205, 0.383, 0.12),
        // Venus — nearly circular orbit, highest albedo (cloud cover)
        planet("Venus", [0.87, 0.72, 0.53], 0.723, 0.62, 0.007, 0.950, 0.75),
        planet("Earth", [0.25, 0.41, 0.88], 1.0, 1.0, 0.017, 1.0, 0.31),
        CelestialBody {
            name: "Moon".into(),
            color: [0.70, 0.70, 0.70],
            kind: BodyKind::Moon {
                parent: "Earth".into(),
                orbit_radius_rel: 2.5,
                period_years: 0.0748, // 27.32 days
                size_rel: 0.27,
            },
        },
        planet("Mars", [0.80, 0.52, 0.25], 1.524, 1.88, 0.093, 0.532, 0.25),
        CelestialBody {
            name: "Main Asteroid Belt".into(),
            color: [0.40, 0.40, 0.40],
            kind: BodyKind::AsteroidBelt {
                // Roughly 2.2 AU to 3.2 AU
                orbit_radius_au: 2.7,
                width_au: 1.0,
                particle_count: 10_000,
                inner_anchor: "Mars".into(),
                outer_anchor: "Jupiter".into(),
            },
        },
        planet("Jupiter", [0.87, 0.72, 0.53], 5.203, 11.86, 0.048, 10.97, 0.52),
        planet("Saturn", [0.96, 0.64, 0.38], 9.537, 29.46, 0.054, 9.14, 0.47),
        planet("Uranus", [0.53, 0.81, 0.92], 19.191, 84.01, 0.047, 3.98, 0.51),
        planet("Neptune", [0.12, 0.56, 1.0], 30.069, 164.79, 0.009, 3.86, 0.41),
        CelestialBody {
            name: "Oort Cloud".into(),
            color: [0.69, 0.77, 0.87],
            kind: BodyKind::OortCloud {
                particle_count: 12_000,
            },
        },
    ])
}
