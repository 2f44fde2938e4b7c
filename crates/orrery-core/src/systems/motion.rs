//! Animation driver — advances every body's orbital phase each frame.
//!
//! Phases are independent per body and fed by one wall-clock delta, so
//! there is nothing to drift apart: pausing (multiplier 0) and resuming
//! costs nothing beyond ordinary float accumulation.

use crate::api::types::BodyId;
use crate::catalog::{BodyKind, Catalog};
use crate::core::rng::Rng;
use crate::settings::SimulationSettings;

/// Compresses real orbital periods into a watchable cadence: a body with a
/// 1-year period completes a visual orbit in 8 seconds at multiplier 1.
pub const PERIOD_SCALE_FACTOR: f32 = 8.0;

/// Belts have no catalog period; they drift like a slow outer body.
const BELT_PERIOD_YEARS: f32 = 80.0;
/// The outer shell barely moves at all.
const SHELL_PERIOD_YEARS: f32 = 400.0;

/// Current angular position along the orbit, degrees in [0, 360).
#[derive(Debug, Clone, Copy)]
pub struct OrbitalState {
    pub phase_deg: f32,
}

/// Owns every body's `OrbitalState`. Written once per frame; everything
/// else reads phases through [`MotionState::phase`].
#[derive(Debug)]
pub struct MotionState {
    bodies: Vec<(BodyId, OrbitalState, f32)>,
}

impl MotionState {
    /// Initialize from a catalog with uniformly random starting phases so
    /// bodies do not begin aligned in a grand conjunction.
    pub fn new(catalog: &Catalog, rng: &mut Rng) -> Self {
        let bodies = catalog
            .iter()
            .map(|(id, body)| {
                let period = match &body.kind {
                    BodyKind::Planet { period_years, .. } => *period_years,
                    BodyKind::Moon { period_years, .. } => *period_years,
                    BodyKind::AsteroidBelt { .. } => BELT_PERIOD_YEARS,
                    BodyKind::OortCloud { .. } => SHELL_PERIOD_YEARS,
                };
                let state = OrbitalState {
                    phase_deg: rng.range_f32(0.0, 360.0),
                };
                (id, state, period)
            })
            .collect();
        Self { bodies }
    }

    /// Advance every phase by one frame:
    /// `phase += 360 / (period · PERIOD_SCALE_FACTOR) · speed · dt`,
    /// wrapped into [0, 360). A negative period (retrograde moon) runs the
    /// phase backwards; the wrap keeps it in range either way.
    pub fn advance(&mut self, dt: f32, settings: &SimulationSettings) {
        let speed = settings.speed_multiplier;
        if speed == 0.0 || dt == 0.0 {
            return;
        }
        for (_, state, period) in &mut self.bodies {
            let rate = 360.0 / (*period * PERIOD_SCALE_FACTOR);
            state.phase_deg = (state.phase_deg + rate * speed * dt).rem_euclid(360.0);
        }
    }

    pub fn phase(&self, id: BodyId) -> Option<f32> {
        self.bodies
            .iter()
            .find(|(body_id, _, _)| *body_id == id)
            .map(|(_, state, _)| state.phase_deg)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::presets::solar_system;

    fn fixed_settings(speed: f32) -> SimulationSettings {
        SimulationSettings {
            speed_multiplier: speed,
            orbit_scale: 1.0,
        }
    }

    #[test]
    fn phases_start_inside_range() {
        let catalog = solar_system();
        let mut rng = Rng::new(42);
        let motion = MotionState::new(&catalog, &mut rng);
        for (id, _) in catalog.iter() {
            let phase = motion.phase(id).unwrap();
            assert!((0.0..360.0).contains(&phase), "phase {phase}");
        }
    }

    #[test]
    fn zero_speed_freezes_every_phase() {
        let catalog = solar_system();
        let mut rng = Rng::new(42);
        let mut motion = MotionState::new(&catalog, &mut rng);
        let before: Vec<_> = catalog.iter().map(|(id, _)| motion.phase(id)).collect();

        for _ in 0..1000 {
            motion.advance(1.0 / 60.0, &fixed_settings(0.0));
        }

        let after: Vec<_> = catalog.iter().map(|(id, _)| motion.phase(id)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn phase_stays_wrapped_after_long_runs() {
        let catalog = solar_system();
        let mut rng = Rng::new(7);
        let mut motion = MotionState::new(&catalog, &mut rng);

        // Fast-forward hard: big dt, big multiplier
        for _ in 0..10_000 {
            motion.advance(0.25, &fixed_settings(5.0));
        }
        for (id, _) in catalog.iter() {
            let phase = motion.phase(id).unwrap();
            assert!((0.0..360.0).contains(&phase), "phase {phase} escaped range");
        }
    }

    #[test]
    fn shorter_period_moves_faster() {
        let catalog = solar_system();
        let mut rng = Rng::new(1);
        let mut motion = MotionState::new(&catalog, &mut rng);
        let (mercury, _) = catalog.find_by_name("Mercury").unwrap();
        let (neptune, _) = catalog.find_by_name("Neptune").unwrap();

        let m0 = motion.phase(mercury).unwrap();
        let n0 = motion.phase(neptune).unwrap();
        motion.advance(0.1, &fixed_settings(1.0));
        let dm = (motion.phase(mercury).unwrap() - m0).rem_euclid(360.0);
        let dn = (motion.phase(neptune).unwrap() - n0).rem_euclid(360.0);
        assert!(dm > dn, "Mercury {dm} should outpace Neptune {dn}");
    }

    #[test]
    fn pause_and_resume_continues_from_same_phase() {
        let catalog = solar_system();
        let mut rng = Rng::new(3);
        let mut motion = MotionState::new(&catalog, &mut rng);
        let (earth, _) = catalog.find_by_name("Earth").unwrap();

        motion.advance(1.0, &fixed_settings(1.0));
        let paused_at = motion.phase(earth).unwrap();
        motion.advance(100.0, &fixed_settings(0.0));
        assert_eq!(motion.phase(earth).unwrap(), paused_at);

        motion.advance(1.0, &fixed_settings(1.0));
        let expected = (paused_at + 360.0 / (1.0 * PERIOD_SCALE_FACTOR)).rem_euclid(360.0);
        assert!((motion.phase(earth).unwrap() - expected).abs() < 1e-3);
    }

    #[test]
    fn retrograde_moon_runs_backwards() {
        use crate::catalog::{BodyKind, Catalog, CelestialBody};
        let catalog = Catalog::new(vec![
            CelestialBody {
                name: "Host".into(),
                color: [0.5; 3],
                kind: BodyKind::Planet {
                    orbit_radius_au: 1.0,
                    period_years: 1.0,
                    eccentricity: 0.0,
                    size_rel: 1.0,
                    albedo: 0.3,
                },
            },
            CelestialBody {
                name: "Backward".into(),
                color: [0.5; 3],
                kind: BodyKind::Moon {
                    parent: "Host".into(),
                    orbit_radius_rel: 2.0,
                    period_years: -0.1,
                    size_rel: 0.3,
                },
            },
        ]);
        let mut rng = Rng::new(5);
        let mut motion = MotionState::new(&catalog, &mut rng);
        let (moon, _) = catalog.find_by_name("Backward").unwrap();
        let before = motion.phase(moon).unwrap();
        motion.advance(0.001, &fixed_settings(1.0));
        let after = motion.phase(moon).unwrap();
        let delta = (after - before + 180.0).rem_euclid(360.0) - 180.0;
        assert!(delta < 0.0, "expected retrograde motion, got {delta}");
        assert!((0.0..360.0).contains(&after));
    }
}
