use serde::{Deserialize, Serialize};

/// User-adjustable simulation settings.
/// Passed explicitly to the systems that consume them — there is no
/// ambient global store, so tests can run with any combination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationSettings {
    /// Global speed multiplier. 0 pauses every orbit; typical values
    /// are 0.5, 1, 2, 5 but any non-negative rate is accepted.
    pub speed_multiplier: f32,
    /// Multiplier on every visual orbit radius (0.1 … 5 in the UI).
    pub orbit_scale: f32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            speed_multiplier: 1.0,
            orbit_scale: 1.0,
        }
    }
}

impl SimulationSettings {
    /// Set the speed multiplier. Negative rates are clamped to 0 (pause).
    pub fn set_speed(&mut self, multiplier: f32) {
        self.speed_multiplier = multiplier.max(0.0);
    }

    /// Set the orbit-radius multiplier. Clamped to a sane positive range.
    pub fn set_orbit_scale(&mut self, factor: f32) {
        self.orbit_scale = factor.clamp(0.01, 100.0);
    }

    pub fn is_paused(&self) -> bool {
        self.speed_multiplier == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_unit_rates() {
        let s = SimulationSettings::default();
        assert_eq!(s.speed_multiplier, 1.0);
        assert_eq!(s.orbit_scale, 1.0);
        assert!(!s.is_paused());
    }

    #[test]
    fn negative_speed_clamps_to_pause() {
        let mut s = SimulationSettings::default();
        s.set_speed(-3.0);
        assert_eq!(s.speed_multiplier, 0.0);
        assert!(s.is_paused());
    }

    #[test]
    fn orbit_scale_rejects_zero() {
        let mut s = SimulationSettings::default();
        s.set_orbit_scale(0.0);
        assert!(s.orbit_scale > 0.0);
    }
}
