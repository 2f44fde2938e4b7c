use crate::api::types::BodyId;
use crate::catalog::presets::ScalePreset;

/// Directional navigation keys available in free-roam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    MoveIn,
    MoveOut,
    OrbitLeft,
    OrbitRight,
    MoveUp,
    MoveDown,
}

impl NavKey {
    pub const ALL: [NavKey; 6] = [
        NavKey::MoveIn,
        NavKey::MoveOut,
        NavKey::OrbitLeft,
        NavKey::OrbitRight,
        NavKey::MoveUp,
        NavKey::MoveDown,
    ];

    /// Map a browser key code (W/S/A/D/E/Q) to a navigation key.
    pub fn from_key_code(code: u32) -> Option<NavKey> {
        match code {
            87 => Some(NavKey::MoveIn),    // W
            83 => Some(NavKey::MoveOut),   // S
            65 => Some(NavKey::OrbitLeft), // A
            68 => Some(NavKey::OrbitRight), // D
            69 => Some(NavKey::MoveUp),    // E
            81 => Some(NavKey::MoveDown),  // Q
            _ => None,
        }
    }

    /// Label for the on-screen key indicator.
    pub fn label(self) -> &'static str {
        match self {
            NavKey::MoveIn => "Move In",
            NavKey::MoveOut => "Move Out",
            NavKey::OrbitLeft => "Orbit Left",
            NavKey::OrbitRight => "Orbit Right",
            NavKey::MoveUp => "Move Up",
            NavKey::MoveDown => "Move Down",
        }
    }

    fn index(self) -> usize {
        match self {
            NavKey::MoveIn => 0,
            NavKey::MoveOut => 1,
            NavKey::OrbitLeft => 2,
            NavKey::OrbitRight => 3,
            NavKey::MoveUp => 4,
            NavKey::MoveDown => 5,
        }
    }
}

/// Input event types the simulation understands.
/// Host handlers only push events; all state mutation happens once per
/// frame when the simulation drains the queue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A body was clicked/selected.
    SelectBody { id: BodyId },
    /// Reset/cancel key — return the camera to its pre-selection pose.
    CancelSelection,
    /// Pointer moved over (or off) a body.
    Hover { id: Option<BodyId> },
    /// Global simulation speed multiplier (0 pauses).
    SetSpeed { multiplier: f32 },
    /// Orbit-radius multiplier.
    SetOrbitScale { factor: f32 },
    /// Swap the scale preset; rebuilds the visual layout.
    SetPreset { preset: ScalePreset },
    KeyDown { key: NavKey },
    KeyUp { key: NavKey },
    /// Pointer drag delta in pixels (free-roam rotate).
    PointerDrag { dx: f32, dy: f32 },
    /// Scroll/pinch delta (free-roam zoom).
    Scroll { delta: f32 },
}

/// A queue of input events.
/// The host writes events as they arrive; the simulation reads and drains
/// them once per frame tick.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Which directional keys are currently held.
/// Doubles as the data source for the on-screen input indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeySet {
    down: [bool; 6],
}

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: NavKey, down: bool) {
        self.down[key.index()] = down;
    }

    pub fn is_down(&self, key: NavKey) -> bool {
        self.down[key.index()]
    }

    /// Currently held keys, in a fixed order.
    pub fn active(&self) -> impl Iterator<Item = NavKey> + '_ {
        NavKey::ALL.iter().copied().filter(|k| self.is_down(*k))
    }

    pub fn any_down(&self) -> bool {
        self.down.iter().any(|d| *d)
    }

    pub fn clear(&mut self) {
        self.down = [false; 6];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::SelectBody { id: BodyId(3) });
        q.push(InputEvent::Scroll { delta: -2.0 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn key_codes_map_to_nav_keys() {
        assert_eq!(NavKey::from_key_code(87), Some(NavKey::MoveIn));
        assert_eq!(NavKey::from_key_code(81), Some(NavKey::MoveDown));
        assert_eq!(NavKey::from_key_code(32), None);
    }

    #[test]
    fn key_set_tracks_held_keys() {
        let mut keys = KeySet::new();
        keys.set(NavKey::MoveIn, true);
        keys.set(NavKey::OrbitLeft, true);
        assert!(keys.is_down(NavKey::MoveIn));
        assert!(!keys.is_down(NavKey::MoveOut));

        let active: Vec<_> = keys.active().collect();
        assert_eq!(active, vec![NavKey::MoveIn, NavKey::OrbitLeft]);

        keys.set(NavKey::MoveIn, false);
        assert!(!keys.is_down(NavKey::MoveIn));
    }

    #[test]
    fn clear_releases_everything() {
        let mut keys = KeySet::new();
        for key in NavKey::ALL {
            keys.set(key, true);
        }
        assert!(keys.any_down());
        keys.clear();
        assert!(!keys.any_down());
    }
}
