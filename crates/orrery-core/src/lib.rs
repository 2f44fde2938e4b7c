pub mod api;
pub mod catalog;
pub mod core;
pub mod extensions;
pub mod input;
pub mod settings;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::frame::{
    BeltField, BeltParticle, BodyInstance, FramePositions, OrbitPath, RenderFrame, ShellField,
};
pub use api::sim::Orrery;
pub use api::types::BodyId;
pub use catalog::presets::{solar_system, ScalePreset};
pub use catalog::{BodyKind, Catalog, CatalogError, CelestialBody};
pub use core::rng::Rng;
pub use core::store::{Selection, SelectionStore};
pub use core::time::FrameClock;
pub use input::queue::{InputEvent, InputQueue, KeySet, NavKey};
pub use settings::SimulationSettings;
pub use systems::camera::{BodyTracker, CameraMode, CameraPose, CameraRig};
pub use systems::motion::{MotionState, OrbitalState, PERIOD_SCALE_FACTOR};
pub use systems::orbit::{FlatPoint, OrbitError, RibbonMesh};
pub use systems::scale::{
    build_layout, map_range, BodyLayout, CameraDefaults, LayoutError, ScaleBounds, VisualLayout,
    MINIMUM_ORBIT_SPACING,
};

// Extensions — decoupled optional helpers
pub use extensions::{ease, ease_vec3, lerp, lerp_vec3, Easing};
