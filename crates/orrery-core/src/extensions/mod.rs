// extensions/mod.rs
//
// Optional extension modules, decoupled from the simulation core.

pub mod easing;

pub use easing::{ease, ease_vec3, lerp, lerp_vec3, Easing};
