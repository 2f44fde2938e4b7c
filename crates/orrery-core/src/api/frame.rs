//! Per-frame outputs consumed by the rendering layer.
//!
//! The renderer owns no geometry math: it receives finished world-space
//! positions, cached orbit polylines, particle fields, and one camera pose.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::api::types::BodyId;
use crate::core::rng::Rng;
use crate::systems::camera::{BodyTracker, CameraPose};

/// One renderable sphere, laid out for direct GPU upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    pub position: [f32; 3],
    pub radius: f32,
    pub color: [f32; 3],
    pub albedo: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 8;
}

/// Everything the renderer needs for one frame. Instances and ids are
/// parallel arrays in catalog order.
#[derive(Debug, Clone)]
pub struct RenderFrame {
    pub ids: Vec<BodyId>,
    pub instances: Vec<BodyInstance>,
    pub camera: CameraPose,
}

/// A closed orbit polyline, cached per layout build.
#[derive(Debug, Clone)]
pub struct OrbitPath {
    pub body: BodyId,
    pub points: Vec<Vec3>,
}

/// Current world positions and visual sizes, rebuilt every frame.
/// The camera rig reads targets through this snapshot instead of holding
/// renderer objects.
#[derive(Debug, Default)]
pub struct FramePositions {
    entries: Vec<(BodyId, Vec3, f32)>,
}

impl FramePositions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn push(&mut self, id: BodyId, position: Vec3, size: f32) {
        self.entries.push((id, position, size));
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, Vec3, f32)> + '_ {
        self.entries.iter().copied()
    }
}

impl BodyTracker for FramePositions {
    fn position_of(&self, id: BodyId) -> Option<Vec3> {
        self.entries
            .iter()
            .find(|(entry, _, _)| *entry == id)
            .map(|(_, position, _)| *position)
    }

    fn size_of(&self, id: BodyId) -> Option<f32> {
        self.entries
            .iter()
            .find(|(entry, _, _)| *entry == id)
            .map(|(_, _, size)| *size)
    }
}

/// One asteroid in a belt field. Static jitter; only the belt's shared
/// phase advances frame to frame.
#[derive(Debug, Clone, Copy)]
pub struct BeltParticle {
    /// Base angle around the belt, degrees.
    pub angle_deg: f32,
    /// Orbit radius with radial jitter applied.
    pub radius: f32,
    /// Vertical offset out of the belt plane.
    pub y: f32,
    /// Individual angular rate relative to the belt's shared phase.
    pub spin: f32,
    /// Render scale multiplier.
    pub scale: f32,
}

/// Deterministic particle cloud for an asteroid belt.
#[derive(Debug, Clone)]
pub struct BeltField {
    pub body: BodyId,
    particles: Vec<BeltParticle>,
}

impl BeltField {
    /// Scatter `count` particles across the belt annulus. Radial and
    /// vertical jitter are uniform; every call with the same seed
    /// reproduces the same field.
    pub fn generate(body: BodyId, orbit_radius: f32, width: f32, count: u32, rng: &mut Rng) -> Self {
        let mut particles = Vec::with_capacity(count as usize);
        for _ in 0..count {
            particles.push(BeltParticle {
                angle_deg: rng.range_f32(0.0, 360.0),
                radius: orbit_radius + rng.range_f32(-0.5, 0.5) * width,
                y: rng.range_f32(-0.25, 0.25) * width,
                spin: rng.range_f32(0.8, 1.2),
                scale: rng.range_f32(0.5, 2.0),
            });
        }
        Self { body, particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[BeltParticle] {
        &self.particles
    }

    /// World position of one particle at the belt's current phase.
    pub fn particle_position(&self, index: usize, phase_deg: f32) -> Vec3 {
        let p = &self.particles[index];
        let angle = (p.angle_deg + phase_deg * p.spin).to_radians();
        Vec3::new(angle.cos() * p.radius, p.y, angle.sin() * p.radius)
    }
}

/// Spherical particle shell (Oort cloud). Static points; the renderer
/// applies the shell's slow drift phase as one rotation about +Y.
#[derive(Debug, Clone)]
pub struct ShellField {
    pub body: BodyId,
    points: Vec<Vec3>,
}

impl ShellField {
    /// Uniform-by-volume scatter between two radii: the cube root pushes
    /// samples outward so density does not pile up at the inner surface.
    pub fn generate(body: BodyId, inner_radius: f32, outer_radius: f32, count: u32, rng: &mut Rng) -> Self {
        let mut points = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let theta = rng.range_f32(0.0, std::f32::consts::TAU);
            let phi = rng.range_f32(0.0, std::f32::consts::TAU);
            let r = rng.next_f32().cbrt() * (outer_radius - inner_radius) + inner_radius;
            points.push(Vec3::new(
                r * phi.sin() * theta.cos(),
                r * phi.sin() * theta.sin(),
                r * phi.cos(),
            ));
        }
        Self { body, points }
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
