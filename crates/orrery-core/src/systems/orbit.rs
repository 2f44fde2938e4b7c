//! Elliptical orbit geometry — pure math, no simulation dependencies.
//!
//! Angles are degrees at the API boundary and radians internally. All
//! positions are focus-centered: the sun sits at one focus of the ellipse,
//! so `x = a·cosθ − c` rather than the center-centered `a·cosθ`.

use glam::{Vec2, Vec3};
use thiserror::Error;

const DEG_TO_RAD: f32 = std::f32::consts::PI / 180.0;

/// Perspective constant for the flat (2D/SVG) projection:
/// scale = k / (k + depth).
const PERSPECTIVE_K: f32 = 1000.0;

/// Sampling step for thin orbit lines.
pub const PATH_STEP_DEG: f32 = 5.0;
/// Finer step required when the line is extruded to visible thickness.
pub const RIBBON_STEP_DEG: f32 = 1.0;

#[derive(Debug, Error, PartialEq)]
pub enum OrbitError {
    #[error("eccentricity {0} is outside [0, 1) — open orbits are not representable")]
    OpenOrbit(f32),
    #[error("orbit radius {0} must be positive")]
    NonPositiveRadius(f32),
    #[error("orbit path needs at least 3 points, got {0}")]
    DegeneratePath(usize),
    #[error("ribbon thickness {0} must be positive")]
    NonPositiveThickness(f32),
}

/// Check that (radius, eccentricity) describe a closed, non-degenerate
/// ellipse. The catalog runs this at load time so the per-frame position
/// functions can stay infallible.
pub fn validate_orbit(radius: f32, eccentricity: f32) -> Result<(), OrbitError> {
    if !(radius > 0.0) {
        return Err(OrbitError::NonPositiveRadius(radius));
    }
    if !(0.0..1.0).contains(&eccentricity) {
        return Err(OrbitError::OpenOrbit(eccentricity));
    }
    Ok(())
}

/// Semi-minor axis from semi-major axis and eccentricity.
#[inline]
pub fn semi_minor(radius: f32, eccentricity: f32) -> f32 {
    radius * (1.0 - eccentricity * eccentricity).sqrt()
}

/// Position on the orbital plane (y = 0) for a given phase angle.
/// `radius` is the semi-major axis in visual units.
pub fn position(phase_deg: f32, radius: f32, eccentricity: f32) -> Vec3 {
    let theta = phase_deg * DEG_TO_RAD;
    let a = radius;
    let b = semi_minor(radius, eccentricity);
    let c = a * eccentricity;
    Vec3::new(a * theta.cos() - c, 0.0, b * theta.sin())
}

/// A projected point for flat (2D/SVG) renderings that fake depth with a
/// tilted ellipse and perspective attenuation.
#[derive(Debug, Clone, Copy)]
pub struct FlatPoint {
    /// Untransformed planar coordinates.
    pub x: f32,
    pub y: f32,
    /// Signed depth behind (+) or in front of (−) the screen plane.
    pub depth: f32,
    /// Perspective factor in (0, 1]; also drives opacity/stroke width.
    pub scale: f32,
}

impl FlatPoint {
    /// Screen-space coordinates with perspective applied.
    pub fn screen(&self) -> Vec2 {
        Vec2::new(self.x * self.scale, self.y * self.scale)
    }
}

/// Project an orbital position onto a flat canvas. `tilt_rad` leans the
/// orbital plane toward the viewer; the minor-axis component splits into a
/// visible y offset and a depth term that feeds the perspective factor.
pub fn project_flat(phase_deg: f32, radius: f32, eccentricity: f32, tilt_rad: f32) -> FlatPoint {
    let theta = phase_deg * DEG_TO_RAD;
    let a = radius;
    let b = semi_minor(radius, eccentricity);
    let c = a * eccentricity;

    let x = a * theta.cos() - c;
    let lateral = b * theta.sin();
    let y = lateral * tilt_rad.cos();
    let depth = lateral * tilt_rad.sin();
    let scale = PERSPECTIVE_K / (PERSPECTIVE_K + depth);

    FlatPoint { x, y, depth, scale }
}

/// Sample the full ellipse as a closed polyline: the final point lands back
/// on θ = 0, so `first ≈ last` within float tolerance.
pub fn sample_path(radius: f32, eccentricity: f32, step_deg: f32) -> Vec<Vec3> {
    let step = step_deg.max(0.1);
    let segments = (360.0 / step).ceil() as usize;
    let mut points = Vec::with_capacity(segments + 1);
    for i in 0..=segments {
        let phase = (i as f32 * step).min(360.0);
        points.push(position(phase, radius, eccentricity));
    }
    points
}

/// Flat-projected counterpart of [`sample_path`] for 2D/SVG renderings:
/// a closed loop of projected points carrying their own perspective
/// factors.
pub fn sample_flat_path(
    radius: f32,
    eccentricity: f32,
    tilt_rad: f32,
    step_deg: f32,
) -> Vec<FlatPoint> {
    let step = step_deg.max(0.1);
    let segments = (360.0 / step).ceil() as usize;
    let mut points = Vec::with_capacity(segments + 1);
    for i in 0..=segments {
        let phase = (i as f32 * step).min(360.0);
        points.push(project_flat(phase, radius, eccentricity, tilt_rad));
    }
    points
}

/// Triangle mesh for an orbit ring extruded to visible thickness.
#[derive(Debug, Clone)]
pub struct RibbonMesh {
    pub vertices: Vec<Vec3>,
    pub indices: Vec<u32>,
}

/// Extrude a closed orbit polyline into a flat ribbon in the orbital plane.
/// Each sample becomes two vertices offset ± half the thickness along the
/// in-plane perpendicular of the local tangent; consecutive pairs are
/// stitched into quads, wrapping back to the start.
pub fn extrude_ribbon(path: &[Vec3], thickness: f32) -> Result<RibbonMesh, OrbitError> {
    if thickness <= 0.0 {
        return Err(OrbitError::NonPositiveThickness(thickness));
    }
    // Drop a duplicated closing point so wrap-around tangents are sane.
    let closed = path.len() >= 2
        && path[0].distance_squared(path[path.len() - 1]) < 1e-6;
    let points = if closed { &path[..path.len() - 1] } else { path };
    if points.len() < 3 {
        return Err(OrbitError::DegeneratePath(path.len()));
    }

    let n = points.len();
    let half = thickness * 0.5;
    let mut vertices = Vec::with_capacity(n * 2);
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let next = points[(i + 1) % n];
        let tangent = (next - prev).normalize_or_zero();
        // Perpendicular within the orbital plane (plane normal is +Y)
        let perp = tangent.cross(Vec3::Y).normalize_or_zero();
        vertices.push(points[i] + perp * half);
        vertices.push(points[i] - perp * half);
    }

    let mut indices = Vec::with_capacity(n * 6);
    for i in 0..n {
        let a = (i * 2) as u32;
        let b = a + 1;
        let c = ((i + 1) % n * 2) as u32;
        let d = c + 1;
        indices.extend_from_slice(&[a, b, c, b, d, c]);
    }

    Ok(RibbonMesh { vertices, indices })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circular_quarter_turn() {
        let p = position(90.0, 100.0, 0.0);
        assert!(p.x.abs() < 1e-4, "x = {}", p.x);
        assert!((p.z - 100.0).abs() < 1e-4, "z = {}", p.z);
    }

    #[test]
    fn ellipse_closes_on_itself() {
        for ecc in [0.0, 0.2, 0.5, 0.9, 0.98] {
            let start = position(0.0, 500.0, ecc);
            let end = position(360.0, 500.0, ecc);
            assert!(start.distance(end) < 1e-3, "e = {ecc}: gap {}", start.distance(end));
        }
    }

    #[test]
    fn sun_sits_at_a_focus() {
        // At θ=0 the body is at perihelion: distance a·(1−e) from origin.
        let p = position(0.0, 100.0, 0.5);
        assert!((p.x - 50.0).abs() < 1e-4);
        // At θ=180 it is at aphelion: a·(1+e).
        let p = position(180.0, 100.0, 0.5);
        assert!((p.x + 150.0).abs() < 1e-3);
    }

    #[test]
    fn validate_rejects_open_orbits() {
        assert_eq!(validate_orbit(100.0, 1.0), Err(OrbitError::OpenOrbit(1.0)));
        assert_eq!(validate_orbit(100.0, -0.1), Err(OrbitError::OpenOrbit(-0.1)));
        assert_eq!(
            validate_orbit(0.0, 0.5),
            Err(OrbitError::NonPositiveRadius(0.0))
        );
        assert!(validate_orbit(100.0, 0.99).is_ok());
    }

    #[test]
    fn flat_projection_shrinks_far_side() {
        let tilt = 1.0;
        // sin(θ) > 0 → behind the screen plane → scale < 1
        let behind = project_flat(90.0, 100.0, 0.0, tilt);
        assert!(behind.depth > 0.0);
        assert!(behind.scale < 1.0);
        // sin(θ) < 0 → in front → scale > 1
        let front = project_flat(270.0, 100.0, 0.0, tilt);
        assert!(front.depth < 0.0);
        assert!(front.scale > 1.0);
    }

    #[test]
    fn flat_projection_with_zero_tilt_is_planar() {
        let p = project_flat(45.0, 100.0, 0.1, 0.0);
        assert_eq!(p.depth, 0.0);
        assert_eq!(p.scale, 1.0);
        let planar = position(45.0, 100.0, 0.1);
        assert!((p.x - planar.x).abs() < 1e-4);
        assert!((p.y - planar.z).abs() < 1e-4);
    }

    #[test]
    fn path_is_closed() {
        let path = sample_path(300.0, 0.3, PATH_STEP_DEG);
        let first = path[0];
        let last = *path.last().unwrap();
        assert!(first.distance(last) < 1e-3);
        // 5° steps → 72 segments + closing point
        assert_eq!(path.len(), 73);
    }

    #[test]
    fn flat_path_closes_like_the_3d_path() {
        let path = sample_flat_path(300.0, 0.2, 0.8, PATH_STEP_DEG);
        assert_eq!(path.len(), 73);
        let first = path[0].screen();
        let last = path.last().unwrap().screen();
        assert!(first.distance(last) < 1e-3);
    }

    #[test]
    fn ribbon_has_two_verts_per_sample_and_wraps() {
        let path = sample_path(200.0, 0.0, RIBBON_STEP_DEG);
        let ribbon = extrude_ribbon(&path, 2.0).unwrap();
        let samples = path.len() - 1; // closing point merged
        assert_eq!(ribbon.vertices.len(), samples * 2);
        assert_eq!(ribbon.indices.len(), samples * 6);
        // All offsets stay in the orbital plane
        for v in &ribbon.vertices {
            assert!(v.y.abs() < 1e-4);
        }
        // Offset pairs straddle the path at the ribbon width
        let d = ribbon.vertices[0].distance(ribbon.vertices[1]);
        assert!((d - 2.0).abs() < 1e-3);
    }

    #[test]
    fn ribbon_rejects_bad_input() {
        let path = sample_path(200.0, 0.0, PATH_STEP_DEG);
        assert!(matches!(
            extrude_ribbon(&path, 0.0),
            Err(OrbitError::NonPositiveThickness(_))
        ));
        let two_points = [Vec3::ZERO, Vec3::X];
        assert!(matches!(
            extrude_ribbon(&two_points, 1.0),
            Err(OrbitError::DegeneratePath(2))
        ));
    }
}
