//! Camera navigation state machine.
//!
//! Three modes: free-roam under direct user control, an eased flight toward
//! a selected body, and an orbit-follow that circles the body's *current*
//! position. Selecting captures the free-roam pose; cancelling flies back
//! to it. Free-roam inputs are ignored outside free-roam, and a target that
//! disappears mid-flight or mid-orbit fails safe back to free-roam.

use glam::{Vec2, Vec3};
use log::warn;

use crate::api::types::BodyId;
use crate::extensions::easing::{lerp_vec3, Easing};
use crate::input::queue::{KeySet, NavKey};
use crate::systems::scale::CameraDefaults;

/// Seconds to fly from the current pose to a selected body.
const FLIGHT_DURATION: f32 = 2.5;
/// Seconds to fly back to the captured pose on cancel.
const RETURN_DURATION: f32 = 1.8;
const FLIGHT_EASING: Easing = Easing::QuartOut;
/// Mid-path vertical lift as a fraction of the travel distance.
const FLIGHT_LIFT_FACTOR: f32 = 0.15;

/// Orbit-follow camera distance, as a multiple of the body's visual size.
const ORBIT_DISTANCE_FACTOR: f32 = 4.0;
/// Height above the orbital plane while following, same unit.
const ORBIT_HEIGHT_FACTOR: f32 = 1.5;
/// Angular speed of the orbit-follow revolution.
const ORBIT_RATE_DEG: f32 = 12.0;

// Free-roam rates
const DOLLY_RATE: f32 = 600.0;
const KEY_ORBIT_RATE_DEG: f32 = 45.0;
const LIFT_RATE: f32 = 400.0;
const DRAG_YAW_DEG_PER_PX: f32 = 0.25;
const DRAG_PITCH_DEG_PER_PX: f32 = 0.2;
/// Multiplicative zoom per scroll unit; positive delta zooms out.
const ZOOM_STEP: f32 = 1.01;
const MIN_DOLLY_RADIUS: f32 = 100.0;
const MAX_PITCH_RAD: f32 = 1.48; // just shy of the pole

/// Camera position and look target in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

/// Resolves a stable body id to its current world position and visual
/// size, so the camera never holds a renderer object across frames.
pub trait BodyTracker {
    fn position_of(&self, id: BodyId) -> Option<Vec3>;
    fn size_of(&self, id: BodyId) -> Option<f32>;
}

/// An in-progress camera flight.
#[derive(Debug, Clone)]
pub struct Flight {
    pub from: CameraPose,
    /// Destination pose. Recomputed every frame while the target body
    /// moves; fixed for a return flight.
    pub to: CameraPose,
    /// Body being approached; `None` means flying back to a saved pose.
    pub target: Option<BodyId>,
    /// Bearing around the target at arrival; seeds the orbit angle so the
    /// handoff into orbit-follow has no visible snap.
    pub approach_deg: f32,
    /// Normalized [0, 1], increases monotonically.
    pub progress: f32,
    pub duration: f32,
}

impl Flight {
    /// Pose along the flight arc at eased time `t`.
    fn sample(&self, t: f32) -> CameraPose {
        let p0 = self.from.position;
        let p3 = self.to.position;
        let travel = p3 - p0;
        let lift = Vec3::Y * travel.length() * FLIGHT_LIFT_FACTOR;
        let p1 = p0 + travel * 0.25 + lift;
        let p2 = p0 + travel * 0.75 + lift;
        CameraPose {
            position: cubic_bezier(p0, p1, p2, p3, t),
            target: lerp_vec3(self.from.target, self.to.target, t),
        }
    }
}

#[derive(Debug, Clone)]
pub enum CameraMode {
    FreeRoam,
    Transitioning(Flight),
    Orbiting { target: BodyId, angle_deg: f32 },
}

/// The camera rig. Owns the pose and the mode machine; consumes intent
/// flags (held keys) and accumulated pointer deltas once per frame.
pub struct CameraRig {
    mode: CameraMode,
    pose: CameraPose,
    /// Free-roam pose captured at selection, restored on cancel.
    saved_pose: Option<CameraPose>,
    home: CameraPose,
    min_radius: f32,
    max_radius: f32,
}

impl CameraRig {
    pub fn new(defaults: &CameraDefaults) -> Self {
        let home = CameraPose {
            position: defaults.position,
            target: Vec3::ZERO,
        };
        Self {
            mode: CameraMode::FreeRoam,
            pose: home,
            saved_pose: None,
            home,
            min_radius: MIN_DOLLY_RADIUS,
            max_radius: defaults.fog_far,
        }
    }

    /// Adopt new defaults after a preset switch. The current pose and mode
    /// are left alone; only the home pose and dolly range change.
    pub fn apply_defaults(&mut self, defaults: &CameraDefaults) {
        self.home = CameraPose {
            position: defaults.position,
            target: Vec3::ZERO,
        };
        self.max_radius = defaults.fog_far;
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn mode(&self) -> &CameraMode {
        &self.mode
    }

    pub fn is_free_roam(&self) -> bool {
        matches!(self.mode, CameraMode::FreeRoam)
    }

    /// The body currently being approached or orbited.
    pub fn followed_body(&self) -> Option<BodyId> {
        match &self.mode {
            CameraMode::FreeRoam => None,
            CameraMode::Transitioning(flight) => flight.target,
            CameraMode::Orbiting { target, .. } => Some(*target),
        }
    }

    /// Begin a flight toward a body. The first selection captures the
    /// current pose for later restore; re-selecting mid-follow retargets
    /// without overwriting that capture.
    pub fn select_body(&mut self, id: BodyId, tracker: &impl BodyTracker) {
        let (Some(center), Some(size)) = (tracker.position_of(id), tracker.size_of(id)) else {
            warn!("camera: selection of unknown body {id:?} ignored");
            return;
        };
        if self.saved_pose.is_none() {
            self.saved_pose = Some(self.pose);
        }
        let approach_deg = bearing_deg(center, self.pose.position);
        self.mode = CameraMode::Transitioning(Flight {
            from: self.pose,
            to: orbit_pose(center, size, approach_deg),
            target: Some(id),
            approach_deg,
            progress: 0.0,
            duration: FLIGHT_DURATION,
        });
    }

    /// Fly back to the pose captured at selection time. No-op in free-roam.
    pub fn cancel(&mut self) {
        if self.is_free_roam() {
            return;
        }
        self.mode = self.return_flight();
    }

    /// One frame tick. `drag` and `scroll` are the pointer deltas
    /// accumulated since the previous frame.
    pub fn update(&mut self, dt: f32, tracker: &impl BodyTracker, keys: &KeySet, drag: Vec2, scroll: f32) {
        let mode = std::mem::replace(&mut self.mode, CameraMode::FreeRoam);
        self.mode = match mode {
            CameraMode::FreeRoam => {
                self.update_free_roam(dt, keys, drag, scroll);
                CameraMode::FreeRoam
            }
            CameraMode::Transitioning(mut flight) => {
                let stale = match flight.target {
                    Some(id) => match (tracker.position_of(id), tracker.size_of(id)) {
                        (Some(center), Some(size)) => {
                            flight.to = orbit_pose(center, size, flight.approach_deg);
                            false
                        }
                        _ => true,
                    },
                    None => false,
                };
                if stale {
                    warn!("camera: target vanished mid-flight, returning to free roam");
                    self.return_flight()
                } else {
                    flight.progress = (flight.progress + dt / flight.duration).min(1.0);
                    self.pose = flight.sample(FLIGHT_EASING.apply(flight.progress));
                    if flight.progress >= 1.0 {
                        match flight.target {
                            Some(id) => CameraMode::Orbiting {
                                target: id,
                                angle_deg: flight.approach_deg,
                            },
                            None => {
                                self.saved_pose = None;
                                CameraMode::FreeRoam
                            }
                        }
                    } else {
                        CameraMode::Transitioning(flight)
                    }
                }
            }
            CameraMode::Orbiting { target, angle_deg } => {
                match (tracker.position_of(target), tracker.size_of(target)) {
                    (Some(center), Some(size)) => {
                        let angle_deg = (angle_deg + ORBIT_RATE_DEG * dt).rem_euclid(360.0);
                        self.pose = orbit_pose(center, size, angle_deg);
                        CameraMode::Orbiting { target, angle_deg }
                    }
                    _ => {
                        warn!("camera: orbited body vanished, returning to free roam");
                        self.return_flight()
                    }
                }
            }
        };
    }

    /// Eased flight back to the captured pose (or home if none was saved).
    fn return_flight(&self) -> CameraMode {
        CameraMode::Transitioning(Flight {
            from: self.pose,
            to: self.saved_pose.unwrap_or(self.home),
            target: None,
            approach_deg: 0.0,
            progress: 0.0,
            duration: RETURN_DURATION,
        })
    }

    fn update_free_roam(&mut self, dt: f32, keys: &KeySet, drag: Vec2, scroll: f32) {
        let pos = self.pose.position;

        let mut radial = 0.0;
        if keys.is_down(NavKey::MoveIn) {
            radial -= DOLLY_RATE * dt;
        }
        if keys.is_down(NavKey::MoveOut) {
            radial += DOLLY_RATE * dt;
        }

        let mut yaw_delta_deg = -drag.x * DRAG_YAW_DEG_PER_PX;
        if keys.is_down(NavKey::OrbitLeft) {
            yaw_delta_deg += KEY_ORBIT_RATE_DEG * dt;
        }
        if keys.is_down(NavKey::OrbitRight) {
            yaw_delta_deg -= KEY_ORBIT_RATE_DEG * dt;
        }

        let mut lift = 0.0;
        if keys.is_down(NavKey::MoveUp) {
            lift += LIFT_RATE * dt;
        }
        if keys.is_down(NavKey::MoveDown) {
            lift -= LIFT_RATE * dt;
        }

        // Spherical coordinates around the world origin
        let mut radius = pos.length().max(1e-3);
        let mut yaw = pos.x.atan2(pos.z);
        let mut pitch = (pos.y / radius).clamp(-1.0, 1.0).asin();

        radius = (radius + radial) * ZOOM_STEP.powf(scroll);
        radius = radius.clamp(self.min_radius, self.max_radius);
        yaw += yaw_delta_deg.to_radians();
        pitch = (pitch + (drag.y * DRAG_PITCH_DEG_PER_PX).to_radians())
            .clamp(-MAX_PITCH_RAD, MAX_PITCH_RAD);

        let cos_pitch = pitch.cos();
        let mut position = Vec3::new(
            radius * cos_pitch * yaw.sin(),
            radius * pitch.sin(),
            radius * cos_pitch * yaw.cos(),
        );
        position.y += lift;

        self.pose = CameraPose {
            position,
            target: Vec3::ZERO,
        };
    }
}

/// Pose of the orbit-follow camera at a given bearing around a body.
fn orbit_pose(center: Vec3, size: f32, angle_deg: f32) -> CameraPose {
    let rad = angle_deg.to_radians();
    let radius = size * ORBIT_DISTANCE_FACTOR;
    CameraPose {
        position: center + Vec3::new(rad.sin() * radius, size * ORBIT_HEIGHT_FACTOR, rad.cos() * radius),
        target: center,
    }
}

/// Horizontal bearing of `position` as seen from `center`, in degrees.
/// Inverse of the (sin, cos) placement in [`orbit_pose`].
fn bearing_deg(center: Vec3, position: Vec3) -> f32 {
    (position.x - center.x)
        .atan2(position.z - center.z)
        .to_degrees()
}

fn cubic_bezier(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}
