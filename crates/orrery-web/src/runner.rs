use orrery_core::{
    BodyInstance, FrameClock, InputEvent, InputQueue, NavKey, Orrery, RenderFrame,
};

/// Generic simulation runner that wires up the frame loop.
///
/// The host creates one `thread_local!` SimRunner and exports free
/// functions via `#[wasm_bindgen]` (see the `export_sim!` macro), because
/// wasm-bindgen cannot export structs holding non-`Copy` state directly.
/// Input handlers push events; the actual state mutation happens once per
/// `tick`, inside the simulation.
pub struct SimRunner {
    sim: Orrery,
    input: InputQueue,
    clock: FrameClock,
    frame: RenderFrame,
    /// Flat xyz + scale per belt particle, all belts concatenated.
    belt_buffer: Vec<f32>,
    /// Flat position + look-target floats for SharedArrayBuffer reads.
    camera_buffer: [f32; 6],
}

impl SimRunner {
    pub fn new(sim: Orrery) -> Self {
        let pose = sim.camera_pose();
        Self {
            sim,
            input: InputQueue::new(),
            clock: FrameClock::standard(),
            frame: RenderFrame {
                ids: Vec::new(),
                instances: Vec::new(),
                camera: pose,
            },
            belt_buffer: Vec::new(),
            camera_buffer: [0.0; 6],
        }
    }

    /// Push an input event into the queue (called from JS handlers).
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame tick and repack the flat buffers.
    pub fn tick(&mut self, raw_dt: f32) {
        let dt = self.clock.tick(raw_dt);
        self.frame = self.sim.frame(dt, &mut self.input);

        let pose = self.frame.camera;
        self.camera_buffer = [
            pose.position.x,
            pose.position.y,
            pose.position.z,
            pose.target.x,
            pose.target.y,
            pose.target.z,
        ];

        self.belt_buffer.clear();
        for field in self.sim.belt_fields() {
            let phase = self.sim.field_phase(field.body).unwrap_or(0.0);
            for (i, particle) in field.particles().iter().enumerate() {
                let p = field.particle_position(i, phase);
                self.belt_buffer
                    .extend_from_slice(&[p.x, p.y, p.z, particle.scale]);
            }
        }
    }

    pub fn sim(&self) -> &Orrery {
        &self.sim
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn bodies_ptr(&self) -> *const f32 {
        bytemuck::cast_slice::<BodyInstance, f32>(&self.frame.instances).as_ptr()
    }

    pub fn body_count(&self) -> u32 {
        self.frame.instances.len() as u32
    }

    pub fn body_floats(&self) -> u32 {
        BodyInstance::FLOATS as u32
    }

    /// Catalog id of the body at a buffer index, or -1 out of range.
    pub fn body_id_at(&self, index: u32) -> i32 {
        self.frame
            .ids
            .get(index as usize)
            .map(|id| id.0 as i32)
            .unwrap_or(-1)
    }

    pub fn camera_ptr(&self) -> *const f32 {
        self.camera_buffer.as_ptr()
    }

    pub fn belt_ptr(&self) -> *const f32 {
        self.belt_buffer.as_ptr()
    }

    pub fn belt_floats(&self) -> u32 {
        self.belt_buffer.len() as u32
    }

    pub fn shell_points_ptr(&self) -> *const f32 {
        self.sim
            .shell_fields()
            .first()
            .map(|shell| bytemuck::cast_slice::<glam::Vec3, f32>(shell.points()).as_ptr())
            .unwrap_or(std::ptr::null())
    }

    pub fn shell_point_count(&self) -> u32 {
        self.sim
            .shell_fields()
            .first()
            .map(|shell| shell.len() as u32)
            .unwrap_or(0)
    }

    /// Shell drift rotation for the renderer to apply, degrees.
    pub fn shell_phase(&self) -> f32 {
        self.sim
            .shell_fields()
            .first()
            .and_then(|shell| self.sim.field_phase(shell.body))
            .unwrap_or(0.0)
    }

    pub fn orbit_path_count(&self) -> u32 {
        self.sim.orbit_paths().len() as u32
    }

    pub fn orbit_path_ptr(&self, index: u32) -> *const f32 {
        self.sim
            .orbit_paths()
            .get(index as usize)
            .map(|path| bytemuck::cast_slice::<glam::Vec3, f32>(&path.points).as_ptr())
            .unwrap_or(std::ptr::null())
    }

    pub fn orbit_path_len(&self, index: u32) -> u32 {
        self.sim
            .orbit_paths()
            .get(index as usize)
            .map(|path| path.points.len() as u32)
            .unwrap_or(0)
    }

    // ---- UI overlay accessors ----

    pub fn hovered_index(&self) -> i32 {
        self.sim
            .selection()
            .hovered
            .map(|id| id.0 as i32)
            .unwrap_or(-1)
    }

    pub fn selected_index(&self) -> i32 {
        self.sim
            .selection()
            .selected
            .map(|id| id.0 as i32)
            .unwrap_or(-1)
    }

    pub fn selection_version(&self) -> u32 {
        self.sim.selection_version() as u32
    }

    /// Bitmask of held directional keys, in `NavKey::ALL` order.
    pub fn active_keys_mask(&self) -> u32 {
        let mut mask = 0u32;
        for key in self.sim.active_keys() {
            let bit = NavKey::ALL.iter().position(|k| *k == key).unwrap_or(0);
            mask |= 1 << bit;
        }
        mask
    }

    // ---- Scene parameter accessors ----

    pub fn sun_size(&self) -> f32 {
        self.sim.layout().sun_size
    }

    pub fn camera_fov(&self) -> f32 {
        self.sim.layout().camera.fov
    }

    pub fn camera_far(&self) -> f32 {
        self.sim.layout().camera.far
    }

    pub fn fog_near(&self) -> f32 {
        self.sim.layout().camera.fog_near
    }

    pub fn fog_far(&self) -> f32 {
        self.sim.layout().camera.fog_far
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_core::{solar_system, ScalePreset};

    fn runner() -> SimRunner {
        SimRunner::new(Orrery::new(solar_system(), ScalePreset::Default).unwrap())
    }

    #[test]
    fn tick_fills_buffers() {
        let mut r = runner();
        r.tick(1.0 / 60.0);
        assert_eq!(r.body_count(), 9);
        // One belt of 10k particles, 4 floats each
        assert_eq!(r.belt_floats(), 10_000 * 4);
        assert_eq!(r.shell_point_count(), 12_000);
        assert_eq!(r.orbit_path_count(), 8);
        assert!(r.orbit_path_len(0) > 0);
        assert_eq!(r.orbit_path_len(99), 0);
    }

    #[test]
    fn camera_buffer_mirrors_the_pose() {
        let mut r = runner();
        r.tick(1.0 / 60.0);
        let pose = r.sim().camera_pose();
        let buf = r.camera_buffer;
        assert_eq!(buf[0], pose.position.x);
        assert_eq!(buf[4], pose.target.y);
    }

    #[test]
    fn selection_events_surface_as_indices() {
        let mut r = runner();
        r.tick(1.0 / 60.0);
        assert_eq!(r.selected_index(), -1);

        let (mars, _) = r.sim().catalog().find_by_name("Mars").unwrap();
        r.push_input(InputEvent::SelectBody { id: mars });
        r.tick(1.0 / 60.0);
        assert_eq!(r.selected_index(), mars.0 as i32);
    }

    #[test]
    fn key_mask_tracks_held_keys() {
        let mut r = runner();
        r.push_input(InputEvent::KeyDown { key: NavKey::MoveIn });
        r.push_input(InputEvent::KeyDown { key: NavKey::MoveDown });
        r.tick(1.0 / 60.0);
        // MoveIn is bit 0, MoveDown is bit 5
        assert_eq!(r.active_keys_mask(), 0b100001);
    }
}
