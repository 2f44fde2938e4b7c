//! The simulation facade.
//!
//! `Orrery` owns the catalog, the derived visual layout, per-body phases,
//! the camera rig, and the selection store. One call per rendered frame
//! drains the input queue, advances the world, and returns a `RenderFrame`.

use glam::{Vec2, Vec3};
use log::warn;

use crate::api::frame::{
    BeltField, BodyInstance, FramePositions, OrbitPath, RenderFrame, ShellField,
};
use crate::api::types::BodyId;
use crate::catalog::presets::ScalePreset;
use crate::catalog::{BodyKind, Catalog, CelestialBody};
use crate::core::rng::Rng;
use crate::core::store::{Selection, SelectionStore};
use crate::input::queue::{InputEvent, InputQueue, KeySet, NavKey};
use crate::settings::SimulationSettings;
use crate::systems::camera::{BodyTracker, CameraPose, CameraRig};
use crate::systems::motion::MotionState;
use crate::systems::orbit;
use crate::systems::scale::{self, BodyLayout, LayoutError, VisualLayout};

/// Seed for randomized initial phases.
const PHASE_SEED: u64 = 0x051AF2;
/// Seed for belt/shell particle jitter; fixed so preset switches reshape
/// the same field instead of rolling a new sky.
const FIELD_SEED: u64 = 0xA57E01D;

/// Fallback albedo for bodies whose kind does not carry one.
const DEFAULT_ALBEDO: f32 = 0.3;

pub struct Orrery {
    catalog: Catalog,
    preset: ScalePreset,
    settings: SimulationSettings,
    layout: VisualLayout,
    motion: MotionState,
    camera: CameraRig,
    store: SelectionStore,
    keys: KeySet,
    rng: Rng,
    orbit_paths: Vec<OrbitPath>,
    belt_fields: Vec<BeltField>,
    shell_fields: Vec<ShellField>,
    positions: FramePositions,
}

impl Orrery {
    pub fn new(catalog: Catalog, preset: ScalePreset) -> Result<Self, LayoutError> {
        let layout = scale::build_layout(&catalog, &preset.bounds())?;
        let mut rng = Rng::new(PHASE_SEED);
        let motion = MotionState::new(&catalog, &mut rng);
        let camera = CameraRig::new(&layout.camera);
        let mut sim = Self {
            catalog,
            preset,
            settings: SimulationSettings::default(),
            layout,
            motion,
            camera,
            store: SelectionStore::new(),
            keys: KeySet::new(),
            rng,
            orbit_paths: Vec::new(),
            belt_fields: Vec::new(),
            shell_fields: Vec::new(),
            positions: FramePositions::new(),
        };
        sim.rebuild_caches();
        Ok(sim)
    }

    /// One frame tick: drain input, advance phases, place bodies, update
    /// the camera, and emit the frame. The only mutation point per frame.
    pub fn frame(&mut self, dt: f32, input: &mut InputQueue) -> RenderFrame {
        let mut drag = Vec2::ZERO;
        let mut scroll = 0.0;
        let mut pending_select: Option<BodyId> = None;
        let mut pending_cancel = false;

        for event in input.drain() {
            match event {
                InputEvent::SelectBody { id } => {
                    pending_select = Some(id);
                    pending_cancel = false;
                }
                InputEvent::CancelSelection => {
                    pending_cancel = true;
                    pending_select = None;
                }
                InputEvent::Hover { id } => self.store.set_hovered(id),
                InputEvent::SetSpeed { multiplier } => self.settings.set_speed(multiplier),
                InputEvent::SetOrbitScale { factor } => {
                    self.settings.set_orbit_scale(factor);
                    self.rebuild_caches();
                }
                InputEvent::SetPreset { preset } => self.set_preset(preset),
                InputEvent::KeyDown { key } => self.keys.set(key, true),
                InputEvent::KeyUp { key } => self.keys.set(key, false),
                InputEvent::PointerDrag { dx, dy } => drag += Vec2::new(dx, dy),
                InputEvent::Scroll { delta } => scroll += delta,
            }
        }

        self.motion.advance(dt, &self.settings);
        self.compute_positions();

        if let Some(id) = pending_select {
            if self.catalog.get(id).is_some() {
                self.store.set_selected(Some(id));
                self.camera.select_body(id, &self.positions);
            } else {
                warn!("sim: selection of unknown body {id:?} ignored");
            }
        }
        if pending_cancel {
            self.store.set_selected(None);
            self.camera.cancel();
        }
        // A selected body can disappear when the catalog is swapped
        if let Some(selected) = self.store.snapshot().selected {
            if self.positions.position_of(selected).is_none() && self.catalog.get(selected).is_none()
            {
                self.store.set_selected(None);
            }
        }

        self.camera.update(dt, &self.positions, &self.keys, drag, scroll);

        let mut ids = Vec::with_capacity(self.positions.iter().count());
        let mut instances = Vec::with_capacity(ids.capacity());
        for (id, position, size) in self.positions.iter() {
            let Some(body) = self.catalog.get(id) else {
                continue;
            };
            let albedo = match body.kind {
                BodyKind::Planet { albedo, .. } => albedo,
                _ => DEFAULT_ALBEDO,
            };
            ids.push(id);
            instances.push(BodyInstance {
                position: position.to_array(),
                radius: size,
                color: body.color,
                albedo,
            });
        }

        RenderFrame {
            ids,
            instances,
            camera: self.camera.pose(),
        }
    }

    /// Switch scale presets. Pure over (catalog, bounds): switching away
    /// and back lands on the identical layout.
    pub fn set_preset(&mut self, preset: ScalePreset) {
        match scale::build_layout(&self.catalog, &preset.bounds()) {
            Ok(layout) => {
                self.layout = layout;
                self.preset = preset;
                self.camera.apply_defaults(&self.layout.camera);
                self.rebuild_caches();
            }
            Err(e) => {
                warn!("sim: preset {:?} rejected: {e} — keeping current layout", preset.name());
            }
        }
    }

    /// Swap the whole catalog (different layout data set). Keeps the
    /// current layout on failure.
    pub fn set_catalog(&mut self, catalog: Catalog) -> Result<(), LayoutError> {
        let layout = scale::build_layout(&catalog, &self.preset.bounds())?;
        self.catalog = catalog;
        self.layout = layout;
        self.motion = MotionState::new(&self.catalog, &mut self.rng);
        self.store.set_selected(None);
        self.store.set_hovered(None);
        self.camera.apply_defaults(&self.layout.camera);
        // Old ids now name different bodies — never keep following one
        self.camera.cancel();
        self.rebuild_caches();
        Ok(())
    }

    fn compute_positions(&mut self) {
        self.positions.clear();
        let orbit_scale = self.settings.orbit_scale;

        // Planets first so moons can find their parents
        for (id, layout) in self.layout.iter() {
            if let BodyLayout::Planet {
                orbit_radius,
                size,
                eccentricity,
            } = layout
            {
                let phase = self.motion.phase(id).unwrap_or(0.0);
                let position = orbit::position(phase, orbit_radius * orbit_scale, *eccentricity);
                self.positions.push(id, position, *size);
            }
        }
        for (id, layout) in self.layout.iter() {
            if let BodyLayout::Moon {
                parent,
                orbit_radius,
                size,
            } = layout
            {
                let Some(parent_position) = self.positions.position_of(*parent) else {
                    continue;
                };
                let phase = self.motion.phase(id).unwrap_or(0.0).to_radians();
                let offset = Vec3::new(phase.cos() * orbit_radius, 0.0, phase.sin() * orbit_radius);
                self.positions.push(id, parent_position + offset, *size);
            }
        }
    }

    fn rebuild_caches(&mut self) {
        self.orbit_paths.clear();
        self.belt_fields.clear();
        self.shell_fields.clear();
        let orbit_scale = self.settings.orbit_scale;
        let mut field_rng = Rng::new(FIELD_SEED);

        for (id, layout) in self.layout.iter() {
            match layout {
                BodyLayout::Planet {
                    orbit_radius,
                    eccentricity,
                    ..
                } => {
                    self.orbit_paths.push(OrbitPath {
                        body: id,
                        points: orbit::sample_path(
                            orbit_radius * orbit_scale,
                            *eccentricity,
                            orbit::PATH_STEP_DEG,
                        ),
                    });
                }
                BodyLayout::Belt {
                    orbit_radius,
                    width,
                } => {
                    let count = match self.catalog.get(id).map(|b| &b.kind) {
                        Some(BodyKind::AsteroidBelt { particle_count, .. }) => *particle_count,
                        _ => 0,
                    };
                    self.belt_fields.push(BeltField::generate(
                        id,
                        orbit_radius * orbit_scale,
                        *width,
                        count,
                        &mut field_rng,
                    ));
                }
                BodyLayout::Shell {
                    inner_radius,
                    outer_radius,
                } => {
                    let count = match self.catalog.get(id).map(|b| &b.kind) {
                        Some(BodyKind::OortCloud { particle_count }) => *particle_count,
                        _ => 0,
                    };
                    self.shell_fields.push(ShellField::generate(
                        id,
                        *inner_radius,
                        *outer_radius,
                        count,
                        &mut field_rng,
                    ));
                }
                BodyLayout::Moon { .. } => {}
            }
        }
    }

    // ── Read-only surface for the renderer and UI overlay ──────────────

    /// Body the tooltip should describe: hovered wins over selected.
    pub fn tooltip_body(&self) -> Option<&CelestialBody> {
        let snapshot = self.store.snapshot();
        snapshot
            .hovered
            .or(snapshot.selected)
            .and_then(|id| self.catalog.get(id))
    }

    pub fn selection(&self) -> Selection {
        self.store.snapshot()
    }

    pub fn selection_version(&self) -> u64 {
        self.store.version()
    }

    /// Held directional keys, for the on-screen input indicator.
    pub fn active_keys(&self) -> impl Iterator<Item = NavKey> + '_ {
        self.keys.active()
    }

    pub fn orbit_paths(&self) -> &[OrbitPath] {
        &self.orbit_paths
    }

    pub fn belt_fields(&self) -> &[BeltField] {
        &self.belt_fields
    }

    pub fn shell_fields(&self) -> &[ShellField] {
        &self.shell_fields
    }

    /// Shared drift phase for a belt or shell field.
    pub fn field_phase(&self, id: BodyId) -> Option<f32> {
        self.motion.phase(id)
    }

    pub fn camera_pose(&self) -> CameraPose {
        self.camera.pose()
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn layout(&self) -> &VisualLayout {
        &self.layout
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    pub fn preset(&self) -> ScalePreset {
        self.preset
    }
}
