pub mod runner;

pub use runner::SimRunner;

/// Generate all `#[wasm_bindgen]` exports for a simulation.
///
/// Generates:
/// - `thread_local!` storage for the SimRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (sim_init, sim_tick, input handlers, data
///   accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use orrery_core::*;
///
/// fn build() -> Orrery {
///     Orrery::new(solar_system(), ScalePreset::Default)
///         .expect("built-in catalog has planets")
/// }
///
/// orrery_web::export_sim!(build, "solar-orrery");
/// ```
///
/// # Arguments
///
/// - `$builder`: path to a `fn() -> Orrery` constructing the simulation
/// - `$sim_name`: a string literal used in the initialization log message
#[macro_export]
macro_rules! export_sim {
    ($builder:path, $sim_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::SimRunner>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::SimRunner) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow
                    .as_mut()
                    .expect("Simulation not initialized. Call sim_init() first.");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn sim_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let runner = $crate::SimRunner::new($builder());
            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            log::info!("{}: initialized", $sim_name);
        }

        #[wasm_bindgen]
        pub fn sim_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        // ---- Input handlers: enqueue only, applied at the next tick ----

        #[wasm_bindgen]
        pub fn sim_select_body(id: u32) {
            with_runner(|r| r.push_input(InputEvent::SelectBody { id: BodyId(id) }));
        }

        #[wasm_bindgen]
        pub fn sim_cancel_selection() {
            with_runner(|r| r.push_input(InputEvent::CancelSelection));
        }

        #[wasm_bindgen]
        pub fn sim_hover(id: i32) {
            let id = if id < 0 { None } else { Some(BodyId(id as u32)) };
            with_runner(|r| r.push_input(InputEvent::Hover { id }));
        }

        #[wasm_bindgen]
        pub fn sim_set_speed(multiplier: f32) {
            with_runner(|r| r.push_input(InputEvent::SetSpeed { multiplier }));
        }

        #[wasm_bindgen]
        pub fn sim_set_orbit_scale(factor: f32) {
            with_runner(|r| r.push_input(InputEvent::SetOrbitScale { factor }));
        }

        #[wasm_bindgen]
        pub fn sim_set_preset(name: &str) {
            match ScalePreset::from_name(name) {
                Some(preset) => {
                    with_runner(|r| r.push_input(InputEvent::SetPreset { preset }))
                }
                None => log::warn!("{}: unknown preset {name:?}", $sim_name),
            }
        }

        #[wasm_bindgen]
        pub fn sim_key_down(key_code: u32) {
            // X cancels; W/S/A/D/E/Q steer free-roam
            if key_code == 88 {
                with_runner(|r| r.push_input(InputEvent::CancelSelection));
            } else if let Some(key) = NavKey::from_key_code(key_code) {
                with_runner(|r| r.push_input(InputEvent::KeyDown { key }));
            }
        }

        #[wasm_bindgen]
        pub fn sim_key_up(key_code: u32) {
            if let Some(key) = NavKey::from_key_code(key_code) {
                with_runner(|r| r.push_input(InputEvent::KeyUp { key }));
            }
        }

        #[wasm_bindgen]
        pub fn sim_pointer_drag(dx: f32, dy: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerDrag { dx, dy }));
        }

        #[wasm_bindgen]
        pub fn sim_scroll(delta: f32) {
            with_runner(|r| r.push_input(InputEvent::Scroll { delta }));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_bodies_ptr() -> *const f32 {
            with_runner(|r| r.bodies_ptr())
        }

        #[wasm_bindgen]
        pub fn get_body_count() -> u32 {
            with_runner(|r| r.body_count())
        }

        #[wasm_bindgen]
        pub fn get_body_floats() -> u32 {
            with_runner(|r| r.body_floats())
        }

        #[wasm_bindgen]
        pub fn get_body_id_at(index: u32) -> i32 {
            with_runner(|r| r.body_id_at(index))
        }

        #[wasm_bindgen]
        pub fn get_camera_ptr() -> *const f32 {
            with_runner(|r| r.camera_ptr())
        }

        #[wasm_bindgen]
        pub fn get_belt_ptr() -> *const f32 {
            with_runner(|r| r.belt_ptr())
        }

        #[wasm_bindgen]
        pub fn get_belt_floats() -> u32 {
            with_runner(|r| r.belt_floats())
        }

        #[wasm_bindgen]
        pub fn get_shell_points_ptr() -> *const f32 {
            with_runner(|r| r.shell_points_ptr())
        }

        #[wasm_bindgen]
        pub fn get_shell_point_count() -> u32 {
            with_runner(|r| r.shell_point_count())
        }

        #[wasm_bindgen]
        pub fn get_shell_phase() -> f32 {
            with_runner(|r| r.shell_phase())
        }

        #[wasm_bindgen]
        pub fn get_orbit_path_count() -> u32 {
            with_runner(|r| r.orbit_path_count())
        }

        #[wasm_bindgen]
        pub fn get_orbit_path_ptr(index: u32) -> *const f32 {
            with_runner(|r| r.orbit_path_ptr(index))
        }

        #[wasm_bindgen]
        pub fn get_orbit_path_len(index: u32) -> u32 {
            with_runner(|r| r.orbit_path_len(index))
        }

        // ---- UI overlay accessors ----

        #[wasm_bindgen]
        pub fn get_hovered_index() -> i32 {
            with_runner(|r| r.hovered_index())
        }

        #[wasm_bindgen]
        pub fn get_selected_index() -> i32 {
            with_runner(|r| r.selected_index())
        }

        #[wasm_bindgen]
        pub fn get_selection_version() -> u32 {
            with_runner(|r| r.selection_version())
        }

        #[wasm_bindgen]
        pub fn get_active_keys_mask() -> u32 {
            with_runner(|r| r.active_keys_mask())
        }

        // ---- Scene parameter accessors ----

        #[wasm_bindgen]
        pub fn get_sun_size() -> f32 {
            with_runner(|r| r.sun_size())
        }

        #[wasm_bindgen]
        pub fn get_camera_fov() -> f32 {
            with_runner(|r| r.camera_fov())
        }

        #[wasm_bindgen]
        pub fn get_camera_far() -> f32 {
            with_runner(|r| r.camera_far())
        }

        #[wasm_bindgen]
        pub fn get_fog_near() -> f32 {
            with_runner(|r| r.fog_near())
        }

        #[wasm_bindgen]
        pub fn get_fog_far() -> f32 {
            with_runner(|r| r.fog_far())
        }
    };
}
