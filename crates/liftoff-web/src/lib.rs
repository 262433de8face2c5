pub mod runner;

pub use runner::GameRunner;

// Re-exported so `export_game!` expands without extra imports in the game crate.
pub use liftoff_engine;
pub use js_sys;

use wasm_bindgen::{JsCast, JsValue};

/// Best-effort text for a value the page passed as a load failure reason:
/// a string, an `Error`'s message, or its JSON form.
pub fn describe_js_value(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    js_sys::JSON::stringify(value)
        .ok()
        .and_then(|s| s.as_string())
        .unwrap_or_else(|| "unknown error".to_string())
}

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (lifecycle, input, asset loading, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod game;
/// use game::MyGame;
///
/// liftoff_web::export_game!(MyGame, "my-game");
/// ```
///
/// # Arguments
///
/// - `$game_type`: The game struct type that implements `liftoff_engine::Game`
///   and has a `new()` constructor
/// - `$game_name`: A string literal used in the initialization log message
///
/// Config and manifest must be handed over before `game_init` runs the
/// game's `init`, so both are buffered until then.
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
            static PENDING_CONFIG: RefCell<Option<String>> = RefCell::new(None);
            static PENDING_MANIFEST: RefCell<Option<String>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
                f(runner)
            })
        }

        fn runner_ready() -> bool {
            RUNNER.with(|cell| cell.borrow().is_some())
        }

        #[wasm_bindgen]
        pub fn game_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new();
            let mut runner = $crate::GameRunner::new(game);

            if let Some(json) = PENDING_CONFIG.with(|c| c.borrow_mut().take()) {
                runner.load_config(&json);
            }
            if let Some(json) = PENDING_MANIFEST.with(|c| c.borrow_mut().take()) {
                runner.load_manifest(&json);
            }

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn game_key_down(key_code: u32) {
            with_runner(|r| r.push_input($crate::liftoff_engine::InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_key_up(key_code: u32) {
            with_runner(|r| r.push_input($crate::liftoff_engine::InputEvent::KeyUp { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_mouse_look(dx: f32, dy: f32) {
            with_runner(|r| r.push_input($crate::liftoff_engine::InputEvent::MouseLook { dx, dy }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_lock(locked: bool) {
            with_runner(|r| r.push_input($crate::liftoff_engine::InputEvent::PointerLock { locked }));
        }

        #[wasm_bindgen]
        pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input($crate::liftoff_engine::InputEvent::Custom { kind, a, b, c }));
        }

        // ---- Configuration and assets ----

        #[wasm_bindgen]
        pub fn game_load_config(json: &str) {
            if runner_ready() {
                with_runner(|r| r.load_config(json));
            } else {
                PENDING_CONFIG.with(|c| *c.borrow_mut() = Some(json.to_string()));
            }
        }

        #[wasm_bindgen]
        pub fn game_load_manifest(json: &str) {
            if runner_ready() {
                with_runner(|r| r.load_manifest(json));
            } else {
                PENDING_MANIFEST.with(|c| *c.borrow_mut() = Some(json.to_string()));
            }
        }

        #[wasm_bindgen]
        pub fn game_asset_loaded(name: &str) {
            with_runner(|r| r.asset_loaded(name));
        }

        #[wasm_bindgen]
        pub fn game_asset_failed(name: &str, reason: wasm_bindgen::JsValue) {
            let reason = $crate::describe_js_value(&reason);
            with_runner(|r| r.asset_failed(name, &reason));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_header_ptr() -> *const f32 {
            with_runner(|r| r.header_ptr())
        }

        #[wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            with_runner(|r| r.instances_ptr())
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count())
        }

        #[wasm_bindgen]
        pub fn get_particles_ptr() -> *const f32 {
            with_runner(|r| r.particles_ptr())
        }

        #[wasm_bindgen]
        pub fn get_particle_count() -> u32 {
            with_runner(|r| r.particle_count())
        }

        #[wasm_bindgen]
        pub fn get_camera_ptr() -> *const f32 {
            with_runner(|r| r.camera_ptr())
        }

        #[wasm_bindgen]
        pub fn get_sound_events_ptr() -> *const u8 {
            with_runner(|r| r.sound_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_sound_events_len() -> u32 {
            with_runner(|r| r.sound_events_len())
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len())
        }

        #[wasm_bindgen]
        pub fn get_status_json() -> $crate::js_sys::JsString {
            with_runner(|r| $crate::js_sys::JsString::from(r.status_json()))
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_instances() -> u32 {
            with_runner(|r| r.max_instances())
        }

        #[wasm_bindgen]
        pub fn get_max_particles() -> u32 {
            with_runner(|r| r.max_particles())
        }

        #[wasm_bindgen]
        pub fn get_max_sounds() -> u32 {
            with_runner(|r| r.max_sounds())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }
    };
}
