#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! The core of a browser voxel sandbox: procedural terrain in chunked columns,
//! greedy-meshed geometry, Quake/Source style player movement and block picking.
//!
//! The same crate builds natively and for WebAssembly. Presentation is left to
//! the host, which receives per-chunk meshes through a
//! [`RenderSink`](engine_state::rendering::RenderSink).
//!
//! ## Key Modules
//!
//! * `application_state` - Input tracking and the per-frame driver
//! * `config` - Runtime settings loaded from JSON
//! * `engine_state` - The tick context: world, player, camera and meshing
//!
//! ## Usage
//!
//! ```no_run
//! // Native entry point
//! fn main() {
//!     voxel_world::run();
//! }
//! ```
//!
//! In the browser, `run_web()` is exported through `wasm-bindgen` and returns
//! a `WebWorld` handle that the page steps from `requestAnimationFrame`.

use log::info;
#[cfg(target_family = "wasm")]
use wasm_bindgen::prelude::wasm_bindgen;

use application_state::ApplicationState;
use config::WorldConfig;
use engine_state::{rendering::RecordingSink, voxels::loader::LoadProgress};

pub mod application_state;
pub mod config;
pub mod engine_state;

/// Config file read by the native entry point.
pub const CONFIG_PATH: &str = "voxel_world.json";

/// Frames simulated by the native demo.
pub const DEMO_FRAMES: u64 = 600;

cfg_if::cfg_if! {
    if #[cfg(target_family = "wasm")] {
        /// Routes `log` output to the browser console and panics to `console.error`.
        pub fn init_logging() {
            std::panic::set_hook(Box::new(console_error_panic_hook::hook));
            console_log::init_with_level(log::Level::Info).expect("Couldn't initialize logger");
        }
    } else {
        /// Routes `log` output to stdout, filtered by `RUST_LOG`.
        pub fn init_logging() {
            let mut log_builder = env_logger::Builder::new();
            let _ = log_builder
                .target(env_logger::Target::Stdout)
                .parse_env("RUST_LOG")
                .try_init();
        }
    }
}

/// Loads the world and walks the player forward for `frames` frames.
///
/// Meshes go to a [`RecordingSink`], whose counters are logged at the end.
pub fn run_headless(config: WorldConfig, frames: u64) {
    let mut application = ApplicationState::new(config, RecordingSink::new());

    let mut last = LoadProgress { rows_done: 0, rows_total: 0 };
    for progress in application.load_world() {
        info!(
            "Loading world: {}/{} rows ({:.0}%)",
            progress.rows_done,
            progress.rows_total,
            progress.fraction() * 100.0
        );
        last = progress;
    }
    info!(
        "World ready: {} chunks in {} rows",
        application.engine_state.world.len(),
        last.rows_total
    );

    application.input_manager.set_pointer_locked(true);
    application
        .input_manager
        .set_key(winit::keyboard::KeyCode::KeyW, true);

    let mut evicted = 0;
    for frame in 0..frames {
        // Hop every second so the walk clears single-block steps
        let jump = frame % 60 == 0;
        application
            .input_manager
            .set_key(winit::keyboard::KeyCode::Space, jump);

        let report = application.frame();
        evicted += report.evicted;
        application.sink.clear_events();

        if (frame + 1) % 60 == 0 {
            let position = application.engine_state.player.position;
            info!(
                "Frame {}: player at ({:.1}, {:.1}, {:.1}), {:?}, {} chunks loaded",
                frame + 1,
                position.x,
                position.y,
                position.z,
                application.engine_state.player.state(),
                application.engine_state.world.len()
            );
        }
    }

    info!(
        "Done after {} frames: {} meshes built, {} live, {} chunks evicted, {} sink violations",
        application.frames(),
        application.engine_state.meshes_built(),
        application.sink.live_meshes(),
        evicted,
        application.sink.violations()
    );
}

/// Native entry point: reads [`CONFIG_PATH`] and runs the headless demo.
#[cfg(not(target_family = "wasm"))]
pub fn run() {
    init_logging();
    info!("Logger initialized");

    let config = WorldConfig::load(std::path::Path::new(CONFIG_PATH));
    run_headless(config, DEMO_FRAMES);
}

/// Browser handle for a world with the default settings.
///
/// The page calls [`WebWorld::load_row`] once per animation frame until it
/// returns `1.0`, then [`WebWorld::frame`] once per animation frame. Control
/// returns to the browser after every call.
#[cfg(target_family = "wasm")]
#[wasm_bindgen]
pub struct WebWorld {
    application: ApplicationState<RecordingSink>,
}

#[cfg(target_family = "wasm")]
#[wasm_bindgen]
impl WebWorld {
    /// Generates the next chunk row and returns the loaded fraction.
    pub fn load_row(&mut self) -> f32 {
        match self.application.load_next_row() {
            Some(progress) => {
                info!("Loading world: {}/{} rows", progress.rows_done, progress.rows_total);
                progress.fraction()
            }
            None => 1.0,
        }
    }

    /// Runs one engine tick.
    pub fn frame(&mut self) {
        self.application.frame();
        self.application.sink.clear_events();
    }

    /// Frames run so far.
    pub fn frames(&self) -> u64 {
        self.application.frames()
    }
}

/// Browser entry point: sets up logging and creates the world.
#[cfg(target_family = "wasm")]
#[wasm_bindgen]
pub fn run_web() -> WebWorld {
    init_logging();
    info!("Logger initialized");

    WebWorld {
        application: ApplicationState::new(WorldConfig::default(), RecordingSink::new()),
    }
}
