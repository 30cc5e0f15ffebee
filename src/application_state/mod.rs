//! # Application State Management
//!
//! This module connects a host (a native window or the browser page) to the engine:
//! - Window and device events are fed into the [`InputManager`]
//! - Once per frame the processed input becomes a [`PlayerAction`](crate::engine_state::PlayerAction)
//!   and the engine ticks
//! - Resize and focus changes are forwarded to the engine and input state
//!
//! Presentation stays outside: the host supplies a [`RenderSink`] that receives
//! chunk meshes.

pub mod input_manager;
pub mod input_state;

use input_manager::InputManager;
use log::trace;
use winit::{
    event::{DeviceEvent, ElementState, KeyEvent, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::{
    config::WorldConfig,
    engine_state::{rendering::RenderSink, voxels::loader::{LoadProgress, WorldLoader}, EngineState, TickReport},
};

/// The running application: engine, input and the host's render sink.
pub struct ApplicationState<S: RenderSink> {
    /// The core game engine state and logic
    pub engine_state: EngineState,

    /// Manages input state and event processing
    pub input_manager: InputManager,

    /// Receives chunk meshes for presentation
    pub sink: S,

    /// Timestamp of the last frame
    pub last_frame_time: web_time::Instant,

    frames: u64,
    rows_loaded: usize,
}

impl<S: RenderSink> ApplicationState<S> {
    /// Creates the engine for `config` and binds it to `sink`.
    pub fn new(config: WorldConfig, sink: S) -> Self {
        Self {
            engine_state: EngineState::new(config),
            input_manager: InputManager::new(),
            sink,
            last_frame_time: web_time::Instant::now(),
            frames: 0,
            rows_loaded: 0,
        }
    }

    /// Generates the initial region around the player, one row per step.
    pub fn load_world(&mut self) -> WorldLoader<'_> {
        self.engine_state.load_world()
    }

    /// Generates one more row of the initial region.
    ///
    /// Lets a host that must return to its event loop between rows load the
    /// world a step at a time.
    ///
    /// # Returns
    /// The progress after this row, or `None` once every row is loaded.
    pub fn load_next_row(&mut self) -> Option<LoadProgress> {
        let progress = self
            .engine_state
            .load_world()
            .starting_at_row(self.rows_loaded)
            .next()?;
        self.rows_loaded = progress.rows_done;
        Some(progress)
    }

    /// Frames run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Handles a window event.
    ///
    /// # Returns
    /// `false` when the host should shut down.
    pub fn window_event(&mut self, event: &WindowEvent) -> bool {
        self.input_manager.intake_input(event);

        match event {
            WindowEvent::Resized(size) => {
                self.engine_state.resize(size.width, size.height);
            }
            WindowEvent::Focused(false) => {
                self.input_manager.set_pointer_locked(false);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                self.input_manager.set_pointer_locked(false);
            }
            WindowEvent::CloseRequested => return false,
            _ => (),
        }
        true
    }

    /// Handles device-level input events such as mouse motion.
    pub fn device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.input_manager.intake_mouse_motion(*delta);
        }
    }

    /// Runs one engine tick with the input gathered since the last frame.
    pub fn frame(&mut self) -> TickReport {
        let now = web_time::Instant::now();
        let frame_time = now - self.last_frame_time;
        self.last_frame_time = now;

        let processed_input = self.input_manager.get_and_reset_processed_input();
        self.engine_state.set_input_commands(processed_input);
        let report = self.engine_state.process_input(&mut self.sink);

        self.frames += 1;
        trace!("Frame {} after {:?}: {:?}", self.frames, frame_time, report);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::{rendering::RecordingSink, voxels::coords::ChunkCoord};
    use winit::dpi::PhysicalSize;

    fn application() -> ApplicationState<RecordingSink> {
        let config = WorldConfig {
            seed: Some(9),
            render_distance: 1,
            ..WorldConfig::default()
        };
        let mut application = ApplicationState::new(config, RecordingSink::new());
        application.load_world().for_each(drop);
        application
    }

    #[test]
    fn held_forward_key_walks_along_the_view() {
        let mut application = application();
        application.frame();
        let start = application.engine_state.player.position;

        application.input_manager.set_key(KeyCode::KeyW, true);
        for _ in 0..5 {
            application.frame();
        }

        let end = application.engine_state.player.position;
        assert!(end.x > start.x);
        assert_eq!(application.frames(), 6);
    }

    #[test]
    fn world_loads_one_row_per_call() {
        let config = WorldConfig {
            seed: Some(9),
            render_distance: 1,
            ..WorldConfig::default()
        };
        let mut application = ApplicationState::new(config, RecordingSink::new());

        let first = application.load_next_row().unwrap();
        assert_eq!(first, LoadProgress { rows_done: 1, rows_total: 3 });
        let world = &application.engine_state.world;
        assert!((-1..=1).all(|dx| world.contains_chunk(ChunkCoord::new(dx, -1))));
        assert!(!world.contains_chunk(ChunkCoord::new(0, 1)));

        assert_eq!(application.load_next_row().unwrap().rows_done, 2);
        assert!(application.load_next_row().unwrap().is_complete());
        assert_eq!(application.load_next_row(), None);
        assert_eq!(application.engine_state.world.len(), 9);
    }

    #[test]
    fn close_request_stops_the_host() {
        let mut application = application();
        assert!(application.window_event(&WindowEvent::Resized(PhysicalSize::new(800, 600))));
        assert!(!application.window_event(&WindowEvent::CloseRequested));
    }

    #[test]
    fn losing_focus_releases_the_pointer() {
        let mut application = application();
        application.input_manager.set_pointer_locked(true);
        application.window_event(&WindowEvent::Focused(false));
        assert!(!application.input_manager.is_pointer_locked());
    }

    #[test]
    fn frames_feed_meshes_to_the_sink() {
        let mut application = application();
        application.frame();
        assert!(application.sink.submitted() > 0);
        assert_eq!(application.sink.violations(), 0);
    }
}
