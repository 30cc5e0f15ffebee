//! Per-frame key and button transitions, as seen by the engine.

use std::collections::HashMap;
use winit::{event::MouseButton, keyboard::KeyCode};

/// Edge state of a key or button for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawInputState {
    /// Up last frame and this frame
    #[default]
    NotPressed,
    /// Went down this frame
    Pressed,
    /// Down last frame and this frame
    Held,
    /// Went up this frame
    Released,
}

impl RawInputState {
    /// Down this frame, whether new or held
    pub fn is_active(&self) -> bool {
        matches!(self, RawInputState::Pressed | RawInputState::Held)
    }

    /// Went down this frame
    pub fn is_just_pressed(&self) -> bool {
        matches!(self, RawInputState::Pressed)
    }

    /// Went up this frame
    pub fn is_just_released(&self) -> bool {
        matches!(self, RawInputState::Released)
    }

    /// Derives the transition from the previous and current down states
    pub fn from_raw_states(previous: bool, current: bool) -> Self {
        match (previous, current) {
            (false, true) => RawInputState::Pressed,
            (true, true) => RawInputState::Held,
            (true, false) => RawInputState::Released,
            (false, false) => RawInputState::NotPressed,
        }
    }
}

/// Everything the engine needs to know about input for one frame.
///
/// Keys and buttons that are not tracked read as [`RawInputState::NotPressed`].
#[derive(Debug, Default, Clone)]
pub struct ProcessedInputState {
    /// Transition of every tracked key
    pub keyboard_states: HashMap<KeyCode, RawInputState>,

    /// Transition of every tracked mouse button
    pub mouse_button_states: HashMap<MouseButton, RawInputState>,

    /// Mouse movement delta since the last frame (x, y), only while the pointer is locked
    pub mouse_delta: Option<(f64, f64)>,

    /// Whether the pointer is captured by the view
    pub pointer_locked: bool,
}

impl ProcessedInputState {
    /// Transition of `key` this frame.
    pub fn get_key_state(&self, key: KeyCode) -> RawInputState {
        self.keyboard_states.get(&key).copied().unwrap_or_default()
    }

    /// Transition of `button` this frame.
    pub fn get_mouse_button_state(&self, button: MouseButton) -> RawInputState {
        self.mouse_button_states.get(&button).copied().unwrap_or_default()
    }

    /// Mouse movement this frame, if the pointer is locked and it moved.
    pub fn get_mouse_delta(&self) -> Option<(f64, f64)> {
        self.mouse_delta
    }
}

/// Raw mouse state between two frames.
#[derive(Debug, Default)]
pub struct MouseInput {
    /// Button down states at the end of the previous frame
    pub mouse_button_inputs_old: HashMap<MouseButton, bool>,
    /// Button down states so far this frame
    pub mouse_button_inputs_new: HashMap<MouseButton, bool>,

    /// Mouse movement accumulated since the last frame (x, y)
    pub mouse_delta: Option<(f64, f64)>,
}
