//! # Input Manager
//!
//! Collects key, button and mouse motion state between frames and turns it
//! into a [`ProcessedInputState`] once per frame. Mouse motion only reaches the
//! engine while the pointer is locked.
//!
//! Hosts either forward winit window events through [`InputManager::intake_input`]
//! or set key and button states directly (the browser bridge does the latter).

use std::collections::HashMap;

use winit::{
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use super::input_state::{MouseInput, ProcessedInputState, RawInputState};

/// Keys the engine reacts to.
pub const KEY_CODES: [KeyCode; 16] = [
    KeyCode::KeyW,
    KeyCode::KeyS,
    KeyCode::KeyA,
    KeyCode::KeyD,
    KeyCode::Space,
    KeyCode::ShiftLeft,
    KeyCode::KeyF,
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Mouse buttons the engine reacts to.
pub const MOUSE_BUTTONS: [MouseButton; 2] = [MouseButton::Left, MouseButton::Right];

/// Down states for the tracked keys and buttons, for this frame and the last.
#[derive(Debug)]
pub struct InputManager {
    /// Key down states at the end of the previous frame
    pub keyboard_inputs_old: HashMap<KeyCode, bool>,
    /// Key down states so far this frame
    pub keyboard_inputs_new: HashMap<KeyCode, bool>,

    /// Mouse buttons and accumulated motion
    pub mouse_inputs: MouseInput,

    pointer_locked: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    /// Creates a new InputManager with every tracked key and button released
    /// and the pointer unlocked.
    pub fn new() -> Self {
        let keyboard_inputs_old: HashMap<KeyCode, bool> =
            KEY_CODES.iter().map(|&key| (key, false)).collect();
        let keyboard_inputs_new = keyboard_inputs_old.clone();

        let mouse_button_inputs_old: HashMap<MouseButton, bool> =
            MOUSE_BUTTONS.iter().map(|&button| (button, false)).collect();
        let mouse_inputs = MouseInput {
            mouse_button_inputs_new: mouse_button_inputs_old.clone(),
            mouse_button_inputs_old,
            mouse_delta: None,
        };

        Self {
            keyboard_inputs_old,
            keyboard_inputs_new,
            mouse_inputs,
            pointer_locked: false,
        }
    }

    /// Copies this frame's down states into the previous-frame maps.
    pub fn move_old_states(&mut self) {
        for (key, new_state) in self.keyboard_inputs_new.iter() {
            if let Some(old_state) = self.keyboard_inputs_old.get_mut(key) {
                *old_state = *new_state;
            }
        }

        for (button, new_state) in self.mouse_inputs.mouse_button_inputs_new.iter() {
            if let Some(old_state) = self.mouse_inputs.mouse_button_inputs_old.get_mut(button) {
                *old_state = *new_state;
            }
        }
    }

    /// Feeds a winit window event into the tracked state.
    ///
    /// Losing focus releases every key and button.
    pub fn intake_input(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state,
                        physical_key: PhysicalKey::Code(key),
                        ..
                    },
                ..
            } => self.set_key(*key, *state == ElementState::Pressed),
            WindowEvent::MouseInput { button, state, .. } => {
                self.set_mouse_button(*button, *state == ElementState::Pressed)
            }
            WindowEvent::Focused(false) => self.release_all(),
            _ => {}
        }
    }

    /// Records a key as down or up. Untracked keys are ignored.
    pub fn set_key(&mut self, key: KeyCode, down: bool) {
        if let Some(key_state) = self.keyboard_inputs_new.get_mut(&key) {
            *key_state = down;
        }
    }

    /// Records a mouse button as down or up. Untracked buttons are ignored.
    pub fn set_mouse_button(&mut self, button: MouseButton, down: bool) {
        if let Some(button_state) = self.mouse_inputs.mouse_button_inputs_new.get_mut(&button) {
            *button_state = down;
        }
    }

    /// Adds a raw mouse motion `delta` (pixels) to this frame's total.
    pub fn intake_mouse_motion(&mut self, delta: (f64, f64)) {
        let (x, y) = self.mouse_inputs.mouse_delta.unwrap_or((0.0, 0.0));
        self.mouse_inputs.mouse_delta = Some((x + delta.0, y + delta.1));
    }

    /// Captures or releases the pointer. Mouse look only works while captured.
    pub fn set_pointer_locked(&mut self, locked: bool) {
        self.pointer_locked = locked;
        if !locked {
            self.mouse_inputs.mouse_delta = None;
        }
    }

    /// Whether the pointer is captured.
    pub fn is_pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    /// Marks every key and button as up, e.g. when focus is lost.
    pub fn release_all(&mut self) {
        self.keyboard_inputs_new.values_mut().for_each(|down| *down = false);
        self.mouse_inputs
            .mouse_button_inputs_new
            .values_mut()
            .for_each(|down| *down = false);
    }

    /// Compares this frame's down states against the previous frame's.
    pub fn create_processed_input_state(&self) -> ProcessedInputState {
        let keyboard_states = self
            .keyboard_inputs_new
            .iter()
            .map(|(key, &new_state)| {
                let old_state = self.keyboard_inputs_old.get(key).copied().unwrap_or(false);
                (*key, RawInputState::from_raw_states(old_state, new_state))
            })
            .collect();

        let mouse_button_states = self
            .mouse_inputs
            .mouse_button_inputs_new
            .iter()
            .map(|(button, &new_state)| {
                let old_state = self
                    .mouse_inputs
                    .mouse_button_inputs_old
                    .get(button)
                    .copied()
                    .unwrap_or(false);
                (*button, RawInputState::from_raw_states(old_state, new_state))
            })
            .collect();

        ProcessedInputState {
            keyboard_states,
            mouse_button_states,
            mouse_delta: self.mouse_inputs.mouse_delta.filter(|_| self.pointer_locked),
            pointer_locked: self.pointer_locked,
        }
    }

    /// Returns the processed input state and resets per-frame state.
    ///
    /// Call once per frame.
    pub fn get_and_reset_processed_input(&mut self) -> ProcessedInputState {
        let processed_input = self.create_processed_input_state();
        self.reset_inputs();
        processed_input
    }

    /// Rolls the current state into the previous one and clears accumulated motion.
    pub fn reset_inputs(&mut self) {
        self.move_old_states();
        self.mouse_inputs.mouse_delta = None;
    }
}
