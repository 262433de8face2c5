//! Held-key tracking on top of the raw input queue.

use std::collections::HashSet;
use crate::input::queue::{InputEvent, InputQueue};

/// DOM `keyCode` values used by the launch controls.
pub mod codes {
    pub const SHIFT: u32 = 16;
    pub const SPACE: u32 = 32;
    pub const ARROW_LEFT: u32 = 37;
    pub const ARROW_UP: u32 = 38;
    pub const ARROW_RIGHT: u32 = 39;
    pub const ARROW_DOWN: u32 = 40;
    pub const DIGIT_1: u32 = 49;
    pub const DIGIT_2: u32 = 50;
    pub const DIGIT_3: u32 = 51;
    pub const A: u32 = 65;
    pub const B: u32 = 66;
    pub const C: u32 = 67;
    pub const D: u32 = 68;
    pub const E: u32 = 69;
    pub const L: u32 = 76;
    pub const Q: u32 = 81;
    pub const R: u32 = 82;
    pub const S: u32 = 83;
    pub const T: u32 = 84;
    pub const V: u32 = 86;
    pub const W: u32 = 87;
    pub const X: u32 = 88;
    pub const Z: u32 = 90;
}

/// Keyboard and pointer state accumulated across frames.
///
/// `apply` folds one step's queued events in; `pressed` answers whether a key
/// went down during that step, `held` whether it is down right now.
#[derive(Debug, Default)]
pub struct KeyState {
    held: HashSet<u32>,
    pressed: Vec<u32>,
    look: (f32, f32),
    pointer_locked: bool,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the events of one step. Clears last step's presses and look delta.
    pub fn apply(&mut self, input: &InputQueue) {
        self.pressed.clear();
        self.look = (0.0, 0.0);
        for event in input.iter() {
            match *event {
                InputEvent::KeyDown { key_code } => {
                    // Auto-repeat keydowns count as a press only the first time.
                    if self.held.insert(key_code) {
                        self.pressed.push(key_code);
                    }
                }
                InputEvent::KeyUp { key_code } => {
                    self.held.remove(&key_code);
                }
                InputEvent::MouseLook { dx, dy } => {
                    self.look.0 += dx;
                    self.look.1 += dy;
                }
                InputEvent::PointerLock { locked } => {
                    self.pointer_locked = locked;
                    if !locked {
                        self.held.clear();
                    }
                }
                InputEvent::Custom { .. } => {}
            }
        }
    }

    pub fn held(&self, key_code: u32) -> bool {
        self.held.contains(&key_code)
    }

    pub fn pressed(&self, key_code: u32) -> bool {
        self.pressed.contains(&key_code)
    }

    /// Keys pressed during the last applied step, in arrival order.
    pub fn pressed_keys(&self) -> &[u32] {
        &self.pressed
    }

    /// Summed mouse-look delta for the last applied step.
    pub fn look_delta(&self) -> (f32, f32) {
        self.look
    }

    pub fn pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    /// Forget every held key and the lock state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
