//=========================================================================
// Input State
//=========================================================================
//
// Persistent input snapshot with per-frame deltas.
//
// Frame lifecycle: begin_frame() → process_events() → query
//
// `reset()` drops everything, including held keys. The state manager
// calls it whenever the current state is swapped out, so a key held
// while leaving a menu does not leak into the next state.
//
//=========================================================================

use std::collections::HashSet;

use super::event::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== InputState ==========================================================

/// Tracks held keys/buttons, this frame's presses and the cursor.
#[derive(Debug, Default)]
pub struct InputState {
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    keys_pressed_this_frame: HashSet<KeyCode>,
    buttons_pressed_this_frame: HashSet<MouseButton>,
    mouse_position: (f32, f32),
    modifiers: Modifiers,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears per-frame deltas; held state survives.
    pub(crate) fn begin_frame(&mut self) {
        self.keys_pressed_this_frame.clear();
        self.buttons_pressed_this_frame.clear();
    }

    pub(crate) fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    pub(crate) fn process_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key, modifiers } => {
                self.modifiers = modifiers;
                if self.keys_down.insert(key) {
                    self.keys_pressed_this_frame.insert(key);
                }
            }
            InputEvent::KeyUp { key, modifiers } => {
                self.modifiers = modifiers;
                self.keys_down.remove(&key);
            }
            InputEvent::MouseButtonDown { button, modifiers } => {
                self.modifiers = modifiers;
                if self.buttons_down.insert(button) {
                    self.buttons_pressed_this_frame.insert(button);
                }
            }
            InputEvent::MouseButtonUp { button, modifiers } => {
                self.modifiers = modifiers;
                self.buttons_down.remove(&button);
            }
            InputEvent::MouseMoved { x, y } => {
                self.mouse_position = (x, y);
            }
        }
    }

    /// Forgets all held and pressed input. Cursor position is kept.
    pub fn reset(&mut self) {
        self.keys_down.clear();
        self.buttons_down.clear();
        self.keys_pressed_this_frame.clear();
        self.buttons_pressed_this_frame.clear();
        self.modifiers = Modifiers::NONE;
    }

    //--- Queries ----------------------------------------------------------

    /// Returns `true` if the key went down this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed_this_frame.contains(&key)
    }

    /// Returns `true` while the key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed_this_frame.contains(&button)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
