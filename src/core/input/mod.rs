//=========================================================================
// Input System
//=========================================================================
//
// Keyboard/mouse snapshot read by states during their hooks.
//
// Architecture:
//   Platform (winit) → InputEvent → InputState → State hooks
//
// The state manager resets the snapshot on every state swap-out.
//
//=========================================================================

pub mod event;
mod input_state;

pub use event::{InputEvent, KeyCode, Modifiers, MouseButton};
pub use input_state::InputState;
