//=========================================================================
// Core Systems
//
// Platform-independent engine systems driven by `Game`.
//
// Responsibilities:
// - Register states and run the current one through its lifecycle
// - Own the cameras and drive them every frame
// - Hold the data shared by both (stage, input, assets)
//
// Notes:
// Nothing in here touches winit. The platform layer feeds input events
// in and calls `Game::boot` / `Game::frame`; tests drive the same calls
// directly.
//
//=========================================================================

pub mod assets;
pub mod camera;
pub mod globals;
pub mod input;
pub mod math;
pub mod stage;
pub mod state;
