//=========================================================================
// Global Engine State
//=========================================================================
//
// Shared data the managers operate on, kept apart from the managers
// themselves so hooks can borrow it while a manager is mid-call.
//
// Architecture:
//   Game
//     ├─ StateManager, CameraManager   (logic)
//     └─ GameContext                   (data: stage, input, files, loader)
//
//=========================================================================

mod game_context;

pub use game_context::{GameContext, GameId};
