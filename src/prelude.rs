//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use stagehand::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Game facade
pub use crate::engine::{Game, GameBuilder};
pub use crate::platform::PlatformError;

// State system
pub use crate::core::state::{
    Capabilities, Param, State, StateConfig, StateContext, StateError, StateFactories,
    StateSource,
};

// Cameras
pub use crate::core::camera::{
    Camera, CameraError, CameraId, CameraSurface, LayerRenderer, NullLayers, OffsetSurface,
};

// Assets
pub use crate::core::assets::{
    AssetRequest, File, FileKind, FileStore, Libraries, Library, LoadReporter, Loader,
    MemoryLoader, NullLoader,
};

// Input
pub use crate::core::input::{InputState, KeyCode, Modifiers, MouseButton};

// Math
pub use crate::core::math::{Size, Vec2};
