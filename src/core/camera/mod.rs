//=========================================================================
// Camera System
//=========================================================================
//
// Cameras, the manager that owns them, and the rendering collaborators
// the manager drives every frame.
//
// Per frame (after the state update):
//   CameraManager::update(layers) → CameraManager::render(layers)
//
//=========================================================================

mod camera_manager;
mod collaborators;
mod error;
mod view;

pub use camera_manager::{CameraManager, DEFAULT_CAMERA_NAME};
pub use collaborators::{CameraSurface, LayerRenderer, NullLayers, OffsetSurface};
pub use error::CameraError;
pub use view::{Camera, CameraId};
