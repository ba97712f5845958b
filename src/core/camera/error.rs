//=========================================================================
// Camera Errors
//=========================================================================

use std::fmt;

/// Why a camera could not be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// Single-camera mode and a camera already exists.
    SingleCameraLimit,
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SingleCameraLimit => write!(
                f,
                "cannot add cameras in single camera mode; reposition the default camera instead"
            ),
        }
    }
}

impl std::error::Error for CameraError {}
