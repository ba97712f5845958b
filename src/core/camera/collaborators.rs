//=========================================================================
// Camera Collaborators
//=========================================================================
//
// The two outside parties the camera manager drives each frame:
//
// - `LayerRenderer`: draws every layer through a camera and, in
//   single-camera mode, shifts canvas layers to follow it.
// - `CameraSurface`: the element holding the stage view; in single-camera
//   mode it is moved opposite to the camera to pan the whole view.
//
//=========================================================================

use log::trace;

use super::Camera;
use crate::core::math::Vec2;

//=== LayerRenderer =======================================================

pub trait LayerRenderer {
    /// Draws all layers as seen through `camera`.
    fn render(&mut self, camera: &Camera);

    /// Offsets canvas-based layers by the camera position.
    fn offset_canvas_layers(&mut self, x: f32, y: f32);
}

/// Renderer for games without layers.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLayers;

impl LayerRenderer for NullLayers {
    fn render(&mut self, _camera: &Camera) {}

    fn offset_canvas_layers(&mut self, _x: f32, _y: f32) {}
}

//=== CameraSurface =======================================================

pub trait CameraSurface {
    /// Places the surface's top-left corner at (`left`, `top`).
    fn set_offset(&mut self, left: f32, top: f32);
}

/// Surface that only remembers where it was last placed.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct OffsetSurface {
    offset: Vec2,
}

impl OffsetSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }
}

impl CameraSurface for OffsetSurface {
    fn set_offset(&mut self, left: f32, top: f32) {
        trace!("Camera surface offset to ({}, {})", left, top);
        self.offset = Vec2::new(left, top);
    }
}
