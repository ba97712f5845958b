//=========================================================================
// Camera
//=========================================================================
//
// A named viewport onto the stage. Cameras are created and owned by the
// `CameraManager`; outside code addresses them through `CameraId`.
//
// Panning is queued with `pan_by` and committed by `update()`, so every
// camera moves at the same point of the frame.
//
//=========================================================================

use std::fmt;

use crate::core::math::{Size, Vec2};

//=== CameraId ============================================================

/// Allocation-ordered camera identity. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CameraId(u32);

impl CameraId {
    pub(crate) fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CameraId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "camera#{}", self.0)
    }
}

//=== Camera ==============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    id: CameraId,
    name: String,
    position: Vec2,
    size: Size,
    pending_pan: Vec2,
    update_count: u64,
    render_count: u64,
}

impl Camera {
    pub(crate) fn new(id: CameraId, name: String, position: Vec2, size: Size) -> Self {
        Self {
            id,
            name,
            position,
            size,
            pending_pan: Vec2::ZERO,
            update_count: 0,
            render_count: 0,
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn id(&self) -> CameraId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Top-left corner in stage pixels.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Frames this camera has been updated.
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Frames this camera has been rendered.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    //--- Movement ---------------------------------------------------------

    /// Queues a pan, applied on the next `update()`.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pending_pan = self.pending_pan + delta;
    }

    /// Jumps to `position` immediately and drops any queued pan.
    pub fn move_to(&mut self, position: Vec2) {
        self.position = position;
        self.pending_pan = Vec2::ZERO;
    }

    pub fn resize(&mut self, size: Size) {
        self.size = size;
    }

    //--- Frame Hooks ------------------------------------------------------

    pub(crate) fn update(&mut self) {
        self.position = self.position + self.pending_pan;
        self.pending_pan = Vec2::ZERO;
        self.update_count += 1;
    }

    pub(crate) fn render(&mut self) {
        self.render_count += 1;
    }
}
