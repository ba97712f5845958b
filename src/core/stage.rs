//=========================================================================
// Stage
//=========================================================================
//
// Host surface the game draws into.
//
// `ready` gates state activation: a state made current before the stage
// is ready is only initialised once `Game::boot()` runs.
//
//=========================================================================

use super::math::Size;

/// Readiness and default viewport size of the hosting surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stage {
    ready: bool,
    size: Size,
}

impl Stage {
    /// Creates a stage that is not yet ready.
    pub fn new(size: Size) -> Self {
        Self { ready: false, size }
    }

    /// Whether the host surface exists and states may be initialised.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub(crate) fn mark_ready(&mut self) {
        self.ready = true;
    }

    pub(crate) fn resize(&mut self, size: Size) {
        self.size = size;
    }
}
