//=========================================================================
// Input Buffer
//
// Holds the input that arrives between two redraws so the game sees it
// as one batch at the start of the next frame.
//
// - discrete: key and button events, in arrival order, with immediate
//   repeats (OS key repeat) collapsed
// - continuous: only the latest cursor position is kept
//
//=========================================================================

use crate::core::input::InputEvent;

pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: Option<InputEvent>,
}

impl InputBuffer {
    pub(crate) fn new() -> Self {
        const DISCRETE_BASE: usize = 64;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            continuous: None,
        }
    }

    /// Replaces any cursor movement buffered earlier this frame.
    pub(crate) fn push_continuous(&mut self, event: InputEvent) {
        self.continuous = Some(event);
    }

    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    /// Discrete events first, then the latest cursor position.
    pub(crate) fn drain(&mut self) -> Vec<InputEvent> {
        let mut events: Vec<InputEvent> = self.discrete.drain(..).collect();
        events.extend(self.continuous.take());
        events
    }

    pub(crate) fn len(&self) -> usize {
        self.discrete.len() + usize::from(self.continuous.is_some())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_none()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
