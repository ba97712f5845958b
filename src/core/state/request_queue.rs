//=========================================================================
// State Request Queue
//=========================================================================
//
// Hooks cannot re-enter the manager that is calling them, so they queue
// requests here. `Game::frame()` applies the queue after `post_render`.
//
//=========================================================================

use super::Param;

//=== StateRequest ========================================================

/// A deferred request issued from inside a state hook.
#[derive(Debug, Clone, PartialEq)]
pub enum StateRequest {
    /// Switch to a registered state, as `switch_state(key, None, ..)` would.
    Switch {
        key: String,
        init_params: Option<Vec<Param>>,
        create_params: Option<Vec<Param>>,
    },
}

//=== RequestQueue ========================================================

/// FIFO of pending [`StateRequest`]s.
#[derive(Debug, Default)]
pub struct RequestQueue {
    queue: Vec<StateRequest>,
}

impl RequestQueue {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    pub fn push(&mut self, request: StateRequest) {
        self.queue.push(request);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Takes all queued requests, leaving the queue empty.
    pub fn take(&mut self) -> Vec<StateRequest> {
        std::mem::take(&mut self.queue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_preserves_order_and_empties() {
        let mut queue = RequestQueue::new();
        for key in ["Menu", "Level"] {
            queue.push(StateRequest::Switch {
                key: key.into(),
                init_params: None,
                create_params: None,
            });
        }
        assert_eq!(queue.len(), 2);

        let taken = queue.take();
        assert!(queue.is_empty());
        assert!(matches!(&taken[0], StateRequest::Switch { key, .. } if key == "Menu"));
        assert!(matches!(&taken[1], StateRequest::Switch { key, .. } if key == "Level"));
    }
}
