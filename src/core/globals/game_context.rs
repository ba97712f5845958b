//=========================================================================
// Game Context
//=========================================================================
//
// Data container passed into `StateManager` operations.
//
// Contains:
// - stage: readiness gate and default viewport size
// - input: keyboard/mouse snapshot, reset on every state swap-out
// - files: the global asset pool (shared with the loader)
// - loader: the external asset fetcher
// - requests: state switches queued from inside hooks
//
//=========================================================================

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::core::assets::{FileStore, Libraries, Loader};
use crate::core::input::InputState;
use crate::core::stage::Stage;
use crate::core::state::{RequestQueue, StateContext};

//=== GameId ==============================================================

/// Identity of a game instance; states are stamped with it on registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameId(u64);

impl GameId {
    /// Allocates a process-unique id.
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "game#{}", self.0)
    }
}

//=== GameContext =========================================================

/// Shared engine data read and written by the state lifecycle.
pub struct GameContext {
    id: GameId,
    pub stage: Stage,
    pub input: InputState,
    pub files: FileStore,
    pub(crate) loader: Box<dyn Loader>,
    pub(crate) requests: RequestQueue,
}

impl GameContext {
    pub fn new(stage: Stage, files: FileStore, loader: Box<dyn Loader>) -> Self {
        Self {
            id: GameId::next(),
            stage,
            input: InputState::new(),
            files,
            loader,
            requests: RequestQueue::new(),
        }
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    /// Requests queued by hooks and not yet applied.
    pub fn requests(&self) -> &RequestQueue {
        &self.requests
    }

    /// Borrows the context for one hook call on a state owning `libraries`.
    pub(crate) fn state_context<'a>(&'a mut self, libraries: &'a Libraries) -> StateContext<'a> {
        StateContext::new(
            self.id,
            &self.stage,
            &self.input,
            &self.files,
            libraries,
            self.loader.as_mut(),
            &mut self.requests,
        )
    }
}

impl fmt::Debug for GameContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameContext")
            .field("id", &self.id)
            .field("stage", &self.stage)
            .field("files", &self.files.len())
            .field("requests", &self.requests.len())
            .finish()
    }
}
