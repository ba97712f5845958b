//=========================================================================
// State Context
//=========================================================================
//
// What a state can reach during a hook: shared engine data, its own
// libraries, the loader's enqueue side and the request queue.
//
//=========================================================================

use super::{Param, RequestQueue, StateRequest};
use crate::core::assets::{AssetRequest, FileStore, Libraries, Loader};
use crate::core::globals::GameId;
use crate::core::input::InputState;
use crate::core::stage::Stage;

/// Borrowed view handed to every [`State`](super::State) hook.
pub struct StateContext<'a> {
    pub game: GameId,
    pub stage: &'a Stage,
    pub input: &'a InputState,
    pub files: &'a FileStore,
    /// The state's own texture/audio/data libraries.
    pub libraries: &'a Libraries,
    loader: &'a mut dyn Loader,
    requests: &'a mut RequestQueue,
}

impl<'a> StateContext<'a> {
    pub(crate) fn new(
        game: GameId,
        stage: &'a Stage,
        input: &'a InputState,
        files: &'a FileStore,
        libraries: &'a Libraries,
        loader: &'a mut dyn Loader,
        requests: &'a mut RequestQueue,
    ) -> Self {
        Self {
            game,
            stage,
            input,
            files,
            libraries,
            loader,
            requests,
        }
    }

    /// Queues an asset with the loader. Meaningful inside `preload`.
    pub fn load(&mut self, request: AssetRequest) {
        self.loader.enqueue(request);
    }

    /// Requests a switch to a registered state at the end of the frame.
    pub fn switch_to(&mut self, key: impl Into<String>) {
        self.requests.push(StateRequest::Switch {
            key: key.into(),
            init_params: None,
            create_params: None,
        });
    }

    /// Like [`switch_to`](Self::switch_to), stashing hook parameters.
    pub fn switch_with(
        &mut self,
        key: impl Into<String>,
        init_params: Vec<Param>,
        create_params: Vec<Param>,
    ) {
        self.requests.push(StateRequest::Switch {
            key: key.into(),
            init_params: Some(init_params),
            create_params: Some(create_params),
        });
    }
}
