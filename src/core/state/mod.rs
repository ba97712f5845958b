//=========================================================================
// State System
//=========================================================================
//
// Named units of game logic (menu, level, game over) and the manager
// that drives exactly one of them at a time through its lifecycle.
//
// Lifecycle of a registered state:
// ```text
//   add_state ──> Registered
//                    │ becomes current (stage ready)
//                    ↓
//               boot + init ──> Initialised
//                    │
//          ┌─────────┴──────────┐
//     has preloader        no preloader
//          │                    │
//     preload, loading     create (once)
//     (load_update/frame)       │
//          │ Complete           │
//     load_complete,            │
//     rebuild libraries,        │
//     create                    │
//          └─────────┬──────────┘
//                    ↓
//                  Ready ──> pre_update / update / post_update, post_render
//                    │ swapped out
//                    ↓
//                 destroy (stays registered)
// ```
//
//=========================================================================

mod config;
mod context;
mod error;
mod param;
mod request_queue;
mod source;
mod state_manager;

pub use config::{Capabilities, StateConfig};
pub use context::StateContext;
pub use error::StateError;
pub use param::Param;
pub use request_queue::{RequestQueue, StateRequest};
pub use source::{StateFactories, StateSource};
pub use state_manager::StateManager;

use crate::core::assets::File;
use crate::core::globals::GameId;

//=== State Trait =========================================================

/// A unit of game logic with an ordered lifecycle.
///
/// Every hook has an empty default. Optional phases are gated by
/// [`State::capabilities`], read once when the state is registered: a
/// state that overrides `create` but does not declare
/// [`Capabilities::create`] never has it called.
///
/// Per-frame hooks (`pre_update`, `update`, `post_update`, `post_render`)
/// and `load_update`, `boot` and `destroy` always run when applicable.
///
/// ```rust
/// # use stagehand::prelude::*;
/// struct Menu;
///
/// impl State for Menu {
///     fn name(&self) -> &str {
///         "Menu"
///     }
///
///     fn capabilities(&self) -> Capabilities {
///         Capabilities::NONE.with_create()
///     }
///
///     fn create(&mut self, _ctx: &mut StateContext<'_>, _params: &[Param]) {
///         // build the menu
///     }
/// }
/// ```
pub trait State {
    /// Registry key. Must be non-empty and unique within a manager.
    fn name(&self) -> &str;

    /// Which optional phases this state takes part in.
    fn capabilities(&self) -> Capabilities {
        Capabilities::NONE
    }

    /// Receives the owning game's id when the state is registered.
    fn attach(&mut self, _game: GameId) {}

    /// First hook run when the state is activated on a ready stage.
    fn boot(&mut self, _ctx: &mut StateContext<'_>) {}

    /// Runs once, after `boot`. `params` are the init parameters stashed by
    /// `switch_state`, or empty.
    fn init(&mut self, _ctx: &mut StateContext<'_>, _params: &[Param]) {}

    /// Queue asset requests with [`StateContext::load`].
    fn preload(&mut self, _ctx: &mut StateContext<'_>) {}

    fn load_progress(
        &mut self,
        _ctx: &mut StateContext<'_>,
        _percent: f32,
        _bytes_loaded: u64,
        _file: &File,
    ) {
    }

    fn load_complete(&mut self, _ctx: &mut StateContext<'_>) {}

    /// `params` are the create parameters stashed by `switch_state`, or empty.
    fn create(&mut self, _ctx: &mut StateContext<'_>, _params: &[Param]) {}

    fn pre_update(&mut self, _ctx: &mut StateContext<'_>) {}

    fn update(&mut self, _ctx: &mut StateContext<'_>) {}

    fn post_update(&mut self, _ctx: &mut StateContext<'_>) {}

    /// Called each frame instead of the update triad while loading.
    fn load_update(&mut self, _ctx: &mut StateContext<'_>) {}

    /// Called each frame after all layers have rendered.
    fn post_render(&mut self, _ctx: &mut StateContext<'_>) {}

    /// Called when another state replaces this one as current.
    fn destroy(&mut self, _ctx: &mut StateContext<'_>) {}
}
