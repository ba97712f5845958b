//=========================================================================
// State Configuration
//=========================================================================
//
// Per-entry record the manager keeps alongside each registered state:
// capability flags (fixed at registration), lifecycle flags (mutated by
// the manager) and parameters stashed for deferred hooks.
//
//=========================================================================

use super::Param;
use crate::core::globals::GameId;

//=== Capabilities ========================================================

/// Optional lifecycle phases a state takes part in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub init: bool,
    pub preloader: bool,
    pub load_progress: bool,
    pub load_complete: bool,
    pub create: bool,
}

impl Capabilities {
    pub const NONE: Self = Self {
        init: false,
        preloader: false,
        load_progress: false,
        load_complete: false,
        create: false,
    };

    pub const ALL: Self = Self {
        init: true,
        preloader: true,
        load_progress: true,
        load_complete: true,
        create: true,
    };

    pub const fn with_init(mut self) -> Self {
        self.init = true;
        self
    }

    pub const fn with_preloader(mut self) -> Self {
        self.preloader = true;
        self
    }

    pub const fn with_load_progress(mut self) -> Self {
        self.load_progress = true;
        self
    }

    pub const fn with_load_complete(mut self) -> Self {
        self.load_complete = true;
        self
    }

    pub const fn with_create(mut self) -> Self {
        self.create = true;
        self
    }
}

//=== StateConfig =========================================================

/// Registry record for one state.
///
/// `is_initialised` and `is_created` only ever go from `false` to `true`.
/// `is_ready` is `false` exactly while a load cycle for the state is in
/// flight (or before it was first activated).
#[derive(Debug, Clone, PartialEq)]
pub struct StateConfig {
    name: String,
    game: GameId,
    capabilities: Capabilities,
    pub(super) is_initialised: bool,
    pub(super) is_created: bool,
    pub(super) is_ready: bool,
    pub(super) init_params: Option<Vec<Param>>,
    pub(super) create_params: Option<Vec<Param>>,
}

impl StateConfig {
    pub(super) fn new(name: String, game: GameId, capabilities: Capabilities) -> Self {
        Self {
            name,
            game,
            capabilities,
            is_initialised: false,
            is_created: false,
            is_ready: false,
            init_params: None,
            create_params: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Game the state was registered with.
    pub fn game(&self) -> GameId {
        self.game
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn has_init(&self) -> bool {
        self.capabilities.init
    }

    pub fn has_preloader(&self) -> bool {
        self.capabilities.preloader
    }

    pub fn has_load_progress(&self) -> bool {
        self.capabilities.load_progress
    }

    pub fn has_load_complete(&self) -> bool {
        self.capabilities.load_complete
    }

    pub fn has_create(&self) -> bool {
        self.capabilities.create
    }

    pub fn is_initialised(&self) -> bool {
        self.is_initialised
    }

    pub fn is_created(&self) -> bool {
        self.is_created
    }

    pub fn is_ready(&self) -> bool {
        self.is_ready
    }

    pub fn init_params(&self) -> Option<&[Param]> {
        self.init_params.as_deref()
    }

    pub fn create_params(&self) -> Option<&[Param]> {
        self.create_params.as_deref()
    }
}
