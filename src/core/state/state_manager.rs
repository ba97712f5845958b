//=========================================================================
// State Manager
//=========================================================================
//
// Owns the registry of states, the single current state, and the
// protocol that moves a state from registration to its per-frame loop.
//
// Entries are stored in registration order and never removed; `current`
// is an index into that list, so swapping states out never drops them.
//
// Load cycles arrive over a channel (see `assets::loader`). At most one
// cycle is observed at a time, and only for the entry that started it.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use super::{Param, State, StateConfig, StateContext, StateError, StateFactories, StateSource};
use crate::core::assets::{load_channel, File, FileStore, Libraries, LoadEvent};
use crate::core::globals::GameContext;

//=== Registry Entry ======================================================

struct StateEntry {
    state: Box<dyn State>,
    config: StateConfig,
    libraries: Libraries,
}

//=== Load Cycle ==========================================================

struct LoadCycle {
    entry: usize,
    receiver: Receiver<LoadEvent>,
    disconnected: bool,
}

//=== StateManager ========================================================

/// Registers states and drives the current one through its lifecycle.
///
/// Every operation takes the [`GameContext`] the hooks need. Failures are
/// reported as `false` (with a log line) by the plain methods, or as a
/// [`StateError`] by their `try_` counterparts; nothing here panics on
/// bad input.
pub struct StateManager {
    entries: Vec<StateEntry>,
    current: Option<usize>,
    factories: StateFactories,
    load: Option<LoadCycle>,
}

impl StateManager {
    //--- Construction -----------------------------------------------------

    /// Creates an empty manager resolving [`StateSource::Named`] through
    /// `factories`.
    pub fn new(factories: StateFactories) -> Self {
        Self {
            entries: Vec::new(),
            current: None,
            factories,
            load: None,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a state; optionally makes it current straight away.
    ///
    /// Returns `false` if the state has an empty name, its name is already
    /// registered, or a named factory does not exist.
    pub fn add_state(
        &mut self,
        source: StateSource,
        switch_to: bool,
        ctx: &mut GameContext,
    ) -> bool {
        match self.try_add_state(source, switch_to, ctx) {
            Ok(()) => true,
            Err(e) => {
                warn!("add_state refused: {}", e);
                false
            }
        }
    }

    /// [`add_state`](Self::add_state) with the reason for a refusal.
    ///
    /// With `switch_to`, the new state is activated directly; unlike
    /// [`switch_state`](Self::switch_state) this does not wait for a
    /// loading current state.
    pub fn try_add_state(
        &mut self,
        source: StateSource,
        switch_to: bool,
        ctx: &mut GameContext,
    ) -> Result<(), StateError> {
        let mut state = self.resolve(source)?;

        let name = state.name().to_owned();
        if name.is_empty() {
            return Err(StateError::EmptyName);
        }
        if self.contains(&name) {
            return Err(StateError::DuplicateName(name));
        }

        state.attach(ctx.id());
        let config = StateConfig::new(name.clone(), ctx.id(), state.capabilities());

        debug!("Registered state {:?} ({:?})", name, config.capabilities());
        self.entries.push(StateEntry {
            state,
            config,
            libraries: Libraries::new(),
        });

        if switch_to {
            if let Err(e) = self.set_current_state(&name, ctx) {
                warn!("State {:?} registered but not activated: {}", name, e);
            }
        }

        Ok(())
    }

    fn resolve(&self, source: StateSource) -> Result<Box<dyn State>, StateError> {
        match source {
            StateSource::Instance(state) => Ok(state),
            StateSource::Factory(build) => Ok(build()),
            StateSource::Named(name) => self
                .factories
                .build(&name)
                .ok_or(StateError::UnknownFactory(name)),
        }
    }

    //--- Transitions ------------------------------------------------------

    /// Makes `key` the current state.
    ///
    /// If `key` is not registered and `source` is given, it is
    /// registered first. If either parameter list is given, both are
    /// stashed on the target (a missing one as an empty list) and applied
    /// to its `init`/`create` hooks.
    ///
    /// Returns `false` while the current state is still loading, when
    /// `key` is already current, or when `key` cannot be found.
    pub fn switch_state(
        &mut self,
        key: &str,
        source: Option<StateSource>,
        init_params: Option<Vec<Param>>,
        create_params: Option<Vec<Param>>,
        ctx: &mut GameContext,
    ) -> bool {
        match self.try_switch_state(key, source, init_params, create_params, ctx) {
            Ok(()) => true,
            Err(e) => {
                warn!("switch_state({:?}) refused: {}", key, e);
                false
            }
        }
    }

    /// [`switch_state`](Self::switch_state) with the reason for a refusal.
    pub fn try_switch_state(
        &mut self,
        key: &str,
        source: Option<StateSource>,
        init_params: Option<Vec<Param>>,
        create_params: Option<Vec<Param>>,
        ctx: &mut GameContext,
    ) -> Result<(), StateError> {
        // Never interrupt an in-flight load
        if let Some(current) = self.current_config() {
            if !current.is_ready() {
                return Err(StateError::LoadInProgress(current.name().to_owned()));
            }
        }

        if !self.contains(key) {
            if let Some(source) = source {
                self.try_add_state(source, false, ctx)?;
            }
        }

        if init_params.is_some() || create_params.is_some() {
            if let Some(index) = self.index_of(key) {
                let config = &mut self.entries[index].config;
                config.init_params = Some(init_params.unwrap_or_default());
                config.create_params = Some(create_params.unwrap_or_default());
            }
        }

        self.set_current_state(key, ctx)
    }

    fn set_current_state(&mut self, key: &str, ctx: &mut GameContext) -> Result<(), StateError> {
        if self.current_name() == Some(key) {
            return Err(StateError::AlreadyCurrent(key.to_owned()));
        }

        let Some(target) = self.index_of(key) else {
            return Err(StateError::UnknownState(key.to_owned()));
        };

        if let Some(outgoing) = self.current {
            debug!("Destroying state {:?}", self.entries[outgoing].config.name());
            ctx.input.reset();
            if self.load.take().is_some() {
                warn!(
                    "Abandoning load cycle of {:?}",
                    self.entries[outgoing].config.name()
                );
            }
            self.call_hook(outgoing, ctx, |state, sc| state.destroy(sc));
        }

        self.current = Some(target);
        info!("State {:?} is now current", key);

        if ctx.stage.is_ready() {
            self.initialise(target, ctx);
            self.check_preload(target, ctx);
        } else {
            debug!("Stage not ready, deferring activation of {:?}", key);
        }

        Ok(())
    }

    /// Runs the deferred activation of the current state once the stage
    /// is ready. Does nothing if there is no current state or it has
    /// already been initialised.
    pub fn boot(&mut self, ctx: &mut GameContext) {
        let Some(index) = self.current else {
            debug!("State manager booted with no current state");
            return;
        };

        if self.entries[index].config.is_initialised {
            return;
        }

        info!("Booting state {:?}", self.entries[index].config.name());
        self.initialise(index, ctx);
        self.check_preload(index, ctx);
    }

    //--- Lifecycle Steps --------------------------------------------------

    fn initialise(&mut self, index: usize, ctx: &mut GameContext) {
        if self.entries[index].config.is_initialised {
            return;
        }

        self.call_hook(index, ctx, |state, sc| state.boot(sc));

        let config = &self.entries[index].config;
        if config.has_init() {
            let params = config.init_params.clone().unwrap_or_default();
            self.call_hook(index, ctx, |state, sc| state.init(sc, &params));
        }

        self.entries[index].config.is_initialised = true;
    }

    fn check_preload(&mut self, index: usize, ctx: &mut GameContext) {
        if self.entries[index].config.has_preloader() {
            let (reporter, receiver) = load_channel();
            ctx.loader.init(reporter);

            self.entries[index].config.is_ready = false;
            self.load = Some(LoadCycle {
                entry: index,
                receiver,
                disconnected: false,
            });
            debug!("Load cycle started for {:?}", self.entries[index].config.name());

            self.call_hook(index, ctx, |state, sc| state.preload(sc));
            ctx.loader.start_load();
            return;
        }

        let config = &mut self.entries[index].config;
        if config.has_create() && !config.is_created {
            config.is_created = true;
            let params = config.create_params.clone().unwrap_or_default();
            self.call_hook(index, ctx, |state, sc| state.create(sc, &params));
        }

        self.entries[index].config.is_ready = true;
    }

    //--- Load Cycle -------------------------------------------------------

    /// Dispatches whatever the loader has reported since the last poll.
    ///
    /// Called by [`update`](Self::update); hosts may also call it directly
    /// to react to loader events outside the frame loop.
    pub fn poll_loader(&mut self, ctx: &mut GameContext) {
        let Some(cycle) = self.load.as_mut() else {
            return;
        };

        if self.current != Some(cycle.entry) {
            warn!("Dropping load cycle for a state that is no longer current");
            self.load = None;
            return;
        }

        let mut events = Vec::new();
        loop {
            match cycle.receiver.try_recv() {
                Ok(event) => {
                    let complete = matches!(event, LoadEvent::Complete);
                    events.push(event);
                    if complete {
                        break;
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !cycle.disconnected {
                        cycle.disconnected = true;
                        warn!("Loader dropped its reporter without completing; state stays loading");
                    }
                    break;
                }
            }
        }

        for event in events {
            match event {
                LoadEvent::Progress {
                    percent,
                    bytes_loaded,
                    file,
                } => self.on_load_progress(percent, bytes_loaded, &file, ctx),
                LoadEvent::Complete => {
                    self.load = None;
                    self.on_load_complete(ctx);
                }
            }
        }
    }

    fn on_load_progress(&mut self, percent: f32, bytes_loaded: u64, file: &File, ctx: &mut GameContext) {
        let Some(index) = self.current else {
            return;
        };

        trace!("Load progress {:.1}% ({} bytes, {:?})", percent, bytes_loaded, file.key());
        if self.entries[index].config.has_load_progress() {
            self.call_hook(index, ctx, |state, sc| {
                state.load_progress(sc, percent, bytes_loaded, file)
            });
        }
    }

    fn on_load_complete(&mut self, ctx: &mut GameContext) {
        let Some(index) = self.current else {
            return;
        };

        debug!("Load complete for {:?}", self.entries[index].config.name());

        if self.entries[index].config.has_load_complete() {
            self.call_hook(index, ctx, |state, sc| state.load_complete(sc));
        }

        self.rebuild_libraries(&ctx.files);

        let config = &mut self.entries[index].config;
        config.is_ready = true;

        if config.has_create() {
            config.is_created = true;
            let params = config.create_params.clone().unwrap_or_default();
            self.call_hook(index, ctx, |state, sc| state.create(sc, &params));
        }
    }

    /// Refills the current state's libraries from the global file store.
    pub fn rebuild_libraries(&mut self, files: &FileStore) {
        let Some(index) = self.current else {
            return;
        };

        let StateEntry {
            config, libraries, ..
        } = &mut self.entries[index];
        libraries.clear();

        for key in files.keys() {
            if let Some(file) = files.get_file(&key) {
                libraries.route(file);
            }
        }

        debug!(
            "Libraries rebuilt for {:?}: {} textures, {} audio, {} data",
            config.name(),
            libraries.textures.len(),
            libraries.audio.len(),
            libraries.data.len()
        );
    }

    //--- Update Loop ------------------------------------------------------

    /// Per-frame tick: polls the loader, then runs the update triad on a
    /// ready current state, or `load_update` on a loading one.
    pub fn update(&mut self, ctx: &mut GameContext) {
        self.poll_loader(ctx);

        let Some(index) = self.current else {
            return;
        };

        if self.entries[index].config.is_ready {
            self.call_hook(index, ctx, |state, sc| {
                state.pre_update(sc);
                state.update(sc);
                state.post_update(sc);
            });
        } else {
            trace!("Routing frame to load_update");
            self.call_hook(index, ctx, |state, sc| state.load_update(sc));
        }
    }

    /// Runs `post_render` on a ready current state.
    pub fn post_render(&mut self, ctx: &mut GameContext) {
        let Some(index) = self.current else {
            return;
        };

        if self.entries[index].config.is_ready {
            self.call_hook(index, ctx, |state, sc| state.post_render(sc));
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index_of(key).is_some()
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current_config().map(StateConfig::name)
    }

    pub fn current_config(&self) -> Option<&StateConfig> {
        self.current.map(|index| &self.entries[index].config)
    }

    pub fn config(&self, key: &str) -> Option<&StateConfig> {
        self.index_of(key).map(|index| &self.entries[index].config)
    }

    pub fn libraries(&self, key: &str) -> Option<&Libraries> {
        self.index_of(key).map(|index| &self.entries[index].libraries)
    }

    pub fn current_libraries(&self) -> Option<&Libraries> {
        self.current.map(|index| &self.entries[index].libraries)
    }

    /// Whether a load cycle is in flight for the current state.
    pub fn is_loading(&self) -> bool {
        self.load.is_some()
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.config.name())
    }

    //--- Internal Helpers -------------------------------------------------

    fn index_of(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.config.name() == key)
    }

    fn call_hook<F>(&mut self, index: usize, ctx: &mut GameContext, hook: F)
    where
        F: FnOnce(&mut dyn State, &mut StateContext<'_>),
    {
        let StateEntry {
            state, libraries, ..
        } = &mut self.entries[index];
        let mut state_ctx = ctx.state_context(libraries);
        hook(state.as_mut(), &mut state_ctx);
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new(StateFactories::new())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::core::assets::{
        AssetRequest, FileKind, LoadReporter, Loader, MemoryLoader, NullLoader,
    };
    use crate::core::math::Size;
    use crate::core::stage::Stage;
    use crate::core::state::{Capabilities, StateRequest};

    //--- Test Helpers -----------------------------------------------------

    type CallLog = Rc<RefCell<Vec<String>>>;

    /// State that records every hook call as "<name>.<hook>".
    struct Probe {
        name: String,
        caps: Capabilities,
        log: CallLog,
        requests: Vec<AssetRequest>,
    }

    impl Probe {
        fn new(name: &str, caps: Capabilities, log: &CallLog) -> Self {
            Self {
                name: name.to_owned(),
                caps,
                log: Rc::clone(log),
                requests: Vec::new(),
            }
        }

        fn loading(mut self, request: AssetRequest) -> Self {
            self.requests.push(request);
            self
        }

        fn record(&self, hook: &str) {
            self.log.borrow_mut().push(format!("{}.{}", self.name, hook));
        }
    }

    fn format_params(params: &[Param]) -> String {
        params.iter().map(|p| format!("{:?}", p)).collect::<Vec<_>>().join(",")
    }

    impl State for Probe {
        fn name(&self) -> &str {
            &self.name
        }

        fn capabilities(&self) -> Capabilities {
            self.caps
        }

        fn boot(&mut self, _ctx: &mut StateContext<'_>) {
            self.record("boot");
        }

        fn init(&mut self, _ctx: &mut StateContext<'_>, params: &[Param]) {
            self.record(&format!("init({})", format_params(params)));
        }

        fn preload(&mut self, ctx: &mut StateContext<'_>) {
            self.record("preload");
            for request in self.requests.clone() {
                ctx.load(request);
            }
        }

        fn load_progress(
            &mut self,
            _ctx: &mut StateContext<'_>,
            percent: f32,
            _bytes_loaded: u64,
            file: &File,
        ) {
            self.record(&format!("load_progress({},{})", percent, file.key()));
        }

        fn load_complete(&mut self, ctx: &mut StateContext<'_>) {
            self.record(&format!("load_complete(libs={})", ctx.libraries.len()));
        }

        fn create(&mut self, ctx: &mut StateContext<'_>, params: &[Param]) {
            self.record(&format!(
                "create({};libs={})",
                format_params(params),
                ctx.libraries.len()
            ));
        }

        fn pre_update(&mut self, _ctx: &mut StateContext<'_>) {
            self.record("pre_update");
        }

        fn update(&mut self, _ctx: &mut StateContext<'_>) {
            self.record("update");
        }

        fn post_update(&mut self, _ctx: &mut StateContext<'_>) {
            self.record("post_update");
        }

        fn load_update(&mut self, _ctx: &mut StateContext<'_>) {
            self.record("load_update");
        }

        fn post_render(&mut self, _ctx: &mut StateContext<'_>) {
            self.record("post_render");
        }

        fn destroy(&mut self, _ctx: &mut StateContext<'_>) {
            self.record("destroy");
        }
    }

    /// Loader that hands its reporter back to the test.
    #[derive(Default)]
    struct ManualLoader {
        reporter: Rc<RefCell<Option<LoadReporter>>>,
        enqueued: Rc<RefCell<Vec<String>>>,
        starts: Rc<RefCell<usize>>,
    }

    impl Loader for ManualLoader {
        fn init(&mut self, reporter: LoadReporter) {
            *self.reporter.borrow_mut() = Some(reporter);
        }

        fn enqueue(&mut self, request: AssetRequest) {
            self.enqueued.borrow_mut().push(request.key);
        }

        fn start_load(&mut self) {
            *self.starts.borrow_mut() += 1;
        }
    }

    fn ready_context(loader: Box<dyn Loader>) -> GameContext {
        let mut stage = Stage::new(Size::new(800.0, 600.0));
        stage.mark_ready();
        GameContext::new(stage, FileStore::new(), loader)
    }

    fn null_context() -> GameContext {
        ready_context(Box::new(NullLoader::new()))
    }

    fn new_log() -> CallLog {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn take(log: &CallLog) -> Vec<String> {
        std::mem::take(&mut *log.borrow_mut())
    }

    fn creatable() -> Capabilities {
        Capabilities::NONE.with_init().with_create()
    }

    fn preloading() -> Capabilities {
        Capabilities::ALL
    }

    //--- Registration -----------------------------------------------------

    #[test]
    fn add_state_registers_without_activating() {
        let log = new_log();
        let mut ctx = null_context();
        let mut manager = StateManager::default();

        assert!(manager.add_state(
            StateSource::instance(Probe::new("Menu", creatable(), &log)),
            false,
            &mut ctx,
        ));

        assert_eq!(manager.len(), 1);
        assert!(manager.current_name().is_none());
        assert!(take(&log).is_empty());
        assert_eq!(manager.config("Menu").map(StateConfig::game), Some(ctx.id()));
    }

    #[test]
    fn duplicate_name_is_refused_and_registry_unchanged() {
        let log = new_log();
        let mut ctx = null_context();
        let mut manager = StateManager::default();

        assert!(manager.add_state(
            StateSource::instance(Probe::new("Menu", creatable(), &log)),
            false,
            &mut ctx,
        ));
        let result = manager.try_add_state(
            StateSource::instance(Probe::new("Menu", Capabilities::NONE, &log)),
            true,
            &mut ctx,
        );

        assert_eq!(result, Err(StateError::DuplicateName("Menu".into())));
        assert_eq!(manager.len(), 1);
        assert!(manager.current_name().is_none());
        assert_eq!(manager.config("Menu").map(StateConfig::capabilities), Some(creatable()));
    }

    #[test]
    fn names_are_case_sensitive() {
        let log = new_log();
        let mut ctx = null_context();
        let mut manager = StateManager::default();

        assert!(manager.add_state(StateSource::instance(Probe::new("menu", creatable(), &log)), false, &mut ctx));
        assert!(manager.add_state(StateSource::instance(Probe::new("Menu", creatable(), &log)), false, &mut ctx));
        assert_eq!(manager.names().collect::<Vec<_>>(), vec!["menu", "Menu"]);
    }

    #[test]
    fn empty_name_is_refused() {
        let log = new_log();
        let mut ctx = null_context();
        let mut manager = StateManager::default();

        let result = manager.try_add_state(
            StateSource::instance(Probe::new("", creatable(), &log)),
            false,
            &mut ctx,
        );
        assert_eq!(result, Err(StateError::EmptyName));
        assert!(manager.is_empty());
    }

    #[test]
    fn named_source_uses_factories() {
        let log = new_log();
        let mut ctx = null_context();
        let mut factories = StateFactories::new();
        let factory_log = Rc::clone(&log);
        factories.register("Menu", move || Probe::new("Menu", creatable(), &factory_log));
        let mut manager = StateManager::new(factories);

        assert_eq!(
            manager.try_add_state(StateSource::named("Level"), false, &mut ctx),
            Err(StateError::UnknownFactory("Level".into()))
        );
        assert!(manager.add_state(StateSource::named("Menu"), true, &mut ctx));
        assert_eq!(manager.current_name(), Some("Menu"));
        assert!(manager.current_config().is_some_and(StateConfig::is_created));
    }

    #[test]
    fn factory_source_builds_instance() {
        let log = new_log();
        let mut ctx = null_context();
        let mut manager = StateManager::default();
        let factory_log = Rc::clone(&log);

        assert!(manager.add_state(
            StateSource::factory(move || Probe::new("Level", Capabilities::NONE, &factory_log)),
            false,
            &mut ctx,
        ));
        assert!(manager.contains("Level"));
    }

    //--- Activation Without Preload ---------------------------------------

    #[test]
    fn add_with_switch_runs_boot_init_create_once() {
        let log = new_log();
        let mut ctx = null_context();
        let mut manager = StateManager::default();

        assert!(manager.add_state(
            StateSource::instance(Probe::new("Menu", creatable(), &log)),
            true,
            &mut ctx,
        ));

        let config = manager.current_config().expect("Menu should be current");
        assert_eq!(config.name(), "Menu");
        assert!(config.is_initialised());
        assert!(config.is_created());
        assert!(config.is_ready());
        assert_eq!(take(&log), vec!["Menu.boot", "Menu.init()", "Menu.create(;libs=0)"]);
    }

    #[test]
    fn ready_without_create_capability() {
        let log = new_log();
        let mut ctx = null_context();
        let mut manager = StateManager::default();

        manager.add_state(StateSource::instance(Probe::new("Splash", Capabilities::NONE, &log)), true, &mut ctx);

        let config = manager.current_config().expect("Splash should be current");
        assert!(config.is_ready());
        assert!(!config.is_created());
        assert_eq!(take(&log), vec!["Splash.boot"]);
    }

    #[test]
    fn undeclared_hooks_are_not_called() {
        let log = new_log();
        let mut ctx = null_context();
        let mut manager = StateManager::default();

        // Probe implements init/create, but declares neither.
        manager.add_state(StateSource::instance(Probe::new("Bare", Capabilities::NONE, &log)), true, &mut ctx);
        manager.update(&mut ctx);

        assert_eq!(
            take(&log),
            vec!["Bare.boot", "Bare.pre_update", "Bare.update", "Bare.post_update"]
        );
    }

    #[test]
    fn stashed_params_are_applied_in_order() {
        let log = new_log();
        let mut ctx = null_context();
        let mut manager = StateManager::default();

        let switched = manager.switch_state(
            "Level",
            Some(StateSource::instance(Probe::new("Level", creatable(), &log))),
            Some(vec![Param::from(3), Param::from("hard")]),
            Some(vec![Param::from(true)]),
            &mut ctx,
        );

        assert!(switched);
        assert_eq!(
            take(&log),
            vec![
                "Level.boot",
                "Level.init(Int(3),Text(\"hard\"))",
                "Level.create(Bool(true);libs=0)",
            ]
        );
        let config = manager.config("Level").expect("Level registered");
        assert_eq!(config.init_params().map(<[Param]>::len), Some(2));
    }

    #[test]
    fn one_param_bundle_stashes_empty_other() {
        let log = new_log();
        let mut ctx = null_context();
        let mut manager = StateManager::default();

        manager.add_state(StateSource::instance(Probe::new("Level", creatable(), &log)), false, &mut ctx);
        assert!(manager.switch_state("Level", None, None, Some(vec![Param::from(7)]), &mut ctx));

        let config = manager.config("Level").expect("Level registered");
        assert_eq!(config.init_params(), Some(&[][..]));
        assert_eq!(config.create_params(), Some(&[Param::Int(7)][..]));
    }

    //--- Switching --------------------------------------------------------

    #[test]
    fn switch_to_same_key_is_noop() {
        let log = new_log();
        let mut ctx = null_context();
        let mut manager = StateManager::default();

        manager.add_state(StateSource::instance(Probe::new("Menu", creatable(), &log)), true, &mut ctx);
        take(&log);

        assert_eq!(
            manager.try_switch_state("Menu", None, None, None, &mut ctx),
            Err(StateError::AlreadyCurrent("Menu".into()))
        );
        assert!(!manager.switch_state("Menu", None, None, None, &mut ctx));
        assert!(take(&log).is_empty());
    }

    #[test]
    fn switch_to_unknown_key_keeps_current_alive() {
        let log = new_log();
        let mut ctx = null_context();
        let mut manager = StateManager::default();

        manager.add_state(StateSource::instance(Probe::new("Menu", creatable(), &log)), true, &mut ctx);
        take(&log);

        assert_eq!(
            manager.try_switch_state("Nowhere", None, None, None, &mut ctx),
            Err(StateError::UnknownState("Nowhere".into()))
        );
        assert_eq!(manager.current_name(), Some("Menu"));
        assert!(take(&log).is_empty());
    }

    #[test]
    fn switch_registers_new_state_and_destroys_outgoing() {
        let log = new_log();
        let mut ctx = null_context();
        let mut manager = StateManager::default();

        manager.add_state(StateSource::instance(Probe::new("Menu", creatable(), &log)), true, &mut ctx);
        take(&log);

        let before = manager.len();
        assert!(manager.switch_state(
            "Level",
            Some(StateSource::instance(Probe::new("Level", creatable(), &log))),
            None,
            None,
            &mut ctx,
        ));

        assert_eq!(manager.len(), before + 1);
        assert_eq!(manager.current_name(), Some("Level"));
        assert_eq!(
            take(&log),
            vec!["Menu.destroy", "Level.boot", "Level.init()", "Level.create(;libs=0)"]
        );

        // Menu stays registered and keeps its flags
        let menu = manager.config("Menu").expect("Menu still registered");
        assert!(menu.is_initialised() && menu.is_created());
    }

    #[test]
    fn switch_resets_input() {
        use crate::core::input::{InputEvent, KeyCode, Modifiers};

        let log = new_log();
        let mut ctx = null_context();
        let mut manager = StateManager::default();

        manager.add_state(StateSource::instance(Probe::new("Menu", creatable(), &log)), true, &mut ctx);
        manager.add_state(StateSource::instance(Probe::new("Level", creatable(), &log)), false, &mut ctx);
        ctx.input.process_event(&InputEvent::KeyDown {
            key: KeyCode::Enter,
            modifiers: Modifiers::NONE,
        });

        assert!(manager.switch_state("Level", None, None, None, &mut ctx));
        assert!(!ctx.input.is_key_down(KeyCode::Enter));
    }

    #[test]
    fn failed_add_aborts_switch() {
        let log = new_log();
        let mut ctx = null_context();
        let mut manager = StateManager::default();

        let result = manager.try_switch_state(
            "Ghost",
            Some(StateSource::instance(Probe::new("", creatable(), &log))),
            None,
            None,
            &mut ctx,
        );
        assert_eq!(result, Err(StateError::EmptyName));
        assert!(manager.is_empty());
    }

    #[test]
    fn reactivation_does_not_rerun_init_or_create() {
        let log = new_log();
        let mut ctx = null_context();
        let mut manager = StateManager::default();

        manager.add_state(StateSource::instance(Probe::new("Menu", creatable(), &log)), true, &mut ctx);
        manager.add_state(StateSource::instance(Probe::new("Level", creatable(), &log)), false, &mut ctx);
        assert!(manager.switch_state("Level", None, None, None, &mut ctx));
        take(&log);

        assert!(manager.switch_state("Menu", None, None, None, &mut ctx));
        assert_eq!(take(&log), vec!["Level.destroy"]);
        assert!(manager.current_config().is_some_and(StateConfig::is_ready));
    }

    //--- Deferred Activation ----------------------------------------------

    #[test]
    fn activation_deferred_until_boot() {
        let log = new_log();
        let mut ctx = GameContext::new(
            Stage::new(Size::new(320.0, 240.0)),
            FileStore::new(),
            Box::new(NullLoader::new()),
        );
        let mut manager = StateManager::default();

        manager.switch_state(
            "Menu",
            Some(StateSource::instance(Probe::new("Menu", creatable(), &log))),
            Some(vec![Param::from("title")]),
            None,
            &mut ctx,
        );

        assert_eq!(manager.current_name(), Some("Menu"));
        assert!(take(&log).is_empty());
        assert!(!manager.current_config().is_some_and(StateConfig::is_initialised));

        ctx.stage.mark_ready();
        manager.boot(&mut ctx);
        assert_eq!(
            take(&log),
            vec!["Menu.boot", "Menu.init(Text(\"title\"))", "Menu.create(;libs=0)"]
        );

        // Second boot is a no-op
        manager.boot(&mut ctx);
        assert!(take(&log).is_empty());
    }

    #[test]
    fn boot_without_current_state_is_harmless() {
        let mut ctx = null_context();
        let mut manager = StateManager::default();
        manager.boot(&mut ctx);
        assert!(manager.current_name().is_none());
    }

    //--- Preload ----------------------------------------------------------

    #[test]
    fn preload_blocks_ready_until_completion() {
        let log = new_log();
        let loader = ManualLoader::default();
        let reporter = Rc::clone(&loader.reporter);
        let starts = Rc::clone(&loader.starts);
        let enqueued = Rc::clone(&loader.enqueued);
        let mut ctx = ready_context(Box::new(loader));
        let mut manager = StateManager::default();

        let level = Probe::new("Level", preloading(), &log)
            .loading(AssetRequest::texture("hero", "hero.png"));
        manager.add_state(StateSource::instance(level), true, &mut ctx);

        assert!(!manager.current_config().is_some_and(StateConfig::is_ready));
        assert!(manager.is_loading());
        assert_eq!(*starts.borrow(), 1);
        assert_eq!(*enqueued.borrow(), vec!["hero"]);
        assert_eq!(take(&log), vec!["Level.boot", "Level.init()", "Level.preload"]);

        manager.update(&mut ctx);
        manager.post_render(&mut ctx);
        assert_eq!(take(&log), vec!["Level.load_update"]);

        ctx.files.add_file(File::new("hero", FileKind::Texture, vec![0u8; 4]));
        let sender = reporter.borrow_mut().take().expect("loader initialised");
        sender.progress(100.0, 4, File::new("hero", FileKind::Texture, vec![0u8; 4]));
        sender.complete();

        manager.update(&mut ctx);
        assert!(manager.current_config().is_some_and(StateConfig::is_ready));
        assert!(manager.current_config().is_some_and(StateConfig::is_created));
        assert!(!manager.is_loading());
        assert_eq!(
            take(&log),
            vec![
                "Level.load_progress(100,hero)",
                "Level.load_complete(libs=0)",
                "Level.create(;libs=1)",
                "Level.pre_update",
                "Level.update",
                "Level.post_update",
            ]
        );

        manager.post_render(&mut ctx);
        assert_eq!(take(&log), vec!["Level.post_render"]);
    }

    #[test]
    fn switch_refused_while_loading() {
        let log = new_log();
        let mut ctx = ready_context(Box::new(ManualLoader::default()));
        let mut manager = StateManager::default();

        manager.add_state(StateSource::instance(Probe::new("Level", preloading(), &log)), true, &mut ctx);
        manager.add_state(StateSource::instance(Probe::new("Menu", creatable(), &log)), false, &mut ctx);
        take(&log);

        assert_eq!(
            manager.try_switch_state("Menu", None, None, None, &mut ctx),
            Err(StateError::LoadInProgress("Level".into()))
        );
        assert_eq!(manager.current_name(), Some("Level"));
        assert!(take(&log).is_empty());

        // A state object passed alongside is not registered either
        assert!(!manager.switch_state(
            "Credits",
            Some(StateSource::instance(Probe::new("Credits", creatable(), &log))),
            None,
            None,
            &mut ctx,
        ));
        assert!(!manager.contains("Credits"));
    }

    #[test]
    fn completion_is_observed_once() {
        let log = new_log();
        let loader = ManualLoader::default();
        let reporter = Rc::clone(&loader.reporter);
        let mut ctx = ready_context(Box::new(loader));
        let mut manager = StateManager::default();

        manager.add_state(StateSource::instance(Probe::new("Level", preloading(), &log)), true, &mut ctx);
        let sender = reporter.borrow_mut().take().expect("loader initialised");
        take(&log);

        sender.complete();
        sender.complete();
        sender.progress(50.0, 1, File::new("late", FileKind::Data, vec![0u8]));

        manager.poll_loader(&mut ctx);
        manager.poll_loader(&mut ctx);

        let calls = take(&log);
        assert_eq!(calls.iter().filter(|c| c.starts_with("Level.create")).count(), 1);
        assert!(!calls.iter().any(|c| c.starts_with("Level.load_progress")));
    }

    #[test]
    fn load_complete_orders_hooks_and_rebuilds_libraries() {
        let log = new_log();
        let files = FileStore::new();
        let loader = MemoryLoader::new(files.clone())
            .with_source("hero.png", vec![1u8; 8])
            .with_source("theme.ogg", vec![2u8; 4])
            .with_source("map.json", vec![3u8; 2]);
        let mut stage = Stage::new(Size::new(800.0, 600.0));
        stage.mark_ready();
        let mut ctx = GameContext::new(stage, files, Box::new(loader));
        let mut manager = StateManager::default();

        let level = Probe::new("Level", preloading(), &log)
            .loading(AssetRequest::texture("hero", "hero.png"))
            .loading(AssetRequest::audio("theme", "theme.ogg"))
            .loading(AssetRequest::data("map", "map.json"));
        manager.add_state(StateSource::instance(level), true, &mut ctx);
        take(&log);

        manager.poll_loader(&mut ctx);

        let libraries = manager.current_libraries().expect("Level is current");
        assert!(libraries.textures.contains("hero"));
        assert!(libraries.audio.contains("theme"));
        assert!(libraries.data.contains("map"));
        assert_eq!(libraries.len(), 3);

        let calls = take(&log);
        let complete = calls.iter().position(|c| c.starts_with("Level.load_complete"));
        let create = calls.iter().position(|c| c.starts_with("Level.create"));
        assert!(complete < create);
        assert_eq!(calls.iter().filter(|c| c.starts_with("Level.load_progress")).count(), 3);
        assert_eq!(calls.last().map(String::as_str), Some("Level.create(;libs=3)"));
    }

    #[test]
    fn reactivating_a_preloader_reloads() {
        let log = new_log();
        let mut ctx = null_context();
        let mut manager = StateManager::default();

        manager.add_state(StateSource::instance(Probe::new("Level", preloading(), &log)), true, &mut ctx);
        manager.add_state(StateSource::instance(Probe::new("Menu", creatable(), &log)), false, &mut ctx);
        manager.update(&mut ctx);
        assert!(manager.switch_state("Menu", None, None, None, &mut ctx));
        take(&log);

        assert!(manager.switch_state("Level", None, None, None, &mut ctx));
        assert!(!manager.current_config().is_some_and(StateConfig::is_ready));
        assert_eq!(take(&log), vec!["Menu.destroy", "Level.preload"]);

        manager.poll_loader(&mut ctx);
        assert!(manager.current_config().is_some_and(StateConfig::is_ready));
        assert_eq!(take(&log), vec!["Level.load_complete(libs=0)", "Level.create(;libs=0)"]);
    }

    #[test]
    fn dropped_reporter_leaves_state_loading() {
        let log = new_log();
        let loader = ManualLoader::default();
        let reporter = Rc::clone(&loader.reporter);
        let mut ctx = ready_context(Box::new(loader));
        let mut manager = StateManager::default();

        manager.add_state(StateSource::instance(Probe::new("Level", preloading(), &log)), true, &mut ctx);
        drop(reporter.borrow_mut().take());

        manager.update(&mut ctx);
        manager.update(&mut ctx);
        assert!(manager.is_loading());
        assert!(!manager.current_config().is_some_and(StateConfig::is_ready));
    }

    #[test]
    fn add_with_switch_abandons_in_flight_load() {
        let log = new_log();
        let loader = ManualLoader::default();
        let reporter = Rc::clone(&loader.reporter);
        let mut ctx = ready_context(Box::new(loader));
        let mut manager = StateManager::default();

        manager.add_state(StateSource::instance(Probe::new("Level", preloading(), &log)), true, &mut ctx);
        let stale = reporter.borrow_mut().take().expect("loader initialised");
        manager.add_state(StateSource::instance(Probe::new("Menu", creatable(), &log)), true, &mut ctx);
        take(&log);

        stale.complete();
        manager.update(&mut ctx);

        assert_eq!(manager.current_name(), Some("Menu"));
        assert!(!manager.config("Level").is_some_and(StateConfig::is_ready));
        assert_eq!(take(&log), vec!["Menu.pre_update", "Menu.update", "Menu.post_update"]);
    }

    //--- Frame Loop -------------------------------------------------------

    #[test]
    fn update_without_current_state_is_noop() {
        let mut ctx = null_context();
        let mut manager = StateManager::default();
        manager.update(&mut ctx);
        manager.post_render(&mut ctx);
    }

    #[test]
    fn hooks_can_queue_switch_requests() {
        struct Jumper;

        impl State for Jumper {
            fn name(&self) -> &str {
                "Jumper"
            }

            fn update(&mut self, ctx: &mut StateContext<'_>) {
                ctx.switch_with("Level", vec![Param::from(2)], vec![]);
            }
        }

        let mut ctx = null_context();
        let mut manager = StateManager::default();
        manager.add_state(StateSource::instance(Jumper), true, &mut ctx);
        manager.update(&mut ctx);

        let requests = ctx.requests.take();
        assert_eq!(
            requests,
            vec![StateRequest::Switch {
                key: "Level".into(),
                init_params: Some(vec![Param::Int(2)]),
                create_params: Some(vec![]),
            }]
        );
    }

    #[test]
    fn rebuild_libraries_reflects_store_contents() {
        let log = new_log();
        let mut ctx = null_context();
        let mut manager = StateManager::default();
        manager.add_state(StateSource::instance(Probe::new("Menu", creatable(), &log)), true, &mut ctx);

        ctx.files.add_file(File::new("logo", FileKind::Texture, vec![]));
        ctx.files.add_file(File::new("click", FileKind::Audio, vec![]));
        manager.rebuild_libraries(&ctx.files);
        assert_eq!(manager.current_libraries().map(Libraries::len), Some(2));

        ctx.files.remove_file("click");
        manager.rebuild_libraries(&ctx.files);
        let libraries = manager.libraries("Menu").expect("Menu registered");
        assert!(libraries.audio.is_empty());
        assert!(libraries.textures.contains("logo"));
    }
}
