//=========================================================================
// Stagehand Game
//
// Main entry point and coordinator.
//
// Architecture:
// ```text
//     GameBuilder  ──build()──>  Game  ──run()──>  [winit event loop]
//         │                        │
//         ├─ with_title()          ├─ init(|game| ...)   register states
//         ├─ with_stage_size()     ├─ boot()             stage ready
//         ├─ with_loader()         └─ frame()            once per redraw
//         └─ with_factory()
// ```
//
// Frame order:
//   states.update → cameras.update → cameras.render → states.post_render
//   → queued state requests → input frame reset
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use crate::core::assets::{FileStore, Loader, NullLoader};
use crate::core::camera::{CameraManager, CameraSurface, LayerRenderer, NullLayers, OffsetSurface};
use crate::core::globals::GameContext;
use crate::core::input::InputEvent;
use crate::core::math::Size;
use crate::core::stage::Stage;
use crate::core::state::{Param, State, StateFactories, StateManager, StateRequest, StateSource};
use crate::platform::{Platform, PlatformError};

//=== GameBuilder =========================================================

/// Builder for configuring and constructing a [`Game`].
///
/// # Default Values
///
/// - **Title**: "Stagehand"
/// - **Stage size**: 800×600
/// - **Camera mode**: single camera
/// - **Loader**: [`NullLoader`]
/// - **Layers**: [`NullLayers`]
/// - **Camera surface**: [`OffsetSurface`]
///
/// # Examples
///
/// ```no_run
/// use stagehand::prelude::*;
///
/// struct Level;
///
/// impl State for Level {
///     fn name(&self) -> &str {
///         "Level"
///     }
/// }
///
/// let files = FileStore::new();
///
/// GameBuilder::new()
///     .with_title("Caves")
///     .with_stage_size(1024.0, 768.0)
///     .with_loader(MemoryLoader::new(files.clone()))
///     .with_file_store(files)
///     .with_factory("Level", || Level)
///     .build()
///     .init(|game| {
///         game.add_state(StateSource::named("Level"), true);
///     })
///     .run()?;
/// # Ok::<(), PlatformError>(())
/// ```
pub struct GameBuilder {
    title: String,
    stage_size: Size,
    multi_camera_mode: bool,
    loader: Box<dyn Loader>,
    files: FileStore,
    layers: Box<dyn LayerRenderer>,
    surface: Box<dyn CameraSurface>,
    factories: StateFactories,
}

impl GameBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            title: "Stagehand".to_owned(),
            stage_size: Size::new(800.0, 600.0),
            multi_camera_mode: false,
            loader: Box::new(NullLoader::new()),
            files: FileStore::new(),
            layers: Box::new(NullLayers),
            surface: Box::new(OffsetSurface::new()),
            factories: StateFactories::new(),
        }
    }

    /// Sets the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the stage size, which is also the default camera's size.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not positive.
    pub fn with_stage_size(mut self, width: f32, height: f32) -> Self {
        assert!(
            width > 0.0 && height > 0.0,
            "Stage size must be positive, got {}x{}",
            width,
            height
        );
        self.stage_size = Size::new(width, height);
        self
    }

    pub fn with_multi_camera_mode(mut self, multi_camera_mode: bool) -> Self {
        self.multi_camera_mode = multi_camera_mode;
        self
    }

    /// Sets the loader used by states with a preloader.
    pub fn with_loader(mut self, loader: impl Loader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    /// Sets the global file store. Pass the same store the loader writes to.
    pub fn with_file_store(mut self, files: FileStore) -> Self {
        self.files = files;
        self
    }

    pub fn with_layers(mut self, layers: impl LayerRenderer + 'static) -> Self {
        self.layers = Box::new(layers);
        self
    }

    pub fn with_camera_surface(mut self, surface: impl CameraSurface + 'static) -> Self {
        self.surface = Box::new(surface);
        self
    }

    /// Registers a constructor for [`StateSource::Named`].
    pub fn with_factory<S, F>(mut self, name: impl Into<String>, build: F) -> Self
    where
        S: State + 'static,
        F: Fn() -> S + 'static,
    {
        self.factories.register(name, build);
        self
    }

    /// Builds the game. Nothing is booted until [`Game::boot`] (or `run`).
    pub fn build(self) -> Game {
        info!(
            "Building game {:?} (stage {}x{}, multi camera mode: {})",
            self.title, self.stage_size.width, self.stage_size.height, self.multi_camera_mode
        );

        Game {
            title: self.title,
            context: GameContext::new(Stage::new(self.stage_size), self.files, self.loader),
            states: StateManager::new(self.factories),
            cameras: CameraManager::new(self.multi_camera_mode),
            layers: self.layers,
            surface: Some(self.surface),
        }
    }
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Game ================================================================

/// A game instance: its states, cameras and shared context.
///
/// `run` hands the game to a winit window. Hosts with their own loop call
/// [`boot`](Self::boot) once the drawing surface exists and
/// [`frame`](Self::frame) once per frame instead.
pub struct Game {
    title: String,
    context: GameContext,
    states: StateManager,
    cameras: CameraManager,
    layers: Box<dyn LayerRenderer>,
    surface: Option<Box<dyn CameraSurface>>,
}

impl Game {
    //--- Initialization ---------------------------------------------------

    /// Gives mutable access to the game before it runs, typically to
    /// register states.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut Game),
    {
        info!("Initializing game {:?}", self.title);
        init_fn(&mut self);
        self
    }

    //--- States -----------------------------------------------------------

    /// See [`StateManager::add_state`].
    pub fn add_state(&mut self, source: StateSource, switch_to: bool) -> bool {
        self.states.add_state(source, switch_to, &mut self.context)
    }

    /// Switches to a registered state. See [`StateManager::switch_state`].
    pub fn switch_state(&mut self, key: &str) -> bool {
        self.states.switch_state(key, None, None, None, &mut self.context)
    }

    /// Full form of [`switch_state`](Self::switch_state).
    pub fn switch_state_with(
        &mut self,
        key: &str,
        source: Option<StateSource>,
        init_params: Option<Vec<Param>>,
        create_params: Option<Vec<Param>>,
    ) -> bool {
        self.states
            .switch_state(key, source, init_params, create_params, &mut self.context)
    }

    //--- Lifecycle --------------------------------------------------------

    /// Marks the stage ready, creates the default camera and activates the
    /// current state. Later calls do nothing.
    pub fn boot(&mut self) {
        if self.context.stage.is_ready() {
            debug!("Game already booted");
            return;
        }

        info!("Booting game {:?}", self.title);
        self.context.stage.mark_ready();

        if let Some(surface) = self.surface.take() {
            self.cameras.boot(self.context.stage.size(), surface);
        }
        self.states.boot(&mut self.context);
    }

    /// Runs one frame. Does nothing before [`boot`](Self::boot).
    pub fn frame(&mut self) {
        if !self.context.stage.is_ready() {
            trace!("Frame skipped, stage not ready");
            return;
        }

        self.states.update(&mut self.context);
        self.cameras.update(self.layers.as_mut());
        self.cameras.render(self.layers.as_mut());
        self.states.post_render(&mut self.context);

        self.apply_requests();
        self.context.input.begin_frame();
    }

    fn apply_requests(&mut self) {
        for request in self.context.requests.take() {
            match request {
                StateRequest::Switch {
                    key,
                    init_params,
                    create_params,
                } => {
                    debug!("Applying requested switch to {:?}", key);
                    self.states
                        .switch_state(&key, None, init_params, create_params, &mut self.context);
                }
            }
        }
    }

    //--- Platform Input ---------------------------------------------------

    pub fn handle_input(&mut self, event: InputEvent) {
        self.context.input.process_event(&event);
    }

    pub fn handle_inputs(&mut self, events: &[InputEvent]) {
        self.context.input.process_events(events);
    }

    /// Follows the drawing surface's size. Cameras are not resized.
    pub fn resize_stage(&mut self, size: Size) {
        if size.is_empty() {
            trace!("Ignoring empty stage size");
            return;
        }
        self.context.stage.resize(size);
    }

    //--- Execution --------------------------------------------------------

    /// Opens a window and runs the game until it is closed.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the winit event loop cannot be created
    /// or fails while running.
    pub fn run(self) -> Result<(), PlatformError> {
        info!("Starting game {:?}", self.title);
        let result = Platform::new(self).run();
        info!("Game shut down");
        result
    }

    //--- Accessors --------------------------------------------------------

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_booted(&self) -> bool {
        self.context.stage.is_ready()
    }

    pub fn states(&self) -> &StateManager {
        &self.states
    }

    pub fn cameras(&self) -> &CameraManager {
        &self.cameras
    }

    pub fn cameras_mut(&mut self) -> &mut CameraManager {
        &mut self.cameras
    }

    pub fn context(&self) -> &GameContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut GameContext {
        &mut self.context
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
