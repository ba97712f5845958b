//=========================================================================
// Platform Subsystem
//
// Hosts a `Game` inside a winit window.
//
// Architecture:
// ```text
//  Main Thread:
//  ┌──────────────────────────────┐
//  │  winit Event Loop            │
//  │   ↓                          │
//  │  resumed ── create window ───┼──> Game::boot()   (stage ready)
//  │   ↓                          │
//  │  InputProcessor              │
//  │   ├─ converts winit events   │
//  │   └─ tracks modifiers        │
//  │   ↓                          │
//  │  InputBuffer                 │
//  │   ↓                          │
//  │  RedrawRequested ────────────┼──> Game::handle_inputs(batch)
//  │                              │    Game::frame()
//  └──────────────────────────────┘
// ```
//
// Notes:
// - Window creation is the signal that the stage is ready; states added
//   with `switch_to` before that are activated from `resumed`.
// - RedrawRequested is the frame boundary; the next redraw is requested
//   at the end of every frame.
// - winit requires the main thread on macOS/iOS, so this runs on the
//   thread that called `Game::run()`.
//
//=========================================================================

//=== Submodules ==========================================================

mod event_mapper;
mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::math::Size;
use crate::engine::Game;
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== PlatformError =======================================================

/// Event loop failures. Both are fatal to `Game::run`.
#[derive(Debug)]
pub enum PlatformError {
    /// Failed to create the event loop (OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// The event loop stopped with an error.
    EventLoopExecution(winit::error::EventLoopError),
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EventLoopCreation(e) | Self::EventLoopExecution(e) => Some(e),
        }
    }
}

//=== Platform ============================================================

/// Window owner and frame driver for one game.
pub(crate) struct Platform {
    game: Game,

    /// OS window handle (None until `resumed()` is called).
    window: Option<Window>,

    /// Input received since the last frame.
    buffer: InputBuffer,

    input_processor: InputProcessor,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Wraps `game`. The window is created lazily in `resumed()`.
    pub(crate) fn new(game: Game) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            game,
            window: None,
            buffer: InputBuffer::new(),
            input_processor: InputProcessor::new(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the winit event loop until the window is closed.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Feeds buffered input to the game and runs one frame.
    fn run_frame(&mut self) {
        if !self.buffer.is_empty() {
            trace!(target: "platform::input", "Flushing {} input events", self.buffer.len());
            let events = self.buffer.drain();
            self.game.handle_inputs(&events);
        }

        self.game.frame();
    }

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window on first resume, then boots the game.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let stage = self.game.context().stage.size();
        let attrs = WindowAttributes::default()
            .with_title(self.game.title())
            .with_inner_size(LogicalSize::new(stage.width, stage.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                self.game.boot();
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(window) = &self.window {
                    let logical = size.to_logical::<f32>(window.scale_factor());
                    self.game.resize_stage(Size::new(logical.width, logical.height));
                }
            }

            WindowEvent::ModifiersChanged(state) => {
                trace!(target: "platform::input", "Modifiers changed: {:?}", state);
                self.input_processor.update_modifiers(state.state());
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self
                    .input_processor
                    .process_mouse_move(position.x as f32, position.y as f32);
                self.buffer.push_continuous(event);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                match self.input_processor.process_key_event(key_event) {
                    Some(event) => self.buffer.push_discrete(event),
                    None => trace!(target: "platform::input", "Unmapped key ignored"),
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.process_mouse_button(*button, *state);
                self.buffer.push_discrete(event);
            }

            WindowEvent::RedrawRequested => {
                self.run_frame();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
