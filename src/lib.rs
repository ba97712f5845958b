//=========================================================================
// Stagehand Library Root
//
// State lifecycle and camera management core for 2D games.
//
// Responsibilities:
// - Expose the game facade (`GameBuilder`, `Game`)
// - Expose the core systems (states, cameras, assets, input) for games
//   that drive frames themselves
// - Keep the winit host (`platform`) private
//
// Typical usage:
// ```no_run
// use stagehand::prelude::*;
//
// struct Menu;
//
// impl State for Menu {
//     fn name(&self) -> &str {
//         "Menu"
//     }
// }
//
// fn main() -> Result<(), PlatformError> {
//     GameBuilder::new()
//         .with_title("Demo")
//         .build()
//         .init(|game| {
//             game.add_state(StateSource::instance(Menu), true);
//         })
//         .run()
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds every engine system. Most games only touch it through the
// prelude and the `State` trait.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the winit event loop and window; `engine` wires the
// systems together behind `Game`.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Game, GameBuilder};
pub use platform::PlatformError;
