//=========================================================================
// Arcadia Engine — Library Root
//
// This crate defines the public API surface of the Arcadia Engine: a
// small 2D game engine built around a fixed-cadence frame loop, scenes
// of event-driven actors, and pluggable input and rendering boundaries.
//
// Responsibilities:
// - Expose the core engine interface (`Game`, `Scene`, `Actor`)
// - Keep internal modules (like `platform`) hidden from end users
// - Provide clean separation between the high-level scheduler facade
//   and lower-level subsystems (input, rendering, OS integration)
//
// Typical usage:
// ```no_run
// use arcadia_engine::prelude::*;
//
// let mut game = GameBuilder::new()
//     .with_title("Asteroid Run")
//     .with_size(800.0, 600.0)
//     .build();
// game.change_scene(Scene::new("menu", Color::BLACK));
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the engine's domain systems (geometry, events, actors,
// scenes, input, rendering contracts, assets). It is exposed publicly
// for extensibility, but application code will mostly use the prelude.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains OS-specific logic (window, Winit integration,
// event loop) and is kept private, as it is not part of the public API
// surface.
//
// `game` defines the scheduler and its builder.
//
mod game;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use game::{Game, GameBuilder, TickOutcome};
pub use platform::PlatformError;
