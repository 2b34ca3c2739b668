//=========================================================================
// Core Engine Modules
//=========================================================================
//
// Domain layer of the engine: geometry, events, actors, scenes, input,
// rendering contracts, and asset management. Everything in here is
// host-agnostic — no windowing, no OS timers — so the whole layer is
// exercisable from plain unit tests.
//
//=========================================================================

pub mod actor;
pub mod assets;
pub mod events;
pub mod frame;
pub mod geometry;
pub mod input;
pub mod render;
pub mod scene;

//=== Re-exports ==========================================================

pub use actor::{Actor, ActorBody, ActorHandle};
pub use assets::{AssetError, AssetLibrary};
pub use events::{EventDispatcher, EventTarget, GameEvent, Subscription, Topic};
pub use frame::GameInfo;
pub use geometry::Rect;
pub use input::{InputSnapshot, InputSource, KeyCode, KeyboardState};
pub use render::{Color, RenderTarget};
pub use scene::Scene;
