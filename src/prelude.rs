//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use arcadia_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Scheduler
pub use crate::game::{Game, GameBuilder, TickOutcome};

// Scenes and actors
pub use crate::core::actor::{Actor, ActorBody, ActorHandle};
pub use crate::core::scene::Scene;

// Events
pub use crate::core::events::{EventDispatcher, EventTarget, GameEvent, Subscription, Topic};

// Geometry and frame data
pub use crate::core::frame::GameInfo;
pub use crate::core::geometry::Rect;

// Input system
pub use crate::core::input::{InputSnapshot, InputSource, KeyCode, KeyboardState};

// Rendering
pub use crate::core::render::{Color, RenderTarget};

// Assets
pub use crate::core::assets::{AssetError, AssetLibrary};
