//=========================================================================
// Actor
//=========================================================================
//
// Entities participating in scene update, collision, and render passes.
//
// Architecture:
//   trait Actor        — polymorphic update/render hooks
//   struct ActorBody   — position, hit area, tags, event dispatcher
//
// Each actor embeds an ActorBody and exposes it through the trait; the
// scene and scheduler only ever see `Rc<RefCell<dyn Actor>>` handles.
// Lifecycle intent (spawn, destroy) travels upward through the body's
// dispatcher rather than by calling the scene directly.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::warn;

//=== Internal Dependencies ===============================================

use crate::core::events::{EventDispatcher, GameEvent, Topic};
use crate::core::frame::GameInfo;
use crate::core::geometry::Rect;
use crate::core::input::InputSnapshot;
use crate::core::render::RenderTarget;

//=== Actor Trait =========================================================

/// Behavior hooks for a scene entity.
///
/// Only the body accessors are required; `update` and `render` default to
/// no-ops so passive props need nothing more than:
///
/// ```
/// use arcadia_engine::prelude::*;
///
/// struct Crate {
///     body: ActorBody,
/// }
///
/// impl Actor for Crate {
///     fn body(&self) -> &ActorBody { &self.body }
///     fn body_mut(&mut self) -> &mut ActorBody { &mut self.body }
/// }
/// ```
pub trait Actor {
    /// Shared state every actor carries.
    fn body(&self) -> &ActorBody;

    /// Mutable access to the shared state.
    fn body_mut(&mut self) -> &mut ActorBody;

    /// Called once per frame during the scene's update pass.
    fn update(&mut self, _info: &GameInfo, _input: &InputSnapshot) {}

    /// Called once per frame during the scene's render pass.
    fn render(&mut self, _target: &mut dyn RenderTarget) {}
}

/// Shared, identity-bearing handle to an actor.
///
/// Identity comparisons (scene membership, removal) use `Rc::ptr_eq`.
pub type ActorHandle = Rc<RefCell<dyn Actor>>;

//=== ActorBody ===========================================================

/// Position, hit area, tags, and event dispatcher common to all actors.
///
/// # Hit-area invariant
///
/// The hit rectangle's origin is always `position + offset`, where the
/// offset is captured once from the rectangle passed at construction.
/// Every position mutation recomputes the rectangle in the same call, so
/// no observer — handler, collision pass, or other actor — can see the
/// two out of sync.
pub struct ActorBody {
    x: f32,
    y: f32,
    hit_area: Rect,
    offset_x: f32,
    offset_y: f32,
    tags: Vec<String>,
    events: Rc<EventDispatcher>,

    /// Bound by the scene at add-time; lets `destroy` name this actor
    /// as the event target.
    handle: Option<Weak<RefCell<dyn Actor>>>,
}

impl ActorBody {
    //--- Construction -----------------------------------------------------

    /// Creates a body at `(x, y)` with `hit_area` interpreted relative to
    /// that position.
    ///
    /// The rectangle's own origin becomes the fixed offset; its absolute
    /// position is derived immediately and on every later move.
    pub fn new(x: f32, y: f32, hit_area: Rect) -> Self {
        let offset_x = hit_area.x;
        let offset_y = hit_area.y;

        let mut body = Self {
            x,
            y,
            hit_area,
            offset_x,
            offset_y,
            tags: Vec::new(),
            events: Rc::new(EventDispatcher::new()),
            handle: None,
        };
        body.sync_hit_area();
        body
    }

    /// Adds a tag, builder-style.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    //--- Position ---------------------------------------------------------

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn set_x(&mut self, x: f32) {
        self.x = x;
        self.sync_hit_area();
    }

    pub fn set_y(&mut self, y: f32) {
        self.y = y;
        self.sync_hit_area();
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.sync_hit_area();
    }

    /// Moves by a delta, keeping the hit area in lockstep.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.set_position(self.x + dx, self.y + dy);
    }

    fn sync_hit_area(&mut self) {
        self.hit_area.x = self.x + self.offset_x;
        self.hit_area.y = self.y + self.offset_y;
    }

    //--- Hit Area & Tags --------------------------------------------------

    /// Current absolute collision rectangle.
    pub fn hit_area(&self) -> Rect {
        self.hit_area
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    //--- Events -----------------------------------------------------------

    /// This actor's dispatcher.
    ///
    /// Returned as a cloned `Rc` so callers can publish or subscribe
    /// without holding a borrow of the actor itself.
    pub fn events(&self) -> Rc<EventDispatcher> {
        Rc::clone(&self.events)
    }

    /// Asks the owning scene to insert `child`.
    ///
    /// Publishes [`Topic::SpawnActor`] with the child as target; the
    /// subscribed scene performs the insertion.
    pub fn spawn_actor(&self, child: ActorHandle) {
        self.events.publish(Topic::SpawnActor, &GameEvent::for_actor(child));
    }

    /// Asks the owning scene to remove this actor at end-of-frame cleanup.
    ///
    /// Publishes [`Topic::Destroy`] with this actor as target. The actor
    /// stays in the live collection until the scene's cleanup pass runs.
    pub fn destroy(&self) {
        match self.handle.as_ref().and_then(Weak::upgrade) {
            Some(this) => self.events.publish(Topic::Destroy, &GameEvent::for_actor(this)),
            None => warn!("destroy() on an actor that was never added to a scene"),
        }
    }

    /// Records the actor's own handle. Called by the scene at add-time.
    pub(crate) fn bind(&mut self, handle: Weak<RefCell<dyn Actor>>) {
        self.handle = Some(handle);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
