//=========================================================================
// Event Dispatch
//=========================================================================
//
// Topic-keyed synchronous publish/subscribe.
//
// Architecture:
//   subscribe(topic, handler) → HashMap<Topic, Vec<(id, handler)>>
//                                     ↓
//   publish(topic, event) ─── snapshot of handler list ──→ handlers run
//                              on the caller's turn, in registration order
//
// Handlers are re-entrant by design: a handler may publish further
// events, subscribe, or unsubscribe on the same dispatcher. Publish
// iterates a snapshot taken at entry, so registry mutation mid-delivery
// never corrupts the in-flight iteration (and registrations made during
// a publish are first seen by the next publish).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

//=== Internal Dependencies ===============================================

use crate::core::actor::ActorHandle;
use crate::core::scene::Scene;

//=== Topic ===============================================================

/// Named event channels understood by the engine.
///
/// Actors raise lifecycle intent on their own dispatcher (`SpawnActor`,
/// `Destroy`, `Hit`); scenes raise `ChangeScene` on theirs. The scene and
/// scheduler subscribe to these topics and perform the actual mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// An actor asks its scene to insert a new actor.
    SpawnActor,

    /// An actor asks its scene to remove it at end-of-frame cleanup.
    Destroy,

    /// Two hit areas overlapped during the collision pass.
    Hit,

    /// A scene asks the scheduler to swap the active scene.
    ChangeScene,
}

//=== GameEvent ===========================================================

/// What an event concerns.
#[derive(Clone)]
pub enum EventTarget {
    Actor(ActorHandle),
    Scene(Rc<Scene>),
}

/// Payload delivered to subscribed handlers.
///
/// Carries only the target the event concerns; the topic is supplied
/// separately at dispatch.
#[derive(Clone)]
pub struct GameEvent {
    pub target: EventTarget,
}

impl GameEvent {
    pub fn for_actor(target: ActorHandle) -> Self {
        Self {
            target: EventTarget::Actor(target),
        }
    }

    pub fn for_scene(target: Rc<Scene>) -> Self {
        Self {
            target: EventTarget::Scene(target),
        }
    }

    /// The targeted actor, if this event concerns one.
    pub fn actor(&self) -> Option<&ActorHandle> {
        match &self.target {
            EventTarget::Actor(actor) => Some(actor),
            EventTarget::Scene(_) => None,
        }
    }

    /// The targeted scene, if this event concerns one.
    pub fn scene(&self) -> Option<&Rc<Scene>> {
        match &self.target {
            EventTarget::Scene(scene) => Some(scene),
            EventTarget::Actor(_) => None,
        }
    }
}

//=== Subscription ========================================================

/// Token identifying one registration, for targeted unsubscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    topic: Topic,
    id: u64,
}

//=== EventDispatcher =====================================================

type Handler = Rc<dyn Fn(&GameEvent)>;

/// Synchronous topic-keyed handler registry.
///
/// All delivery happens on the caller's turn; there is no queueing or
/// deferral. Interior mutability lets shared `Rc` holders subscribe and
/// publish without exclusive access, which is what makes re-entrant
/// delivery workable on one logical thread.
pub struct EventDispatcher {
    topics: RefCell<HashMap<Topic, Vec<(u64, Handler)>>>,
    next_id: Cell<u64>,
}

impl EventDispatcher {
    /// Creates a dispatcher with no registrations.
    pub fn new() -> Self {
        Self {
            topics: RefCell::new(HashMap::new()),
            next_id: Cell::new(0),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers `handler` under `topic`.
    ///
    /// Handlers for a topic are invoked in registration order. The returned
    /// token removes exactly this registration when passed to
    /// [`unsubscribe`](Self::unsubscribe).
    pub fn subscribe<F>(&self, topic: Topic, handler: F) -> Subscription
    where
        F: Fn(&GameEvent) + 'static,
    {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        self.topics
            .borrow_mut()
            .entry(topic)
            .or_default()
            .push((id, Rc::new(handler)));

        Subscription { topic, id }
    }

    /// Removes the registration identified by `subscription`.
    ///
    /// Unknown or already-removed tokens are ignored. A publish that is
    /// already in flight still delivers to its snapshot.
    pub fn unsubscribe(&self, subscription: Subscription) {
        if let Some(handlers) = self.topics.borrow_mut().get_mut(&subscription.topic) {
            handlers.retain(|(id, _)| *id != subscription.id);
        }
    }

    /// Removes every registration on this dispatcher.
    pub fn clear(&self) {
        self.topics.borrow_mut().clear();
    }

    //--- Delivery ---------------------------------------------------------

    /// Invokes every handler currently registered for `topic`.
    ///
    /// Delivery is synchronous and in registration order. No handlers for
    /// the topic is a silent no-op.
    pub fn publish(&self, topic: Topic, event: &GameEvent) {
        // Snapshot first so handlers may freely mutate the registry.
        let snapshot: Vec<Handler> = match self.topics.borrow().get(&topic) {
            Some(handlers) => handlers.iter().map(|(_, h)| Rc::clone(h)).collect(),
            None => return,
        };

        for handler in snapshot {
            handler(event);
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
