//=========================================================================
// Scene
//=========================================================================
//
// Owns the actor collection and runs the per-frame pipeline.
//
// Pipeline (one pass per scheduler tick):
//   update → collide → cleanup → clear → render
//
// Flow:
//   Scene::add() ──subscribes──► actor SpawnActor / Destroy topics
//   actor.spawn_actor() ──event──► Scene inserts the child
//   actor.destroy()     ──event──► Scene defers removal to cleanup
//   Scene::change_scene() ──event──► scheduler swaps the active scene
//
// Every pass iterates an explicit snapshot of the collection taken at
// pass entry, never the live Vec, so handlers that add or remove actors
// mid-pass cannot corrupt the iteration. Structural mutation lands at
// pass boundaries: spawns append immediately (visible to later passes
// this frame), removals wait for the cleanup pass.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::actor::ActorHandle;
use crate::core::events::{EventDispatcher, GameEvent, Topic};
use crate::core::frame::GameInfo;
use crate::core::input::InputSnapshot;
use crate::core::render::{Color, RenderTarget};

//=== Scene ===============================================================

/// A named collection of actors with a fixed per-frame pipeline.
///
/// Scenes are handled as `Rc<Scene>`: actors' lifecycle subscriptions
/// hold weak references back to the scene, and the scheduler passes
/// scenes through `ChangeScene` events. Interior state lives in
/// fine-grained `RefCell`s so event handlers can mutate the collection
/// while a pipeline pass is in flight.
pub struct Scene {
    name: String,
    background: Color,

    /// Live collection, insertion order.
    actors: RefCell<Vec<ActorHandle>>,

    /// Actors that published Destroy this frame; drained by cleanup.
    doomed: RefCell<Vec<ActorHandle>>,

    events: Rc<EventDispatcher>,
    weak_self: Weak<Scene>,
}

impl Scene {
    //--- Construction -----------------------------------------------------

    /// Creates an empty scene with the given name and background color.
    pub fn new(name: impl Into<String>, background: Color) -> Rc<Self> {
        Rc::new_cyclic(|weak| Self {
            name: name.into(),
            background,
            actors: RefCell::new(Vec::new()),
            doomed: RefCell::new(Vec::new()),
            events: Rc::new(EventDispatcher::new()),
            weak_self: weak.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// The scene's own dispatcher (carries `ChangeScene` requests).
    pub fn events(&self) -> Rc<EventDispatcher> {
        Rc::clone(&self.events)
    }

    //--- Collection Management --------------------------------------------

    /// Appends an actor to the live collection.
    ///
    /// Binds the actor's self-handle and subscribes to its `SpawnActor`
    /// (recursively adds the child, so spawn chains of arbitrary depth
    /// resolve within one publish) and `Destroy` (defers removal to the
    /// cleanup pass) topics. Each actor instance belongs to exactly one
    /// scene; adding the same instance twice is skipped.
    pub fn add(&self, actor: ActorHandle) {
        if self
            .actors
            .borrow()
            .iter()
            .any(|present| Rc::ptr_eq(present, &actor))
        {
            warn!("actor already present in scene '{}', skipping add", self.name);
            return;
        }

        actor.borrow_mut().body_mut().bind(Rc::downgrade(&actor));
        let actor_events = actor.borrow().body().events();

        let weak = self.weak_self.clone();
        actor_events.subscribe(Topic::SpawnActor, move |event| {
            let Some(scene) = weak.upgrade() else { return };
            if let Some(child) = event.actor() {
                scene.add(Rc::clone(child));
            }
        });

        let weak = self.weak_self.clone();
        actor_events.subscribe(Topic::Destroy, move |event| {
            let Some(scene) = weak.upgrade() else { return };
            if let Some(actor) = event.actor() {
                scene.doomed.borrow_mut().push(Rc::clone(actor));
            }
        });

        self.actors.borrow_mut().push(actor);
        debug!("scene '{}' now holds {} actors", self.name, self.actors.borrow().len());
    }

    /// Removes an actor by identity. Absent actors are ignored.
    pub fn remove(&self, actor: &ActorHandle) {
        let mut actors = self.actors.borrow_mut();
        match actors.iter().position(|present| Rc::ptr_eq(present, actor)) {
            Some(index) => {
                actors.remove(index);
            }
            None => debug!("remove: actor not in scene '{}', ignoring", self.name),
        }
    }

    /// Asks the scheduler to make `next` the active scene.
    ///
    /// Publishes `ChangeScene`; the subscribed scheduler performs the
    /// swap at the end of the current tick.
    pub fn change_scene(&self, next: Rc<Scene>) {
        debug!("scene '{}' requests switch to '{}'", self.name, next.name);
        self.events.publish(Topic::ChangeScene, &GameEvent::for_scene(next));
    }

    /// Snapshot of the live collection, in insertion order.
    pub fn actors(&self) -> Vec<ActorHandle> {
        self.actors.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.actors.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.borrow().is_empty()
    }

    //--- Per-Frame Pipeline -----------------------------------------------

    /// Runs one full frame over the collection.
    ///
    /// 1. **Update**: every actor in the snapshot taken at entry. Actors
    ///    spawned during this pass join the collection but are not
    ///    updated until next frame.
    /// 2. **Collide**: full upper triangle over the post-update
    ///    collection (spawns included); overlapping pairs get a `Hit`
    ///    published on both sides, each carrying the other as target.
    /// 3. **Cleanup**: actors that published `Destroy` this frame are
    ///    removed by identity; the pending list is cleared.
    /// 4. **Clear**: the target is cleared to the background color over
    ///    the frame's screen rectangle.
    /// 5. **Render**: survivors render in collection order.
    pub fn update(&self, info: &GameInfo, input: &InputSnapshot, target: &mut dyn RenderTarget) {
        //--- 1. Update pass ----------------------------------------------
        let roster: Vec<ActorHandle> = self.actors.borrow().clone();
        for actor in &roster {
            actor.borrow_mut().update(info, input);
        }

        //--- 2. Collision pass -------------------------------------------
        // O(n²) by intent: no spatial partitioning, acceptable for the
        // small actor counts this engine is built for.
        let roster: Vec<ActorHandle> = self.actors.borrow().clone();
        for i in 0..roster.len() {
            for j in (i + 1)..roster.len() {
                let overlapping = {
                    let a = roster[i].borrow();
                    let b = roster[j].borrow();
                    a.body().hit_area().overlaps(&b.body().hit_area())
                };
                if overlapping {
                    // Borrows are released before publishing so handlers
                    // may freely mutate either actor.
                    let a_events = roster[i].borrow().body().events();
                    let b_events = roster[j].borrow().body().events();
                    a_events.publish(Topic::Hit, &GameEvent::for_actor(Rc::clone(&roster[j])));
                    b_events.publish(Topic::Hit, &GameEvent::for_actor(Rc::clone(&roster[i])));
                }
            }
        }

        //--- 3. Cleanup pass ---------------------------------------------
        let doomed: Vec<ActorHandle> = self.doomed.borrow_mut().drain(..).collect();
        for actor in &doomed {
            self.remove(actor);
        }

        //--- 4. Clear pass -----------------------------------------------
        target.clear(info.screen, self.background);

        //--- 5. Render pass ----------------------------------------------
        let roster: Vec<ActorHandle> = self.actors.borrow().clone();
        for actor in &roster {
            actor.borrow_mut().render(target);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
