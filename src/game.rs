//=========================================================================
// Game Scheduler
//=========================================================================
//
// Owns the fixed-cadence frame loop and the active scene.
//
// Architecture:
//   GameBuilder ──build()──► Game (idle)
//                              │ start(now)
//                              ▼
//   host redraw ──tick(now)──► gate on frame budget
//                              │ (under budget → Skipped, nothing runs)
//                              ▼
//            sample input → build GameInfo → scene.update(...) → apply
//                                            deferred scene swap
//
// The budget is (1000 / max_rate) * RATE_ACCURACY milliseconds. The
// accuracy factor deliberately under-shoots the nominal frame time so a
// redraw that arrives marginally early still runs; without it a 60 Hz
// host vsync and a 60 fps cap beat against each other and drop to ~30.
//
// Scene swaps requested mid-frame (via a scene's `ChangeScene` event)
// are deferred to the end of the tick, so the outgoing scene always
// finishes its pipeline on a consistent collection.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::events::{Subscription, Topic};
use crate::core::frame::GameInfo;
use crate::core::geometry::Rect;
use crate::core::input::{InputSource, KeyboardState};
use crate::core::render::RenderTarget;
use crate::core::scene::Scene;
use crate::platform::{Platform, PlatformError};

//=== Constants ===========================================================

/// Fraction of the nominal frame time a tick must wait before running.
const RATE_ACCURACY: f64 = 0.9;

//=== TickOutcome =========================================================

/// What a [`Game::tick`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The frame budget had elapsed; the full pipeline ran.
    Ran,

    /// Under budget (or not started); nothing was sampled or drawn.
    Skipped,
}

//=== GameBuilder =========================================================

/// Fluent configuration for a [`Game`].
///
/// # Examples
///
/// ```no_run
/// use arcadia_engine::prelude::*;
///
/// let game = GameBuilder::new()
///     .with_title("Asteroid Run")
///     .with_size(800.0, 600.0)
///     .with_max_rate(60.0)
///     .build();
/// ```
pub struct GameBuilder {
    title: String,
    description: String,
    width: f32,
    height: f32,
    max_rate: f64,
    input: Box<dyn InputSource>,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self {
            title: "Untitled".to_string(),
            description: String::new(),
            width: 640.0,
            height: 480.0,
            max_rate: 60.0,
            input: Box::new(KeyboardState::new()),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the drawable screen size in logical pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not strictly positive.
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        assert!(width > 0.0, "screen width must be positive");
        assert!(height > 0.0, "screen height must be positive");
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the frame-rate ceiling in frames per second.
    ///
    /// # Panics
    ///
    /// Panics if `max_rate` is not strictly positive.
    pub fn with_max_rate(mut self, max_rate: f64) -> Self {
        assert!(max_rate > 0.0, "max_rate must be positive");
        self.max_rate = max_rate;
        self
    }

    /// Replaces the default keyboard-backed input source.
    pub fn with_input_source(mut self, input: Box<dyn InputSource>) -> Self {
        self.input = input;
        self
    }

    /// Finalizes the configuration into an idle [`Game`].
    pub fn build(self) -> Game {
        info!(
            "game '{}' configured: {}x{} @ {} fps cap",
            self.title, self.width, self.height, self.max_rate
        );
        Game {
            title: self.title,
            description: self.description,
            width: self.width,
            height: self.height,
            max_rate: self.max_rate,
            current_rate: 0.0,
            last_tick: 0.0,
            started: false,
            scene: None,
            scene_sub: None,
            pending_scene: Rc::new(RefCell::new(None)),
            input: self.input,
        }
    }
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Game ================================================================

/// The frame scheduler.
///
/// Holds the active scene and decides, per host redraw, whether enough
/// time has passed to run a frame. Construct via [`GameBuilder`].
pub struct Game {
    title: String,
    description: String,
    width: f32,
    height: f32,
    max_rate: f64,
    current_rate: f64,
    last_tick: f64,
    started: bool,
    scene: Option<Rc<Scene>>,
    scene_sub: Option<Subscription>,

    /// Swap requested mid-tick; applied once the pipeline finishes.
    pending_scene: Rc<RefCell<Option<Rc<Scene>>>>,

    input: Box<dyn InputSource>,
}

impl Game {
    //--- Accessors --------------------------------------------------------

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Screen size in logical pixels.
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn max_rate(&self) -> f64 {
        self.max_rate
    }

    /// Measured rate of the most recent frame that ran.
    pub fn current_rate(&self) -> f64 {
        self.current_rate
    }

    /// The active scene, if one has been installed.
    pub fn scene(&self) -> Option<Rc<Scene>> {
        self.scene.clone()
    }

    /// Mutable access to the input source, for the host layer to feed
    /// key transitions into.
    pub fn input_mut(&mut self) -> &mut dyn InputSource {
        self.input.as_mut()
    }

    //--- Lifecycle --------------------------------------------------------

    /// Moves the scheduler from idle to running.
    ///
    /// `timestamp_ms` becomes the baseline for the first frame budget;
    /// starting twice just re-baselines.
    pub fn start(&mut self, timestamp_ms: f64) {
        info!("game '{}' started", self.title);
        self.last_tick = timestamp_ms;
        self.started = true;
    }

    /// Makes `next` the active scene, immediately.
    ///
    /// The previous scene's swap subscription is dropped so requests it
    /// raises after being replaced are ignored. Swaps requested from
    /// inside a running frame go through the scene's `ChangeScene` event
    /// instead and land at the end of that tick.
    pub fn change_scene(&mut self, next: Rc<Scene>) {
        if let (Some(old), Some(sub)) = (&self.scene, self.scene_sub.take()) {
            old.events().unsubscribe(sub);
        }

        let pending = Rc::clone(&self.pending_scene);
        let sub = next.events().subscribe(Topic::ChangeScene, move |event| {
            if let Some(scene) = event.scene() {
                *pending.borrow_mut() = Some(Rc::clone(scene));
            }
        });

        info!("active scene: '{}'", next.name());
        self.scene_sub = Some(sub);
        self.scene = Some(next);
    }

    //--- Frame Loop -------------------------------------------------------

    /// Runs one frame if the budget has elapsed since the last one.
    ///
    /// `timestamp_ms` is the host's monotonic clock. A tick before
    /// [`start`](Self::start), or one arriving under budget, does
    /// nothing at all: no input sample, no scene pipeline, no drawing.
    pub fn tick(&mut self, timestamp_ms: f64, target: &mut dyn RenderTarget) -> TickOutcome {
        if !self.started {
            return TickOutcome::Skipped;
        }

        let elapsed = timestamp_ms - self.last_tick;
        let budget = 1000.0 / self.max_rate * RATE_ACCURACY;
        if elapsed <= budget {
            return TickOutcome::Skipped;
        }

        self.current_rate = 1000.0 / elapsed;
        self.last_tick = timestamp_ms;
        debug!(target: "frame", "tick: {:.1} ms elapsed, {:.1} fps", elapsed, self.current_rate);

        let input = self.input.sample();
        let info = GameInfo {
            title: self.title.clone(),
            description: self.description.clone(),
            screen: Rect::screen(self.width, self.height),
            max_rate: self.max_rate,
            current_rate: self.current_rate,
        };

        if let Some(scene) = &self.scene {
            scene.update(&info, &input, target);
        }

        // Deferred swap: taken on its own line so the pending slot's
        // borrow ends before change_scene touches the dispatcher.
        let next = self.pending_scene.borrow_mut().take();
        if let Some(next) = next {
            self.change_scene(next);
        }

        TickOutcome::Ran
    }

    /// Hands the scheduler to the windowing host and blocks until the
    /// window closes.
    pub fn run(self, target: Box<dyn RenderTarget>) -> Result<(), PlatformError> {
        Platform::new(self, target).run()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actor::{Actor, ActorBody};
    use crate::core::frame::GameInfo;
    use crate::core::input::InputSnapshot;
    use crate::core::render::Color;

    //--- Test Doubles -----------------------------------------------------

    struct NullTarget;

    impl RenderTarget for NullTarget {
        fn bounds(&self) -> Rect {
            Rect::screen(640.0, 480.0)
        }
        fn clear(&mut self, _area: Rect, _color: Color) {}
        fn draw_image(&mut self, _image: &image::RgbaImage, _src: Rect, _dest: Rect) {}
    }

    struct CountingTarget {
        clears: usize,
    }

    impl RenderTarget for CountingTarget {
        fn bounds(&self) -> Rect {
            Rect::screen(640.0, 480.0)
        }
        fn clear(&mut self, _area: Rect, _color: Color) {
            self.clears += 1;
        }
        fn draw_image(&mut self, _image: &image::RgbaImage, _src: Rect, _dest: Rect) {}
    }

    struct Counter {
        body: ActorBody,
        updates: Rc<RefCell<usize>>,
    }

    impl Actor for Counter {
        fn body(&self) -> &ActorBody {
            &self.body
        }
        fn body_mut(&mut self) -> &mut ActorBody {
            &mut self.body
        }
        fn update(&mut self, _info: &GameInfo, _input: &InputSnapshot) {
            *self.updates.borrow_mut() += 1;
        }
    }

    fn counting_actor(updates: &Rc<RefCell<usize>>) -> Rc<RefCell<Counter>> {
        Rc::new(RefCell::new(Counter {
            body: ActorBody::new(0.0, 0.0, Rect::new(0.0, 0.0, 1.0, 1.0)),
            updates: Rc::clone(updates),
        }))
    }

    //--- Builder ----------------------------------------------------------

    #[test]
    fn builder_defaults() {
        let game = GameBuilder::new().build();
        assert_eq!(game.title(), "Untitled");
        assert_eq!(game.size(), (640.0, 480.0));
        assert_eq!(game.max_rate(), 60.0);
        assert!(game.scene().is_none());
    }

    #[test]
    fn builder_applies_configuration() {
        let game = GameBuilder::new()
            .with_title("Asteroid Run")
            .with_description("dodge rocks")
            .with_size(800.0, 600.0)
            .with_max_rate(30.0)
            .build();

        assert_eq!(game.title(), "Asteroid Run");
        assert_eq!(game.description(), "dodge rocks");
        assert_eq!(game.size(), (800.0, 600.0));
        assert_eq!(game.max_rate(), 30.0);
    }

    #[test]
    #[should_panic(expected = "max_rate must be positive")]
    fn builder_rejects_zero_rate() {
        GameBuilder::new().with_max_rate(0.0);
    }

    #[test]
    #[should_panic(expected = "screen width must be positive")]
    fn builder_rejects_empty_screen() {
        GameBuilder::new().with_size(0.0, 480.0);
    }

    //--- Tick Gating ------------------------------------------------------

    #[test]
    fn tick_before_start_is_skipped() {
        let mut game = GameBuilder::new().build();
        let mut target = CountingTarget { clears: 0 };

        assert_eq!(game.tick(1000.0, &mut target), TickOutcome::Skipped);
        assert_eq!(target.clears, 0);
    }

    #[test]
    fn tick_under_budget_is_skipped() {
        // 60 fps cap → 16.67 ms nominal → 15 ms budget with the 0.9
        // accuracy factor.
        let mut game = GameBuilder::new().with_max_rate(60.0).build();
        let mut target = NullTarget;
        game.start(0.0);

        assert_eq!(game.tick(10.0, &mut target), TickOutcome::Skipped);
        assert_eq!(game.tick(14.9, &mut target), TickOutcome::Skipped);
        assert_eq!(game.tick(20.0, &mut target), TickOutcome::Ran);
    }

    #[test]
    fn ran_tick_measures_current_rate_from_real_elapsed() {
        let mut game = GameBuilder::new().with_max_rate(60.0).build();
        let mut target = NullTarget;
        game.start(0.0);

        // 20 ms between frames → 50 fps measured, regardless of the cap.
        assert_eq!(game.tick(20.0, &mut target), TickOutcome::Ran);
        assert_eq!(game.current_rate(), 50.0);
    }

    #[test]
    fn skipped_tick_does_not_rebaseline() {
        let mut game = GameBuilder::new().with_max_rate(60.0).build();
        let mut target = NullTarget;
        game.start(0.0);

        // The skip at 10 ms must not push the next budget window out.
        assert_eq!(game.tick(10.0, &mut target), TickOutcome::Skipped);
        assert_eq!(game.tick(16.0, &mut target), TickOutcome::Ran);
    }

    #[test]
    fn skipped_tick_runs_no_scene_pass() {
        let updates = Rc::new(RefCell::new(0));
        let scene = Scene::new("main", Color::BLACK);
        scene.add(counting_actor(&updates));

        let mut game = GameBuilder::new().with_max_rate(60.0).build();
        game.change_scene(scene);
        game.start(0.0);

        let mut target = CountingTarget { clears: 0 };
        game.tick(5.0, &mut target);
        assert_eq!(*updates.borrow(), 0);
        assert_eq!(target.clears, 0);

        game.tick(20.0, &mut target);
        assert_eq!(*updates.borrow(), 1);
        assert_eq!(target.clears, 1);
    }

    //--- Scene Swapping ---------------------------------------------------

    #[test]
    fn change_scene_installs_immediately_outside_a_tick() {
        let mut game = GameBuilder::new().build();
        let scene = Scene::new("menu", Color::BLACK);
        game.change_scene(Rc::clone(&scene));

        assert!(Rc::ptr_eq(&game.scene().unwrap(), &scene));
    }

    #[test]
    fn swap_requested_by_a_scene_lands_at_end_of_tick() {
        let mut game = GameBuilder::new().with_max_rate(60.0).build();
        let menu = Scene::new("menu", Color::BLACK);
        let level = Scene::new("level", Color::BLACK);
        game.change_scene(Rc::clone(&menu));
        game.start(0.0);

        // The request only marks the swap pending...
        menu.change_scene(Rc::clone(&level));
        assert!(Rc::ptr_eq(&game.scene().unwrap(), &menu));

        // ...and the next ran tick applies it after the pipeline.
        let mut target = NullTarget;
        assert_eq!(game.tick(20.0, &mut target), TickOutcome::Ran);
        assert!(Rc::ptr_eq(&game.scene().unwrap(), &level));
    }

    #[test]
    fn swaps_chain_across_ticks() {
        let mut game = GameBuilder::new().with_max_rate(60.0).build();
        let a = Scene::new("a", Color::BLACK);
        let b = Scene::new("b", Color::BLACK);
        let c = Scene::new("c", Color::BLACK);
        game.change_scene(Rc::clone(&a));
        game.start(0.0);

        let mut target = NullTarget;

        a.change_scene(Rc::clone(&b));
        game.tick(20.0, &mut target);
        assert_eq!(game.scene().unwrap().name(), "b");

        b.change_scene(Rc::clone(&c));
        game.tick(40.0, &mut target);
        assert_eq!(game.scene().unwrap().name(), "c");
    }

    #[test]
    fn replaced_scene_can_no_longer_request_swaps() {
        let mut game = GameBuilder::new().with_max_rate(60.0).build();
        let menu = Scene::new("menu", Color::BLACK);
        let level = Scene::new("level", Color::BLACK);
        game.change_scene(Rc::clone(&menu));
        game.change_scene(Rc::clone(&level));
        game.start(0.0);

        // The menu was replaced before it fired; its request is stale.
        let rogue = Scene::new("rogue", Color::BLACK);
        menu.change_scene(rogue);

        let mut target = NullTarget;
        game.tick(20.0, &mut target);
        assert!(Rc::ptr_eq(&game.scene().unwrap(), &level));
    }

    #[test]
    fn tick_without_a_scene_still_runs() {
        let mut game = GameBuilder::new().with_max_rate(60.0).build();
        game.start(0.0);

        let mut target = CountingTarget { clears: 0 };
        assert_eq!(game.tick(20.0, &mut target), TickOutcome::Ran);
        // No scene, so nothing cleared the target.
        assert_eq!(target.clears, 0);
    }
}
