//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the game scheduler.
//
// Architecture:
// ```text
//  Winit Event Loop
//   ├─ resumed ──────────► create window, start the scheduler clock
//   ├─ KeyboardInput ────► map to engine KeyCode, latch on InputSource
//   ├─ RedrawRequested ──► game.tick(now, target), request next redraw
//   └─ CloseRequested ───► exit event loop
// ```
//
// Key Design Decisions:
// - **RedrawRequested = tick attempt**: the host redraws at refresh
//   rate; the scheduler's own frame budget decides which redraws become
//   frames, so a 144 Hz monitor still yields the configured cap.
// - **Key repeats dropped**: OS auto-repeat would fake press edges; the
//   latched input source already models "held" without them.
// - **Main thread requirement**: Winit mandates the main thread on
//   macOS/iOS, so this runs on the thread that called `Game::run()`.
//
//=========================================================================

//=== Submodules ==========================================================

mod event_mapper;

//=== External Crates =====================================================

use std::time::Instant;

use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowAttributes},
};

//=== Internal Imports ====================================================

use crate::core::input::KeyCode;
use crate::core::render::RenderTarget;
use crate::game::Game;

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// These are typically fatal: if the event loop can't be created, the
/// game cannot run.
#[derive(Debug)]
pub enum PlatformError {
    /// Failed to create the event loop (rare, indicates an OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop execution error (rare, indicates corruption).
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

impl std::error::Error for PlatformError {}

//=== Platform ============================================================

/// Window manager and scheduler driver.
///
/// Owns the [`Game`] and its render target for the lifetime of the
/// window, translating OS events into scheduler calls.
///
/// # Thread Safety
///
/// This type is NOT Send/Sync - it must remain on the main thread.
pub(crate) struct Platform {
    game: Game,
    target: Box<dyn RenderTarget>,

    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    /// Baseline for the millisecond timestamps fed to the scheduler.
    epoch: Instant,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Wraps a configured game and target. Does not create the window
    /// yet - that happens lazily in `resumed()`.
    pub fn new(game: Game, target: Box<dyn RenderTarget>) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            game,
            target,
            window: None,
            epoch: Instant::now(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Starts the event loop and blocks until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if event loop creation or execution
    /// fails.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit requirement).
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Milliseconds since platform construction.
    fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Called when the app becomes active (startup or mobile resume).
    ///
    /// Creates the window if it doesn't exist yet and starts the
    /// scheduler clock. On mobile this may be called multiple times
    /// (suspend/resume cycle).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let (width, height) = self.game.size();
        let attrs = WindowAttributes::default()
            .with_title(self.game.title().to_string())
            .with_inner_size(LogicalSize::new(width, height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                self.game.start(self.now_ms());
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                event_loop.exit();
            }
        }
    }

    /// Handles per-window events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                // OS auto-repeat would fake press edges.
                if key_event.repeat {
                    return;
                }
                let key = match key_event.physical_key {
                    PhysicalKey::Code(code) => KeyCode::from(code),
                    _ => KeyCode::Unidentified,
                };
                if key == KeyCode::Unidentified {
                    trace!(target: "platform::input", "Unmapped key ignored");
                    return;
                }
                match key_event.state {
                    ElementState::Pressed => self.game.input_mut().signal_down(key),
                    ElementState::Released => self.game.input_mut().signal_up(key),
                }
            }

            WindowEvent::RedrawRequested => {
                self.game.tick(self.now_ms(), self.target.as_mut());

                // Request the next frame; the scheduler's budget decides
                // whether it runs.
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {
                // Ignore: Resized, Focused, etc.
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Rect;
    use crate::core::render::Color;
    use crate::game::GameBuilder;

    struct NullTarget;

    impl RenderTarget for NullTarget {
        fn bounds(&self) -> Rect {
            Rect::screen(640.0, 480.0)
        }
        fn clear(&mut self, _area: Rect, _color: Color) {}
        fn draw_image(&mut self, _image: &image::RgbaImage, _src: Rect, _dest: Rect) {}
    }

    #[test]
    fn window_is_created_lazily() {
        let platform = Platform::new(GameBuilder::new().build(), Box::new(NullTarget));
        assert!(platform.window.is_none());
    }

    #[test]
    fn clock_starts_near_zero() {
        let platform = Platform::new(GameBuilder::new().build(), Box::new(NullTarget));
        assert!(platform.now_ms() < 1000.0);
    }

    #[test]
    fn platform_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PlatformError>();
    }
}
