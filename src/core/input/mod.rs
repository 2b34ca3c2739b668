//=========================================================================
// Input
//=========================================================================
//
// Per-frame keyboard snapshots with edge detection.
//
// Architecture:
//   host key signals → KeyboardState (latched) → sample() → InputSnapshot
//
// The source latches key-down/key-up signals between frames; `sample()`
// freezes that state into a snapshot holding exactly the current and the
// immediately-preceding frame's key sets. Edge queries (`pressed`,
// `released`) are pure functions of those two sets — never re-checked
// against live state mid-frame.
//
//=========================================================================

//=== Submodules ==========================================================

mod keys;

pub use keys::KeyCode;

//=== External Dependencies ===============================================

use std::collections::HashSet;

use log::trace;

//=== InputSnapshot =======================================================

/// Immutable key state for one frame.
///
/// Holds the key set at sample time and the set from the previous sample.
/// All queries are pure reads; two calls with the same arguments always
/// agree within a frame.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    current: HashSet<KeyCode>,
    previous: HashSet<KeyCode>,
}

impl InputSnapshot {
    /// Snapshot with no keys held in either frame. Useful for tests and
    /// for ticking before any input has arrived.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns `true` while the key is held this frame.
    pub fn is_down(&self, key: KeyCode) -> bool {
        self.current.contains(&key)
    }

    /// Returns `true` only on the frame the key transitioned UP → DOWN.
    pub fn pressed(&self, key: KeyCode) -> bool {
        self.current.contains(&key) && !self.previous.contains(&key)
    }

    /// Returns `true` only on the frame the key transitioned DOWN → UP.
    pub fn released(&self, key: KeyCode) -> bool {
        !self.current.contains(&key) && self.previous.contains(&key)
    }
}

//=== InputSource =========================================================

/// Boundary contract for whatever captures raw input.
///
/// The host pushes key transitions as they arrive; the scheduler calls
/// [`sample`](Self::sample) exactly once per frame that runs.
pub trait InputSource {
    /// Latches a key as held.
    fn signal_down(&mut self, key: KeyCode);

    /// Latches a key as released.
    fn signal_up(&mut self, key: KeyCode);

    /// Freezes the latched state into this frame's snapshot.
    ///
    /// The snapshot's "previous" set must be the state frozen by the
    /// preceding `sample` call — a one-frame delay, exactly.
    fn sample(&mut self) -> InputSnapshot;
}

//=== KeyboardState =======================================================

/// Default [`InputSource`] backed by a latched key set.
///
/// Signals may arrive at any cadence; state persists until the opposite
/// signal, so a key held across many frames stays down in every snapshot.
pub struct KeyboardState {
    held: HashSet<KeyCode>,
    previous: HashSet<KeyCode>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            previous: HashSet::new(),
        }
    }
}

impl InputSource for KeyboardState {
    fn signal_down(&mut self, key: KeyCode) {
        trace!(target: "input", "key down: {:?}", key);
        self.held.insert(key);
    }

    fn signal_up(&mut self, key: KeyCode) {
        trace!(target: "input", "key up: {:?}", key);
        self.held.remove(&key);
    }

    fn sample(&mut self) -> InputSnapshot {
        let current = self.held.clone();
        let previous = std::mem::replace(&mut self.previous, current.clone());
        InputSnapshot { current, previous }
    }
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressed_only_on_transition_frame() {
        let mut keyboard = KeyboardState::new();

        // Frame 1: key goes down
        keyboard.signal_down(KeyCode::Space);
        let frame = keyboard.sample();
        assert!(frame.is_down(KeyCode::Space));
        assert!(frame.pressed(KeyCode::Space));

        // Frame 2: still held, no longer an edge
        let frame = keyboard.sample();
        assert!(frame.is_down(KeyCode::Space));
        assert!(!frame.pressed(KeyCode::Space));

        // Frame 3: released
        keyboard.signal_up(KeyCode::Space);
        let frame = keyboard.sample();
        assert!(!frame.is_down(KeyCode::Space));
        assert!(!frame.pressed(KeyCode::Space));
        assert!(frame.released(KeyCode::Space));

        // Frame 4: release edge is gone too
        let frame = keyboard.sample();
        assert!(!frame.released(KeyCode::Space));
    }

    #[test]
    fn key_held_across_many_frames_stays_down() {
        let mut keyboard = KeyboardState::new();
        keyboard.signal_down(KeyCode::KeyW);

        for _ in 0..10 {
            let frame = keyboard.sample();
            assert!(frame.is_down(KeyCode::KeyW));
        }
    }

    #[test]
    fn tap_between_samples_registers_nothing() {
        // Down and up both latched before the next sample: the latched set
        // ends where it started, so the snapshot shows no trace.
        let mut keyboard = KeyboardState::new();
        keyboard.sample();

        keyboard.signal_down(KeyCode::KeyA);
        keyboard.signal_up(KeyCode::KeyA);

        let frame = keyboard.sample();
        assert!(!frame.is_down(KeyCode::KeyA));
        assert!(!frame.pressed(KeyCode::KeyA));
        assert!(!frame.released(KeyCode::KeyA));
    }

    #[test]
    fn snapshot_is_frozen_at_sample_time() {
        let mut keyboard = KeyboardState::new();
        keyboard.signal_down(KeyCode::KeyA);
        let frame = keyboard.sample();

        // Later signals must not bleed into an already-taken snapshot.
        keyboard.signal_up(KeyCode::KeyA);
        keyboard.signal_down(KeyCode::KeyB);

        assert!(frame.is_down(KeyCode::KeyA));
        assert!(!frame.is_down(KeyCode::KeyB));
    }

    #[test]
    fn keys_tracked_independently() {
        let mut keyboard = KeyboardState::new();
        keyboard.signal_down(KeyCode::ArrowLeft);
        keyboard.signal_down(KeyCode::ArrowUp);
        keyboard.sample();

        keyboard.signal_up(KeyCode::ArrowLeft);
        let frame = keyboard.sample();

        assert!(frame.released(KeyCode::ArrowLeft));
        assert!(frame.is_down(KeyCode::ArrowUp));
        assert!(!frame.pressed(KeyCode::ArrowUp));
    }

    #[test]
    fn empty_snapshot_reports_nothing() {
        let frame = InputSnapshot::empty();
        assert!(!frame.is_down(KeyCode::Enter));
        assert!(!frame.pressed(KeyCode::Enter));
        assert!(!frame.released(KeyCode::Enter));
    }
}
