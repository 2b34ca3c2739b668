//=========================================================================
// Frame Info
//=========================================================================
//
// Read-only per-frame snapshot handed to scenes and actors.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::geometry::Rect;

//=== GameInfo ============================================================

/// Facts about the game and the current frame.
///
/// Built fresh by the scheduler on every tick that runs; never mutated
/// during a frame.
#[derive(Debug, Clone)]
pub struct GameInfo {
    /// Game title, as configured on the scheduler.
    pub title: String,

    /// Game description, as configured on the scheduler.
    pub description: String,

    /// Drawable screen rectangle, anchored at the origin.
    pub screen: Rect,

    /// Configured frame-rate ceiling (frames per second).
    pub max_rate: f64,

    /// Measured rate of the frame being processed (frames per second).
    pub current_rate: f64,
}
