//=========================================================================
// Geometry
//=========================================================================
//
// Axis-aligned rectangle value type used for screen bounds, hit areas,
// and image sub-regions.
//
//=========================================================================

//=== Rect ================================================================

/// An axis-aligned rectangle defined by origin and size.
///
/// Covers the half-open intervals `[x, x + w)` on the horizontal axis and
/// `[y, y + h)` on the vertical axis. Plain value semantics; cheap to copy.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Full-screen rectangle at the origin.
    pub const fn screen(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Returns `true` if the two rectangles overlap on both axes.
    ///
    /// Edges are exclusive: rectangles that merely touch do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
