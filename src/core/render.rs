//=========================================================================
// Render Target
//=========================================================================
//
// Boundary contract for the pixel output device.
//
// The engine never draws pixels itself: the scene's clear pass and each
// actor's render hook talk to whatever implements `RenderTarget` — a
// software framebuffer, a GPU surface wrapper, or a recording fake in
// tests.
//
//=========================================================================

//=== External Dependencies ===============================================

use image::RgbaImage;

//=== Internal Dependencies ===============================================

use crate::core::geometry::Rect;

//=== Color ===============================================================

/// Solid RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

//=== RenderTarget ========================================================

/// Pixel output device.
///
/// Implementations are free to batch or defer actual presentation; the
/// engine only guarantees call order (one clear, then actor renders in
/// collection order, once per frame that runs).
pub trait RenderTarget {
    /// The device's drawable rectangle.
    fn bounds(&self) -> Rect;

    /// Fills `area` with a solid color.
    fn clear(&mut self, area: Rect, color: Color);

    /// Draws the `src` sub-region of a decoded image into `dest`.
    ///
    /// `dest` carries both position and size, so implementations decide
    /// how to scale when the two differ.
    fn draw_image(&mut self, image: &RgbaImage, src: Rect, dest: Rect);
}
