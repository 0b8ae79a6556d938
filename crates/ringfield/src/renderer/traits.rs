//! Drawing surface contract.
//!
//! The core never touches a canvas. It hands finished sprite buffers to a
//! `Surface`; the WASM bridge implements one over `CanvasRenderingContext2d`,
//! tests implement one that records calls.

use super::instance::SpriteBuffer;

/// Something stars can be painted onto.
///
/// All coordinates are CSS pixels. Implementations own the mapping to device
/// pixels (backing-store size and transform) established in `resize`.
pub trait Surface {
    /// Backend identifier (e.g., "canvas2d", "recording").
    fn backend(&self) -> &'static str;

    /// Resize the backing store to `css_width × css_height` at `pixel_ratio`
    /// device pixels per CSS pixel, and reset the drawing transform to match.
    fn resize(&mut self, css_width: f32, css_height: f32, pixel_ratio: f32);

    /// Clear the whole visible area.
    fn clear(&mut self, css_width: f32, css_height: f32);

    /// Draw every sprite as a filled square.
    fn draw(&mut self, sprites: &SpriteBuffer);
}
