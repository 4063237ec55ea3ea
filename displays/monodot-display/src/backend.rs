//! Display backend trait
//!
//! Defines the drawing surface application code renders against, so the
//! same UI code can target any panel driver.

/// Display backend trait
///
/// Drawing calls only touch the in-memory buffer; nothing reaches the
/// hardware until [`flush`](DisplayBackend::flush) is called.
pub trait DisplayBackend {
    /// Error type for hardware access
    type Error;

    /// Turn every pixel off
    fn clear(&mut self);

    /// Set or clear a pixel (out-of-range coordinates are ignored)
    fn set_pixel(&mut self, x: i32, y: i32, on: bool);

    /// Draw text with its top-left corner at `(x, y)`
    fn draw_text(&mut self, x: i32, y: i32, text: &str);

    /// Send buffered content to the display
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Panel dimensions in pixels as (width, height)
    fn dimensions(&self) -> (usize, usize);

    /// Check if the display is ready
    fn is_ready(&self) -> bool;
}
