//! Page-addressed monochrome framebuffer
//!
//! The buffer mirrors the controller's display RAM: `pages` rows of
//! `width` bytes, each byte holding 8 vertically stacked pixels with bit 0
//! at the top of the page. Pixel `(x, y)` lives at byte
//! `x + (y / 8) * width`, bit `y % 8`, so a page can be streamed to the
//! device without any transposition.

use heapless::Vec;

use crate::config::{
    validate_dimensions, ConfigError, DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_HEIGHT, MAX_WIDTH,
    PAGE_HEIGHT,
};

/// Largest buffer the controller can address (128 columns x 8 pages)
pub const MAX_BUFFER_LEN: usize = MAX_WIDTH * MAX_HEIGHT / PAGE_HEIGHT;

/// Monochrome framebuffer in controller page layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pages: usize,
    /// `width * pages` bytes, fixed at construction
    buffer: Vec<u8, MAX_BUFFER_LEN>,
}

impl Default for Framebuffer {
    fn default() -> Self {
        let pages = DEFAULT_HEIGHT / PAGE_HEIGHT;
        let mut buffer = Vec::new();
        buffer.resize_default(DEFAULT_WIDTH * pages).ok();
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            pages,
            buffer,
        }
    }
}

impl Framebuffer {
    /// Allocate an all-off framebuffer
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if `height` is not a multiple of 8 or the
    /// size is zero or larger than the controller supports.
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        validate_dimensions(width, height)?;

        let pages = height / PAGE_HEIGHT;
        let mut buffer = Vec::new();
        buffer
            .resize_default(width * pages)
            .map_err(|_| ConfigError::WidthTooLarge)?;

        Ok(Self {
            width,
            height,
            pages,
            buffer,
        })
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of 8-pixel pages
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }

    /// Set or clear one pixel
    ///
    /// Coordinates outside the panel are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        let Some((index, mask)) = self.locate(x, y) else {
            return;
        };

        if on {
            self.buffer[index] |= mask;
        } else {
            self.buffer[index] &= !mask;
        }
    }

    /// Read back one pixel (`false` outside the panel)
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        match self.locate(x, y) {
            Some((index, mask)) => self.buffer[index] & mask != 0,
            None => false,
        }
    }

    /// The `width` bytes of one page
    ///
    /// # Panics
    /// Panics if `page >= pages()`.
    pub fn page_slice(&self, page: usize) -> &[u8] {
        let start = page * self.width;
        &self.buffer[start..start + self.width]
    }

    /// The whole buffer in page-major order
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Byte index and bit mask for a pixel, if it is on the panel
    fn locate(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        if x >= self.width || y >= self.height {
            return None;
        }

        let page = y / PAGE_HEIGHT;
        let bit = y % PAGE_HEIGHT;
        Some((x + page * self.width, 1 << bit))
    }
}
