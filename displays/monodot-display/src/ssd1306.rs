//! SSD1306 OLED Display Driver
//!
//! Driver for SSD1306-based monochrome OLED panels (up to 128x64) on a
//! two-wire bus. Drawing goes into an in-memory [`Framebuffer`]; nothing
//! reaches the panel until [`Ssd1306::flush`] repaints every page.

use monodot_hal::DisplayTransport;

use crate::backend::DisplayBackend;
use crate::config::DisplayConfig;
use crate::error::DisplayError;
use crate::framebuffer::Framebuffer;
use crate::raster;

/// SSD1306 commands
pub mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const DISPLAY_RAM: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// Power-on configuration, sent one byte per command transaction
pub const INIT_SEQUENCE: [u8; 28] = [
    cmd::DISPLAY_OFF,
    cmd::SET_MEMORY_MODE,
    0x00, // Horizontal addressing
    cmd::SET_PAGE_ADDR,
    cmd::SET_COM_SCAN_DEC, // Flip vertically
    cmd::SET_LOW_COLUMN,
    cmd::SET_HIGH_COLUMN,
    cmd::SET_START_LINE,
    cmd::SET_CONTRAST,
    0x7F,
    cmd::SET_SEG_REMAP, // Flip horizontally
    cmd::SET_NORMAL,
    cmd::SET_MUX_RATIO,
    0x3F, // 64 lines
    cmd::DISPLAY_RAM,
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_CLOCK_DIV,
    0x80, // Default clock
    cmd::SET_PRECHARGE,
    0xF1,
    cmd::SET_COM_PINS,
    0x12, // Alternative COM config
    cmd::SET_VCOM_DETECT,
    0x40,
    cmd::SET_CHARGE_PUMP,
    0x14, // Enable charge pump
    cmd::DISPLAY_ON,
];

/// Power-down sequence: panel off, then charge pump off
pub const SHUTDOWN_SEQUENCE: [u8; 3] = [cmd::DISPLAY_OFF, cmd::SET_CHARGE_PUMP, 0x10];

/// SSD1306 OLED driver
///
/// # Lifecycle
///
/// 1. [`Ssd1306::new()`] validates the config, sends the power-on sequence
///    and blanks the panel.
/// 2. Draw with [`set_pixel`](Ssd1306::set_pixel),
///    [`draw_text`](Ssd1306::draw_text) or through
///    [`framebuffer_mut`](Ssd1306::framebuffer_mut).
/// 3. [`Ssd1306::flush()`] sends the framebuffer to the panel.
///
/// # Example
///
/// ```no_run
/// # fn example<T: monodot_display::DisplayTransport>(transport: T) -> Result<(), monodot_display::DisplayError<T::Error>> {
/// use monodot_display::{DisplayConfig, Ssd1306};
///
/// let mut oled = Ssd1306::new(transport, DisplayConfig::default())?;
/// oled.draw_text(0, 0, "Hello");
/// oled.flush()?;
/// # Ok(())
/// # }
/// ```
pub struct Ssd1306<T> {
    transport: T,
    config: DisplayConfig,
    framebuffer: Framebuffer,
    /// Set after the power-on sequence, cleared by `shutdown()`
    ready: bool,
}

impl<T> Ssd1306<T>
where
    T: DisplayTransport,
{
    /// Create the driver and bring the panel up
    ///
    /// # Errors
    ///
    /// Returns [`DisplayError::Config`] before any bus traffic if the config
    /// is rejected, or [`DisplayError::Transport`] if a write fails during
    /// initialisation.
    pub fn new(transport: T, config: DisplayConfig) -> Result<Self, DisplayError<T::Error>> {
        config.validate()?;
        let framebuffer = Framebuffer::new(config.width, config.height)?;

        let mut display = Self {
            transport,
            config,
            framebuffer,
            ready: false,
        };
        display.initialize()?;
        Ok(display)
    }

    /// Send the power-on sequence, then blank the panel
    ///
    /// Also brings the panel back after [`shutdown`](Self::shutdown).
    /// The framebuffer is cleared.
    pub fn initialize(&mut self) -> Result<(), DisplayError<T::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "SSD1306 init: {}x{} on bus {} at {=u8:#x}",
            self.config.width,
            self.config.height,
            self.config.bus_number,
            self.config.device_address
        );

        for &c in INIT_SEQUENCE.iter() {
            self.command(c)?;
        }

        self.framebuffer.clear();
        self.flush()?;
        self.ready = true;

        #[cfg(feature = "defmt")]
        defmt::info!("SSD1306 ready");

        Ok(())
    }

    /// Turn the panel and its charge pump off
    ///
    /// Display RAM and the framebuffer are kept.
    pub fn shutdown(&mut self) -> Result<(), DisplayError<T::Error>> {
        self.ready = false;
        for &c in SHUTDOWN_SEQUENCE.iter() {
            self.command(c)?;
        }

        #[cfg(feature = "defmt")]
        defmt::info!("SSD1306 shut down");

        Ok(())
    }

    /// Send the framebuffer to the panel, one page at a time
    ///
    /// Each page is addressed explicitly and its data split into chunks of
    /// at most `max_chunk_len()` bytes. The first failing write aborts the
    /// flush.
    pub fn flush(&mut self) -> Result<(), DisplayError<T::Error>> {
        let address = self.config.device_address;

        for page in 0..self.framebuffer.pages() {
            self.command(cmd::SET_PAGE_ADDR + page as u8)?;
            self.command(cmd::SET_LOW_COLUMN)?;
            self.command(cmd::SET_HIGH_COLUMN)?;

            write_chunked(
                &mut self.transport,
                address,
                self.framebuffer.page_slice(page),
            )
            .map_err(|e| {
                #[cfg(feature = "defmt")]
                defmt::warn!("SSD1306 data write failed on page {}", page);
                DisplayError::Transport(e)
            })?;
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("SSD1306 flushed {} pages", self.framebuffer.pages());

        Ok(())
    }

    /// Clear the framebuffer (call [`flush`](Self::flush) to show it)
    pub fn clear(&mut self) {
        self.framebuffer.clear();
    }

    /// Set or clear a pixel (out-of-range coordinates are ignored)
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        self.framebuffer.set_pixel(x, y, on);
    }

    /// Draw one character with its top-left corner at `(x, y)`
    pub fn draw_char(&mut self, x: i32, y: i32, ch: char) {
        raster::draw_char(&mut self.framebuffer, x, y, ch);
    }

    /// Draw a line of text with its top-left corner at `(x, y)`
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        raster::draw_text(&mut self.framebuffer, x, y, text);
    }

    /// The framebuffer
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Mutable access to the framebuffer for direct drawing
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    /// The config the driver was built with
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Check whether the panel is powered up
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Consume the driver and return the transport
    pub fn release(self) -> T {
        self.transport
    }

    fn command(&mut self, opcode: u8) -> Result<(), DisplayError<T::Error>> {
        self.transport
            .write_command(self.config.device_address, opcode)
            .map_err(|e| {
                #[cfg(feature = "defmt")]
                defmt::warn!("SSD1306 command {=u8:#x} failed", opcode);
                DisplayError::Transport(e)
            })
    }
}

/// Write a payload as consecutive data transactions, in order
fn write_chunked<T: DisplayTransport>(
    transport: &mut T,
    address: u8,
    payload: &[u8],
) -> Result<(), T::Error> {
    let chunk_len = transport.max_chunk_len().max(1);
    for chunk in payload.chunks(chunk_len) {
        transport.write_data(address, chunk)?;
    }
    Ok(())
}

impl<T> DisplayBackend for Ssd1306<T>
where
    T: DisplayTransport,
{
    type Error = DisplayError<T::Error>;

    fn clear(&mut self) {
        Ssd1306::clear(self);
    }

    fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        Ssd1306::set_pixel(self, x, y, on);
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        Ssd1306::draw_text(self, x, y, text);
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ssd1306::flush(self)
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.framebuffer.width(), self.framebuffer.height())
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}
