//! SSD1306 OLED display driver
//!
//! This crate provides:
//! - [`Framebuffer`], an in-memory pixel buffer in the controller's native
//!   page layout
//! - A 5x8 bitmap [`font`] and a [`raster`]izer that draws text into it
//! - [`Ssd1306`], which brings the panel up and streams the framebuffer to
//!   it page by page
//! - [`DisplayBackend`], the drawing surface UI code can target
//!
//! # Architecture
//!
//! All drawing mutates the framebuffer only. [`Ssd1306::flush`] is the one
//! place pixel data goes out, through a [`DisplayTransport`] from
//! `monodot-hal`:
//!
//! ```text
//!  draw_text / set_pixel ──▶ Framebuffer ──flush──▶ DisplayTransport ──▶ panel
//! ```
//!
//! Out-of-range pixels and characters missing from the font are silently
//! dropped; only bus failures and bad configuration are reported.
//!
//! # Crate Features
//!
//! - **`defmt`** - structured logging via [`defmt`](https://docs.rs/defmt)
//! - **`serde`** - `Serialize`/`Deserialize` for [`DisplayConfig`]

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod config;
pub mod error;
pub mod font;
pub mod framebuffer;
pub mod raster;
pub mod ssd1306;

// Re-export key types
pub use backend::DisplayBackend;
pub use config::{parse_config, ConfigError, DisplayConfig};
pub use error::DisplayError;
pub use framebuffer::Framebuffer;
pub use monodot_hal::DisplayTransport;
pub use ssd1306::Ssd1306;
