//! Monodot Hardware Abstraction Layer
//!
//! This crate defines the bus abstractions the display driver talks
//! through. Chip-specific HALs plug in at the bottom via `embedded-hal`,
//! and the driver only ever sees a [`DisplayTransport`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  monodot-display (SSD1306 driver)       │
//! └─────────────────────────────────────────┘
//!                     │  DisplayTransport
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  I2cTransport (control-byte framing)    │
//! └─────────────────────────────────────────┘
//!                     │  I2cBus
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  HalI2c (any embedded-hal 1.0 I2C)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - Blocking I2C writes
//! - [`transport::DisplayTransport`] - Command/data writes to a display

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;
pub mod transport;

// Re-export key types at crate root for convenience
pub use i2c::{HalI2c, I2cBus, I2cBusError};
pub use transport::{
    DisplayTransport, I2cTransport, TransportError, CONTROL_COMMAND, CONTROL_DATA, MAX_DATA_CHUNK,
};
