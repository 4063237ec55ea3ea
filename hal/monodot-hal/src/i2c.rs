//! I2C bus abstractions
//!
//! Provides the blocking write primitive the display transport is built on,
//! plus an adapter for any `embedded-hal` 1.0 I2C implementation.

use core::fmt;

use embedded_hal::i2c::{Error as _, ErrorKind};

/// I2C bus master
///
/// Only the write direction is needed to drive a display controller.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// The whole slice goes out as a single transaction (one START, one STOP).
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;
}

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBusError {
    /// Bus error
    Bus,
    /// Arbitration lost
    ArbitrationLost,
    /// NACK received (device absent or busy)
    Nack,
    /// Overrun
    Overrun,
    /// Other error
    Other,
}

impl From<ErrorKind> for I2cBusError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus => I2cBusError::Bus,
            ErrorKind::ArbitrationLoss => I2cBusError::ArbitrationLost,
            ErrorKind::NoAcknowledge(_) => I2cBusError::Nack,
            ErrorKind::Overrun => I2cBusError::Overrun,
            _ => I2cBusError::Other,
        }
    }
}

impl fmt::Display for I2cBusError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            I2cBusError::Bus => write!(f, "I2C bus error"),
            I2cBusError::ArbitrationLost => write!(f, "I2C arbitration lost"),
            I2cBusError::Nack => write!(f, "I2C device did not acknowledge"),
            I2cBusError::Overrun => write!(f, "I2C overrun"),
            I2cBusError::Other => write!(f, "I2C error"),
        }
    }
}

/// Adapter exposing an `embedded-hal` I2C peripheral as an [`I2cBus`]
///
/// Peripheral-specific errors are collapsed into [`I2cBusError`] through
/// `embedded_hal::i2c::Error::kind`.
pub struct HalI2c<I2C> {
    i2c: I2C,
}

impl<I2C> HalI2c<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Wrap an I2C peripheral (takes ownership for exclusive access)
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Consume the adapter and return the peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> I2cBus for HalI2c<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    type Error = I2cBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.i2c
            .write(address, data)
            .map_err(|e| I2cBusError::from(e.kind()))
    }
}
