//! Error types for the display driver.

use core::fmt;

use crate::config::ConfigError;

/// Errors that can occur during display operations
///
/// Only transport failures and rejected configurations are reported.
/// Out-of-range pixels and unsupported characters are not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError<E> {
    /// Bus transport failure (device absent, NACK, bus contention)
    Transport(E),
    /// Configuration rejected at construction
    Config(ConfigError),
}

impl<E> From<ConfigError> for DisplayError<E> {
    fn from(e: ConfigError) -> Self {
        DisplayError::Config(e)
    }
}

impl<E: fmt::Debug> fmt::Display for DisplayError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DisplayError::Transport(e) => write!(f, "transport error: {:?}", e),
            DisplayError::Config(e) => write!(f, "configuration error: {}", e),
        }
    }
}
