//! Display configuration
//!
//! [`DisplayConfig`] carries the construction-time options for a panel.
//! It can be built in code, deserialized with the `serde` feature, or read
//! from a small TOML subset with [`parse_config`]:
//!
//! ```text
//! [display]
//! width = 128
//! height = 64
//! bus = 1
//! address = 0x3C
//! ```

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Height of one controller page in pixels
pub const PAGE_HEIGHT: usize = 8;

/// Widest panel the controller's display RAM can address
pub const MAX_WIDTH: usize = 128;

/// Tallest panel the controller's display RAM can address
pub const MAX_HEIGHT: usize = 64;

/// Default panel width
pub const DEFAULT_WIDTH: usize = 128;

/// Default panel height
pub const DEFAULT_HEIGHT: usize = 64;

/// Default bus instance
pub const DEFAULT_BUS: u8 = 1;

/// Default 7-bit device address (0x3D is the common alternative)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Width or height is zero
    ZeroDimension,
    /// Height is not a whole number of pages
    HeightNotPageAligned,
    /// Width exceeds the controller's column count
    WidthTooLarge,
    /// Height exceeds the controller's row count
    HeightTooLarge,
    /// Device address does not fit in 7 bits
    InvalidAddress,
    /// Unknown or malformed section header
    InvalidSection,
    /// Value is not an integer in range
    InvalidValue,
    /// Key not recognised
    UnknownKey,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::ZeroDimension => write!(f, "width and height must be non-zero"),
            ConfigError::HeightNotPageAligned => {
                write!(f, "height must be a multiple of {}", PAGE_HEIGHT)
            }
            ConfigError::WidthTooLarge => write!(f, "width exceeds {} pixels", MAX_WIDTH),
            ConfigError::HeightTooLarge => write!(f, "height exceeds {} pixels", MAX_HEIGHT),
            ConfigError::InvalidAddress => write!(f, "device address must be 7-bit"),
            ConfigError::InvalidSection => write!(f, "invalid section header"),
            ConfigError::InvalidValue => write!(f, "invalid value"),
            ConfigError::UnknownKey => write!(f, "unknown key"),
        }
    }
}

/// Panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    /// Horizontal extent in pixels
    pub width: usize,
    /// Vertical extent in pixels (multiple of 8)
    pub height: usize,
    /// Bus instance the panel is attached to
    pub bus_number: u8,
    /// 7-bit device address
    pub device_address: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            bus_number: DEFAULT_BUS,
            device_address: DEFAULT_ADDRESS,
        }
    }
}

impl DisplayConfig {
    /// Create a config for the given panel size with default bus settings
    pub const fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bus_number: DEFAULT_BUS,
            device_address: DEFAULT_ADDRESS,
        }
    }

    /// Use a different device address
    pub const fn with_address(mut self, device_address: u8) -> Self {
        self.device_address = device_address;
        self
    }

    /// Use a different bus instance
    pub const fn with_bus(mut self, bus_number: u8) -> Self {
        self.bus_number = bus_number;
        self
    }

    /// Number of pages (8-pixel rows)
    pub const fn pages(&self) -> usize {
        self.height / PAGE_HEIGHT
    }

    /// Check that the config describes a panel the controller can drive
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_dimensions(self.width, self.height)?;
        if self.device_address > 0x7F {
            return Err(ConfigError::InvalidAddress);
        }
        Ok(())
    }
}

/// Check panel dimensions against the controller's addressing limits
pub fn validate_dimensions(width: usize, height: usize) -> Result<(), ConfigError> {
    if width == 0 || height == 0 {
        return Err(ConfigError::ZeroDimension);
    }
    if height % PAGE_HEIGHT != 0 {
        return Err(ConfigError::HeightNotPageAligned);
    }
    if width > MAX_WIDTH {
        return Err(ConfigError::WidthTooLarge);
    }
    if height > MAX_HEIGHT {
        return Err(ConfigError::HeightTooLarge);
    }
    Ok(())
}

/// Parse a display config from a TOML subset
///
/// Supports blank lines, `#` comments, an optional `[display]` header and
/// `key = integer` pairs (decimal or `0x` hex). Keys not present keep
/// their defaults. The result is validated before it is returned.
pub fn parse_config(input: &str) -> Result<DisplayConfig, ConfigError> {
    let mut config = DisplayConfig::default();

    for line in input.lines() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            if line[1..line.len() - 1].trim() != "display" {
                return Err(ConfigError::InvalidSection);
            }
            continue;
        }

        let (key, value) = line.split_once('=').ok_or(ConfigError::InvalidValue)?;
        let value = parse_int(value.trim())?;

        match key.trim() {
            "width" => config.width = to_usize(value)?,
            "height" => config.height = to_usize(value)?,
            "bus" | "bus_number" => config.bus_number = to_u8(value)?,
            "address" | "device_address" => config.device_address = to_u8(value)?,
            _ => return Err(ConfigError::UnknownKey),
        }
    }

    config.validate()?;
    Ok(config)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

fn parse_int(s: &str) -> Result<u32, ConfigError> {
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16)
    } else {
        s.parse::<u32>()
    };
    parsed.map_err(|_| ConfigError::InvalidValue)
}

fn to_usize(value: u32) -> Result<usize, ConfigError> {
    usize::try_from(value).map_err(|_| ConfigError::InvalidValue)
}

fn to_u8(value: u32) -> Result<u8, ConfigError> {
    u8::try_from(value).map_err(|_| ConfigError::InvalidValue)
}
