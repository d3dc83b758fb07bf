//! Display configuration
//!
//! Values applied by [`Display::initialize`](crate::Display::initialize).
//! With the `serde` feature the config can be embedded in a larger machine
//! config, for example as a `[display]` table in TOML:
//!
//! ```toml
//! [display]
//! intensity = 4
//! scan_limit = 7
//! ```

use crate::command::{Intensity, SCAN_ALL};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration errors
///
/// These abort setup before anything is sent to the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// No transport was supplied to the builder
    MissingTransport,
    /// No chip-select pin was supplied to the bus builder
    MissingChipSelect,
    /// Scan limit above 7
    ScanLimitOutOfRange,
}

/// Display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    /// Brightness set at init (0-15, clamped)
    pub intensity: u8,
    /// Highest scanned digit (0-7), 7 drives all eight
    pub scan_limit: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            intensity: Intensity::DEFAULT.value(),
            scan_limit: SCAN_ALL,
        }
    }
}

impl DisplayConfig {
    /// Check the config before it touches hardware
    ///
    /// Intensity is clamped rather than rejected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan_limit > SCAN_ALL {
            return Err(ConfigError::ScanLimitOutOfRange);
        }
        Ok(())
    }

    /// Initial brightness, clamped
    pub fn intensity(&self) -> Intensity {
        Intensity::clamped(self.intensity)
    }
}
