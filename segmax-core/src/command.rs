//! MAX7219 register map and command words
//!
//! Every transfer to the device is one 16-bit word, register address in the
//! high byte and value in the low byte, shifted out MSB first while chip
//! select is held low.
//!
//! ```text
//! ┌──────────┬──────────┬──────────────┬──────────────┐
//! │ D15..D12 │ D11..D8  │ D7 (DP)      │ D6..D0       │
//! │ ignored  │ register │ decimal pt.  │ code / value │
//! └──────────┴──────────┴──────────────┴──────────────┘
//! ```

use crate::buffer::SLOT_COUNT;

/// Register addresses
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    Digit0 = 0x01,
    Digit1 = 0x02,
    Digit2 = 0x03,
    Digit3 = 0x04,
    Digit4 = 0x05,
    Digit5 = 0x06,
    Digit6 = 0x07,
    Digit7 = 0x08,
    DecodeMode = 0x09,
    Intensity = 0x0A,
    ScanLimit = 0x0B,
    Shutdown = 0x0C,
    DisplayTest = 0x0F,
}

impl Register {
    /// Digit register driving buffer slot `slot` (1-8)
    pub const fn digit(slot: usize) -> Option<Self> {
        match slot {
            1 => Some(Self::Digit0),
            2 => Some(Self::Digit1),
            3 => Some(Self::Digit2),
            4 => Some(Self::Digit3),
            5 => Some(Self::Digit4),
            6 => Some(Self::Digit5),
            7 => Some(Self::Digit6),
            8 => Some(Self::Digit7),
            _ => None,
        }
    }

    /// Register address
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

/// Decode mode value: Code B decode on all eight digits
pub const DECODE_ALL: u8 = 0xFF;

/// Scan limit value: multiplex all eight digits
pub const SCAN_ALL: u8 = (SLOT_COUNT - 1) as u8;

/// Display test value: normal operation
pub const DISPLAY_TEST_OFF: u8 = 0x00;

/// Display test value: all segments lit
pub const DISPLAY_TEST_ON: u8 = 0x01;

/// One register write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    /// Target register
    pub register: Register,
    /// Value written to it
    pub value: u8,
}

impl Command {
    /// Create a command
    pub const fn new(register: Register, value: u8) -> Self {
        Self { register, value }
    }

    /// Set the brightness
    pub const fn intensity(level: Intensity) -> Self {
        Self::new(Register::Intensity, level.value())
    }

    /// Enter or leave shutdown
    pub const fn shutdown(mode: ShutdownMode) -> Self {
        Self::new(Register::Shutdown, mode as u8)
    }

    /// Number of multiplexed digits, minus one
    pub const fn scan_limit(limit: u8) -> Self {
        Self::new(Register::ScanLimit, limit)
    }

    /// Set the per-digit decode mask
    pub const fn decode_mode(mask: u8) -> Self {
        Self::new(Register::DecodeMode, mask)
    }

    /// Turn display test on or off
    pub const fn display_test(on: bool) -> Self {
        Self::new(
            Register::DisplayTest,
            if on { DISPLAY_TEST_ON } else { DISPLAY_TEST_OFF },
        )
    }

    /// 16-bit command word, register in the high byte
    pub const fn word(self) -> u16 {
        ((self.register as u16) << 8) | self.value as u16
    }

    /// Word as transmitted, MSB first
    pub const fn to_bytes(self) -> [u8; 2] {
        [self.register as u8, self.value]
    }
}

/// Brightness level, 0x00 (dimmest) to 0x0F (brightest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Intensity(u8);

impl Intensity {
    /// Brightest level
    pub const MAX: Self = Self(0x0F);
    /// Level used when none is given
    pub const DEFAULT: Self = Self(0x07);

    /// Clamp a raw level into range
    pub const fn clamped(level: u8) -> Self {
        if level > Self::MAX.0 {
            Self::MAX
        } else {
            Self(level)
        }
    }

    /// Clamp a level, falling back to the default when absent
    pub const fn from_option(level: Option<u8>) -> Self {
        match level {
            Some(level) => Self::clamped(level),
            None => Self::DEFAULT,
        }
    }

    /// Register value
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u8> for Intensity {
    fn from(level: u8) -> Self {
        Self::clamped(level)
    }
}

/// Shutdown register values
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShutdownMode {
    /// Display blanked, registers retained
    Shutdown = 0x00,
    /// Normal operation
    #[default]
    Normal = 0x01,
}
