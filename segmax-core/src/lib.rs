//! Board-agnostic core logic for MAX7219 seven-segment displays
//!
//! This crate contains everything that does not depend on a specific bus
//! or chip-select implementation:
//!
//! - Text encoding into BCD digit codes (with decimal points)
//! - The 8-slot display buffer and the left/right half renderers
//! - The MAX7219 register map and command words
//! - The transport trait implemented by bus drivers
//! - The display manager that keeps the retained state in sync with the device
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application                            │
//! └─────────────────────────────────────────┘
//!                     │ write / clear / intensity
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  Display (retained state + renderers)   │
//! └─────────────────────────────────────────┘
//!                     │ DigitTransport
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  segmax-drivers (SPI + chip select)     │
//! └─────────────────────────────────────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

// Must come first so the logging macros are visible in every module
mod fmt;

pub mod buffer;
pub mod command;
pub mod config;
pub mod digit;
pub mod display;
pub mod encoder;
pub mod traits;

pub use buffer::{DisplayBuffer, Half, Render, Zone, SLOT_COUNT};
pub use command::{Command, Intensity, Register, ShutdownMode};
pub use config::{ConfigError, DisplayConfig};
pub use digit::{DigitCode, Slot};
pub use display::{Display, DisplayBuilder, DisplayError};
pub use encoder::{encode, encode_value, Segment, SEGMENT_LEN};
pub use traits::DigitTransport;
