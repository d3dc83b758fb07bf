//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the
//! [`DigitTransport`](segmax_core::DigitTransport) trait defined in
//! segmax-core, on top of `embedded-hal` 1.0:
//!
//! - [`Max7219Device`] for an `SpiDevice` that already owns chip select
//! - [`Max7219Bus`] for a bare `SpiBus` plus a chip-select `OutputPin`
//!
//! ```rust, ignore
//! use segmax_core::{DisplayBuilder, DisplayConfig};
//! use segmax_drivers::Max7219Builder;
//!
//! let max7219 = Max7219Builder::new(spi).chip_select(cs).build()?;
//! let mut display = DisplayBuilder::new()
//!     .transport(max7219)
//!     .config(DisplayConfig::default())
//!     .build()?;
//! display.write(Some("12.5"), None)?;
//! ```

#![no_std]
#![deny(unsafe_code)]

// Must come first so the logging macros are visible in every module
mod fmt;

pub mod max7219;

pub use max7219::{Max7219Builder, Max7219Bus, Max7219Device, Max7219Error};
