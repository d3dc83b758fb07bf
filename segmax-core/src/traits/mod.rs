//! Hardware abstraction traits
//!
//! These traits define the interface between the display logic and the
//! bus-specific implementations in `segmax-drivers`.

pub mod transport;

pub use transport::DigitTransport;
