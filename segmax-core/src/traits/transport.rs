//! Transport trait for the MAX7219 register interface

use crate::buffer::{DisplayBuffer, SLOT_COUNT};
use crate::command::{Command, Register};

/// Register-level access to one MAX7219
///
/// Implementations frame each [`Command`] as a single 16-bit transfer.
/// Errors are returned unchanged to the caller of the display operation;
/// no retries happen at this level.
pub trait DigitTransport {
    /// Error type for bus operations
    type Error;

    /// Write one register
    fn transmit_command(&mut self, command: Command) -> Result<(), Self::Error>;

    /// Drive all eight digit registers from `buffer`, slot 1 first
    ///
    /// Unset slots are written as blank. Stops at the first failed write.
    fn transmit_buffer(&mut self, buffer: &DisplayBuffer) -> Result<(), Self::Error> {
        for (n, value) in (1..=SLOT_COUNT).zip(buffer.wire_payload()) {
            if let Some(register) = Register::digit(n) {
                self.transmit_command(Command::new(register, value))?;
            }
        }
        Ok(())
    }
}

impl<T: DigitTransport + ?Sized> DigitTransport for &mut T {
    type Error = T::Error;

    fn transmit_command(&mut self, command: Command) -> Result<(), Self::Error> {
        T::transmit_command(self, command)
    }

    fn transmit_buffer(&mut self, buffer: &DisplayBuffer) -> Result<(), Self::Error> {
        T::transmit_buffer(self, buffer)
    }
}
