//! MAX7219 SPI transport
//!
//! The MAX7219 shifts in one 16-bit word per transfer and latches it on the
//! rising edge of LOAD/CS:
//!
//! - CS low
//! - Register address (8 bits, MSB first)
//! - Value (8 bits, MSB first)
//! - CS high (latch)
//!
//! SPI mode 0, up to 10 MHz. Only a single device is supported; daisy
//! chains need the no-op register and are not handled here.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::{SpiBus, SpiDevice};

use segmax_core::{Command, ConfigError, DigitTransport};

/// MAX7219 transport errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Max7219Error<S, P> {
    /// SPI transfer failed
    Spi(S),
    /// Chip-select pin failed
    Pin(P),
    /// Builder was missing a required part
    Config(ConfigError),
}

/// MAX7219 behind an `SpiDevice`
///
/// The device handles chip select, so each command is one transaction.
pub struct Max7219Device<SPI> {
    spi: SPI,
}

impl<SPI: SpiDevice> Max7219Device<SPI> {
    /// Create a new transport
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Give the SPI device back
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI: SpiDevice> DigitTransport for Max7219Device<SPI> {
    type Error = SPI::Error;

    fn transmit_command(&mut self, command: Command) -> Result<(), Self::Error> {
        self.spi.write(&command.to_bytes())
    }
}

/// MAX7219 on a bare SPI bus with its own chip-select pin
///
/// Built with [`Max7219Builder`].
pub struct Max7219Bus<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS> Max7219Bus<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    /// Give the bus and pin back
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }

    fn write_word(&mut self, bytes: &[u8; 2]) -> Result<(), Max7219Error<SPI::Error, CS::Error>> {
        self.cs.set_low().map_err(Max7219Error::Pin)?;
        let result = self.spi.write(bytes).and_then(|()| self.spi.flush());
        // Always release CS, even after a failed transfer
        self.cs.set_high().map_err(Max7219Error::Pin)?;
        result.map_err(Max7219Error::Spi)
    }
}

impl<SPI, CS> DigitTransport for Max7219Bus<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    type Error = Max7219Error<SPI::Error, CS::Error>;

    fn transmit_command(&mut self, command: Command) -> Result<(), Self::Error> {
        self.write_word(&command.to_bytes())
    }
}

/// Builder for [`Max7219Bus`]
///
/// A chip-select pin is required; building without one fails before the
/// bus or pin is touched.
pub struct Max7219Builder<SPI, CS> {
    spi: SPI,
    cs: Option<CS>,
}

impl<SPI, CS> Max7219Builder<SPI, CS> {
    /// Start from an SPI bus
    pub fn new(spi: SPI) -> Self {
        Self { spi, cs: None }
    }

    /// Set the chip-select (LOAD) pin
    pub fn chip_select(mut self, cs: CS) -> Self {
        self.cs = Some(cs);
        self
    }
}

impl<SPI, CS> Max7219Builder<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    /// Build the transport, leaving chip select deasserted
    pub fn build(self) -> Result<Max7219Bus<SPI, CS>, Max7219Error<SPI::Error, CS::Error>> {
        let Some(mut cs) = self.cs else {
            warn!("max7219: no chip select configured");
            return Err(Max7219Error::Config(ConfigError::MissingChipSelect));
        };
        cs.set_high().map_err(Max7219Error::Pin)?;
        debug!("max7219: transport ready");
        Ok(Max7219Bus { spi: self.spi, cs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use embedded_hal::digital::{self, ErrorKind as PinErrorKind};
    use embedded_hal::spi::{self, ErrorKind as SpiErrorKind, Operation};
    use heapless::Vec;
    use segmax_core::{DisplayBuilder, DisplayConfig, Register, ShutdownMode};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        CsLow,
        CsHigh,
        Byte(u8),
        Flush,
        Begin,
        End,
    }

    type Log = RefCell<Vec<Event, 256>>;

    fn record(log: &Log, event: Event) {
        log.borrow_mut().push(event).unwrap();
    }

    /// Mock SPI bus writing into a shared log
    struct MockBus<'a> {
        log: &'a Log,
        fail: bool,
    }

    impl spi::ErrorType for MockBus<'_> {
        type Error = SpiErrorKind;
    }

    impl SpiBus for MockBus<'_> {
        fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
            if self.fail {
                return Err(SpiErrorKind::Other);
            }
            for &byte in words {
                record(self.log, Event::Byte(byte));
            }
            Ok(())
        }

        fn transfer(&mut self, _read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
            self.write(write)
        }

        fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
            self.write(words)
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            record(self.log, Event::Flush);
            Ok(())
        }
    }

    /// Mock chip-select pin writing into a shared log
    struct MockPin<'a> {
        log: &'a Log,
    }

    impl digital::ErrorType for MockPin<'_> {
        type Error = PinErrorKind;
    }

    impl OutputPin for MockPin<'_> {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            record(self.log, Event::CsLow);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            record(self.log, Event::CsHigh);
            Ok(())
        }
    }

    /// Mock SPI device, one Begin/End pair per transaction
    struct MockDevice<'a> {
        log: &'a Log,
    }

    impl spi::ErrorType for MockDevice<'_> {
        type Error = SpiErrorKind;
    }

    impl SpiDevice for MockDevice<'_> {
        fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
            record(self.log, Event::Begin);
            for op in operations.iter() {
                if let Operation::Write(words) = op {
                    for &byte in words.iter() {
                        record(self.log, Event::Byte(byte));
                    }
                }
            }
            record(self.log, Event::End);
            Ok(())
        }
    }

    #[test]
    fn test_build_without_chip_select() {
        let log = Log::default();
        let result = Max7219Builder::<_, MockPin>::new(MockBus { log: &log, fail: false }).build();

        assert!(matches!(
            result,
            Err(Max7219Error::Config(ConfigError::MissingChipSelect))
        ));
        // Nothing touched
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_build_deasserts_chip_select() {
        let log = Log::default();
        let _bus = Max7219Builder::new(MockBus { log: &log, fail: false })
            .chip_select(MockPin { log: &log })
            .build()
            .unwrap();

        assert_eq!(log.borrow().as_slice(), &[Event::CsHigh]);
    }

    #[test]
    fn test_command_framing() {
        let log = Log::default();
        let mut bus = Max7219Builder::new(MockBus { log: &log, fail: false })
            .chip_select(MockPin { log: &log })
            .build()
            .unwrap();
        log.borrow_mut().clear();

        bus.transmit_command(Command::new(Register::Intensity, 0x0F))
            .unwrap();

        assert_eq!(
            log.borrow().as_slice(),
            &[
                Event::CsLow,
                Event::Byte(0x0A),
                Event::Byte(0x0F),
                Event::Flush,
                Event::CsHigh,
            ]
        );
    }

    #[test]
    fn test_failed_transfer_releases_chip_select() {
        let log = Log::default();
        let mut bus = Max7219Builder::new(MockBus { log: &log, fail: true })
            .chip_select(MockPin { log: &log })
            .build()
            .unwrap();
        log.borrow_mut().clear();

        let result = bus.transmit_command(Command::shutdown(ShutdownMode::Normal));

        assert_eq!(result, Err(Max7219Error::Spi(SpiErrorKind::Other)));
        assert_eq!(log.borrow().as_slice(), &[Event::CsLow, Event::CsHigh]);
    }

    #[test]
    fn test_device_one_transaction_per_command() {
        let log = Log::default();
        let mut device = Max7219Device::new(MockDevice { log: &log });

        device
            .transmit_command(Command::shutdown(ShutdownMode::Shutdown))
            .unwrap();

        assert_eq!(
            log.borrow().as_slice(),
            &[Event::Begin, Event::Byte(0x0C), Event::Byte(0x00), Event::End]
        );
    }

    #[test]
    fn test_display_over_bus() {
        let log = Log::default();
        let bus = Max7219Builder::new(MockBus { log: &log, fail: false })
            .chip_select(MockPin { log: &log })
            .build()
            .unwrap();
        let mut display = DisplayBuilder::new()
            .transport(bus)
            .config(DisplayConfig::default())
            .build()
            .unwrap();
        log.borrow_mut().clear();

        display.write(None, Some("4.2")).unwrap();

        // Eight framed words, slot 1 first; unset slots go out blank
        let bytes: Vec<u8, 16> = log
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Byte(b) => Some(*b),
                _ => None,
            })
            .collect();
        assert_eq!(
            bytes.as_slice(),
            &[
                0x01, 0x0F, 0x02, 0x0F, 0x03, 0x0F, 0x04, 0x0F, 0x05, 0x0F, 0x06, 0x0F, 0x07,
                0x84, 0x08, 0x02,
            ]
        );
        let frames = log.borrow().iter().filter(|e| **e == Event::CsHigh).count();
        assert_eq!(frames, 8);
    }

    #[test]
    fn test_display_over_device_init() {
        let log = Log::default();
        let display = DisplayBuilder::new()
            .transport(Max7219Device::new(MockDevice { log: &log }))
            .build()
            .unwrap();

        let transactions = log.borrow().iter().filter(|e| **e == Event::Begin).count();
        assert_eq!(transactions, 14);
        assert!(display.retained().is_empty());
    }
}
