//! Display manager
//!
//! Owns the transport and the retained state for one physical display.
//! Every write or clear renders a full eight-slot buffer from the retained
//! state, transmits it, and only then commits the new retained state. A
//! failed transmission leaves the retained state as it was.

use crate::buffer::{render_clear, render_write, DisplayBuffer, Half, Render, Zone};
use crate::command::{Command, Intensity, ShutdownMode, DECODE_ALL};
use crate::config::{ConfigError, DisplayConfig};
use crate::encoder::{encode, Segment};
use crate::traits::DigitTransport;

/// Errors from display operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError<E> {
    /// The transport failed, error passed through unchanged
    Transport(E),
    /// Invalid or incomplete configuration
    Config(ConfigError),
}

impl<E> From<ConfigError> for DisplayError<E> {
    fn from(err: ConfigError) -> Self {
        DisplayError::Config(err)
    }
}

/// An 8-digit MAX7219 display
///
/// Created by [`DisplayBuilder`], which runs the init sequence. Not
/// synchronized: share it across tasks behind one mutex so a render and its
/// transmission stay a single unit.
pub struct Display<T> {
    transport: T,
    config: DisplayConfig,
    /// Mirror of the last buffer the device accepted
    retained: DisplayBuffer,
}

impl<T: DigitTransport> Display<T> {
    /// Wrap a transport without touching the device
    ///
    /// The device is not configured until [`initialize`](Self::initialize)
    /// runs. Prefer [`DisplayBuilder`].
    pub fn new(transport: T, config: DisplayConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            transport,
            config,
            retained: DisplayBuffer::empty(),
        })
    }

    /// Run the power-up sequence
    ///
    /// Shutdown, scan limit, display test off, full decode, clear all,
    /// intensity, normal operation. Leaves the retained state empty and the
    /// device showing dashes. Safe to call again; it re-runs everything.
    ///
    /// The retained state is only emptied by the clear step, so a failure
    /// before or during it leaves the retained state untouched.
    pub fn initialize(&mut self) -> Result<(), DisplayError<T::Error>> {
        debug!("initializing display");

        self.command(Command::shutdown(ShutdownMode::Shutdown))?;
        self.command(Command::scan_limit(self.config.scan_limit))?;
        self.command(Command::display_test(false))?;
        self.command(Command::decode_mode(DECODE_ALL))?;
        self.clear(Zone::All)?;
        self.command(Command::intensity(self.config.intensity()))?;
        self.command(Command::shutdown(ShutdownMode::Normal))?;

        debug!("display ready");
        Ok(())
    }

    /// Write text to either or both halves
    ///
    /// Each given text is encoded (at most four digits) and right-aligned in
    /// its half. A `None` half is re-sent from the retained state. Returns
    /// the buffer that was transmitted.
    pub fn write(
        &mut self,
        left: Option<&str>,
        right: Option<&str>,
    ) -> Result<DisplayBuffer, DisplayError<T::Error>> {
        let left = left.map(encode);
        let right = right.map(encode);
        self.write_segments(left.as_ref(), right.as_ref())
    }

    /// Write text to one half
    pub fn write_half(
        &mut self,
        half: Half,
        text: &str,
    ) -> Result<DisplayBuffer, DisplayError<T::Error>> {
        let segment = encode(text);
        match half {
            Half::Left => self.write_segments(Some(&segment), None),
            Half::Right => self.write_segments(None, Some(&segment)),
        }
    }

    /// Write already encoded segments
    ///
    /// Use with [`encode_value`](crate::encode_value) for numbers.
    pub fn write_segments(
        &mut self,
        left: Option<&Segment>,
        right: Option<&Segment>,
    ) -> Result<DisplayBuffer, DisplayError<T::Error>> {
        let render = render_write(&self.retained, left, right);
        self.commit(render)
    }

    /// Show dashes in `zone` and forget its retained digits
    pub fn clear(&mut self, zone: Zone) -> Result<DisplayBuffer, DisplayError<T::Error>> {
        trace!("clear {}", zone);
        let render = render_clear(&self.retained, zone);
        self.commit(render)
    }

    /// Set brightness, clamped to 0-15, 7 when `None`
    ///
    /// Returns the command that was sent.
    pub fn set_intensity(&mut self, level: Option<u8>) -> Result<Command, DisplayError<T::Error>> {
        let command = Command::intensity(Intensity::from_option(level));
        self.command(command)?;
        Ok(command)
    }

    /// Enter or leave shutdown
    ///
    /// Digit registers keep their contents while shut down.
    pub fn set_shutdown(&mut self, mode: ShutdownMode) -> Result<Command, DisplayError<T::Error>> {
        let command = Command::shutdown(mode);
        self.command(command)?;
        Ok(command)
    }

    /// Light every segment for a lamp test, or return to normal
    pub fn set_display_test(&mut self, on: bool) -> Result<Command, DisplayError<T::Error>> {
        let command = Command::display_test(on);
        self.command(command)?;
        Ok(command)
    }

    /// Last buffer the device accepted
    pub fn retained(&self) -> &DisplayBuffer {
        &self.retained
    }

    /// Active configuration
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Borrow the transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutably borrow the transport
    ///
    /// Writing digit registers directly bypasses the retained state.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give the transport back
    pub fn release(self) -> T {
        self.transport
    }

    fn command(&mut self, command: Command) -> Result<(), DisplayError<T::Error>> {
        trace!("command {=u16:#x}", command.word());
        self.transport
            .transmit_command(command)
            .map_err(DisplayError::Transport)
    }

    fn commit(&mut self, render: Render) -> Result<DisplayBuffer, DisplayError<T::Error>> {
        match self.transport.transmit_buffer(&render.transmit) {
            Ok(()) => {
                self.retained = render.retain;
                Ok(render.transmit)
            }
            Err(err) => {
                warn!("transmit failed, retained state unchanged");
                Err(DisplayError::Transport(err))
            }
        }
    }
}

/// Builder for a ready-to-use [`Display`]
///
/// ```rust, ignore
/// let mut display = DisplayBuilder::new()
///     .transport(max7219)
///     .config(DisplayConfig { intensity: 3, ..Default::default() })
///     .build()?;
/// display.write(Some("12.5"), Some("-HI-"))?;
/// ```
pub struct DisplayBuilder<T> {
    transport: Option<T>,
    config: DisplayConfig,
}

impl<T> Default for DisplayBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DisplayBuilder<T> {
    /// Start with the default config and no transport
    pub fn new() -> Self {
        Self {
            transport: None,
            config: DisplayConfig::default(),
        }
    }

    /// Set the transport
    pub fn transport(mut self, transport: T) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Set the config
    pub fn config(mut self, config: DisplayConfig) -> Self {
        self.config = config;
        self
    }
}

impl<T: DigitTransport> DisplayBuilder<T> {
    /// Validate, initialize the device and return the live display
    ///
    /// Configuration errors are reported before any transfer.
    pub fn build(self) -> Result<Display<T>, DisplayError<T::Error>> {
        let transport = self.transport.ok_or(ConfigError::MissingTransport)?;
        let mut display = Display::new(transport, self.config)?;
        display.initialize()?;
        Ok(display)
    }
}
