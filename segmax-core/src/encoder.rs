//! Text to digit code encoder
//!
//! Turns up to four characters of text into the digit codes for one half of
//! the display. A `.` folds into the preceding character as its decimal
//! point, so `"12.5"` still fits in three digits.
//!
//! Encoding never fails: characters outside the font render as blank and
//! anything past the fourth code is dropped.

use core::fmt::{self, Write};
use core::iter::Peekable;
use core::str::Chars;

use heapless::{String, Vec};

use crate::digit::DigitCode;

/// Number of digits in one half of the display
pub const SEGMENT_LEN: usize = 4;

/// Scratch capacity when formatting values for [`encode_value`]
const FORMAT_CAPACITY: usize = 32;

/// Encoded digit codes for one half of the display
///
/// Holds between zero and four codes in display order. Shorter segments
/// are right-aligned when rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Segment {
    codes: Vec<DigitCode, SEGMENT_LEN>,
}

impl Segment {
    /// Create an empty segment
    pub const fn new() -> Self {
        Self { codes: Vec::new() }
    }

    /// Number of codes produced
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Check if nothing was produced
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Codes in display order
    pub fn codes(&self) -> &[DigitCode] {
        &self.codes
    }

    /// Check if all four digits are used
    pub fn is_full(&self) -> bool {
        self.codes.is_full()
    }

    fn push(&mut self, code: DigitCode) {
        // Callers stop at SEGMENT_LEN, so this cannot overflow
        let _ = self.codes.push(code);
    }
}

impl From<&str> for Segment {
    fn from(text: &str) -> Self {
        encode(text)
    }
}

/// Encode text into digit codes
///
/// Scans left to right and stops after four codes. A character followed by
/// `.` gets the decimal point and the dot is consumed. A dot that is not
/// consumed that way becomes its own blank digit with the decimal point lit.
pub fn encode(text: &str) -> Segment {
    let mut segment = Segment::new();
    let mut chars = text.chars().peekable();

    while !segment.is_full() {
        let Some(c) = chars.next() else {
            break;
        };
        segment.push(encode_char(c, &mut chars));
    }

    trace!("encoded {} bytes into {} codes", text.len(), segment.len());
    segment
}

/// Encode one character, consuming a trailing `.` when present
fn encode_char(c: char, rest: &mut Peekable<Chars<'_>>) -> DigitCode {
    if c == '.' {
        // Standalone dot, the next character is never coalesced into it
        return DigitCode::BLANK.with_decimal_point();
    }

    let code = DigitCode::from_char(c);
    if rest.next_if_eq(&'.').is_some() {
        code.with_decimal_point()
    } else {
        code
    }
}

/// Format a value and encode the result
///
/// Numbers go through their `Display` implementation, so formatting such
/// as `{:.1}` should be applied by the caller (`format_args!` works).
/// Output that does not fit the scratch buffer is cut off; only the first
/// four codes matter anyway.
pub fn encode_value<T: fmt::Display + ?Sized>(value: &T) -> Segment {
    let mut text: String<FORMAT_CAPACITY> = String::new();
    if write!(Truncating(&mut text), "{}", value).is_err() {
        warn!("value truncated to {} bytes before encoding", text.len());
    }
    encode(&text)
}

/// Writer that keeps what fits and reports the overflow
struct Truncating<'a>(&'a mut String<FORMAT_CAPACITY>);

impl Write for Truncating<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            self.0.push(c).map_err(|_| fmt::Error)?;
        }
        Ok(())
    }
}
