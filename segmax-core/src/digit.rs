//! BCD digit codes
//!
//! With decode mode enabled, the MAX7219 maps the low nibble of each digit
//! register to a fixed glyph (Code B font) and uses bit 7 for the decimal
//! point. This module models that register value.

/// Decimal point bit, independent of the base symbol
const DECIMAL_POINT: u8 = 0x80;

/// Mask for the base symbol nibble
const SYMBOL_MASK: u8 = 0x0F;

/// One digit register value in Code B decode mode
///
/// The low nibble selects the glyph (`0`-`9`, `-`, `E`, `H`, `L`, `P`,
/// blank) and bit 7 lights the decimal point. Exactly one glyph is held per
/// code; the decimal point is an attribute of that glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DigitCode(u8);

/// One slot of the display buffer
///
/// `None` means the slot was not written: it is transmitted as blank but is
/// never stored as a blank in the retained state.
pub type Slot = Option<DigitCode>;

impl DigitCode {
    /// Dash `-`
    pub const DASH: Self = Self(0x0A);
    /// Letter `E`
    pub const E: Self = Self(0x0B);
    /// Letter `H`
    pub const H: Self = Self(0x0C);
    /// Letter `L`
    pub const L: Self = Self(0x0D);
    /// Letter `P`
    pub const P: Self = Self(0x0E);
    /// Unlit digit
    pub const BLANK: Self = Self(0x0F);

    /// Code for a numeric digit, `None` if `n > 9`
    pub const fn digit(n: u8) -> Option<Self> {
        if n <= 9 {
            Some(Self(n))
        } else {
            None
        }
    }

    /// Map a character to its glyph
    ///
    /// ASCII digits map to their value, the symbol table covers `-`, `E`,
    /// `H`, `L`, `P` and space. Anything else, lowercase letters included,
    /// renders as blank. `.` is not special here; the encoder handles it.
    pub const fn from_char(c: char) -> Self {
        match c {
            '0'..='9' => Self(c as u8 - b'0'),
            '-' => Self::DASH,
            'E' => Self::E,
            'H' => Self::H,
            'L' => Self::L,
            'P' => Self::P,
            _ => Self::BLANK,
        }
    }

    /// Same glyph with the decimal point lit
    pub const fn with_decimal_point(self) -> Self {
        Self(self.0 | DECIMAL_POINT)
    }

    /// Check if the decimal point is lit
    pub const fn has_decimal_point(self) -> bool {
        self.0 & DECIMAL_POINT != 0
    }

    /// Base glyph without the decimal point
    pub const fn symbol(self) -> Self {
        Self(self.0 & SYMBOL_MASK)
    }

    /// Raw register value
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl Default for DigitCode {
    fn default() -> Self {
        Self::BLANK
    }
}

impl From<DigitCode> for u8 {
    fn from(code: DigitCode) -> Self {
        code.raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_map_to_value() {
        for (i, c) in ('0'..='9').enumerate() {
            assert_eq!(DigitCode::from_char(c).raw(), i as u8);
        }
    }

    #[test]
    fn test_symbol_table() {
        assert_eq!(DigitCode::from_char('-').raw(), 0x0A);
        assert_eq!(DigitCode::from_char('E').raw(), 0x0B);
        assert_eq!(DigitCode::from_char('H').raw(), 0x0C);
        assert_eq!(DigitCode::from_char('L').raw(), 0x0D);
        assert_eq!(DigitCode::from_char('P').raw(), 0x0E);
        assert_eq!(DigitCode::from_char(' ').raw(), 0x0F);
    }

    #[test]
    fn test_unknown_is_blank() {
        // Lowercase is not in the Code B font
        assert_eq!(DigitCode::from_char('e'), DigitCode::BLANK);
        assert_eq!(DigitCode::from_char('A'), DigitCode::BLANK);
        assert_eq!(DigitCode::from_char('!'), DigitCode::BLANK);
        assert_eq!(DigitCode::from_char('é'), DigitCode::BLANK);
    }

    #[test]
    fn test_decimal_point_is_orthogonal() {
        let code = DigitCode::digit(7).unwrap().with_decimal_point();
        assert_eq!(code.raw(), 0x87);
        assert!(code.has_decimal_point());
        assert_eq!(code.symbol(), DigitCode::digit(7).unwrap());
        assert!(!code.symbol().has_decimal_point());

        // Setting it twice changes nothing
        assert_eq!(code.with_decimal_point(), code);
    }

    #[test]
    fn test_digit_range() {
        assert_eq!(DigitCode::digit(0).map(DigitCode::raw), Some(0));
        assert_eq!(DigitCode::digit(9).map(DigitCode::raw), Some(9));
        assert_eq!(DigitCode::digit(10), None);
    }
}
