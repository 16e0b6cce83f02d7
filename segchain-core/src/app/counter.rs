//! Five-digit decimal counter
//!
//! Digit 4 (rightmost) is least significant. When the leading digit would
//! roll past 9 the counter saturates into a sticky overflow state and
//! renders `Error` instead of wrapping to zero.

use crate::glyph::{encode_row, Glyph, SegmentByte, DIGIT_COUNT};

/// Largest value that fits on the display
pub const COUNTER_MAX: u32 = 99_999;

/// Shown once the counter has overflowed
pub const ERROR_GLYPHS: [Glyph; DIGIT_COUNT] = [Glyph::E, Glyph::R, Glyph::R, Glyph::O, Glyph::R];

/// Counter construction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CounterError {
    /// Start value does not fit in five digits
    OutOfRange(u32),
}

/// Decimal counter with overflow indicator
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecimalCounter {
    /// Leftmost digit first
    digits: [u8; DIGIT_COUNT],
    overflowed: bool,
}

impl Default for DecimalCounter {
    /// Counter at zero
    fn default() -> Self {
        Self {
            digits: [0; DIGIT_COUNT],
            overflowed: false,
        }
    }
}

impl DecimalCounter {
    /// Create a counter starting at `start`
    pub fn new(start: u32) -> Result<Self, CounterError> {
        if start > COUNTER_MAX {
            return Err(CounterError::OutOfRange(start));
        }

        let mut digits = [0u8; DIGIT_COUNT];
        let mut rest = start;
        for digit in digits.iter_mut().rev() {
            *digit = (rest % 10) as u8;
            rest /= 10;
        }

        Ok(Self {
            digits,
            overflowed: false,
        })
    }

    /// Digits, leftmost first
    pub fn digits(&self) -> [u8; DIGIT_COUNT] {
        self.digits
    }

    /// Numeric value, or `None` once overflowed
    pub fn value(&self) -> Option<u32> {
        if self.overflowed {
            return None;
        }
        Some(self.digits.iter().fold(0u32, |acc, &d| acc * 10 + d as u32))
    }

    /// Check if the counter has run past [`COUNTER_MAX`]
    pub fn is_overflowed(&self) -> bool {
        self.overflowed
    }

    /// Advance by one with ripple carry
    ///
    /// Returns `true` only on the increment that overflows. Further
    /// increments after overflow do nothing.
    pub fn increment(&mut self) -> bool {
        if self.overflowed {
            return false;
        }

        for position in (0..DIGIT_COUNT).rev() {
            if self.digits[position] < 9 {
                self.digits[position] += 1;
                return false;
            }
            self.digits[position] = 0;
        }

        // Carry ran off the leading digit
        self.overflowed = true;
        true
    }

    /// Glyphs to display, leftmost first
    pub fn glyphs(&self) -> [Glyph; DIGIT_COUNT] {
        if self.overflowed {
            ERROR_GLYPHS
        } else {
            self.digits.map(Glyph::Digit)
        }
    }

    /// Encoded frame ready for the segment registers
    pub fn frame(&self) -> [SegmentByte; DIGIT_COUNT] {
        encode_row(&self.glyphs())
    }
}
