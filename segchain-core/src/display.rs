//! Foreground-side view of the shared registers
//!
//! Everything the application needs to draw on the digits and LEDs, and to
//! read the button bank. Writes land in [`SharedRegisters`] and are shifted
//! out by the transfer machine on its next pass over that position.

use crate::glyph::{encode, Glyph, SegmentByte, DIGIT_COUNT};
use crate::registers::{RegisterError, SharedRegisters};

/// Digit and LED writer bound to a register file
#[derive(Debug, Clone, Copy)]
pub struct SegmentDisplay<'a> {
    regs: &'a SharedRegisters,
}

impl<'a> SegmentDisplay<'a> {
    /// Create a writer over a register file
    pub const fn new(regs: &'a SharedRegisters) -> Self {
        Self { regs }
    }

    /// Draw one glyph
    ///
    /// Position 0 is the leftmost digit. Positions past the last digit are
    /// rejected without touching any register.
    pub fn write_glyph(
        &self,
        position: usize,
        glyph: Glyph,
        decimal_point: bool,
    ) -> Result<(), RegisterError> {
        self.regs.set_segment(position, encode(glyph, decimal_point))
    }

    /// Draw a row of glyphs, leftmost first, no decimal points
    pub fn show(&self, glyphs: &[Glyph; DIGIT_COUNT]) {
        self.regs.set_frame(glyphs.map(|g| encode(g, false)));
    }

    /// Write raw segment patterns, leftmost first
    pub fn show_frame(&self, frame: [SegmentByte; DIGIT_COUNT]) {
        self.regs.set_frame(frame);
    }

    /// Blank every digit
    pub fn clear(&self) {
        self.show(&[Glyph::Clear; DIGIT_COUNT]);
    }

    /// Replace the LED bit-field
    pub fn set_leds(&self, leds: u8) {
        self.regs.set_leds(leds);
    }

    /// Current LED bit-field
    pub fn leds(&self) -> u8 {
        self.regs.leds()
    }

    /// Button bit-field from the latest sweep
    pub fn buttons(&self) -> u8 {
        self.regs.buttons()
    }
}
