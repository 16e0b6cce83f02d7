//! Shared display and input registers
//!
//! The only channel between the foreground (application) context and the
//! transfer-complete interrupt. Every register is a single byte with its own
//! atomic, so neither side ever observes a half-written value and neither
//! side ever blocks.
//!
//! There is no cross-register atomicity. A foreground update of several
//! digits can be interrupted between digits, so one sweep may shift out a
//! mix of the old and new frame. The next sweep corrects it.
//!
//! Write access is split by role:
//! - foreground writes LEDs and segments, reads buttons
//! - the transfer machine reads LEDs and segments, writes buttons

use portable_atomic::{AtomicU8, Ordering};

use crate::glyph::{SegmentByte, BLANK, DIGIT_COUNT};

/// Register access errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterError {
    /// Digit position outside `0..DIGIT_COUNT`
    InvalidDigitPosition(usize),
}

/// The shared register file
///
/// Intended to live in a `static` for the lifetime of the program:
///
/// ```
/// use segchain_core::registers::SharedRegisters;
///
/// static REGISTERS: SharedRegisters = SharedRegisters::new();
///
/// REGISTERS.set_leds(0b1010_0000);
/// assert_eq!(REGISTERS.leds(), 0b1010_0000);
/// ```
#[derive(Debug)]
pub struct SharedRegisters {
    leds: AtomicU8,
    buttons: AtomicU8,
    segments: [AtomicU8; DIGIT_COUNT],
}

impl Default for SharedRegisters {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedRegisters {
    /// All registers zeroed, all digits blank
    pub const fn new() -> Self {
        Self {
            leds: AtomicU8::new(0),
            buttons: AtomicU8::new(0),
            segments: [
                AtomicU8::new(BLANK),
                AtomicU8::new(BLANK),
                AtomicU8::new(BLANK),
                AtomicU8::new(BLANK),
                AtomicU8::new(BLANK),
            ],
        }
    }

    /// Current LED bit-field
    pub fn leds(&self) -> u8 {
        self.leds.load(Ordering::Acquire)
    }

    /// Replace the LED bit-field
    pub fn set_leds(&self, leds: u8) {
        self.leds.store(leds, Ordering::Release);
    }

    /// Button bit-field latched during the most recent sweep
    pub fn buttons(&self) -> u8 {
        self.buttons.load(Ordering::Acquire)
    }

    /// Latch the button byte received on the wire
    ///
    /// Only the transfer machine calls this.
    pub fn latch_buttons(&self, buttons: u8) {
        self.buttons.store(buttons, Ordering::Release);
    }

    /// Segment pattern at a digit position
    pub fn segment(&self, position: usize) -> Result<SegmentByte, RegisterError> {
        self.segments
            .get(position)
            .map(|cell| cell.load(Ordering::Acquire))
            .ok_or(RegisterError::InvalidDigitPosition(position))
    }

    /// Replace the segment pattern at a digit position
    ///
    /// Positions outside `0..DIGIT_COUNT` are rejected and nothing is
    /// written.
    pub fn set_segment(&self, position: usize, pattern: SegmentByte) -> Result<(), RegisterError> {
        let cell = self
            .segments
            .get(position)
            .ok_or(RegisterError::InvalidDigitPosition(position))?;
        cell.store(pattern, Ordering::Release);
        Ok(())
    }

    /// Snapshot of all five segment patterns
    ///
    /// Each element is read atomically; the array as a whole is not.
    pub fn frame(&self) -> [SegmentByte; DIGIT_COUNT] {
        core::array::from_fn(|i| self.segments[i].load(Ordering::Acquire))
    }

    /// Write all five segment patterns, leftmost first
    pub fn set_frame(&self, frame: [SegmentByte; DIGIT_COUNT]) {
        for (cell, pattern) in self.segments.iter().zip(frame) {
            cell.store(pattern, Ordering::Release);
        }
    }
}
