//! Power-on greeting
//!
//! Spells `HELL0` one digit at a time, holds it, then hands the display to
//! the counter. The last glyph is the digit zero, not the letter `o`.

use crate::glyph::{Glyph, DIGIT_COUNT};

/// Greeting, leftmost first
pub const HELLO: [Glyph; DIGIT_COUNT] = [Glyph::H, Glyph::E, Glyph::L, Glyph::L, Glyph::Digit(0)];

/// One frame of the intro animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IntroStep {
    /// Digit to write
    pub position: usize,
    /// Glyph to write there
    pub glyph: Glyph,
    /// How long to wait before the next step
    pub hold_ms: u32,
}

/// Iterator over the intro steps
///
/// The caller clears the display after the last step.
#[derive(Debug, Clone)]
pub struct Intro {
    step_ms: u32,
    hold_ms: u32,
    next: usize,
}

impl Intro {
    /// `step_ms` between letters, `hold_ms` after the full word
    pub fn new(step_ms: u32, hold_ms: u32) -> Self {
        Self {
            step_ms,
            hold_ms,
            next: 0,
        }
    }
}

impl Iterator for Intro {
    type Item = IntroStep;

    fn next(&mut self) -> Option<IntroStep> {
        let position = self.next;
        let glyph = *HELLO.get(position)?;
        self.next += 1;

        let hold_ms = if position == DIGIT_COUNT - 1 {
            self.hold_ms
        } else {
            self.step_ms
        };

        Some(IntroStep {
            position,
            glyph,
            hold_ms,
        })
    }
}
