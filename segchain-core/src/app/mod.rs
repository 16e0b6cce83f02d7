//! Application logic for the counter display
//!
//! Pure state, no timing source: the firmware feeds it millisecond ticks
//! and writes the resulting frames through
//! [`SegmentDisplay`](crate::display::SegmentDisplay).

pub mod counter;
pub mod intro;
pub mod pacer;

pub use counter::{CounterError, DecimalCounter, COUNTER_MAX, ERROR_GLYPHS};
pub use intro::{Intro, IntroStep, HELLO};
pub use pacer::{Pacer, MAX_INTERVAL_MS};
