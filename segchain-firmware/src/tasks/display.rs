//! Display task
//!
//! Plays the greeting, then runs the decimal counter on the digits.

use defmt::*;
use embassy_time::Timer;

use segchain_core::app::{DecimalCounter, Intro, Pacer};
use segchain_core::config::DisplayConfig;
use segchain_core::display::SegmentDisplay;

use super::tick::{now_ms, TICK_SIGNAL};
use crate::channels::REGISTERS;

#[embassy_executor::task]
pub async fn display_task(config: DisplayConfig) {
    info!("Display task started");

    let display = SegmentDisplay::new(&REGISTERS);

    if config.intro {
        for step in Intro::new(config.intro_step_ms, config.intro_hold_ms) {
            if let Err(e) = display.write_glyph(step.position, step.glyph, false) {
                warn!("Greeting skipped a digit: {}", e);
            }
            Timer::after_millis(step.hold_ms as u64).await;
        }
        display.clear();
    }

    let mut counter = match DecimalCounter::new(config.start) {
        Ok(counter) => counter,
        Err(e) => {
            warn!("Bad counter start ({}), starting from zero", e);
            DecimalCounter::default()
        }
    };
    info!(
        "Counting from {} every {} ms",
        counter.value().unwrap_or(0),
        config.interval_ms
    );

    let mut pacer = Pacer::new(config.interval_ms, now_ms());

    // First frame shown is one past the start value
    loop {
        if counter.increment() {
            warn!("Counter overflowed, showing Error");
        }
        display.show_frame(counter.frame());

        if counter.is_overflowed() {
            // Nothing left to count
            info!("Display task idle");
            return;
        }

        while !pacer.poll(TICK_SIGNAL.wait().await) {}
    }
}
