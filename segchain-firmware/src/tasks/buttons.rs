//! Button monitor task
//!
//! Watches the button byte latched by the bus interrupt and logs changes.
//! Optionally copies it onto the LEDs so each key lights its own LED.

use defmt::*;
use embassy_time::{Duration, Ticker};

use segchain_core::config::ButtonConfig;
use segchain_core::display::SegmentDisplay;

use crate::bus;
use crate::channels::REGISTERS;

/// Poll interval in milliseconds
const POLL_INTERVAL_MS: u64 = 20;

/// Sweep count is logged this often
const HEARTBEAT_POLLS: u32 = 250;

#[embassy_executor::task]
pub async fn buttons_task(config: ButtonConfig) {
    info!("Buttons task started (mirror to LEDs: {})", config.mirror_to_leds);

    let display = SegmentDisplay::new(&REGISTERS);
    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));
    let mut last = display.buttons();
    let mut polls: u32 = 0;

    loop {
        ticker.next().await;

        let buttons = display.buttons();
        if buttons != last {
            info!("Buttons: {=u8:#b} (changed {=u8:#b})", buttons, buttons ^ last);
            last = buttons;
        }

        if config.mirror_to_leds {
            display.set_leds(buttons);
        }

        polls = polls.wrapping_add(1);
        if polls % HEARTBEAT_POLLS == 0 {
            trace!("Bus sweeps: {}", bus::sweeps());
        }
    }
}
