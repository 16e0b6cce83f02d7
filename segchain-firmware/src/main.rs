//! Segchain - shift-register display firmware
//!
//! Drives a daisy chain of shift registers carrying five seven-segment
//! digits, an LED bank and a button bank. The chain is clocked one byte
//! per SPI interrupt; the application only ever touches the shared
//! register file.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use {defmt_rtt as _, panic_probe as _};

use segchain_hal_rp2040::PinBank;

mod bus;
mod channels;
mod config;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Segchain firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let board = config::load_board_config();
    config::log_board_config(&board);

    let (mut bank, rest) = PinBank::new(p);

    // Without a bus the tasks still run; nothing reaches the chain
    match bus::start(&mut bank, rest, &board.bus) {
        Ok(instance) => info!("Bus running on {}", instance),
        Err(e) => error!("Bus bring-up failed: {}", e),
    }

    spawner.spawn(tasks::tick_task()).unwrap();
    spawner.spawn(tasks::display_task(board.display)).unwrap();
    spawner.spawn(tasks::buttons_task(board.buttons)).unwrap();

    info!("All tasks spawned");
}
