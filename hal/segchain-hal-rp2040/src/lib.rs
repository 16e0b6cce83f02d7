//! RP2040 HAL for the segchain firmware
//!
//! RP2040-specific implementations of the shared `segchain-hal` traits:
//!
//! - Pin bank for config-driven pin assignment
//! - Interrupt-driven SPI master ([`spi::Rp2040SpiPort`])
//! - Framing line output ([`gpio::FramePin`])

#![no_std]

pub mod gpio;
pub mod pins;
pub mod spi;

pub use gpio::FramePin;
pub use pins::{BankedPeripherals, PinBank, PinError};
pub use spi::{Rp2040SpiError, Rp2040SpiPort, SpiBlock, SpiInstance, SpiPin, SpiPins};
