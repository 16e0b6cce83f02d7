//! segchain Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the shift-register bus is built
//! on. Chip-specific crates implement them so the transfer logic in
//! `segchain-core` and `segchain-drivers` never touches registers directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (segchain-firmware)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  segchain-drivers (BusDriver)           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  segchain-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ segchain-hal- │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`spi::SerialPort`] - Interrupt-driven, one-word-at-a-time serial master

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, Level, OutputPin};
pub use spi::{BitOrder, ClockDivisor, Mode, Phase, Polarity, SerialPort, SpiConfig};
