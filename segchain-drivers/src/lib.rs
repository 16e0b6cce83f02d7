//! Hardware driver implementations
//!
//! Binds the board-agnostic transfer machine from `segchain-core` to the
//! peripheral traits in `segchain-hal`:
//!
//! - [`bus::BusDriver`]: the transfer-complete handler for the
//!   shift-register chain, including framing line control

#![no_std]
#![deny(unsafe_code)]

pub mod bus;

pub use bus::{BusDriver, FramePolarity};
