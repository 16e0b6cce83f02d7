//! Board-agnostic logic for the shift-register display chain
//!
//! This crate contains everything that does not touch real hardware:
//!
//! - Glyph to segment-pattern encoding
//! - Shared registers between the application and the bus interrupt
//! - The seven-phase transfer state machine
//! - Counter, greeting and interval pacing for the demo application
//! - Board configuration types and the `board.toml` parser

#![no_std]
#![deny(unsafe_code)]

pub mod app;
pub mod config;
pub mod display;
pub mod glyph;
pub mod registers;
pub mod transfer;
