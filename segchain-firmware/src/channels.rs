//! Shared state between tasks and the bus interrupt
//!
//! The register file is the only thing the interrupt handler and the
//! foreground tasks share. Everything else stays inside one task.

use segchain_core::registers::SharedRegisters;

/// LED, button and segment registers, shifted through the chain by the bus interrupt
pub static REGISTERS: SharedRegisters = SharedRegisters::new();
