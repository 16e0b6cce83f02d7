//! Transfer state machine definition
//!
//! | Phase | Incoming byte | Queued byte | Framing line |
//! |-------|---------------|-------------|--------------|
//! | 0     | buttons       | digit 0     | -            |
//! | 1     | ignored       | digit 1     | -            |
//! | 2     | ignored       | digit 2     | -            |
//! | 3     | ignored       | digit 3     | -            |
//! | 4     | ignored       | digit 4     | -            |
//! | 5     | ignored       | LEDs        | deassert     |
//! | 6     | ignored       | LEDs        | assert       |

use super::phase::Phase;
use crate::glyph::BLANK;
use crate::registers::SharedRegisters;

/// Change to apply to the framing line before queuing the next byte
///
/// The line is an active-low chip select repurposed as the latch strobe of
/// the whole chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameSignal {
    /// Drive the line high: the chain latches the sweep just shifted
    Deassert,
    /// Drive the line low: the next sweep begins
    Assert,
}

/// What to do before the next transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Step {
    /// Byte to place in the data register
    pub outgoing: u8,
    /// Framing line change, applied before `outgoing` is queued
    pub frame: Option<FrameSignal>,
}

/// Seven-phase round-robin sequencer
///
/// Owns the phase counter; nothing else reads or writes it. Must be invoked
/// exactly once per completed transfer.
#[derive(Debug, Clone)]
pub struct TransferMachine {
    phase: Phase,
    sweeps: u32,
}

impl Default for TransferMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferMachine {
    /// Start at phase 0, ready for the reply to the kick-off transfer
    pub const fn new() -> Self {
        Self {
            phase: Phase::Buttons,
            sweeps: 0,
        }
    }

    /// Phase that will handle the next event
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Completed sweeps, wrapping
    pub fn sweeps(&self) -> u32 {
        self.sweeps
    }

    /// Byte that starts the cycle
    ///
    /// The kick-off transfer shifts out the LED byte; its reply is the
    /// button byte consumed by phase 0.
    pub fn kickoff(regs: &SharedRegisters) -> u8 {
        regs.leds()
    }

    /// Handle one transfer-complete event
    ///
    /// `incoming` is the byte shifted in during the transfer that just
    /// finished. Phase 0 latches it as button state and also queues
    /// digit 0 in the same event.
    pub fn on_transfer_complete(&mut self, incoming: u8, regs: &SharedRegisters) -> Step {
        let phase = self.phase;

        if phase.reads_buttons() {
            regs.latch_buttons(incoming);
        }

        let step = match phase {
            Phase::EndSweep => Step {
                outgoing: regs.leds(),
                frame: Some(FrameSignal::Deassert),
            },
            Phase::BeginSweep => Step {
                outgoing: regs.leds(),
                frame: Some(FrameSignal::Assert),
            },
            digit_phase => Step {
                // digit() is Some for every remaining phase
                outgoing: digit_phase
                    .digit()
                    .and_then(|pos| regs.segment(pos).ok())
                    .unwrap_or(BLANK),
                frame: None,
            },
        };

        self.phase = phase.next();
        if self.phase == Phase::Buttons {
            self.sweeps = self.sweeps.wrapping_add(1);
        }

        step
    }
}
