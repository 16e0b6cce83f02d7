//! Sweep phases

/// Position within a sweep
///
/// Named after what the phase queues for the *next* transfer. Phase 0 is
/// special: it also consumes the button byte that arrived during the
/// transfer that just completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Latch buttons, queue digit 0
    #[default]
    Buttons,
    /// Queue digit 1
    Digit1,
    /// Queue digit 2
    Digit2,
    /// Queue digit 3
    Digit3,
    /// Queue digit 4
    Digit4,
    /// Release the framing line, queue LEDs
    EndSweep,
    /// Take the framing line, queue LEDs again
    BeginSweep,
}

impl Phase {
    /// Number of phases (and transfers) per sweep
    pub const COUNT: usize = 7;

    /// All phases in sweep order
    pub const ALL: [Phase; Phase::COUNT] = [
        Phase::Buttons,
        Phase::Digit1,
        Phase::Digit2,
        Phase::Digit3,
        Phase::Digit4,
        Phase::EndSweep,
        Phase::BeginSweep,
    ];

    /// Numeric phase, 0-6
    pub const fn index(self) -> u8 {
        match self {
            Phase::Buttons => 0,
            Phase::Digit1 => 1,
            Phase::Digit2 => 2,
            Phase::Digit3 => 3,
            Phase::Digit4 => 4,
            Phase::EndSweep => 5,
            Phase::BeginSweep => 6,
        }
    }

    /// The phase that handles the following event
    pub const fn next(self) -> Phase {
        match self {
            Phase::Buttons => Phase::Digit1,
            Phase::Digit1 => Phase::Digit2,
            Phase::Digit2 => Phase::Digit3,
            Phase::Digit3 => Phase::Digit4,
            Phase::Digit4 => Phase::EndSweep,
            Phase::EndSweep => Phase::BeginSweep,
            Phase::BeginSweep => Phase::Buttons,
        }
    }

    /// Digit position whose pattern this phase queues, if any
    pub const fn digit(self) -> Option<usize> {
        match self {
            Phase::Buttons => Some(0),
            Phase::Digit1 => Some(1),
            Phase::Digit2 => Some(2),
            Phase::Digit3 => Some(3),
            Phase::Digit4 => Some(4),
            Phase::EndSweep | Phase::BeginSweep => None,
        }
    }

    /// Whether the incoming byte carries the button bank state
    pub const fn reads_buttons(self) -> bool {
        matches!(self, Phase::Buttons)
    }
}
