//! Transfer state machine for the shift-register chain
//!
//! One sweep of the chain is seven word exchanges. The machine is driven
//! purely by transfer-complete events; there is no addressing or
//! acknowledgment on the wire, so its position within the sweep is derived
//! from the event count alone.
//!
//! A missed or duplicated event leaves the machine out of step with the
//! physical latches until restart. Nothing here detects that.

pub mod machine;
pub mod phase;

pub use machine::{FrameSignal, Step, TransferMachine};
pub use phase::Phase;
