//! Framing line output
//!
//! Adapts any `embedded-hal` push-pull output to the `segchain-hal`
//! [`OutputPin`] trait. The level is tracked locally so it can be read back
//! through `&self` from the interrupt handler.

use core::convert::Infallible;

use embedded_hal::digital::OutputPin as EhOutputPin;
use segchain_hal::OutputPin;

/// Output pin driving the chain's latch strobe
pub struct FramePin<P> {
    pin: P,
    high: bool,
}

impl<P: EhOutputPin<Error = Infallible>> FramePin<P> {
    /// Wrap an output and drive it to `high`
    pub fn new(mut pin: P, high: bool) -> Self {
        let _ = if high { pin.set_high() } else { pin.set_low() };
        Self { pin, high }
    }

    /// Give back the wrapped output
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: EhOutputPin<Error = Infallible>> OutputPin for FramePin<P> {
    fn set_high(&mut self) {
        let _ = self.pin.set_high();
        self.high = true;
    }

    fn set_low(&mut self) {
        let _ = self.pin.set_low();
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}
