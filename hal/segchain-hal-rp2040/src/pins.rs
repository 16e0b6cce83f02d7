//! Pin bank for config-driven pin assignment
//!
//! `board.toml` names pins by number, but Embassy hands out one typed
//! singleton per pin. The bank erases them to [`AnyPin`] so the bus pins
//! can be looked up at runtime, and refuses to hand out the same pin twice.

use embassy_rp::gpio::AnyPin;
use embassy_rp::peripherals::{SPI0, SPI1};
use embassy_rp::{Peri, Peripherals};

/// Number of user GPIOs in bank 0
pub const GPIO_COUNT: usize = 30;

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin(u8),
    /// Pin already taken
    AlreadyTaken(u8),
}

/// All bank-0 GPIOs, taken by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT],
}

/// Peripherals left over once the pins are banked
pub struct BankedPeripherals {
    pub spi0: Peri<'static, SPI0>,
    pub spi1: Peri<'static, SPI1>,
}

impl PinBank {
    /// Split the Embassy peripherals into a pin bank and the rest
    pub fn new(p: Peripherals) -> (Self, BankedPeripherals) {
        let bank = Self {
            pins: [
                Some(p.PIN_0.into()),
                Some(p.PIN_1.into()),
                Some(p.PIN_2.into()),
                Some(p.PIN_3.into()),
                Some(p.PIN_4.into()),
                Some(p.PIN_5.into()),
                Some(p.PIN_6.into()),
                Some(p.PIN_7.into()),
                Some(p.PIN_8.into()),
                Some(p.PIN_9.into()),
                Some(p.PIN_10.into()),
                Some(p.PIN_11.into()),
                Some(p.PIN_12.into()),
                Some(p.PIN_13.into()),
                Some(p.PIN_14.into()),
                Some(p.PIN_15.into()),
                Some(p.PIN_16.into()),
                Some(p.PIN_17.into()),
                Some(p.PIN_18.into()),
                Some(p.PIN_19.into()),
                Some(p.PIN_20.into()),
                Some(p.PIN_21.into()),
                Some(p.PIN_22.into()),
                Some(p.PIN_23.into()),
                Some(p.PIN_24.into()),
                Some(p.PIN_25.into()),
                Some(p.PIN_26.into()),
                Some(p.PIN_27.into()),
                Some(p.PIN_28.into()),
                Some(p.PIN_29.into()),
            ],
        };
        let rest = BankedPeripherals {
            spi0: p.SPI0,
            spi1: p.SPI1,
        };
        (bank, rest)
    }

    /// Take a pin by number
    pub fn take(&mut self, pin: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        self.pins
            .get_mut(pin as usize)
            .ok_or(PinError::InvalidPin(pin))?
            .take()
            .ok_or(PinError::AlreadyTaken(pin))
    }
}
