//! Serial bus abstractions
//!
//! The shift-register chain is clocked one word at a time by an
//! interrupt-driven master: software places a byte in the data register,
//! the peripheral shifts it out while shifting the peer's byte in, and a
//! transfer-complete interrupt fires. [`SerialPort`] models exactly that
//! and nothing more. It is not a general-purpose SPI driver.

/// Interrupt-driven serial master that exchanges one byte per transfer
///
/// Every call to [`SerialPort::write_data`] starts one full-duplex word
/// exchange. When it finishes, the implementation raises its
/// transfer-complete notification and the handler must call
/// [`SerialPort::read_data`] exactly once before queuing the next byte.
pub trait SerialPort {
    /// Error type for configuration failures
    type Error;

    /// Configure the peripheral as bus master with the given settings
    ///
    /// The peripheral is enabled on return but no transfer is started.
    fn configure(&mut self, config: &SpiConfig) -> Result<(), Self::Error>;

    /// Enable the transfer-complete notification
    fn listen(&mut self);

    /// Disable the transfer-complete notification
    fn unlisten(&mut self);

    /// Take the byte received during the transfer that just completed
    ///
    /// Also acknowledges the transfer-complete notification.
    fn read_data(&mut self) -> u8;

    /// Queue a byte, starting the next transfer
    fn write_data(&mut self, byte: u8);
}

/// Serial bus configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    /// Peripheral clock divisor
    pub divisor: ClockDivisor,
    /// Clock polarity and phase
    pub mode: Mode,
    /// Bit order on the wire
    pub bit_order: BitOrder,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            divisor: ClockDivisor::DEFAULT,
            mode: Mode::Mode0,
            bit_order: BitOrder::MsbFirst,
        }
    }
}

impl SpiConfig {
    /// Bus clock in Hz for a given peripheral clock
    pub fn bus_clock_hz(&self, peripheral_clock_hz: u32) -> u32 {
        peripheral_clock_hz / self.divisor.get() as u32
    }
}

/// Clock divisor between the peripheral clock and the bus clock
///
/// Restricted to even values in 2..=254 so it maps directly onto a single
/// prescaler register on the supported chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockDivisor(u8);

impl ClockDivisor {
    /// Slow enough for long daisy chains of 74HC595/74HC165 parts
    pub const DEFAULT: ClockDivisor = ClockDivisor(128);

    /// Create a divisor, rejecting odd values and values below 2
    pub const fn new(divisor: u8) -> Option<Self> {
        if divisor < 2 || divisor % 2 != 0 {
            None
        } else {
            Some(Self(divisor))
        }
    }

    /// Raw divisor value
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for ClockDivisor {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Bit order on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitOrder {
    MsbFirst,
    LsbFirst,
}

/// SPI clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

/// SPI clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}

/// SPI mode (combined polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Mode 0: CPOL=0, CPHA=0
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}

impl Mode {
    /// Mode from its conventional number (0-3)
    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            0 => Some(Mode::Mode0),
            1 => Some(Mode::Mode1),
            2 => Some(Mode::Mode2),
            3 => Some(Mode::Mode3),
            _ => None,
        }
    }
}

impl From<Mode> for (Polarity, Phase) {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Mode0 => (Polarity::IdleLow, Phase::CaptureOnFirstTransition),
            Mode::Mode1 => (Polarity::IdleLow, Phase::CaptureOnSecondTransition),
            Mode::Mode2 => (Polarity::IdleHigh, Phase::CaptureOnFirstTransition),
            Mode::Mode3 => (Polarity::IdleHigh, Phase::CaptureOnSecondTransition),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divisor_validation() {
        assert!(ClockDivisor::new(0).is_none());
        assert!(ClockDivisor::new(1).is_none());
        assert!(ClockDivisor::new(127).is_none());
        assert_eq!(ClockDivisor::new(2).map(ClockDivisor::get), Some(2));
        assert_eq!(ClockDivisor::new(254).map(ClockDivisor::get), Some(254));
    }

    #[test]
    fn test_default_config() {
        let config = SpiConfig::default();
        assert_eq!(config.divisor.get(), 128);
        assert_eq!(config.mode, Mode::Mode0);
        assert_eq!(config.bit_order, BitOrder::MsbFirst);
    }

    #[test]
    fn test_bus_clock() {
        let config = SpiConfig::default();
        // 125 MHz peripheral clock / 128
        assert_eq!(config.bus_clock_hz(125_000_000), 976_562);
    }

    #[test]
    fn test_mode_numbers() {
        assert_eq!(Mode::from_number(0), Some(Mode::Mode0));
        assert_eq!(Mode::from_number(3), Some(Mode::Mode3));
        assert_eq!(Mode::from_number(4), None);

        let (polarity, phase) = Mode::Mode3.into();
        assert_eq!(polarity, Polarity::IdleHigh);
        assert_eq!(phase, Phase::CaptureOnSecondTransition);
    }
}
