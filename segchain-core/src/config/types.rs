//! Configuration type definitions

use segchain_hal::SpiConfig;

/// Highest GPIO number accepted in a pin string
pub const MAX_GPIO: u8 = 29;

/// GPIO pin configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Logic is inverted (`!` prefix)
    pub inverted: bool,
    /// Enable internal pull-up (`^` prefix)
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a plain pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }
}

/// Serial bus wiring and timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusHwConfig {
    /// Serial clock
    pub sck: PinConfig,
    /// Data towards the chain (segments, LEDs)
    pub mosi: PinConfig,
    /// Data from the chain (buttons)
    pub miso: PinConfig,
    /// Framing line (latch strobe). Inverted means asserted = high.
    pub frame: PinConfig,
    /// Divisor, mode and bit order
    pub spi: SpiConfig,
}

impl Default for BusHwConfig {
    fn default() -> Self {
        // SPI0 on the RP2040 default function pins
        Self {
            sck: PinConfig::new(18),
            mosi: PinConfig::new(19),
            miso: PinConfig::new(16),
            frame: PinConfig::new(17),
            spi: SpiConfig::default(),
        }
    }
}

impl BusHwConfig {
    /// All pin numbers in wiring order: sck, mosi, miso, frame
    pub fn pins(&self) -> [u8; 4] {
        [self.sck.pin, self.mosi.pin, self.miso.pin, self.frame.pin]
    }
}

/// Counter display behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Counter start value (0-99999)
    pub start: u32,
    /// Milliseconds between increments
    pub interval_ms: u32,
    /// Play the greeting before counting
    pub intro: bool,
    /// Milliseconds between greeting letters
    pub intro_step_ms: u32,
    /// Milliseconds to hold the full greeting
    pub intro_hold_ms: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            start: 98_000,
            interval_ms: 1000,
            intro: true,
            intro_step_ms: 400,
            intro_hold_ms: 3000,
        }
    }
}

/// Button bank behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    /// Copy the button byte onto the LEDs every tick
    pub mirror_to_leds: bool,
}

/// Complete board configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    pub bus: BusHwConfig,
    pub display: DisplayConfig,
    pub buttons: ButtonConfig,
}
