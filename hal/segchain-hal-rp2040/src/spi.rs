//! Interrupt-driven SPI master on the RP2040 PL022 blocks
//!
//! Embassy's SPI driver owns the transfer loop, which does not fit a chain
//! clocked one byte per interrupt. This port programs the PL022 registers
//! directly and leaves the interrupt handler to the firmware.
//!
//! The PL022 has no "transfer complete" interrupt for single words. The
//! receive timeout interrupt stands in for it: it fires once the RX FIFO
//! holds a word and the bus has been idle for 32 bit periods.

use embassy_rp::gpio::AnyPin;
use embassy_rp::interrupt::Interrupt;
use embassy_rp::pac;
use embassy_rp::peripherals::{SPI0, SPI1};
use embassy_rp::Peri;
use segchain_hal::{BitOrder, Phase, Polarity, SerialPort, SpiConfig};

/// IO_BANK0 function select for SPI
const FUNCSEL_SPI: u8 = 1;

/// Data size select for 8-bit words
const DSS_8BIT: u8 = 0b0111;

/// SPI port errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rp2040SpiError {
    /// Prescaler must be even and at least 2
    InvalidDivisor(u8),
    /// Pin cannot carry the requested SPI signal
    PinFunction(u8),
    /// Pins belong to different SPI blocks, or to a block other than the one supplied
    InstanceMismatch,
}

/// Which PL022 block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiInstance {
    Spi0,
    Spi1,
}

/// SPI signal a GPIO carries in function 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signal {
    Rx,
    Csn,
    Sck,
    Tx,
}

impl SpiInstance {
    /// Block a GPIO is routed to in the SPI function
    ///
    /// GPIOs alternate between SPI0 and SPI1 in groups of eight.
    pub fn of_pin(pin: u8) -> Self {
        if (pin / 8) % 2 == 0 {
            SpiInstance::Spi0
        } else {
            SpiInstance::Spi1
        }
    }

    /// Block serving a clock/data pin triple
    pub fn for_pins(sck: u8, mosi: u8, miso: u8) -> Result<Self, Rp2040SpiError> {
        for (pin, wanted) in [(sck, Signal::Sck), (mosi, Signal::Tx), (miso, Signal::Rx)] {
            if signal_of(pin) != wanted {
                return Err(Rp2040SpiError::PinFunction(pin));
            }
        }

        let instance = Self::of_pin(sck);
        if Self::of_pin(mosi) != instance || Self::of_pin(miso) != instance {
            return Err(Rp2040SpiError::InstanceMismatch);
        }
        Ok(instance)
    }

    /// Interrupt line of the block
    pub fn interrupt(self) -> Interrupt {
        match self {
            SpiInstance::Spi0 => Interrupt::SPI0_IRQ,
            SpiInstance::Spi1 => Interrupt::SPI1_IRQ,
        }
    }

    fn regs(self) -> pac::spi::Spi {
        match self {
            SpiInstance::Spi0 => pac::SPI0,
            SpiInstance::Spi1 => pac::SPI1,
        }
    }

    fn unreset(self) {
        let set = |w: &mut pac::resets::regs::Peripherals, v: bool| match self {
            SpiInstance::Spi0 => w.set_spi0(v),
            SpiInstance::Spi1 => w.set_spi1(v),
        };
        pac::RESETS.reset().modify(|w| set(w, false));
        loop {
            let done = pac::RESETS.reset_done().read();
            let ready = match self {
                SpiInstance::Spi0 => done.spi0(),
                SpiInstance::Spi1 => done.spi1(),
            };
            if ready {
                break;
            }
        }
    }
}

fn signal_of(pin: u8) -> Signal {
    match pin % 4 {
        0 => Signal::Rx,
        1 => Signal::Csn,
        2 => Signal::Sck,
        _ => Signal::Tx,
    }
}

/// Ownership token for one SPI block
pub enum SpiBlock {
    Spi0(Peri<'static, SPI0>),
    Spi1(Peri<'static, SPI1>),
}

impl SpiBlock {
    fn instance(&self) -> SpiInstance {
        match self {
            SpiBlock::Spi0(_) => SpiInstance::Spi0,
            SpiBlock::Spi1(_) => SpiInstance::Spi1,
        }
    }
}

/// A GPIO taken from the pin bank, with its number and pad settings
pub struct SpiPin {
    pub number: u8,
    pub pull_up: bool,
    pub pin: Peri<'static, AnyPin>,
}

/// Clock and data pins of the bus
pub struct SpiPins {
    pub sck: SpiPin,
    pub mosi: SpiPin,
    pub miso: SpiPin,
}

/// PL022 master exchanging one byte per interrupt
pub struct Rp2040SpiPort {
    instance: SpiInstance,
    bit_order: BitOrder,
    _block: SpiBlock,
    _pins: SpiPins,
}

impl Rp2040SpiPort {
    /// Take the block out of reset and route the pins to it
    ///
    /// The block stays disabled until [`SerialPort::configure`].
    pub fn new(block: SpiBlock, pins: SpiPins) -> Result<Self, Rp2040SpiError> {
        let instance = SpiInstance::for_pins(pins.sck.number, pins.mosi.number, pins.miso.number)?;
        if block.instance() != instance {
            return Err(Rp2040SpiError::InstanceMismatch);
        }

        instance.unreset();
        instance.regs().cr1().write(|w| w.set_sse(false));

        for pin in [&pins.sck, &pins.mosi, &pins.miso] {
            route_pin(pin);
        }

        Ok(Self {
            instance,
            bit_order: BitOrder::MsbFirst,
            _block: block,
            _pins: pins,
        })
    }

    /// Which block this port drives
    pub fn instance(&self) -> SpiInstance {
        self.instance
    }
}

fn route_pin(pin: &SpiPin) {
    let n = pin.number as usize;
    pac::IO_BANK0
        .gpio(n)
        .ctrl()
        .write(|w| w.set_funcsel(FUNCSEL_SPI));
    pac::PADS_BANK0.gpio(n).write(|w| {
        w.set_schmitt(true);
        w.set_slewfast(false);
        w.set_ie(true);
        w.set_od(false);
        w.set_pue(pin.pull_up);
        w.set_pde(false);
    });
}

impl SerialPort for Rp2040SpiPort {
    type Error = Rp2040SpiError;

    fn configure(&mut self, config: &SpiConfig) -> Result<(), Rp2040SpiError> {
        let divisor = config.divisor.get();
        if divisor < 2 || divisor % 2 != 0 {
            return Err(Rp2040SpiError::InvalidDivisor(divisor));
        }
        let (polarity, phase): (Polarity, Phase) = config.mode.into();

        let p = self.instance.regs();
        p.cr1().write(|w| w.set_sse(false));
        p.cpsr().write(|w| w.set_cpsdvsr(divisor));
        p.cr0().write(|w| {
            w.set_dss(DSS_8BIT);
            w.set_frf(0);
            w.set_spo(polarity == Polarity::IdleHigh);
            w.set_sph(phase == Phase::CaptureOnSecondTransition);
            w.set_scr(0);
        });
        p.imsc().write(|_| {});

        // Stale words would be taken as the kick-off reply
        while p.sr().read().rne() {
            let _ = p.dr().read();
        }
        p.icr().write(|w| {
            w.set_roric(true);
            w.set_rtic(true);
        });

        // PL022 is MSB-first only; LSB-first is done by bit reversal
        self.bit_order = config.bit_order;

        // Master mode
        p.cr1().write(|w| {
            w.set_ms(false);
            w.set_sse(true);
        });
        Ok(())
    }

    fn listen(&mut self) {
        self.instance.regs().imsc().write(|w| w.set_rtim(true));
    }

    fn unlisten(&mut self) {
        self.instance.regs().imsc().write(|_| {});
    }

    fn read_data(&mut self) -> u8 {
        let p = self.instance.regs();
        let word = p.dr().read().data() as u8;
        p.icr().write(|w| w.set_rtic(true));
        self.reorder(word)
    }

    fn write_data(&mut self, byte: u8) {
        let word = self.reorder(byte);
        self.instance.regs().dr().write(|w| w.set_data(word as u16));
    }
}

impl Rp2040SpiPort {
    /// Reversal is its own inverse, so this maps both directions
    fn reorder(&self, byte: u8) -> u8 {
        match self.bit_order {
            BitOrder::MsbFirst => byte,
            BitOrder::LsbFirst => byte.reverse_bits(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_of_pin() {
        assert_eq!(SpiInstance::of_pin(0), SpiInstance::Spi0);
        assert_eq!(SpiInstance::of_pin(7), SpiInstance::Spi0);
        assert_eq!(SpiInstance::of_pin(8), SpiInstance::Spi1);
        assert_eq!(SpiInstance::of_pin(15), SpiInstance::Spi1);
        assert_eq!(SpiInstance::of_pin(18), SpiInstance::Spi0);
        assert_eq!(SpiInstance::of_pin(26), SpiInstance::Spi1);
    }

    #[test]
    fn test_default_pins_use_spi0() {
        assert_eq!(SpiInstance::for_pins(18, 19, 16), Ok(SpiInstance::Spi0));
        assert_eq!(SpiInstance::for_pins(10, 11, 12), Ok(SpiInstance::Spi1));
    }

    #[test]
    fn test_wrong_signal() {
        // 19 is a TX pin, not a clock
        assert_eq!(
            SpiInstance::for_pins(19, 19, 16),
            Err(Rp2040SpiError::PinFunction(19))
        );
        // 17 is chip select, not RX
        assert_eq!(
            SpiInstance::for_pins(18, 19, 17),
            Err(Rp2040SpiError::PinFunction(17))
        );
    }

    #[test]
    fn test_mixed_blocks() {
        assert_eq!(
            SpiInstance::for_pins(18, 11, 16),
            Err(Rp2040SpiError::InstanceMismatch)
        );
    }
}
