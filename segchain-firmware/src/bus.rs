//! Bus bring-up and the transfer-complete interrupt
//!
//! The driver lives in a critical-section mutex so the interrupt handler and
//! the foreground can both reach it. Only the handler drives transfers once
//! the bus is running.

use core::cell::RefCell;

use defmt::*;
use embassy_rp::clocks;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use segchain_core::config::{BusHwConfig, PinConfig};
use segchain_core::transfer::FrameSignal;
use segchain_drivers::{BusDriver, FramePolarity};
use segchain_hal_rp2040::{
    BankedPeripherals, FramePin, PinBank, PinError, Rp2040SpiError, Rp2040SpiPort, SpiBlock,
    SpiInstance, SpiPin, SpiPins,
};

use crate::channels::REGISTERS;

type Chain = BusDriver<Rp2040SpiPort, FramePin<Output<'static>>>;

static BUS: Mutex<CriticalSectionRawMutex, RefCell<Option<Chain>>> =
    Mutex::new(RefCell::new(None));

/// Bring-up failures
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    Pin(PinError),
    Spi(Rp2040SpiError),
}

impl From<PinError> for BusError {
    fn from(e: PinError) -> Self {
        BusError::Pin(e)
    }
}

impl From<Rp2040SpiError> for BusError {
    fn from(e: Rp2040SpiError) -> Self {
        BusError::Spi(e)
    }
}

/// Claim the bus pins, start the chain and unmask its interrupt
pub fn start(
    bank: &mut PinBank,
    rest: BankedPeripherals,
    config: &BusHwConfig,
) -> Result<SpiInstance, BusError> {
    let instance = SpiInstance::for_pins(config.sck.pin, config.mosi.pin, config.miso.pin)?;
    let block = match instance {
        SpiInstance::Spi0 => SpiBlock::Spi0(rest.spi0),
        SpiInstance::Spi1 => SpiBlock::Spi1(rest.spi1),
    };

    let mut take = |pin: &PinConfig| -> Result<SpiPin, PinError> {
        Ok(SpiPin {
            number: pin.pin,
            pull_up: pin.pull_up,
            pin: bank.take(pin.pin)?,
        })
    };
    let pins = SpiPins {
        sck: take(&config.sck)?,
        mosi: take(&config.mosi)?,
        miso: take(&config.miso)?,
    };
    let port = Rp2040SpiPort::new(block, pins)?;
    let driven = port.instance();

    // Frame line starts deasserted so the chain does not latch garbage
    let polarity = FramePolarity::from_inverted(config.frame.inverted);
    let idle_high = polarity.level(FrameSignal::Deassert) == segchain_hal::Level::High;
    let frame_out = Output::new(bank.take(config.frame.pin)?, Level::from(idle_high));
    let frame = FramePin::new(frame_out, idle_high);

    let driver = BusDriver::start(port, frame, &config.spi, polarity, &REGISTERS)?;
    info!(
        "Chain started on {} at {} Hz (divisor {})",
        driven,
        config.spi.bus_clock_hz(clocks::clk_peri_freq()),
        config.spi.divisor.get()
    );

    // The kick-off transfer may already be done; the pending interrupt
    // fires as soon as it is unmasked, with the driver in place.
    BUS.lock(|cell| *cell.borrow_mut() = Some(driver));

    let irq = instance.interrupt();
    irq.set_priority(Priority::P1);
    // SAFETY: the handler only touches BUS, which is initialised above
    unsafe { irq.enable() };

    Ok(instance)
}

/// Completed sweeps since start, 0 if the bus is not running
pub fn sweeps() -> u32 {
    BUS.lock(|cell| cell.borrow().as_ref().map_or(0, |driver| driver.sweeps()))
}

fn service() {
    BUS.lock(|cell| {
        if let Some(driver) = cell.borrow_mut().as_mut() {
            driver.on_transfer_complete(&REGISTERS);
        }
    });
}

#[interrupt]
fn SPI0_IRQ() {
    service();
}

#[interrupt]
fn SPI1_IRQ() {
    service();
}
