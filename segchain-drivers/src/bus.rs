//! Shift-register chain bus driver
//!
//! Owns the serial port, the framing line and the transfer machine. The
//! board crate calls [`BusDriver::on_transfer_complete`] from its
//! transfer-complete interrupt; everything else talks to the chain only
//! through [`SharedRegisters`].

use segchain_core::registers::SharedRegisters;
use segchain_core::transfer::{FrameSignal, Phase, TransferMachine};
use segchain_hal::{Level, OutputPin, SerialPort, SpiConfig};

/// Electrical sense of the framing line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FramePolarity {
    /// Asserted = low (chip-select style)
    #[default]
    ActiveLow,
    /// Asserted = high, for boards with an inverting buffer
    ActiveHigh,
}

impl FramePolarity {
    /// Polarity from a pin's `inverted` flag
    pub fn from_inverted(inverted: bool) -> Self {
        if inverted {
            FramePolarity::ActiveHigh
        } else {
            FramePolarity::ActiveLow
        }
    }

    /// Pin level that realises a framing signal
    pub fn level(self, signal: FrameSignal) -> Level {
        match (self, signal) {
            (FramePolarity::ActiveLow, FrameSignal::Assert) => Level::Low,
            (FramePolarity::ActiveLow, FrameSignal::Deassert) => Level::High,
            (FramePolarity::ActiveHigh, FrameSignal::Assert) => Level::High,
            (FramePolarity::ActiveHigh, FrameSignal::Deassert) => Level::Low,
        }
    }
}

/// Interrupt-driven driver for the display/LED/button chain
pub struct BusDriver<S, F> {
    port: S,
    frame: F,
    polarity: FramePolarity,
    machine: TransferMachine,
}

impl<S: SerialPort, F: OutputPin> BusDriver<S, F> {
    /// Configure the port and start the first transfer
    ///
    /// The framing line is deasserted while the port is configured, then
    /// asserted and the LED byte is queued as the kick-off transfer. From
    /// here on the chain runs from the interrupt alone.
    ///
    /// Must be installed where the interrupt handler can reach it before
    /// the first transfer completes.
    pub fn start(
        mut port: S,
        frame: F,
        config: &SpiConfig,
        polarity: FramePolarity,
        regs: &SharedRegisters,
    ) -> Result<Self, S::Error> {
        port.configure(config)?;

        let mut driver = Self {
            port,
            frame,
            polarity,
            machine: TransferMachine::new(),
        };

        driver.drive_frame(FrameSignal::Deassert);
        driver.port.listen();
        driver.drive_frame(FrameSignal::Assert);
        driver.port.write_data(TransferMachine::kickoff(regs));

        Ok(driver)
    }

    /// Handle one transfer-complete interrupt
    ///
    /// Reads the received byte (acknowledging the interrupt), advances the
    /// machine, applies any framing change and queues the next byte.
    pub fn on_transfer_complete(&mut self, regs: &SharedRegisters) {
        let incoming = self.port.read_data();
        let step = self.machine.on_transfer_complete(incoming, regs);

        if let Some(signal) = step.frame {
            self.drive_frame(signal);
        }
        self.port.write_data(step.outgoing);
    }

    /// Phase that will handle the next interrupt
    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    /// Completed sweeps, wrapping
    pub fn sweeps(&self) -> u32 {
        self.machine.sweeps()
    }

    /// Stop interrupts, deassert the framing line and hand back the hardware
    ///
    /// A transfer already in flight still completes on the wire.
    pub fn release(mut self) -> (S, F) {
        self.port.unlisten();
        self.drive_frame(FrameSignal::Deassert);
        (self.port, self.frame)
    }

    fn drive_frame(&mut self, signal: FrameSignal) {
        self.frame.set_level(self.polarity.level(signal));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use heapless::Vec;
    use proptest::prelude::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        Configure,
        Listen,
        Unlisten,
        Read,
        Write(u8),
        FrameHigh,
        FrameLow,
    }

    type Log = RefCell<Vec<Event, 128>>;

    struct MockPort<'a> {
        log: &'a Log,
        incoming: u8,
        fail: bool,
    }

    impl SerialPort for MockPort<'_> {
        type Error = ();

        fn configure(&mut self, _config: &SpiConfig) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.log.borrow_mut().push(Event::Configure).unwrap();
            Ok(())
        }

        fn listen(&mut self) {
            self.log.borrow_mut().push(Event::Listen).unwrap();
        }

        fn unlisten(&mut self) {
            self.log.borrow_mut().push(Event::Unlisten).unwrap();
        }

        fn read_data(&mut self) -> u8 {
            self.log.borrow_mut().push(Event::Read).unwrap();
            self.incoming
        }

        fn write_data(&mut self, byte: u8) {
            self.log.borrow_mut().push(Event::Write(byte)).unwrap();
        }
    }

    struct MockFrame<'a> {
        log: &'a Log,
        high: bool,
    }

    impl OutputPin for MockFrame<'_> {
        fn set_high(&mut self) {
            self.high = true;
            self.log.borrow_mut().push(Event::FrameHigh).unwrap();
        }

        fn set_low(&mut self) {
            self.high = false;
            self.log.borrow_mut().push(Event::FrameLow).unwrap();
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    fn mocks(log: &Log) -> (MockPort<'_>, MockFrame<'_>) {
        (
            MockPort {
                log,
                incoming: 0,
                fail: false,
            },
            MockFrame { log, high: false },
        )
    }

    #[test]
    fn test_polarity_levels() {
        let low = FramePolarity::ActiveLow;
        assert_eq!(low.level(FrameSignal::Assert), Level::Low);
        assert_eq!(low.level(FrameSignal::Deassert), Level::High);

        let high = FramePolarity::from_inverted(true);
        assert_eq!(high, FramePolarity::ActiveHigh);
        assert_eq!(high.level(FrameSignal::Assert), Level::High);
        assert_eq!(high.level(FrameSignal::Deassert), Level::Low);
    }

    #[test]
    fn test_start_sequence() {
        let log = Log::default();
        let regs = SharedRegisters::new();
        regs.set_leds(0x5A);
        let (port, frame) = mocks(&log);

        let driver = BusDriver::start(
            port,
            frame,
            &SpiConfig::default(),
            FramePolarity::ActiveLow,
            &regs,
        )
        .unwrap();

        assert_eq!(
            log.borrow().as_slice(),
            &[
                Event::Configure,
                Event::FrameHigh,
                Event::Listen,
                Event::FrameLow,
                Event::Write(0x5A),
            ]
        );
        assert_eq!(driver.phase(), Phase::Buttons);
        assert!(driver.frame.is_set_low());
    }

    #[test]
    fn test_start_configure_failure() {
        let log = Log::default();
        let regs = SharedRegisters::new();
        let (mut port, frame) = mocks(&log);
        port.fail = true;

        let result = BusDriver::start(
            port,
            frame,
            &SpiConfig::default(),
            FramePolarity::ActiveLow,
            &regs,
        );

        assert!(result.is_err());
        // Nothing was driven or queued
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_interrupt_reads_before_write() {
        let log = Log::default();
        let regs = SharedRegisters::new();
        regs.set_frame([1, 2, 3, 4, 5]);
        let (mut port, frame) = mocks(&log);
        port.incoming = 0x33;

        let mut driver = BusDriver::start(
            port,
            frame,
            &SpiConfig::default(),
            FramePolarity::ActiveLow,
            &regs,
        )
        .unwrap();
        log.borrow_mut().clear();

        driver.on_transfer_complete(&regs);

        assert_eq!(log.borrow().as_slice(), &[Event::Read, Event::Write(1)]);
        assert_eq!(regs.buttons(), 0x33);
        assert_eq!(driver.phase(), Phase::Digit1);
    }

    #[test]
    fn test_frame_changes_precede_led_bytes() {
        let log = Log::default();
        let regs = SharedRegisters::new();
        regs.set_leds(0xC3);
        let (port, frame) = mocks(&log);

        let mut driver = BusDriver::start(
            port,
            frame,
            &SpiConfig::default(),
            FramePolarity::ActiveLow,
            &regs,
        )
        .unwrap();

        for _ in 0..5 {
            driver.on_transfer_complete(&regs);
        }
        log.borrow_mut().clear();

        driver.on_transfer_complete(&regs);
        driver.on_transfer_complete(&regs);

        assert_eq!(
            log.borrow().as_slice(),
            &[
                Event::Read,
                Event::FrameHigh,
                Event::Write(0xC3),
                Event::Read,
                Event::FrameLow,
                Event::Write(0xC3),
            ]
        );
        assert_eq!(driver.sweeps(), 1);
    }

    #[test]
    fn test_active_high_framing() {
        let log = Log::default();
        let regs = SharedRegisters::new();
        let (port, frame) = mocks(&log);

        let mut driver = BusDriver::start(
            port,
            frame,
            &SpiConfig::default(),
            FramePolarity::ActiveHigh,
            &regs,
        )
        .unwrap();
        assert!(driver.frame.is_set_high());

        for _ in 0..6 {
            driver.on_transfer_complete(&regs);
        }
        // End of sweep: deasserted, so low
        assert!(driver.frame.is_set_low());

        driver.on_transfer_complete(&regs);
        assert!(driver.frame.is_set_high());
    }

    #[test]
    fn test_release() {
        let log = Log::default();
        let regs = SharedRegisters::new();
        let (port, frame) = mocks(&log);

        let driver = BusDriver::start(
            port,
            frame,
            &SpiConfig::default(),
            FramePolarity::ActiveLow,
            &regs,
        )
        .unwrap();
        log.borrow_mut().clear();

        let (_port, frame) = driver.release();

        assert_eq!(
            log.borrow().as_slice(),
            &[Event::Unlisten, Event::FrameHigh]
        );
        assert!(frame.is_set_high());
    }

    proptest! {
        #[test]
        fn prop_every_sweep_repeats_the_same_wire_pattern(
            leds in any::<u8>(),
            digits in any::<[u8; 5]>(),
            inverted in any::<bool>(),
            sweeps in 1u32..=7,
        ) {
            let log = Log::default();
            let regs = SharedRegisters::new();
            regs.set_leds(leds);
            regs.set_frame(digits);
            let (port, frame) = mocks(&log);
            let polarity = FramePolarity::from_inverted(inverted);

            let mut driver = BusDriver::start(
                port,
                frame,
                &SpiConfig::default(),
                polarity,
                &regs,
            )
            .unwrap();
            log.borrow_mut().clear();

            for _ in 0..sweeps * 7 {
                driver.on_transfer_complete(&regs);
            }

            let (deassert, assert) = if inverted {
                (Event::FrameLow, Event::FrameHigh)
            } else {
                (Event::FrameHigh, Event::FrameLow)
            };
            let mut sweep: Vec<Event, 16> = Vec::new();
            for digit in digits {
                sweep.push(Event::Read).unwrap();
                sweep.push(Event::Write(digit)).unwrap();
            }
            for edge in [deassert, assert] {
                sweep.push(Event::Read).unwrap();
                sweep.push(edge).unwrap();
                sweep.push(Event::Write(leds)).unwrap();
            }

            let log = log.borrow();
            prop_assert_eq!(log.len(), sweep.len() * sweeps as usize);
            for chunk in log.chunks(sweep.len()) {
                prop_assert_eq!(chunk, sweep.as_slice());
            }
            prop_assert_eq!(driver.sweeps(), sweeps);
            prop_assert_eq!(driver.phase(), Phase::Buttons);
        }
    }
}
