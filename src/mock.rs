//! Test doubles for the embedded-hal traits and a model of the LCD controller.

use core::convert::Infallible;
use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use crate::lcd::Lcd;
use crate::port::OutputPort;

pub(crate) const RS: usize = 100;
pub(crate) const RW: usize = 101;
pub(crate) const EN: usize = 102;
pub(crate) const D4: usize = 103;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
    Pin { id: usize, level: bool },
    Port { id: usize, value: u8 },
    Delay { ns: u64 },
}

/// Everything every double did, in order.
#[derive(Default, Clone)]
pub(crate) struct Log(Rc<RefCell<Vec<Event>>>);

impl Log {
    fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub(crate) fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub(crate) fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub(crate) fn port_writes(&self, id: usize) -> Vec<u8> {
        self.0
            .borrow()
            .iter()
            .filter_map(|event| match *event {
                Event::Port { id: port, value } if port == id => Some(value),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn elapsed_ns(&self) -> u64 {
        self.0
            .borrow()
            .iter()
            .map(|event| match *event {
                Event::Delay { ns } => ns,
                _ => 0,
            })
            .sum()
    }
}

pub(crate) struct MockPin {
    id: usize,
    high: bool,
    log: Log,
}

impl MockPin {
    pub(crate) fn new(id: usize, log: &Log) -> Self {
        Self {
            id,
            high: false,
            log: log.clone(),
        }
    }

    pub(crate) fn is_high(&self) -> bool {
        self.high
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        self.log.push(Event::Pin {
            id: self.id,
            level: false,
        });
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        self.log.push(Event::Pin {
            id: self.id,
            level: true,
        });
        Ok(())
    }
}

pub(crate) struct MockPort {
    id: usize,
    log: Log,
}

impl MockPort {
    pub(crate) fn new(id: usize, log: &Log) -> Self {
        Self {
            id,
            log: log.clone(),
        }
    }
}

impl OutputPort for MockPort {
    type Error = Infallible;

    fn write(&mut self, value: u8) -> Result<(), Self::Error> {
        self.log.push(Event::Port { id: self.id, value });
        Ok(())
    }
}

/// Records delays instead of waiting for them.
pub(crate) struct VirtualClock {
    log: Log,
}

impl VirtualClock {
    pub(crate) fn new(log: &Log) -> Self {
        Self { log: log.clone() }
    }
}

impl DelayNs for VirtualClock {
    fn delay_ns(&mut self, ns: u32) {
        self.log.push(Event::Delay { ns: u64::from(ns) });
    }

    fn delay_us(&mut self, us: u32) {
        self.log.push(Event::Delay {
            ns: u64::from(us) * 1_000,
        });
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.push(Event::Delay {
            ns: u64::from(ms) * 1_000_000,
        });
    }
}

pub(crate) fn lcd(log: &Log) -> Lcd<MockPin> {
    Lcd::new(
        MockPin::new(RS, log),
        MockPin::new(RW, log),
        MockPin::new(EN, log),
        core::array::from_fn(|n| MockPin::new(D4 + n, log)),
    )
}

/// One nibble as latched on a falling strobe edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Latch {
    pub nibble: u8,
    pub rs: bool,
    pub rw: bool,
    /// Time the strobe was held high.
    pub pulse_ns: u64,
    /// Time from the falling edge to the next rising edge, or to the end of the log.
    pub settle_ns: u64,
}

/// A character LCD controller that only understands what the driver sends.
///
/// Nibbles are always paired into bytes; the 8-bit reset handshake is sent
/// as whole bytes by the driver, so pairing holds from the first strobe.
pub(crate) struct Hd44780 {
    pub latches: Vec<Latch>,
    pub ddram: [u8; 0x80],
    pub address: u8,
    pub function_set: Option<u8>,
    pub display_control: Option<u8>,
    pub entry_mode: Option<u8>,
}

impl Hd44780 {
    pub(crate) fn new() -> Self {
        Self {
            latches: Vec::new(),
            // Power-on RAM content is undefined.
            ddram: [b'#'; 0x80],
            address: 0,
            function_set: None,
            display_control: None,
            entry_mode: None,
        }
    }

    pub(crate) fn replay(events: &[Event]) -> Self {
        let mut lcd = Self::new();
        lcd.feed(events);
        lcd
    }

    pub(crate) fn feed(&mut self, events: &[Event]) {
        let mut levels = [false; 7];
        let mut strobe_ns = 0;
        let mut pending: Option<Latch> = None;
        let mut latches = Vec::new();

        for event in events {
            match *event {
                Event::Pin { id, level } if (RS..RS + 7).contains(&id) => {
                    let was = levels[id - RS];
                    levels[id - RS] = level;
                    if id != EN || was == level {
                        continue;
                    }
                    if level {
                        if let Some(latch) = pending.take() {
                            latches.push(latch);
                        }
                        strobe_ns = 0;
                    } else {
                        let nibble = (0..4).fold(0, |acc, bit| {
                            acc | (u8::from(levels[D4 - RS + bit]) << bit)
                        });
                        pending = Some(Latch {
                            nibble,
                            rs: levels[0],
                            rw: levels[1],
                            pulse_ns: strobe_ns,
                            settle_ns: 0,
                        });
                    }
                }
                Event::Delay { ns } => match pending.as_mut() {
                    Some(latch) => latch.settle_ns += ns,
                    None => strobe_ns += ns,
                },
                _ => {}
            }
        }
        latches.extend(pending);

        for pair in latches.chunks_exact(2) {
            let byte = (pair[0].nibble << 4) | pair[1].nibble;
            if pair[0].rs {
                self.write_data(byte);
            } else {
                self.execute(byte);
            }
        }
        self.latches.extend(latches);
    }

    fn execute(&mut self, instruction: u8) {
        if instruction & 0x80 != 0 {
            self.address = instruction & 0x7F;
        } else if instruction & 0x40 != 0 {
            // CGRAM is never used
        } else if instruction & 0x20 != 0 {
            self.function_set = Some(instruction);
        } else if instruction & 0x10 != 0 {
            // shift
        } else if instruction & 0x08 != 0 {
            self.display_control = Some(instruction);
        } else if instruction & 0x04 != 0 {
            self.entry_mode = Some(instruction);
        } else if instruction & 0x02 != 0 {
            self.address = 0;
        } else if instruction == 0x01 {
            self.ddram = [b' '; 0x80];
            self.address = 0;
        }
    }

    fn write_data(&mut self, byte: u8) {
        self.ddram[usize::from(self.address)] = byte;
        self.address = (self.address + 1) & 0x7F;
    }

    /// The 20 visible columns of `row`.
    pub(crate) fn row(&self, row: usize) -> String {
        let base = if row == 0 { 0x00 } else { 0x40 };
        self.ddram[base..base + 20].iter().map(|&b| b as char).collect()
    }
}
