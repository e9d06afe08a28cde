//! Two-digit countdown on seven-segment displays fed by BCD decoders.

use embedded_hal::delay::DelayNs;

use crate::port::OutputPort;

/// Hold time after a write so the decoders settle.
pub const SETTLE_MS: u32 = 5;

/// A count split into decimal digits.
///
/// Only meaningful for counts up to 99. Larger counts still produce a
/// pair, the tens digit just no longer fits a decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DigitPair {
    pub tens: u8,
    pub units: u8,
}

impl DigitPair {
    pub const fn from_count(count: u8) -> Self {
        Self {
            tens: count / 10,
            units: count % 10,
        }
    }

    /// Port value: tens on the high nibble, units on the low nibble.
    pub const fn bcd(self) -> u8 {
        (self.tens << 4) | (self.units & 0x0F)
    }

    pub const fn value(self) -> u16 {
        self.tens as u16 * 10 + self.units as u16
    }
}

pub struct DigitDisplay<C> {
    port: C,
}

impl<C: OutputPort> DigitDisplay<C> {
    pub fn new(port: C) -> Self {
        Self { port }
    }

    /// Show `count` and wait for the decoders.
    pub fn show(&mut self, count: u8, delay: &mut impl DelayNs) -> Result<DigitPair, C::Error> {
        let digits = DigitPair::from_count(count);
        self.port.write(digits.bcd())?;
        delay.delay_ms(SETTLE_MS);

        Ok(digits)
    }

    /// Blank both digits.
    pub fn blank(&mut self) -> Result<(), C::Error> {
        self.port.write(0x00)
    }

    pub fn release(self) -> C {
        self.port
    }
}
