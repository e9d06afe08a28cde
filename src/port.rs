//! Byte-wide output ports.
//!
//! The fixture drives its lamps and its seven-segment decoders through
//! 8-bit ports. Most MCUs hand out pins one at a time, so a port is built
//! from an array of pins where bit `n` of the written value drives pin `n`.

use embedded_hal::digital::{OutputPin, PinState};

/// An 8-bit output sink.
pub trait OutputPort {
    type Error;

    /// Assert `value` on the port, bit `n` on line `n`.
    fn write(&mut self, value: u8) -> Result<(), Self::Error>;
}

impl<T: OutputPort + ?Sized> OutputPort for &mut T {
    type Error = T::Error;

    fn write(&mut self, value: u8) -> Result<(), Self::Error> {
        T::write(self, value)
    }
}

/// A port made of `N` discrete pins. Bits at or above `N` are dropped.
pub struct PinPort<P, const N: usize> {
    pins: [P; N],
    value: u8,
}

impl<P: OutputPin, const N: usize> PinPort<P, N> {
    pub fn new(pins: [P; N]) -> Self {
        Self { pins, value: 0 }
    }

    /// Last value written, masked to the lines that exist.
    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn release(self) -> [P; N] {
        self.pins
    }
}

impl<P: OutputPin, const N: usize> OutputPort for PinPort<P, N> {
    type Error = P::Error;

    fn write(&mut self, value: u8) -> Result<(), Self::Error> {
        let mut written = 0;
        for (bit, pin) in self.pins.iter_mut().enumerate().take(8) {
            let high = value & (1 << bit) != 0;
            pin.set_state(PinState::from(high))?;
            if high {
                written |= 1 << bit;
            }
        }
        self.value = written;

        Ok(())
    }
}
