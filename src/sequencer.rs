//! The four-phase signal cycle.
//!
//! Each phase counts down from its length, one tick per second. Every tick
//! re-applies the lamps and the captions, shows the remaining count and
//! waits. When the count runs out the LCD is cleared, the fixture pauses
//! for a second and the next phase starts. Nothing ever interrupts this.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::{DigitDisplay, DigitPair, Error, Lcd, OutputPort, Phase, SignalPattern};

/// Length of one countdown step.
pub const TICK_MS: u32 = 1000;
/// Pause on a blank LCD between two phases.
pub const PHASE_PAUSE_MS: u32 = 1000;

/// Every output of the fixture.
pub struct Fixture<A, B, C, P> {
    lamps_ab: A,
    lamps_cd: B,
    digits: DigitDisplay<C>,
    lcd: Lcd<P>,
}

impl<A, B, C, P, E> Fixture<A, B, C, P>
where
    A: OutputPort<Error = E>,
    B: OutputPort<Error = E>,
    C: OutputPort<Error = E>,
    P: OutputPin<Error = E>,
{
    pub fn new(lamps_ab: A, lamps_cd: B, digits: C, lcd: Lcd<P>) -> Self {
        Self {
            lamps_ab,
            lamps_cd,
            digits: DigitDisplay::new(digits),
            lcd,
        }
    }

    fn set_lamps(&mut self, pattern: SignalPattern) -> Result<(), Error<E>> {
        self.lamps_ab.write(pattern.ab).map_err(Error::Lamps)?;
        self.lamps_cd.write(pattern.cd).map_err(Error::Lamps)
    }

    /// All lamps dark, digits blank, LCD bus idle.
    pub fn darken(&mut self) -> Result<(), Error<E>> {
        self.set_lamps(SignalPattern::DARK)?;
        self.digits.blank().map_err(Error::Digits)?;
        self.lcd.idle().map_err(Error::Display)
    }

    /// Drive the lamps for `phase` and draw its captions.
    pub fn apply(&mut self, phase: Phase, delay: &mut impl DelayNs) -> Result<(), Error<E>> {
        self.set_lamps(phase.pattern())?;
        for caption in phase.captions() {
            self.lcd
                .set_cursor(caption.cell, delay)
                .map_err(Error::Display)?;
            self.lcd
                .write_str(caption.text, delay)
                .map_err(Error::Display)?;
        }

        Ok(())
    }

    pub fn release(self) -> (A, B, C, Lcd<P>) {
        (self.lamps_ab, self.lamps_cd, self.digits.release(), self.lcd)
    }
}

pub struct Sequencer<A, B, C, P, D> {
    fixture: Fixture<A, B, C, P>,
    delay: D,
    phase: Phase,
    remaining: u8,
}

impl<A, B, C, P, D, E> Sequencer<A, B, C, P, D>
where
    A: OutputPort<Error = E>,
    B: OutputPort<Error = E>,
    C: OutputPort<Error = E>,
    P: OutputPin<Error = E>,
    D: DelayNs,
{
    pub fn new(fixture: Fixture<A, B, C, P>, delay: D) -> Self {
        let phase = Phase::default();
        Self {
            fixture,
            delay,
            phase,
            remaining: phase.countdown(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Ticks left in the current phase, never 0 between ticks.
    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    /// Power-on: every output to idle, then bring up the LCD.
    pub fn start(&mut self) -> Result<(), Error<E>> {
        self.fixture.darken()?;
        self.fixture
            .lcd
            .initialize(&mut self.delay)
            .map_err(Error::Display)?;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "fixture up, phase {} for {} ticks",
            self.phase,
            self.remaining
        );

        Ok(())
    }

    /// One countdown step. Returns the digits that were shown.
    pub fn tick(&mut self) -> Result<DigitPair, Error<E>> {
        self.fixture.apply(self.phase, &mut self.delay)?;
        let shown = self
            .fixture
            .digits
            .show(self.remaining, &mut self.delay)
            .map_err(Error::Digits)?;
        self.delay.delay_ms(TICK_MS);

        self.remaining -= 1;
        if self.remaining == 0 {
            self.advance()?;
        }

        Ok(shown)
    }

    fn advance(&mut self) -> Result<(), Error<E>> {
        self.fixture
            .lcd
            .clear(&mut self.delay)
            .map_err(Error::Display)?;
        self.delay.delay_ms(PHASE_PAUSE_MS);

        self.phase.rotate();
        self.remaining = self.phase.countdown();

        #[cfg(feature = "defmt")]
        defmt::info!("phase {} for {} ticks", self.phase, self.remaining);

        Ok(())
    }

    /// Start the fixture and cycle forever. Only returns if an output fails.
    pub fn run(&mut self) -> Result<Infallible, Error<E>> {
        self.start()?;
        loop {
            self.tick()?;
        }
    }

    pub fn release(self) -> (Fixture<A, B, C, P>, D) {
        (self.fixture, self.delay)
    }
}
