//! Pin map and clock setup for the STM32F103VE controller board.
//!
//! | Output | Pins |
//! |---|---|
//! | lamps, lights 1 & 2 (road AB) | PA0..PA5 |
//! | lamps, lights 3 & 4 (road CD) | PE0..PE5 |
//! | BCD digits, units / tens | PC0..PC3 / PC4..PC7 |
//! | LCD RS, RW, E | PD0, PD1, PD2 |
//! | LCD D4..D7 | PD4..PD7 |

use embassy_stm32::gpio::{Level, Output, Pin, Speed};
use embassy_stm32::Peripherals;
use embassy_time::Delay;

use crate::{Fixture, Lcd, PinPort, Sequencer};

pub type Line = Output<'static>;
pub type LampPort = PinPort<Line, 6>;
pub type DigitPort = PinPort<Line, 8>;
pub type BoardSequencer = Sequencer<LampPort, LampPort, DigitPort, Line, Delay>;

pub fn create_stm32_config() -> embassy_stm32::Config {
    let mut config = embassy_stm32::Config::default();
    {
        use embassy_stm32::rcc::*;
        // 8 MHz HSI straight to SYSCLK, no PLL.
        config.rcc.hsi = true;
        config.rcc.sys = Sysclk::HSI;
        config.rcc.pll = None;

        config
    }
}

fn line(pin: impl Pin) -> Line {
    Output::new(pin.degrade(), Level::Low, Speed::Low)
}

/// Claim every fixture output, all driven low.
pub fn create_fixture(p: Peripherals) -> Fixture<LampPort, LampPort, DigitPort, Line> {
    let lamps_ab = PinPort::new([
        line(p.PA0),
        line(p.PA1),
        line(p.PA2),
        line(p.PA3),
        line(p.PA4),
        line(p.PA5),
    ]);
    let lamps_cd = PinPort::new([
        line(p.PE0),
        line(p.PE1),
        line(p.PE2),
        line(p.PE3),
        line(p.PE4),
        line(p.PE5),
    ]);
    let digits = PinPort::new([
        line(p.PC0),
        line(p.PC1),
        line(p.PC2),
        line(p.PC3),
        line(p.PC4),
        line(p.PC5),
        line(p.PC6),
        line(p.PC7),
    ]);
    let lcd = Lcd::new(
        line(p.PD0),
        line(p.PD1),
        line(p.PD2),
        [line(p.PD4), line(p.PD5), line(p.PD6), line(p.PD7)],
    );

    Fixture::new(lamps_ab, lamps_cd, digits, lcd)
}

pub fn create_sequencer(p: Peripherals) -> BoardSequencer {
    Sequencer::new(create_fixture(p), Delay)
}
