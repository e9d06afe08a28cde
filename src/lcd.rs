//! Write-only driver for an HD44780-compatible character LCD on a 4-bit bus.
//!
//! Every byte goes out as two nibbles, high nibble first. A nibble is put on
//! D4..D7 and latched by pulsing E high for [`STROBE_PULSE_US`]; the bus is
//! then left alone for [`SETTLE_US`]. RW is held low throughout and the busy
//! flag is never read, so the driver relies entirely on these delays.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

/// Wait after power is applied before the first instruction.
pub const POWER_ON_SETTLE_MS: u32 = 15;
/// Width of the E pulse latching a nibble.
pub const STROBE_PULSE_US: u32 = 1;
/// Quiet time after each nibble.
pub const SETTLE_US: u32 = 200;
/// Extra wait after the clear instruction that ends the bring-up sequence.
pub const CLEAR_SETTLE_MS: u32 = 2;

/// DDRAM address of the first column of the second line.
const SECOND_ROW_BASE: u8 = 0x40;

/// The controller instructions this fixture uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// First half of the reset handshake (two 8-bit function sets).
    Reset8Bit,
    /// Second half of the reset handshake, leaves the bus in 4-bit mode.
    Enter4Bit,
    /// 4-bit bus, two lines, 5x8 font.
    FunctionSet4BitTwoLine,
    DisplayOnCursorOff,
    /// Cursor moves right after each character, no display shift.
    EntryModeIncrement,
    ClearDisplay,
    /// Move the cursor to a DDRAM address (7 bits).
    SetDdramAddress(u8),
}

impl Command {
    /// The full bring-up sequence, in order.
    pub const INIT_SEQUENCE: [Command; 6] = [
        Command::Reset8Bit,
        Command::Enter4Bit,
        Command::FunctionSet4BitTwoLine,
        Command::DisplayOnCursorOff,
        Command::EntryModeIncrement,
        Command::ClearDisplay,
    ];

    pub const fn byte(self) -> u8 {
        match self {
            Self::Reset8Bit => 0x33,
            Self::Enter4Bit => 0x32,
            Self::FunctionSet4BitTwoLine => 0x28,
            Self::DisplayOnCursorOff => 0x0C,
            Self::EntryModeIncrement => 0x06,
            Self::ClearDisplay => 0x01,
            Self::SetDdramAddress(address) => 0x80 | (address & 0x7F),
        }
    }
}

impl From<Command> for u8 {
    fn from(command: Command) -> Self {
        command.byte()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Row {
    First,
    Second,
}

/// A character position on the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayCell {
    pub column: u8,
    pub row: Row,
}

impl DisplayCell {
    pub const fn new(column: u8, row: Row) -> Self {
        Self { column, row }
    }

    pub const fn ddram_address(self) -> u8 {
        match self.row {
            Row::First => self.column,
            Row::Second => SECOND_ROW_BASE + self.column,
        }
    }
}

/// Register select: instruction or character data.
#[derive(Clone, Copy)]
enum Register {
    Instruction,
    Data,
}

pub struct Lcd<P> {
    rs: P,
    rw: P,
    en: P,
    /// D4..D7, in that order.
    data: [P; 4],
}

impl<P: OutputPin> Lcd<P> {
    pub fn new(rs: P, rw: P, en: P, data: [P; 4]) -> Self {
        Self { rs, rw, en, data }
    }

    /// Drive every bus line low.
    pub fn idle(&mut self) -> Result<(), P::Error> {
        self.rs.set_low()?;
        self.rw.set_low()?;
        self.en.set_low()?;
        for line in &mut self.data {
            line.set_low()?;
        }

        Ok(())
    }

    /// Run the power-on bring-up sequence. Call once, from cold, before
    /// anything else.
    pub fn initialize(&mut self, delay: &mut impl DelayNs) -> Result<(), P::Error> {
        delay.delay_ms(POWER_ON_SETTLE_MS);
        for command in Command::INIT_SEQUENCE {
            self.send_command(command, delay)?;
        }
        delay.delay_ms(CLEAR_SETTLE_MS);

        #[cfg(feature = "defmt")]
        defmt::debug!("lcd ready");

        Ok(())
    }

    /// Send an instruction. Accepts a [`Command`] or a raw instruction byte.
    pub fn send_command(
        &mut self,
        command: impl Into<u8>,
        delay: &mut impl DelayNs,
    ) -> Result<(), P::Error> {
        self.send(command.into(), Register::Instruction, delay)
    }

    /// Write one character at the cursor; the cursor then advances.
    pub fn send_data(&mut self, byte: u8, delay: &mut impl DelayNs) -> Result<(), P::Error> {
        self.send(byte, Register::Data, delay)
    }

    /// Clear the display. The caller owns any wait that has to follow.
    pub fn clear(&mut self, delay: &mut impl DelayNs) -> Result<(), P::Error> {
        self.send_command(Command::ClearDisplay, delay)
    }

    pub fn set_cursor(&mut self, cell: DisplayCell, delay: &mut impl DelayNs) -> Result<(), P::Error> {
        self.send_command(Command::SetDdramAddress(cell.ddram_address()), delay)
    }

    /// Write `text` byte by byte from the cursor. Nothing wraps.
    pub fn write_str(&mut self, text: &str, delay: &mut impl DelayNs) -> Result<(), P::Error> {
        for byte in text.bytes() {
            self.send_data(byte, delay)?;
        }

        Ok(())
    }

    pub fn release(self) -> (P, P, P, [P; 4]) {
        (self.rs, self.rw, self.en, self.data)
    }

    fn send(&mut self, byte: u8, register: Register, delay: &mut impl DelayNs) -> Result<(), P::Error> {
        self.rs.set_state(match register {
            Register::Instruction => PinState::Low,
            Register::Data => PinState::High,
        })?;
        self.rw.set_low()?;

        self.write_nibble(byte >> 4, delay)?;
        self.write_nibble(byte & 0x0F, delay)
    }

    fn write_nibble(&mut self, nibble: u8, delay: &mut impl DelayNs) -> Result<(), P::Error> {
        for (bit, line) in self.data.iter_mut().enumerate() {
            line.set_state(PinState::from(nibble & (1 << bit) != 0))?;
        }

        self.en.set_high()?;
        delay.delay_us(STROBE_PULSE_US);
        self.en.set_low()?;
        delay.delay_us(SETTLE_US);

        Ok(())
    }
}
