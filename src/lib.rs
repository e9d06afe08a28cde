//! Firmware library for a four-way signal fixture: two groups of traffic
//! lights, a two-digit seven-segment countdown and a 2-line character LCD.
#![cfg_attr(not(test), no_std)]

mod digits;
pub use digits::*;
mod error;
pub use error::*;
mod lcd;
pub use lcd::*;
mod port;
pub use port::*;
mod sequencer;
pub use sequencer::*;
mod signal;
pub use signal::*;

#[cfg(feature = "board")]
pub mod board;

#[cfg(test)]
mod mock;
