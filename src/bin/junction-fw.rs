//! Runs the four-way signal fixture on an STM32F103VE board.
#![no_std]
#![no_main]

use defmt::info;
use embassy_executor::Spawner;
use {defmt_rtt as _, panic_probe as _};

use junction::board;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let config = board::create_stm32_config();
    let p = embassy_stm32::init(config);

    let mut sequencer = board::create_sequencer(p);

    // The cycle blocks on its own delays; nothing else runs on this core.
    info!("starting signal cycle");
    match sequencer.run() {
        Ok(never) => match never {},
        Err(err) => defmt::panic!("output failed: {}", defmt::Debug2Format(&err)),
    }
}
