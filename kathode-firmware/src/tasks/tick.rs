//! 1 ms tick task
//!
//! The only writer side of the countdown timers: decrements every counter
//! in the bank once per millisecond and does nothing else.

use defmt::info;
use embassy_time::{Duration, Ticker};

use crate::channels::TIMERS;

#[embassy_executor::task]
pub async fn tick_task() {
    info!("Tick task started");

    let mut ticker = Ticker::every(Duration::from_millis(1));
    loop {
        ticker.next().await;
        TIMERS.tick();
    }
}
