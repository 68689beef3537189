//! Wireless link supervision
//!
//! Checks the link on its own countdown timer, rejoins the configured
//! network when it drops and counts the drops for remote inspection.
//! A rejoin that itself fails backs the check interval off from one
//! minute to ten.

use cyw43::JoinOptions;
use defmt::{info, warn};
use embassy_net::Stack;
use embassy_time::Timer;
use portable_atomic::Ordering;

use crate::channels::{TIMERS, WIFI_DISCONNECTS};
use crate::secrets;

const CHECK_INTERVAL_MS: u32 = 60 * 1000;
const BACKOFF_INTERVAL_MS: u32 = 10 * 60 * 1000;

#[embassy_executor::task]
pub async fn link_task(mut control: cyw43::Control<'static>, stack: Stack<'static>) {
    info!("Link supervision started");

    loop {
        Timer::after_millis(250).await;
        if !TIMERS.link.is_due() {
            continue;
        }

        if stack.is_link_up() {
            TIMERS.link.rearm(CHECK_INTERVAL_MS);
            continue;
        }

        warn!("wireless link down, rejoining");
        WIFI_DISCONNECTS.fetch_add(1, Ordering::Relaxed);
        match control
            .join(
                secrets::WIFI_SSID,
                JoinOptions::new(secrets::WIFI_PASS.as_bytes()),
            )
            .await
        {
            Ok(()) => {
                info!("rejoined wireless network");
                TIMERS.link.rearm(CHECK_INTERVAL_MS);
            }
            Err(e) => {
                warn!("rejoin failed with status {}", e.status);
                TIMERS.link.rearm(BACKOFF_INTERVAL_MS);
            }
        }
    }
}
