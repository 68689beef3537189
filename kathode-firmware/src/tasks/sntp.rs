//! SNTP reference time
//!
//! The dispatcher's time-sync handler runs in a non-async context, so the
//! network exchange lives here. [`SntpSource`] is the bridge: a fetch
//! either takes a result this task already produced, or files a request
//! and reports the time unavailable. When the exchange completes, the
//! sync timer is forced so the fresh result is applied on the next loop
//! iteration instead of waiting out the full period.

use defmt::{info, warn};
use embassy_net::dns::DnsQueryType;
use embassy_net::udp::{PacketMetadata, UdpSocket};
use embassy_net::Stack;
use embassy_time::{with_timeout, Duration};

use kathode_core::clock::ClockTime;
use kathode_core::traits::{TimeSource, TimeUnavailable};

use crate::channels::{NTP_REQUEST, NTP_RESULT, TIMERS};
use crate::secrets;

const NTP_SERVER: &str = "pool.ntp.org";
const NTP_PORT: u16 = 123;
const REPLY_WAIT: Duration = Duration::from_secs(5);

/// Seconds between the NTP epoch (1900) and the Unix epoch (1970).
const NTP_TO_UNIX_OFFSET: i64 = 2_208_988_800;

/// Mailbox-backed time source handed to the dispatcher.
pub struct SntpSource;

impl TimeSource for SntpSource {
    fn fetch(&mut self) -> Result<ClockTime, TimeUnavailable> {
        if let Some(time) = NTP_RESULT.try_take() {
            return Ok(time);
        }
        NTP_REQUEST.signal(());
        Err(TimeUnavailable)
    }
}

#[embassy_executor::task]
pub async fn sntp_task(stack: Stack<'static>) {
    info!("SNTP task started");

    loop {
        NTP_REQUEST.wait().await;

        match fetch_unix_time(stack).await {
            Ok(unix_secs) => {
                let local = unix_secs + secrets::GMT_OFFSET_SECS + secrets::DST_OFFSET_SECS;
                let time = ClockTime::from_unix(local);
                info!(
                    "SNTP time {:02}:{:02}:{:02}",
                    time.hour, time.minute, time.second
                );
                NTP_RESULT.signal(time);
                // Apply it now rather than a sync period from now.
                TIMERS.time_sync.force();
            }
            Err(e) => warn!("SNTP fetch failed: {}", e),
        }
    }
}

async fn fetch_unix_time(stack: Stack<'static>) -> Result<i64, &'static str> {
    let addrs = stack
        .dns_query(NTP_SERVER, DnsQueryType::A)
        .await
        .map_err(|_| "DNS lookup failed")?;
    let server = *addrs.first().ok_or("no DNS results")?;

    let mut rx_meta = [PacketMetadata::EMPTY; 1];
    let mut rx_buffer = [0u8; 128];
    let mut tx_meta = [PacketMetadata::EMPTY; 1];
    let mut tx_buffer = [0u8; 128];
    let mut socket = UdpSocket::new(
        stack,
        &mut rx_meta,
        &mut rx_buffer,
        &mut tx_meta,
        &mut tx_buffer,
    );
    socket.bind(0).map_err(|_| "socket bind failed")?;

    // 48-byte request: LI=0, VN=3, mode 3 (client).
    let mut request = [0u8; 48];
    request[0] = 0x1B;
    socket
        .send_to(&request, (server, NTP_PORT))
        .await
        .map_err(|_| "send failed")?;

    let mut response = [0u8; 48];
    let (n, _) = with_timeout(REPLY_WAIT, socket.recv_from(&mut response))
        .await
        .map_err(|_| "receive timeout")?
        .map_err(|_| "receive failed")?;
    if n < 48 {
        return Err("response too short");
    }

    // Transmit timestamp, seconds field (bytes 40..44, big-endian).
    let ntp_secs = u32::from_be_bytes([response[40], response[41], response[42], response[43]]);
    Ok(ntp_secs as i64 - NTP_TO_UNIX_OFFSET)
}
