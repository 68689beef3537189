//! Inter-task communication channels
//!
//! Static embassy-sync primitives shared between the tick, controller,
//! server and network tasks, plus the countdown timer bank the tick task
//! decrements.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use heapless::String;
use portable_atomic::AtomicU32;

use kathode_core::clock::ClockTime;
use kathode_core::timer::TimerBank;
use kathode_protocol::Reply;

/// Longest request line the server will buffer.
pub const REQUEST_LINE_LEN: usize = 128;

/// What the command server hands to the controller.
pub enum ServerEvent {
    /// First request line of an accepted connection.
    Request(String<REQUEST_LINE_LEN>),
    /// A client connected but never became readable within the bounded
    /// wait; logged and dropped.
    Timeout,
}

/// Countdown timers, decremented by the tick task every millisecond.
pub static TIMERS: TimerBank = TimerBank::new();

/// Request lines from the command server to the controller.
pub static SERVER_EVENTS: Channel<CriticalSectionRawMutex, ServerEvent, 4> = Channel::new();

/// Reply body for the request the server is currently holding open.
pub static REPLY: Signal<CriticalSectionRawMutex, Reply> = Signal::new();

/// Controller asks the SNTP task for a fresh reference time.
pub static NTP_REQUEST: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Reference time produced by the SNTP task, already in local time.
pub static NTP_RESULT: Signal<CriticalSectionRawMutex, ClockTime> = Signal::new();

/// A remote `update` request arrived; reboot into the USB bootloader.
pub static UPDATE_REQUEST: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Wireless reconnect counter, exposed read-only as `wifiDisconnects`.
pub static WIFI_DISCONNECTS: AtomicU32 = AtomicU32::new(0);
