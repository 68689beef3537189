//! Periodic time resynchronisation
//!
//! Pulls a reference time from the external time service and overwrites
//! the authoritative clock with it. Failures leave the clock untouched and
//! retry at the normal period; a remote command can force the timer to run
//! the sync on the next loop iteration.

use crate::config::ClockConfig;
use crate::logring::LogRing;
use crate::timer::TaskTimer;
use crate::traits::{TimeSource, WallClock};

#[derive(Debug, Default)]
pub struct TimeSync;

impl TimeSync {
    pub const fn new() -> Self {
        Self
    }

    pub fn poll<C, S>(
        &mut self,
        timer: &TaskTimer,
        rtc: &mut C,
        source: &mut S,
        log: &mut LogRing,
        cfg: &ClockConfig,
    ) where
        C: WallClock,
        S: TimeSource,
    {
        if !timer.is_due() {
            return;
        }

        match source.fetch() {
            Ok(time) => {
                if rtc.adjust(time).is_err() {
                    log.push(None, "clock adjust failed");
                } else {
                    log.push(Some(time), "clock adjusted from time service");
                }
            }
            Err(_) => {
                log.push(None, "time service unreachable");
            }
        }
        // Same period after success and failure.
        timer.rearm(cfg.sync_period_ms);
    }
}
