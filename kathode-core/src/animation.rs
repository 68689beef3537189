//! Digit-cycling readout animation
//!
//! The tubes are dark most of the time. When the animation timer fires,
//! the engine starts a readout: both tubes cycle through the full digit
//! wheel and come to rest on the target pair. Hour and minute readouts
//! alternate; the hour makes a long run (a full second of spinning) and
//! the minute a short one, then the display goes dark again until the
//! next readout is due.

use crate::clock::ClockTime;
use crate::config::ClockConfig;
use crate::logring::LogRing;
use crate::timer::TaskTimer;
use crate::traits::{DigitDisplay, WallClock};

/// Retry interval when the clock cannot be read at the start of a readout.
const CLOCK_RETRY_MS: u32 = 250;

/// Sub-cycles in an hour readout. 100 steps at the refresh interval keeps
/// the tubes spinning for well over a second before settling.
const HOUR_CYCLES: i16 = 100;

/// Sub-cycles in a minute readout: one full digit wheel.
const MINUTE_CYCLES: i16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Tubes dark, waiting for the next readout.
    Idle,
    /// Mid-readout, stepping digits every refresh interval.
    Cycling,
}

/// State machine for one readout at a time.
///
/// `poll` is non-blocking: each call does at most one digit step or one
/// readout start, then rearms its timer and returns.
#[derive(Debug)]
pub struct AnimationEngine {
    phase: Phase,
    tens: u8,
    ones: u8,
    cycles_left: i16,
    showing_hour: bool,
}

impl AnimationEngine {
    pub const fn new() -> Self {
        Self {
            phase: Phase::Idle,
            tens: 0,
            ones: 0,
            cycles_left: 0,
            showing_hour: true,
        }
    }

    /// True while a readout is in progress. The dispatcher holds back the
    /// other tasks while this is set so digit steps stay evenly spaced.
    pub fn is_cycling(&self) -> bool {
        self.phase == Phase::Cycling
    }

    pub fn poll<D, C>(
        &mut self,
        timer: &TaskTimer,
        display: &mut D,
        rtc: &mut C,
        log: &mut LogRing,
        cfg: &ClockConfig,
    ) where
        D: DigitDisplay,
        C: WallClock,
    {
        if !timer.is_due() {
            return;
        }
        match self.phase {
            Phase::Cycling => self.step(timer, display, rtc, log, cfg),
            Phase::Idle => self.begin(timer, rtc, log, cfg),
        }
    }

    /// One sub-cycle: show the current pair, then advance. The target pair
    /// is written first and last, so the readout both starts and ends on
    /// the value being shown.
    fn step<D, C>(
        &mut self,
        timer: &TaskTimer,
        display: &mut D,
        rtc: &mut C,
        log: &mut LogRing,
        cfg: &ClockConfig,
    ) where
        D: DigitDisplay,
        C: WallClock,
    {
        if display.write(self.tens, self.ones).is_err() {
            log.push(None, "tube write failed");
        }
        self.tens = (self.tens + 1) % 10;
        self.ones = (self.ones + 1) % 10;
        self.cycles_left -= 1;

        if self.cycles_left >= 0 {
            timer.rearm(cfg.refresh_ms);
            return;
        }

        // Readout finished on the target pair.
        self.phase = Phase::Idle;
        let delay_ms = if self.showing_hour {
            // Short hold before the minute readout follows.
            cfg.hour_pause_ms
        } else {
            // Wait until the next round second boundary so consecutive
            // time readouts land on even instants.
            let secs = match rtc.now() {
                Ok(t) => round_up_to_multiple(t.second, cfg.secs_multiple),
                Err(_) => {
                    log.push(None, "clock read failed after readout");
                    cfg.secs_multiple
                }
            };
            secs as u32 * 1_000
        };
        self.showing_hour = !self.showing_hour;
        timer.rearm(delay_ms);
    }

    /// Start a readout: read the clock, set the target pair and the cycle
    /// count, enter the cycling phase.
    fn begin<C>(&mut self, timer: &TaskTimer, rtc: &mut C, log: &mut LogRing, cfg: &ClockConfig)
    where
        C: WallClock,
    {
        let now = match rtc.now() {
            Ok(t) => t,
            Err(_) => {
                log.push(None, "clock read failed, readout delayed");
                timer.rearm(CLOCK_RETRY_MS);
                return;
            }
        };

        let (value, cycles) = if self.showing_hour {
            (now.display_hour(), HOUR_CYCLES)
        } else {
            (now.minute, MINUTE_CYCLES)
        };
        self.tens = value / 10;
        self.ones = value % 10;
        self.cycles_left = cycles;
        self.phase = Phase::Cycling;
        timer.rearm(cfg.refresh_ms);
    }
}

impl Default for AnimationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Distance from `value` up to the next multiple of `multiple`, never zero.
/// A value already on a multiple waits a full period.
pub fn round_up_to_multiple(value: u8, multiple: u8) -> u8 {
    ((value / multiple) + 1) * multiple - value
}
