//! Day/night brightness scheduling
//!
//! Each run classifies the current minute of day against the two
//! boundaries, applies the level for that period, and rearms for one
//! second per minute remaining until the opposite boundary. The distances
//! are re-derived from the clock on every wake, so the schedule
//! self-corrects after a time resync. With the display switched off it
//! applies level 0 and parks the timer until a command forces it.

use crate::config::ClockConfig;
use crate::logring::LogRing;
use crate::timer::TaskTimer;
use crate::traits::{BrightnessOutput, WallClock};

const MINS_PER_DAY: u16 = 24 * 60;

/// Which period a minute of day falls in, and how far the boundaries are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DayNight {
    pub is_night: bool,
    /// Whole minutes until the day boundary, 0 when standing on it.
    pub mins_to_day: u16,
    /// Whole minutes until the night boundary, 0 when standing on it.
    pub mins_to_night: u16,
}

impl DayNight {
    /// Minutes until the period changes: the distance to the opposite
    /// boundary from the one just crossed.
    pub fn mins_to_flip(&self) -> u16 {
        if self.is_night {
            self.mins_to_day
        } else {
            self.mins_to_night
        }
    }
}

/// Classify a minute of day against the two period boundaries.
///
/// A boundary instant belongs to the period it starts: at `day_start` the
/// clock is in day mode, at `night_start` in night mode.
pub fn classify(cur: u16, day_start: u16, night_start: u16) -> DayNight {
    let mins_to_day = (day_start + MINS_PER_DAY - cur) % MINS_PER_DAY;
    let mins_to_night = (night_start + MINS_PER_DAY - cur) % MINS_PER_DAY;
    // Night whenever the day boundary is the nearer one ahead, unless we
    // are standing on it.
    let is_night = mins_to_day != 0 && (mins_to_night == 0 || mins_to_day < mins_to_night);
    DayNight {
        is_night,
        mins_to_day,
        mins_to_night,
    }
}

/// Tracks the active period and pushes level changes to the dimmer.
#[derive(Debug)]
pub struct BrightnessScheduler {
    is_night: bool,
    level: u8,
    day_level: u8,
    night_level: u8,
    display_on: bool,
}

impl BrightnessScheduler {
    pub fn new(cfg: &ClockConfig) -> Self {
        Self {
            is_night: false,
            level: cfg.day_level,
            day_level: cfg.day_level,
            night_level: cfg.night_level,
            display_on: true,
        }
    }

    pub fn is_night(&self) -> bool {
        self.is_night
    }

    /// The level currently driving the tubes; 0 while the display is off.
    pub fn level(&self) -> u8 {
        if self.display_on {
            self.level
        } else {
            0
        }
    }

    pub fn day_level(&self) -> u8 {
        self.day_level
    }

    pub fn night_level(&self) -> u8 {
        self.night_level
    }

    pub fn display_on(&self) -> bool {
        self.display_on
    }

    pub fn set_display_on(&mut self, on: bool) {
        self.display_on = on;
    }

    /// Overwrite the level of whichever period is active right now.
    pub fn set_active_level(&mut self, percent: u8) {
        if self.is_night {
            self.night_level = percent;
        } else {
            self.day_level = percent;
        }
        self.level = percent;
    }

    pub fn poll<B, C>(
        &mut self,
        timer: &TaskTimer,
        out: &mut B,
        rtc: &mut C,
        log: &mut LogRing,
        cfg: &ClockConfig,
    ) where
        B: BrightnessOutput,
        C: WallClock,
    {
        if !timer.is_due() {
            return;
        }

        if !self.display_on {
            out.set_level(0);
            // Parked until a display or brightness command forces it.
            timer.rearm(u32::MAX);
            return;
        }

        let now = match rtc.now() {
            Ok(t) => t,
            Err(_) => {
                log.push(None, "clock read failed, brightness unchanged");
                timer.rearm(60_000);
                return;
            }
        };

        let period = classify(now.minute_of_day(), cfg.day_start_min, cfg.night_start_min);
        self.is_night = period.is_night;
        self.level = if period.is_night {
            self.night_level
        } else {
            self.day_level
        };
        out.set_level(self.level);

        // One second per minute remaining until the opposite boundary.
        // The floor keeps a wake standing on a boundary from respinning.
        let delay_s = period.mins_to_flip().max(1) as u32;
        timer.rearm(delay_s * 1_000);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ClockTime;

    struct RecordingDimmer {
        levels: heapless::Vec<u8, 16>,
    }

    impl RecordingDimmer {
        fn new() -> Self {
            Self {
                levels: heapless::Vec::new(),
            }
        }
    }

    impl BrightnessOutput for RecordingDimmer {
        fn set_level(&mut self, percent: u8) {
            let _ = self.levels.push(percent);
        }
    }

    struct FixedClock(Result<ClockTime, ()>);

    impl WallClock for FixedClock {
        type Error = ();

        fn now(&mut self) -> Result<ClockTime, ()> {
            self.0
        }

        fn adjust(&mut self, _time: ClockTime) -> Result<(), ()> {
            Ok(())
        }
    }

    const DAY: u16 = 6 * 60;
    const NIGHT: u16 = 21 * 60;

    #[test]
    fn classify_whole_day_is_consistent() {
        for cur in 0..MINS_PER_DAY {
            let p = classify(cur, DAY, NIGHT);
            let expect_night = !(DAY..NIGHT).contains(&cur);
            assert_eq!(p.is_night, expect_night, "minute {}", cur);
            // Flip delay lands exactly on the opposite boundary.
            let flip = (cur + p.mins_to_flip()) % MINS_PER_DAY;
            assert_eq!(flip, if p.is_night { DAY } else { NIGHT }, "minute {}", cur);
        }
    }

    #[test]
    fn boundary_instants_belong_to_the_new_period() {
        assert!(!classify(DAY, DAY, NIGHT).is_night);
        assert!(classify(NIGHT, DAY, NIGHT).is_night);
        assert!(classify(DAY - 1, DAY, NIGHT).is_night);
        assert!(!classify(NIGHT - 1, DAY, NIGHT).is_night);
        // Standing on a boundary waits a full cycle, never zero.
        assert_eq!(classify(DAY, DAY, NIGHT).mins_to_flip(), NIGHT - DAY);
        assert_eq!(
            classify(NIGHT, DAY, NIGHT).mins_to_flip(),
            MINS_PER_DAY - (NIGHT - DAY)
        );
    }

    #[test]
    fn afternoon_applies_day_level_and_sleeps_to_night() {
        // 14:07 -> day, 413 minutes short of 21:00.
        let cfg = ClockConfig::default();
        let timer = TaskTimer::new(0);
        let mut sched = BrightnessScheduler::new(&cfg);
        let mut dimmer = RecordingDimmer::new();
        let mut rtc = FixedClock(Ok(ClockTime::new(2024, 6, 1, 14, 7, 30)));
        let mut log = LogRing::new();

        timer.tick();
        sched.poll(&timer, &mut dimmer, &mut rtc, &mut log, &cfg);
        assert!(!sched.is_night());
        assert_eq!(dimmer.levels.as_slice(), &[100]);
        assert_eq!(timer.remaining_ms(), 413_000);
    }

    #[test]
    fn night_applies_night_level() {
        let cfg = ClockConfig::default();
        let timer = TaskTimer::new(0);
        let mut sched = BrightnessScheduler::new(&cfg);
        let mut dimmer = RecordingDimmer::new();
        // 23:30 -> night, 390 minutes short of 06:00 the next morning.
        let mut rtc = FixedClock(Ok(ClockTime::new(2024, 6, 1, 23, 30, 0)));
        let mut log = LogRing::new();

        timer.tick();
        sched.poll(&timer, &mut dimmer, &mut rtc, &mut log, &cfg);
        assert!(sched.is_night());
        assert_eq!(dimmer.levels.as_slice(), &[cfg.night_level]);
        assert_eq!(timer.remaining_ms(), 390_000);
    }

    #[test]
    fn display_off_forces_dark_and_parks_the_timer() {
        let cfg = ClockConfig::default();
        let timer = TaskTimer::new(0);
        let mut sched = BrightnessScheduler::new(&cfg);
        let mut dimmer = RecordingDimmer::new();
        let mut rtc = FixedClock(Ok(ClockTime::new(2024, 6, 1, 14, 7, 30)));
        let mut log = LogRing::new();

        sched.set_display_on(false);
        timer.tick();
        sched.poll(&timer, &mut dimmer, &mut rtc, &mut log, &cfg);
        assert_eq!(dimmer.levels.as_slice(), &[0]);
        assert_eq!(sched.level(), 0);
        assert_eq!(timer.remaining_ms(), i32::MAX);
    }

    #[test]
    fn active_level_override_tracks_the_period() {
        let cfg = ClockConfig::default();
        let mut sched = BrightnessScheduler::new(&cfg);
        sched.set_active_level(37);
        assert_eq!(sched.day_level(), 37);
        assert_eq!(sched.night_level(), cfg.night_level);

        sched.is_night = true;
        sched.set_active_level(5);
        assert_eq!(sched.night_level(), 5);
        assert_eq!(sched.day_level(), 37);
    }

    #[test]
    fn clock_failure_retries_in_a_minute() {
        let cfg = ClockConfig::default();
        let timer = TaskTimer::new(0);
        let mut sched = BrightnessScheduler::new(&cfg);
        let mut dimmer = RecordingDimmer::new();
        let mut rtc = FixedClock(Err(()));
        let mut log = LogRing::new();

        timer.tick();
        sched.poll(&timer, &mut dimmer, &mut rtc, &mut log, &cfg);
        assert!(dimmer.levels.is_empty());
        assert_eq!(timer.remaining_ms(), 60_000);
        assert!(log.line(0).contains("clock read failed"));
    }
}
