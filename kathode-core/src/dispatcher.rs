//! Non-blocking poll loop over the four periodic tasks
//!
//! The dispatcher owns all task state and the hardware handles, and is
//! polled from the single control-loop context. Each `poll` checks the
//! shared timer bank and runs whichever handlers are due, with one
//! explicit exclusion: while a readout animation is mid-cycle, the time
//! sync and brightness handlers are held back even if due. Their timers
//! stay negative, so they fire on the first iteration after the animation
//! settles.

use kathode_protocol::{Command, Snapshot, Status};

use crate::animation::AnimationEngine;
use crate::brightness::BrightnessScheduler;
use crate::config::ClockConfig;
use crate::logring::LogRing;
use crate::sync::TimeSync;
use crate::timer::TimerBank;
use crate::traits::{BrightnessOutput, DigitDisplay, TimeSource, WallClock};

pub struct Dispatcher<'a, D, B, C, S> {
    timers: &'a TimerBank,
    cfg: ClockConfig,
    animation: AnimationEngine,
    brightness: BrightnessScheduler,
    time_sync: TimeSync,
    display: D,
    backlight: B,
    rtc: C,
    source: S,
    log: LogRing,
    restart_pending: bool,
}

impl<'a, D, B, C, S> Dispatcher<'a, D, B, C, S>
where
    D: DigitDisplay,
    B: BrightnessOutput,
    C: WallClock,
    S: TimeSource,
{
    pub fn new(
        timers: &'a TimerBank,
        cfg: ClockConfig,
        display: D,
        backlight: B,
        rtc: C,
        source: S,
    ) -> Self {
        let brightness = BrightnessScheduler::new(&cfg);
        Self {
            timers,
            cfg,
            animation: AnimationEngine::new(),
            brightness,
            time_sync: TimeSync::new(),
            display,
            backlight,
            rtc,
            source,
            log: LogRing::new(),
            restart_pending: false,
        }
    }

    /// One loop iteration: run every due handler, animation last so a
    /// readout it starts cannot suppress work already done this iteration.
    pub fn poll(&mut self) {
        if !self.animation.is_cycling() {
            self.time_sync.poll(
                &self.timers.time_sync,
                &mut self.rtc,
                &mut self.source,
                &mut self.log,
                &self.cfg,
            );
            self.brightness.poll(
                &self.timers.brightness,
                &mut self.backlight,
                &mut self.rtc,
                &mut self.log,
                &self.cfg,
            );
        }
        self.animation.poll(
            &self.timers.animation,
            &mut self.display,
            &mut self.rtc,
            &mut self.log,
            &self.cfg,
        );
    }

    /// Apply a validated remote command. Parsing already rejected bad
    /// input, so every command here succeeds.
    pub fn execute(&mut self, command: Command) -> Status {
        match command {
            Command::Restart => {
                self.log.push(None, "restart requested");
                self.restart_pending = true;
            }
            Command::SyncTime => {
                self.log.push(None, "time sync requested");
                self.timers.time_sync.force();
            }
            Command::SetDisplay(on) => {
                self.log
                    .push(None, if on { "display on" } else { "display off" });
                self.brightness.set_display_on(on);
                self.timers.brightness.force();
            }
            Command::SetBrightness(percent) => {
                self.log
                    .push_args(None, format_args!("brightness set to {}", percent));
                self.brightness.set_active_level(percent);
                self.brightness.set_display_on(percent > 0);
                self.timers.brightness.force();
            }
        }
        Status::Ok
    }

    /// Log a rejected request and report the failure status.
    pub fn reject(&mut self, reason: &str) -> Status {
        self.log.push_args(None, format_args!("rejected: {}", reason));
        Status::Rejected
    }

    /// Set by a restart command; the owner reboots once it sees this.
    pub fn restart_pending(&self) -> bool {
        self.restart_pending
    }

    pub fn log(&mut self) -> &mut LogRing {
        &mut self.log
    }

    /// Current state for variable reads. The reconnect counter lives at
    /// the link boundary and is passed in.
    pub fn snapshot(&self, wifi_disconnects: u32) -> Snapshot<'_> {
        Snapshot {
            brightness: self.brightness.level(),
            brightness_day: self.brightness.day_level(),
            brightness_night: self.brightness.night_level(),
            display_on: self.brightness.display_on(),
            is_night_mode: self.brightness.is_night(),
            last_log: [self.log.line(0), self.log.line(1), self.log.line(2)],
            wifi_disconnects,
        }
    }
}
