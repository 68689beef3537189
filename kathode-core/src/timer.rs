//! Countdown timers shared with the tick interrupt
//!
//! A 1 ms tick source decrements every timer in the bank; the dispatcher
//! loop polls them. A timer is due once its count has gone negative. The
//! tick context only ever decrements and the loop side only loads or stores
//! whole values, so the worst outcome of the race between them is a handler
//! firing one iteration late - never early.

use portable_atomic::{AtomicI32, Ordering};

/// A single countdown timer.
///
/// Created with an initial delay and rearmed by its owning task after each
/// fire. Rearming always overwrites: missed fires do not queue up, so a
/// delayed loop runs a handler at most once per check.
#[derive(Debug)]
pub struct TaskTimer {
    remaining: AtomicI32,
}

impl TaskTimer {
    pub const fn new(initial_ms: u32) -> Self {
        Self {
            remaining: AtomicI32::new(clamp_ms(initial_ms)),
        }
    }

    /// True iff the count has gone negative. Single atomic load, no side
    /// effect.
    pub fn is_due(&self) -> bool {
        self.remaining.load(Ordering::Relaxed) < 0
    }

    /// Overwrite the count with a new delay. A delay of 0 makes the timer
    /// due on the very next tick.
    pub fn rearm(&self, delay_ms: u32) {
        self.remaining.store(clamp_ms(delay_ms), Ordering::Relaxed);
    }

    /// Force the timer due on the next tick, outside its normal period.
    pub fn force(&self) {
        self.rearm(0);
    }

    pub(crate) fn tick(&self) {
        self.remaining.fetch_sub(1, Ordering::Relaxed);
    }

    #[cfg(test)]
    pub(crate) fn remaining_ms(&self) -> i32 {
        self.remaining.load(Ordering::Relaxed)
    }
}

/// The fixed set of shared counters: one per periodic task.
///
/// Lives in a `static` in the firmware so the tick task and the dispatcher
/// loop can both reach it.
#[derive(Debug)]
pub struct TimerBank {
    pub animation: TaskTimer,
    pub brightness: TaskTimer,
    pub time_sync: TaskTimer,
    pub link: TaskTimer,
}

impl TimerBank {
    /// All timers start at zero: every task runs once on the first loop
    /// iterations after the tick source starts.
    pub const fn new() -> Self {
        Self {
            animation: TaskTimer::new(0),
            brightness: TaskTimer::new(0),
            time_sync: TaskTimer::new(0),
            link: TaskTimer::new(0),
        }
    }

    /// One 1 ms tick: decrement every counter. Called only from the tick
    /// context, which does nothing else.
    pub fn tick(&self) {
        self.animation.tick();
        self.brightness.tick();
        self.time_sync.tick();
        self.link.tick();
    }
}

impl Default for TimerBank {
    fn default() -> Self {
        Self::new()
    }
}

const fn clamp_ms(ms: u32) -> i32 {
    if ms > i32::MAX as u32 {
        i32::MAX
    } else {
        ms as i32
    }
}
