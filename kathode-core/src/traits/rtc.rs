//! Authoritative clock and external time source traits

use crate::clock::ClockTime;

/// The external time service could not produce a time within its bounded
/// wait. Never fatal: the sync task logs it and retries at its normal
/// period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeUnavailable;

/// The battery-backed authoritative clock.
///
/// Read by the animation and brightness tasks, written only by time sync.
pub trait WallClock {
    type Error;

    fn now(&mut self) -> Result<ClockTime, Self::Error>;

    /// Full overwrite of the stored time, not a delta adjustment.
    fn adjust(&mut self, time: ClockTime) -> Result<(), Self::Error>;
}

/// External reference time source (e.g. SNTP over the wireless link).
///
/// `fetch` bounds its own wait; a slow network surfaces as
/// `TimeUnavailable`, never as an indefinite stall of the caller.
pub trait TimeSource {
    fn fetch(&mut self) -> Result<ClockTime, TimeUnavailable>;
}
