//! Clock configuration

/// Timing and brightness settings for the whole clock.
///
/// Boundaries are minutes since midnight; levels are the logical 0-100
/// brightness scale.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    /// Minute of day when day brightness begins (06:00)
    pub day_start_min: u16,
    /// Minute of day when night brightness begins (21:00)
    pub night_start_min: u16,
    /// Brightness during the day
    pub day_level: u8,
    /// Brightness at night
    pub night_level: u8,
    /// Pause after the hour readout before the minute is revealed (ms)
    pub hour_pause_ms: u32,
    /// Digit step interval while a readout is cycling (ms)
    pub refresh_ms: u32,
    /// The minute readout starts on the next multiple of this many seconds
    pub secs_multiple: u8,
    /// Period between time service syncs (ms)
    pub sync_period_ms: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            day_start_min: 6 * 60,
            night_start_min: 21 * 60,
            day_level: 100,
            night_level: 14,
            hour_pause_ms: 1_000,
            refresh_ms: 15,
            secs_multiple: 10,
            // Hourly in debug builds so a bench unit shows sync activity.
            sync_period_ms: if cfg!(debug_assertions) {
                60 * 60 * 1_000
            } else {
                24 * 60 * 60 * 1_000
            },
        }
    }
}
