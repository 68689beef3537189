//! Wall-clock time data model

/// A civil date and time as stored in the battery-backed RTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl ClockTime {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Minutes elapsed since midnight, in [0, 1440).
    pub fn minute_of_day(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }

    /// Hour in 12-hour display format; midnight and noon both read as 12.
    pub fn display_hour(&self) -> u8 {
        match self.hour % 12 {
            0 => 12,
            h => h,
        }
    }

    /// Convert a Unix timestamp (already offset into local time) to civil
    /// date and time. Days-from-epoch conversion per Howard Hinnant's
    /// `civil_from_days`.
    pub fn from_unix(secs: i64) -> Self {
        let days = secs.div_euclid(86_400);
        let rem = secs.rem_euclid(86_400);

        let z = days + 719_468;
        let era = z.div_euclid(146_097);
        let doe = z - era * 146_097;
        let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
        let y = yoe + era * 400;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let d = doy - (153 * mp + 2) / 5 + 1;
        let m = if mp < 10 { mp + 3 } else { mp - 9 };
        let y = if m <= 2 { y + 1 } else { y };

        Self {
            year: y as u16,
            month: m as u8,
            day: d as u8,
            hour: (rem / 3_600) as u8,
            minute: (rem % 3_600 / 60) as u8,
            second: (rem % 60) as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minute_of_day() {
        let t = ClockTime::new(2024, 6, 1, 14, 7, 30);
        assert_eq!(t.minute_of_day(), 847);
        let midnight = ClockTime::new(2024, 6, 1, 0, 0, 0);
        assert_eq!(midnight.minute_of_day(), 0);
    }

    #[test]
    fn display_hour_wraps_to_twelve() {
        assert_eq!(ClockTime::new(2024, 1, 1, 0, 5, 0).display_hour(), 12);
        assert_eq!(ClockTime::new(2024, 1, 1, 12, 0, 0).display_hour(), 12);
        assert_eq!(ClockTime::new(2024, 1, 1, 13, 0, 0).display_hour(), 1);
        assert_eq!(ClockTime::new(2024, 1, 1, 23, 0, 0).display_hour(), 11);
        assert_eq!(ClockTime::new(2024, 1, 1, 11, 0, 0).display_hour(), 11);
    }

    #[test]
    fn from_unix_known_instants() {
        // 2000-01-01T00:00:00Z
        assert_eq!(
            ClockTime::from_unix(946_684_800),
            ClockTime::new(2000, 1, 1, 0, 0, 0)
        );
        // 2024-02-29T23:59:59Z (leap day)
        assert_eq!(
            ClockTime::from_unix(1_709_251_199),
            ClockTime::new(2024, 2, 29, 23, 59, 59)
        );
        // Epoch itself
        assert_eq!(
            ClockTime::from_unix(0),
            ClockTime::new(1970, 1, 1, 0, 0, 0)
        );
    }
}
