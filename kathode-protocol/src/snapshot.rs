//! Read-only variables and the state snapshot backing them

/// Number of recent log lines exposed as variables.
pub const LOG_SLOTS: usize = 3;

/// Every variable a client can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Variable {
    Brightness,
    BrightnessDay,
    BrightnessNight,
    DisplayOn,
    IsNightMode,
    LastLog1,
    LastLog2,
    LastLog3,
    WifiDisconnects,
}

impl Variable {
    pub const ALL: [Variable; 9] = [
        Variable::Brightness,
        Variable::BrightnessDay,
        Variable::BrightnessNight,
        Variable::DisplayOn,
        Variable::IsNightMode,
        Variable::LastLog1,
        Variable::LastLog2,
        Variable::LastLog3,
        Variable::WifiDisconnects,
    ];

    /// Resolve a wire name to a variable.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.name() == name)
    }

    /// The name the variable is published under.
    pub fn name(self) -> &'static str {
        match self {
            Variable::Brightness => "brightness",
            Variable::BrightnessDay => "brightnessDay",
            Variable::BrightnessNight => "brightnessNight",
            Variable::DisplayOn => "displayOn",
            Variable::IsNightMode => "isNightMode",
            Variable::LastLog1 => "lastLog1",
            Variable::LastLog2 => "lastLog2",
            Variable::LastLog3 => "lastLog3",
            Variable::WifiDisconnects => "wifiDisconnects",
        }
    }
}

/// Point-in-time view of the controller state, borrowed for the duration
/// of one reply.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// Level currently driving the tubes.
    pub brightness: u8,
    pub brightness_day: u8,
    pub brightness_night: u8,
    pub display_on: bool,
    pub is_night_mode: bool,
    /// Recent log lines, newest first.
    pub last_log: [&'a str; LOG_SLOTS],
    pub wifi_disconnects: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for v in Variable::ALL {
            assert_eq!(Variable::from_name(v.name()), Some(v));
        }
    }

    #[test]
    fn unknown_names_resolve_to_none() {
        assert_eq!(Variable::from_name("bright"), None);
        assert_eq!(Variable::from_name("Brightness"), None);
        assert_eq!(Variable::from_name(""), None);
    }
}
