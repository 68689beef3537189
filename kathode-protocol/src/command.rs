//! Typed command dispatch
//!
//! Wire names are kept from the original REST surface so existing callers
//! keep working: `restart`, `runTimeSync`, `setDisplay`, `setBrightness`.

/// A validated remote command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Reboot the controller.
    Restart,
    /// Force an immediate resync of the authoritative clock.
    SyncTime,
    /// Turn the tubes on or off.
    SetDisplay(bool),
    /// Set the brightness level (0-100) for the currently active period.
    SetBrightness(u8),
}

/// Why a function request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// No function with that name.
    UnknownFunction,
    /// The argument was missing, malformed, or out of range.
    InvalidArgument,
}

/// Handler status code returned to the requester.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Status {
    Ok = 0,
    Rejected = 1,
}

impl Status {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl Command {
    /// Parse a function name and optional argument into a command.
    ///
    /// All argument validation lives here; a brightness outside 0-100 or a
    /// display state other than `on`/`off` never reaches a handler.
    pub fn parse(name: &str, arg: Option<&str>) -> Result<Self, CommandError> {
        match name {
            "restart" => Ok(Command::Restart),
            "runTimeSync" => Ok(Command::SyncTime),
            "setDisplay" => match arg {
                Some("on") => Ok(Command::SetDisplay(true)),
                Some("off") => Ok(Command::SetDisplay(false)),
                _ => Err(CommandError::InvalidArgument),
            },
            "setBrightness" => {
                let raw = arg.ok_or(CommandError::InvalidArgument)?;
                let value: i32 = raw
                    .trim()
                    .parse()
                    .map_err(|_| CommandError::InvalidArgument)?;
                if (0..=100).contains(&value) {
                    Ok(Command::SetBrightness(value as u8))
                } else {
                    Err(CommandError::InvalidArgument)
                }
            }
            _ => Err(CommandError::UnknownFunction),
        }
    }
}
