//! JSON reply formatting
//!
//! Replies are small enough to format into a fixed buffer; `MAX_REPLY_LEN`
//! leaves room for the longest variable name plus a full log line.

use core::fmt::Write;

use heapless::String;

use crate::command::Status;
use crate::snapshot::{Snapshot, Variable};

pub const MAX_REPLY_LEN: usize = 160;

/// One formatted reply body.
pub type Reply = String<MAX_REPLY_LEN>;

/// Reply to a function call: `{"return_value": 0}`.
pub fn function_reply(status: Status) -> Reply {
    let mut out = Reply::new();
    let _ = write!(out, "{{\"return_value\": {}}}", status.code());
    out
}

/// Reply to a variable read: `{"brightness": 42}`.
///
/// Strings are quoted, booleans render as `true`/`false`, numbers bare.
pub fn variable_reply(variable: Variable, snapshot: &Snapshot<'_>) -> Reply {
    let mut out = Reply::new();
    let name = variable.name();
    let _ = match variable {
        Variable::Brightness => write!(out, "{{\"{}\": {}}}", name, snapshot.brightness),
        Variable::BrightnessDay => write!(out, "{{\"{}\": {}}}", name, snapshot.brightness_day),
        Variable::BrightnessNight => {
            write!(out, "{{\"{}\": {}}}", name, snapshot.brightness_night)
        }
        Variable::DisplayOn => write!(out, "{{\"{}\": {}}}", name, snapshot.display_on),
        Variable::IsNightMode => write!(out, "{{\"{}\": {}}}", name, snapshot.is_night_mode),
        Variable::LastLog1 => write!(out, "{{\"{}\": \"{}\"}}", name, snapshot.last_log[0]),
        Variable::LastLog2 => write!(out, "{{\"{}\": \"{}\"}}", name, snapshot.last_log[1]),
        Variable::LastLog3 => write!(out, "{{\"{}\": \"{}\"}}", name, snapshot.last_log[2]),
        Variable::WifiDisconnects => {
            write!(out, "{{\"{}\": {}}}", name, snapshot.wifi_disconnects)
        }
    };
    out
}
