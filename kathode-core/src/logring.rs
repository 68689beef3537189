//! Last-events log for remote inspection
//!
//! Keeps the three most recent human-readable event lines, newest first,
//! each prefixed with the wall-clock time when it was known. Exposed
//! read-only through the command server.

use core::fmt::Write;

use heapless::String;

use crate::clock::ClockTime;

pub const LOG_LINES: usize = 3;
pub const LOG_LINE_LEN: usize = 96;

#[derive(Debug, Clone, Default)]
pub struct LogRing {
    lines: [String<LOG_LINE_LEN>; LOG_LINES],
}

impl LogRing {
    pub const fn new() -> Self {
        Self {
            lines: [String::new(), String::new(), String::new()],
        }
    }

    /// Append a line, evicting the oldest.
    pub fn push(&mut self, stamp: Option<ClockTime>, message: &str) {
        self.push_args(stamp, format_args!("{}", message));
    }

    /// Append a formatted line, evicting the oldest. Text past the line
    /// capacity is dropped.
    pub fn push_args(&mut self, stamp: Option<ClockTime>, args: core::fmt::Arguments<'_>) {
        let mut line: String<LOG_LINE_LEN> = String::new();
        match stamp {
            Some(t) => {
                let _ = write!(
                    line,
                    "[{:04}-{:02}-{:02} {:02}:{:02}:{:02}] ",
                    t.year, t.month, t.day, t.hour, t.minute, t.second
                );
            }
            None => {
                let _ = line.push_str("[--:--:--] ");
            }
        }
        let mut rest = Truncating(&mut line);
        let _ = rest.write_fmt(args);

        self.lines[2] = self.lines[1].clone();
        self.lines[1] = self.lines[0].clone();
        self.lines[0] = line;
    }

    /// Line by recency: 0 is the newest. Out-of-range reads are empty.
    pub fn line(&self, index: usize) -> &str {
        self.lines.get(index).map(String::as_str).unwrap_or("")
    }
}

/// `fmt::Write` adapter that drops what no longer fits instead of failing
/// the whole write.
struct Truncating<'a, const N: usize>(&'a mut String<N>);

impl<const N: usize> Write for Truncating<'_, N> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let room = N - self.0.len();
        if s.len() <= room {
            let _ = self.0.push_str(s);
        } else {
            let mut end = room;
            while end > 0 && !s.is_char_boundary(end) {
                end -= 1;
            }
            let _ = self.0.push_str(&s[..end]);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_first_and_evicts_at_three() {
        let mut log = LogRing::new();
        log.push(None, "first");
        log.push(None, "second");
        log.push(None, "third");
        log.push(None, "fourth");
        assert_eq!(log.line(0), "[--:--:--] fourth");
        assert_eq!(log.line(1), "[--:--:--] third");
        assert_eq!(log.line(2), "[--:--:--] second");
        assert_eq!(log.line(3), "");
    }

    #[test]
    fn stamped_lines_carry_the_wall_clock() {
        let mut log = LogRing::new();
        log.push(Some(ClockTime::new(2024, 6, 1, 14, 7, 30)), "sync ok");
        assert_eq!(log.line(0), "[2024-06-01 14:07:30] sync ok");
    }

    #[test]
    fn formatted_push() {
        let mut log = LogRing::new();
        log.push_args(None, format_args!("brightness set to {}", 42));
        assert_eq!(log.line(0), "[--:--:--] brightness set to 42");
    }

    #[test]
    fn overlong_messages_truncate_instead_of_vanishing() {
        let mut log = LogRing::new();
        let mut long: String<200> = String::new();
        for _ in 0..200 {
            let _ = long.push('x');
        }
        log.push(None, &long);
        assert_eq!(log.line(0).len(), LOG_LINE_LEN);
        assert!(log.line(0).starts_with("[--:--:--] xxx"));
    }
}
