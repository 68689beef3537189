//! Network credentials and timezone, baked in at build time.
//!
//! Fill these in before flashing.

pub const WIFI_SSID: &str = "your-ssid";
pub const WIFI_PASS: &str = "your-password";

/// Offset from UTC in seconds (Pacific Standard Time).
pub const GMT_OFFSET_SECS: i64 = -8 * 3600;
/// Daylight saving offset in seconds, added on top of the GMT offset.
pub const DST_OFFSET_SECS: i64 = 3600;
