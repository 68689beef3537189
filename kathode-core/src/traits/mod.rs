//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod backlight;
pub mod display;
pub mod rtc;

pub use backlight::BrightnessOutput;
pub use display::DigitDisplay;
pub use rtc::{TimeSource, TimeUnavailable, WallClock};
