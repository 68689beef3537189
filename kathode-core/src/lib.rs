//! Board-agnostic core logic for the Kathode nixie clock
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (tube display, dimmer, wall clock)
//! - Shared countdown timers driven by the 1 ms tick source
//! - Digit-cycling animation state machine
//! - Day/night brightness scheduling
//! - Periodic time resynchronisation
//! - The non-blocking dispatcher that coordinates the above
//! - Configuration type definitions and the remote-inspection log ring

#![no_std]
#![deny(unsafe_code)]

pub mod animation;
pub mod brightness;
pub mod clock;
pub mod config;
pub mod dispatcher;
pub mod logring;
pub mod sync;
pub mod timer;
pub mod traits;
