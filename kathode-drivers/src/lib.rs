//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in kathode-core:
//!
//! - Nixie tube digit display over SPI shift registers
//! - PWM tube dimmer with the inverted raw drive encoding
//! - DS3231 battery-backed real-time clock over I2C

#![no_std]
#![deny(unsafe_code)]

pub mod dimmer;
pub mod ds3231;
pub mod tubes;

pub use dimmer::PwmDimmer;
pub use ds3231::{Ds3231, Ds3231Error};
pub use tubes::{NixieTubes, TubeError};
