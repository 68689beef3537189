//! Firmware-update channel
//!
//! The update path is the RP2040 boot ROM: on request the clock reboots
//! into the USB mass-storage bootloader and the new image is copied over
//! like a fresh flash. Polled once per controller loop iteration.

use defmt::info;

use crate::channels::UPDATE_REQUEST;

pub fn poll() {
    if UPDATE_REQUEST.try_take().is_some() {
        info!("rebooting into USB bootloader");
        embassy_rp::rom_data::reset_to_usb_boot(0, 0);
    }
}
