//! Kathode - Nixie Tube Clock Firmware
//!
//! Firmware binary for a two-tube nixie clock on the Raspberry Pi Pico W.
//! The tubes alternate between hour and minute readouts, brightness
//! follows a day/night schedule, the DS3231 is resynchronised over SNTP
//! and a small command server exposes control and inspection over TCP.
//!
//! During startup the tubes count down from 9 so a bricked boot shows
//! where it stopped.

#![no_std]
#![no_main]

use cyw43::JoinOptions;
use cyw43_pio::{PioSpi, DEFAULT_CLOCK_DIVIDER};
use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_net::{Config as NetConfig, StackResources};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::I2c;
use embassy_rp::peripherals::{DMA_CH0, PIO0};
use embassy_rp::pio::{InterruptHandler as PioInterruptHandler, Pio};
use embassy_rp::pwm::Pwm;
use embassy_rp::spi::Spi;
use embassy_time::Timer;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use kathode_core::traits::DigitDisplay;
use kathode_drivers::{Ds3231, NixieTubes, PwmDimmer};

mod channels;
mod secrets;
mod tasks;
mod update;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Kathode firmware starting...");

    let p = embassy_rp::init(Default::default());

    // Tube shift registers on SPI0, latch on GPIO4.
    let mut spi_config = embassy_rp::spi::Config::default();
    spi_config.frequency = 1_000_000;
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let latch = Output::new(p.PIN_4, Level::Low);
    let mut tubes = NixieTubes::new(spi, latch);
    let _ = tubes.write(9, 9);

    // Anode PWM on GPIO5 (slice 2, channel B).
    let pwm_config = embassy_rp::pwm::Config::default();
    let (_, pwm_out) = Pwm::new_output_b(p.PWM_SLICE2, p.PIN_5, pwm_config).split();
    let dimmer = PwmDimmer::new(unwrap!(pwm_out));

    // DS3231 on I2C1. A clock that does not answer is fatal: without it
    // there is nothing worth displaying.
    let i2c = I2c::new_blocking(p.I2C1, p.PIN_15, p.PIN_14, embassy_rp::i2c::Config::default());
    let mut rtc = Ds3231::new(i2c);
    if rtc.probe().is_err() {
        defmt::panic!("DS3231 not responding, halting");
    }
    let _ = tubes.write(8, 8);

    // CYW43 radio.
    let fw = cyw43_firmware::CYW43_43439A0;
    let clm = cyw43_firmware::CYW43_43439A0_CLM;

    let pwr = Output::new(p.PIN_23, Level::Low);
    let cs = Output::new(p.PIN_25, Level::High);
    let mut pio = Pio::new(p.PIO0, Irqs);
    let pio_spi = PioSpi::new(
        &mut pio.common,
        pio.sm0,
        DEFAULT_CLOCK_DIVIDER,
        pio.irq0,
        cs,
        p.PIN_24,
        p.PIN_29,
        p.DMA_CH0,
    );

    static STATE: StaticCell<cyw43::State> = StaticCell::new();
    let state = STATE.init(cyw43::State::new());
    let (net_device, mut control, runner) = cyw43::new(state, pwr, pio_spi, fw).await;
    unwrap!(spawner.spawn(cyw43_task(runner)));

    control.init(clm).await;
    control
        .set_power_management(cyw43::PowerManagementMode::PowerSave)
        .await;
    let _ = tubes.write(7, 7);

    // Network stack with DHCP.
    static RESOURCES: StaticCell<StackResources<8>> = StaticCell::new();
    let (stack, net_runner) = embassy_net::new(
        net_device,
        NetConfig::dhcpv4(Default::default()),
        RESOURCES.init(StackResources::new()),
        0x6b61_7468_6f64_6531,
    );
    unwrap!(spawner.spawn(net_task(net_runner)));

    loop {
        match control
            .join(
                secrets::WIFI_SSID,
                JoinOptions::new(secrets::WIFI_PASS.as_bytes()),
            )
            .await
        {
            Ok(()) => break,
            Err(e) => {
                info!("join failed with status {}, retrying", e.status);
                Timer::after_secs(5).await;
            }
        }
    }
    stack.wait_config_up().await;
    info!("network up");
    let _ = tubes.write(6, 6);

    unwrap!(spawner.spawn(tasks::tick_task()));
    unwrap!(spawner.spawn(tasks::link_task(control, stack)));
    unwrap!(spawner.spawn(tasks::sntp_task(stack)));
    unwrap!(spawner.spawn(tasks::server_task(stack)));
    unwrap!(spawner.spawn(tasks::controller_task(tubes, dimmer, rtc)));

    info!("all tasks running");
}

#[embassy_executor::task]
async fn cyw43_task(
    runner: cyw43::Runner<'static, Output<'static>, PioSpi<'static, PIO0, 0, DMA_CH0>>,
) -> ! {
    runner.run().await
}

#[embassy_executor::task]
async fn net_task(mut runner: embassy_net::Runner<'static, cyw43::NetDriver<'static>>) -> ! {
    runner.run().await
}
