//! Main controller task
//!
//! Owns the dispatcher and all display-side hardware. Each loop iteration
//! polls the dispatcher, services at most one pending server event, polls
//! the firmware-update channel and then yields for a millisecond so the
//! tick and network tasks get the core.

use defmt::info;
use embassy_rp::gpio::Output;
use embassy_rp::i2c::{Blocking as I2cBlocking, I2c};
use embassy_rp::peripherals::{I2C1, SPI0};
use embassy_rp::pwm::PwmOutput;
use embassy_rp::spi::{Blocking as SpiBlocking, Spi};
use embassy_time::Timer;
use portable_atomic::Ordering;

use kathode_core::config::ClockConfig;
use kathode_core::dispatcher::Dispatcher;
use kathode_drivers::{Ds3231, NixieTubes, PwmDimmer};
use kathode_protocol::{
    function_reply, parse_request, variable_reply, Command, CommandError, Reply, Variable,
};

use crate::channels::{ServerEvent, REPLY, SERVER_EVENTS, TIMERS, UPDATE_REQUEST, WIFI_DISCONNECTS};
use crate::tasks::sntp::SntpSource;
use crate::update;

type Tubes = NixieTubes<Spi<'static, SPI0, SpiBlocking>, Output<'static>>;
type Dimmer = PwmDimmer<PwmOutput<'static>>;
type Rtc = Ds3231<I2c<'static, I2C1, I2cBlocking>>;

type ClockDispatcher = Dispatcher<'static, Tubes, Dimmer, Rtc, SntpSource>;

#[embassy_executor::task]
pub async fn controller_task(tubes: Tubes, dimmer: Dimmer, rtc: Rtc) {
    info!("Controller task started");

    let mut dispatcher = Dispatcher::new(
        &TIMERS,
        ClockConfig::default(),
        tubes,
        dimmer,
        rtc,
        SntpSource,
    );
    dispatcher.log().push(None, "boot complete");

    loop {
        dispatcher.poll();

        if let Ok(event) = SERVER_EVENTS.try_receive() {
            match event {
                ServerEvent::Request(line) => {
                    let reply = handle_request(&mut dispatcher, &line);
                    REPLY.signal(reply);
                }
                ServerEvent::Timeout => {
                    dispatcher.log().push(None, "client connection timed out");
                }
            }
        }

        update::poll();

        if dispatcher.restart_pending() {
            // Give the server a moment to flush the reply.
            Timer::after_millis(100).await;
            info!("restarting");
            cortex_m::peripheral::SCB::sys_reset();
        }

        Timer::after_millis(1).await;
    }
}

fn handle_request(dispatcher: &mut ClockDispatcher, line: &str) -> Reply {
    let request = match parse_request(line) {
        Ok(request) => request,
        Err(_) => return function_reply(dispatcher.reject("bad request line")),
    };

    // Update transport is outside the command set proper: ack first, the
    // reboot happens on the next update poll.
    if request.name == "update" {
        dispatcher.log().push(None, "update requested");
        UPDATE_REQUEST.signal(());
        return function_reply(kathode_protocol::Status::Ok);
    }

    match Command::parse(request.name, request.arg) {
        Ok(command) => function_reply(dispatcher.execute(command)),
        Err(CommandError::InvalidArgument) => {
            function_reply(dispatcher.reject("invalid argument"))
        }
        Err(CommandError::UnknownFunction) => match Variable::from_name(request.name) {
            Some(variable) => {
                let disconnects = WIFI_DISCONNECTS.load(Ordering::Relaxed);
                variable_reply(variable, &dispatcher.snapshot(disconnects))
            }
            None => function_reply(dispatcher.reject("unknown name")),
        },
    }
}
