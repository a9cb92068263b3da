//! Huelink - serial-driven RGB LED strip controller
//!
//! The host writes `R,G,B` lines over UART0; every pixel of the strip takes
//! that color, scaled by the configured brightness. A status LED blinks a
//! heartbeat and acknowledges each applied command.
//!
//! Strip length, pins and timing come from `strip.toml` at build time.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{PIO0, UART0};
use embassy_rp::pio::{Common, Pio};
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUartTx, Uart};
use embassy_time::Delay;
use embedded_io::Write;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use huelink_core::{ControlLoop, StatusLed};
use huelink_drivers::input::SerialInput;
use huelink_drivers::status::StatusOutput;
use huelink_drivers::strip::SmartLedStrip;
use huelink_hal::UartConfig;
use huelink_hal_rp2040::uart::to_rp_config;
use huelink_hal_rp2040::{StatusPin, UartInput, Ws2812Strip};
use huelink_protocol::READY_BANNER;

#[macro_use]
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    PIO0_IRQ_0 => embassy_rp::pio::InterruptHandler<PIO0>;
});

/// The control loop with the board's concrete collaborators
pub type Controller = ControlLoop<
    SerialInput<UartInput, Delay>,
    SmartLedStrip<Ws2812Strip<'static, PIO0, 0, { config::PIXEL_COUNT }>>,
    StatusOutput<StatusPin<'static>>,
>;

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

// PIO common block stays alive for the loaded WS2812 program
static PIO_COMMON: StaticCell<Common<'static, PIO0>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Huelink firmware starting...");

    let p = embassy_rp::init(Default::default());
    let strip_config = config::STRIP;

    info!(
        "Strip: {} pixels on gpio{}, brightness {}",
        strip_config.pixel_count, strip_config.data_pin.pin, strip_config.brightness
    );

    // Host link on UART0 (GPIO0 TX, GPIO1 RX)
    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart_config = to_rp_config(&UartConfig::default());
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (mut tx, rx) = uart.split();

    info!("UART initialized for host commands");

    // WS2812 strip on PIO0 SM0 with DMA
    let Pio { common, sm0, .. } = Pio::new(p.PIO0, Irqs);
    let common = PIO_COMMON.init(common);
    let ws2812: Ws2812Strip<'static, PIO0, 0, { config::PIXEL_COUNT }> =
        Ws2812Strip::new(common, sm0, p.DMA_CH0, strip_data_pin!(p));
    let strip = SmartLedStrip::new(ws2812, config::PIXEL_COUNT);

    // Status LED, or a silent stand-in when the board has none
    let status_inverted = strip_config.status_pin.is_some_and(|pin| pin.inverted);
    let status_pin = status_pin!(p).map(|pin| StatusPin::new(pin, status_inverted));
    let status = StatusOutput::from_pin(status_pin, status_inverted);
    if !status.is_present() {
        warn!("No status LED configured, heartbeat is log-only");
    }

    let input = SerialInput::new(UartInput::new(rx), Delay, strip_config.input_mode);

    let control: Controller = match ControlLoop::new(&strip_config, input, strip, status) {
        Ok(control) => control,
        Err(e) => {
            error!("Startup failed: {} ({})", e, e.kind());
            panic!("LED strip controller could not start");
        }
    };

    info!("Strip blanked, controller ready");
    send_banner(&mut tx);

    unwrap!(spawner.spawn(tasks::control_task(control, tx)));
}

/// Tell the host the device is listening
fn send_banner(tx: &mut BufferedUartTx) {
    let result = tx
        .write_all(READY_BANNER.as_bytes())
        .and_then(|()| tx.write_all(b"\r\n"))
        .and_then(|()| tx.flush());
    if let Err(e) = result {
        warn!("Failed to send ready banner: {}", e);
    }
}
