//! Host serial link on a buffered UART
//!
//! The UART interrupt fills the receive ring buffer in the background, so
//! "is data pending" is a cheap buffer check and reading pending bytes
//! never waits on the wire.

use embassy_rp::uart::{self, BufferedUartRx};
use embassy_time::{block_for, Duration, Instant};
use embedded_io::{Read, ReadReady};
use huelink_hal::uart::{DataBits, Parity, StopBits};
use huelink_hal::{SerialPoll, SerialRead, UartConfig};

/// Interval between readiness checks while polling
const POLL_STEP_US: u64 = 100;

/// Receive half of the host UART
pub struct UartInput {
    rx: BufferedUartRx,
}

impl UartInput {
    pub fn new(rx: BufferedUartRx) -> Self {
        Self { rx }
    }
}

impl SerialRead for UartInput {
    type Error = uart::Error;

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() || !ReadReady::read_ready(&mut self.rx)? {
            return Ok(0);
        }
        // Data is buffered, so this returns without waiting
        Read::read(&mut self.rx, buf)
    }
}

impl SerialPoll for UartInput {
    fn poll(&mut self, timeout_ms: u32) -> Result<bool, Self::Error> {
        let deadline = Instant::now() + Duration::from_millis(u64::from(timeout_ms));
        loop {
            if ReadReady::read_ready(&mut self.rx)? {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            block_for(Duration::from_micros(POLL_STEP_US));
        }
    }
}

/// Convert the board-independent UART settings to embassy-rp's
pub fn to_rp_config(config: &UartConfig) -> uart::Config {
    let mut out = uart::Config::default();
    out.baudrate = config.baudrate;
    out.data_bits = match config.data_bits {
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
    };
    out.parity = match config.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    out.stop_bits = match config.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    out
}
