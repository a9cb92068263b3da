//! Host input sources
//!
//! Two ways to wait for the host, chosen once at startup:
//!
//! - [`PollingInput`]: ask the port whether data is pending, waiting at most
//!   the poll timeout, then read
//! - [`FallbackInput`]: for ports that cannot report readiness; try a
//!   non-blocking read and sleep briefly when nothing came in
//!
//! A polling source whose readiness check fails switches itself to the
//! fallback behavior for good rather than retrying a broken primitive.

pub mod fallback;
pub mod polling;

pub use fallback::FallbackInput;
pub use polling::PollingInput;

use embedded_hal::delay::DelayNs;
use huelink_core::traits::{InputError, InputMode, InputSource};
use huelink_hal::SerialPoll;

/// Input source selected by [`InputMode`]
pub enum SerialInput<S, D> {
    Polling(PollingInput<S, D>),
    Fallback(FallbackInput<S, D>),
}

impl<S: SerialPoll, D: DelayNs> SerialInput<S, D> {
    pub fn new(serial: S, delay: D, mode: InputMode) -> Self {
        match mode {
            InputMode::Polling => SerialInput::Polling(PollingInput::new(serial, delay)),
            InputMode::Fallback => SerialInput::Fallback(FallbackInput::new(serial, delay)),
        }
    }
}

impl<S: SerialPoll, D: DelayNs> InputSource for SerialInput<S, D> {
    fn read(&mut self, buf: &mut [u8], wait_ms: u32) -> Result<usize, InputError> {
        match self {
            SerialInput::Polling(input) => input.read(buf, wait_ms),
            SerialInput::Fallback(input) => input.read(buf, wait_ms),
        }
    }

    fn mode(&self) -> InputMode {
        match self {
            SerialInput::Polling(input) => input.mode(),
            SerialInput::Fallback(input) => input.mode(),
        }
    }
}
