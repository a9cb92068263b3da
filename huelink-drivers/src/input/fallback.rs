//! Non-blocking fallback input source

use embedded_hal::delay::DelayNs;
use huelink_core::traits::{InputError, InputMode, InputSource};
use huelink_hal::SerialRead;

/// Reads whatever is buffered and paces the loop with a short sleep
///
/// For ports without a usable readiness poll. The read itself never waits,
/// so the only pause in an iteration is the bounded sleep.
pub struct FallbackInput<S, D> {
    serial: S,
    delay: D,
}

impl<S: SerialRead, D: DelayNs> FallbackInput<S, D> {
    pub fn new(serial: S, delay: D) -> Self {
        Self { serial, delay }
    }

    pub fn serial(&self) -> &S {
        &self.serial
    }
}

impl<S: SerialRead, D: DelayNs> InputSource for FallbackInput<S, D> {
    fn read(&mut self, buf: &mut [u8], wait_ms: u32) -> Result<usize, InputError> {
        read_or_sleep(&mut self.serial, &mut self.delay, buf, wait_ms)
    }

    fn mode(&self) -> InputMode {
        InputMode::Fallback
    }
}

/// Drain pending bytes; sleep `wait_ms` if there were none
///
/// A failed read also sleeps so a persistently broken port cannot turn the
/// loop into a busy spin.
pub(crate) fn read_or_sleep<S: SerialRead, D: DelayNs>(
    serial: &mut S,
    delay: &mut D,
    buf: &mut [u8],
    wait_ms: u32,
) -> Result<usize, InputError> {
    match serial.read_available(buf) {
        Ok(0) => {
            delay.delay_ms(wait_ms);
            Ok(0)
        }
        Ok(n) => Ok(n),
        Err(_) => {
            delay.delay_ms(wait_ms);
            Err(InputError::ReadFailed)
        }
    }
}
