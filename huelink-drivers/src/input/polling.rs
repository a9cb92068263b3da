//! Readiness-polling input source

use embedded_hal::delay::DelayNs;
use huelink_core::traits::{InputError, InputMode, InputSource};
use huelink_hal::SerialPoll;

use super::fallback::read_or_sleep;

/// Waits on the port's readiness poll, then drains what is pending
///
/// After the first failed poll the source stops polling and behaves like
/// [`super::FallbackInput`]. The failure itself is reported once as
/// [`InputError::PollFailed`].
pub struct PollingInput<S, D> {
    serial: S,
    delay: D,
    degraded: bool,
}

impl<S: SerialPoll, D: DelayNs> PollingInput<S, D> {
    pub fn new(serial: S, delay: D) -> Self {
        Self {
            serial,
            delay,
            degraded: false,
        }
    }

    /// True once polling has been abandoned
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn serial(&self) -> &S {
        &self.serial
    }
}

impl<S: SerialPoll, D: DelayNs> InputSource for PollingInput<S, D> {
    fn read(&mut self, buf: &mut [u8], wait_ms: u32) -> Result<usize, InputError> {
        if self.degraded {
            return read_or_sleep(&mut self.serial, &mut self.delay, buf, wait_ms);
        }

        match self.serial.poll(wait_ms) {
            Ok(true) => self.serial.read_available(buf).map_err(|_| {
                // A port stuck in "ready but unreadable" must not spin the loop
                self.delay.delay_ms(wait_ms);
                InputError::ReadFailed
            }),
            Ok(false) => Ok(0),
            Err(_) => {
                self.degraded = true;
                Err(InputError::PollFailed)
            }
        }
    }

    fn mode(&self) -> InputMode {
        if self.degraded {
            InputMode::Fallback
        } else {
            InputMode::Polling
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::mock::{MockDelay, MockSerial};

    #[test]
    fn test_reads_when_ready() {
        let mut input = PollingInput::new(MockSerial::with_data(b"10,20,30\n"), MockDelay::default());
        let mut buf = [0u8; 4];

        assert_eq!(input.read(&mut buf, 10), Ok(4));
        assert_eq!(&buf, b"10,2");
        assert_eq!(input.serial().polls, [10]);
    }

    #[test]
    fn test_timeout_returns_zero() {
        let mut input = PollingInput::new(MockSerial::default(), MockDelay::default());
        let mut buf = [0u8; 8];

        assert_eq!(input.read(&mut buf, 10), Ok(0));
        assert_eq!(input.serial().reads, 0);
        // Waiting is the port's job, not a sleep
        assert_eq!(input.delay.total_ns, 0);
    }

    #[test]
    fn test_read_error_keeps_polling() {
        let mut serial = MockSerial::with_data(b"x");
        serial.read_fails = true;
        let mut input = PollingInput::new(serial, MockDelay::default());
        let mut buf = [0u8; 8];

        assert_eq!(input.read(&mut buf, 10), Err(InputError::ReadFailed));
        assert_eq!(input.mode(), InputMode::Polling);
    }

    #[test]
    fn test_persistent_read_error_is_paced() {
        let mut serial = MockSerial::with_data(b"x");
        serial.read_fails = true;
        let mut input = PollingInput::new(serial, MockDelay::default());
        let mut buf = [0u8; 8];

        for _ in 0..3 {
            assert_eq!(input.read(&mut buf, 10), Err(InputError::ReadFailed));
        }
        assert_eq!(input.serial().polls, [10, 10, 10]);
        assert_eq!(input.delay.total_ns, 30_000_000);
    }

    #[test]
    fn test_poll_failure_downgrades_once() {
        let mut serial = MockSerial::with_data(b"1,2,3\n");
        serial.poll_results.push_back(Err(()));
        let mut input = PollingInput::new(serial, MockDelay::default());
        let mut buf = [0u8; 16];

        assert_eq!(input.read(&mut buf, 10), Err(InputError::PollFailed));
        assert!(input.is_degraded());
        assert_eq!(input.mode(), InputMode::Fallback);

        // Data still arrives, now without polling
        assert_eq!(input.read(&mut buf, 10), Ok(6));
        assert_eq!(input.read(&mut buf, 10), Ok(0));
        assert_eq!(input.serial().polls.len(), 1);
        assert_eq!(input.delay.total_ns, 10_000_000);
    }
}
