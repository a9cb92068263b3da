//! Host input source trait

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How an input source waits for data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum InputMode {
    /// Wait on a readiness poll with a timeout, then read
    #[default]
    Polling,
    /// No readiness poll: try a non-blocking read and pace with a short sleep
    Fallback,
}

/// Errors that can occur while reading host input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// The readiness poll itself failed
    PollFailed,
    /// Reading pending bytes failed (framing, overrun, break)
    ReadFailed,
}

/// Trait for the byte stream coming from the host
///
/// The control loop calls [`InputSource::read`] once per iteration. It is
/// the loop's only suspension point, so implementations must return within
/// `wait_ms` whether or not the host sends anything.
pub trait InputSource {
    /// Wait at most `wait_ms` for input and copy whatever is pending
    ///
    /// Returns the number of bytes written to `buf`, which is `0` when the
    /// wait expired without data.
    fn read(&mut self, buf: &mut [u8], wait_ms: u32) -> Result<usize, InputError>;

    /// Current waiting strategy
    ///
    /// A polling source that has hit a poll failure reports
    /// [`InputMode::Fallback`] from then on.
    fn mode(&self) -> InputMode;
}
