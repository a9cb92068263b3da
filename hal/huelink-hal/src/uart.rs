//! Serial receive abstractions
//!
//! The host command stream arrives over a serial link. Two capabilities are
//! modelled separately because not every port can report readiness:
//!
//! - [`SerialRead`]: drain whatever is already buffered, never waiting
//! - [`SerialPoll`]: additionally wait a bounded time for data to arrive

/// Non-blocking serial receiver
pub trait SerialRead {
    /// Error type for receive operations
    type Error;

    /// Copy already-buffered bytes into `buf`
    ///
    /// Returns the number of bytes copied. Returns `Ok(0)` when nothing is
    /// pending; implementations must not wait for data.
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

/// Serial receiver that can wait for data with a deadline
pub trait SerialPoll: SerialRead {
    /// Wait up to `timeout_ms` for at least one byte to become readable
    ///
    /// Returns `Ok(true)` as soon as data is pending and `Ok(false)` once
    /// the timeout expires without data. Must return within the timeout
    /// whether or not the host sends anything.
    fn poll(&mut self, timeout_ms: u32) -> Result<bool, Self::Error>;
}

/// UART configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: 115200,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}
