//! LED strip output trait

use smart_leds::RGB8;

/// Errors that can occur when committing a frame to the strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StripError {
    /// Frame length differs from the strip's pixel count
    LengthMismatch,
    /// Transfer to the strip failed (DMA/SPI/PIO error)
    Transfer,
    /// No strip is attached or the driver could not be brought up
    NotPresent,
}

/// Trait for addressable LED strips
///
/// The strip is an opaque sink with a pixel count fixed at startup.
/// Implementations translate the frame into the wire format of the chip
/// (WS2812, SK6812, ...) and transmit it.
pub trait LedStrip {
    /// Number of pixels on the strip
    fn pixel_count(&self) -> usize;

    /// Transmit a full frame to the strip
    ///
    /// `pixels` always holds exactly [`LedStrip::pixel_count`] colors. On
    /// `Ok` the physical strip shows the frame; on `Err` its content is
    /// unspecified.
    fn write(&mut self, pixels: &[RGB8]) -> Result<(), StripError>;
}
