//! Adapter from any `smart-leds` writer to [`LedStrip`]

use huelink_core::traits::{LedStrip, StripError};
use smart_leds::{SmartLedsWrite, RGB8};

/// Strip of a fixed length behind a [`SmartLedsWrite`] implementation
///
/// The writer knows how to clock colors out (PIO, SPI, RMT, bit-bang);
/// this adapter adds the pixel count and maps its errors.
pub struct SmartLedStrip<W> {
    writer: W,
    len: usize,
}

impl<W> SmartLedStrip<W>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    pub fn new(writer: W, len: usize) -> Self {
        Self { writer, len }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }
}

impl<W> LedStrip for SmartLedStrip<W>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    fn pixel_count(&self) -> usize {
        self.len
    }

    fn write(&mut self, pixels: &[RGB8]) -> Result<(), StripError> {
        if pixels.len() != self.len {
            return Err(StripError::LengthMismatch);
        }
        self.writer
            .write(pixels.iter().copied())
            .map_err(|_| StripError::Transfer)
    }
}
