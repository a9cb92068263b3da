//! Pixel compositor
//!
//! Turns a parsed color command into a full-strip frame and commits it to
//! the LED strip.

pub mod brightness;
pub mod frame;

pub use brightness::Brightness;
pub use frame::{FrameBuffer, MAX_PIXELS};

use huelink_protocol::ColorCommand;
use smart_leds::RGB8;

use crate::config::StripConfig;
use crate::error::SetupError;
use crate::traits::{LedStrip, StripError};

/// Owns the frame buffer and the strip it is committed to
///
/// The frame is only ever changed by [`PixelCompositor::apply`], and every
/// change is followed by exactly one write of the whole frame.
pub struct PixelCompositor<L> {
    strip: L,
    frame: FrameBuffer,
    brightness: Brightness,
    last_color: RGB8,
}

impl<L: LedStrip> PixelCompositor<L> {
    /// Bring up the compositor and blank the strip
    ///
    /// The initial all-off commit doubles as the presence check: a strip that
    /// cannot take one frame at startup is reported as unavailable.
    pub fn new(strip: L, config: &StripConfig) -> Result<Self, SetupError> {
        let expected = usize::from(config.pixel_count);
        let actual = strip.pixel_count();
        if actual != expected {
            return Err(SetupError::PixelCountMismatch { expected, actual });
        }

        let mut compositor = Self {
            strip,
            frame: FrameBuffer::new(expected)?,
            brightness: Brightness::new(config.brightness)?,
            last_color: RGB8::default(),
        };

        compositor.commit().map_err(SetupError::StripUnavailable)?;
        Ok(compositor)
    }

    /// Scale `command` and paint every pixel with the result
    ///
    /// Returns the color written. A strip error leaves the frame buffer
    /// holding the new color; the next successful command overwrites it.
    pub fn apply(&mut self, command: &ColorCommand) -> Result<RGB8, StripError> {
        let color = self.brightness.scale(command);
        self.frame.fill(color);
        self.last_color = color;
        self.commit()?;
        Ok(color)
    }

    fn commit(&mut self) -> Result<(), StripError> {
        self.strip.write(self.frame.as_slice())
    }

    /// Current frame buffer content
    pub fn frame(&self) -> &[RGB8] {
        self.frame.as_slice()
    }

    /// Color of the most recent command (black before the first one)
    pub fn last_color(&self) -> RGB8 {
        self.last_color
    }

    /// Brightness factor in use
    pub fn brightness(&self) -> Brightness {
        self.brightness
    }

    /// The underlying strip
    pub fn strip(&self) -> &L {
        &self.strip
    }
}
