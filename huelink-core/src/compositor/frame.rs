//! Fixed-capacity frame buffer

use heapless::Vec;
use smart_leds::RGB8;

use crate::config::ConfigError;

/// Largest strip the frame buffer can hold
pub const MAX_PIXELS: usize = 512;

/// One color per pixel, in strip order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: Vec<RGB8, MAX_PIXELS>,
}

impl FrameBuffer {
    /// Create an all-off frame of `len` pixels
    pub fn new(len: usize) -> Result<Self, ConfigError> {
        if len == 0 {
            return Err(ConfigError::NoPixels);
        }
        let mut pixels = Vec::new();
        pixels
            .resize(len, RGB8::default())
            .map_err(|_| ConfigError::TooManyPixels)?;
        Ok(Self { pixels })
    }

    /// Paint every pixel with `color`
    pub fn fill(&mut self, color: RGB8) {
        self.pixels.iter_mut().for_each(|p| *p = color);
    }

    /// Pixels in strip order
    pub fn as_slice(&self) -> &[RGB8] {
        &self.pixels
    }

    /// Number of pixels
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Always false once constructed
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_blank() {
        let frame = FrameBuffer::new(5).unwrap();
        assert_eq!(frame.len(), 5);
        assert!(frame.as_slice().iter().all(|p| *p == RGB8::default()));
    }

    #[test]
    fn test_new_bounds() {
        assert_eq!(FrameBuffer::new(0), Err(ConfigError::NoPixels));
        assert_eq!(
            FrameBuffer::new(MAX_PIXELS + 1),
            Err(ConfigError::TooManyPixels)
        );
        assert_eq!(FrameBuffer::new(MAX_PIXELS).unwrap().len(), MAX_PIXELS);
    }

    #[test]
    fn test_fill() {
        let mut frame = FrameBuffer::new(3).unwrap();
        frame.fill(RGB8::new(1, 2, 3));
        assert_eq!(frame.as_slice(), &[RGB8::new(1, 2, 3); 3]);
    }
}
