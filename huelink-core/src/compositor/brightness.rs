//! Brightness scaling

use huelink_protocol::ColorCommand;
use smart_leds::RGB8;

use crate::config::ConfigError;

/// Global multiplier applied to every channel before it reaches the strip
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Brightness(f64);

impl Brightness {
    /// Full brightness
    pub const FULL: Self = Self(1.0);

    /// Create a brightness factor, rejecting anything outside (0.0, 1.0]
    pub fn new(factor: f64) -> Result<Self, ConfigError> {
        if factor.is_finite() && factor > 0.0 && factor <= 1.0 {
            Ok(Self(factor))
        } else {
            Err(ConfigError::InvalidBrightness)
        }
    }

    /// The raw factor
    pub fn factor(self) -> f64 {
        self.0
    }

    /// Scale one raw channel value into the displayable range
    ///
    /// Scaling happens first and clamping second, so `2550` at 0.1 shows as
    /// 255 rather than 25. The float-to-int cast truncates and saturates:
    /// negatives become 0, anything past 255 becomes 255.
    pub fn scale_channel(self, raw: i64) -> u8 {
        (raw as f64 * self.0) as u8
    }

    /// Scale all three channels of a command
    pub fn scale(self, command: &ColorCommand) -> RGB8 {
        RGB8::new(
            self.scale_channel(command.red),
            self.scale_channel(command.green),
            self.scale_channel(command.blue),
        )
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self::FULL
    }
}
