//! Configuration type definitions
//!
//! These types describe the strip controller. The firmware parses them from
//! `strip.toml` at build time and validates them before generating code.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::hardware::PinConfig;
use crate::compositor::MAX_PIXELS;
use crate::traits::InputMode;

/// Default number of pixels on the strip
pub const DEFAULT_PIXEL_COUNT: u16 = 64;

/// Default brightness factor applied to every channel
pub const DEFAULT_BRIGHTNESS: f64 = 0.1;

/// Default heartbeat period
pub const DEFAULT_HEARTBEAT_INTERVAL_MS: u32 = 1000;

/// Default acknowledgment pulse length
pub const DEFAULT_ACK_PULSE_MS: u32 = 50;

/// Default bound on the per-iteration input wait
pub const DEFAULT_POLL_TIMEOUT_MS: u32 = 10;

/// Upper bound on the per-iteration input wait
///
/// Anything longer makes heartbeat timing visibly jittery.
pub const MAX_POLL_TIMEOUT_MS: u32 = 10;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Strip has no pixels
    NoPixels,
    /// Strip is longer than the frame buffer can hold
    TooManyPixels,
    /// Brightness factor outside (0.0, 1.0]
    InvalidBrightness,
    /// Heartbeat interval is zero
    InvalidHeartbeat,
    /// Poll timeout outside 1..=MAX_POLL_TIMEOUT_MS
    InvalidPollTimeout,
    /// Acknowledgment pulse is zero or not shorter than the heartbeat
    InvalidAckPulse,
    /// Pin string could not be parsed, pin does not exist, or pin is reserved
    InvalidPin,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ConfigError::NoPixels => "pixel_count must be at least 1",
            ConfigError::TooManyPixels => "pixel_count exceeds the frame buffer capacity",
            ConfigError::InvalidBrightness => "brightness must be in (0.0, 1.0]",
            ConfigError::InvalidHeartbeat => "heartbeat_interval_ms must be non-zero",
            ConfigError::InvalidPollTimeout => "poll_timeout_ms must be between 1 and 10",
            ConfigError::InvalidAckPulse => {
                "ack pulse hold_ms must be non-zero and shorter than the heartbeat interval"
            }
            ConfigError::InvalidPin => {
                "pin must be written as gpioN or !gpioN with N in 2..30 (gpio0/1 carry the host link)"
            }
        };
        f.write_str(msg)
    }
}

/// How the status LED acknowledges an applied command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AckStyle {
    /// Turn the LED on, then restore the heartbeat level after `hold_ms`
    Pulse { hold_ms: u32 },
    /// Flip the LED once
    Toggle,
}

impl Default for AckStyle {
    fn default() -> Self {
        AckStyle::Pulse {
            hold_ms: DEFAULT_ACK_PULSE_MS,
        }
    }
}

/// Strip controller configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StripConfig {
    /// Number of pixels on the strip
    pub pixel_count: u16,
    /// Strip data line
    pub data_pin: PinConfig,
    /// Status LED, if the board has one
    ///
    /// Left out of a config file this is `None`, not the board default.
    #[cfg_attr(feature = "serde", serde(default))]
    pub status_pin: Option<PinConfig>,
    /// Multiplier applied to every channel, in (0.0, 1.0]
    pub brightness: f64,
    /// Heartbeat toggle period
    pub heartbeat_interval_ms: u32,
    /// Acknowledgment effect
    pub ack: AckStyle,
    /// Maximum time one loop iteration waits for input
    pub poll_timeout_ms: u32,
    /// Input waiting strategy chosen at startup
    pub input_mode: InputMode,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            pixel_count: DEFAULT_PIXEL_COUNT,
            data_pin: PinConfig::new(4),
            status_pin: Some(PinConfig::new(25)),
            brightness: DEFAULT_BRIGHTNESS,
            heartbeat_interval_ms: DEFAULT_HEARTBEAT_INTERVAL_MS,
            ack: AckStyle::default(),
            poll_timeout_ms: DEFAULT_POLL_TIMEOUT_MS,
            input_mode: InputMode::default(),
        }
    }
}

impl StripConfig {
    /// Check every field is usable
    ///
    /// A missing or conflicting status pin is not an error: the board then
    /// simply runs without a status LED (see [`StripConfig::usable_status_pin`]).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pixel_count == 0 {
            return Err(ConfigError::NoPixels);
        }
        if usize::from(self.pixel_count) > MAX_PIXELS {
            return Err(ConfigError::TooManyPixels);
        }

        let b = self.brightness;
        if !(b.is_finite() && b > 0.0 && b <= 1.0) {
            return Err(ConfigError::InvalidBrightness);
        }

        if self.heartbeat_interval_ms == 0 {
            return Err(ConfigError::InvalidHeartbeat);
        }

        if self.poll_timeout_ms == 0 || self.poll_timeout_ms > MAX_POLL_TIMEOUT_MS {
            return Err(ConfigError::InvalidPollTimeout);
        }

        if let AckStyle::Pulse { hold_ms } = self.ack {
            if hold_ms == 0 || hold_ms >= self.heartbeat_interval_ms {
                return Err(ConfigError::InvalidAckPulse);
            }
        }

        if !self.data_pin.is_assignable() {
            return Err(ConfigError::InvalidPin);
        }

        Ok(())
    }

    /// Status pin the board can actually drive
    ///
    /// Returns `None` when no status pin is configured, when it does not
    /// exist or belongs to the host link, or when it collides with the strip
    /// data line.
    pub fn usable_status_pin(&self) -> Option<PinConfig> {
        self.status_pin
            .filter(|pin| pin.is_assignable() && pin.pin != self.data_pin.pin)
    }
}
