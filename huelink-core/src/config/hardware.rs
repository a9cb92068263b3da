//! Hardware configuration types
//!
//! Pin assignments for the strip data line and the status LED.

use core::str::FromStr;

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::ConfigError;

/// Number of GPIO pins on the RP2040
pub const GPIO_COUNT: u8 = 30;

/// Pins taken by the host serial link (UART0 TX/RX)
pub const HOST_LINK_PINS: [u8; 2] = [0, 1];

/// Maximum length of a pin string such as `"!gpio25"`
pub const MAX_PIN_STRING_LEN: usize = 16;

/// Pin configuration with optional inversion
///
/// Written in config files as `"gpioN"`, or `"!gpioN"` for an active-low
/// output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "String<MAX_PIN_STRING_LEN>", into = "String<MAX_PIN_STRING_LEN>")
)]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
        }
    }

    /// Check the pin number exists on the chip
    pub fn is_valid(&self) -> bool {
        self.pin < GPIO_COUNT
    }

    /// Check the pin is free for the strip or the status LED
    pub fn is_assignable(&self) -> bool {
        self.is_valid() && !HOST_LINK_PINS.contains(&self.pin)
    }
}

impl FromStr for PinConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_pin_string(s).ok_or(ConfigError::InvalidPin)
    }
}

impl TryFrom<String<MAX_PIN_STRING_LEN>> for PinConfig {
    type Error = ConfigError;

    fn try_from(s: String<MAX_PIN_STRING_LEN>) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PinConfig> for String<MAX_PIN_STRING_LEN> {
    fn from(pin: PinConfig) -> Self {
        use core::fmt::Write;

        let mut s = String::new();
        let prefix = if pin.inverted { "!" } else { "" };
        let _ = write!(s, "{}gpio{}", prefix, pin.pin);
        s
    }
}

/// Parse a pin string from config
///
/// Supports formats:
/// - "gpio4" -> gpio 4, active-high
/// - "!gpio25" -> gpio 25, active-low
pub fn parse_pin_string(s: &str) -> Option<PinConfig> {
    let s = s.trim();

    let (s, inverted) = match s.strip_prefix('!') {
        Some(rest) => (rest, true),
        None => (s, false),
    };

    let pin: u8 = s.strip_prefix("gpio")?.parse().ok()?;
    if pin >= GPIO_COUNT {
        return None;
    }

    Some(PinConfig { pin, inverted })
}
