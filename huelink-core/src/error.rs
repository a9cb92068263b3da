//! Error taxonomy
//!
//! Per-line problems are absorbed by the control loop and only show up in
//! logs and counters. [`SetupError`] is the one error path that stops the
//! firmware, and it can only happen before the loop starts.

use core::fmt;

use huelink_protocol::{LineError, ParseError};

use crate::config::ConfigError;
use crate::traits::{InputError, StripError};

/// Coarse classification of every fault the controller can see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// A line that is not a valid command, or one that overflowed the buffer
    MalformedLine,
    /// Strip or status LED missing or not responding
    HardwareUnavailable,
    /// Input poll or read failure; the loop carries on
    TransientIo,
}

impl From<ParseError> for ErrorKind {
    fn from(_: ParseError) -> Self {
        ErrorKind::MalformedLine
    }
}

impl From<LineError> for ErrorKind {
    fn from(_: LineError) -> Self {
        ErrorKind::MalformedLine
    }
}

impl From<InputError> for ErrorKind {
    fn from(_: InputError) -> Self {
        ErrorKind::TransientIo
    }
}

impl From<StripError> for ErrorKind {
    fn from(_: StripError) -> Self {
        ErrorKind::HardwareUnavailable
    }
}

/// Failure to bring the controller up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupError {
    /// Configuration rejected by validation
    Config(ConfigError),
    /// The initial blanking write failed
    StripUnavailable(StripError),
    /// Driver length does not match the configured pixel count
    PixelCountMismatch { expected: usize, actual: usize },
}

impl SetupError {
    /// Fault class, `None` for a configuration that never reached hardware
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            SetupError::Config(_) => None,
            SetupError::StripUnavailable(_) | SetupError::PixelCountMismatch { .. } => {
                Some(ErrorKind::HardwareUnavailable)
            }
        }
    }
}

impl From<ConfigError> for SetupError {
    fn from(e: ConfigError) -> Self {
        SetupError::Config(e)
    }
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::Config(e) => write!(f, "invalid configuration: {}", e),
            SetupError::StripUnavailable(e) => write!(f, "LED strip unavailable: {:?}", e),
            SetupError::PixelCountMismatch { expected, actual } => write!(
                f,
                "strip driver has {} pixels, configuration says {}",
                actual, expected
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            ErrorKind::from(ParseError::WrongFieldCount),
            ErrorKind::MalformedLine
        );
        assert_eq!(ErrorKind::from(LineError::Overflow), ErrorKind::MalformedLine);
        assert_eq!(
            ErrorKind::from(InputError::PollFailed),
            ErrorKind::TransientIo
        );
        assert_eq!(
            ErrorKind::from(StripError::Transfer),
            ErrorKind::HardwareUnavailable
        );
    }

    #[test]
    fn test_setup_error_kind() {
        assert_eq!(
            SetupError::StripUnavailable(StripError::NotPresent).kind(),
            Some(ErrorKind::HardwareUnavailable)
        );
        assert_eq!(
            SetupError::PixelCountMismatch {
                expected: 64,
                actual: 8
            }
            .kind(),
            Some(ErrorKind::HardwareUnavailable)
        );
        assert_eq!(SetupError::Config(ConfigError::InvalidBrightness).kind(), None);
    }

    #[test]
    fn test_config_error_converts() {
        let e: SetupError = ConfigError::NoPixels.into();
        assert_eq!(e, SetupError::Config(ConfigError::NoPixels));
    }
}
