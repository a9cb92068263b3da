//! Board-agnostic core logic for the LED strip controller
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (LED strip, status LED, input source)
//! - Startup configuration and its validation
//! - Pixel compositor (brightness scaling, frame buffer, commit)
//! - Status indicator (heartbeat and acknowledgment)
//! - The control loop tying them together
//! - Error taxonomy

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod compositor;
pub mod config;
pub mod control;
pub mod error;
pub mod status;
pub mod traits;

pub use compositor::{Brightness, FrameBuffer, PixelCompositor, MAX_PIXELS};
pub use config::{AckStyle, ConfigError, PinConfig, StripConfig};
pub use control::{ControlLoop, LoopEvent, LoopStats, TickReport};
pub use error::{ErrorKind, SetupError};
pub use status::{Heartbeat, StatusIndicator};
pub use traits::{InputError, InputMode, InputSource, LedStrip, StatusLed, StripError};

/// Pixel color as sent to the strip
pub use smart_leds::RGB8;
