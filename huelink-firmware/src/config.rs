//! Strip configuration embedded at build time
//!
//! `build.rs` validates `strip.toml` and generates the constants and pin
//! macros included here. There is no runtime configuration.

use huelink_core::config::{AckStyle, PinConfig, StripConfig};
use huelink_core::traits::InputMode;

include!(concat!(env!("OUT_DIR"), "/strip_config.rs"));
