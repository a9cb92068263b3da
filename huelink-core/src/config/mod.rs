//! Configuration types
//!
//! Startup configuration for the controller. It is read once (the firmware
//! bakes it in at build time) and never changes while the loop runs.

pub mod hardware;
pub mod types;

pub use hardware::*;
pub use types::*;
