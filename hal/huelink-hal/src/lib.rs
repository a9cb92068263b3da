//! Huelink Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the controller needs from a chip:
//! a serial receiver for the host command stream and a digital output for
//! the status LED. Chip-specific HALs (RP2040 today) implement them so the
//! same application code runs on the host under test and on the board.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (huelink-firmware)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  huelink-drivers (input, status LED)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  huelink-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!            ┌─────────────────┐
//!            │ huelink-hal-    │
//!            │    rp2040       │
//!            └─────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output
//! - [`uart::SerialRead`], [`uart::SerialPoll`] - Serial receive

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use uart::{SerialPoll, SerialRead, UartConfig};
