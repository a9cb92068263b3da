//! RP2040 bindings for the LED strip controller
//!
//! This crate implements the shared `huelink-hal` traits on embassy-rp
//! peripherals, plus the RP2040-only strip driver:
//!
//! - Buffered UART receiver as a pollable serial input
//! - GPIO output for the status LED
//! - PIO/DMA WS2812 output as a `smart-leds` writer

#![no_std]

pub mod gpio;
pub mod uart;
pub mod ws2812;

pub use gpio::StatusPin;
pub use uart::UartInput;
pub use ws2812::Ws2812Strip;
