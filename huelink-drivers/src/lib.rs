//! Collaborator implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in huelink-core:
//!
//! - Status LEDs (GPIO, active-low capable, or absent)
//! - Host input sources (readiness polling, non-blocking fallback)
//! - LED strips (any `smart-leds` writer)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod input;
pub mod status;
pub mod strip;
