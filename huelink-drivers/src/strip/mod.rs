//! LED strip implementations

pub mod smart;

pub use smart::SmartLedStrip;
