//! Status LED implementations

pub mod gpio;

pub use gpio::{GpioStatusLed, NoStatusLed, StatusOutput};
