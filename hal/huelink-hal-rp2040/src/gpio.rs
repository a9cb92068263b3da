//! Status LED GPIO

use embassy_rp::gpio::{Level, Output, Pin};
use embassy_rp::Peri;
use huelink_hal::OutputPin;

/// Push-pull output driving the status LED
pub struct StatusPin<'d> {
    output: Output<'d>,
}

impl<'d> StatusPin<'d> {
    /// Configure `pin` as an output in the LED-off state
    ///
    /// `inverted` only picks the initial level. Mapping LED state to pin
    /// level afterwards is up to the status LED driver.
    pub fn new(pin: Peri<'d, impl Pin>, inverted: bool) -> Self {
        let level = if inverted { Level::High } else { Level::Low };
        Self {
            output: Output::new(pin, level),
        }
    }
}

impl OutputPin for StatusPin<'_> {
    fn set_high(&mut self) {
        self.output.set_high();
    }

    fn set_low(&mut self) {
        self.output.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.output.is_set_high()
    }
}
