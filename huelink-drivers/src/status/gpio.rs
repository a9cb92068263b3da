//! GPIO status LED
//!
//! A status LED on a plain GPIO, wired either to light on a high level or
//! (active-low, common on boards that sink the LED current) on a low level.

use huelink_core::traits::StatusLed;
use huelink_hal::OutputPin;

/// Status LED driven by a GPIO pin
pub struct GpioStatusLed<P> {
    pin: P,
    /// If true, LED ON = pin LOW
    inverted: bool,
    /// Current logical state (true = LED lit)
    on: bool,
}

impl<P: OutputPin> GpioStatusLed<P> {
    /// Create a status LED, initially off
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut led = Self {
            pin,
            inverted,
            on: false,
        };
        led.set_on(false);
        led
    }

    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    /// Give the pin back
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> StatusLed for GpioStatusLed<P> {
    fn set_on(&mut self, on: bool) {
        self.on = on;
        self.pin.set_state(on != self.inverted);
    }

    fn is_on(&self) -> bool {
        self.on
    }
}

/// Stand-in for a board without a usable status LED
///
/// Every call is a no-op and the LED always reads as off.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStatusLed;

impl StatusLed for NoStatusLed {
    fn set_on(&mut self, _on: bool) {}

    fn is_on(&self) -> bool {
        false
    }

    fn is_present(&self) -> bool {
        false
    }
}

/// Status output chosen once at startup
pub enum StatusOutput<P> {
    Gpio(GpioStatusLed<P>),
    Absent(NoStatusLed),
}

impl<P: OutputPin> StatusOutput<P> {
    /// Wrap `pin` if there is one, otherwise degrade to [`NoStatusLed`]
    pub fn from_pin(pin: Option<P>, inverted: bool) -> Self {
        match pin {
            Some(pin) => StatusOutput::Gpio(GpioStatusLed::new(pin, inverted)),
            None => StatusOutput::Absent(NoStatusLed),
        }
    }
}

impl<P: OutputPin> StatusLed for StatusOutput<P> {
    fn set_on(&mut self, on: bool) {
        match self {
            StatusOutput::Gpio(led) => led.set_on(on),
            StatusOutput::Absent(led) => led.set_on(on),
        }
    }

    fn is_on(&self) -> bool {
        match self {
            StatusOutput::Gpio(led) => led.is_on(),
            StatusOutput::Absent(led) => led.is_on(),
        }
    }

    fn is_present(&self) -> bool {
        match self {
            StatusOutput::Gpio(led) => led.is_present(),
            StatusOutput::Absent(led) => led.is_present(),
        }
    }
}
