//! Status LED trait

/// Trait for the binary status output
///
/// Implementations drive an LED via GPIO (directly or active-low). A board
/// without a usable status LED provides an implementation whose calls do
/// nothing and whose [`StatusLed::is_present`] returns false.
pub trait StatusLed {
    /// Turn the LED on or off
    fn set_on(&mut self, on: bool);

    /// Check if the LED is currently on
    fn is_on(&self) -> bool;

    /// Invert the LED state
    fn toggle(&mut self) {
        let on = self.is_on();
        self.set_on(!on);
    }

    /// Whether a physical output backs this LED
    fn is_present(&self) -> bool {
        true
    }
}
