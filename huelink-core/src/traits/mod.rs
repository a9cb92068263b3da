//! Hardware abstraction traits
//!
//! These traits define the interface between the control loop and the
//! collaborators it drives: the LED strip, the status LED and the host
//! input stream.

pub mod input;
pub mod status;
pub mod strip;

pub use input::{InputError, InputMode, InputSource};
pub use status::StatusLed;
pub use strip::{LedStrip, StripError};
