//! Status feedback
//!
//! A single binary output carries two signals: a heartbeat that toggles on
//! a fixed period whatever the host does, and an acknowledgment effect each
//! time a command reaches the strip.

pub mod heartbeat;
pub mod indicator;

pub use heartbeat::Heartbeat;
pub use indicator::StatusIndicator;
