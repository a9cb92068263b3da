//! Per-iteration outcomes reported by the control loop

use heapless::Vec;
use huelink_protocol::ParseError;

use crate::error::ErrorKind;
use crate::traits::{InputError, StripError};

/// Bytes requested from the input source per iteration
pub const READ_CHUNK: usize = 16;

/// Upper bound on events in one [`TickReport`]
///
/// One event per byte of the chunk at most (every byte a terminator), plus
/// a heartbeat and an input failure.
pub const MAX_EVENTS_PER_TICK: usize = READ_CHUNK + 2;

/// Something that happened during one loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoopEvent {
    /// The heartbeat toggled to `on`
    Heartbeat { on: bool },
    /// A command was painted on the strip with these scaled channels
    Applied { red: u8, green: u8, blue: u8 },
    /// A complete line was not a valid command
    Rejected(ParseError),
    /// A line outgrew the buffer and is being discarded
    LineOverflow,
    /// The strip refused the frame
    StripFailed(StripError),
    /// The input source failed this iteration
    InputFailed(InputError),
}

impl LoopEvent {
    /// Fault class of the event, `None` for normal operation
    pub fn fault_kind(&self) -> Option<ErrorKind> {
        match self {
            LoopEvent::Heartbeat { .. } | LoopEvent::Applied { .. } => None,
            LoopEvent::Rejected(e) => Some((*e).into()),
            LoopEvent::LineOverflow => Some(ErrorKind::MalformedLine),
            LoopEvent::StripFailed(e) => Some((*e).into()),
            LoopEvent::InputFailed(e) => Some((*e).into()),
        }
    }
}

/// Everything one call to `tick` did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Events in the order they happened
    pub events: Vec<LoopEvent, MAX_EVENTS_PER_TICK>,
    /// Bytes taken from the input source
    pub bytes_read: usize,
}

impl TickReport {
    pub(crate) fn record(&mut self, event: LoopEvent) {
        // Capacity covers the worst case for one chunk
        let _ = self.events.push(event);
    }

    /// True if nothing happened but the wait
    pub fn is_idle(&self) -> bool {
        self.events.is_empty() && self.bytes_read == 0
    }

    /// Applied colors in application order
    pub fn applied(&self) -> impl Iterator<Item = (u8, u8, u8)> + '_ {
        self.events.iter().filter_map(|e| match *e {
            LoopEvent::Applied { red, green, blue } => Some((red, green, blue)),
            _ => None,
        })
    }
}
