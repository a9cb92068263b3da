//! Heartbeat timing

/// Decides when the heartbeat toggles
///
/// Time is a free-running millisecond counter that may wrap; all comparisons
/// use wrapping subtraction, so a wrap every ~49 days is harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Heartbeat {
    interval_ms: u32,
    ticks: u32,
    last_toggle_ms: Option<u32>,
}

impl Heartbeat {
    pub const fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            ticks: 0,
            last_toggle_ms: None,
        }
    }

    /// Record one loop iteration at `now_ms`
    ///
    /// Returns true when a full interval has passed since the last toggle.
    /// The first call only anchors the clock.
    pub fn advance(&mut self, now_ms: u32) -> bool {
        self.ticks = self.ticks.wrapping_add(1);

        match self.last_toggle_ms {
            None => {
                self.last_toggle_ms = Some(now_ms);
                false
            }
            Some(last) if now_ms.wrapping_sub(last) >= self.interval_ms => {
                self.last_toggle_ms = Some(now_ms);
                true
            }
            Some(_) => false,
        }
    }

    /// Iterations seen so far (wraps)
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Time of the last toggle, or of the first iteration before any toggle
    pub fn last_toggle_ms(&self) -> Option<u32> {
        self.last_toggle_ms
    }
}
