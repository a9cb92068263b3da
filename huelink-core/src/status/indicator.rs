//! Status indicator

use crate::config::AckStyle;
use crate::traits::StatusLed;

/// Drives the status LED for heartbeat and acknowledgment
///
/// The indicator tracks the heartbeat level separately from the physical
/// LED. A running acknowledgment pulse holds the LED on; when it expires the
/// LED returns to whatever level the heartbeat has reached meanwhile.
pub struct StatusIndicator<L> {
    led: L,
    ack: AckStyle,
    level: bool,
    pulse_started_ms: Option<u32>,
    heartbeats: u32,
    acks: u32,
}

impl<L: StatusLed> StatusIndicator<L> {
    /// Take over the LED and switch it off
    pub fn new(mut led: L, ack: AckStyle) -> Self {
        led.set_on(false);
        Self {
            led,
            ack,
            level: false,
            pulse_started_ms: None,
            heartbeats: 0,
            acks: 0,
        }
    }

    /// Flip the heartbeat level
    ///
    /// Returns the new level.
    pub fn heartbeat(&mut self) -> bool {
        self.level = !self.level;
        self.heartbeats = self.heartbeats.saturating_add(1);
        if self.pulse_started_ms.is_none() {
            self.led.set_on(self.level);
        }
        self.level
    }

    /// Signal that a command was applied
    pub fn acknowledge(&mut self, now_ms: u32) {
        self.acks = self.acks.saturating_add(1);
        match self.ack {
            AckStyle::Pulse { .. } => {
                self.led.set_on(true);
                self.pulse_started_ms = Some(now_ms);
            }
            AckStyle::Toggle => {
                self.level = !self.level;
                self.led.set_on(self.level);
            }
        }
    }

    /// End an acknowledgment pulse once its hold time has passed
    ///
    /// Called every loop iteration; never sleeps.
    pub fn service(&mut self, now_ms: u32) {
        let AckStyle::Pulse { hold_ms } = self.ack else {
            return;
        };
        if let Some(start) = self.pulse_started_ms {
            if now_ms.wrapping_sub(start) >= hold_ms {
                self.pulse_started_ms = None;
                self.led.set_on(self.level);
            }
        }
    }

    /// Current heartbeat level
    pub fn level(&self) -> bool {
        self.level
    }

    pub fn is_pulsing(&self) -> bool {
        self.pulse_started_ms.is_some()
    }

    /// Whether a physical LED is attached
    pub fn is_present(&self) -> bool {
        self.led.is_present()
    }

    /// Heartbeat toggles since startup
    pub fn heartbeat_count(&self) -> u32 {
        self.heartbeats
    }

    /// Acknowledgments since startup
    pub fn ack_count(&self) -> u32 {
        self.acks
    }

    pub fn led(&self) -> &L {
        &self.led
    }
}
