//! Loop statistics

use super::event::LoopEvent;

/// Saturating counters describing what the loop has done since startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LoopStats {
    pub iterations: u32,
    pub applied: u32,
    pub rejected: u32,
    pub overflows: u32,
    pub input_errors: u32,
    pub strip_errors: u32,
    pub heartbeats: u32,
    pub acks: u32,
}

impl LoopStats {
    /// Count one event
    pub fn record(&mut self, event: &LoopEvent) {
        let counter = match event {
            LoopEvent::Heartbeat { .. } => &mut self.heartbeats,
            LoopEvent::Applied { .. } => {
                self.acks = self.acks.saturating_add(1);
                &mut self.applied
            }
            LoopEvent::Rejected(_) => &mut self.rejected,
            LoopEvent::LineOverflow => &mut self.overflows,
            LoopEvent::StripFailed(_) => &mut self.strip_errors,
            LoopEvent::InputFailed(_) => &mut self.input_errors,
        };
        *counter = counter.saturating_add(1);
    }

    /// Total faults of any kind
    pub fn faults(&self) -> u32 {
        self.rejected
            .saturating_add(self.overflows)
            .saturating_add(self.input_errors)
            .saturating_add(self.strip_errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::InputError;
    use huelink_protocol::ParseError;

    #[test]
    fn test_record() {
        let mut stats = LoopStats::default();
        stats.record(&LoopEvent::Applied {
            red: 1,
            green: 2,
            blue: 3,
        });
        stats.record(&LoopEvent::Rejected(ParseError::WrongFieldCount));
        stats.record(&LoopEvent::InputFailed(InputError::PollFailed));
        stats.record(&LoopEvent::Heartbeat { on: true });

        assert_eq!(stats.applied, 1);
        assert_eq!(stats.acks, 1);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.input_errors, 1);
        assert_eq!(stats.heartbeats, 1);
        assert_eq!(stats.faults(), 2);
    }

    #[test]
    fn test_saturates() {
        let mut stats = LoopStats {
            overflows: u32::MAX,
            ..Default::default()
        };
        stats.record(&LoopEvent::LineOverflow);
        assert_eq!(stats.overflows, u32::MAX);
    }
}
