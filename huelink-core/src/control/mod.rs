//! Control loop
//!
//! One iteration of [`ControlLoop::tick`]:
//!
//! 1. Advance the heartbeat and toggle the status LED when it is due
//! 2. End an acknowledgment pulse whose hold time has passed
//! 3. Wait at most `poll_timeout_ms` for input and read what is pending
//! 4. Feed the bytes to the line accumulator
//! 5. Parse each completed line; apply valid commands and acknowledge them
//!
//! Nothing in an iteration can fail. Faults become [`LoopEvent`]s in the
//! returned [`TickReport`] and the next iteration runs as usual, so the
//! heartbeat keeps going whatever the host sends.

pub mod event;
pub mod stats;

pub use event::{LoopEvent, TickReport, MAX_EVENTS_PER_TICK, READ_CHUNK};
pub use stats::LoopStats;

use huelink_protocol::{ColorCommand, LineAccumulator, LineError};

use crate::compositor::PixelCompositor;
use crate::config::StripConfig;
use crate::error::SetupError;
use crate::status::{Heartbeat, StatusIndicator};
use crate::traits::{InputMode, InputSource, LedStrip, StatusLed};

/// The single steady-state loop of the controller
pub struct ControlLoop<I, L, S> {
    input: I,
    accumulator: LineAccumulator,
    compositor: PixelCompositor<L>,
    indicator: StatusIndicator<S>,
    heartbeat: Heartbeat,
    poll_timeout_ms: u32,
    stats: LoopStats,
}

impl<I, L, S> ControlLoop<I, L, S>
where
    I: InputSource,
    L: LedStrip,
    S: StatusLed,
{
    /// Validate the configuration and bring up every collaborator
    ///
    /// The strip is blanked and the status LED switched off. Only a bad
    /// configuration or an unusable strip fails here.
    pub fn new(config: &StripConfig, input: I, strip: L, status: S) -> Result<Self, SetupError> {
        config.validate()?;

        let compositor = PixelCompositor::new(strip, config)?;
        let indicator = StatusIndicator::new(status, config.ack);

        Ok(Self {
            input,
            accumulator: LineAccumulator::new(),
            compositor,
            indicator,
            heartbeat: Heartbeat::new(config.heartbeat_interval_ms),
            poll_timeout_ms: config.poll_timeout_ms,
            stats: LoopStats::default(),
        })
    }

    /// Run one iteration at time `now_ms`
    pub fn tick(&mut self, now_ms: u32) -> TickReport {
        let mut report = TickReport::default();
        self.stats.iterations = self.stats.iterations.saturating_add(1);

        if self.heartbeat.advance(now_ms) {
            let on = self.indicator.heartbeat();
            self.emit(&mut report, LoopEvent::Heartbeat { on });
        }
        self.indicator.service(now_ms);

        let mut chunk = [0u8; READ_CHUNK];
        match self.input.read(&mut chunk, self.poll_timeout_ms) {
            Ok(n) => {
                let n = n.min(READ_CHUNK);
                report.bytes_read = n;
                self.ingest(&chunk[..n], now_ms, &mut report);
            }
            Err(e) => self.emit(&mut report, LoopEvent::InputFailed(e)),
        }

        report
    }

    fn ingest(&mut self, bytes: &[u8], now_ms: u32, report: &mut TickReport) {
        let Self {
            accumulator,
            compositor,
            indicator,
            stats,
            ..
        } = self;

        for result in accumulator.lines(bytes) {
            let event = match result {
                Err(LineError::Overflow) => LoopEvent::LineOverflow,
                Ok(line) if line.is_empty() => continue,
                Ok(line) => match ColorCommand::parse_bytes(line.as_bytes()) {
                    Err(e) => LoopEvent::Rejected(e),
                    Ok(command) => match compositor.apply(&command) {
                        Ok(color) => {
                            indicator.acknowledge(now_ms);
                            LoopEvent::Applied {
                                red: color.r,
                                green: color.g,
                                blue: color.b,
                            }
                        }
                        Err(e) => LoopEvent::StripFailed(e),
                    },
                },
            };
            stats.record(&event);
            report.record(event);
        }
    }

    fn emit(&mut self, report: &mut TickReport, event: LoopEvent) {
        self.stats.record(&event);
        report.record(event);
    }

    pub fn stats(&self) -> &LoopStats {
        &self.stats
    }

    pub fn compositor(&self) -> &PixelCompositor<L> {
        &self.compositor
    }

    pub fn indicator(&self) -> &StatusIndicator<S> {
        &self.indicator
    }

    pub fn heartbeat(&self) -> &Heartbeat {
        &self.heartbeat
    }

    /// Waiting strategy the input source is currently using
    pub fn input_mode(&self) -> InputMode {
        self.input.mode()
    }

    /// Bytes of the line still waiting for its terminator
    pub fn pending_bytes(&self) -> usize {
        self.accumulator.pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::tests::RecordingStrip;
    use crate::config::AckStyle;
    use crate::error::ErrorKind;
    use crate::status::indicator::tests::MockLed;
    use crate::traits::{InputError, StripError};
    use huelink_protocol::ParseError;
    use proptest::prelude::*;
    use smart_leds::RGB8;
    use std::collections::VecDeque;
    use std::vec::Vec;

    /// Input source that replays a fixed script, one step per read
    #[derive(Default)]
    struct ScriptedInput {
        steps: VecDeque<Result<Vec<u8>, InputError>>,
        waits: Vec<u32>,
    }

    impl ScriptedInput {
        fn bytes(data: &[u8]) -> Self {
            let mut input = Self::default();
            input.steps.push_back(Ok(data.to_vec()));
            input
        }

        fn byte_per_read(data: &[u8]) -> Self {
            let mut input = Self::default();
            input.steps.extend(data.iter().map(|&b| Ok(std::vec![b])));
            input
        }
    }

    impl InputSource for ScriptedInput {
        fn read(&mut self, buf: &mut [u8], wait_ms: u32) -> Result<usize, InputError> {
            self.waits.push(wait_ms);
            match self.steps.pop_front() {
                None => Ok(0),
                Some(Err(e)) => Err(e),
                Some(Ok(mut data)) => {
                    let n = data.len().min(buf.len());
                    buf[..n].copy_from_slice(&data[..n]);
                    if n < data.len() {
                        self.steps.push_front(Ok(data.split_off(n)));
                    }
                    Ok(n)
                }
            }
        }

        fn mode(&self) -> InputMode {
            InputMode::Polling
        }
    }

    type TestLoop = ControlLoop<ScriptedInput, RecordingStrip, MockLed>;

    fn config(brightness: f64) -> StripConfig {
        StripConfig {
            pixel_count: 8,
            brightness,
            ..Default::default()
        }
    }

    fn build(input: ScriptedInput, brightness: f64) -> TestLoop {
        ControlLoop::new(
            &config(brightness),
            input,
            RecordingStrip::new(8),
            MockLed::default(),
        )
        .unwrap()
    }

    /// Tick every 10 ms until the script is exhausted (plus a few idle ticks)
    fn run(ctl: &mut TestLoop, ticks: u32) -> Vec<TickReport> {
        (0..ticks).map(|i| ctl.tick(i * 10)).collect()
    }

    fn all_pixels(ctl: &TestLoop, color: RGB8) -> bool {
        ctl.compositor().frame().iter().all(|p| *p == color)
    }

    #[test]
    fn test_ack_scenario() {
        let mut ctl = build(ScriptedInput::bytes(b"255,0,0\n"), 0.1);

        let report = ctl.tick(0);
        assert_eq!(report.applied().collect::<Vec<_>>(), [(25, 0, 0)]);
        assert!(all_pixels(&ctl, RGB8::new(25, 0, 0)));
        assert_eq!(ctl.indicator().ack_count(), 1);
        assert!(ctl.indicator().led().on);

        // Pulse ends after its hold time, no second acknowledgment
        let mut now = 10;
        while now <= 60 {
            ctl.tick(now);
            now += 10;
        }
        assert!(!ctl.indicator().led().on);
        assert_eq!(ctl.indicator().led().history, [false, true, false]);
        assert_eq!(ctl.stats().acks, 1);
    }

    #[test]
    fn test_chunk_larger_than_read_is_consumed_over_ticks() {
        let mut ctl = build(
            ScriptedInput::bytes(b"1,1,1\n2,2,2\n3,3,3\n4,4,4\n"),
            1.0,
        );
        let reports = run(&mut ctl, 3);

        let applied: Vec<_> = reports.iter().flat_map(|r| r.applied()).collect();
        assert_eq!(applied, [(1, 1, 1), (2, 2, 2), (3, 3, 3), (4, 4, 4)]);
        assert!(all_pixels(&ctl, RGB8::new(4, 4, 4)));
    }

    #[test]
    fn test_fragmentation_one_byte_per_tick() {
        let line = b"10,20,30\n";
        let mut split = build(ScriptedInput::byte_per_read(line), 1.0);
        let mut whole = build(ScriptedInput::bytes(line), 1.0);

        run(&mut split, line.len() as u32 + 1);
        run(&mut whole, 1);

        assert_eq!(split.compositor().frame(), whole.compositor().frame());
        assert!(all_pixels(&split, RGB8::new(10, 20, 30)));
        assert_eq!(split.stats().applied, 1);
    }

    #[test]
    fn test_heartbeat_without_input() {
        let mut ctl = build(ScriptedInput::default(), 0.1);

        let reports = run(&mut ctl, 301);
        let toggles = reports
            .iter()
            .flat_map(|r| r.events.iter())
            .filter(|e| matches!(e, LoopEvent::Heartbeat { .. }))
            .count();

        assert!(toggles >= 3);
        assert_eq!(ctl.indicator().heartbeat_count(), toggles as u32);
        assert_eq!(ctl.stats().applied, 0);
    }

    #[test]
    fn test_poll_wait_is_bounded() {
        let mut ctl = build(ScriptedInput::bytes(b"1,2,3\n"), 1.0);
        run(&mut ctl, 5);
        assert!(ctl.input.waits.iter().all(|&w| w == 10));
    }

    #[test]
    fn test_malformed_lines_leave_frame() {
        let mut ctl = build(ScriptedInput::bytes(b"9,9,9\n12,ab,0\n1,2\n\n"), 1.0);
        let reports = run(&mut ctl, 2);

        let events: Vec<_> = reports.iter().flat_map(|r| r.events.iter().copied()).collect();
        assert!(events.contains(&LoopEvent::Rejected(ParseError::NotAnInteger)));
        assert!(events.contains(&LoopEvent::Rejected(ParseError::WrongFieldCount)));
        assert!(all_pixels(&ctl, RGB8::new(9, 9, 9)));
        assert_eq!(ctl.stats().rejected, 2);
        assert_eq!(ctl.indicator().ack_count(), 1);
    }

    #[test]
    fn test_idempotent_command() {
        let mut once = build(ScriptedInput::bytes(b"40,50,60\n"), 0.5);
        let mut twice = build(ScriptedInput::bytes(b"40,50,60\n40,50,60\n"), 0.5);

        run(&mut once, 2);
        run(&mut twice, 3);

        assert_eq!(once.compositor().frame(), twice.compositor().frame());
    }

    #[test]
    fn test_huge_value_clamped() {
        let mut ctl = build(ScriptedInput::bytes(b"999999999999,0,0\n"), 0.1);
        let reports = run(&mut ctl, 3);

        let applied: Vec<_> = reports.iter().flat_map(|r| r.applied()).collect();
        assert_eq!(applied, [(255, 0, 0)]);
    }

    #[test]
    fn test_overflow_recovers() {
        let mut data = std::vec![b'7'; 100];
        data.extend_from_slice(b"\n5,6,7\n");
        let mut ctl = build(ScriptedInput::bytes(&data), 1.0);

        run(&mut ctl, 10);

        assert_eq!(ctl.stats().overflows, 1);
        assert_eq!(ctl.stats().rejected, 0);
        assert!(all_pixels(&ctl, RGB8::new(5, 6, 7)));
    }

    #[test]
    fn test_input_error_does_not_halt() {
        let mut input = ScriptedInput::default();
        input.steps.push_back(Err(InputError::PollFailed));
        input.steps.push_back(Err(InputError::ReadFailed));
        input.steps.push_back(Ok(b"3,2,1\n".to_vec()));
        let mut ctl = build(input, 1.0);

        let reports = run(&mut ctl, 200);

        assert_eq!(ctl.stats().input_errors, 2);
        assert_eq!(
            reports[0].events[0].fault_kind(),
            Some(ErrorKind::TransientIo)
        );
        assert!(all_pixels(&ctl, RGB8::new(3, 2, 1)));
        assert!(ctl.indicator().heartbeat_count() >= 1);
    }

    #[test]
    fn test_strip_failure_does_not_halt() {
        let mut strip = RecordingStrip::new(8);
        strip.fail_from_write = Some(1);
        let mut ctl = ControlLoop::new(
            &config(1.0),
            ScriptedInput::bytes(b"1,1,1\n"),
            strip,
            MockLed::default(),
        )
        .unwrap();

        let report = ctl.tick(0);
        assert_eq!(
            report.events.as_slice(),
            [LoopEvent::StripFailed(StripError::Transfer)]
        );
        assert_eq!(ctl.indicator().ack_count(), 0);
        ctl.tick(10);
        assert_eq!(ctl.stats().iterations, 2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let bad = StripConfig {
            brightness: 0.0,
            ..config(0.1)
        };
        let result = ControlLoop::new(
            &bad,
            ScriptedInput::default(),
            RecordingStrip::new(8),
            MockLed::default(),
        );
        assert!(matches!(result, Err(SetupError::Config(_))));
    }

    #[test]
    fn test_toggle_ack_style() {
        let cfg = StripConfig {
            ack: AckStyle::Toggle,
            ..config(1.0)
        };
        let mut ctl = ControlLoop::new(
            &cfg,
            ScriptedInput::bytes(b"1,1,1\n"),
            RecordingStrip::new(8),
            MockLed::default(),
        )
        .unwrap();

        ctl.tick(0);
        assert!(ctl.indicator().led().on);
        ctl.tick(500);
        assert!(ctl.indicator().led().on);
    }

    proptest! {
        #[test]
        fn prop_valid_line_scales_every_pixel(
            r in 0i64..=255,
            g in 0i64..=255,
            b in 0i64..=255,
            factor in prop::sample::select(std::vec![1.0f64, 0.5, 0.125, 0.1, 0.53, 0.9]),
        ) {
            let line = std::format!("{}, {}, {}\n", r, g, b);
            let mut ctl = build(ScriptedInput::bytes(line.as_bytes()), factor);
            run(&mut ctl, 2);

            let expected = RGB8::new(
                (r as f64 * factor) as u8,
                (g as f64 * factor) as u8,
                (b as f64 * factor) as u8,
            );
            prop_assert!(all_pixels(&ctl, expected));
        }

        #[test]
        fn prop_bad_field_count_leaves_frame(count in 0usize..7) {
            prop_assume!(count != 3);
            let mut line = std::iter::repeat("5").take(count).collect::<Vec<_>>().join(",");
            line.push('\n');
            let mut ctl = build(ScriptedInput::bytes(line.as_bytes()), 1.0);
            run(&mut ctl, 2);

            prop_assert!(all_pixels(&ctl, RGB8::default()));
            prop_assert_eq!(ctl.stats().applied, 0);
        }

        #[test]
        fn prop_non_integer_token_leaves_frame(
            fields in prop::collection::vec("[0-9 ]{0,4}", 3),
            bad_field in 0usize..3,
            junk in "[a-zA-Z.#_]{1,3}",
            at in 0usize..5,
        ) {
            let mut fields = fields;
            let field = &mut fields[bad_field];
            let at = at.min(field.len());
            field.insert_str(at, &junk);

            let mut line = fields.join(",");
            line.push('\n');
            let mut ctl = build(ScriptedInput::bytes(line.as_bytes()), 1.0);
            run(&mut ctl, 3);

            prop_assert!(all_pixels(&ctl, RGB8::default()));
            prop_assert_eq!(ctl.stats().applied, 0);
            prop_assert_eq!(ctl.indicator().ack_count(), 0);
        }

        #[test]
        fn prop_fragmentation_invariant(
            r in 0u8..=255,
            g in 0u8..=255,
            b in 0u8..=255,
            cut in 1usize..8,
        ) {
            let line = std::format!("{},{},{}\n", r, g, b);
            let mut input = ScriptedInput::default();
            for piece in line.as_bytes().chunks(cut) {
                input.steps.push_back(Ok(piece.to_vec()));
            }
            let mut ctl = build(input, 1.0);
            run(&mut ctl, line.len() as u32 + 1);

            prop_assert!(all_pixels(&ctl, RGB8::new(r, g, b)));
        }
    }
}
