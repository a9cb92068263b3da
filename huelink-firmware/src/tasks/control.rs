//! Control task
//!
//! Drives the control loop forever. Each iteration waits at most the
//! configured poll timeout for host input, so the heartbeat keeps its
//! rhythm whether or not the host is talking.

use defmt::*;
use embassy_futures::yield_now;
use embassy_rp::uart::BufferedUartTx;
use embassy_time::Instant;

use huelink_core::{InputMode, LoopEvent, LoopStats};

use crate::Controller;

/// Heartbeats between statistics summaries
const STATS_EVERY_HEARTBEATS: u32 = 60;

/// Control task - owns the loop and logs what it reports
///
/// `_host_tx` is held so the UART transmit half outlives startup.
#[embassy_executor::task]
pub async fn control_task(mut control: Controller, _host_tx: BufferedUartTx) {
    let mut mode = control.input_mode();
    info!("Control task started ({} input)", mode);

    loop {
        let now_ms = Instant::now().as_millis() as u32;
        let report = control.tick(now_ms);

        for event in &report.events {
            log_event(event);
        }

        let stats = control.stats();
        let heartbeat = report
            .events
            .iter()
            .any(|e| matches!(e, LoopEvent::Heartbeat { .. }));
        if heartbeat && stats.heartbeats % STATS_EVERY_HEARTBEATS == 0 {
            log_stats(stats);
        }

        let current = control.input_mode();
        if current != mode {
            if current == InputMode::Fallback {
                warn!("Input polling unavailable, continuing in fallback mode");
            }
            mode = current;
        }

        yield_now().await;
    }
}

fn log_event(event: &LoopEvent) {
    match *event {
        LoopEvent::Heartbeat { on } => trace!("Heartbeat {}", on),
        LoopEvent::Applied { red, green, blue } => {
            debug!("Applied color ({}, {}, {})", red, green, blue)
        }
        LoopEvent::Rejected(e) => debug!("Ignored line: {}", e),
        LoopEvent::LineOverflow => warn!("Line too long, discarding until newline"),
        LoopEvent::StripFailed(e) => warn!("Strip write failed: {}", e),
        LoopEvent::InputFailed(e) => warn!("Input error: {}", e),
    }
}

fn log_stats(stats: &LoopStats) {
    info!(
        "Stats: {} iterations, {} applied, {} rejected, {} overflows, {} input errors, {} strip errors",
        stats.iterations,
        stats.applied,
        stats.rejected,
        stats.overflows,
        stats.input_errors,
        stats.strip_errors
    );
}
