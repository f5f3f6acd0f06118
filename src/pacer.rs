// Frame Pacer - Tick state machine and real-time cadence
//
// The loop targets exactly 60 logical ticks per second: render ticks on even
// counts, skip ticks on odd counts, a pacing sleep for whatever remains of
// the 1/60 s budget. A tick that overruns its budget is never dropped or
// compensated for; the loop simply free-runs slower.

use serde::Serialize;
use std::thread;
use std::time::{Duration, Instant};

/// Target logical tick rate in Hz
pub const TICK_RATE: u32 = 60;

/// Number of frame times kept for the rolling average
const STATS_WINDOW: usize = 60;

/// Kind of work a tick performs
///
/// Render ticks produce a displayable frame; skip ticks step the core
/// without one, halving video-push overhead while emulated time (and audio)
/// still advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickKind {
    /// Full video pipeline work
    Render,

    /// Core steps without rendering; no buffer push
    Skip,
}

impl TickKind {
    /// Decide the tick kind from the total tick count
    #[inline]
    pub fn of(tick_count: u64) -> Self {
        if tick_count % 2 == 0 {
            TickKind::Render
        } else {
            TickKind::Skip
        }
    }
}

/// Rolling frame-time statistics exposed to external telemetry
#[derive(Debug, Clone, Serialize)]
pub struct FrameStats {
    /// Total ticks recorded since the last reset
    pub total_ticks: u64,

    /// Wall-clock work time of the most recent tick (pre-sleep)
    pub last_frame_time: Duration,

    /// Frame times of the most recent ticks (up to one second's worth)
    frame_times: Vec<Duration>,
}

impl FrameStats {
    /// Create empty statistics
    pub fn new() -> Self {
        Self {
            total_ticks: 0,
            last_frame_time: Duration::ZERO,
            frame_times: Vec::with_capacity(STATS_WINDOW),
        }
    }

    /// Fold one tick's work time into the rolling window
    pub fn record(&mut self, elapsed: Duration) {
        self.last_frame_time = elapsed;
        self.frame_times.push(elapsed);
        if self.frame_times.len() > STATS_WINDOW {
            self.frame_times.remove(0);
        }
        self.total_ticks += 1;
    }

    /// Rolling average of the recorded work times
    pub fn rolling_average(&self) -> Duration {
        if self.frame_times.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.frame_times.iter().sum();
        total / self.frame_times.len() as u32
    }

    /// Effective frames per second derived from the most recent work time
    ///
    /// Reports the paced rate while ticks stay within budget.
    pub fn fps(&self) -> f32 {
        let average = self.rolling_average();
        if average.is_zero() {
            return 0.0;
        }
        let budget = Duration::from_micros(1_000_000 / TICK_RATE as u64);
        1.0 / average.max(budget).as_secs_f32()
    }

    /// Serialize the statistics for telemetry export
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Reset all statistics
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Paces the tick loop to the target rate
///
/// Measures wall-clock elapsed time per tick, records it, and blocks the
/// calling thread until the tick's 1/60 s budget has elapsed. The sleep is
/// the single suspension point per tick and is not cancellable mid-sleep.
pub struct FramePacer {
    frame_duration: Duration,
    stats: FrameStats,
}

impl FramePacer {
    /// Create a pacer targeting `TICK_RATE` ticks per second
    pub fn new() -> Self {
        Self {
            frame_duration: Duration::from_micros(1_000_000 / TICK_RATE as u64),
            stats: FrameStats::new(),
        }
    }

    /// Mark the start of a tick
    pub fn begin(&self) -> Instant {
        Instant::now()
    }

    /// Record the tick's work time and sleep out the remaining budget
    ///
    /// If the work already exceeded the budget, returns immediately; there
    /// is no catch-up.
    pub fn finish(&mut self, start: Instant) {
        let elapsed = start.elapsed();
        self.stats.record(elapsed);

        if let Some(remaining) = self.frame_duration.checked_sub(elapsed) {
            thread::sleep(remaining);
        }
    }

    /// The per-tick time budget
    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Rolling statistics for telemetry
    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Reset the rolling statistics
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_kind_parity() {
        for tick in 0u64..1000 {
            let expected = if tick % 2 == 0 { TickKind::Render } else { TickKind::Skip };
            assert_eq!(TickKind::of(tick), expected);
        }
    }

    #[test]
    fn test_render_tick_count_over_run() {
        // Over any run of N ticks, render ticks number ceil(N/2) or floor(N/2)
        for n in [1u64, 2, 9, 10, 99, 100] {
            let renders = (0..n).filter(|&t| TickKind::of(t) == TickKind::Render).count() as u64;
            assert!(renders == n.div_ceil(2) || renders == n / 2);
        }
    }

    #[test]
    fn test_stats_rolling_window() {
        let mut stats = FrameStats::new();
        for _ in 0..200 {
            stats.record(Duration::from_millis(10));
        }
        assert_eq!(stats.total_ticks, 200);
        assert_eq!(stats.rolling_average(), Duration::from_millis(10));
    }

    #[test]
    fn test_stats_average_tracks_recent_ticks() {
        let mut stats = FrameStats::new();
        for _ in 0..60 {
            stats.record(Duration::from_millis(2));
        }
        for _ in 0..60 {
            stats.record(Duration::from_millis(4));
        }
        // Window only holds the most recent 60 ticks
        assert_eq!(stats.rolling_average(), Duration::from_millis(4));
    }

    #[test]
    fn test_stats_serialize_for_telemetry() {
        let mut stats = FrameStats::new();
        stats.record(Duration::from_millis(5));
        let json = stats.to_json().unwrap();
        assert!(json.contains("total_ticks"));
    }

    #[test]
    fn test_pacer_frame_duration() {
        let pacer = FramePacer::new();
        assert_eq!(pacer.frame_duration(), Duration::from_micros(16_666));
    }

    #[test]
    fn test_pacer_sleeps_out_the_budget() {
        let mut pacer = FramePacer::new();
        let start = pacer.begin();
        pacer.finish(start);
        assert!(start.elapsed() >= pacer.frame_duration());
        assert_eq!(pacer.stats().total_ticks, 1);
    }

    #[test]
    fn test_fps_caps_at_target_rate() {
        let mut stats = FrameStats::new();
        stats.record(Duration::from_millis(1));
        assert!(stats.fps() <= TICK_RATE as f32 + 0.5);
    }
}
