//! Frame timing

use std::time::{Duration, Instant};

/// Longest delta a single frame may report, in seconds
///
/// A browser tab or window that was hidden resumes with one huge gap; the
/// clamp keeps that gap from being applied as a single animation step.
pub const MAX_FRAME_DELTA: f32 = 0.25;

/// Wall clock feeding the per-frame callback
///
/// The first tick measures from construction.
#[derive(Debug, Clone)]
pub struct FrameClock {
    previous: Instant,
    max_delta: f32,
    last_delta: f32,
    ticks: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Clock clamped to [`MAX_FRAME_DELTA`]
    pub fn new() -> Self {
        Self::with_max_delta(MAX_FRAME_DELTA)
    }

    /// Clock clamped to `max_delta` seconds per tick
    pub fn with_max_delta(max_delta: f32) -> Self {
        Self {
            previous: Instant::now(),
            max_delta: max_delta.max(0.0),
            last_delta: 0.0,
            ticks: 0,
        }
    }

    /// Seconds since the previous tick, clamped
    pub fn delta(&mut self) -> f32 {
        let now = Instant::now();
        let raw = now.duration_since(self.previous).as_secs_f32();
        if raw > self.max_delta {
            log::trace!("Frame gap of {raw:.3}s clamped to {:.3}s", self.max_delta);
        }

        self.previous = now;
        self.last_delta = raw.min(self.max_delta);
        self.ticks += 1;
        self.last_delta
    }

    /// Value returned by the latest [`FrameClock::delta`]
    pub fn last_delta(&self) -> f32 {
        self.last_delta
    }

    /// Number of ticks so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// Wall time spent on a run, compared against simulated time
#[derive(Debug, Clone, Copy)]
pub struct RunTimer {
    started: Instant,
}

impl RunTimer {
    /// Start timing now
    pub fn start() -> Self {
        Self { started: Instant::now() }
    }

    /// Wall time since [`RunTimer::start`]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// How many simulated seconds were covered per wall second
    ///
    /// `None` until any measurable wall time has passed.
    pub fn speedup(&self, simulated_seconds: f32) -> Option<f32> {
        let wall = self.elapsed().as_secs_f32();
        (wall > 0.0).then(|| simulated_seconds / wall)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deltas_never_exceed_clamp() {
        let mut clock = FrameClock::with_max_delta(0.0);
        for _ in 0..3 {
            assert_eq!(clock.delta(), 0.0);
        }
        assert_eq!(clock.ticks(), 3);
        assert_eq!(clock.last_delta(), 0.0);
    }

    #[test]
    fn test_default_clock_ticks() {
        let mut clock = FrameClock::default();
        let delta = clock.delta();
        assert!((0.0..=MAX_FRAME_DELTA).contains(&delta));
        assert_eq!(clock.last_delta(), delta);
    }

    #[test]
    fn test_run_timer_speedup() {
        let timer = RunTimer::start();
        std::thread::sleep(Duration::from_millis(5));
        let speedup = timer.speedup(10.0).unwrap();
        assert!(speedup > 0.0 && speedup <= 10.0 / 0.005);
    }
}
