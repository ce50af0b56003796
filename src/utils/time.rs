use std::time::{Duration, Instant};

/// Longest step a single tick may report; longer gaps (debugger, suspended window) are clamped.
pub const DEFAULT_MAX_DELTA: Duration = Duration::from_millis(250);

/// Frame clock supplying the per-tick delta.
#[derive(Debug, Clone)]
pub struct Timer {
    last_update: Instant,
    /// Time since last tick, after clamping
    pub delta: Duration,
    /// Sum of all reported deltas
    pub elapsed: Duration,
    /// Total number of ticks
    pub frame_count: u64,
    pub max_delta: Duration,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Creates a new timer starting from now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_update: Instant::now(),
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
            max_delta: DEFAULT_MAX_DELTA,
        }
    }

    /// Measures the wall-clock time since the previous tick.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let raw = now - self.last_update;
        self.last_update = now;
        self.advance(raw);
    }

    /// Advances by an externally supplied step instead of the wall clock.
    pub fn advance(&mut self, raw: Duration) {
        self.delta = raw.min(self.max_delta);
        self.elapsed += self.delta;
        self.frame_count += 1;
    }

    #[must_use]
    pub fn dt_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_stalls_are_clamped() {
        let mut timer = Timer::new();
        timer.advance(Duration::from_secs(5));
        assert_eq!(timer.delta, DEFAULT_MAX_DELTA);
        timer.advance(Duration::from_millis(16));
        assert_eq!(timer.delta, Duration::from_millis(16));
        assert_eq!(timer.frame_count, 2);
        assert_eq!(timer.elapsed, DEFAULT_MAX_DELTA + Duration::from_millis(16));
    }
}
