//! Frame clock
//!
//! Tracks elapsed wall-clock time between ticks on a monotonic clock,
//! reported in true seconds.

use std::time::Instant;

/// Per-tick elapsed-time tracking
pub struct FrameClock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Time since the last tick in seconds
    pub delta_time: f64,
    /// Last tick instant
    last_instant: Instant,
    /// Whether this is the first tick
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock. Call once per tick.
    pub fn tick(&mut self) {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.delta_time = 0.0;
            return;
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;

        // Clamp to avoid spiral of death (max 250ms frame time)
        self.delta_time = elapsed.min(0.25);
        self.total_time += self.delta_time;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_defaults() {
        let clock = FrameClock::new();
        assert_eq!(clock.total_time, 0.0);
        assert_eq!(clock.delta_time, 0.0);
    }

    #[test]
    fn test_first_tick_zero_delta() {
        let mut clock = FrameClock::new();
        clock.tick();
        assert_eq!(clock.delta_time, 0.0);
    }

    #[test]
    fn test_delta_reports_seconds() {
        let mut clock = FrameClock::new();
        clock.tick();
        std::thread::sleep(std::time::Duration::from_millis(20));
        clock.tick();
        // 20ms of real time must land near 0.02s, not 0.2s
        assert!(clock.delta_time >= 0.019);
        assert!(clock.delta_time < 0.1);
        assert!((clock.total_time - clock.delta_time).abs() < 1e-12);
    }

    #[test]
    fn test_delta_clamped() {
        let mut clock = FrameClock::new();
        clock.tick();
        clock.last_instant = Instant::now() - std::time::Duration::from_secs(5);
        clock.tick();
        assert_eq!(clock.delta_time, 0.25);
    }
}
