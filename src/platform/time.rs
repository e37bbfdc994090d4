//! Wall-clock access for the frame loop
//!
//! Cooldown and game-over deadlines are plain seconds compared against
//! [`Clock::now`] every frame. Tests and fast headless runs use
//! [`ManualClock`], which only moves when told to.

use std::time::{Duration, Instant};

pub trait Clock {
    /// Seconds since an arbitrary fixed origin
    fn now(&self) -> f64;

    /// Block for `duration` (the only blocking call in the loop)
    fn sleep(&mut self, duration: Duration);
}

/// Real time, backed by `Instant`
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Virtual time: `sleep` advances the clock instantly
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: f64,
    sleeps: u64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, secs: f64) {
        self.now += secs;
    }

    pub fn sleep_count(&self) -> u64 {
        self.sleeps
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        self.now += duration.as_secs_f64();
        self.sleeps += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_sleep_advances() {
        let mut clock = ManualClock::new();
        assert_eq!(clock.now(), 0.0);
        clock.sleep(Duration::from_millis(250));
        clock.advance(0.5);
        assert!((clock.now() - 0.75).abs() < 1e-9);
        assert_eq!(clock.sleep_count(), 1);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
