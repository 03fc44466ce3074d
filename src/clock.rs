use std::time::{Duration, Instant};

/// Paces the simulation at a fixed tick rate.
pub struct FrameClock {
    interval: Duration,
    next: Instant,
}

impl FrameClock {
    pub fn new(tick_rate: u32, now: Instant) -> Self {
        let interval = Duration::from_secs(1) / tick_rate.max(1);
        Self { interval, next: now + interval }
    }

    /// When the next tick falls due; the event loop sleeps until then.
    pub fn deadline(&self) -> Instant {
        self.next
    }

    /// Returns true at most once per interval. A late frame does not queue
    /// up catch-up ticks.
    pub fn tick(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next += self.interval;
        if self.next <= now {
            self.next = now + self.interval;
        }
        true
    }
}
