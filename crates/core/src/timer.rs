//! Round countdown
//!
//! The countdown is driven from outside: a periodic source calls `tick()`
//! once per second (or whatever period the caller chooses). Nothing here
//! sleeps or reads a clock.

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeUpdate {
    pub remaining_secs: u32,
    /// True on the tick that reached zero and on every tick after it
    pub expired: bool,
}

/// Anything a periodic source can drive
pub trait TickSink {
    fn on_tick(&mut self) -> TimeUpdate;
}

/// Seconds remaining in a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    total: u32,
    remaining: u32,
    running: bool,
}

impl Countdown {
    /// A stopped countdown holding `total` seconds
    pub fn new(total: u32) -> Self {
        Self {
            total,
            remaining: total,
            running: false,
        }
    }

    /// Refill to the full length and start running
    pub fn reset(&mut self) {
        self.remaining = self.total;
        self.running = true;
    }

    /// Freeze at the current value; later ticks are no-ops
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Decrement by one second if running
    ///
    /// Reaching zero stops the countdown.
    pub fn tick(&mut self) -> TimeUpdate {
        if self.running && self.remaining > 0 {
            self.remaining -= 1;
            if self.remaining == 0 {
                self.running = false;
            }
        }
        self.update()
    }

    /// Current value without advancing
    pub fn update(&self) -> TimeUpdate {
        TimeUpdate {
            remaining_secs: self.remaining,
            expired: self.is_expired(),
        }
    }
}

impl TickSink for Countdown {
    fn on_tick(&mut self) -> TimeUpdate {
        self.tick()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_countdown_does_not_move() {
        let mut c = Countdown::new(3);
        assert_eq!(c.tick().remaining_secs, 3);
        assert!(!c.is_running());
    }

    #[test]
    fn test_counts_down_to_expiry() {
        let mut c = Countdown::new(3);
        c.reset();
        assert_eq!(c.tick(), TimeUpdate { remaining_secs: 2, expired: false });
        assert_eq!(c.tick(), TimeUpdate { remaining_secs: 1, expired: false });
        assert_eq!(c.tick(), TimeUpdate { remaining_secs: 0, expired: true });
        assert!(!c.is_running());

        // Frozen after expiry.
        assert_eq!(c.tick(), TimeUpdate { remaining_secs: 0, expired: true });
    }

    #[test]
    fn test_stop_freezes_value() {
        let mut c = Countdown::new(10);
        c.reset();
        c.tick();
        c.stop();
        for _ in 0..5 {
            assert_eq!(c.on_tick().remaining_secs, 9);
        }
    }

    #[test]
    fn test_reset_refills() {
        let mut c = Countdown::new(5);
        c.reset();
        c.tick();
        c.tick();
        c.reset();
        assert_eq!(c.remaining(), 5);
        assert!(c.is_running());
    }
}
