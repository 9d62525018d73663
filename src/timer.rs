use std::time::Duration;

pub const TIMER_HZ: u32 = 60;

/// An 8-bit countdown that stops at zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub count: u8,
}

impl Timer {
    pub fn set(&mut self, value: u8) {
        self.count = value;
    }

    pub fn is_active(&self) -> bool {
        self.count > 0
    }

    pub fn tick(&mut self) {
        self.count = self.count.saturating_sub(1);
    }
}

/// Turns wall-clock time into 60 Hz timer ticks, carrying whatever is left
/// over into the next call.
#[derive(Debug, Default, Clone)]
pub struct TimerClock {
    pending: Duration,
}

impl TimerClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn period() -> Duration {
        Duration::from_nanos(1_000_000_000 / TIMER_HZ as u64)
    }

    /// Number of ticks owed after `elapsed` more time has passed.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.pending += elapsed;
        let period = Self::period();
        let mut ticks = 0;
        while self.pending >= period {
            self.pending -= period;
            ticks += 1;
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_floors_at_zero() {
        let mut timer = Timer { count: 2 };
        timer.tick();
        timer.tick();
        assert_eq!(timer.count, 0);
        timer.tick();
        assert_eq!(timer.count, 0);
        assert!(!timer.is_active());
    }

    #[test]
    fn clock_carries_remainder() {
        let mut clock = TimerClock::new();
        let period = TimerClock::period();
        assert_eq!(clock.advance(period / 2), 0);
        assert_eq!(clock.advance(period / 2 + period / 4), 1);
        assert_eq!(clock.advance(period * 3), 3);
    }

    #[test]
    fn one_second_is_sixty_ticks() {
        let mut clock = TimerClock::new();
        assert_eq!(clock.advance(Duration::from_secs(1)), TIMER_HZ);
    }
}
