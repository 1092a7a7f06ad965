//! Wall-clock bookkeeping for the tick loop.

use std::time::{Duration, Instant};

/// Measures real time between consecutive ticks.
///
/// Elapsed time is never capped: a tick that arrives late credits the full
/// gap, however long.
#[derive(Debug, Clone)]
pub struct TickClock {
    last: Instant,
}

impl TickClock {
    /// Start measuring from `now`.
    pub fn starting_at(now: Instant) -> Self {
        Self { last: now }
    }

    /// Start measuring from the current instant.
    pub fn start() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Time since the previous tick; moves the mark to `now`.
    pub fn elapsed(&mut self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_gap_between_ticks() {
        let origin = Instant::now();
        let mut clock = TickClock::starting_at(origin);
        assert_eq!(
            clock.elapsed(origin + Duration::from_millis(100)),
            Duration::from_millis(100)
        );
        assert_eq!(
            clock.elapsed(origin + Duration::from_millis(350)),
            Duration::from_millis(250)
        );
    }

    #[test]
    fn long_pauses_are_credited_in_full() {
        let origin = Instant::now();
        let mut clock = TickClock::starting_at(origin);
        let gap = Duration::from_secs(60 * 60);
        assert_eq!(clock.elapsed(origin + gap), gap);
    }

    #[test]
    fn clock_going_backwards_yields_zero() {
        let origin = Instant::now() + Duration::from_secs(1);
        let mut clock = TickClock::starting_at(origin);
        assert_eq!(clock.elapsed(origin - Duration::from_millis(500)), Duration::ZERO);
    }
}
