//! Modulo-counted liveness cadence.

/// Counts poll wake-ups and reports when a liveness marker is due.
///
/// The counter starts at -1 so the very first tick fires. After a firing tick
/// it is reset to 0, so with `every = 120` ticks 0, 120, 240, … fire.
#[derive(Debug, Clone)]
pub struct Heartbeat {
    counter: i64,
    every: u32,
}

impl Heartbeat {
    /// `every` is clamped to at least 1.
    pub fn new(every: u32) -> Self {
        Self {
            counter: -1,
            every: every.max(1),
        }
    }

    /// Advance by one wake-up; returns `true` when a marker is due.
    pub fn tick(&mut self) -> bool {
        self.counter += 1;
        if self.counter % i64::from(self.every) == 0 {
            self.counter = 0;
            return true;
        }
        false
    }

    pub fn counter(&self) -> i64 {
        self.counter
    }

    pub fn every(&self) -> u32 {
        self.every
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_on_first_tick_and_every_interval() {
        let mut heartbeat = Heartbeat::new(120);
        let fired: Vec<usize> = (0..=360).filter(|_| heartbeat.tick()).collect();
        assert_eq!(fired, vec![0, 120, 240, 360]);
    }

    #[test]
    fn counter_stays_in_range_after_each_tick() {
        let mut heartbeat = Heartbeat::new(7);
        for _ in 0..100 {
            heartbeat.tick();
            assert!((0..7).contains(&heartbeat.counter()));
        }
    }

    #[test]
    fn interval_of_one_fires_every_tick() {
        let mut heartbeat = Heartbeat::new(1);
        assert!((0..10).all(|_| heartbeat.tick()));
    }

    #[test]
    fn zero_interval_is_clamped() {
        let mut heartbeat = Heartbeat::new(0);
        assert_eq!(heartbeat.every(), 1);
        assert!(heartbeat.tick());
    }
}
