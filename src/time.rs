//! Fixed-timestep game clock using an accumulator pattern.
//!
//! The host calls [`GameTime::update`] with whatever timestamps it has
//! (animation frames, an interval timer, a test loop) and gets back the
//! number of whole production ticks that elapsed. The engine never reads
//! the wall clock itself.

/// Production ticks per real-time second.
pub const TICKS_PER_SECOND: u32 = 1;

/// Largest wall-clock gap credited by a single update. A tab that was
/// backgrounded for an hour earns at most this much on its next frame.
pub const MAX_FRAME_DELTA_MS: f64 = 5_000.0;

#[derive(Clone, Debug)]
pub struct GameTime {
    /// Milliseconds per tick (1000ms at the default rate)
    ms_per_tick: f64,
    /// Accumulated milliseconds not yet consumed as ticks
    accumulator: f64,
    /// Total elapsed ticks since creation
    pub total_ticks: u64,
    /// Timestamp of the last update (ms), None before the first one
    last_timestamp: Option<f64>,
}

impl Default for GameTime {
    fn default() -> Self {
        Self::new(TICKS_PER_SECOND)
    }
}

impl GameTime {
    /// `ticks_per_sec` of 0 is treated as 1.
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec.max(1) as f64,
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
        }
    }

    /// Feed a wall-clock timestamp in milliseconds and return how many
    /// ticks to run. The first call only records the timestamp.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            // Clocks that jump backwards or report NaN credit nothing
            Some(prev) if (now_ms - prev).is_finite() => (now_ms - prev).clamp(0.0, MAX_FRAME_DELTA_MS),
            _ => 0.0,
        };
        if now_ms.is_finite() {
            self.last_timestamp = Some(now_ms);
        }

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }

    /// Milliseconds until the next tick is due.
    pub fn until_next_tick(&self) -> f64 {
        self.ms_per_tick - self.accumulator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_update_only_records_timestamp() {
        let mut gt = GameTime::default();
        assert_eq!(gt.update(123_456.0), 0);
        assert_eq!(gt.total_ticks, 0);
    }

    #[test]
    fn one_tick_per_second_by_default() {
        let mut gt = GameTime::default();
        gt.update(0.0);
        assert_eq!(gt.update(999.0), 0);
        assert_eq!(gt.update(1_000.0), 1);
        assert_eq!(gt.update(3_500.0), 2);
        assert_eq!(gt.total_ticks, 3);
        assert_eq!(gt.until_next_tick(), 500.0);
    }

    #[test]
    fn interval_timer_jitter_does_not_lose_ticks() {
        let mut gt = GameTime::default();
        gt.update(0.0);
        let mut ticks = 0;
        let mut now = 0.0;
        for i in 0..60 {
            now += if i % 2 == 0 { 990.0 } else { 1_010.0 };
            ticks += gt.update(now);
        }
        assert_eq!(ticks, 60);
    }

    #[test]
    fn long_gap_is_clamped() {
        let mut gt = GameTime::default();
        gt.update(0.0);
        // Tab backgrounded for an hour: credited 5 seconds
        assert_eq!(gt.update(3_600_000.0), 5);
    }

    #[test]
    fn backwards_clock_credits_nothing() {
        let mut gt = GameTime::default();
        gt.update(10_000.0);
        assert_eq!(gt.update(5_000.0), 0);
        assert_eq!(gt.update(6_000.0), 1);
    }

    #[test]
    fn non_finite_timestamp_is_ignored() {
        let mut gt = GameTime::default();
        gt.update(0.0);
        assert_eq!(gt.update(f64::NAN), 0);
        assert_eq!(gt.update(2_000.0), 2);
    }

    #[test]
    fn faster_rate() {
        let mut gt = GameTime::new(4); // 250ms per tick
        gt.update(0.0);
        assert_eq!(gt.update(1_000.0), 4);
        assert_eq!(GameTime::new(0).ms_per_tick, 1_000.0);
    }
}
