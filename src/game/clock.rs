/// Fixed logical step clock.
///
/// Frame deltas are fed into `accumulated_ms`; every time a whole
/// `step_interval_ms` has built up, one logical step is consumed. The
/// leftover is kept rather than zeroed so timing stays accurate under
/// variable frame rates. `accumulated_ms` is kept within one interval so the
/// interpolation fraction stays inside `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationClock {
    pub step_interval_ms: f64,
    pub accumulated_ms: f64,
}

impl SimulationClock {
    pub fn new(step_interval_ms: f64) -> Self {
        Self {
            step_interval_ms,
            accumulated_ms: 0.0,
        }
    }

    /// Add elapsed frame time. Negative deltas are ignored.
    pub fn accumulate(&mut self, delta_ms: f64) {
        self.accumulated_ms += delta_ms.max(0.0);
    }

    /// Consume one step's worth of time if available.
    pub fn consume_step(&mut self) -> bool {
        if self.accumulated_ms >= self.step_interval_ms {
            self.accumulated_ms -= self.step_interval_ms;
            self.accumulated_ms = self.accumulated_ms.min(self.step_interval_ms);
            true
        } else {
            false
        }
    }

    /// Progress towards the next step, clamped to `[0, 1]`
    pub fn fraction(&self) -> f64 {
        if self.step_interval_ms <= 0.0 {
            return 1.0;
        }
        (self.accumulated_ms / self.step_interval_ms).clamp(0.0, 1.0)
    }

    /// Shorten the step interval, never going below `floor_ms`.
    /// Returns true if the interval actually changed.
    pub fn speed_up(&mut self, decrement_ms: f64, floor_ms: f64) -> bool {
        let next = (self.step_interval_ms - decrement_ms).max(floor_ms);
        if next < self.step_interval_ms {
            self.step_interval_ms = next;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut clock = SimulationClock::new(150.0);
        clock.accumulate(150.0);
        assert!(clock.consume_step());
        assert_eq!(clock.accumulated_ms, 0.0);
    }

    #[test]
    fn accumulates_partial() {
        let mut clock = SimulationClock::new(150.0);
        clock.accumulate(100.0);
        assert!(!clock.consume_step());
        clock.accumulate(70.0);
        assert!(clock.consume_step());
        // remainder is preserved, not reset
        assert_eq!(clock.accumulated_ms, 20.0);
    }

    #[test]
    fn negative_delta_is_ignored() {
        let mut clock = SimulationClock::new(150.0);
        clock.accumulate(-40.0);
        assert_eq!(clock.accumulated_ms, 0.0);
    }

    #[test]
    fn remainder_is_capped_at_one_interval() {
        let mut clock = SimulationClock::new(100.0);
        clock.accumulate(450.0);
        assert!(clock.consume_step());
        assert_eq!(clock.accumulated_ms, 100.0);
        assert_eq!(clock.fraction(), 1.0);
    }

    #[test]
    fn fraction_is_between_zero_and_one() {
        let mut clock = SimulationClock::new(150.0);
        assert_eq!(clock.fraction(), 0.0);
        clock.accumulate(75.0);
        assert_eq!(clock.fraction(), 0.5);
        clock.accumulate(500.0);
        assert_eq!(clock.fraction(), 1.0);
    }

    #[test]
    fn speed_up_respects_floor() {
        let mut clock = SimulationClock::new(60.0);
        assert!(clock.speed_up(10.0, 50.0));
        assert_eq!(clock.step_interval_ms, 50.0);
        assert!(!clock.speed_up(10.0, 50.0));
        assert_eq!(clock.step_interval_ms, 50.0);
    }

    #[test]
    fn speed_up_clamps_partial_decrement() {
        let mut clock = SimulationClock::new(55.0);
        assert!(clock.speed_up(10.0, 50.0));
        assert_eq!(clock.step_interval_ms, 50.0);
    }
}
