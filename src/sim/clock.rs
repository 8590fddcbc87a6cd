//! Frame clock
//!
//! Turns the host's raw frame timestamps into deltas. The raw delta is only
//! bookkeeping: every simulated increment uses the fixed step, and a stalled
//! host still advances exactly one fixed step per frame (no catch-up).

/// Converts variable-rate frame callbacks into a fixed simulation step
#[derive(Debug, Clone)]
pub struct SimulationClock {
    last_time: Option<f64>,
    fixed_delta: f64,
}

impl SimulationClock {
    pub fn new(fixed_delta: f64) -> Self {
        Self {
            last_time: None,
            fixed_delta,
        }
    }

    /// Record a frame timestamp and return the raw delta since the previous one.
    ///
    /// The first call establishes the baseline and returns 0.
    pub fn advance(&mut self, timestamp: f64) -> f64 {
        let dt = match self.last_time {
            Some(last) => timestamp - last,
            None => 0.0,
        };
        self.last_time = Some(timestamp);
        dt
    }

    /// True until the first timestamp has been seen
    pub fn awaiting_baseline(&self) -> bool {
        self.last_time.is_none()
    }

    pub fn fixed_delta(&self) -> f64 {
        self.fixed_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FIXED_DELTA;

    #[test]
    fn test_first_frame_is_baseline() {
        let mut clock = SimulationClock::new(FIXED_DELTA);
        assert!(clock.awaiting_baseline());
        assert_eq!(clock.advance(12.5), 0.0);
        assert!(!clock.awaiting_baseline());
        assert!((clock.advance(12.6) - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_deltas_from_raw_timestamps() {
        let mut clock = SimulationClock::new(FIXED_DELTA);
        let deltas: Vec<f64> = [0.0, 0.016, 0.033]
            .iter()
            .map(|&t| clock.advance(t))
            .collect();
        assert_eq!(deltas[0], 0.0);
        assert!((deltas[1] - 0.016).abs() < 1e-9);
        assert!((deltas[2] - 0.017).abs() < 1e-9);
        assert!((deltas.iter().sum::<f64>() - 0.033).abs() < 1e-9);
    }

    #[test]
    fn test_zero_timestamp_still_sets_baseline() {
        // A literal 0.0 timestamp must not be mistaken for "no baseline yet"
        let mut clock = SimulationClock::new(FIXED_DELTA);
        clock.advance(0.0);
        assert!((clock.advance(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_stall_reports_full_raw_delta() {
        // Simulation still takes a single fixed step for this frame
        let mut clock = SimulationClock::new(FIXED_DELTA);
        clock.advance(1.0);
        assert!((clock.advance(4.0) - 3.0).abs() < 1e-12);
        assert_eq!(clock.fixed_delta(), FIXED_DELTA);
    }
}
