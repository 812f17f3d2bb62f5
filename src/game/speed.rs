use crate::config;

/// Score-indexed scroll ramp.
///
/// Levels are the number of thresholds the score has crossed, clamped to
/// the last advance entry; the level never moves backwards within a run
/// because score never does.
#[derive(Clone, Debug)]
pub struct SpeedPolicy {
    thresholds: Vec<u32>,
    advances: Vec<f32>,
}

impl SpeedPolicy {
    pub fn new(thresholds: Vec<u32>, advances: Vec<f32>) -> Self {
        assert!(!advances.is_empty(), "a speed ramp needs at least one advance");
        assert!(
            thresholds.windows(2).all(|w| w[0] < w[1]),
            "speed thresholds must be strictly ascending"
        );
        Self { thresholds, advances }
    }

    /// The ramp every run uses.
    pub fn standard() -> Self {
        Self::new(
            config::SPEED_THRESHOLDS.to_vec(),
            config::SPEED_ADVANCES.to_vec(),
        )
    }

    pub fn max_level(&self) -> usize {
        self.advances.len() - 1
    }

    /// Highest level whose threshold the score has reached.
    pub fn level_for(&self, score: u32) -> usize {
        let crossed = self.thresholds.iter().take_while(|&&t| t <= score).count();
        crossed.min(self.max_level())
    }

    /// Pixels a descending tile moves per tick at `level`.
    pub fn advance(&self, level: usize) -> f32 {
        self.advances[level.min(self.max_level())]
    }
}
