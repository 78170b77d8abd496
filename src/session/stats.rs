pub const POINTS_PER_CORRECT: u32 = 10;

/// Score and attempt counters for the current session. Not persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub score: u32,
    pub streak: u32,
    pub total_attempts: u32,
    pub correct_attempts: u32,
}

impl SessionStats {
    pub fn record_correct(&mut self) {
        self.correct_attempts += 1;
        self.total_attempts += 1;
        self.streak += 1;
        self.score += POINTS_PER_CORRECT;
    }

    /// Wrong answer or timeout.
    pub fn record_miss(&mut self) {
        self.total_attempts += 1;
        self.streak = 0;
    }

    /// Rounded percentage of correct attempts, 100 before any attempt.
    pub fn accuracy(&self) -> u32 {
        if self.total_attempts == 0 {
            return 100;
        }
        let pct = self.correct_attempts as f64 / self.total_attempts as f64 * 100.0;
        (pct.round() as u32).min(100)
    }
}
