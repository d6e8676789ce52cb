//! Metastability guard between the raw receive line and the clocked domain.

/// Three-stage shift pipeline over the raw receive-line sample.
///
/// The receive machine only ever reads the oldest stage, never the raw line,
/// so an asynchronous edge settles for two full cycles before the state
/// machine can act on it. Stages reset to high, the line's idle mark level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct LineSynchronizer {
    stages: [bool; 3],
}

impl Default for LineSynchronizer {
    fn default() -> Self {
        Self { stages: [true; 3] }
    }
}

impl LineSynchronizer {
    /// Shifts in one raw sample and returns the synchronized value.
    ///
    /// Called exactly once per clock cycle regardless of receiver phase.
    pub fn sample(&mut self, raw: bool) -> bool {
        self.stages = [raw, self.stages[0], self.stages[1]];
        self.stages[2]
    }

    /// Current synchronized value without advancing the pipeline.
    #[must_use]
    pub const fn synced(&self) -> bool {
        self.stages[2]
    }
}

#[cfg(test)]
mod tests {
    use super::LineSynchronizer;

    #[test]
    fn pipeline_starts_at_idle_mark() {
        let sync = LineSynchronizer::default();
        assert!(sync.synced());
    }

    #[test]
    fn samples_emerge_after_two_cycles() {
        let mut sync = LineSynchronizer::default();
        assert!(sync.sample(false));
        assert!(sync.sample(false));
        assert!(!sync.sample(false));
        assert!(!sync.synced());
    }

    #[test]
    fn pipeline_is_a_pure_delay() {
        let raw = [false, true, true, false, false, true, false, true];
        let mut sync = LineSynchronizer::default();
        let seen: Vec<bool> = raw.iter().map(|&bit| sync.sample(bit)).collect();
        // First two outputs are the reset mark level, then raw delayed by two.
        assert_eq!(seen[..2], [true, true]);
        assert_eq!(seen[2..], raw[..raw.len() - 2]);
    }
}
