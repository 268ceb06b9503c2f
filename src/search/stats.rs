//! Planner statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one planning call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStats {
    /// Child states generated and scored.
    pub nodes_scored: u32,

    /// Leaf states evaluated (depth bound, won state, or dead end).
    pub leaves: u32,

    /// Deepest ply reached.
    pub max_depth: u32,

    /// Total time spent planning (microseconds).
    pub time_us: u64,
}

impl PlanStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate scored nodes per second.
    #[must_use]
    pub fn nodes_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.nodes_scored as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default() {
        let stats = PlanStats::new();
        assert_eq!(stats.nodes_scored, 0);
        assert_eq!(stats.nodes_per_second(), 0.0);
    }

    #[test]
    fn test_nodes_per_second() {
        let stats = PlanStats {
            nodes_scored: 500,
            time_us: 500_000,
            ..PlanStats::default()
        };
        assert_eq!(stats.nodes_per_second(), 1000.0);
    }
}
