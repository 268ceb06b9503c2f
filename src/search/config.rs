//! Planner configuration parameters.

use serde::{Deserialize, Serialize};

use crate::eval::HeuristicWeights;

/// Beam planner configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Total plies searched (two player turns by default).
    pub depth: u32,

    /// Children kept per node after ranking by immediate score.
    pub beam_width: usize,

    /// Plies after which the acting player switches and the goal is
    /// re-selected for the partner.
    pub plies_per_turn: u32,

    /// Evaluator weights used for ranking and leaf scores.
    pub weights: HeuristicWeights,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            depth: 8,
            beam_width: 3,
            plies_per_turn: 4,
            weights: HeuristicWeights::default(),
        }
    }
}

impl PlannerConfig {
    /// Create a new config with custom depth.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Create a new config with custom beam width.
    pub fn with_beam_width(mut self, width: usize) -> Self {
        self.beam_width = width;
        self
    }

    /// Create a new config with custom evaluator weights.
    pub fn with_weights(mut self, weights: HeuristicWeights) -> Self {
        self.weights = weights;
        self
    }
}
