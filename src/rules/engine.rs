//! Rules engine trait.
//!
//! The environment, the planner and the Python bindings only talk to the
//! game through `RulesEngine`:
//! - Which actions are legal in a state
//! - How an action modifies state
//! - Win/loss conditions

use serde::{Deserialize, Serialize};

use crate::core::{Action, Color, GameConfig, GameState, Result};

/// Why an episode was lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossReason {
    /// Outbreak count reached the limit.
    Outbreaks,
    /// A placement could not be covered by the color's pool.
    CubesExhausted(Color),
    /// Not enough player cards left for the end-of-turn draw.
    PlayerDeckExhausted,
}

/// Result of a completed episode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// All diseases cured.
    Victory,
    Defeat(LossReason),
}

impl GameResult {
    #[must_use]
    pub fn is_victory(&self) -> bool {
        matches!(self, GameResult::Victory)
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `is_legal`: recomputed from the state on every call, never cached
/// - `apply_action`: must validate first and leave the state untouched on
///   error; must be deterministic (no randomness in actions)
/// - `is_terminal`: return `None` while the episode continues
pub trait RulesEngine {
    /// Get the game configuration.
    fn config(&self) -> &GameConfig;

    /// Number of cities on the map (fixes the vocabulary size).
    fn city_count(&self) -> usize;

    /// Check whether the active player may take `action` now.
    fn is_legal(&self, state: &GameState, action: Action) -> bool;

    /// Validate and apply an action for the active player.
    fn apply_action(&self, state: &mut GameState, action: Action) -> Result<()>;

    /// Check if the episode is over.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Size of the fixed action vocabulary.
    fn vocabulary_size(&self) -> usize {
        Action::vocabulary_size(self.city_count())
    }

    /// Legality of every vocabulary entry, in index order.
    fn action_mask(&self, state: &GameState) -> Vec<bool> {
        Action::all(self.city_count())
            .map(|action| self.is_legal(state, action))
            .collect()
    }

    /// Enumerate all legal actions, in vocabulary order.
    fn legal_actions(&self, state: &GameState) -> Vec<Action> {
        Action::all(self.city_count())
            .filter(|&action| self.is_legal(state, action))
            .collect()
    }
}
