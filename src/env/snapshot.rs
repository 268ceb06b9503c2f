//! Episode snapshots.
//!
//! A snapshot captures everything needed to continue an episode
//! bit-for-bit: the game state, the RNG stream position and the per-turn
//! context the environment carries alongside the state.

use serde::{Deserialize, Serialize};

use crate::core::{ColorMap, GameRngState, GameState, Result};
use crate::eval::Goal;
use crate::rules::GameResult;

/// Serializable capture of a running episode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: GameState,
    pub rng: GameRngState,
    pub goal: Goal,
    /// Best cure probabilities seen so far (for share rewards).
    pub best_cure: ColorMap<f64>,
    pub result: Option<GameResult>,
    /// Episodes started by the environment, including this one.
    pub episode: u64,
}

impl Snapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode bytes produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, GameError, GameRng};

    #[test]
    fn test_bytes_round_trip() {
        let config = GameConfig::default();
        let snapshot = Snapshot {
            state: GameState::new(24, &config, crate::core::CityId(5)),
            rng: GameRng::new(9).state(),
            goal: Goal::Cure,
            best_cure: ColorMap::splat(0.25),
            result: None,
            episode: 3,
        };

        let bytes = snapshot.to_bytes().unwrap();
        let restored = Snapshot::from_bytes(&bytes).unwrap();

        assert_eq!(restored, snapshot);
    }

    #[test]
    fn test_truncated_bytes_fail() {
        let result = Snapshot::from_bytes(&[1, 2, 3]);
        assert!(matches!(result, Err(GameError::Snapshot(_))));
    }
}
