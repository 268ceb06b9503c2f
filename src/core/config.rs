//! Game configuration.
//!
//! Every fixed game parameter lives here instead of being scattered as
//! literals: deck pacing, infection escalation, cube supply, hand limits
//! and the warm-up infection schedule. Defaults reproduce the standard
//! two-player game.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Name of the default hub city (where cures are discovered).
pub const DEFAULT_HUB: &str = "GENÈVE";

/// One batch of warm-up infection draws performed at reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfectionBatch {
    /// Number of infection cards drawn.
    pub draws: usize,
    /// Cubes placed per drawn card.
    pub cubes: u8,
}

impl InfectionBatch {
    #[must_use]
    pub const fn new(draws: usize, cubes: u8) -> Self {
        Self { draws, cubes }
    }
}

/// Fixed game parameters for one episode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Epidemic markers shuffled into the player deck (one per pile).
    pub epidemic_cards: usize,

    /// Steady-state infection draws per turn, indexed by infection rate.
    pub infection_rate_track: Vec<usize>,

    /// Cubes per color at the start of an episode.
    pub cube_supply: i32,

    /// Outbreak count at which the game is lost.
    pub max_outbreaks: u32,

    /// Cards a hand may hold before a discard is forced.
    pub hand_limit: usize,

    /// Same-color cards required to discover a cure.
    pub cure_threshold: usize,

    /// Cards dealt to each player at reset.
    pub starting_hand: usize,

    /// Actions per player turn.
    pub actions_per_turn: u32,

    /// Player cards drawn at the end of each turn.
    pub cards_per_draw: usize,

    /// Cubes placed by the intensify draw of an epidemic.
    pub epidemic_cubes: u8,

    /// Warm-up infection schedule applied at reset.
    pub warmup: Vec<InfectionBatch>,

    /// City where players start and cures are discovered.
    pub hub_city: String,

    /// Player whose location (and its neighbors) is protected from
    /// steady-state infection. `None` disables the rule.
    pub quarantine_player: Option<PlayerId>,

    /// Default seed for the first episode.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            epidemic_cards: 3,
            infection_rate_track: vec![2, 2, 3, 4],
            cube_supply: 16,
            max_outbreaks: 4,
            hand_limit: 6,
            cure_threshold: 4,
            starting_hand: 3,
            actions_per_turn: 4,
            cards_per_draw: 2,
            epidemic_cubes: 3,
            warmup: vec![
                InfectionBatch::new(2, 3),
                InfectionBatch::new(2, 2),
                InfectionBatch::new(2, 1),
            ],
            hub_city: DEFAULT_HUB.to_string(),
            quarantine_player: Some(PlayerId::new(1)),
            seed: 42,
        }
    }
}

impl GameConfig {
    /// Set the number of epidemic markers.
    pub fn with_epidemics(mut self, count: usize) -> Self {
        self.epidemic_cards = count;
        self
    }

    /// Set the seed used by the first episode.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the hub city by name.
    pub fn with_hub(mut self, hub: impl Into<String>) -> Self {
        self.hub_city = hub.into();
        self
    }

    /// Set (or disable) the quarantine-protected player.
    pub fn with_quarantine(mut self, player: Option<PlayerId>) -> Self {
        self.quarantine_player = player;
        self
    }

    /// Replace the warm-up infection schedule.
    pub fn with_warmup(mut self, warmup: Vec<InfectionBatch>) -> Self {
        self.warmup = warmup;
        self
    }

    /// Steady-state draws for the given infection rate index.
    ///
    /// Indices past the end of the track use its last entry.
    #[must_use]
    pub fn infection_rate(&self, index: usize) -> usize {
        let last = self.infection_rate_track.len().saturating_sub(1);
        self.infection_rate_track
            .get(index.min(last))
            .copied()
            .unwrap_or(0)
    }
}
