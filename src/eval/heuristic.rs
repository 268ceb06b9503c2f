//! Goal-gated heuristic state evaluation.
//!
//! Lower scores are better. The score is a weighted sum of sub-heuristics:
//!
//! | Term                 | Meaning                                              |
//! |----------------------|------------------------------------------------------|
//! | `survival_distance`  | cube-weighted mean distance from cubes to nearest player |
//! | `cure_distance`      | summed player distance to the hub                    |
//! | `share_distance`     | summed player distance to the hand-off city          |
//! | `card_deficit`       | cards still missing per uncured color (best hand)    |
//! | `discard_risk`       | discarded city cards of uncured colors               |
//! | `infection_severity` | 1.5 per city at the cap, 0.5 per other infected city |
//! | `cure_progress`      | uncured colors                                       |
//!
//! Exactly one distance term is active, selected by the `Goal`.

use serde::{Deserialize, Serialize};

use crate::core::{CityId, Color, GameState};
use crate::rules::{HotZoneRules, RulesEngine};

use super::goal::Goal;

/// Weights of the evaluator terms.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeuristicWeights {
    /// Weight of whichever distance term the goal selects.
    pub distance: f64,
    pub cards: f64,
    pub discard: f64,
    pub infection: f64,
    pub cure: f64,
    /// Weight of `discard_risk` inside `discard_score`.
    pub discard_choice: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            distance: 0.5,
            cards: 1.0,
            discard: 1.5,
            infection: 0.6,
            cure: 24.0,
            discard_choice: 0.5,
        }
    }
}

impl HeuristicWeights {
    /// Set the cure-progress weight.
    pub fn with_cure(mut self, weight: f64) -> Self {
        self.cure = weight;
        self
    }

    /// Set the distance weight.
    pub fn with_distance(mut self, weight: f64) -> Self {
        self.distance = weight;
        self
    }
}

/// Heuristic evaluator over a rules context.
#[derive(Clone, Debug)]
pub struct Evaluator<'a> {
    rules: &'a HotZoneRules,
    weights: &'a HeuristicWeights,
}

impl<'a> Evaluator<'a> {
    #[must_use]
    pub fn new(rules: &'a HotZoneRules, weights: &'a HeuristicWeights) -> Self {
        Self { rules, weights }
    }

    /// Weighted score of a state under a goal. Lower is better.
    #[must_use]
    pub fn score(&self, state: &GameState, goal: Goal) -> f64 {
        let w = self.weights;
        let distance = match goal {
            Goal::Cure => self.cure_distance(state),
            Goal::Share { city } => self.share_distance(state, city),
            Goal::Survive => self.survival_distance(state),
        };

        w.distance * distance
            + w.cards * self.card_deficit(state)
            + w.discard * self.discard_risk(state)
            + w.infection * self.infection_severity(state)
            + w.cure * self.cure_progress(state)
    }

    /// Score used to choose which cards to discard. Lower is better.
    #[must_use]
    pub fn discard_score(&self, state: &GameState) -> f64 {
        self.card_deficit(state) + self.weights.discard_choice * self.discard_risk(state)
    }

    // === Sub-heuristics ===

    /// Cube-weighted mean of each city's distance to the nearest player.
    ///
    /// 0 when nothing is infected.
    #[must_use]
    pub fn survival_distance(&self, state: &GameState) -> f64 {
        let graph = self.rules.graph();
        let mut weighted = 0u32;
        let mut total = 0u32;

        for city in graph.ids() {
            let cubes = state.cities[city.index()].total();
            if cubes == 0 {
                continue;
            }
            let nearest = state
                .players
                .values()
                .map(|p| graph.distance(city, p.location))
                .min()
                .unwrap_or(0);
            weighted += nearest * cubes;
            total += cubes;
        }

        if total == 0 {
            0.0
        } else {
            f64::from(weighted) / f64::from(total)
        }
    }

    /// Summed player distance to the hub.
    #[must_use]
    pub fn cure_distance(&self, state: &GameState) -> f64 {
        self.share_distance(state, self.rules.hub())
    }

    /// Summed player distance to a meeting city.
    #[must_use]
    pub fn share_distance(&self, state: &GameState, city: CityId) -> f64 {
        let graph = self.rules.graph();
        let sum: u32 = state.players.values().map(|p| graph.distance(p.location, city)).sum();
        f64::from(sum)
    }

    /// Cards the best single hand still lacks, summed over uncured colors.
    #[must_use]
    pub fn card_deficit(&self, state: &GameState) -> f64 {
        let threshold = self.rules.config().cure_threshold;
        let deficit: usize = Color::ALL
            .into_iter()
            .filter(|&c| !state.cures[c])
            .map(|c| {
                let best = state
                    .players
                    .values()
                    .map(|p| self.rules.color_count(&p.hand, c))
                    .max()
                    .unwrap_or(0);
                threshold.saturating_sub(best)
            })
            .sum();
        deficit as f64
    }

    /// Discarded city cards whose color is still uncured.
    #[must_use]
    pub fn discard_risk(&self, state: &GameState) -> f64 {
        let graph = self.rules.graph();
        state
            .decks
            .player_discard
            .iter()
            .filter_map(|card| card.city())
            .filter(|&c| !state.cures[graph.color(c)])
            .count() as f64
    }

    /// 1.5 per city with any color at the cap, 0.5 per other infected city.
    #[must_use]
    pub fn infection_severity(&self, state: &GameState) -> f64 {
        state
            .cities
            .iter()
            .map(|city| {
                if city.at_cap() {
                    1.5
                } else if city.total() > 0 {
                    0.5
                } else {
                    0.0
                }
            })
            .sum()
    }

    /// Number of uncured colors.
    #[must_use]
    pub fn cure_progress(&self, state: &GameState) -> f64 {
        state.cures.values().filter(|&&c| !c).count() as f64
    }
}
