//! Hand-limit discard decisions.
//!
//! The engine only detects an over-limit hand and enforces the discard;
//! which cards go is decided by a `DiscardPolicy`.

use crate::cards::discard_cards;
use crate::core::{CityId, GameState, PlayerId};
use crate::eval::{Evaluator, HeuristicWeights};
use crate::rules::{HotZoneRules, RulesEngine};

/// Chooses which cards an over-limit player discards.
pub trait DiscardPolicy: Send + Sync {
    /// Pick exactly `excess` cards from `player`'s hand.
    fn choose(&self, rules: &HotZoneRules, state: &GameState, player: PlayerId, excess: usize) -> Vec<CityId>;
}

impl<F> DiscardPolicy for F
where
    F: Fn(&HotZoneRules, &GameState, PlayerId, usize) -> Vec<CityId> + Send + Sync,
{
    fn choose(&self, rules: &HotZoneRules, state: &GameState, player: PlayerId, excess: usize) -> Vec<CityId> {
        self(rules, state, player, excess)
    }
}

/// Default policy: try every combination of `excess` cards and keep the
/// one whose resulting state has the lowest discard score.
///
/// Combinations are visited in lexicographic hand-position order; ties
/// keep the first found.
#[derive(Clone, Debug, Default)]
pub struct HeuristicDiscard {
    weights: HeuristicWeights,
}

impl HeuristicDiscard {
    #[must_use]
    pub fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }
}

impl DiscardPolicy for HeuristicDiscard {
    fn choose(&self, rules: &HotZoneRules, state: &GameState, player: PlayerId, excess: usize) -> Vec<CityId> {
        let evaluator = Evaluator::new(rules, &self.weights);
        let hand = &state.players[player].hand;
        let mut best: Option<(f64, Vec<CityId>)> = None;

        for positions in combinations(hand.len(), excess) {
            let cards: Vec<CityId> = positions.iter().map(|&i| hand[i]).collect();
            let mut trial = state.clone();
            if discard_cards(&mut trial, rules.config(), player, &cards).is_err() {
                continue;
            }
            let score = evaluator.discard_score(&trial);
            if best.as_ref().map_or(true, |(b, _)| score < *b) {
                best = Some((score, cards));
            }
        }

        best.map(|(_, cards)| cards).unwrap_or_default()
    }
}

/// All `k`-element index combinations of `0..n`, in lexicographic order.
fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    fn extend(start: usize, n: usize, k: usize, current: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if current.len() == k {
            out.push(current.clone());
            return;
        }
        for i in start..n {
            current.push(i);
            extend(i + 1, n, k, current, out);
            current.pop();
        }
    }

    let mut out = Vec::new();
    if k <= n {
        extend(0, n, k, &mut Vec::with_capacity(k), &mut out);
    }
    out
}
