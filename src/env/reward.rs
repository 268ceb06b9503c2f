//! Per-step reward shaping.

use serde::{Deserialize, Serialize};

use crate::core::{Action, CityId, ColorMap, GameState};
use crate::eval::{cure_probabilities, Goal};
use crate::rules::{GameResult, HotZoneRules};

const PROGRESS_SCALE: f64 = 0.1;
const CURE_BONUS: f64 = 3.0;
const SHARE_BONUS: f64 = 1.0;
const FLIGHT_PENALTY: f64 = -0.1;
const TREAT_HEAVY: f64 = 0.3;
const TREAT_LIGHT: f64 = 0.1;
/// Level left after treating that earns the heavy bonus.
const TREAT_HEAVY_LEVEL: u8 = 2;

/// Reward for winning the episode.
pub const WIN_REWARD: f64 = 10.0;

/// Reward for losing the episode.
pub const LOSS_REWARD: f64 = -10.0;

/// One step's reward, term by term.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardBreakdown {
    /// Distance gained towards the goal's target city.
    pub progress: f64,
    pub cure: f64,
    /// Bonus for a share that raised the best cure probability.
    pub share: f64,
    /// Penalty for spending a card of an uncured color on a flight.
    pub flight: f64,
    pub treat: f64,
    /// Win or loss reward; replaces every other term when set.
    pub terminal: Option<f64>,
}

impl RewardBreakdown {
    /// Scalar reward.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.terminal
            .unwrap_or(self.progress + self.cure + self.share + self.flight + self.treat)
    }

    /// Record the episode outcome.
    pub fn finish(&mut self, result: GameResult) {
        self.terminal = Some(if result.is_victory() { WIN_REWARD } else { LOSS_REWARD });
    }
}

/// Shape the reward for `action`, applied by the active player.
///
/// `from` is the mover's location before the action, `after` the state
/// right after it (before any end-of-turn draw), and `best_cure` the best
/// cure probabilities seen before the action.
#[must_use]
pub fn shape_reward(
    rules: &HotZoneRules,
    after: &GameState,
    action: Action,
    from: CityId,
    goal: Goal,
    best_cure: &ColorMap<f64>,
) -> RewardBreakdown {
    let graph = rules.graph();
    let here = after.active().location;
    let mut reward = RewardBreakdown::default();

    if let Some(target) = goal.target(rules) {
        let gained = graph.distance(from, target) as f64 - graph.distance(here, target) as f64;
        reward.progress = PROGRESS_SCALE * gained;
    }

    match action {
        Action::FindCure(_) => reward.cure = CURE_BONUS,
        Action::ShareKnowledge => {
            let color = graph.color(here);
            if cure_probabilities(rules, after)[color] > best_cure[color] {
                reward.share = SHARE_BONUS;
            }
        }
        Action::DirectFlight(to) => {
            if !after.cures[graph.color(to)] {
                reward.flight = FLIGHT_PENALTY;
            }
        }
        Action::CharterFlight(_) => {
            if !after.cures[graph.color(from)] {
                reward.flight = FLIGHT_PENALTY;
            }
        }
        Action::Treat(color) => {
            reward.treat = if after.level(here, color) == TREAT_HEAVY_LEVEL {
                TREAT_HEAVY
            } else {
                TREAT_LIGHT
            };
        }
        Action::Drive(_) => {}
    }

    reward
}
