//! Bounded beam search over action sequences.
//!
//! At every ply the planner applies each legal action to its own copy of
//! the state, ranks the children by their immediate heuristic score, keeps
//! the best `beam_width` and recurses. Once the active player's remaining
//! actions of the turn are spent, the acting player switches to the
//! partner and the goal is re-selected on that branch's state. The sequence whose leaf scores lowest wins; ties
//! keep the first sequence found.
//!
//! No card draws or infections are simulated: the search is a
//! deterministic lookahead over player actions only.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::core::{Action, GameState};
use crate::eval::{choose_goal, Evaluator, Goal};
use crate::rules::{HotZoneRules, RulesEngine};

use super::config::PlannerConfig;
use super::stats::PlanStats;

/// Result of one planning call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Best action sequence, first action first. Empty if the root is
    /// already won or has no legal action.
    pub actions: Vec<Action>,

    /// Leaf score of the chosen sequence.
    pub score: f64,

    pub stats: PlanStats,
}

/// Beam planner.
#[derive(Clone, Debug, Default)]
pub struct BeamPlanner {
    config: PlannerConfig,
}

impl BeamPlanner {
    /// Create a planner with the given configuration.
    #[must_use]
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// Get the planner configuration.
    #[must_use]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Search for the best action sequence from `state` under `goal`.
    ///
    /// `state` is never modified; every branch works on its own copy.
    #[must_use]
    pub fn plan(&self, rules: &HotZoneRules, state: &GameState, goal: Goal) -> Plan {
        let start = Instant::now();
        let mut search = Search {
            rules,
            evaluator: Evaluator::new(rules, &self.config.weights),
            config: &self.config,
            turn_end: self.config.plies_per_turn.saturating_sub(state.actions_taken),
            stats: PlanStats::new(),
            best: None,
        };

        let mut sequence = Vec::with_capacity(self.config.depth as usize);
        search.expand(state.clone(), 0, goal, &mut sequence);

        let mut stats = search.stats;
        stats.time_us = start.elapsed().as_micros() as u64;
        let (score, actions) = search.best.unwrap_or((f64::INFINITY, Vec::new()));

        log::debug!(
            "planned {} actions (score {:.2}, {} nodes, {}us)",
            actions.len(),
            score,
            stats.nodes_scored,
            stats.time_us
        );

        Plan { actions, score, stats }
    }

    /// Plan for the active player with a freshly selected goal.
    #[must_use]
    pub fn plan_turn(&self, rules: &HotZoneRules, state: &GameState) -> Plan {
        self.plan(rules, state, choose_goal(rules, state))
    }
}

/// Mutable context of one planning call.
struct Search<'a> {
    rules: &'a HotZoneRules,
    evaluator: Evaluator<'a>,
    config: &'a PlannerConfig,
    /// Ply at which the root player's turn runs out.
    turn_end: u32,
    stats: PlanStats,
    best: Option<(f64, Vec<Action>)>,
}

impl Search<'_> {
    fn expand(&mut self, mut state: GameState, depth: u32, mut goal: Goal, sequence: &mut Vec<Action>) {
        self.stats.max_depth = self.stats.max_depth.max(depth);

        if depth > 0 && depth == self.turn_end && depth < self.config.depth {
            state.pass_turn();
            goal = choose_goal(self.rules, &state);
        }

        if depth >= self.config.depth || state.all_cured() {
            self.leaf(&state, goal, sequence);
            return;
        }

        let mut children: Vec<(Action, GameState, f64)> = Vec::new();
        for action in self.rules.legal_actions(&state) {
            let mut next = state.clone();
            match self.rules.apply_action(&mut next, action) {
                Ok(()) => {
                    let score = self.evaluator.score(&next, goal);
                    children.push((action, next, score));
                }
                Err(err) => log::warn!("planner skipped {:?}: {}", action, err),
            }
        }
        self.stats.nodes_scored += children.len() as u32;

        if children.is_empty() {
            self.leaf(&state, goal, sequence);
            return;
        }

        // Stable sort: equal scores keep vocabulary order.
        children.sort_by(|a, b| a.2.total_cmp(&b.2));
        children.truncate(self.config.beam_width);

        for (action, next, _) in children {
            sequence.push(action);
            self.expand(next, depth + 1, goal, sequence);
            sequence.pop();
        }
    }

    fn leaf(&mut self, state: &GameState, goal: Goal, sequence: &[Action]) {
        self.stats.leaves += 1;
        let score = self.evaluator.score(state, goal);
        if self.best.as_ref().map_or(true, |(best, _)| score < *best) {
            self.best = Some((score, sequence.to_vec()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CityId, Color, GameConfig, PlayerId};
    use crate::map::europe;
    use std::sync::Arc;

    fn rules() -> HotZoneRules {
        HotZoneRules::new(Arc::new(europe().unwrap()), GameConfig::default()).unwrap()
    }

    fn city(rules: &HotZoneRules, name: &str) -> CityId {
        rules.graph().lookup(name).unwrap()
    }

    fn state(rules: &HotZoneRules) -> GameState {
        GameState::new(rules.city_count(), rules.config(), rules.hub())
    }

    #[test]
    fn test_plan_full_depth() {
        let rules = rules();
        let state = state(&rules);

        let plan = BeamPlanner::default().plan_turn(&rules, &state);

        assert_eq!(plan.actions.len(), 8);
        assert!(plan.score.is_finite());
        assert_eq!(plan.stats.max_depth, 8);
        // 3^8 leaves at most.
        assert!(plan.stats.leaves <= 6561);
    }

    #[test]
    fn test_plan_does_not_touch_state() {
        let rules = rules();
        let mut state = state(&rules);
        state.place_cubes(city(&rules, "PARIS"), Color::Blue, 2);
        let before = state.clone();

        let _ = BeamPlanner::default().plan_turn(&rules, &state);

        assert_eq!(state, before);
    }

    #[test]
    fn test_plan_finds_cure() {
        let rules = rules();
        let mut state = state(&rules);
        state.players[PlayerId::new(0)].hand = ["LISBOA", "MADRID", "ROMA", "NAPOLI"]
            .iter()
            .map(|n| city(&rules, n))
            .collect();

        let plan = BeamPlanner::default().plan(&rules, &state, Goal::Cure);

        assert!(plan.actions.contains(&Action::FindCure(Color::Yellow)));
    }

    #[test]
    fn test_plan_moves_towards_infection() {
        let rules = rules();
        let mut state = state(&rules);
        let oslo = city(&rules, "OSLO");
        state.place_cubes(oslo, Color::Blue, 3);
        let config = PlannerConfig::default().with_depth(2);

        let plan = BeamPlanner::new(config).plan(&rules, &state, Goal::Survive);

        let first = plan.actions[0].destination().unwrap();
        assert!(rules.graph().distance(first, oslo) < rules.graph().distance(rules.hub(), oslo));
    }

    #[test]
    fn test_won_root_returns_empty_plan() {
        let rules = rules();
        let mut state = state(&rules);
        state.cures = crate::core::ColorMap::splat(true);

        let plan = BeamPlanner::default().plan(&rules, &state, Goal::Survive);

        assert!(plan.actions.is_empty());
        assert_eq!(plan.stats.leaves, 1);
    }

    #[test]
    fn test_mid_turn_plan_switches_early() {
        let rules = rules();
        let mut state = state(&rules);
        let oslo = city(&rules, "OSLO");
        state.players[PlayerId::new(1)].location = oslo;
        state.actions_taken = 3;
        let config = PlannerConfig::default().with_depth(3);

        let plan = BeamPlanner::new(config).plan(&rules, &state, Goal::Survive);

        // One action left for the hub player, then the partner moves from OSLO.
        assert_eq!(plan.actions.len(), 3);
        let first = plan.actions[0].destination().unwrap();
        let second = plan.actions[1].destination().unwrap();
        assert!(rules.graph().is_adjacent(rules.hub(), first));
        assert!(rules.graph().is_adjacent(oslo, second));
    }

    #[test]
    fn test_plan_is_deterministic() {
        let rules = rules();
        let mut state = state(&rules);
        state.place_cubes(city(&rules, "ROMA"), Color::Yellow, 2);
        let planner = BeamPlanner::new(PlannerConfig::default().with_depth(5));

        let a = planner.plan_turn(&rules, &state);
        let b = planner.plan_turn(&rules, &state);

        assert_eq!(a.actions, b.actions);
        assert_eq!(a.score, b.score);
    }
}
