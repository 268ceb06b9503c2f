//! Scripted episodes driven by the planner.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::{Action, GameError, Result};
use crate::rules::{GameResult, RulesEngine};
use crate::search::BeamPlanner;

use super::environment::HotZoneEnv;

/// Summary of one scripted episode.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// `None` if the step limit was hit first.
    pub result: Option<GameResult>,
    pub rounds: u32,
    pub steps: usize,
    pub total_reward: f64,
    pub outbreaks: u32,
    pub epidemics: u32,
    pub cures: usize,
    /// Steps that fell back to the first legal action.
    pub fallbacks: usize,
}

impl EpisodeSummary {
    #[must_use]
    pub fn won(&self) -> bool {
        self.result.is_some_and(|r| r.is_victory())
    }
}

/// Play the current episode of `env` to the end.
///
/// At the start of every turn the planner is asked for a sequence under
/// the environment's goal; the actions belonging to the current turn are
/// then replayed one `step` at a time. An empty plan or an action that is
/// no longer legal falls back to the first legal action.
pub fn play_episode(env: &mut HotZoneEnv, planner: &BeamPlanner, max_steps: usize) -> Result<EpisodeSummary> {
    let mut summary = EpisodeSummary::default();
    let mut queue: VecDeque<Action> = VecDeque::new();

    while !env.is_done() && summary.steps < max_steps {
        if queue.is_empty() {
            let plan = planner.plan(env.rules(), env.state(), env.goal());
            let remaining = env
                .rules()
                .config()
                .actions_per_turn
                .saturating_sub(env.state().actions_taken) as usize;
            queue.extend(plan.actions.into_iter().take(remaining));
        }

        let action = match queue.pop_front() {
            Some(action) if env.rules().is_legal(env.state(), action) => action,
            _ => {
                queue.clear();
                summary.fallbacks += 1;
                env.legal_actions()
                    .first()
                    .copied()
                    .ok_or_else(|| GameError::InvariantViolation("no legal action".into()))?
            }
        };

        let step = env.step_action(action)?;
        summary.steps += 1;
        summary.total_reward += step.reward;
        if step.info.turn_ended {
            queue.clear();
        }
    }

    let state = env.state();
    summary.result = env.result();
    summary.rounds = state.round;
    summary.outbreaks = state.outbreak_count;
    summary.epidemics = state.epidemic_count;
    summary.cures = state.cures.values().filter(|&&c| c).count();

    log::info!(
        "episode {} played: {:?} in {} rounds, reward {:.2}",
        env.episode(),
        summary.result,
        summary.rounds,
        summary.total_reward
    );

    Ok(summary)
}
