//! The episode environment.
//!
//! `HotZoneEnv` owns one episode: the rules, the state, the episode RNG and
//! the per-turn goal. `step` takes an index into the fixed action
//! vocabulary, applies it and, once the active player has spent their
//! actions, runs the end-of-turn draw and infection.

use std::fmt;
use std::sync::Arc;

use crate::cards::{deal, discard_cards, draw_player_cards, over_limit};
use crate::core::{
    Action, CityId, Color, ColorMap, GameConfig, GameError, GameRng, GameState, PlayerId, Result,
};
use crate::eval::{choose_goal, cure_probabilities, Goal};
use crate::infection::{apply_infection_draw, DrawFrom};
use crate::map::{europe, CityGraph};
use crate::rules::{GameResult, HotZoneRules, RulesEngine};

use super::discard::{DiscardPolicy, HeuristicDiscard};
use super::observation::encode_observation;
use super::reward::{shape_reward, RewardBreakdown};
use super::snapshot::Snapshot;

/// Outcome of one `step`.
#[derive(Clone, Debug, PartialEq)]
pub struct StepResult {
    pub observation: Vec<f32>,
    pub reward: f64,
    pub done: bool,
    pub info: StepInfo,
}

/// Details of one `step`.
#[derive(Clone, Debug, PartialEq)]
pub struct StepInfo {
    pub action: Action,
    pub label: String,
    pub breakdown: RewardBreakdown,

    /// The action was the last of the turn and the end-of-turn draw ran.
    pub turn_ended: bool,

    /// Epidemics resolved by the end-of-turn draw.
    pub epidemics: u32,

    /// Outbreaks caused by the end-of-turn draw.
    pub outbreaks: u32,

    /// Cards discarded to the hand limit, per player.
    pub discarded: Vec<(PlayerId, Vec<CityId>)>,

    pub result: Option<GameResult>,
}

/// Two-player containment environment.
#[derive(Clone)]
pub struct HotZoneEnv {
    rules: HotZoneRules,
    state: GameState,
    rng: GameRng,
    goal: Goal,
    best_cure: ColorMap<f64>,
    result: Option<GameResult>,
    episode: u64,
    discard: Arc<dyn DiscardPolicy>,
}

impl fmt::Debug for HotZoneEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HotZoneEnv")
            .field("episode", &self.episode)
            .field("round", &self.state.round)
            .field("active_player", &self.state.active_player)
            .field("goal", &self.goal)
            .field("result", &self.result)
            .finish_non_exhaustive()
    }
}

impl HotZoneEnv {
    /// Create an environment on `graph` and start the first episode with
    /// `config.seed`.
    pub fn new(graph: Arc<CityGraph>, config: GameConfig) -> Result<Self> {
        let seed = config.seed;
        let rules = HotZoneRules::new(graph, config)?;
        let state = GameState::new(rules.city_count(), rules.config(), rules.hub());

        let mut env = Self {
            rules,
            state,
            rng: GameRng::new(seed),
            goal: Goal::default(),
            best_cure: ColorMap::splat(0.0),
            result: None,
            episode: 0,
            discard: Arc::new(HeuristicDiscard::default()),
        };
        env.reset(Some(seed))?;
        Ok(env)
    }

    /// Environment on the built-in Europe map.
    pub fn europe(config: GameConfig) -> Result<Self> {
        Self::new(Arc::new(europe()?), config)
    }

    /// Replace the hand-limit discard policy.
    #[must_use]
    pub fn with_discard_policy(mut self, policy: impl DiscardPolicy + 'static) -> Self {
        self.discard = Arc::new(policy);
        self
    }

    // === Episode control ===

    /// Start a new episode and return its first observation.
    ///
    /// With a seed the episode is fully determined by it. Without one the
    /// environment forks its current RNG, so a chain of unseeded resets is
    /// still reproducible from the first seed.
    pub fn reset(&mut self, seed: Option<u64>) -> Result<Vec<f32>> {
        self.rng = match seed {
            Some(seed) => GameRng::new(seed),
            None => self.rng.fork(),
        };

        let city_count = self.rules.city_count();
        let mut state = GameState::new(city_count, self.rules.config(), self.rules.hub());
        deal(&mut state, city_count, self.rules.config(), &mut self.rng)?;

        for batch in &self.rules.config().warmup {
            apply_infection_draw(&mut state, self.rules.graph(), batch.draws, batch.cubes, DrawFrom::Top, None)?;
        }

        self.state = state;
        self.goal = choose_goal(&self.rules, &self.state);
        self.best_cure = cure_probabilities(&self.rules, &self.state);
        self.result = None;
        self.episode += 1;

        log::info!(
            "episode {} started (seed {}, {} cubes placed)",
            self.episode,
            self.rng.seed(),
            self.state.cubes_in_play()
        );

        Ok(self.observation())
    }

    /// Apply the action at `index` in the vocabulary.
    ///
    /// Fails with `ActionOutOfRange` for an index outside the vocabulary,
    /// `InvalidAction` for an illegal action (state untouched) and
    /// `GameOver` once the episode has ended.
    pub fn step(&mut self, index: usize) -> Result<StepResult> {
        if self.result.is_some() {
            return Err(GameError::GameOver);
        }
        let action = Action::from_index(index, self.rules.city_count())?;
        self.step_action(action)
    }

    /// Apply a decoded action. Same contract as `step`.
    pub fn step_action(&mut self, action: Action) -> Result<StepResult> {
        if self.result.is_some() {
            return Err(GameError::GameOver);
        }

        // Hands change outside actions too (draws, discards).
        self.track_cure_progress();
        let from = self.state.active().location;
        self.rules.apply_action(&mut self.state, action)?;
        let mut breakdown = shape_reward(&self.rules, &self.state, action, from, self.goal, &self.best_cure);
        self.state.actions_taken += 1;

        let mut result = self.rules.is_terminal(&self.state);
        let mut turn_ended = false;
        let mut epidemics = 0;
        let mut outbreaks = 0;

        if result.is_none() && self.state.actions_taken >= self.rules.config().actions_per_turn {
            let player = self.state.active_player;
            let drawn = draw_player_cards(
                &mut self.state,
                self.rules.graph(),
                self.rules.config(),
                &mut self.rng,
                player,
            )?;
            epidemics = drawn.epidemics;
            outbreaks = drawn.outbreaks;

            self.state.round += 1;
            self.state.pass_turn();
            turn_ended = true;
            result = self.rules.is_terminal(&self.state);

            log::debug!(
                "round {} ended: {} epidemics, {} outbreaks, {} infection cards",
                self.state.round,
                drawn.epidemics,
                drawn.outbreaks,
                drawn.infected.len()
            );
        }

        let discarded = self.enforce_hand_limit();

        if turn_ended && result.is_none() {
            self.goal = choose_goal(&self.rules, &self.state);
        }

        if let Some(result) = result {
            breakdown.finish(result);
            log::info!(
                "episode {} over after {} rounds: {:?}",
                self.episode,
                self.state.round,
                result
            );
        }
        self.result = result;

        Ok(StepResult {
            observation: self.observation(),
            reward: breakdown.total(),
            done: result.is_some(),
            info: StepInfo {
                action,
                label: self.rules.label(action),
                breakdown,
                turn_ended,
                epidemics,
                outbreaks,
                discarded,
                result,
            },
        })
    }

    fn track_cure_progress(&mut self) {
        let now = cure_probabilities(&self.rules, &self.state);
        for color in Color::ALL {
            self.best_cure[color] = self.best_cure[color].max(now[color]);
        }
    }

    /// Bring every hand back to the limit.
    ///
    /// A choice the installed policy gets wrong is replaced by the
    /// heuristic one, so the step always completes with legal hands.
    fn enforce_hand_limit(&mut self) -> Vec<(PlayerId, Vec<CityId>)> {
        let mut discarded = Vec::new();
        for (player, excess) in over_limit(&self.state, self.rules.config()) {
            let mut cards = self.discard.choose(&self.rules, &self.state, player, excess);
            if let Err(err) = discard_cards(&mut self.state, self.rules.config(), player, &cards) {
                log::warn!("discard policy rejected for {}: {}", player, err);
                cards = HeuristicDiscard::default().choose(&self.rules, &self.state, player, excess);
                if let Err(err) = discard_cards(&mut self.state, self.rules.config(), player, &cards) {
                    log::warn!("{} kept an over-limit hand: {}", player, err);
                    continue;
                }
            }
            log::debug!("{} discarded {} cards to the hand limit", player, cards.len());
            discarded.push((player, cards));
        }
        discarded
    }

    // === Views ===

    /// Legality of every vocabulary entry for the active player.
    #[must_use]
    pub fn valid_action_mask(&self) -> Vec<bool> {
        self.rules.action_mask(&self.state)
    }

    /// Legal actions in vocabulary order.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        self.rules.legal_actions(&self.state)
    }

    /// Labels of the legal actions, in vocabulary order.
    #[must_use]
    pub fn legal_labels(&self) -> Vec<String> {
        self.rules.legal_labels(&self.state)
    }

    /// Label of the action at `index`.
    pub fn action_label(&self, index: usize) -> Result<String> {
        let action = Action::from_index(index, self.rules.city_count())?;
        Ok(self.rules.label(action))
    }

    /// Encode the current state.
    #[must_use]
    pub fn observation(&self) -> Vec<f32> {
        encode_observation(&self.rules, &self.state, self.goal)
    }

    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.rules.vocabulary_size()
    }

    #[must_use]
    pub fn rules(&self) -> &HotZoneRules {
        &self.rules
    }

    /// Read-only view of the game state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The active player's goal for this turn.
    #[must_use]
    pub fn goal(&self) -> Goal {
        self.goal
    }

    // === Status ===

    /// Outcome of the episode, `None` while it is running.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.result.is_some()
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.result.is_some_and(|r| r.is_victory())
    }

    #[must_use]
    pub fn is_lost(&self) -> bool {
        self.result.is_some_and(|r| !r.is_victory())
    }

    /// Episodes started, including the current one.
    #[must_use]
    pub fn episode(&self) -> u64 {
        self.episode
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.state.round
    }

    #[must_use]
    pub fn outbreaks(&self) -> u32 {
        self.state.outbreak_count
    }

    #[must_use]
    pub fn epidemics(&self) -> u32 {
        self.state.epidemic_count
    }

    // === Snapshots ===

    /// Capture the running episode.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state.clone(),
            rng: self.rng.state(),
            goal: self.goal,
            best_cure: self.best_cure,
            result: self.result,
            episode: self.episode,
        }
    }

    /// Continue from a snapshot taken on the same map.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<()> {
        if snapshot.state.cities.len() != self.rules.city_count() {
            return Err(GameError::InvalidMap(format!(
                "snapshot has {} cities, map has {}",
                snapshot.state.cities.len(),
                self.rules.city_count()
            )));
        }

        self.state = snapshot.state.clone();
        self.rng = GameRng::from_state(&snapshot.rng);
        self.goal = snapshot.goal;
        self.best_cure = snapshot.best_cure;
        self.result = snapshot.result;
        self.episode = snapshot.episode;
        Ok(())
    }
}
