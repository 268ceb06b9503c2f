//! # hotzone
//!
//! A two-player cooperative disease-containment board game, built as a
//! deterministic simulator for heuristic planning and RL training.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: one seedable RNG per episode drives every shuffle,
//!    so an episode is reproducible from its seed and snapshots replay
//!    bit-for-bit.
//!
//! 2. **Cheap Branching**: decks are persistent `im` vectors, so the
//!    planner clones a whole state per branch.
//!
//! 3. **Configuration Over Literals**: deck pacing, infection escalation,
//!    cube supply and hand limits live in `GameConfig`; the map comes in
//!    through `MapSpec`.
//!
//! ## Modules
//!
//! - `core`: ids, colors, actions, configuration, state, RNG, errors
//! - `map`: city graph and the built-in Europe board
//! - `cards`: player and infection decks, draws, epidemics, discards
//! - `infection`: infection draws and outbreak chains
//! - `rules`: action legality, the executor and win/loss checks
//! - `eval`: goal selection and heuristic scoring
//! - `search`: bounded beam planner
//! - `env`: reset/step environment, observations, rewards, snapshots

pub mod core;
pub mod map;
pub mod cards;
pub mod infection;
pub mod rules;
pub mod eval;
pub mod search;
pub mod env;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    Action, CityId, Color, ColorMap, GameConfig, GameError, GameRng, GameRngState, GameState,
    PlayerId, PlayerMap, Result,
};

pub use crate::map::{europe, CityGraph, MapSpec};

pub use crate::cards::{Decks, PlayerCard};

pub use crate::rules::{GameResult, HotZoneRules, LossReason, RulesEngine};

pub use crate::eval::{Evaluator, Goal, HeuristicWeights};

pub use crate::search::{BeamPlanner, Plan, PlannerConfig};

pub use crate::env::{
    play_episode, DiscardPolicy, EpisodeSummary, HotZoneEnv, Snapshot, StepInfo, StepResult,
};
