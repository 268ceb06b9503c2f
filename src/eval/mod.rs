//! Heuristic state evaluation and per-turn goal selection.
//!
//! The evaluator scores states for the planner and the default discard
//! policy; the goal decides which distance term the score uses.

pub mod goal;
pub mod heuristic;

pub use goal::{choose_goal, cure_probabilities, share_target, Goal};
pub use heuristic::{Evaluator, HeuristicWeights};
