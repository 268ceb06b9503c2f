//! Action rule engine and executor.
//!
//! `RulesEngine` defines the seam the environment and planner call into:
//! - Legal actions and the fixed-width action mask
//! - How actions modify state
//! - Win/loss conditions
//!
//! `HotZoneRules` implements it for the two-player containment game.

pub mod engine;
pub mod hotzone;

pub use engine::{GameResult, LossReason, RulesEngine};
pub use hotzone::HotZoneRules;
