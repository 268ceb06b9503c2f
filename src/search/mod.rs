//! Bounded-lookahead planning agent.
//!
//! ## Overview
//!
//! A beam search over short action sequences scored by the heuristic
//! evaluator. It is a single-agent lookahead: two consecutive player turns
//! are planned (the acting player switches half way) without simulating
//! card draws or infections.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use hotzone::core::{GameConfig, GameState};
//! use hotzone::map::europe;
//! use hotzone::rules::{HotZoneRules, RulesEngine};
//! use hotzone::search::{BeamPlanner, PlannerConfig};
//!
//! let rules = HotZoneRules::new(Arc::new(europe().unwrap()), GameConfig::default()).unwrap();
//! let state = GameState::new(rules.city_count(), rules.config(), rules.hub());
//!
//! let planner = BeamPlanner::new(PlannerConfig::default().with_depth(4));
//! let plan = planner.plan_turn(&rules, &state);
//! assert_eq!(plan.actions.len(), 4);
//! ```

pub mod config;
pub mod planner;
pub mod stats;

pub use config::PlannerConfig;
pub use planner::{BeamPlanner, Plan};
pub use stats::PlanStats;
