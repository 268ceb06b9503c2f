//! Core engine types: ids, colors, players, state, actions, RNG, configuration.
//!
//! Everything here is independent of the city map and of the rules: the
//! rule engine, evaluator and environment build on these types.

pub mod action;
pub mod color;
pub mod config;
pub mod entity;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::Action;
pub use color::{Color, ColorMap};
pub use config::{GameConfig, InfectionBatch, DEFAULT_HUB};
pub use entity::CityId;
pub use error::{GameError, Result};
pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::{GameRng, GameRngState};
pub use state::{CityState, GameState, PlayerState, MAX_CUBES};
