//! Infection and outbreak engine.
//!
//! Applies infection-deck draws to cities and propagates outbreak chains.
//! Steady-state draws take from the top of the infection pile and respect
//! quarantine; epidemic intensify draws take from the bottom and do not.

pub mod engine;

pub use engine::{apply_infection_draw, infect_city, outbreak, DrawFrom, InfectionOutcome};
