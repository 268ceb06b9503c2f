//! Game state: the complete mutable record of one episode.
//!
//! ## GameState
//!
//! - Counters: epidemics, outbreaks, infection rate index, round, actions
//! - Cube pools and cure flags (one per color)
//! - Per-city infection levels
//! - Player and infection decks (see `cards::Decks`)
//! - Both players' locations and hands
//!
//! The state does not own the RNG or the city graph: the environment owns
//! the RNG and the graph is shared read-only. That keeps `clone()` cheap
//! and side-effect free, which the planner relies on for copy-on-branch
//! search (decks use `im` persistent vectors).
//!
//! ## Cube accounting
//!
//! Cubes only move between a color's pool and cities through
//! `place_cubes` / `remove_cubes`, so `pool + Σ levels == supply` holds
//! after every transition. A placement the pool cannot cover is clamped
//! and marks the color as exhausted, which is a loss condition.

use serde::{Deserialize, Serialize};

use super::color::{Color, ColorMap};
use super::config::GameConfig;
use super::entity::CityId;
use super::error::{GameError, Result};
use super::player::{PlayerId, PlayerMap};
use crate::cards::Decks;

/// Maximum cubes of one color a city can hold.
pub const MAX_CUBES: u8 = 3;

/// Infection state of one city.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityState {
    /// Cubes per color (0..=3).
    pub levels: ColorMap<u8>,

    /// Set the first time any infection card places cubes here.
    pub ever_infected: bool,
}

impl CityState {
    /// Total cubes of all colors.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.levels.values().map(|&l| l as u32).sum()
    }

    /// Any color at the cap.
    #[must_use]
    pub fn at_cap(&self) -> bool {
        self.levels.values().any(|&l| l >= MAX_CUBES)
    }
}

/// A player's position and hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub location: CityId,
    /// City cards in the order they were received.
    pub hand: Vec<CityId>,
}

impl PlayerState {
    /// Check whether the hand holds a city card.
    #[must_use]
    pub fn holds(&self, city: CityId) -> bool {
        self.hand.contains(&city)
    }

    /// Remove one copy of a card from the hand.
    ///
    /// Returns true if the card was found and removed.
    pub fn remove_card(&mut self, city: CityId) -> bool {
        if let Some(pos) = self.hand.iter().position(|&c| c == city) {
            self.hand.remove(pos);
            true
        } else {
            false
        }
    }
}

/// Full game state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    // === Counters ===
    pub epidemic_count: u32,
    pub outbreak_count: u32,
    pub infection_rate_index: usize,

    /// Completed player turns.
    pub round: u32,

    /// Actions taken by the active player this turn.
    pub actions_taken: u32,

    // === Diseases ===
    /// Cubes left in the supply per color.
    pub cubes: ColorMap<i32>,

    /// Set when a placement could not be covered by the pool.
    pub exhausted: ColorMap<bool>,

    /// Write-once cure flags.
    pub cures: ColorMap<bool>,

    /// Per-city infection, indexed by `CityId`.
    pub cities: Vec<CityState>,

    /// Cities already resolved in the current outbreak chain.
    pub outbreak_chain: Vec<CityId>,

    // === Cards and players ===
    pub decks: Decks,
    pub players: PlayerMap<PlayerState>,
    pub active_player: PlayerId,
}

impl GameState {
    /// Create an empty state: no cubes placed, both players at `start`,
    /// empty hands and decks.
    ///
    /// Use `cards::deal` to populate decks and hands.
    #[must_use]
    pub fn new(city_count: usize, config: &GameConfig, start: CityId) -> Self {
        Self {
            epidemic_count: 0,
            outbreak_count: 0,
            infection_rate_index: 0,
            round: 0,
            actions_taken: 0,
            cubes: ColorMap::splat(config.cube_supply),
            exhausted: ColorMap::splat(false),
            cures: ColorMap::splat(false),
            cities: vec![CityState::default(); city_count],
            outbreak_chain: Vec::new(),
            decks: Decks::default(),
            players: PlayerMap::new(|_| PlayerState {
                location: start,
                hand: Vec::new(),
            }),
            active_player: PlayerId::new(0),
        }
    }

    // === Accessors ===

    /// Cubes of a color in a city.
    #[must_use]
    pub fn level(&self, city: CityId, color: Color) -> u8 {
        self.cities[city.index()].levels[color]
    }

    /// Total cubes on the board across all cities and colors.
    #[must_use]
    pub fn cubes_in_play(&self) -> u32 {
        self.cities.iter().map(CityState::total).sum()
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn active(&self) -> &PlayerState {
        &self.players[self.active_player]
    }

    /// The active player's partner.
    #[must_use]
    pub fn partner(&self) -> &PlayerState {
        &self.players[self.active_player.partner()]
    }

    /// Check whether every disease is cured.
    #[must_use]
    pub fn all_cured(&self) -> bool {
        self.cures.values().all(|&c| c)
    }

    // === Cube movement ===

    /// Move up to `count` cubes of `color` from the pool to a city.
    ///
    /// Never raises a level past `MAX_CUBES`. If the pool cannot cover
    /// the request, places what is left, leaves the pool at 0 and marks
    /// the color exhausted. Returns the number of cubes placed.
    pub fn place_cubes(&mut self, city: CityId, color: Color, count: u8) -> u8 {
        let level = &mut self.cities[city.index()].levels[color];
        let room = MAX_CUBES.saturating_sub(*level);
        let wanted = count.min(room);
        let available = self.cubes[color].max(0).min(wanted as i32) as u8;

        if available < wanted {
            self.exhausted[color] = true;
            log::debug!("{} supply exhausted", color);
        }

        *level += available;
        self.cubes[color] -= available as i32;
        available
    }

    /// Move up to `count` cubes of `color` from a city back to the pool.
    ///
    /// Returns the number of cubes removed.
    pub fn remove_cubes(&mut self, city: CityId, color: Color, count: u8) -> u8 {
        let level = &mut self.cities[city.index()].levels[color];
        let removed = count.min(*level);
        *level -= removed;
        self.cubes[color] += removed as i32;
        removed
    }

    // === Turn bookkeeping ===

    /// Hand the turn to the partner and clear the action counter.
    pub fn pass_turn(&mut self) {
        self.active_player = self.active_player.partner();
        self.actions_taken = 0;
    }

    // === Invariants ===

    /// Verify the structural invariants of the state.
    ///
    /// - every level is within 0..=3
    /// - pool + Σ levels equals the supply, and no pool is negative
    /// - the outbreak chain holds no duplicates
    /// - player cards (draw + discard + hands) and infection cards
    ///   (draw + discard) add up to their construction-time totals
    pub fn check_invariants(&self, config: &GameConfig, city_count: usize) -> Result<()> {
        for (i, city) in self.cities.iter().enumerate() {
            for (color, &level) in city.levels.iter() {
                if level > MAX_CUBES {
                    return Err(GameError::InvariantViolation(format!(
                        "city {i} holds {level} {color} cubes"
                    )));
                }
            }
        }

        for color in Color::ALL {
            let placed: i32 = self.cities.iter().map(|c| c.levels[color] as i32).sum();
            if self.cubes[color] < 0 || self.cubes[color] + placed != config.cube_supply {
                return Err(GameError::InvariantViolation(format!(
                    "{color} pool {} with {placed} placed does not match supply {}",
                    self.cubes[color], config.cube_supply
                )));
            }
        }

        let mut chain = self.outbreak_chain.clone();
        chain.sort_unstable();
        chain.dedup();
        if chain.len() != self.outbreak_chain.len() || chain.len() > city_count {
            return Err(GameError::InvariantViolation("outbreak chain revisits a city".into()));
        }

        let in_hands: usize = self.players.values().map(|p| p.hand.len()).sum();
        let player_cards = self.decks.player_draw.len() + self.decks.player_discard.len() + in_hands;
        if player_cards != city_count + config.epidemic_cards {
            return Err(GameError::InvariantViolation(format!(
                "{player_cards} player cards, expected {}",
                city_count + config.epidemic_cards
            )));
        }

        let infection_cards = self.decks.infection_draw.len() + self.decks.infection_discard.len();
        if infection_cards != city_count {
            return Err(GameError::InvariantViolation(format!(
                "{infection_cards} infection cards, expected {city_count}"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(4, &GameConfig::default(), CityId(0))
    }

    #[test]
    fn test_new_state() {
        let state = state();

        assert_eq!(state.cubes[Color::Red], 16);
        assert!(!state.all_cured());
        assert_eq!(state.active_player, PlayerId::new(0));
        assert_eq!(state.active().location, CityId(0));
        assert_eq!(state.cubes_in_play(), 0);
    }

    #[test]
    fn test_place_cubes_caps_at_three() {
        let mut state = state();

        assert_eq!(state.place_cubes(CityId(1), Color::Blue, 2), 2);
        assert_eq!(state.place_cubes(CityId(1), Color::Blue, 2), 1);
        assert_eq!(state.level(CityId(1), Color::Blue), 3);
        assert_eq!(state.cubes[Color::Blue], 13);
        assert!(!state.exhausted[Color::Blue]);
    }

    #[test]
    fn test_place_cubes_clamps_pool() {
        let mut state = state();
        state.cubes[Color::Red] = 1;
        // Keep the supply balanced for the rest of the cubes.
        state.cities[2].levels[Color::Red] = 3;
        state.cities[3].levels[Color::Red] = 3;

        assert_eq!(state.place_cubes(CityId(0), Color::Red, 3), 1);
        assert_eq!(state.cubes[Color::Red], 0);
        assert!(state.exhausted[Color::Red]);
    }

    #[test]
    fn test_remove_cubes() {
        let mut state = state();
        state.place_cubes(CityId(2), Color::Yellow, 3);

        assert_eq!(state.remove_cubes(CityId(2), Color::Yellow, 1), 1);
        assert_eq!(state.remove_cubes(CityId(2), Color::Yellow, 5), 2);
        assert_eq!(state.level(CityId(2), Color::Yellow), 0);
        assert_eq!(state.cubes[Color::Yellow], 16);
    }

    #[test]
    fn test_pass_turn() {
        let mut state = state();
        state.actions_taken = 4;

        state.pass_turn();

        assert_eq!(state.active_player, PlayerId::new(1));
        assert_eq!(state.actions_taken, 0);
    }

    #[test]
    fn test_player_remove_card() {
        let mut player = PlayerState {
            location: CityId(0),
            hand: vec![CityId(3), CityId(1)],
        };

        assert!(player.remove_card(CityId(3)));
        assert!(!player.remove_card(CityId(3)));
        assert_eq!(player.hand, vec![CityId(1)]);
    }
}
