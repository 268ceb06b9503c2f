//! Deck manager: player and infection piles, draws, epidemics, discards.
//!
//! ## Key Types
//!
//! - `PlayerCard`: a city card or an epidemic marker
//! - `Decks`: the four piles of one episode (back of each pile = top)
//! - `DrawOutcome`: what an end-of-turn draw did
//!
//! Deck construction consumes the episode's `GameRng`; nothing here owns
//! randomness of its own.

pub mod deck;
pub mod draw;

pub use deck::{build_infection_deck, build_player_deck, deal, CardPile, Decks, PlayerCard, PlayerDeal};
pub use draw::{discard_cards, draw_player_cards, over_limit, resolve_epidemic, DrawOutcome};
