//! Player and infection decks.
//!
//! ## Pile orientation
//!
//! Piles are `im::Vector`s whose *back* is the top of the pile: normal
//! draws pop from the back, epidemic intensify draws pop from the front.
//! Persistent vectors keep `GameState::clone()` cheap for the planner.
//!
//! ## Player deck construction
//!
//! City cards are shuffled and dealt to the players first. The remainder
//! is split into one pile per epidemic marker (the last pile takes any
//! leftover cards), each pile gets its marker and is shuffled on its own,
//! and the piles are stacked in order. This guarantees one epidemic per
//! third of the deck instead of a uniform spread.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{CityId, GameConfig, GameError, GameRng, GameState, PlayerId, Result};

/// A card in the player deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerCard {
    City(CityId),
    Epidemic,
}

impl PlayerCard {
    /// The city of a city card.
    #[must_use]
    pub fn city(self) -> Option<CityId> {
        match self {
            PlayerCard::City(city) => Some(city),
            PlayerCard::Epidemic => None,
        }
    }

    #[must_use]
    pub fn is_epidemic(self) -> bool {
        matches!(self, PlayerCard::Epidemic)
    }
}

/// A pile of player cards (back = top).
pub type CardPile = Vector<PlayerCard>;

/// All four piles of one episode.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decks {
    pub player_draw: CardPile,
    pub player_discard: CardPile,
    pub infection_draw: Vector<CityId>,
    pub infection_discard: Vector<CityId>,
}

impl Decks {
    /// Check whether a city card sits in the player discard pile.
    #[must_use]
    pub fn player_discarded(&self, city: CityId) -> bool {
        self.player_discard.contains(&PlayerCard::City(city))
    }

    /// Check whether a city card sits in the infection discard pile.
    #[must_use]
    pub fn infection_discarded(&self, city: CityId) -> bool {
        self.infection_discard.contains(&city)
    }
}

/// Starting hands plus the stacked player draw pile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerDeal {
    pub hands: [Vec<CityId>; 2],
    pub draw_pile: CardPile,
}

/// Shuffle the city cards, deal starting hands and stack the epidemic piles.
///
/// Fails with `InvalidMap` if the map has too few cities to deal.
pub fn build_player_deck(city_count: usize, config: &GameConfig, rng: &mut GameRng) -> Result<PlayerDeal> {
    let dealt = 2 * config.starting_hand;
    if city_count < dealt + config.epidemic_cards {
        return Err(GameError::InvalidMap(format!(
            "{city_count} cities cannot cover {dealt} starting cards and {} epidemic piles",
            config.epidemic_cards
        )));
    }

    let mut cards: Vec<CityId> = CityId::all(city_count).collect();
    rng.shuffle(&mut cards);

    let hands = [
        cards[..config.starting_hand].to_vec(),
        cards[config.starting_hand..dealt].to_vec(),
    ];
    let remainder: Vec<PlayerCard> = cards[dealt..].iter().map(|&c| PlayerCard::City(c)).collect();

    let draw_pile = if config.epidemic_cards == 0 {
        let mut pile = remainder;
        rng.shuffle(&mut pile);
        pile.into_iter().collect()
    } else {
        let piles = config.epidemic_cards;
        let size = remainder.len() / piles;
        let mut draw_pile = CardPile::new();
        for i in 0..piles {
            let end = if i + 1 == piles { remainder.len() } else { (i + 1) * size };
            let mut pile = remainder[i * size..end].to_vec();
            pile.push(PlayerCard::Epidemic);
            rng.shuffle(&mut pile);
            draw_pile.extend(pile);
        }
        draw_pile
    };

    Ok(PlayerDeal { hands, draw_pile })
}

/// Shuffle every city into a fresh infection draw pile.
pub fn build_infection_deck(city_count: usize, rng: &mut GameRng) -> Vector<CityId> {
    let mut cards: Vec<CityId> = CityId::all(city_count).collect();
    rng.shuffle(&mut cards);
    cards.into_iter().collect()
}

/// Build both decks and deal the starting hands into `state`.
///
/// Discard piles start empty.
pub fn deal(state: &mut GameState, city_count: usize, config: &GameConfig, rng: &mut GameRng) -> Result<()> {
    let PlayerDeal { hands, draw_pile } = build_player_deck(city_count, config, rng)?;
    let [first, second] = hands;
    state.players[PlayerId::new(0)].hand = first;
    state.players[PlayerId::new(1)].hand = second;

    state.decks = Decks {
        player_draw: draw_pile,
        player_discard: CardPile::new(),
        infection_draw: build_infection_deck(city_count, rng),
        infection_discard: Vector::new(),
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_deck_sizes() {
        let config = GameConfig::default();
        let mut rng = GameRng::new(1);

        let deal = build_player_deck(24, &config, &mut rng).unwrap();

        assert_eq!(deal.hands[0].len(), 3);
        assert_eq!(deal.hands[1].len(), 3);
        assert_eq!(deal.draw_pile.len(), 18 + 3);
        assert_eq!(deal.draw_pile.iter().filter(|c| c.is_epidemic()).count(), 3);
    }

    #[test]
    fn test_one_epidemic_per_pile() {
        let config = GameConfig::default();

        for seed in 0..50 {
            let mut rng = GameRng::new(seed);
            let deal = build_player_deck(24, &config, &mut rng).unwrap();
            let pile: Vec<_> = deal.draw_pile.iter().copied().collect();

            for chunk in pile.chunks(7) {
                assert_eq!(chunk.iter().filter(|c| c.is_epidemic()).count(), 1);
            }
        }
    }

    #[test]
    fn test_last_pile_takes_remainder() {
        let config = GameConfig::default();
        let mut rng = GameRng::new(3);

        // 20 - 6 = 14 cards over 3 piles: 4, 4, 6 (+1 marker each).
        let deal = build_player_deck(20, &config, &mut rng).unwrap();
        let pile: Vec<_> = deal.draw_pile.iter().copied().collect();

        assert_eq!(pile.len(), 17);
        assert_eq!(pile[..5].iter().filter(|c| c.is_epidemic()).count(), 1);
        assert_eq!(pile[5..10].iter().filter(|c| c.is_epidemic()).count(), 1);
        assert_eq!(pile[10..].iter().filter(|c| c.is_epidemic()).count(), 1);
    }

    #[test]
    fn test_every_city_dealt_once() {
        let config = GameConfig::default();
        let mut rng = GameRng::new(9);
        let deal = build_player_deck(24, &config, &mut rng).unwrap();

        let mut seen: Vec<CityId> = deal.hands.iter().flatten().copied().collect();
        seen.extend(deal.draw_pile.iter().filter_map(|c| c.city()));
        seen.sort();
        assert_eq!(seen, CityId::all(24).collect::<Vec<_>>());
    }

    #[test]
    fn test_too_few_cities() {
        let config = GameConfig::default();
        let mut rng = GameRng::new(0);
        assert!(matches!(
            build_player_deck(8, &config, &mut rng),
            Err(GameError::InvalidMap(_))
        ));
    }

    #[test]
    fn test_same_seed_same_deck() {
        let config = GameConfig::default();
        let a = build_player_deck(24, &config, &mut GameRng::new(5)).unwrap();
        let b = build_player_deck(24, &config, &mut GameRng::new(5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_deal_populates_state() {
        let config = GameConfig::default();
        let mut rng = GameRng::new(11);
        let mut state = GameState::new(24, &config, CityId(0));

        deal(&mut state, 24, &config, &mut rng).unwrap();

        assert_eq!(state.decks.infection_draw.len(), 24);
        assert!(state.decks.infection_discard.is_empty());
        assert!(state.check_invariants(&config, 24).is_ok());
    }
}
