//! End-of-turn draws, epidemics and discards.

use crate::core::{CityId, GameConfig, GameError, GameRng, GameState, PlayerId, Result};
use crate::infection::{apply_infection_draw, DrawFrom, InfectionOutcome};
use crate::map::CityGraph;

use super::deck::PlayerCard;

/// What an end-of-turn draw did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DrawOutcome {
    /// Player cards drawn, in draw order.
    pub drawn: Vec<PlayerCard>,
    pub epidemics: u32,
    /// Outbreaks caused by intensify and steady-state draws.
    pub outbreaks: u32,
    /// Infection cards drawn, in draw order.
    pub infected: Vec<CityId>,
}

/// Draw the end-of-turn player cards for `player`, then infect.
///
/// City cards go to the hand; epidemic markers are resolved immediately.
/// Hands may exceed the limit afterwards; see `over_limit`. Fails with
/// `InvariantViolation` if a pile runs out mid-draw.
pub fn draw_player_cards(
    state: &mut GameState,
    graph: &CityGraph,
    config: &GameConfig,
    rng: &mut GameRng,
    player: PlayerId,
) -> Result<DrawOutcome> {
    let mut outcome = DrawOutcome::default();

    for _ in 0..config.cards_per_draw {
        let card = state
            .decks
            .player_draw
            .pop_back()
            .ok_or_else(|| GameError::InvariantViolation("player draw pile is empty".into()))?;
        outcome.drawn.push(card);

        match card {
            PlayerCard::City(city) => state.players[player].hand.push(city),
            PlayerCard::Epidemic => {
                state.decks.player_discard.push_back(card);
                let intensify = resolve_epidemic(state, graph, config, rng)?;
                outcome.epidemics += 1;
                outcome.outbreaks += intensify.outbreaks;
                outcome.infected.extend(intensify.cards);
            }
        }
    }

    let protected = config.quarantine_player.map(|p| state.players[p].location);
    let draws = config.infection_rate(state.infection_rate_index);
    let steady = apply_infection_draw(state, graph, draws, 1, DrawFrom::Top, protected)?;
    outcome.outbreaks += steady.outbreaks;
    outcome.infected.extend(steady.cards);

    Ok(outcome)
}

/// Resolve one epidemic marker: escalate, intensify from the bottom of the
/// infection pile, then stack the reshuffled discard on top.
pub fn resolve_epidemic(
    state: &mut GameState,
    graph: &CityGraph,
    config: &GameConfig,
    rng: &mut GameRng,
) -> Result<InfectionOutcome> {
    state.epidemic_count += 1;
    let last = config.infection_rate_track.len().saturating_sub(1);
    state.infection_rate_index = (state.infection_rate_index + 1).min(last);

    let intensify = apply_infection_draw(state, graph, 1, config.epidemic_cubes, DrawFrom::Bottom, None)?;
    if let Some(&city) = intensify.cards.first() {
        log::info!(
            "epidemic {} in {} (rate {})",
            state.epidemic_count,
            graph.name(city),
            config.infection_rate(state.infection_rate_index)
        );
    }

    let mut discard: Vec<CityId> = state.decks.infection_discard.iter().copied().collect();
    rng.shuffle(&mut discard);
    state.decks.infection_draw.extend(discard);
    state.decks.infection_discard.clear();

    Ok(intensify)
}

/// Players holding more cards than the hand limit, with the excess count.
#[must_use]
pub fn over_limit(state: &GameState, config: &GameConfig) -> Vec<(PlayerId, usize)> {
    state
        .players
        .iter()
        .filter(|(_, p)| p.hand.len() > config.hand_limit)
        .map(|(id, p)| (id, p.hand.len() - config.hand_limit))
        .collect()
}

/// Move chosen cards from a hand to the player discard pile.
///
/// The choice must bring the hand back to exactly the limit, and every
/// card must be in the hand. On error the state is untouched.
pub fn discard_cards(state: &mut GameState, config: &GameConfig, player: PlayerId, cards: &[CityId]) -> Result<()> {
    let hand = &state.players[player].hand;
    let excess = hand.len().saturating_sub(config.hand_limit);
    if cards.len() != excess {
        return Err(GameError::InvalidDiscard(format!(
            "{player} must discard {excess} cards, got {}",
            cards.len()
        )));
    }

    let mut remaining = hand.clone();
    for &card in cards {
        let pos = remaining
            .iter()
            .position(|&c| c == card)
            .ok_or_else(|| GameError::InvalidDiscard(format!("{player} does not hold {card}")))?;
        remaining.remove(pos);
    }

    state.players[player].hand = remaining;
    state
        .decks
        .player_discard
        .extend(cards.iter().map(|&c| PlayerCard::City(c)));
    Ok(())
}
