//! Infection draws and outbreak chains.

use serde::{Deserialize, Serialize};

use crate::core::{CityId, Color, GameError, GameState, Result, MAX_CUBES};
use crate::map::CityGraph;

/// Which end of the infection draw pile a draw takes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawFrom {
    /// Steady-state draws (back of the pile).
    Top,
    /// Epidemic intensify draws (front of the pile).
    Bottom,
}

/// What a batch of infection draws did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InfectionOutcome {
    /// Cards drawn, in draw order.
    pub cards: Vec<CityId>,
    /// Outbreaks triggered across the batch.
    pub outbreaks: u32,
    /// Draws whose cube effect was blocked by quarantine.
    pub quarantined: u32,
}

/// Resolve `draws` infection cards, placing `cubes` on each target.
///
/// Every drawn card goes to the infection discard pile. A steady-state
/// draw on `protected` or one of its neighbors only discards the card.
/// Fails with `InvariantViolation` if the draw pile runs out.
pub fn apply_infection_draw(
    state: &mut GameState,
    graph: &CityGraph,
    draws: usize,
    cubes: u8,
    from: DrawFrom,
    protected: Option<CityId>,
) -> Result<InfectionOutcome> {
    let mut outcome = InfectionOutcome::default();

    for _ in 0..draws {
        let target = match from {
            DrawFrom::Top => state.decks.infection_draw.pop_back(),
            DrawFrom::Bottom => state.decks.infection_draw.pop_front(),
        }
        .ok_or_else(|| GameError::InvariantViolation("infection draw pile is empty".into()))?;
        state.decks.infection_discard.push_back(target);
        outcome.cards.push(target);

        let shielded = from == DrawFrom::Top
            && protected.is_some_and(|p| p == target || graph.is_adjacent(p, target));
        if shielded {
            log::debug!("{} spared by quarantine", graph.name(target));
            outcome.quarantined += 1;
            continue;
        }

        if from == DrawFrom::Bottom && state.cities[target.index()].ever_infected {
            log::warn!("intensify draw hit previously infected {}", graph.name(target));
        }

        outcome.outbreaks += infect_city(state, graph, target, cubes);
    }

    Ok(outcome)
}

/// Place `cubes` of the city's own color, overflowing into an outbreak.
///
/// Starts a fresh outbreak chain. Returns the number of outbreaks.
pub fn infect_city(state: &mut GameState, graph: &CityGraph, city: CityId, cubes: u8) -> u32 {
    let color = graph.color(city);
    state.outbreak_chain.clear();
    state.cities[city.index()].ever_infected = true;

    let current = state.level(city, color);
    if current + cubes > MAX_CUBES {
        state.place_cubes(city, color, MAX_CUBES - current);
        outbreak(state, graph, color, city)
    } else {
        state.place_cubes(city, color, cubes);
        log::debug!("{} +{} {} ({})", graph.name(city), cubes, color, current + cubes);
        0
    }
}

/// Spread `color` from `city` to its neighbors.
///
/// Neighbors already at the cap outbreak in turn; cities already in the
/// current chain are skipped. Returns the number of outbreaks in the
/// chain started here.
pub fn outbreak(state: &mut GameState, graph: &CityGraph, color: Color, city: CityId) -> u32 {
    state.outbreak_chain.push(city);
    state.outbreak_count += 1;
    log::debug!("{} outbreak in {} (total {})", color, graph.name(city), state.outbreak_count);

    let mut outbreaks = 1;
    for &neighbor in graph.neighbors(city) {
        if state.outbreak_chain.contains(&neighbor) {
            continue;
        }
        if state.level(neighbor, color) >= MAX_CUBES {
            outbreaks += outbreak(state, graph, color, neighbor);
        } else {
            state.place_cubes(neighbor, color, 1);
        }
    }
    outbreaks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;
    use crate::map::{CityEntry, MapSpec};

    /// A - B - D, A - C; all blue.
    fn graph() -> CityGraph {
        CityGraph::from_spec(&MapSpec {
            cities: vec![
                CityEntry::new("A", "BLUE", &["B", "C"]),
                CityEntry::new("B", "BLUE", &["D"]),
                CityEntry::new("C", "BLUE", &[]),
                CityEntry::new("D", "BLUE", &[]),
            ],
        })
        .unwrap()
    }

    fn state() -> GameState {
        GameState::new(4, &GameConfig::default(), CityId(0))
    }

    #[test]
    fn test_outbreak_spreads_to_neighbors() {
        let graph = graph();
        let mut state = state();
        state.place_cubes(CityId(0), Color::Blue, 3);

        let outbreaks = outbreak(&mut state, &graph, Color::Blue, CityId(0));

        assert_eq!(outbreaks, 1);
        assert_eq!(state.outbreak_count, 1);
        assert_eq!(state.level(CityId(1), Color::Blue), 1);
        assert_eq!(state.level(CityId(2), Color::Blue), 1);
        assert_eq!(state.level(CityId(3), Color::Blue), 0);
    }

    #[test]
    fn test_outbreak_chain_does_not_revisit() {
        let graph = graph();
        let mut state = state();
        for city in 0..4 {
            state.place_cubes(CityId(city), Color::Blue, 3);
        }

        let outbreaks = infect_city(&mut state, &graph, CityId(0), 1);

        // Every city is saturated, so each outbreaks exactly once.
        assert_eq!(outbreaks, 4);
        assert_eq!(state.outbreak_chain.len(), 4);
        assert_eq!(state.cubes[Color::Blue], 4);
    }

    #[test]
    fn test_infect_clamps_and_outbreaks() {
        let graph = graph();
        let mut state = state();
        state.place_cubes(CityId(3), Color::Blue, 2);

        let outbreaks = infect_city(&mut state, &graph, CityId(3), 2);

        assert_eq!(outbreaks, 1);
        assert_eq!(state.level(CityId(3), Color::Blue), 3);
        assert_eq!(state.level(CityId(1), Color::Blue), 1);
        assert!(state.cities[3].ever_infected);
    }

    #[test]
    fn test_draw_order_and_discard() {
        let graph = graph();
        let mut state = state();
        state.decks.infection_draw = im::vector![CityId(0), CityId(1), CityId(2), CityId(3)];

        let top = apply_infection_draw(&mut state, &graph, 1, 1, DrawFrom::Top, None).unwrap();
        let bottom = apply_infection_draw(&mut state, &graph, 1, 1, DrawFrom::Bottom, None).unwrap();

        assert_eq!(top.cards, vec![CityId(3)]);
        assert_eq!(bottom.cards, vec![CityId(0)]);
        assert_eq!(state.decks.infection_discard, im::vector![CityId(3), CityId(0)]);
    }

    #[test]
    fn test_quarantine_blocks_steady_state_only() {
        let graph = graph();
        let mut state = state();
        state.decks.infection_draw = im::vector![CityId(2), CityId(1)];

        // B is adjacent to A, the protected city.
        let top = apply_infection_draw(&mut state, &graph, 1, 1, DrawFrom::Top, Some(CityId(0))).unwrap();
        assert_eq!(top.quarantined, 1);
        assert_eq!(state.level(CityId(1), Color::Blue), 0);

        let bottom = apply_infection_draw(&mut state, &graph, 1, 3, DrawFrom::Bottom, Some(CityId(0))).unwrap();
        assert_eq!(bottom.quarantined, 0);
        assert_eq!(state.level(CityId(2), Color::Blue), 3);
    }

    #[test]
    fn test_empty_pile_is_invariant_violation() {
        let graph = graph();
        let mut state = state();

        let result = apply_infection_draw(&mut state, &graph, 1, 1, DrawFrom::Top, None);
        assert!(matches!(result, Err(GameError::InvariantViolation(_))));
    }
}
