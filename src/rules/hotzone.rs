//! Legality and execution of player actions.

use std::sync::Arc;

use crate::cards::PlayerCard;
use crate::core::{Action, CityId, Color, GameConfig, GameError, GameState, Result, MAX_CUBES};
use crate::map::CityGraph;

use super::engine::{GameResult, LossReason, RulesEngine};

/// Rules of the two-player containment game on a given map.
///
/// Holds only immutable context (graph, config, resolved hub), so one
/// instance can be shared by the environment and every planner branch.
#[derive(Clone, Debug)]
pub struct HotZoneRules {
    graph: Arc<CityGraph>,
    config: GameConfig,
    hub: CityId,
}

impl HotZoneRules {
    /// Bind the rules to a map. Fails if the hub city is not on the map.
    pub fn new(graph: Arc<CityGraph>, config: GameConfig) -> Result<Self> {
        let hub = graph.lookup(&config.hub_city)?;
        Ok(Self { graph, config, hub })
    }

    #[must_use]
    pub fn graph(&self) -> &CityGraph {
        &self.graph
    }

    /// Shared handle to the map.
    #[must_use]
    pub fn graph_handle(&self) -> Arc<CityGraph> {
        Arc::clone(&self.graph)
    }

    /// The city where cures are discovered.
    #[must_use]
    pub fn hub(&self) -> CityId {
        self.hub
    }

    /// Cards of one color in a hand.
    #[must_use]
    pub fn color_count(&self, hand: &[CityId], color: Color) -> usize {
        hand.iter().filter(|&&c| self.graph.color(c) == color).count()
    }

    /// Label of an action using this map's city names.
    #[must_use]
    pub fn label(&self, action: Action) -> String {
        action.label(|c| self.graph.name(c))
    }

    /// Labels of every legal action, in vocabulary order.
    #[must_use]
    pub fn legal_labels(&self, state: &GameState) -> Vec<String> {
        self.legal_actions(state)
            .into_iter()
            .map(|a| self.label(a))
            .collect()
    }
}

impl RulesEngine for HotZoneRules {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn city_count(&self) -> usize {
        self.graph.len()
    }

    fn is_legal(&self, state: &GameState, action: Action) -> bool {
        if action.destination().is_some_and(|c| c.index() >= self.graph.len()) {
            return false;
        }

        let me = state.active();
        let here = me.location;
        match action {
            Action::Drive(to) => self.graph.is_adjacent(here, to),
            Action::DirectFlight(to) => me.holds(to),
            Action::CharterFlight(_) => me.holds(here),
            Action::Treat(color) => state.level(here, color) > 0,
            Action::ShareKnowledge => {
                let partner = state.partner();
                partner.location == here && (me.holds(here) || partner.holds(here))
            }
            Action::FindCure(color) => {
                here == self.hub
                    && !state.cures[color]
                    && self.color_count(&me.hand, color) >= self.config.cure_threshold
            }
        }
    }

    fn apply_action(&self, state: &mut GameState, action: Action) -> Result<()> {
        if !self.is_legal(state, action) {
            return Err(GameError::InvalidAction(format!(
                "{} cannot {} from {}",
                state.active_player,
                self.label(action),
                self.graph.name(state.active().location)
            )));
        }

        let player = state.active_player;
        let here = state.players[player].location;

        match action {
            Action::Drive(to) => {
                state.players[player].location = to;
            }
            Action::DirectFlight(to) => {
                state.players[player].remove_card(to);
                state.decks.player_discard.push_back(PlayerCard::City(to));
                state.players[player].location = to;
            }
            Action::CharterFlight(to) => {
                state.players[player].remove_card(here);
                state.decks.player_discard.push_back(PlayerCard::City(here));
                state.players[player].location = to;
            }
            Action::Treat(color) => {
                let count = if state.cures[color] { MAX_CUBES } else { 1 };
                state.remove_cubes(here, color, count);
            }
            Action::ShareKnowledge => {
                let (me, partner) = state.players.pair_mut(player, player.partner());
                let (giver, receiver) = match (me.holds(here), partner.holds(here)) {
                    (true, false) => (me, partner),
                    (false, true) => (partner, me),
                    _ => {
                        return Err(GameError::InvariantViolation(format!(
                            "card {} is held by both players",
                            self.graph.name(here)
                        )))
                    }
                };
                giver.remove_card(here);
                receiver.hand.push(here);
            }
            Action::FindCure(color) => {
                state.cures[color] = true;
                let spent: Vec<CityId> = state.players[player]
                    .hand
                    .iter()
                    .copied()
                    .filter(|&c| self.graph.color(c) == color)
                    .take(self.config.cure_threshold)
                    .collect();
                for &card in &spent {
                    state.players[player].remove_card(card);
                    state.decks.player_discard.push_back(PlayerCard::City(card));
                }
                log::info!("{} cured by {}", color, player);
            }
        }

        Ok(())
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        if state.all_cured() {
            return Some(GameResult::Victory);
        }
        if state.outbreak_count >= self.config.max_outbreaks {
            return Some(GameResult::Defeat(LossReason::Outbreaks));
        }
        if let Some(color) = Color::ALL.into_iter().find(|&c| state.exhausted[c]) {
            return Some(GameResult::Defeat(LossReason::CubesExhausted(color)));
        }
        // Only checked once the turn's actions are spent and a draw is due.
        if state.actions_taken >= self.config.actions_per_turn
            && state.decks.player_draw.len() < self.config.cards_per_draw
        {
            return Some(GameResult::Defeat(LossReason::PlayerDeckExhausted));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use crate::map::europe;

    fn rules() -> HotZoneRules {
        HotZoneRules::new(Arc::new(europe().unwrap()), GameConfig::default()).unwrap()
    }

    fn city(rules: &HotZoneRules, name: &str) -> CityId {
        rules.graph().lookup(name).unwrap()
    }

    fn state_at(rules: &HotZoneRules, name: &str) -> GameState {
        GameState::new(rules.city_count(), rules.config(), city(rules, name))
    }

    #[test]
    fn test_unknown_hub_rejected() {
        let config = GameConfig::default().with_hub("ATLANTIS");
        let result = HotZoneRules::new(Arc::new(europe().unwrap()), config);
        assert!(matches!(result, Err(GameError::UnknownCity(_))));
    }

    #[test]
    fn test_drive_legality() {
        let rules = rules();
        let state = state_at(&rules, "PARIS");

        assert!(rules.is_legal(&state, Action::Drive(city(&rules, "LONDON"))));
        assert!(!rules.is_legal(&state, Action::Drive(city(&rules, "OSLO"))));
        assert!(!rules.is_legal(&state, Action::Drive(CityId(200))));
    }

    #[test]
    fn test_flight_legality() {
        let rules = rules();
        let mut state = state_at(&rules, "PARIS");
        let oslo = city(&rules, "OSLO");
        state.players[PlayerId::new(0)].hand = vec![oslo];

        assert!(rules.is_legal(&state, Action::DirectFlight(oslo)));
        assert!(!rules.is_legal(&state, Action::CharterFlight(oslo)));

        state.players[PlayerId::new(0)].hand.push(city(&rules, "PARIS"));
        for target in rules.graph().ids() {
            assert!(rules.is_legal(&state, Action::CharterFlight(target)));
        }
    }

    #[test]
    fn test_direct_flight_spends_card() {
        let rules = rules();
        let mut state = state_at(&rules, "PARIS");
        let oslo = city(&rules, "OSLO");
        state.players[PlayerId::new(0)].hand = vec![oslo];

        rules.apply_action(&mut state, Action::DirectFlight(oslo)).unwrap();

        assert_eq!(state.active().location, oslo);
        assert!(state.active().hand.is_empty());
        assert!(state.decks.player_discarded(oslo));
    }

    #[test]
    fn test_charter_flight_spends_location_card() {
        let rules = rules();
        let mut state = state_at(&rules, "PARIS");
        let paris = city(&rules, "PARIS");
        let istanbul = city(&rules, "ISTANBUL");
        state.players[PlayerId::new(0)].hand = vec![paris];

        rules.apply_action(&mut state, Action::CharterFlight(istanbul)).unwrap();

        assert_eq!(state.active().location, istanbul);
        assert!(state.decks.player_discarded(paris));
    }

    #[test]
    fn test_treat_uncured_and_cured() {
        let rules = rules();
        let paris = city(&rules, "PARIS");
        let mut state = state_at(&rules, "PARIS");
        state.place_cubes(paris, Color::Blue, 3);

        assert!(!rules.is_legal(&state, Action::Treat(Color::Red)));
        rules.apply_action(&mut state, Action::Treat(Color::Blue)).unwrap();
        assert_eq!(state.level(paris, Color::Blue), 2);

        state.cures[Color::Blue] = true;
        rules.apply_action(&mut state, Action::Treat(Color::Blue)).unwrap();
        assert_eq!(state.level(paris, Color::Blue), 0);
        assert_eq!(state.cubes[Color::Blue], 16);
    }

    #[test]
    fn test_share_knowledge_both_directions() {
        let rules = rules();
        let paris = city(&rules, "PARIS");
        let mut state = state_at(&rules, "PARIS");
        state.players[PlayerId::new(1)].hand = vec![paris];

        assert!(rules.is_legal(&state, Action::ShareKnowledge));
        rules.apply_action(&mut state, Action::ShareKnowledge).unwrap();
        assert_eq!(state.players[PlayerId::new(0)].hand, vec![paris]);
        assert!(state.players[PlayerId::new(1)].hand.is_empty());

        rules.apply_action(&mut state, Action::ShareKnowledge).unwrap();
        assert_eq!(state.players[PlayerId::new(1)].hand, vec![paris]);
    }

    #[test]
    fn test_share_requires_same_city() {
        let rules = rules();
        let paris = city(&rules, "PARIS");
        let mut state = state_at(&rules, "PARIS");
        state.players[PlayerId::new(0)].hand = vec![paris];
        state.players[PlayerId::new(1)].location = city(&rules, "LONDON");

        assert!(!rules.is_legal(&state, Action::ShareKnowledge));
    }

    #[test]
    fn test_share_with_duplicate_card_is_invariant_violation() {
        let rules = rules();
        let paris = city(&rules, "PARIS");
        let mut state = state_at(&rules, "PARIS");
        state.players[PlayerId::new(0)].hand = vec![paris];
        state.players[PlayerId::new(1)].hand = vec![paris];

        let result = rules.apply_action(&mut state, Action::ShareKnowledge);
        assert!(matches!(result, Err(GameError::InvariantViolation(_))));
    }

    #[test]
    fn test_find_cure_at_hub() {
        let rules = rules();
        let mut state = state_at(&rules, "GENÈVE");
        let yellow: Vec<CityId> = ["LISBOA", "MADRID", "ROMA", "NAPOLI", "MILANO"]
            .iter()
            .map(|n| city(&rules, n))
            .collect();
        let mut hand = yellow.clone();
        hand.insert(2, city(&rules, "OSLO"));
        state.players[PlayerId::new(0)].hand = hand;

        assert!(rules.is_legal(&state, Action::FindCure(Color::Yellow)));
        assert!(!rules.is_legal(&state, Action::FindCure(Color::Blue)));

        rules.apply_action(&mut state, Action::FindCure(Color::Yellow)).unwrap();

        assert!(state.cures[Color::Yellow]);
        // The first four yellow cards in hand order are spent.
        assert_eq!(state.active().hand, vec![city(&rules, "OSLO"), yellow[4]]);
        assert_eq!(state.decks.player_discard.len(), 4);
        assert!(!rules.is_legal(&state, Action::FindCure(Color::Yellow)));
    }

    #[test]
    fn test_find_cure_away_from_hub() {
        let rules = rules();
        let mut state = state_at(&rules, "PARIS");
        state.players[PlayerId::new(0)].hand = ["DUBLIN", "LONDON", "BERLIN", "OSLO"]
            .iter()
            .map(|n| city(&rules, n))
            .collect();

        assert!(!rules.is_legal(&state, Action::FindCure(Color::Blue)));
    }

    #[test]
    fn test_illegal_action_leaves_state() {
        let rules = rules();
        let mut state = state_at(&rules, "PARIS");
        let before = state.clone();

        let result = rules.apply_action(&mut state, Action::Drive(city(&rules, "OSLO")));

        assert!(matches!(result, Err(GameError::InvalidAction(_))));
        assert_eq!(state, before);
    }

    #[test]
    fn test_mask_matches_legal_actions() {
        let rules = rules();
        let state = state_at(&rules, "GENÈVE");

        let mask = rules.action_mask(&state);
        let legal = rules.legal_actions(&state);

        assert_eq!(mask.len(), 79);
        assert_eq!(mask.iter().filter(|&&m| m).count(), legal.len());
        for action in legal {
            assert!(mask[action.to_index(rules.city_count())]);
        }
        assert_eq!(
            rules.legal_labels(&state),
            vec!["DRIVE to PARIS", "DRIVE to BRUXELLES", "DRIVE to MARSEILLE", "DRIVE to MILANO", "DRIVE to WIEN"]
        );
    }

    #[test]
    fn test_terminal_conditions() {
        let rules = rules();
        let mut state = state_at(&rules, "PARIS");
        state.decks.player_draw = im::Vector::from(vec![PlayerCard::Epidemic; 5]);
        assert_eq!(rules.is_terminal(&state), None);

        state.outbreak_count = 4;
        assert_eq!(rules.is_terminal(&state), Some(GameResult::Defeat(LossReason::Outbreaks)));

        state.outbreak_count = 0;
        state.exhausted[Color::Red] = true;
        assert_eq!(
            rules.is_terminal(&state),
            Some(GameResult::Defeat(LossReason::CubesExhausted(Color::Red)))
        );

        state.exhausted[Color::Red] = false;
        state.cures = crate::core::ColorMap::splat(true);
        assert_eq!(rules.is_terminal(&state), Some(GameResult::Victory));
    }

    #[test]
    fn test_deck_exhaustion_only_at_turn_end() {
        let rules = rules();
        let mut state = state_at(&rules, "PARIS");
        state.decks.player_draw = im::vector![PlayerCard::City(CityId(0))];

        state.actions_taken = 3;
        assert_eq!(rules.is_terminal(&state), None);

        state.actions_taken = 4;
        assert_eq!(
            rules.is_terminal(&state),
            Some(GameResult::Defeat(LossReason::PlayerDeckExhausted))
        );
    }
}
