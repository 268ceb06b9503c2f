//! Per-turn goal selection.
//!
//! A goal gates which distance term the evaluator uses. It is chosen once
//! per player turn (and again when the planner crosses into the partner's
//! turn) and carried as an explicit value, never stored on the players.

use serde::{Deserialize, Serialize};

use crate::core::{CityId, Color, ColorMap, GameState, PlayerState};
use crate::rules::{HotZoneRules, RulesEngine};

/// What the active player is working towards this turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Goal {
    /// The active hand can already cure: head for the hub.
    Cure,
    /// Meet the partner in `city` to hand over its card.
    Share { city: CityId },
    /// Nothing to cure or share: stay close to the infection.
    #[default]
    Survive,
}

impl Goal {
    /// The city the goal steers towards, if any.
    #[must_use]
    pub fn target(self, rules: &HotZoneRules) -> Option<CityId> {
        match self {
            Goal::Cure => Some(rules.hub()),
            Goal::Share { city } => Some(city),
            Goal::Survive => None,
        }
    }
}

/// Choose the goal for the active player.
///
/// Cure if the active hand already holds enough cards of an uncured
/// color; otherwise share if a worthwhile hand-off exists; otherwise
/// survive.
#[must_use]
pub fn choose_goal(rules: &HotZoneRules, state: &GameState) -> Goal {
    let threshold = rules.config().cure_threshold;
    let can_cure = Color::ALL
        .into_iter()
        .any(|c| !state.cures[c] && rules.color_count(&state.active().hand, c) >= threshold);
    if can_cure {
        return Goal::Cure;
    }

    match share_target(rules, state) {
        Some(city) => Goal::Share { city },
        None => Goal::Survive,
    }
}

/// Best city for a card hand-off, if any.
///
/// A hand-off that completes a cure (receiver one card short) always beats
/// one that brings the receiver two short closer; within a class the
/// candidate with the smallest summed distance to both players wins.
/// Scanning goes active-to-partner then partner-to-active, colors in
/// canonical order, candidates in the giver's hand order; ties keep the
/// first found.
#[must_use]
pub fn share_target(rules: &HotZoneRules, state: &GameState) -> Option<CityId> {
    let graph = rules.graph();
    let threshold = rules.config().cure_threshold;
    let me = state.active();
    let partner = state.partner();

    let mut completes: Option<(u32, CityId)> = None;
    let mut advances: Option<(u32, CityId)> = None;

    let pairs: [(&PlayerState, &PlayerState); 2] = [(me, partner), (partner, me)];
    for (giver, receiver) in pairs {
        for color in Color::ALL {
            if state.cures[color] {
                continue;
            }
            let giving = rules.color_count(&giver.hand, color);
            let receiving = rules.color_count(&receiver.hand, color);

            for &candidate in giver.hand.iter().filter(|&&c| graph.color(c) == color) {
                let dist = graph.distance(candidate, me.location) + graph.distance(candidate, partner.location);

                let slot = if receiving + 1 == threshold && giving >= 1 {
                    &mut completes
                } else if receiving + 2 == threshold && (1..=2).contains(&giving) {
                    &mut advances
                } else {
                    continue;
                };
                if slot.map_or(true, |(best, _)| dist < best) {
                    *slot = Some((dist, candidate));
                }
            }
        }
    }

    completes.or(advances).map(|(_, city)| city)
}

/// Per-color chance of discovering a cure from the current hands.
///
/// `min(1, count / threshold)` for the best single hand, or 1 once cured.
#[must_use]
pub fn cure_probabilities(rules: &HotZoneRules, state: &GameState) -> ColorMap<f64> {
    let threshold = rules.config().cure_threshold.max(1) as f64;
    ColorMap::new(|color| {
        if state.cures[color] {
            return 1.0;
        }
        state
            .players
            .values()
            .map(|p| (rules.color_count(&p.hand, color) as f64 / threshold).min(1.0))
            .fold(0.0, f64::max)
    })
}
