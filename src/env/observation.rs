//! Fixed-width observation encoding.
//!
//! ## Layout
//!
//! One block of `11 + N` values per city, in map order:
//!
//! | Offset     | Value                                   |
//! |------------|-----------------------------------------|
//! | 0          | city is the current share target        |
//! | 1          | color index / 2                         |
//! | 2..5       | yellow, blue, red cubes / 3             |
//! | 5, 6       | in player 1's hand, player 1 is here    |
//! | 7, 8       | in player 2's hand, player 2 is here    |
//! | 9          | in the infection discard pile           |
//! | 10         | in the player discard pile              |
//! | 11..11+N   | graph distance to every city / 8        |
//!
//! followed by 9 globals: round / 10, active player id, actions taken /
//! actions per turn, outbreaks / outbreak limit, infection rate index /
//! last index, the three cure flags and the cure-goal flag.

use crate::core::{Color, GameState, PlayerId, MAX_CUBES};
use crate::eval::Goal;
use crate::rules::{HotZoneRules, RulesEngine};

/// Values per city before the distance row.
pub const CITY_FEATURES: usize = 11;

/// Global values after the city blocks.
pub const GLOBAL_FEATURES: usize = 9;

const DISTANCE_SCALE: f32 = 8.0;
const ROUND_SCALE: f32 = 10.0;

/// Observation width for a map of `city_count` cities.
///
/// ```
/// assert_eq!(hotzone::env::observation_width(24), 849);
/// ```
#[must_use]
pub const fn observation_width(city_count: usize) -> usize {
    city_count * (CITY_FEATURES + city_count) + GLOBAL_FEATURES
}

fn flag(value: bool) -> f32 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Encode a state and the active goal into a flat vector.
#[must_use]
pub fn encode_observation(rules: &HotZoneRules, state: &GameState, goal: Goal) -> Vec<f32> {
    let graph = rules.graph();
    let config = rules.config();
    let n = graph.len();
    let first = &state.players[PlayerId::new(0)];
    let second = &state.players[PlayerId::new(1)];
    let share_city = match goal {
        Goal::Share { city } => Some(city),
        _ => None,
    };

    let mut obs = Vec::with_capacity(observation_width(n));
    for city in graph.ids() {
        let levels = &state.cities[city.index()].levels;

        obs.push(flag(share_city == Some(city)));
        obs.push(graph.color(city).index() as f32 / 2.0);
        for color in Color::ALL {
            obs.push(f32::from(levels[color]) / f32::from(MAX_CUBES));
        }
        obs.push(flag(first.holds(city)));
        obs.push(flag(first.location == city));
        obs.push(flag(second.holds(city)));
        obs.push(flag(second.location == city));
        obs.push(flag(state.decks.infection_discarded(city)));
        obs.push(flag(state.decks.player_discarded(city)));

        for other in graph.ids() {
            obs.push(graph.distance(city, other) as f32 / DISTANCE_SCALE);
        }
    }

    let rate_scale = config.infection_rate_track.len().saturating_sub(1).max(1) as f32;
    obs.push(state.round as f32 / ROUND_SCALE);
    obs.push(state.active_player.index() as f32);
    obs.push(state.actions_taken as f32 / config.actions_per_turn.max(1) as f32);
    obs.push(state.outbreak_count as f32 / config.max_outbreaks.max(1) as f32);
    obs.push(state.infection_rate_index as f32 / rate_scale);
    for color in Color::ALL {
        obs.push(flag(state.cures[color]));
    }
    obs.push(flag(goal == Goal::Cure));

    debug_assert_eq!(obs.len(), observation_width(n));
    obs
}
