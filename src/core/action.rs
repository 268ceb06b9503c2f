//! Action representation and the fixed action vocabulary.
//!
//! Every action an agent can take maps to a stable index in a vocabulary
//! of size `3 * N + 7` for a map of `N` cities:
//!
//! | Range            | Action                    |
//! |------------------|---------------------------|
//! | `0..N`           | `Drive(city)`             |
//! | `N..2N`          | `DirectFlight(city)`      |
//! | `2N..3N`         | `CharterFlight(city)`     |
//! | `3N..3N+3`       | `Treat(color)`            |
//! | `3N+3`           | `ShareKnowledge`          |
//! | `3N+4..3N+7`     | `FindCure(color)`         |
//!
//! Colors are ordered Yellow, Blue, Red.
//!
//! ```
//! use hotzone::core::{Action, CityId, Color};
//!
//! let n = 24;
//! assert_eq!(Action::vocabulary_size(n), 79);
//! assert_eq!(Action::DirectFlight(CityId(2)).to_index(n), 26);
//! assert_eq!(Action::from_index(76, n).unwrap(), Action::FindCure(Color::Yellow));
//! ```

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::entity::CityId;
use super::error::{GameError, Result};

/// One player action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Move to an adjacent city.
    Drive(CityId),
    /// Spend the destination's card to fly there.
    DirectFlight(CityId),
    /// Spend the current city's card to fly anywhere.
    CharterFlight(CityId),
    /// Remove cubes of one color from the current city.
    Treat(Color),
    /// Hand the current city's card to the partner (either direction).
    ShareKnowledge,
    /// Spend same-color cards at the hub to cure a disease.
    FindCure(Color),
}

impl Action {
    /// Number of distinct actions for a map of `city_count` cities.
    #[must_use]
    pub const fn vocabulary_size(city_count: usize) -> usize {
        3 * city_count + 7
    }

    /// Decode a vocabulary index.
    pub fn from_index(index: usize, city_count: usize) -> Result<Self> {
        let n = city_count;
        let size = Self::vocabulary_size(n);
        if index >= size {
            return Err(GameError::ActionOutOfRange { index, size });
        }

        let action = match index {
            i if i < n => Action::Drive(CityId(i as u8)),
            i if i < 2 * n => Action::DirectFlight(CityId((i - n) as u8)),
            i if i < 3 * n => Action::CharterFlight(CityId((i - 2 * n) as u8)),
            i if i < 3 * n + 3 => Action::Treat(Color::ALL[i - 3 * n]),
            i if i == 3 * n + 3 => Action::ShareKnowledge,
            i => Action::FindCure(Color::ALL[i - 3 * n - 4]),
        };
        Ok(action)
    }

    /// Encode as a vocabulary index.
    #[must_use]
    pub fn to_index(self, city_count: usize) -> usize {
        let n = city_count;
        match self {
            Action::Drive(city) => city.index(),
            Action::DirectFlight(city) => n + city.index(),
            Action::CharterFlight(city) => 2 * n + city.index(),
            Action::Treat(color) => 3 * n + color.index(),
            Action::ShareKnowledge => 3 * n + 3,
            Action::FindCure(color) => 3 * n + 4 + color.index(),
        }
    }

    /// Iterate over the whole vocabulary in index order.
    pub fn all(city_count: usize) -> impl Iterator<Item = Action> {
        let cities = move || CityId::all(city_count);
        cities()
            .map(Action::Drive)
            .chain(cities().map(Action::DirectFlight))
            .chain(cities().map(Action::CharterFlight))
            .chain(Color::ALL.into_iter().map(Action::Treat))
            .chain(std::iter::once(Action::ShareKnowledge))
            .chain(Color::ALL.into_iter().map(Action::FindCure))
    }

    /// Destination of a movement action.
    #[must_use]
    pub fn destination(self) -> Option<CityId> {
        match self {
            Action::Drive(city) | Action::DirectFlight(city) | Action::CharterFlight(city) => Some(city),
            _ => None,
        }
    }

    /// Human-readable label, e.g. `"DRIVE to PARIS"` or `"TREAT RED"`.
    ///
    /// `name` resolves city ids to display names.
    pub fn label<'a>(self, name: impl Fn(CityId) -> &'a str) -> String {
        match self {
            Action::Drive(city) => format!("DRIVE to {}", name(city)),
            Action::DirectFlight(city) => format!("DIRECT FLIGHT to {}", name(city)),
            Action::CharterFlight(city) => format!("CHARTER FLIGHT to {}", name(city)),
            Action::Treat(color) => format!("TREAT {color}"),
            Action::ShareKnowledge => "SHARE KNOWLEDGE".to_string(),
            Action::FindCure(color) => format!("FIND CURE {color}"),
        }
    }
}
