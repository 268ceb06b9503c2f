//! City identification.
//!
//! Every city on the map has a dense `CityId` assigned in map order, so
//! per-city data can live in plain vectors indexed by id. Names are only
//! needed at the edges (map loading, action labels, logs).
//!
//! ```
//! use hotzone::core::CityId;
//!
//! let city = CityId::new(4);
//! assert_eq!(city.index(), 4);
//! ```

use serde::{Deserialize, Serialize};

/// Dense city identifier (index into the map's city list).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CityId(pub u8);

impl CityId {
    /// Create a city ID from its map index.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Get the raw map index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over the ids of a map with `city_count` cities.
    pub fn all(city_count: usize) -> impl Iterator<Item = CityId> {
        (0..city_count).map(|i| CityId(i as u8))
    }
}

impl std::fmt::Display for CityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "City({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_id_all() {
        let ids: Vec<_> = CityId::all(3).collect();
        assert_eq!(ids, vec![CityId(0), CityId(1), CityId(2)]);
    }

    #[test]
    fn test_city_id_display() {
        assert_eq!(format!("{}", CityId::new(7)), "City(7)");
    }
}
