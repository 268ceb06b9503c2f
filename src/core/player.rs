//! Player identification and per-player data storage.
//!
//! The game is played by exactly two cooperating players. Each player's
//! partner is the other one, so the partner relation is symmetric by
//! construction rather than stored as a back-reference.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of cooperating players.
pub const PLAYER_COUNT: usize = 2;

/// Player identifier (0 or 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other player.
    ///
    /// ```
    /// use hotzone::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(0).partner(), PlayerId::new(1));
    /// assert_eq!(PlayerId::new(1).partner(), PlayerId::new(0));
    /// ```
    #[must_use]
    pub const fn partner(self) -> Self {
        Self(1 - self.0)
    }

    /// Iterate over both player IDs.
    pub fn all() -> impl Iterator<Item = PlayerId> {
        (0..PLAYER_COUNT as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use hotzone::core::{PlayerId, PlayerMap};
///
/// let mut hands: PlayerMap<usize> = PlayerMap::new(|_| 3);
/// hands[PlayerId::new(1)] += 2;
/// assert_eq!(hands[PlayerId::new(0)], 3);
/// assert_eq!(hands[PlayerId::new(1)], 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: PlayerId::all().map(factory).collect(),
        }
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Mutable access to both players at once, in (`first`, `second`) order.
    ///
    /// Panics if `first == second`.
    pub fn pair_mut(&mut self, first: PlayerId, second: PlayerId) -> (&mut T, &mut T) {
        assert_ne!(first, second, "pair_mut needs two distinct players");
        let (low, high) = self.data.split_at_mut(1);
        if first.index() == 0 {
            (&mut low[0], &mut high[0])
        } else {
            (&mut high[0], &mut low[0])
        }
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over the values only.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert_eq!(p0.index(), 0);
        assert_eq!(p1.index(), 1);
        assert_eq!(format!("{}", p0), "Player 1");
        assert_eq!(p0.partner().partner(), p0);
    }

    #[test]
    fn test_player_id_all() {
        let players: Vec<_> = PlayerId::all().collect();
        assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1)]);
    }

    #[test]
    fn test_player_map_new() {
        let map: PlayerMap<i32> = PlayerMap::new(|p| p.index() as i32 * 10);

        assert_eq!(map[PlayerId::new(0)], 0);
        assert_eq!(map[PlayerId::new(1)], 10);
    }

    #[test]
    fn test_player_map_pair_mut() {
        let mut map: PlayerMap<Vec<u8>> = PlayerMap::new(|_| Vec::new());

        let (a, b) = map.pair_mut(PlayerId::new(1), PlayerId::new(0));
        a.push(1);
        b.push(0);

        assert_eq!(map[PlayerId::new(0)], vec![0]);
        assert_eq!(map[PlayerId::new(1)], vec![1]);
    }

    #[test]
    fn test_player_map_iter() {
        let map: PlayerMap<i32> = PlayerMap::new(|p| p.index() as i32);

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(PlayerId::new(0), &0), (PlayerId::new(1), &1)]);
        assert_eq!(map.values().sum::<i32>(), 1);
    }

    #[test]
    fn test_player_map_serialization() {
        let map: PlayerMap<i32> = PlayerMap::new(|p| p.index() as i32 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PlayerMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }

    #[test]
    #[should_panic(expected = "two distinct players")]
    fn test_pair_mut_same_player() {
        let mut map: PlayerMap<i32> = PlayerMap::new(|_| 0);
        let _ = map.pair_mut(PlayerId::new(0), PlayerId::new(0));
    }
}
