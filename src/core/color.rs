//! Disease colors and color-indexed storage.
//!
//! The game has exactly three diseases. Per-color data (cube pools, cure
//! flags, per-city infection levels) is stored in a `ColorMap`, a
//! fixed-size array indexed by `Color`, so an invalid color cannot be
//! expressed after construction.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use super::error::GameError;

/// A disease color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Yellow,
    Blue,
    Red,
}

impl Color {
    /// All colors in canonical order (Yellow, Blue, Red).
    pub const ALL: [Color; 3] = [Color::Yellow, Color::Blue, Color::Red];

    /// Canonical index (0, 1, 2).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Color::Yellow => 0,
            Color::Blue => 1,
            Color::Red => 2,
        }
    }

    /// Upper-case name used in action labels.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Yellow => "YELLOW",
            Color::Blue => "BLUE",
            Color::Red => "RED",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "YELLOW" => Ok(Color::Yellow),
            "BLUE" => Ok(Color::Blue),
            "RED" => Ok(Color::Red),
            _ => Err(GameError::InvalidMap(format!("invalid color {s:?}"))),
        }
    }
}

/// One value per disease color.
///
/// ```
/// use hotzone::core::{Color, ColorMap};
///
/// let mut pools = ColorMap::splat(16);
/// pools[Color::Blue] -= 3;
/// assert_eq!(pools[Color::Blue], 13);
/// assert_eq!(pools.values().sum::<i32>(), 45);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorMap<T>([T; 3]);

impl<T> ColorMap<T> {
    /// Build from a factory called once per color.
    pub fn new(factory: impl Fn(Color) -> T) -> Self {
        Self(Color::ALL.map(factory))
    }

    /// Iterate over (Color, &T) pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Color, &T)> {
        Color::ALL.into_iter().zip(self.0.iter())
    }

    /// Iterate over the values in canonical order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }
}

impl<T: Copy> ColorMap<T> {
    /// Same value for every color.
    pub fn splat(value: T) -> Self {
        Self([value; 3])
    }
}

impl<T> Index<Color> for ColorMap<T> {
    type Output = T;

    fn index(&self, color: Color) -> &Self::Output {
        &self.0[color.index()]
    }
}

impl<T> IndexMut<Color> for ColorMap<T> {
    fn index_mut(&mut self, color: Color) -> &mut Self::Output {
        &mut self.0[color.index()]
    }
}
