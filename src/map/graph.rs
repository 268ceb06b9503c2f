//! Static city graph.
//!
//! The `CityGraph` stores every city's name, disease color and adjacency,
//! plus an all-pairs shortest-path table computed once at construction.
//! It is immutable after construction and shared read-only by the rules,
//! the evaluator and the observation encoder.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{CityId, Color, GameError, Result};

/// One city as supplied by an external map source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityEntry {
    pub name: String,
    pub color: String,
    pub neighbors: Vec<String>,
}

impl CityEntry {
    pub fn new(name: &str, color: &str, neighbors: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            neighbors: neighbors.iter().map(|n| n.to_string()).collect(),
        }
    }
}

/// Serializable map description (names, colors, adjacency).
///
/// Adjacency does not have to be listed in both directions; the graph
/// adds the reverse edges itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSpec {
    pub cities: Vec<CityEntry>,
}

/// A resolved city definition.
#[derive(Clone, Debug)]
pub struct CityDef {
    pub id: CityId,
    pub name: String,
    pub color: Color,
    pub neighbors: SmallVec<[CityId; 6]>,
}

/// Immutable city graph with precomputed distances.
///
/// ## Example
///
/// ```
/// use hotzone::map::{CityEntry, CityGraph, MapSpec};
///
/// let spec = MapSpec {
///     cities: vec![
///         CityEntry::new("A", "BLUE", &["B"]),
///         CityEntry::new("B", "RED", &["C"]),
///         CityEntry::new("C", "YELLOW", &[]),
///     ],
/// };
/// let graph = CityGraph::from_spec(&spec).unwrap();
///
/// let a = graph.lookup("A").unwrap();
/// let c = graph.lookup("C").unwrap();
/// assert_eq!(graph.distance(a, c), 2);
/// ```
#[derive(Clone, Debug)]
pub struct CityGraph {
    cities: Vec<CityDef>,
    by_name: FxHashMap<String, CityId>,
    /// Row-major `len x len` hop counts.
    distances: Vec<u8>,
    max_distance: u8,
}

impl CityGraph {
    /// Build and validate a graph from a map description.
    ///
    /// Fails on duplicate names, unknown colors, unknown or self
    /// neighbors, more than 255 cities, or a disconnected graph.
    pub fn from_spec(spec: &MapSpec) -> Result<Self> {
        if spec.cities.is_empty() {
            return Err(GameError::InvalidMap("map has no cities".into()));
        }
        if spec.cities.len() > u8::MAX as usize {
            return Err(GameError::InvalidMap(format!(
                "{} cities exceeds the supported maximum of {}",
                spec.cities.len(),
                u8::MAX
            )));
        }

        let mut by_name = FxHashMap::default();
        for (i, entry) in spec.cities.iter().enumerate() {
            if by_name.insert(entry.name.clone(), CityId(i as u8)).is_some() {
                return Err(GameError::InvalidMap(format!("duplicate city {:?}", entry.name)));
            }
        }

        let mut cities = Vec::with_capacity(spec.cities.len());
        for (i, entry) in spec.cities.iter().enumerate() {
            let color: Color = entry.color.parse()?;
            cities.push(CityDef {
                id: CityId(i as u8),
                name: entry.name.clone(),
                color,
                neighbors: SmallVec::new(),
            });
        }

        for (i, entry) in spec.cities.iter().enumerate() {
            let id = CityId(i as u8);
            for name in &entry.neighbors {
                let other = *by_name
                    .get(name)
                    .ok_or_else(|| GameError::InvalidMap(format!(
                        "{:?} lists unknown neighbor {:?}",
                        entry.name, name
                    )))?;
                if other == id {
                    return Err(GameError::InvalidMap(format!("{:?} is its own neighbor", entry.name)));
                }
                if !cities[id.index()].neighbors.contains(&other) {
                    cities[id.index()].neighbors.push(other);
                }
                if !cities[other.index()].neighbors.contains(&id) {
                    cities[other.index()].neighbors.push(id);
                }
            }
        }

        let (distances, max_distance) = all_pairs_distances(&cities)?;

        Ok(Self {
            cities,
            by_name,
            distances,
            max_distance,
        })
    }

    /// Number of cities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Check if the graph has no cities (never true for a built graph).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Iterate over all city ids in map order.
    pub fn ids(&self) -> impl Iterator<Item = CityId> {
        CityId::all(self.cities.len())
    }

    /// Iterate over all city definitions in map order.
    pub fn iter(&self) -> impl Iterator<Item = &CityDef> {
        self.cities.iter()
    }

    /// Get a city definition.
    #[must_use]
    pub fn city(&self, id: CityId) -> &CityDef {
        &self.cities[id.index()]
    }

    /// City name.
    #[must_use]
    pub fn name(&self, id: CityId) -> &str {
        &self.cities[id.index()].name
    }

    /// City disease color.
    #[must_use]
    pub fn color(&self, id: CityId) -> Color {
        self.cities[id.index()].color
    }

    /// Direct neighbors in adjacency order.
    #[must_use]
    pub fn neighbors(&self, id: CityId) -> &[CityId] {
        &self.cities[id.index()].neighbors
    }

    /// Check whether two cities are directly connected.
    #[must_use]
    pub fn is_adjacent(&self, a: CityId, b: CityId) -> bool {
        self.cities[a.index()].neighbors.contains(&b)
    }

    /// Resolve a city name.
    pub fn lookup(&self, name: &str) -> Result<CityId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| GameError::UnknownCity(name.to_string()))
    }

    /// Shortest-path hop count between two cities.
    #[must_use]
    pub fn distance(&self, a: CityId, b: CityId) -> u32 {
        self.distances[a.index() * self.cities.len() + b.index()] as u32
    }

    /// Largest shortest-path distance in the graph.
    #[must_use]
    pub fn diameter(&self) -> u32 {
        self.max_distance as u32
    }
}

/// Breadth-first search from every city.
fn all_pairs_distances(cities: &[CityDef]) -> Result<(Vec<u8>, u8)> {
    let n = cities.len();
    let mut distances = vec![u8::MAX; n * n];
    let mut max_distance = 0u8;
    let mut queue = VecDeque::with_capacity(n);

    for source in 0..n {
        let row = &mut distances[source * n..(source + 1) * n];
        row[source] = 0;
        queue.clear();
        queue.push_back(source);

        while let Some(current) = queue.pop_front() {
            let next = row[current] + 1;
            for neighbor in &cities[current].neighbors {
                let slot = &mut row[neighbor.index()];
                if *slot == u8::MAX {
                    *slot = next;
                    queue.push_back(neighbor.index());
                }
            }
        }

        if let Some(unreached) = row.iter().position(|&d| d == u8::MAX) {
            return Err(GameError::InvalidMap(format!(
                "{:?} cannot reach {:?}",
                cities[source].name, cities[unreached].name
            )));
        }
        max_distance = max_distance.max(row.iter().copied().max().unwrap_or(0));
    }

    Ok((distances, max_distance))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_with_tail() -> MapSpec {
        MapSpec {
            cities: vec![
                CityEntry::new("A", "BLUE", &["B", "C"]),
                CityEntry::new("B", "BLUE", &["C"]),
                CityEntry::new("C", "RED", &["D"]),
                CityEntry::new("D", "YELLOW", &[]),
            ],
        }
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let graph = CityGraph::from_spec(&triangle_with_tail()).unwrap();
        let c = graph.lookup("C").unwrap();
        let d = graph.lookup("D").unwrap();

        assert!(graph.is_adjacent(c, d));
        assert!(graph.is_adjacent(d, c));
        assert_eq!(graph.neighbors(d), &[c]);
    }

    #[test]
    fn test_distances() {
        let graph = CityGraph::from_spec(&triangle_with_tail()).unwrap();
        let a = graph.lookup("A").unwrap();
        let d = graph.lookup("D").unwrap();

        assert_eq!(graph.distance(a, a), 0);
        assert_eq!(graph.distance(a, d), 2);
        assert_eq!(graph.distance(d, a), 2);
        assert_eq!(graph.diameter(), 2);
    }

    #[test]
    fn test_invalid_color_rejected() {
        let spec = MapSpec {
            cities: vec![CityEntry::new("A", "GREEN", &[])],
        };
        assert!(matches!(CityGraph::from_spec(&spec), Err(GameError::InvalidMap(_))));
    }

    #[test]
    fn test_unknown_neighbor_rejected() {
        let spec = MapSpec {
            cities: vec![CityEntry::new("A", "RED", &["Z"])],
        };
        assert!(CityGraph::from_spec(&spec).is_err());
    }

    #[test]
    fn test_duplicate_rejected() {
        let spec = MapSpec {
            cities: vec![
                CityEntry::new("A", "RED", &["A2"]),
                CityEntry::new("A2", "RED", &[]),
                CityEntry::new("A", "BLUE", &[]),
            ],
        };
        assert!(CityGraph::from_spec(&spec).is_err());
    }

    #[test]
    fn test_disconnected_rejected() {
        let spec = MapSpec {
            cities: vec![
                CityEntry::new("A", "RED", &["B"]),
                CityEntry::new("B", "RED", &[]),
                CityEntry::new("C", "RED", &[]),
            ],
        };
        assert!(CityGraph::from_spec(&spec).is_err());
    }

    #[test]
    fn test_unknown_lookup() {
        let graph = CityGraph::from_spec(&triangle_with_tail()).unwrap();
        assert!(matches!(graph.lookup("NOWHERE"), Err(GameError::UnknownCity(_))));
    }

    #[test]
    fn test_spec_from_json() {
        let json = r#"{"cities": [
            {"name": "A", "color": "red", "neighbors": ["B"]},
            {"name": "B", "color": "blue", "neighbors": []}
        ]}"#;
        let spec: MapSpec = serde_json::from_str(json).unwrap();
        let graph = CityGraph::from_spec(&spec).unwrap();

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.color(graph.lookup("B").unwrap()), Color::Blue);
    }
}
