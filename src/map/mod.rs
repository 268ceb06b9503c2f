//! City topology.
//!
//! The map is static input: names, one disease color per city, and
//! adjacency. It can come from any external source through `MapSpec`
//! (which is serde-deserializable) or from the built-in Europe board.

pub mod europe;
pub mod graph;

pub use europe::{europe, europe_spec};
pub use graph::{CityDef, CityEntry, CityGraph, MapSpec};
