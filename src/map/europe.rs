//! Built-in 24-city Europe map.
//!
//! Eight cities per disease color, with the hub (`GENÈVE`) at the center
//! of the network. Layout coordinates are not included: the engine only
//! needs names, colors and adjacency.

use super::graph::{CityEntry, CityGraph, MapSpec};
use crate::core::Result;

const CITIES: &[(&str, &str, &[&str])] = &[
    // Blue
    ("DUBLIN", "BLUE", &["LONDON"]),
    ("LONDON", "BLUE", &["PARIS", "AMSTERDAM"]),
    ("PARIS", "BLUE", &["BRUXELLES", "GENÈVE", "MARSEILLE", "MADRID"]),
    ("AMSTERDAM", "BLUE", &["BRUXELLES", "BERLIN", "KØBENHAVN"]),
    ("BRUXELLES", "BLUE", &["BERLIN", "GENÈVE"]),
    ("BERLIN", "BLUE", &["KØBENHAVN", "PRAHA", "WARSZAWA"]),
    ("KØBENHAVN", "BLUE", &["OSLO", "STOCKHOLM"]),
    ("OSLO", "BLUE", &["STOCKHOLM"]),
    // Yellow
    ("LISBOA", "YELLOW", &["MADRID"]),
    ("MADRID", "YELLOW", &["BARCELONA"]),
    ("BARCELONA", "YELLOW", &["MARSEILLE"]),
    ("MARSEILLE", "YELLOW", &["GENÈVE", "MILANO"]),
    ("GENÈVE", "YELLOW", &["MILANO", "WIEN"]),
    ("MILANO", "YELLOW", &["ROMA"]),
    ("ROMA", "YELLOW", &["NAPOLI"]),
    ("NAPOLI", "YELLOW", &["ATHÍNA"]),
    // Red
    ("STOCKHOLM", "RED", &["WARSZAWA"]),
    ("WARSZAWA", "RED", &["BUDAPEST"]),
    ("PRAHA", "RED", &["WIEN"]),
    ("WIEN", "RED", &["BUDAPEST"]),
    ("BUDAPEST", "RED", &["BEOGRAD"]),
    ("BEOGRAD", "RED", &["ATHÍNA", "ISTANBUL"]),
    ("ATHÍNA", "RED", &["ISTANBUL"]),
    ("ISTANBUL", "RED", &[]),
];

/// Map description of the built-in Europe board.
#[must_use]
pub fn europe_spec() -> MapSpec {
    MapSpec {
        cities: CITIES
            .iter()
            .map(|(name, color, neighbors)| CityEntry::new(name, color, neighbors))
            .collect(),
    }
}

/// The built-in Europe board as a ready graph.
pub fn europe() -> Result<CityGraph> {
    CityGraph::from_spec(&europe_spec())
}
