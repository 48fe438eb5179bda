//! Simplified road map of part of Romania.
//!
//! The classic textbook example for informed search: twenty cities joined by
//! two-way roads (distances in kilometres) and placed on a plane so that the
//! straight-line distance never exceeds the road distance of any link.

use crate::map::LocationMap;

pub const ARAD: &str = "Arad";
pub const BUCHAREST: &str = "Bucharest";
pub const CRAIOVA: &str = "Craiova";
pub const DOBRETA: &str = "Dobreta";
pub const EFORIE: &str = "Eforie";
pub const FAGARAS: &str = "Fagaras";
pub const GIURGIU: &str = "Giurgiu";
pub const HIRSOVA: &str = "Hirsova";
pub const IASI: &str = "Iasi";
pub const LUGOJ: &str = "Lugoj";
pub const MEHADIA: &str = "Mehadia";
pub const NEAMT: &str = "Neamt";
pub const ORADEA: &str = "Oradea";
pub const PITESTI: &str = "Pitesti";
pub const RIMNICU_VILCEA: &str = "RimnicuVilcea";
pub const SIBIU: &str = "Sibiu";
pub const TIMISOARA: &str = "Timisoara";
pub const URZICENI: &str = "Urziceni";
pub const VASLUI: &str = "Vaslui";
pub const ZERIND: &str = "Zerind";

const ROADS: &[(&str, &str, u32)] = &[
    (ARAD, ZERIND, 75),
    (ARAD, SIBIU, 140),
    (ARAD, TIMISOARA, 118),
    (ZERIND, ORADEA, 71),
    (ORADEA, SIBIU, 151),
    (TIMISOARA, LUGOJ, 111),
    (LUGOJ, MEHADIA, 70),
    (MEHADIA, DOBRETA, 75),
    (DOBRETA, CRAIOVA, 120),
    (CRAIOVA, RIMNICU_VILCEA, 146),
    (CRAIOVA, PITESTI, 138),
    (SIBIU, FAGARAS, 99),
    (SIBIU, RIMNICU_VILCEA, 80),
    (RIMNICU_VILCEA, PITESTI, 97),
    (FAGARAS, BUCHAREST, 211),
    (PITESTI, BUCHAREST, 101),
    (BUCHAREST, GIURGIU, 90),
    (BUCHAREST, URZICENI, 85),
    (URZICENI, HIRSOVA, 98),
    (HIRSOVA, EFORIE, 86),
    (URZICENI, VASLUI, 142),
    (VASLUI, IASI, 92),
    (IASI, NEAMT, 87),
];

const PLACEMENTS: &[(&str, f64, f64)] = &[
    (ARAD, 91.0, 492.0),
    (BUCHAREST, 400.0, 327.0),
    (CRAIOVA, 253.0, 288.0),
    (DOBRETA, 165.0, 299.0),
    (EFORIE, 562.0, 293.0),
    (FAGARAS, 305.0, 449.0),
    (GIURGIU, 375.0, 270.0),
    (HIRSOVA, 534.0, 350.0),
    (IASI, 473.0, 506.0),
    (LUGOJ, 165.0, 379.0),
    (MEHADIA, 168.0, 339.0),
    (NEAMT, 406.0, 537.0),
    (ORADEA, 131.0, 571.0),
    (PITESTI, 320.0, 368.0),
    (RIMNICU_VILCEA, 233.0, 410.0),
    (SIBIU, 207.0, 457.0),
    (TIMISOARA, 94.0, 410.0),
    (URZICENI, 456.0, 350.0),
    (VASLUI, 509.0, 444.0),
    (ZERIND, 108.0, 531.0),
];

/// Build the map with all roads and city placements.
pub fn partial_romania_map() -> LocationMap {
    let mut map = LocationMap::new();
    for &(from, to, distance) in ROADS {
        map.add_bidirectional_link(from, to, distance);
    }
    for &(city, x, y) in PLACEMENTS {
        map.set_coords(city, x, y);
    }
    map
}
