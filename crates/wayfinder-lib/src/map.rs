use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::LabeledGraph;

/// Minimum Jaro-Winkler similarity for a location to be suggested.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Travel distance between two linked locations.
pub type Distance = u32;

/// Cartesian placement of a location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    pub x: f64,
    pub y: f64,
}

impl Coords {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Place a point `distance` away from the origin along a compass bearing
    /// (degrees clockwise from north).
    pub fn from_bearing(distance: f64, bearing_degrees: f64) -> Self {
        let radians = bearing_degrees.to_radians();
        Self {
            x: -radians.sin() * distance,
            y: radians.cos() * distance,
        }
    }

    /// Calculate the Euclidean distance to another point.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Map of named locations joined by distance-labelled links, with optional
/// 2D placements used for straight-line-distance heuristics.
///
/// A bidirectional link is stored as two independent one-way links, so a
/// later one-way overwrite can make the two directions disagree.
#[derive(Debug, Clone, Default)]
pub struct LocationMap {
    links: LabeledGraph<String, Distance>,
    coords: HashMap<String, Coords>,
    reference: Option<String>,
}

impl LocationMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all links, placements and the reference location.
    pub fn clear(&mut self) {
        self.links.clear();
        self.coords.clear();
        self.reference = None;
    }

    /// Remove all links but keep location placements.
    pub fn clear_links(&mut self) {
        self.links.clear();
    }

    /// All locations registered by a link, in insertion order.
    pub fn locations(&self) -> &[String] {
        self.links.vertex_labels()
    }

    pub fn is_location(&self, name: &str) -> bool {
        self.links.is_vertex_label(&name.to_string())
    }

    /// Locations reachable over one link starting at `from`.
    pub fn locations_linked_to(&self, from: &str) -> Vec<String> {
        self.links.successors(&from.to_string())
    }

    /// Outgoing links of `from` with their travel distances.
    pub fn links_from(&self, from: &str) -> &[(String, Distance)] {
        self.links.edges(&from.to_string())
    }

    /// Travel distance of the link `from -> to`; `None` when not linked.
    pub fn distance(&self, from: &str, to: &str) -> Option<Distance> {
        self.links
            .get(&from.to_string(), &to.to_string())
            .copied()
    }

    pub fn add_unidirectional_link(&mut self, from: &str, to: &str, distance: Distance) {
        self.links.set(from.to_string(), to.to_string(), distance);
    }

    /// Add a link travelable in both directions as two one-way links.
    pub fn add_bidirectional_link(&mut self, from: &str, to: &str, distance: Distance) {
        self.links.set(from.to_string(), to.to_string(), distance);
        self.links.set(to.to_string(), from.to_string(), distance);
    }

    pub fn remove_unidirectional_link(&mut self, from: &str, to: &str) {
        self.links.remove(&from.to_string(), &to.to_string());
    }

    /// Remove both one-way links between two locations, whatever their distances.
    pub fn remove_bidirectional_link(&mut self, from: &str, to: &str) {
        let (from, to) = (from.to_string(), to.to_string());
        self.links.remove(&from, &to);
        self.links.remove(&to, &from);
    }

    /// Place a location in the orthogonal coordinate system, replacing any
    /// earlier placement.
    pub fn set_coords(&mut self, location: &str, x: f64, y: f64) {
        self.coords.insert(location.to_string(), Coords::new(x, y));
    }

    /// Mark `location` as the origin for polar placements and put it at (0, 0).
    pub fn set_reference_location(&mut self, location: &str) {
        self.set_coords(location, 0.0, 0.0);
        self.reference = Some(location.to_string());
    }

    /// Location recorded as the origin of polar placements, if any.
    pub fn reference_location(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// Place a location by its distance and compass bearing as seen from the
    /// reference location at (0, 0).
    pub fn set_dist_and_dir_to_ref_location(
        &mut self,
        location: &str,
        distance: f64,
        bearing_degrees: f64,
    ) {
        self.coords.insert(
            location.to_string(),
            Coords::from_bearing(distance, bearing_degrees),
        );
    }

    /// Straight-line distance between two placed locations.
    ///
    /// Returns `None` unless both locations have coordinates. When placements
    /// and link distances share a metric this never exceeds the travel
    /// distance, so it is usable as an admissible heuristic.
    pub fn straight_line_distance(&self, from: &str, to: &str) -> Option<f64> {
        let a = self.coords.get(from)?;
        let b = self.coords.get(to)?;
        Some(a.distance_to(b))
    }

    pub fn xy(&self, location: &str) -> Option<Coords> {
        self.coords.get(location).copied()
    }

    /// Pick a location uniformly at random using the supplied generator.
    pub fn random_destination<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String> {
        self.locations()
            .choose(rng)
            .cloned()
            .ok_or(Error::EmptyMap)
    }

    /// Pick a location uniformly at random using the thread-local generator.
    pub fn randomly_generate_destination(&self) -> Result<String> {
        self.random_destination(&mut rand::thread_rng())
    }

    /// Location names that closely resemble `name`, best match first.
    pub fn fuzzy_location_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.to_lowercase();
        let mut scored: Vec<(f64, &String)> = self
            .locations()
            .iter()
            .map(|candidate| {
                let score = strsim::jaro_winkler(&needle, &candidate.to_lowercase());
                (score, candidate)
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn bearing_zero_points_north() {
        let coords = Coords::from_bearing(10.0, 0.0);
        assert!(coords.x.abs() < 1e-9);
        assert!((coords.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn bearing_ninety_points_to_negative_x() {
        let coords = Coords::from_bearing(10.0, 90.0);
        assert!((coords.x + 10.0).abs() < 1e-9);
        assert!(coords.y.abs() < 1e-9);
    }

    #[test]
    fn random_destination_on_empty_map_fails() {
        let map = LocationMap::new();
        let mut rng = StdRng::seed_from_u64(7);
        assert!(matches!(
            map.random_destination(&mut rng),
            Err(Error::EmptyMap)
        ));
    }

    #[test]
    fn random_destination_is_a_location() {
        let mut map = LocationMap::new();
        map.add_bidirectional_link("A", "B", 1);
        map.add_unidirectional_link("B", "C", 2);

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let picked = map.random_destination(&mut rng).expect("non-empty map");
            assert!(map.is_location(&picked));
        }
    }

    #[test]
    fn reference_location_sits_at_origin() {
        let mut map = LocationMap::new();
        map.set_reference_location("Home");

        assert_eq!(map.reference_location(), Some("Home"));
        assert_eq!(map.xy("Home"), Some(Coords::new(0.0, 0.0)));

        map.clear();
        assert_eq!(map.reference_location(), None);
        assert_eq!(map.xy("Home"), None);
    }

    #[test]
    fn fuzzy_matches_rank_close_names_first() {
        let mut map = LocationMap::new();
        map.add_bidirectional_link("Bucharest", "Giurgiu", 90);
        map.add_bidirectional_link("Bucharest", "Urziceni", 85);

        let matches = map.fuzzy_location_matches("Bukarest", 3);
        assert_eq!(matches.first().map(String::as_str), Some("Bucharest"));
        assert!(map.fuzzy_location_matches("Zzzzzz", 3).is_empty());
    }
}
