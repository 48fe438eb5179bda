//! Map entities returned by entity finders.
//!
//! Entities are either point-like nodes or ways (ordered node sequences such
//! as roads). Both carry free-form `key=value` tags; an entity carrying an
//! `addr:street` tag is treated as address-bearing.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Mean earth radius in kilometres used for great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

pub const TAG_STREET: &str = "addr:street";
pub const TAG_HOUSENUMBER: &str = "addr:housenumber";
pub const TAG_PLACE: &str = "place";

/// Numeric identifier for a node or way.
pub type EntityId = i64;

/// Geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

impl Position {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle (haversine) distance to another position in kilometres.
    pub fn distance_km(&self, other: &Self) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlat = lat2 - lat1;
        let dlon = (other.lon - self.lon).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
    }

    /// Earth-centred Cartesian coordinates in kilometres.
    ///
    /// The chord between two such points never exceeds the great-circle
    /// distance, which lets a Euclidean radius query act as a superset filter.
    pub fn to_cartesian(&self) -> [f64; 3] {
        let lat = self.lat.to_radians();
        let lon = self.lon.to_radians();
        [
            EARTH_RADIUS_KM * lat.cos() * lon.cos(),
            EARTH_RADIUS_KM * lat.cos() * lon.sin(),
            EARTH_RADIUS_KM * lat.sin(),
        ]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5},{:.5}", self.lat, self.lon)
    }
}

/// Point entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapNode {
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub position: Position,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

/// Ordered sequence of nodes, e.g. a road or a building outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapWay {
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub nodes: Vec<MapNode>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

impl MapWay {
    /// Tag value lookup.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

/// Classification of a map entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Node,
    Way,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            EntityKind::Node => "node",
            EntityKind::Way => "way",
        };
        f.write_str(value)
    }
}

/// Entity stored in a map data storage and returned by finders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapEntity {
    Node(MapNode),
    Way(MapWay),
}

impl MapEntity {
    pub fn id(&self) -> EntityId {
        match self {
            MapEntity::Node(node) => node.id,
            MapEntity::Way(way) => way.id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            MapEntity::Node(_) => EntityKind::Node,
            MapEntity::Way(_) => EntityKind::Way,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            MapEntity::Node(node) => node.name.as_deref(),
            MapEntity::Way(way) => way.name.as_deref(),
        }
    }

    pub fn tags(&self) -> &BTreeMap<String, String> {
        match self {
            MapEntity::Node(node) => &node.tags,
            MapEntity::Way(way) => &way.tags,
        }
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags().get(key).map(String::as_str)
    }

    pub fn is_address(&self) -> bool {
        self.tags().contains_key(TAG_STREET)
    }

    /// Positions that represent this entity in space.
    pub fn positions(&self) -> Vec<Position> {
        match self {
            MapEntity::Node(node) => vec![node.position],
            MapEntity::Way(way) => way.nodes.iter().map(|node| node.position).collect(),
        }
    }

    /// Representative position: the node itself, or the first node of a way.
    pub fn position(&self) -> Option<Position> {
        match self {
            MapEntity::Node(node) => Some(node.position),
            MapEntity::Way(way) => way.nodes.first().map(|node| node.position),
        }
    }

    /// Smallest distance in kilometres between `position` and this entity.
    pub fn distance_km(&self, position: &Position) -> Option<f64> {
        self.positions()
            .iter()
            .map(|p| p.distance_km(position))
            .min_by(|a, b| a.total_cmp(b))
    }
}

/// Decides which ways qualify for a way query.
pub trait WayFilter: Send + Sync {
    fn is_accepted(&self, way: &MapWay) -> bool;
}

impl<F> WayFilter for F
where
    F: Fn(&MapWay) -> bool + Send + Sync,
{
    fn is_accepted(&self, way: &MapWay) -> bool {
        self(way)
    }
}

/// Accepts ways whose tag `key` has one of the listed values, or any value
/// when the list is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    key: String,
    values: Vec<String>,
}

impl TagFilter {
    pub fn new(key: impl Into<String>, values: Vec<String>) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(Error::InvalidFilter {
                message: "tag key must not be empty".to_string(),
            });
        }
        Ok(Self {
            key: key.trim().to_string(),
            values: values
                .into_iter()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty() && value != "*")
                .collect(),
        })
    }

    /// Parse `key`, `key=*` or `key=value1|value2`.
    pub fn parse(expr: &str) -> Result<Self> {
        match expr.split_once('=') {
            Some((key, values)) => Self::new(key, values.split('|').map(str::to_string).collect()),
            None => Self::new(expr, Vec::new()),
        }
    }
}

impl WayFilter for TagFilter {
    fn is_accepted(&self, way: &MapWay) -> bool {
        match way.tag(&self.key) {
            Some(value) => {
                self.values.is_empty()
                    || self
                        .values
                        .iter()
                        .any(|allowed| allowed.eq_ignore_ascii_case(value))
            }
            None => false,
        }
    }
}
