//! Shared builders for map entity fixtures.

use std::collections::BTreeMap;

use wayfinder_lib::entity::{TAG_HOUSENUMBER, TAG_PLACE, TAG_STREET};
use wayfinder_lib::{EntityId, MapEntity, MapNode, MapWay, Position};

/// Kilometres per degree of latitude on the mean-radius sphere.
pub const KM_PER_DEGREE: f64 = 6371.0 * std::f64::consts::PI / 180.0;

pub fn origin() -> Position {
    Position::new(48.0, 11.0)
}

/// Position `km` kilometres due north (negative: south) of `from`.
pub fn north_of(from: Position, km: f64) -> Position {
    Position::new(from.lat + km / KM_PER_DEGREE, from.lon)
}

fn tag_map(tags: &[(&str, &str)]) -> BTreeMap<String, String> {
    tags.iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

pub fn node(id: EntityId, name: &str, position: Position, tags: &[(&str, &str)]) -> MapEntity {
    MapEntity::Node(MapNode {
        id,
        name: Some(name.to_string()),
        position,
        tags: tag_map(tags),
    })
}

#[allow(dead_code)]
pub fn way(id: EntityId, name: &str, points: &[Position], tags: &[(&str, &str)]) -> MapEntity {
    MapEntity::Way(MapWay {
        id,
        name: Some(name.to_string()),
        nodes: points
            .iter()
            .enumerate()
            .map(|(index, position)| MapNode {
                id: id * 1000 + index as EntityId,
                name: None,
                position: *position,
                tags: BTreeMap::new(),
            })
            .collect(),
        tags: tag_map(tags),
    })
}

#[allow(dead_code)]
pub fn place(id: EntityId, name: &str, position: Position) -> MapEntity {
    node(id, name, position, &[(TAG_PLACE, "town")])
}

#[allow(dead_code)]
pub fn address(id: EntityId, street: &str, number: &str, position: Position) -> MapEntity {
    MapEntity::Node(MapNode {
        id,
        name: None,
        position,
        tags: tag_map(&[(TAG_STREET, street), (TAG_HOUSENUMBER, number)]),
    })
}

/// Ids of `entities` in order.
#[allow(dead_code)]
pub fn ids(entities: &[MapEntity]) -> Vec<EntityId> {
    entities.iter().map(MapEntity::id).collect()
}
