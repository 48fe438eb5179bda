//! Map data storages queried by entity finders.
//!
//! A storage answers one question: which entities lie within a radius of a
//! position, and how far away is each of them. Finders layer text matching,
//! mode dispatch and radius widening on top, so every storage yields the same
//! caller-visible finder behaviour and differs only in query cost.
//!
//! Two storages are provided:
//!
//! - [`KdTreeStorage`] indexes every entity position in a 3D KD-tree over
//!   earth-centred coordinates. The Euclidean chord between two points never
//!   exceeds their great-circle distance, so a chord query with the search
//!   radius returns a superset that is then trimmed with the haversine
//!   distance.
//! - [`LinearStorage`] scans all entities on every query.

use std::collections::HashMap;
use std::sync::Arc;

use kiddo::float::kdtree::KdTree;
use kiddo::SquaredEuclidean;
use tracing::info;

use crate::entity::{EntityId, MapEntity, Position};

/// KD-tree bucket size (kiddo default).
const BUCKET_SIZE: usize = 32;

/// Entity within a queried radius, paired with its distance in kilometres.
pub type EntityHit<'a> = (&'a MapEntity, f64);

/// Read access to a spatial collection of map entities.
pub trait MapDataStorage {
    /// Entities with at least one position within `radius_km` of `center`,
    /// sorted by ascending distance.
    fn entities_within(&self, center: &Position, radius_km: f64) -> Vec<EntityHit<'_>>;

    /// Lookup an entity by identifier.
    fn entity(&self, id: EntityId) -> Option<&MapEntity>;

    /// Number of stored entities.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: MapDataStorage + ?Sized> MapDataStorage for &T {
    fn entities_within(&self, center: &Position, radius_km: f64) -> Vec<EntityHit<'_>> {
        (**self).entities_within(center, radius_km)
    }

    fn entity(&self, id: EntityId) -> Option<&MapEntity> {
        (**self).entity(id)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

impl<T: MapDataStorage + ?Sized> MapDataStorage for Arc<T> {
    fn entities_within(&self, center: &Position, radius_km: f64) -> Vec<EntityHit<'_>> {
        (**self).entities_within(center, radius_km)
    }

    fn entity(&self, id: EntityId) -> Option<&MapEntity> {
        (**self).entity(id)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// Storage backed by a KD-tree over every distinct node position.
///
/// Each distinct point is inserted once; entities sharing a point are listed
/// together in `point_entities`, so stacked nodes never overflow a leaf.
pub struct KdTreeStorage {
    /// KD-tree for spatial queries. Items index into `point_entities`.
    tree: KdTree<f64, usize, 3, BUCKET_SIZE, u32>,
    point_entities: Vec<Vec<usize>>,
    entities: Vec<MapEntity>,
    id_to_index: HashMap<EntityId, usize>,
}

impl KdTreeStorage {
    /// Build the index. Later entities replace earlier ones with the same id.
    pub fn build(entities: Vec<MapEntity>) -> Self {
        let entities = dedup_by_id(entities);
        let mut tree: KdTree<f64, usize, 3, BUCKET_SIZE, u32> = KdTree::new();
        let mut point_slots: HashMap<[u64; 3], usize> = HashMap::new();
        let mut point_entities: Vec<Vec<usize>> = Vec::new();
        let mut id_to_index = HashMap::new();

        for (index, entity) in entities.iter().enumerate() {
            id_to_index.insert(entity.id(), index);
            for position in entity.positions() {
                let point = position.to_cartesian();
                // adding 0.0 folds -0.0 into 0.0
                let key = point.map(|coord| (coord + 0.0).to_bits());
                let slot = *point_slots.entry(key).or_insert_with(|| {
                    tree.add(&point, point_entities.len());
                    point_entities.push(Vec::new());
                    point_entities.len() - 1
                });
                // a way may revisit the same node position
                if point_entities[slot].last() != Some(&index) {
                    point_entities[slot].push(index);
                }
            }
        }

        info!(
            entity_count = entities.len(),
            point_count = point_entities.len(),
            "built entity KD-tree"
        );

        Self {
            tree,
            point_entities,
            entities,
            id_to_index,
        }
    }

    /// Stored entities in insertion order.
    pub fn entities(&self) -> &[MapEntity] {
        &self.entities
    }
}

impl MapDataStorage for KdTreeStorage {
    fn entities_within(&self, center: &Position, radius_km: f64) -> Vec<EntityHit<'_>> {
        if radius_km <= 0.0 || self.entities.is_empty() {
            return Vec::new();
        }

        let query_point = center.to_cartesian();
        let candidates = self
            .tree
            .within::<SquaredEuclidean>(&query_point, radius_km * radius_km);

        let mut nearest: HashMap<usize, f64> = HashMap::new();
        for neighbour in candidates {
            for &index in &self.point_entities[neighbour.item] {
                if nearest.contains_key(&index) {
                    continue;
                }
                if let Some(distance) = self.entities[index].distance_km(center) {
                    nearest.insert(index, distance);
                }
            }
        }

        let mut hits: Vec<EntityHit<'_>> = nearest
            .into_iter()
            .filter(|(_, distance)| *distance <= radius_km)
            .map(|(index, distance)| (&self.entities[index], distance))
            .collect();
        sort_hits(&mut hits);
        hits
    }

    fn entity(&self, id: EntityId) -> Option<&MapEntity> {
        self.id_to_index.get(&id).map(|&index| &self.entities[index])
    }

    fn len(&self) -> usize {
        self.entities.len()
    }
}

impl std::fmt::Debug for KdTreeStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KdTreeStorage")
            .field("entity_count", &self.entities.len())
            .finish()
    }
}

/// Storage that scans every entity per query.
#[derive(Debug, Clone, Default)]
pub struct LinearStorage {
    entities: Vec<MapEntity>,
}

impl LinearStorage {
    pub fn new(entities: Vec<MapEntity>) -> Self {
        Self {
            entities: dedup_by_id(entities),
        }
    }
}

impl MapDataStorage for LinearStorage {
    fn entities_within(&self, center: &Position, radius_km: f64) -> Vec<EntityHit<'_>> {
        if radius_km <= 0.0 {
            return Vec::new();
        }
        let mut hits: Vec<EntityHit<'_>> = self
            .entities
            .iter()
            .filter_map(|entity| {
                entity
                    .distance_km(center)
                    .filter(|distance| *distance <= radius_km)
                    .map(|distance| (entity, distance))
            })
            .collect();
        sort_hits(&mut hits);
        hits
    }

    fn entity(&self, id: EntityId) -> Option<&MapEntity> {
        self.entities.iter().find(|entity| entity.id() == id)
    }

    fn len(&self) -> usize {
        self.entities.len()
    }
}

fn dedup_by_id(entities: Vec<MapEntity>) -> Vec<MapEntity> {
    let mut positions: HashMap<EntityId, usize> = HashMap::new();
    let mut unique: Vec<MapEntity> = Vec::with_capacity(entities.len());
    for entity in entities {
        match positions.get(&entity.id()) {
            Some(&index) => unique[index] = entity,
            None => {
                positions.insert(entity.id(), unique.len());
                unique.push(entity);
            }
        }
    }
    unique
}

fn sort_hits(hits: &mut [EntityHit<'_>]) {
    hits.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.id().cmp(&b.0.id())));
}
