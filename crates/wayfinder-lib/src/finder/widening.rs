use tracing::debug;

use crate::config::FinderConfig;
use crate::entity::{EntityId, MapEntity, Position};
use crate::error::Result;
use crate::finder::{FinderState, PatternMatcher, SearchStep};
use crate::storage::MapDataStorage;

/// Search step that queries growing rings around the anchor position.
///
/// Radii grow geometrically from the minimum radius by `widening_factor` and
/// are clamped to the maximum radius. A fresh pass stops once `min_results`
/// new matches were appended or the maximum radius was searched. A resumed
/// pass (`find_more`) continues from the last searched radius; once the
/// maximum radius has been searched, each resumed pass searches exactly one
/// further ring beyond it.
///
/// Every ring only admits entities farther away than the previously searched
/// radius, so already examined space is never matched twice.
#[derive(Debug, Clone)]
pub struct RadiusWidening {
    widening_factor: f64,
    min_results: usize,
    fuzzy_threshold: f64,
    searched_radius_km: Option<f64>,
    anchor: Option<EntityId>,
}

impl RadiusWidening {
    /// Step configured from `config`, which must pass
    /// [`FinderConfig::validate`].
    pub fn new(config: &FinderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: &FinderConfig) -> Self {
        Self {
            widening_factor: config.widening_factor,
            min_results: config.min_results,
            fuzzy_threshold: config.fuzzy_threshold,
            searched_radius_km: None,
            anchor: None,
        }
    }

    /// Largest radius searched around the current anchor.
    pub fn searched_radius_km(&self) -> Option<f64> {
        self.searched_radius_km
    }

    fn next_radius(&self, min_radius_km: f64, max_radius_km: f64) -> f64 {
        match self.searched_radius_km {
            None => min_radius_km.min(max_radius_km),
            Some(last) if last < max_radius_km => {
                (last * self.widening_factor).min(max_radius_km)
            }
            Some(last) => last * self.widening_factor,
        }
    }
}

impl Default for RadiusWidening {
    fn default() -> Self {
        Self::from_valid_config(&FinderConfig::default())
    }
}

impl<S: MapDataStorage> SearchStep<S> for RadiusWidening {
    fn find(&mut self, storage: &S, state: &mut FinderState, find_more: bool) {
        let Some(query) = state.query().cloned() else {
            return;
        };
        let matcher = PatternMatcher::new(&query, self.fuzzy_threshold);

        if !find_more {
            self.searched_radius_km = None;
            self.anchor = None;

            if matcher.place().is_some() {
                let places: Vec<MapEntity> = storage
                    .entities_within(&query.position, state.max_radius_km())
                    .into_iter()
                    .filter(|(entity, _)| matcher.matches_place(entity))
                    .map(|(entity, _)| entity.clone())
                    .collect();
                debug!(places = places.len(), "resolved address place");
                state.set_intermediate_results(places);
            }
        }

        if matcher.place().is_some() && state.intermediate_results().is_empty() {
            return;
        }

        let (center, anchor): (Position, Option<EntityId>) = match state.intermediate_results() {
            [] => (query.position, None),
            [single] => match single.position() {
                Some(position) => (position, Some(single.id())),
                None => return,
            },
            several => {
                debug!(
                    candidates = several.len(),
                    "intermediate results are ambiguous; waiting for a selection"
                );
                return;
            }
        };

        if anchor != self.anchor {
            self.searched_radius_km = None;
            self.anchor = anchor;
        }

        let min_radius = state.min_radius_km();
        let max_radius = state.max_radius_km();
        let mut radius = self.next_radius(min_radius, max_radius);
        let mut added = 0usize;

        loop {
            let examined = self.searched_radius_km;
            for (entity, distance) in storage.entities_within(&center, radius) {
                if examined.is_some_and(|limit| distance <= limit) {
                    continue;
                }
                if matcher.matches(entity) && state.push_result(entity.clone()) {
                    added += 1;
                }
            }

            debug!(radius_km = radius, added, "searched ring");
            self.searched_radius_km = Some(radius);

            if added >= self.min_results || radius >= max_radius {
                break;
            }
            let next = self.next_radius(min_radius, max_radius);
            if next.is_nan() || next <= radius {
                break;
            }
            radius = next;
        }
    }
}
