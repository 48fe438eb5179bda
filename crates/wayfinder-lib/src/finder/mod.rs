//! Incremental entity search around a reference position.
//!
//! The query surface lives in the [`EntityFinder`] trait. [`Finder`] implements
//! it once for every storage: it owns the query state ([`FinderState`]), handles
//! mode selection and result bookkeeping, and delegates the actual matching
//! pass to a [`SearchStep`] strategy. [`RadiusWidening`] is the default step.
//!
//! A finder is a single-writer object: every query method takes `&mut self`
//! and there is no internal locking. Several finders may share one storage
//! through `&S` or `Arc<S>`.
//!
//! ```
//! use wayfinder_lib::{EntityFinder, Finder, KdTreeStorage, Position};
//!
//! # fn main() -> wayfinder_lib::Result<()> {
//! let storage = KdTreeStorage::build(Vec::new());
//! let mut finder = Finder::new(&storage);
//! finder.find_node("bakery", Position::new(48.14, 11.58))?;
//! if finder.results().is_empty() {
//!     finder.find_more()?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod pattern;
pub mod widening;

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::{validate_radius, FinderConfig};
use crate::entity::{EntityId, MapEntity, Position, WayFilter};
use crate::error::{Error, Result};
use crate::storage::MapDataStorage;

pub use pattern::{AddressPattern, PatternMatcher};
pub use widening::RadiusWidening;

/// Kind of entity a query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Entity,
    Node,
    Way,
    Address,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SearchMode::Entity => "entity",
            SearchMode::Node => "node",
            SearchMode::Way => "way",
            SearchMode::Address => "address",
        };
        f.write_str(value)
    }
}

/// Parameters of the active query, retained across `find_more` calls.
#[derive(Clone)]
pub struct Query {
    pub mode: SearchMode,
    pub pattern: String,
    pub position: Position,
    pub way_filter: Option<Arc<dyn WayFilter>>,
}

impl fmt::Debug for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("mode", &self.mode)
            .field("pattern", &self.pattern)
            .field("position", &self.position)
            .field("way_filter", &self.way_filter.is_some())
            .finish()
    }
}

/// Mutable query state owned by a finder.
#[derive(Debug)]
pub struct FinderState {
    query: Option<Query>,
    min_radius_km: f64,
    max_radius_km: f64,
    intermediate_results: Vec<MapEntity>,
    results: Vec<MapEntity>,
    result_ids: HashSet<EntityId>,
}

impl FinderState {
    pub fn new(min_radius_km: f64, max_radius_km: f64) -> Self {
        Self {
            query: None,
            min_radius_km,
            max_radius_km,
            intermediate_results: Vec::new(),
            results: Vec::new(),
            result_ids: HashSet::new(),
        }
    }

    /// Active query, if any `find_*` call has been made.
    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    pub fn reference_position(&self) -> Option<Position> {
        self.query.as_ref().map(|query| query.position)
    }

    pub fn min_radius_km(&self) -> f64 {
        self.min_radius_km
    }

    pub fn max_radius_km(&self) -> f64 {
        self.max_radius_km
    }

    pub fn results(&self) -> &[MapEntity] {
        &self.results
    }

    pub fn intermediate_results(&self) -> &[MapEntity] {
        &self.intermediate_results
    }

    /// Append a match unless an entity with the same id is already listed.
    pub fn push_result(&mut self, entity: MapEntity) -> bool {
        if self.result_ids.insert(entity.id()) {
            self.results.push(entity);
            true
        } else {
            false
        }
    }

    /// Replace the working set wholesale.
    pub fn set_intermediate_results(&mut self, entities: Vec<MapEntity>) {
        self.intermediate_results = entities;
    }

    /// Narrow the working set to a single entity.
    pub fn select_intermediate_result(&mut self, entity: MapEntity) {
        self.intermediate_results.clear();
        self.intermediate_results.push(entity);
    }

    fn begin(&mut self, query: Query) {
        self.query = Some(query);
        self.intermediate_results.clear();
        self.results.clear();
        self.result_ids.clear();
    }
}

/// One matching pass against a storage.
///
/// With `find_more == false` the pass starts a fresh widening from the minimum
/// radius; with `find_more == true` it resumes where the previous pass
/// stopped and may search beyond the maximum radius. Matches are appended to
/// the state's results; nothing is returned.
pub trait SearchStep<S: MapDataStorage> {
    fn find(&mut self, storage: &S, state: &mut FinderState, find_more: bool);
}

/// Query surface shared by all entity finders.
pub trait EntityFinder {
    /// Fresh query for nodes and ways matching `pattern`.
    fn find_entity(&mut self, pattern: &str, position: Position) -> Result<()>;

    /// Fresh query for nodes matching `pattern`.
    fn find_node(&mut self, pattern: &str, position: Position) -> Result<()>;

    /// Fresh query for ways matching `pattern` and accepted by `filter`.
    fn find_way(
        &mut self,
        pattern: &str,
        position: Position,
        filter: Option<Arc<dyn WayFilter>>,
    ) -> Result<()>;

    /// Fresh query for address-bearing entities, `street [number][, place]`.
    fn find_address(&mut self, pattern: &str, position: Position) -> Result<()>;

    /// Continue the current query, appending to the existing results.
    fn find_more(&mut self) -> Result<()>;

    fn results(&self) -> &[MapEntity];

    fn intermediate_results(&self) -> &[MapEntity];

    /// Narrow the working set to `entity`; a following `find_more` searches
    /// around it.
    fn select_intermediate_result(&mut self, entity: MapEntity);

    fn min_radius(&self) -> f64;

    fn set_min_radius(&mut self, km: f64);

    fn max_radius(&self) -> f64;

    fn set_max_radius(&mut self, km: f64);
}

/// Entity finder over storage `S`, delegating matching passes to `P`.
pub struct Finder<S, P = RadiusWidening> {
    storage: S,
    step: P,
    state: FinderState,
}

impl<S: MapDataStorage> Finder<S, RadiusWidening> {
    /// Finder with the default configuration and radius-widening step.
    pub fn new(storage: S) -> Self {
        let config = FinderConfig::default();
        Self::with_step(
            storage,
            RadiusWidening::default(),
            config.min_radius_km,
            config.max_radius_km,
        )
    }

    /// Finder configured from `config`; an invalid configuration is rejected
    /// with [`Error::InvalidConfig`] or [`Error::InvalidRadius`].
    pub fn with_config(storage: S, config: &FinderConfig) -> Result<Self> {
        Ok(Self::with_step(
            storage,
            RadiusWidening::new(config)?,
            config.min_radius_km,
            config.max_radius_km,
        ))
    }
}

impl<S, P> Finder<S, P> {
    pub fn with_step(storage: S, step: P, min_radius_km: f64, max_radius_km: f64) -> Self {
        Self {
            storage,
            step,
            state: FinderState::new(min_radius_km, max_radius_km),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn step(&self) -> &P {
        &self.step
    }

    pub fn state(&self) -> &FinderState {
        &self.state
    }

    /// Position of the active query.
    pub fn reference_position(&self) -> Option<Position> {
        self.state.reference_position()
    }
}

impl<S, P> Finder<S, P>
where
    S: MapDataStorage,
    P: SearchStep<S>,
{
    fn start(
        &mut self,
        mode: SearchMode,
        pattern: &str,
        position: Position,
        way_filter: Option<Arc<dyn WayFilter>>,
    ) -> Result<()> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(Error::EmptyPattern);
        }
        if mode == SearchMode::Address && AddressPattern::parse(pattern).street.is_empty() {
            return Err(Error::EmptyPattern);
        }
        validate_radius(self.state.min_radius_km, self.state.max_radius_km)?;

        self.state.begin(Query {
            mode,
            pattern: pattern.to_string(),
            position,
            way_filter,
        });
        self.step.find(&self.storage, &mut self.state, false);

        info!(
            %mode,
            pattern,
            %position,
            results = self.state.results.len(),
            intermediate = self.state.intermediate_results.len(),
            "entity query finished"
        );
        Ok(())
    }
}

impl<S, P> EntityFinder for Finder<S, P>
where
    S: MapDataStorage,
    P: SearchStep<S>,
{
    fn find_entity(&mut self, pattern: &str, position: Position) -> Result<()> {
        self.start(SearchMode::Entity, pattern, position, None)
    }

    fn find_node(&mut self, pattern: &str, position: Position) -> Result<()> {
        self.start(SearchMode::Node, pattern, position, None)
    }

    fn find_way(
        &mut self,
        pattern: &str,
        position: Position,
        filter: Option<Arc<dyn WayFilter>>,
    ) -> Result<()> {
        self.start(SearchMode::Way, pattern, position, filter)
    }

    fn find_address(&mut self, pattern: &str, position: Position) -> Result<()> {
        self.start(SearchMode::Address, pattern, position, None)
    }

    fn find_more(&mut self) -> Result<()> {
        if self.state.query.is_none() {
            return Err(Error::NoActiveQuery);
        }
        validate_radius(self.state.min_radius_km, self.state.max_radius_km)?;

        let before = self.state.results.len();
        self.step.find(&self.storage, &mut self.state, true);
        debug!(
            added = self.state.results.len() - before,
            total = self.state.results.len(),
            "find more finished"
        );
        Ok(())
    }

    fn results(&self) -> &[MapEntity] {
        self.state.results()
    }

    fn intermediate_results(&self) -> &[MapEntity] {
        self.state.intermediate_results()
    }

    fn select_intermediate_result(&mut self, entity: MapEntity) {
        self.state.select_intermediate_result(entity);
    }

    fn min_radius(&self) -> f64 {
        self.state.min_radius_km
    }

    fn set_min_radius(&mut self, km: f64) {
        self.state.min_radius_km = km;
    }

    fn max_radius(&self) -> f64 {
        self.state.max_radius_km
    }

    fn set_max_radius(&mut self, km: f64) {
        self.state.max_radius_km = km;
    }
}

impl<S, P: fmt::Debug> fmt::Debug for Finder<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Finder")
            .field("step", &self.step)
            .field("state", &self.state)
            .finish()
    }
}
