//! Wayfinder library entry points.
//!
//! This crate models a navigable map as a directed, distance-labelled graph
//! of named locations with optional 2D placements for straight-line-distance
//! heuristics, runs informed route searches over it, and provides an
//! incremental, radius-widening entity finder over spatial map data.
//! Higher-level consumers (the CLI) should only depend on the items exported
//! here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod config;
pub mod entity;
pub mod error;
pub mod finder;
pub mod graph;
pub mod loader;
pub mod map;
pub mod path;
pub mod romania;
pub mod routing;
pub mod storage;

pub use config::{default_config_path, FinderConfig};
pub use entity::{
    EntityId, EntityKind, MapEntity, MapNode, MapWay, Position, TagFilter, WayFilter,
};
pub use error::{Error, Result};
pub use finder::{
    EntityFinder, Finder, FinderState, Query, RadiusWidening, SearchMode, SearchStep,
};
pub use graph::LabeledGraph;
pub use loader::{load_entities, load_location_map, parse_location_map};
pub use map::{Coords, Distance, LocationMap};
pub use path::{
    find_route, find_route_a_star, find_route_bfs, find_route_greedy, find_route_uniform_cost,
    path_distance, PathConstraints,
};
pub use romania::partial_romania_map;
pub use routing::{plan_route, RouteAlgorithm, RouteConstraints, RoutePlan, RouteRequest};
pub use storage::{KdTreeStorage, LinearStorage, MapDataStorage};
