use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::map::{Distance, LocationMap};
use crate::path::{
    find_route_a_star, find_route_bfs, find_route_greedy, find_route_uniform_cost, path_distance,
    PathConstraints,
};

/// Number of suggestions attached to unknown-location errors.
const SUGGESTION_LIMIT: usize = 3;

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// Breadth-first search (fewest links).
    Bfs,
    /// Uniform-cost search (shortest travel distance).
    UniformCost,
    /// Greedy best-first search guided by straight-line distance.
    Greedy,
    /// A* search (straight-line-distance heuristic).
    #[default]
    #[serde(rename = "a_star")]
    AStar,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Bfs => "bfs",
            RouteAlgorithm::UniformCost => "uniform_cost",
            RouteAlgorithm::Greedy => "greedy",
            RouteAlgorithm::AStar => "a_star",
        };
        f.write_str(value)
    }
}

impl FromStr for RouteAlgorithm {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().replace('-', "_").as_str() {
            "bfs" => Ok(RouteAlgorithm::Bfs),
            "uniform_cost" | "dijkstra" => Ok(RouteAlgorithm::UniformCost),
            "greedy" => Ok(RouteAlgorithm::Greedy),
            "a_star" | "astar" => Ok(RouteAlgorithm::AStar),
            other => Err(format!("unknown route algorithm: {other}")),
        }
    }
}

/// Constraints applied during route planning.
#[derive(Debug, Default, Clone)]
pub struct RouteConstraints {
    pub max_link: Option<Distance>,
    pub avoid: Vec<String>,
}

/// High-level route planning request.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub start: String,
    pub goal: String,
    pub algorithm: RouteAlgorithm,
    pub constraints: RouteConstraints,
}

impl RouteRequest {
    /// Convenience constructor for unconstrained routes.
    pub fn new(
        start: impl Into<String>,
        goal: impl Into<String>,
        algorithm: RouteAlgorithm,
    ) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            algorithm,
            constraints: RouteConstraints::default(),
        }
    }

    /// Convenience constructor for A* routes without extra constraints.
    pub fn a_star(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self::new(start, goal, RouteAlgorithm::AStar)
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    pub start: String,
    pub goal: String,
    pub steps: Vec<String>,
    /// Sum of the link distances along `steps`.
    pub distance: u64,
}

impl RoutePlan {
    /// Number of links in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Compute a route using the requested algorithm and constraints.
pub fn plan_route(map: &LocationMap, request: &RouteRequest) -> Result<RoutePlan> {
    resolve_location(map, &request.start)?;
    resolve_location(map, &request.goal)?;
    let avoided = resolve_avoided_locations(map, &request.constraints.avoid)?;

    let constraints = PathConstraints {
        max_link: request.constraints.max_link,
        avoided,
    };

    let start = request.start.as_str();
    let goal = request.goal.as_str();
    let steps = match request.algorithm {
        RouteAlgorithm::Bfs => find_route_bfs(map, start, goal, &constraints),
        RouteAlgorithm::UniformCost => find_route_uniform_cost(map, start, goal, &constraints),
        RouteAlgorithm::Greedy => find_route_greedy(map, start, goal, &constraints),
        RouteAlgorithm::AStar => find_route_a_star(map, start, goal, &constraints),
    }
    .ok_or_else(|| Error::RouteNotFound {
        start: request.start.clone(),
        goal: request.goal.clone(),
    })?;

    let distance = path_distance(map, &steps).unwrap_or_default();
    debug!(
        algorithm = %request.algorithm,
        hops = steps.len().saturating_sub(1),
        distance,
        "planned route"
    );

    Ok(RoutePlan {
        algorithm: request.algorithm,
        start: request.start.clone(),
        goal: request.goal.clone(),
        steps,
        distance,
    })
}

/// Ensure a location exists, returning an error with suggestions otherwise.
pub fn resolve_location(map: &LocationMap, name: &str) -> Result<()> {
    if map.is_location(name) {
        return Ok(());
    }
    Err(Error::UnknownLocation {
        name: name.to_string(),
        suggestions: map.fuzzy_location_matches(name, SUGGESTION_LIMIT),
    })
}

fn resolve_avoided_locations(map: &LocationMap, avoided: &[String]) -> Result<HashSet<String>> {
    let mut resolved = HashSet::new();
    for name in avoided {
        resolve_location(map, name)?;
        resolved.insert(name.clone());
    }
    Ok(resolved)
}
