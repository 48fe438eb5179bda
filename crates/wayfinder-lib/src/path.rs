use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

use crate::map::{Distance, LocationMap};

/// Constraints applied during pathfinding.
#[derive(Debug, Default, Clone)]
pub struct PathConstraints {
    /// Maximum travel distance allowed for any single link.
    pub max_link: Option<Distance>,
    /// Locations that must not appear in the resulting path.
    pub avoided: HashSet<String>,
}

impl PathConstraints {
    fn allows(&self, target: &str, distance: Distance) -> bool {
        if let Some(limit) = self.max_link {
            if distance > limit {
                return false;
            }
        }

        !self.avoided.contains(target)
    }
}

/// Find a route between `start` and `goal` using breadth-first search without
/// additional constraints.
pub fn find_route(map: &LocationMap, start: &str, goal: &str) -> Option<Vec<String>> {
    find_route_bfs(map, start, goal, &PathConstraints::default())
}

/// Run breadth-first search (fewest links) with optional constraints.
pub fn find_route_bfs(
    map: &LocationMap,
    start: &str,
    goal: &str,
    constraints: &PathConstraints,
) -> Option<Vec<String>> {
    if start == goal {
        return Some(vec![start.to_string()]);
    }

    let mut parents: HashMap<String, Option<String>> = HashMap::new();
    let mut queue = VecDeque::new();

    parents.insert(start.to_string(), None);
    queue.push_back(start.to_string());

    while let Some(current) = queue.pop_front() {
        for (next, distance) in map.links_from(&current) {
            if parents.contains_key(next) {
                continue;
            }
            if !constraints.allows(next, *distance) {
                continue;
            }

            parents.insert(next.clone(), Some(current.clone()));
            if next == goal {
                return Some(reconstruct_path(&parents, start, goal));
            }
            queue.push_back(next.clone());
        }
    }

    None
}

/// Run uniform-cost search (Dijkstra) for the shortest travel distance.
pub fn find_route_uniform_cost(
    map: &LocationMap,
    start: &str,
    goal: &str,
    constraints: &PathConstraints,
) -> Option<Vec<String>> {
    best_first(map, start, goal, constraints, |_, cost| cost)
}

/// Run greedy best-first search ordered purely by straight-line distance to
/// the goal. Fast, but the returned route is not guaranteed to be shortest.
pub fn find_route_greedy(
    map: &LocationMap,
    start: &str,
    goal: &str,
    constraints: &PathConstraints,
) -> Option<Vec<String>> {
    best_first(map, start, goal, constraints, |node, _| {
        heuristic_distance(map, node, goal)
    })
}

/// Run A* search with the straight-line distance heuristic. Locations without
/// coordinates fall back to a zero estimate, which keeps the heuristic
/// admissible.
pub fn find_route_a_star(
    map: &LocationMap,
    start: &str,
    goal: &str,
    constraints: &PathConstraints,
) -> Option<Vec<String>> {
    best_first(map, start, goal, constraints, |node, cost| {
        cost + heuristic_distance(map, node, goal)
    })
}

/// Total travel distance along consecutive links of `path`.
pub fn path_distance(map: &LocationMap, path: &[String]) -> Option<u64> {
    path.windows(2).try_fold(0u64, |total, pair| {
        map.distance(&pair[0], &pair[1])
            .map(|distance| total + u64::from(distance))
    })
}

fn best_first<F>(
    map: &LocationMap,
    start: &str,
    goal: &str,
    constraints: &PathConstraints,
    priority: F,
) -> Option<Vec<String>>
where
    F: Fn(&str, f64) -> f64,
{
    if start == goal {
        return Some(vec![start.to_string()]);
    }

    let mut g_score: HashMap<String, f64> = HashMap::new();
    let mut parents: HashMap<String, Option<String>> = HashMap::new();
    let mut closed: HashSet<String> = HashSet::new();
    let mut queue = BinaryHeap::new();
    let mut sequence = 0u64;

    g_score.insert(start.to_string(), 0.0);
    parents.insert(start.to_string(), None);
    queue.push(QueueEntry::new(start, 0.0, priority(start, 0.0), sequence));

    while let Some(entry) = queue.pop() {
        if !closed.insert(entry.node.clone()) {
            continue;
        }

        if entry.node == goal {
            return Some(reconstruct_path(&parents, start, goal));
        }

        for (next, distance) in map.links_from(&entry.node) {
            if closed.contains(next) || !constraints.allows(next, *distance) {
                continue;
            }

            let tentative_g = entry.cost.0 + f64::from(*distance);
            if tentative_g < *g_score.get(next).unwrap_or(&f64::INFINITY) {
                g_score.insert(next.clone(), tentative_g);
                parents.insert(next.clone(), Some(entry.node.clone()));
                sequence += 1;
                queue.push(QueueEntry::new(
                    next,
                    tentative_g,
                    priority(next.as_str(), tentative_g),
                    sequence,
                ));
            }
        }
    }

    None
}

fn heuristic_distance(map: &LocationMap, from: &str, to: &str) -> f64 {
    map.straight_line_distance(from, to).unwrap_or(0.0)
}

fn reconstruct_path(
    parents: &HashMap<String, Option<String>>,
    start: &str,
    goal: &str,
) -> Vec<String> {
    let mut path = Vec::new();
    let mut current = Some(goal.to_string());
    while let Some(node) = current {
        let reached_start = node == start;
        current = parents.get(&node).cloned().flatten();
        path.push(node);
        if reached_start {
            break;
        }
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: String,
    cost: FloatOrd,
    priority: FloatOrd,
    sequence: u64,
}

impl QueueEntry {
    fn new(node: &str, cost: f64, priority: f64, sequence: u64) -> Self {
        Self {
            node: node.to_string(),
            cost: FloatOrd(cost),
            priority: FloatOrd(priority),
            sequence,
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by priority;
        // ties go to the entry queued first.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> LocationMap {
        let mut map = LocationMap::new();
        map.add_bidirectional_link("S", "A", 1);
        map.add_bidirectional_link("A", "G", 10);
        map.add_bidirectional_link("S", "B", 4);
        map.add_bidirectional_link("B", "G", 4);
        map
    }

    #[test]
    fn bfs_prefers_fewest_links() {
        let map = diamond();
        let path = find_route(&map, "S", "G").expect("route exists");
        assert_eq!(path, vec!["S", "A", "G"]);
    }

    #[test]
    fn uniform_cost_prefers_shortest_distance() {
        let map = diamond();
        let path = find_route_uniform_cost(&map, "S", "G", &PathConstraints::default())
            .expect("route exists");
        assert_eq!(path, vec!["S", "B", "G"]);
        assert_eq!(path_distance(&map, &path), Some(8));
    }

    #[test]
    fn start_equals_goal() {
        let map = diamond();
        assert_eq!(find_route(&map, "S", "S"), Some(vec!["S".to_string()]));
    }

    #[test]
    fn one_way_links_are_respected() {
        let mut map = LocationMap::new();
        map.add_unidirectional_link("A", "B", 3);
        assert!(find_route(&map, "B", "A").is_none());
    }

    #[test]
    fn max_link_blocks_long_hops() {
        let map = diamond();
        let constraints = PathConstraints {
            max_link: Some(5),
            ..PathConstraints::default()
        };
        let path = find_route_bfs(&map, "S", "G", &constraints).expect("route exists");
        assert_eq!(path, vec!["S", "B", "G"]);
    }
}
