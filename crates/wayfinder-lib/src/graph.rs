use std::collections::HashMap;
use std::hash::Hash;

/// Directed graph keyed by vertex label with an arbitrary label on each edge.
///
/// Vertices are registered implicitly when an edge touching them is set and
/// keep their insertion order. Successor lists also keep insertion order;
/// overwriting an existing edge updates its label in place.
#[derive(Debug, Clone)]
pub struct LabeledGraph<V, L> {
    vertices: Vec<V>,
    adjacency: HashMap<V, Vec<(V, L)>>,
}

impl<V, L> LabeledGraph<V, L>
where
    V: Clone + Eq + Hash,
{
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            adjacency: HashMap::new(),
        }
    }

    /// Insert or overwrite the edge `from -> to`.
    pub fn set(&mut self, from: V, to: V, label: L) {
        self.register(from.clone());
        self.register(to.clone());

        let edges = self.adjacency.entry(from).or_default();
        if let Some(existing) = edges.iter_mut().find(|(target, _)| *target == to) {
            existing.1 = label;
        } else {
            edges.push((to, label));
        }
    }

    /// Label of the edge `from -> to`, if present.
    pub fn get(&self, from: &V, to: &V) -> Option<&L> {
        self.adjacency
            .get(from)?
            .iter()
            .find(|(target, _)| target == to)
            .map(|(_, label)| label)
    }

    /// Remove the edge `from -> to`. Missing edges are ignored; vertices stay.
    pub fn remove(&mut self, from: &V, to: &V) {
        if let Some(edges) = self.adjacency.get_mut(from) {
            edges.retain(|(target, _)| target != to);
        }
    }

    /// Targets of all outgoing edges of `from`, in insertion order.
    pub fn successors(&self, from: &V) -> Vec<V> {
        self.edges(from)
            .iter()
            .map(|(target, _)| target.clone())
            .collect()
    }

    /// Outgoing edges of `from` with their labels.
    pub fn edges(&self, from: &V) -> &[(V, L)] {
        self.adjacency
            .get(from)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All known vertices in insertion order.
    pub fn vertex_labels(&self) -> &[V] {
        &self.vertices
    }

    pub fn is_vertex_label(&self, vertex: &V) -> bool {
        self.adjacency.contains_key(vertex)
    }

    /// Remove all vertices and edges.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.adjacency.clear();
    }

    fn register(&mut self, vertex: V) {
        if !self.adjacency.contains_key(&vertex) {
            self.vertices.push(vertex.clone());
            self.adjacency.insert(vertex, Vec::new());
        }
    }
}

impl<V, L> Default for LabeledGraph<V, L>
where
    V: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_registers_both_vertices() {
        let mut graph: LabeledGraph<&str, u32> = LabeledGraph::new();
        graph.set("a", "b", 3);

        assert_eq!(graph.vertex_labels(), &["a", "b"]);
        assert!(graph.is_vertex_label(&"a"));
        assert!(graph.is_vertex_label(&"b"));
        assert!(!graph.is_vertex_label(&"c"));
    }

    #[test]
    fn overwrite_keeps_successor_position() {
        let mut graph: LabeledGraph<&str, u32> = LabeledGraph::new();
        graph.set("a", "b", 1);
        graph.set("a", "c", 2);
        graph.set("a", "b", 7);

        assert_eq!(graph.successors(&"a"), vec!["b", "c"]);
        assert_eq!(graph.get(&"a", &"b"), Some(&7));
    }

    #[test]
    fn remove_missing_edge_is_noop() {
        let mut graph: LabeledGraph<&str, u32> = LabeledGraph::new();
        graph.remove(&"x", &"y");
        graph.set("a", "b", 1);
        graph.remove(&"b", &"a");

        assert_eq!(graph.get(&"a", &"b"), Some(&1));
        graph.remove(&"a", &"b");
        assert_eq!(graph.get(&"a", &"b"), None);
        assert!(graph.is_vertex_label(&"b"), "vertices survive edge removal");
    }

    #[test]
    fn unknown_vertex_has_no_successors() {
        let graph: LabeledGraph<String, u32> = LabeledGraph::default();
        assert!(graph.successors(&"nowhere".to_string()).is_empty());
    }

    #[test]
    fn clear_drops_everything() {
        let mut graph: LabeledGraph<&str, u32> = LabeledGraph::new();
        graph.set("a", "b", 1);
        graph.clear();

        assert!(graph.vertex_labels().is_empty());
        assert_eq!(graph.get(&"a", &"b"), None);
    }
}
