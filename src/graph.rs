//! Directed weighted graph with named nodes.
//!
//! [`Graph`] owns the head of a [`NodeList`] and exposes its operations
//! through `&mut self` methods, so callers never have to thread the returned
//! head through by hand.
use std::fmt::{self, Debug};
use std::iter::FusedIterator;

use thiserror::Error;
use tracing::{debug, trace};

use crate::matrix::AdjacencyMatrix;
use crate::nodes::{self, NodeList};

/// A directed graph whose nodes are kept sorted by name and whose outgoing
/// edges are kept sorted by destination.
///
/// `K` is the node name, `I` optional per-node info and `W` the edge weight.
/// There is at most one edge for every ordered pair of nodes.
///
/// # Example
///
/// ```
/// # use linkgraph::Graph;
/// let mut graph = Graph::<&str>::new();
///
/// graph.add_node("b", None);
/// graph.add_node("a", None);
/// graph.add_node("c", None);
/// assert_eq!(graph.list_nodes(), ["a", "b", "c"]);
///
/// graph.add_edge(&"a", "b", 5.0);
/// assert!(graph.find_edge(&"a", &"b"));
/// assert_eq!(graph.edge_cardinality(), 1);
///
/// graph.delete_edge(&"a", &"b");
/// assert!(!graph.find_edge(&"a", &"b"));
/// assert_eq!(graph.edge_cardinality(), 0);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Graph<K, I = (), W = f64> {
    nodes: NodeList<K, I, W>,
}

impl<K: Debug, I: Debug, W: Debug> Debug for Graph<K, I, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.nodes
                    .iter()
                    .map(|node| (node.name(), (node.info(), node.edges()))),
            )
            .finish()
    }
}

impl<K, I, W> Default for Graph<K, I, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, I, W> From<NodeList<K, I, W>> for Graph<K, I, W> {
    fn from(nodes: NodeList<K, I, W>) -> Self {
        Self { nodes }
    }
}

impl<K, I, W> Graph<K, I, W> {
    /// Create a new empty graph.
    pub const fn new() -> Self {
        Self {
            nodes: NodeList::new(),
        }
    }

    /// Whether the graph has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes in the graph.
    pub fn node_cardinality(&self) -> usize {
        self.nodes.node_cardinality()
    }

    /// Number of edges in the graph.
    pub fn edge_cardinality(&self) -> usize {
        self.nodes.edge_cardinality()
    }

    /// The underlying node list.
    #[inline]
    pub fn as_list(&self) -> &NodeList<K, I, W> {
        &self.nodes
    }

    /// Consumes the graph, returning its node list.
    pub fn into_list(self) -> NodeList<K, I, W> {
        self.nodes
    }

    /// Iterator over the node cells in ascending name order.
    pub fn nodes(&self) -> nodes::Iter<'_, K, I, W> {
        self.nodes.iter()
    }

    /// Iterator over all edges as `(source, destination, weight)`, ordered by
    /// source and then by destination.
    pub fn edges(&self) -> impl FusedIterator<Item = (&K, &K, &W)> + '_ {
        self.nodes.iter().flat_map(|node| {
            node.edges()
                .iter()
                .map(move |(destination, weight)| (node.name(), destination, weight))
        })
    }

    /// Remove all nodes and edges.
    pub fn clear(&mut self) {
        self.nodes = NodeList::new();
        debug!("graph cleared");
    }
}

impl<K: Ord, I, W> Graph<K, I, W> {
    /// Add a node, or overwrite the info of the node called `name`.
    pub fn add_node(&mut self, name: K, info: Option<I>) {
        let previous = self.nodes.insert_node(name, info);
        debug!(updated = previous.is_some(), "node added");
    }

    /// Remove a node and its outgoing edges.
    ///
    /// Edges from other nodes to `name` stay in the graph; see
    /// [`Graph::delete_edges`] and [`Graph::remove_node_and_edges`].
    ///
    /// # Example
    ///
    /// ```
    /// # use linkgraph::Graph;
    /// let mut graph = Graph::<&str>::new();
    /// graph.add_node("a", None);
    /// graph.add_node("b", None);
    /// graph.add_edge(&"a", "b", 1.0);
    ///
    /// graph.delete_node(&"b");
    /// assert!(!graph.find_node(&"b"));
    /// assert!(graph.find_edge(&"a", &"b"));
    /// ```
    pub fn delete_node(&mut self, name: &K) {
        if self.nodes.remove_node(name).is_some() {
            debug!("node removed");
        } else {
            trace!("node to remove does not exist");
        }
    }

    /// Remove a node, its outgoing edges, and every edge pointing to it.
    pub fn remove_node_and_edges(&mut self, name: &K) {
        self.delete_node(name);
        self.delete_edges(name);
    }

    /// Whether the graph has a node called `name`.
    pub fn find_node(&self, name: &K) -> bool {
        self.nodes.find_node(name)
    }

    /// The info stored with the node called `name`.
    pub fn node_info(&self, name: &K) -> Option<&I> {
        self.nodes.node(name)?.info()
    }

    /// Number of outgoing edges of the node called `name`.
    pub fn out_degree(&self, name: &K) -> Option<usize> {
        Some(self.nodes.node(name)?.edges().cardinality())
    }

    /// Names of all nodes in ascending order.
    pub fn list_nodes(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.nodes.list_nodes()
    }

    /// Add an edge, or overwrite the weight of an existing edge.
    ///
    /// Does nothing when `destination` is not a node. A missing `source`
    /// also leaves the graph unchanged. Use [`Graph::try_add_edge`] to learn
    /// which of the two happened.
    pub fn add_edge(&mut self, source: &K, destination: K, weight: W) {
        if let Err(error) = self.try_add_edge(source, destination, weight) {
            trace!(%error, "edge ignored");
        }
    }

    /// Add an edge with weight one.
    ///
    /// # Example
    ///
    /// ```
    /// # use linkgraph::Graph;
    /// let mut graph = Graph::<char, (), u32>::new();
    /// graph.add_node('x', None);
    /// graph.add_unit_edge(&'x', 'x');
    ///
    /// assert_eq!(graph.edge_weight(&'x', &'x'), Some(&1));
    /// assert_eq!(graph.self_loops(), 1);
    /// ```
    pub fn add_unit_edge(&mut self, source: &K, destination: K)
    where
        W: From<u8>,
    {
        self.add_edge(source, destination, W::from(1));
    }

    /// Add an edge, reporting why it could not be added.
    ///
    /// Returns the weight that was replaced when the edge already existed.
    ///
    /// # Errors
    ///
    ///  - [`GraphError::UnknownDestination`] when `destination` is not a node.
    ///  - [`GraphError::UnknownNode`] when `source` is not a node.
    ///
    /// # Example
    ///
    /// ```
    /// # use linkgraph::{Graph, GraphError};
    /// let mut graph = Graph::<&str, (), i32>::new();
    /// graph.add_node("a", None);
    ///
    /// assert_eq!(graph.try_add_edge(&"a", "a", 1), Ok(None));
    /// assert_eq!(graph.try_add_edge(&"a", "a", 2), Ok(Some(1)));
    /// assert_eq!(graph.try_add_edge(&"a", "b", 1), Err(GraphError::UnknownDestination));
    /// assert_eq!(graph.try_add_edge(&"b", "a", 1), Err(GraphError::UnknownNode));
    /// ```
    pub fn try_add_edge(
        &mut self,
        source: &K,
        destination: K,
        weight: W,
    ) -> Result<Option<W>, GraphError> {
        if !self.nodes.find_node(&destination) {
            return Err(GraphError::UnknownDestination);
        }

        let node = self.nodes.node_mut(source).ok_or(GraphError::UnknownNode)?;
        let previous = node.edges_mut().insert(destination, weight);

        debug!(updated = previous.is_some(), "edge added");
        Ok(previous)
    }

    /// Remove the edge from `source` to `destination` if it exists.
    pub fn delete_edge(&mut self, source: &K, destination: &K) {
        if let Err(error) = self.try_delete_edge(source, destination) {
            trace!(%error, "edge to remove does not exist");
        }
    }

    /// Remove an edge, returning its weight.
    ///
    /// # Errors
    ///
    ///  - [`GraphError::UnknownNode`] when `source` is not a node.
    ///  - [`GraphError::UnknownEdge`] when `source` has no edge to `destination`.
    pub fn try_delete_edge(&mut self, source: &K, destination: &K) -> Result<W, GraphError> {
        let node = self.nodes.node_mut(source).ok_or(GraphError::UnknownNode)?;
        let weight = node
            .edges_mut()
            .remove(destination)
            .ok_or(GraphError::UnknownEdge)?;
        debug!("edge removed");
        Ok(weight)
    }

    /// Remove a node, returning its info.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownNode`] when there is no node called `name`.
    pub fn try_delete_node(&mut self, name: &K) -> Result<Option<I>, GraphError> {
        let info = self
            .nodes
            .remove_node(name)
            .ok_or(GraphError::UnknownNode)?;
        debug!("node removed");
        Ok(info)
    }

    /// Remove every edge pointing to `name`, from any node.
    pub fn delete_edges(&mut self, name: &K) {
        let purged = self.nodes.purge_edges(name);
        debug!(purged, "edges purged");
    }

    /// Whether there is an edge from `source` to `destination`.
    pub fn find_edge(&self, source: &K, destination: &K) -> bool {
        self.nodes.find_edge(source, destination)
    }

    /// The weight of the edge from `source` to `destination`.
    pub fn edge_weight(&self, source: &K, destination: &K) -> Option<&W> {
        self.nodes.edge_weight(source, destination)
    }

    /// Number of nodes with an edge to themselves.
    pub fn self_loops(&self) -> usize {
        self.nodes.self_loops()
    }

    /// The adjacency matrix of the graph, see [`NodeList::adjacency_matrix`].
    pub fn adjacency_matrix(&self) -> AdjacencyMatrix<K, W>
    where
        K: Clone,
        W: Clone,
    {
        self.nodes.adjacency_matrix()
    }

    /// All edges as owned `(source, destination, weight)` triples.
    pub fn list_edges(&self) -> Vec<(K, K, W)>
    where
        K: Clone,
        W: Clone,
    {
        self.nodes.list_edges()
    }
}

impl<K: Ord, I, W> FromIterator<K> for Graph<K, I, W> {
    fn from_iter<T: IntoIterator<Item = K>>(iter: T) -> Self {
        let mut graph = Self::new();
        graph.extend(iter);
        graph
    }
}

impl<K: Ord, I, W> Extend<K> for Graph<K, I, W> {
    fn extend<T: IntoIterator<Item = K>>(&mut self, iter: T) {
        for name in iter {
            self.add_node(name, None);
        }
    }
}

/// Error returned by [`Graph::try_add_edge`] and the other checked operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("unknown node")]
    UnknownNode,
    #[error("edge destination is not a node")]
    UnknownDestination,
    #[error("unknown edge")]
    UnknownEdge,
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use std::collections::BTreeMap;

    fn graph(names: &[&'static str]) -> Graph<&'static str, u8, i32> {
        names.iter().copied().collect()
    }

    #[test]
    fn add_node_twice_overwrites_info() {
        let mut graph = graph(&["a", "b"]);
        graph.add_node("a", Some(1));
        graph.add_node("a", Some(2));

        assert_eq!(graph.node_cardinality(), 2);
        assert_eq!(graph.node_info(&"a"), Some(&2));
        assert_eq!(graph.node_info(&"b"), None);
    }

    #[test]
    fn try_add_edge_reports_missing_nodes() {
        let mut graph = graph(&["a", "b"]);

        assert_eq!(
            graph.try_add_edge(&"a", "x", 1),
            Err(GraphError::UnknownDestination)
        );
        assert_eq!(graph.try_add_edge(&"x", "a", 1), Err(GraphError::UnknownNode));
        assert_eq!(graph.try_add_edge(&"a", "b", 1), Ok(None));
        assert_eq!(graph.try_add_edge(&"a", "b", 9), Ok(Some(1)));
        assert_eq!(graph.list_edges(), [("a", "b", 9)]);
    }

    #[test]
    fn try_delete_edge() {
        let mut graph = graph(&["a", "b"]);
        graph.add_edge(&"a", "b", 4);

        assert_eq!(graph.try_delete_edge(&"x", &"b"), Err(GraphError::UnknownNode));
        assert_eq!(graph.try_delete_edge(&"b", &"a"), Err(GraphError::UnknownEdge));
        assert_eq!(graph.try_delete_edge(&"a", &"b"), Ok(4));
        assert_eq!(graph.try_delete_edge(&"a", &"b"), Err(GraphError::UnknownEdge));
        assert_eq!(graph.edge_cardinality(), 0);
    }

    #[test]
    fn try_delete_node_returns_info() {
        let mut graph = graph(&["b"]);
        graph.add_node("a", Some(7));

        assert_eq!(graph.try_delete_node(&"a"), Ok(Some(7)));
        assert_eq!(graph.try_delete_node(&"b"), Ok(None));
        assert_eq!(graph.try_delete_node(&"b"), Err(GraphError::UnknownNode));
        assert!(graph.is_empty());
    }

    #[test]
    fn delete_node_does_not_cascade() {
        let mut graph = graph(&["a", "b", "c"]);
        graph.add_edge(&"a", "c", 1);
        graph.add_edge(&"b", "c", 1);
        graph.add_edge(&"c", "a", 1);

        graph.delete_node(&"c");
        assert_eq!(graph.list_edges(), [("a", "c", 1), ("b", "c", 1)]);

        graph.delete_edges(&"c");
        assert_eq!(graph.edge_cardinality(), 0);
    }

    #[test]
    fn remove_node_and_edges_cascades() {
        let mut graph = graph(&["a", "b", "c"]);
        graph.add_edge(&"a", "c", 1);
        graph.add_edge(&"b", "c", 1);
        graph.add_edge(&"a", "b", 1);

        graph.remove_node_and_edges(&"c");

        assert_eq!(graph.list_nodes(), ["a", "b"]);
        assert_eq!(graph.list_edges(), [("a", "b", 1)]);
    }

    #[rstest]
    #[case("a", Some(2))]
    #[case("b", Some(0))]
    #[case("c", Some(1))]
    #[case("x", None)]
    fn out_degree(#[case] name: &'static str, #[case] expected: Option<usize>) {
        let mut graph = graph(&["a", "b", "c"]);
        graph.add_edge(&"a", "b", 1);
        graph.add_edge(&"a", "c", 1);
        graph.add_edge(&"c", "c", 1);

        assert_eq!(graph.out_degree(&name), expected);
    }

    #[test]
    fn edges_iterator_matches_list() {
        let mut graph = graph(&["a", "b"]);
        graph.add_edge(&"b", "a", 2);
        graph.add_edge(&"a", "b", 3);
        graph.add_edge(&"a", "a", 1);

        let edges: Vec<_> = graph
            .edges()
            .map(|(source, destination, weight)| (*source, *destination, *weight))
            .collect();

        assert_eq!(edges, graph.list_edges());
        assert_eq!(edges, [("a", "a", 1), ("a", "b", 3), ("b", "a", 2)]);
    }

    #[test]
    fn clear_and_into_list() {
        let mut graph = graph(&["a", "b"]);
        graph.add_edge(&"a", "b", 1);

        let nodes = graph.clone().into_list();
        assert_eq!(nodes.list_nodes(), ["a", "b"]);
        assert_eq!(Graph::from(nodes), graph);

        graph.clear();
        assert!(graph.is_empty());
        assert_eq!(graph.edge_cardinality(), 0);
    }

    #[test]
    fn debug_lists_nodes_and_edges() {
        let mut graph = graph(&["a", "b"]);
        graph.add_node("a", Some(3));
        graph.add_edge(&"a", "b", 1);

        assert_eq!(
            format!("{graph:?}"),
            r#"{"a": (Some(3), {"b": 1}), "b": (None, {})}"#
        );
    }

    #[test]
    fn edges_iterator_is_fused() {
        let mut graph = graph(&["a"]);
        graph.add_edge(&"a", "a", 1);

        let mut edges = graph.edges();
        assert_eq!(edges.next(), Some((&"a", &"a", &1)));
        assert_eq!(edges.next(), None);
        assert_eq!(edges.next(), None);
    }

    #[test]
    fn delete_edges_leaves_other_destinations() {
        let mut graph = graph(&["a", "b", "c"]);
        graph.add_edge(&"a", "b", 1);
        graph.add_edge(&"b", "b", 2);
        graph.add_edge(&"c", "b", 3);
        graph.add_edge(&"c", "a", 4);

        graph.delete_edges(&"b");
        assert_eq!(graph.list_edges(), [("c", "a", 4)]);

        graph.delete_edges(&"b");
        assert_eq!(graph.edge_cardinality(), 1);
    }

    #[test]
    fn ascending_node_names() {
        let mut graph = Graph::<u32, (), u32>::new();

        for name in 0..10_000 {
            graph.add_node(name, None);
        }
        for name in 1..10_000 {
            graph.add_edge(&(name - 1), name, name);
        }

        assert_eq!(graph.node_cardinality(), 10_000);
        assert_eq!(graph.edge_cardinality(), 9_999);
        assert!(graph.list_nodes().into_iter().eq(0..10_000));
    }

    #[test]
    fn long_graph_clone_purge_and_drop() {
        let mut graph = Graph::<u32, (), u32>::new();

        // Every new node lands at the head, directly before its edge's destination.
        for name in (0..200_000).rev() {
            graph.add_node(name, None);
            graph.add_edge(&name, name + 1, 1);
        }
        graph.add_node(200_000, None);
        graph.add_edge(&199_999, 200_000, 1);

        let copy = graph.clone();
        assert_eq!(copy, graph);

        graph.delete_edges(&200_000);
        graph.remove_node_and_edges(&100_000);
        assert_ne!(copy, graph);
        assert_eq!(graph.node_cardinality(), 200_000);
        assert_eq!(graph.edge_cardinality(), 199_997);

        drop(graph);
        assert_eq!(copy.edge_cardinality(), 200_000);

        let mut copy = copy;
        copy.clear();
        assert!(copy.is_empty());
    }

    #[derive(Debug, Clone)]
    enum Op {
        AddNode(u8, Option<u8>),
        DeleteNode(u8),
        AddEdge(u8, u8, i32),
        DeleteEdge(u8, u8),
        DeleteEdges(u8),
    }

    fn op() -> impl Strategy<Value = Op> {
        let name = || 0u8..8;
        prop_oneof![
            (name(), any::<Option<u8>>()).prop_map(|(n, info)| Op::AddNode(n, info)),
            name().prop_map(Op::DeleteNode),
            (name(), name(), -5i32..5).prop_map(|(s, d, w)| Op::AddEdge(s, d, w)),
            (name(), name()).prop_map(|(s, d)| Op::DeleteEdge(s, d)),
            name().prop_map(Op::DeleteEdges),
        ]
    }

    /// Ordered maps with the same observable behavior as the graph.
    type Model = BTreeMap<u8, (Option<u8>, BTreeMap<u8, i32>)>;

    fn apply(graph: &mut Graph<u8, u8, i32>, model: &mut Model, op: &Op) {
        match *op {
            Op::AddNode(name, info) => {
                graph.add_node(name, info);
                model.entry(name).or_default().0 = info;
            }
            Op::DeleteNode(name) => {
                graph.delete_node(&name);
                model.remove(&name);
            }
            Op::AddEdge(source, destination, weight) => {
                graph.add_edge(&source, destination, weight);
                if model.contains_key(&destination) {
                    if let Some((_, edges)) = model.get_mut(&source) {
                        edges.insert(destination, weight);
                    }
                }
            }
            Op::DeleteEdge(source, destination) => {
                graph.delete_edge(&source, &destination);
                if let Some((_, edges)) = model.get_mut(&source) {
                    edges.remove(&destination);
                }
            }
            Op::DeleteEdges(name) => {
                graph.delete_edges(&name);
                for (_, edges) in model.values_mut() {
                    edges.remove(&name);
                }
            }
        }
    }

    proptest! {
        #[test]
        fn behaves_like_ordered_maps(ops in proptest::collection::vec(op(), 0..64)) {
            let mut graph = Graph::new();
            let mut model = Model::new();

            for op in &ops {
                apply(&mut graph, &mut model, op);
            }

            let nodes: Vec<u8> = model.keys().copied().collect();
            let edges: Vec<(u8, u8, i32)> = model
                .iter()
                .flat_map(|(source, (_, edges))| {
                    edges.iter().map(move |(destination, weight)| (*source, *destination, *weight))
                })
                .collect();

            prop_assert_eq!(graph.list_nodes(), nodes);
            prop_assert_eq!(graph.list_edges(), edges);
            prop_assert_eq!(graph.node_cardinality(), model.len());
            prop_assert_eq!(
                graph.edge_cardinality(),
                model.values().map(|(_, edges)| edges.len()).sum::<usize>()
            );

            for (name, (info, _)) in &model {
                prop_assert_eq!(graph.node_info(name), info.as_ref());
            }
        }

        #[test]
        fn lists_stay_strictly_sorted(ops in proptest::collection::vec(op(), 0..64)) {
            let mut graph = Graph::new();
            let mut model = Model::new();

            for op in &ops {
                apply(&mut graph, &mut model, op);
            }

            let nodes = graph.list_nodes();
            prop_assert!(nodes.windows(2).all(|pair| pair[0] < pair[1]));

            for node in graph.nodes() {
                let destinations: Vec<u8> = node.edges().iter().map(|(d, _)| *d).collect();
                prop_assert!(destinations.windows(2).all(|pair| pair[0] < pair[1]));
            }
        }

        #[test]
        fn edge_to_missing_destination_is_ignored(
            ops in proptest::collection::vec(op(), 0..32),
            source in 0u8..8,
            weight in -5i32..5,
        ) {
            let mut graph = Graph::new();
            let mut model = Model::new();

            for op in &ops {
                apply(&mut graph, &mut model, op);
            }

            let edges = graph.list_edges();
            let nodes = graph.node_cardinality();
            graph.add_edge(&source, 100, weight);

            prop_assert_eq!(graph.list_edges(), edges);
            prop_assert_eq!(graph.node_cardinality(), nodes);
        }

        #[test]
        fn matrix_agrees_with_edges(ops in proptest::collection::vec(op(), 0..64)) {
            let mut graph = Graph::new();
            let mut model = Model::new();

            for op in &ops {
                apply(&mut graph, &mut model, op);
            }

            let matrix = graph.adjacency_matrix();
            let labels = graph.list_nodes();
            prop_assert_eq!(matrix.labels(), &labels[..]);

            for (row, source) in labels.iter().enumerate() {
                for (column, destination) in labels.iter().enumerate() {
                    prop_assert_eq!(matrix.get(row, column), graph.edge_weight(source, destination));
                }
            }
        }
    }
}
