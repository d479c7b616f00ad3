//! Ordered singly-linked list of nodes, each owning its outgoing edges.
//!
//! [`NodeList`] is the whole graph in list form. Node operations walk along
//! the successor links; edge operations first locate the owning node and
//! then delegate to its [`EdgeList`].
use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::mem::replace;

use crate::edges::EdgeList;
use crate::link::{self, Link, Linked};
use crate::matrix::AdjacencyMatrix;

/// Nodes of a graph, sorted ascending by name.
///
/// The list is either empty or starts at a populated [`NodeCell`] holding a
/// name, optional info, the node's outgoing [`EdgeList`] and the successor.
/// Names are unique.
///
/// Operations that change the structure consume the list and return the new
/// head. Inserting before the current first node produces a different head,
/// so the returned value must always replace the old one.
///
/// # Example
///
/// ```
/// # use linkgraph::nodes::NodeList;
/// let nodes = NodeList::<&str, (), u32>::new()
///     .add_node("b", None)
///     .add_node("a", None)
///     .add_node("c", None)
///     .add_edge(&"a", "b", 5);
///
/// assert_eq!(nodes.list_nodes(), ["a", "b", "c"]);
/// assert!(nodes.find_edge(&"a", &"b"));
///
/// let nodes = nodes.delete_edge(&"a", &"b");
/// assert_eq!(nodes.edge_cardinality(), 0);
/// ```
pub struct NodeList<K, I, W> {
    head: Link<NodeCell<K, I, W>>,
}

/// A populated position of a [`NodeList`].
pub struct NodeCell<K, I, W> {
    name: K,
    info: Option<I>,
    edges: EdgeList<K, W>,
    next: Link<NodeCell<K, I, W>>,
}

impl<K, I, W> NodeCell<K, I, W> {
    /// The node's name.
    #[inline]
    pub fn name(&self) -> &K {
        &self.name
    }

    /// The node's auxiliary info, if any was given.
    #[inline]
    pub fn info(&self) -> Option<&I> {
        self.info.as_ref()
    }

    /// The node's outgoing edges.
    #[inline]
    pub fn edges(&self) -> &EdgeList<K, W> {
        &self.edges
    }

    /// The following node, `None` at the end of the list.
    #[inline]
    pub fn next(&self) -> Option<&NodeCell<K, I, W>> {
        self.next.as_deref()
    }

    #[inline]
    pub(crate) fn edges_mut(&mut self) -> &mut EdgeList<K, W> {
        &mut self.edges
    }
}

impl<K, I, W> Linked for NodeCell<K, I, W> {
    #[inline]
    fn next_mut(&mut self) -> &mut Link<Self> {
        &mut self.next
    }
}

impl<K: fmt::Debug, I: fmt::Debug, W: fmt::Debug> fmt::Debug for NodeCell<K, I, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeCell")
            .field("name", &self.name)
            .field("info", &self.info)
            .field("edges", &self.edges)
            .finish_non_exhaustive()
    }
}

impl<K, I, W> Default for NodeList<K, I, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, I, W> NodeList<K, I, W> {
    /// Create a new empty node list.
    pub const fn new() -> Self {
        Self { head: None }
    }

    /// Whether the list holds no node.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// The first node, `None` for the empty list.
    #[inline]
    pub fn first(&self) -> Option<&NodeCell<K, I, W>> {
        self.head.as_deref()
    }

    /// Number of nodes in the list.
    pub fn node_cardinality(&self) -> usize {
        self.iter().count()
    }

    /// Total number of edges, summed over the edge lists of all nodes.
    pub fn edge_cardinality(&self) -> usize {
        self.iter().map(|node| node.edges.cardinality()).sum()
    }

    /// Iterator over the node cells in ascending name order.
    pub fn iter(&self) -> Iter<'_, K, I, W> {
        Iter { next: self.first() }
    }
}

impl<K: Ord, I, W> NodeList<K, I, W> {
    /// Insert a node, keeping the list sorted by name.
    ///
    /// When a node called `name` already exists its info is overwritten in
    /// place and its edges are kept.
    #[must_use]
    pub fn add_node(mut self, name: K, info: Option<I>) -> Self {
        self.insert_node(name, info);
        self
    }

    /// Like [`NodeList::add_node`] in place, reporting the info that was
    /// replaced. The outer `Option` is `None` when the node is new.
    pub(crate) fn insert_node(&mut self, name: K, info: Option<I>) -> Option<Option<I>> {
        let (before, rest) = link::split_while(self.head.take(), |cell| cell.name < name);

        let (rest, previous) = match rest {
            Some(mut cell) if cell.name == name => {
                let previous = replace(&mut cell.info, info);
                (Some(cell), Some(previous))
            }
            next => {
                let cell = NodeCell {
                    name,
                    info,
                    edges: EdgeList::new(),
                    next,
                };
                (Some(Box::new(cell)), None)
            }
        };

        self.head = link::rejoin(before, rest);
        previous
    }

    /// Remove the node called `name` together with its outgoing edges.
    ///
    /// Edges of other nodes that point to `name` are left alone; use
    /// [`NodeList::delete_edges`] to purge them.
    #[must_use]
    pub fn delete_node(mut self, name: &K) -> Self {
        self.remove_node(name);
        self
    }

    /// Like [`NodeList::delete_node`] in place, returning the removed node's
    /// info. The outer `Option` is `None` when there was no such node.
    pub(crate) fn remove_node(&mut self, name: &K) -> Option<Option<I>> {
        let (before, rest) = link::split_while(self.head.take(), |cell| cell.name < *name);

        let (rest, removed) = match rest {
            Some(cell) if cell.name == *name => {
                let NodeCell { info, next, .. } = *cell;
                (next, Some(info))
            }
            rest => (rest, None),
        };

        self.head = link::rejoin(before, rest);
        removed
    }

    /// Whether a node called `name` is in the list.
    pub fn find_node(&self, name: &K) -> bool {
        self.node(name).is_some()
    }

    /// The cell of the node called `name`.
    pub fn node(&self, name: &K) -> Option<&NodeCell<K, I, W>> {
        for cell in self {
            match name.cmp(&cell.name) {
                Ordering::Less => break,
                Ordering::Equal => return Some(cell),
                Ordering::Greater => {}
            }
        }

        None
    }

    pub(crate) fn node_mut(&mut self, name: &K) -> Option<&mut NodeCell<K, I, W>> {
        let mut cursor = self.head.as_deref_mut();

        while let Some(cell) = cursor {
            match name.cmp(&cell.name) {
                Ordering::Less => break,
                Ordering::Equal => return Some(cell),
                Ordering::Greater => cursor = cell.next.as_deref_mut(),
            }
        }

        None
    }

    /// Names of all nodes in ascending order.
    pub fn list_nodes(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.iter().map(|node| node.name.clone()).collect()
    }

    /// Add an edge from `source` to `destination`.
    ///
    /// Nothing happens when `destination` is not a node of the list. A
    /// missing `source` is not checked up front, but the edge is only ever
    /// attached to an existing node, so the call is a no-op in that case as
    /// well. An existing edge between the two nodes has its weight
    /// overwritten.
    ///
    /// # Example
    ///
    /// ```
    /// # use linkgraph::nodes::NodeList;
    /// let nodes = NodeList::<&str, (), u32>::new()
    ///     .add_node("a", None)
    ///     .add_node("b", None);
    ///
    /// let nodes = nodes.add_edge(&"a", "z", 1).add_edge(&"z", "a", 1);
    /// assert_eq!(nodes.edge_cardinality(), 0);
    ///
    /// let nodes = nodes.add_edge(&"a", "b", 1).add_edge(&"a", "b", 3);
    /// assert_eq!(nodes.list_edges(), [("a", "b", 3)]);
    /// ```
    #[must_use]
    pub fn add_edge(mut self, source: &K, destination: K, weight: W) -> Self {
        if !self.find_node(&destination) {
            return self;
        }

        if let Some(node) = self.node_mut(source) {
            node.edges.insert(destination, weight);
        }

        self
    }

    /// Remove the edge from `source` to `destination` if it exists.
    #[must_use]
    pub fn delete_edge(mut self, source: &K, destination: &K) -> Self {
        if let Some(node) = self.node_mut(source) {
            node.edges.remove(destination);
        }

        self
    }

    /// Remove every edge in the list that points to `name`.
    #[must_use]
    pub fn delete_edges(mut self, name: &K) -> Self {
        self.purge_edges(name);
        self
    }

    /// Like [`NodeList::delete_edges`] in place, returning how many edges
    /// were removed.
    pub(crate) fn purge_edges(&mut self, name: &K) -> usize {
        let mut purged = 0;
        let mut cursor = self.head.as_deref_mut();

        while let Some(cell) = cursor {
            if cell.edges.remove(name).is_some() {
                purged += 1;
            }
            cursor = cell.next.as_deref_mut();
        }

        purged
    }

    /// Whether there is an edge from `source` to `destination`.
    pub fn find_edge(&self, source: &K, destination: &K) -> bool {
        self.edge_weight(source, destination).is_some()
    }

    /// The weight of the edge from `source` to `destination`.
    pub fn edge_weight(&self, source: &K, destination: &K) -> Option<&W> {
        self.node(source)?.edges.get(destination)
    }

    /// Number of nodes that have an edge to themselves.
    pub fn self_loops(&self) -> usize {
        self.iter()
            .filter(|node| node.edges.find(&node.name))
            .count()
    }

    /// The adjacency matrix of the graph.
    ///
    /// Rows and columns follow the ascending node order. Edges to names that
    /// are no longer nodes of the list have no column and are left out.
    ///
    /// # Example
    ///
    /// ```
    /// # use linkgraph::nodes::NodeList;
    /// let nodes = NodeList::<&str, (), u32>::new()
    ///     .add_node("b", None)
    ///     .add_node("a", None)
    ///     .add_edge(&"a", "b", 2);
    ///
    /// let matrix = nodes.adjacency_matrix();
    /// assert_eq!(matrix.labels(), ["a", "b"]);
    /// assert_eq!(matrix.get(0, 1), Some(&2));
    /// assert_eq!(matrix.get(1, 0), None);
    /// ```
    pub fn adjacency_matrix(&self) -> AdjacencyMatrix<K, W>
    where
        K: Clone,
        W: Clone,
    {
        let labels = self.list_nodes();
        let size = labels.len();
        let mut cells = vec![None; size * size];

        for (row, node) in self.iter().enumerate() {
            for (destination, weight) in &node.edges {
                if let Ok(column) = labels.binary_search(destination) {
                    cells[row * size + column] = Some(weight.clone());
                }
            }
        }

        AdjacencyMatrix::from_parts(labels, cells)
    }

    /// All edges as `(source, destination, weight)` triples, ordered by
    /// source and then by destination.
    pub fn list_edges(&self) -> Vec<(K, K, W)>
    where
        K: Clone,
        W: Clone,
    {
        self.iter()
            .flat_map(|node| node.edges.list(&node.name))
            .collect()
    }
}

impl<K, I, W> Drop for NodeList<K, I, W> {
    fn drop(&mut self) {
        link::dismantle(self.head.take());
    }
}

impl<K: Clone, I: Clone, W: Clone> Clone for NodeList<K, I, W> {
    fn clone(&self) -> Self {
        let mut reversed = None;
        for node in self {
            reversed = Some(Box::new(NodeCell {
                name: node.name.clone(),
                info: node.info.clone(),
                edges: node.edges.clone(),
                next: reversed,
            }));
        }

        Self {
            head: link::rejoin(reversed, None),
        }
    }
}

impl<K: PartialEq, I: PartialEq, W: PartialEq> PartialEq for NodeList<K, I, W> {
    fn eq(&self, other: &Self) -> bool {
        let mut left = self.iter();
        let mut right = other.iter();

        loop {
            match (left.next(), right.next()) {
                (None, None) => return true,
                (Some(a), Some(b))
                    if a.name == b.name && a.info == b.info && a.edges == b.edges => {}
                _ => return false,
            }
        }
    }
}

impl<K: Eq, I: Eq, W: Eq> Eq for NodeList<K, I, W> {}

impl<K: fmt::Debug, I: fmt::Debug, W: fmt::Debug> fmt::Debug for NodeList<K, I, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, K, I, W> IntoIterator for &'a NodeList<K, I, W> {
    type Item = &'a NodeCell<K, I, W>;
    type IntoIter = Iter<'a, K, I, W>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator created by [`NodeList::iter`].
pub struct Iter<'a, K, I, W> {
    next: Option<&'a NodeCell<K, I, W>>,
}

impl<'a, K, I, W> Clone for Iter<'a, K, I, W> {
    fn clone(&self) -> Self {
        Self { next: self.next }
    }
}

impl<'a, K, I, W> Iterator for Iter<'a, K, I, W> {
    type Item = &'a NodeCell<K, I, W>;

    fn next(&mut self) -> Option<Self::Item> {
        let cell = self.next?;
        self.next = cell.next();
        Some(cell)
    }
}

impl<'a, K, I, W> FusedIterator for Iter<'a, K, I, W> {}
