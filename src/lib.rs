//! Directed weighted graphs built from sorted singly-linked lists.
//!
//! A graph is a list of nodes kept in ascending order of their names. Each
//! node owns a list of its outgoing edges, kept in ascending order of the
//! destination names. There is at most one edge per ordered pair of nodes;
//! adding it again overwrites the weight.
//!
//! - [`edges::EdgeList`] is the per-node edge list.
//! - [`nodes::NodeList`] is the node list. Its operations consume the list
//!   and return the new head.
//! - [`Graph`] wraps a node list behind `&mut self` methods and adds checked
//!   variants that report failures as [`GraphError`].
//! - [`AdjacencyMatrix`] is the dense view produced by
//!   [`Graph::adjacency_matrix`].
//!
//! Removing a node does not remove the edges of other nodes that point to
//! it. Call [`Graph::delete_edges`] afterwards, or use
//! [`Graph::remove_node_and_edges`] for both at once.
//!
//! # Example
//!
//! ```
//! use linkgraph::Graph;
//!
//! let mut graph = Graph::<&str, (), u32>::new();
//! for name in ["C", "A", "B"] {
//!     graph.add_node(name, None);
//! }
//! graph.add_edge(&"A", "B", 2);
//! graph.add_edge(&"B", "B", 1);
//!
//! let matrix = graph.adjacency_matrix();
//! assert_eq!(matrix.labels(), ["A", "B", "C"]);
//! assert_eq!(matrix.weight(&"A", &"B"), Some(&2));
//! assert_eq!(matrix.weight(&"B", &"A"), None);
//! assert_eq!(graph.self_loops(), 1);
//! ```
pub mod edges;
pub mod graph;
mod link;
pub mod matrix;
pub mod nodes;

#[cfg(feature = "pyo3")]
pub mod python;

pub use crate::graph::{Graph, GraphError};
pub use crate::matrix::AdjacencyMatrix;
