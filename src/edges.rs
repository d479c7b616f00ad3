//! Ordered singly-linked list of outgoing edges.
//!
//! An [`EdgeList`] belongs to exactly one node. It stores destination names
//! and weights; the source of every edge is the owning node and is not
//! stored in the cells.
use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::mem::replace;

use crate::link::{self, Link, Linked};

/// Outgoing edges of a node, sorted ascending by destination.
///
/// The list is either empty or starts at a populated [`EdgeCell`] that owns
/// its successor. Destinations are unique.
///
/// Operations that change the structure consume the list and return the new
/// head, which the caller must store again. All of them walk the cells in a
/// loop, so list length is bounded by memory and not by the stack.
pub struct EdgeList<K, W> {
    head: Link<EdgeCell<K, W>>,
}

/// A populated position of an [`EdgeList`].
pub struct EdgeCell<K, W> {
    destination: K,
    weight: W,
    next: Link<EdgeCell<K, W>>,
}

impl<K, W> EdgeCell<K, W> {
    /// Name of the node the edge points to.
    #[inline]
    pub fn destination(&self) -> &K {
        &self.destination
    }

    /// Weight of the edge.
    #[inline]
    pub fn weight(&self) -> &W {
        &self.weight
    }

    /// The following cell, `None` at the end of the list.
    #[inline]
    pub fn next(&self) -> Option<&EdgeCell<K, W>> {
        self.next.as_deref()
    }
}

impl<K, W> Linked for EdgeCell<K, W> {
    #[inline]
    fn next_mut(&mut self) -> &mut Link<Self> {
        &mut self.next
    }
}

impl<K: fmt::Debug, W: fmt::Debug> fmt::Debug for EdgeCell<K, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeCell")
            .field("destination", &self.destination)
            .field("weight", &self.weight)
            .finish_non_exhaustive()
    }
}

impl<K, W> Default for EdgeList<K, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, W> EdgeList<K, W> {
    /// Create a new empty edge list.
    pub const fn new() -> Self {
        Self { head: None }
    }

    /// Whether the list holds no edge.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// The first cell, `None` for the empty list.
    #[inline]
    pub fn first(&self) -> Option<&EdgeCell<K, W>> {
        self.head.as_deref()
    }

    /// Number of edges in the list.
    pub fn cardinality(&self) -> usize {
        self.iter().count()
    }

    /// Iterator over `(destination, weight)` pairs in ascending destination order.
    pub fn iter(&self) -> Iter<'_, K, W> {
        Iter { next: self.first() }
    }
}

impl<K: Ord, W> EdgeList<K, W> {
    /// Insert an edge to `destination`, keeping the list sorted.
    ///
    /// When an edge to `destination` already exists its weight is overwritten
    /// in place.
    ///
    /// # Example
    ///
    /// ```
    /// # use linkgraph::edges::EdgeList;
    /// let edges = EdgeList::new().add("c", 3).add("a", 1).add("b", 2);
    /// assert!(edges.iter().map(|(dst, _)| *dst).eq(["a", "b", "c"]));
    ///
    /// let edges = edges.add("b", 20);
    /// assert_eq!(edges.cardinality(), 3);
    /// assert_eq!(edges.get(&"b"), Some(&20));
    /// ```
    #[must_use]
    pub fn add(mut self, destination: K, weight: W) -> Self {
        self.insert(destination, weight);
        self
    }

    /// Like [`EdgeList::add`] in place, returning the weight that was replaced.
    pub(crate) fn insert(&mut self, destination: K, weight: W) -> Option<W> {
        let (before, rest) =
            link::split_while(self.head.take(), |cell| cell.destination < destination);

        let (rest, previous) = match rest {
            Some(mut cell) if cell.destination == destination => {
                let previous = replace(&mut cell.weight, weight);
                (Some(cell), Some(previous))
            }
            next => {
                let cell = EdgeCell {
                    destination,
                    weight,
                    next,
                };
                (Some(Box::new(cell)), None)
            }
        };

        self.head = link::rejoin(before, rest);
        previous
    }

    /// Remove the edge to `destination`. Does nothing if there is none.
    ///
    /// # Example
    ///
    /// ```
    /// # use linkgraph::edges::EdgeList;
    /// let edges = EdgeList::new().add("a", 1).add("b", 2);
    /// let edges = edges.delete(&"a").delete(&"z");
    /// assert!(edges.iter().eq([(&"b", &2)]));
    /// ```
    #[must_use]
    pub fn delete(mut self, destination: &K) -> Self {
        self.remove(destination);
        self
    }

    /// Like [`EdgeList::delete`] in place, returning the weight of the removed edge.
    pub(crate) fn remove(&mut self, destination: &K) -> Option<W> {
        let (before, rest) =
            link::split_while(self.head.take(), |cell| cell.destination < *destination);

        let (rest, removed) = match rest {
            Some(cell) if cell.destination == *destination => {
                let EdgeCell { weight, next, .. } = *cell;
                (next, Some(weight))
            }
            rest => (rest, None),
        };

        self.head = link::rejoin(before, rest);
        removed
    }

    /// Whether the list contains an edge to `destination`.
    pub fn find(&self, destination: &K) -> bool {
        self.get(destination).is_some()
    }

    /// The weight of the edge to `destination`.
    pub fn get(&self, destination: &K) -> Option<&W> {
        for (candidate, weight) in self {
            match destination.cmp(candidate) {
                Ordering::Less => break,
                Ordering::Equal => return Some(weight),
                Ordering::Greater => {}
            }
        }

        None
    }

    /// Flatten the list into `(source, destination, weight)` triples.
    ///
    /// The cells do not know their source, so the owning node's name is
    /// passed in by the caller.
    pub fn list(&self, source: &K) -> Vec<(K, K, W)>
    where
        K: Clone,
        W: Clone,
    {
        self.iter()
            .map(|(destination, weight)| (source.clone(), destination.clone(), weight.clone()))
            .collect()
    }
}

impl<K, W> Drop for EdgeList<K, W> {
    fn drop(&mut self) {
        link::dismantle(self.head.take());
    }
}

impl<K: Clone, W: Clone> Clone for EdgeList<K, W> {
    fn clone(&self) -> Self {
        let mut reversed = None;
        for (destination, weight) in self {
            reversed = Some(Box::new(EdgeCell {
                destination: destination.clone(),
                weight: weight.clone(),
                next: reversed,
            }));
        }

        Self {
            head: link::rejoin(reversed, None),
        }
    }
}

impl<K: PartialEq, W: PartialEq> PartialEq for EdgeList<K, W> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<K: Eq, W: Eq> Eq for EdgeList<K, W> {}

impl<K: fmt::Debug, W: fmt::Debug> fmt::Debug for EdgeList<K, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, W> IntoIterator for &'a EdgeList<K, W> {
    type Item = (&'a K, &'a W);
    type IntoIter = Iter<'a, K, W>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator created by [`EdgeList::iter`].
pub struct Iter<'a, K, W> {
    next: Option<&'a EdgeCell<K, W>>,
}

impl<'a, K, W> Clone for Iter<'a, K, W> {
    fn clone(&self) -> Self {
        Self { next: self.next }
    }
}

impl<'a, K, W> Iterator for Iter<'a, K, W> {
    type Item = (&'a K, &'a W);

    fn next(&mut self) -> Option<Self::Item> {
        let cell = self.next?;
        self.next = cell.next();
        Some((&cell.destination, &cell.weight))
    }
}

impl<'a, K, W> FusedIterator for Iter<'a, K, W> {}
