//! Dense adjacency matrix view of a graph.
use std::fmt::{self, Display};

/// An `n × n` matrix of edge weights labelled by node name.
///
/// Rows and columns share the same ascending order of labels. A cell holds
/// the weight of the edge from the row's node to the column's node, or
/// `None` when there is no direct edge; that absence is the no-path marker
/// and is rendered as `inf`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMatrix<K, W> {
    labels: Vec<K>,
    /// Row-major cells, `labels.len()²` entries.
    cells: Vec<Option<W>>,
}

impl<K, W> AdjacencyMatrix<K, W> {
    pub(crate) fn from_parts(labels: Vec<K>, cells: Vec<Option<W>>) -> Self {
        debug_assert_eq!(cells.len(), labels.len() * labels.len());
        Self { labels, cells }
    }

    /// Number of rows, which is also the number of columns.
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the matrix has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Node names in row (and column) order.
    #[inline]
    pub fn labels(&self) -> &[K] {
        &self.labels
    }

    /// The weight in a cell.
    ///
    /// Returns `None` when there is no edge or the position is out of bounds.
    pub fn get(&self, row: usize, column: usize) -> Option<&W> {
        if column >= self.len() {
            return None;
        }

        self.row(row)?.get(column)?.as_ref()
    }

    /// The cells of a single row.
    pub fn row(&self, row: usize) -> Option<&[Option<W>]> {
        let size = self.len();
        let start = row.checked_mul(size)?;
        self.cells.get(start..start.checked_add(size)?)
    }

    /// Iterator over the rows in label order.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<W>]> + '_ {
        self.cells.chunks(self.len().max(1))
    }

    /// Consumes the matrix, returning the labels and the row-major cells.
    pub fn into_parts(self) -> (Vec<K>, Vec<Option<W>>) {
        (self.labels, self.cells)
    }
}

impl<K: Ord, W> AdjacencyMatrix<K, W> {
    /// Row or column position of a node name.
    pub fn position(&self, name: &K) -> Option<usize> {
        self.labels.binary_search(name).ok()
    }

    /// The weight of the edge between two named nodes.
    pub fn weight(&self, source: &K, destination: &K) -> Option<&W> {
        self.get(self.position(source)?, self.position(destination)?)
    }
}

impl<K: Display, W: Display> Display for AdjacencyMatrix<K, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.labels.iter().map(ToString::to_string).collect();
        let cells: Vec<String> = self
            .cells
            .iter()
            .map(|cell| match cell {
                Some(weight) => weight.to_string(),
                None => "inf".to_string(),
            })
            .collect();

        let width = labels
            .iter()
            .chain(&cells)
            .map(|text| text.chars().count())
            .max()
            .unwrap_or(0);

        write!(f, "{:width$}", "")?;
        for label in &labels {
            write!(f, " {label:>width$}")?;
        }

        for (label, row) in labels.iter().zip(cells.chunks(labels.len().max(1))) {
            writeln!(f)?;
            write!(f, "{label:>width$}")?;
            for cell in row {
                write!(f, " {cell:>width$}")?;
            }
        }

        Ok(())
    }
}
