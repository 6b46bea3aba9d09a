//! Graph abstractions consumed by the aggregator.

use crate::{direction::Direction, error::GraphError};

/// One edge as seen from the node whose adjacency is being traversed.
///
/// `dst` is the neighbour reached by following the edge in the requested
/// [`Direction`]: the edge target for [`Direction::Outgoing`] and the edge
/// source for [`Direction::Incoming`].
///
/// # Examples
/// ```
/// use avgdeg_core::EdgeRef;
///
/// let edge = EdgeRef::new(7, 2);
/// assert_eq!(edge.id(), 7);
/// assert_eq!(edge.dst(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeRef {
    id: usize,
    dst: usize,
}

impl EdgeRef {
    /// Creates an edge reference from an edge id and the neighbour it reaches.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: usize, dst: usize) -> Self { Self { id, dst } }

    /// Returns the graph-wide edge id used for property lookups.
    #[rustfmt::skip]
    #[must_use]
    pub const fn id(self) -> usize { self.id }

    /// Returns the neighbour node id.
    #[rustfmt::skip]
    #[must_use]
    pub const fn dst(self) -> usize { self.dst }
}

/// Read-only view over a graph with dense node ids in `[0, node_count)`.
///
/// Implementations are borrowed for the duration of a run and queried
/// concurrently from worker threads, so aggregation requires `Self: Sync`.
///
/// # Examples
/// ```
/// use avgdeg_core::{Direction, EdgeRef, Graph, GraphError};
///
/// struct Pairs(Vec<(usize, usize)>);
///
/// impl Graph for Pairs {
///     fn name(&self) -> &str { "pairs" }
///     fn node_count(&self) -> usize { 3 }
///     fn edges(
///         &self,
///         node: usize,
///         direction: Direction,
///     ) -> Result<impl Iterator<Item = EdgeRef> + '_, GraphError> {
///         if node >= self.node_count() {
///             return Err(GraphError::NodeOutOfBounds { node, nodes: self.node_count() });
///         }
///         Ok(self.0.iter().enumerate().filter_map(move |(id, &(src, dst))| {
///             match direction {
///                 Direction::Outgoing if src == node => Some(EdgeRef::new(id, dst)),
///                 Direction::Incoming if dst == node => Some(EdgeRef::new(id, src)),
///                 _ => None,
///             }
///         }))
///     }
/// }
///
/// let graph = Pairs(vec![(0, 1), (0, 2), (1, 2)]);
/// assert_eq!(graph.neighbour_count(0, Direction::Outgoing)?, 2);
/// assert_eq!(graph.neighbour_count(2, Direction::Incoming)?, 2);
/// assert_eq!(graph.edge_weight(0, "weight")?, None);
/// # Ok::<(), GraphError>(())
/// ```
pub trait Graph {
    /// Returns a human-readable name used in diagnostics.
    fn name(&self) -> &str;

    /// Returns the number of nodes, `N`.
    fn node_count(&self) -> usize;

    /// Returns whether the graph has no nodes.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    /// Returns the edges adjacent to `node` in `direction`.
    ///
    /// The iterator is lazy and finite, and calling this method again yields
    /// the same sequence.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeOutOfBounds`] when `node >= node_count()`.
    fn edges(
        &self,
        node: usize,
        direction: Direction,
    ) -> Result<impl Iterator<Item = EdgeRef> + '_, GraphError>;

    /// Returns the value of `property` on `edge`, or `None` when the edge
    /// carries no such value.
    ///
    /// The default implementation reports every property as absent, which
    /// suits unweighted graphs.
    ///
    /// # Errors
    /// Returns [`GraphError::EdgeOutOfBounds`] for unknown edge ids.
    fn edge_weight(&self, edge: usize, property: &str) -> Result<Option<f64>, GraphError> {
        let _ = (edge, property);
        Ok(None)
    }

    /// Returns how many edges [`Self::edges`] yields for `node`.
    ///
    /// Implementations backed by offset arrays should override this with a
    /// constant-time lookup.
    ///
    /// # Errors
    /// Returns the same errors as [`Self::edges`].
    fn neighbour_count(&self, node: usize, direction: Direction) -> Result<usize, GraphError> {
        Ok(self.edges(node, direction)?.count())
    }
}
