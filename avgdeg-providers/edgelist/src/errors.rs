//! Error types for the edge-list provider.

use thiserror::Error;

use crate::graph::MAX_NODES;

/// Failures raised while building a [`crate::CsrGraph`] or reading an edge
/// list. Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum EdgeListError {
    /// A data line had fewer than two columns.
    #[error("line {line}: expected at least a source and a target column")]
    MissingColumn {
        /// Line holding the short row.
        line: usize,
    },
    /// A source or target column was not a non-negative integer.
    #[error("line {line}: `{token}` is not a valid node id")]
    InvalidNodeId {
        /// Line holding the bad id.
        line: usize,
        /// The rejected token.
        token: String,
    },
    /// A node id parsed but lies at or beyond [`MAX_NODES`].
    #[error(
        "line {line}: node id `{token}` exceeds the supported maximum of {max}",
        max = MAX_NODES - 1
    )]
    NodeIdTooLarge {
        /// Line holding the oversized id.
        line: usize,
        /// The rejected token.
        token: String,
    },
    /// A property column held something other than a number or `-`.
    #[error("line {line}: `{token}` is not a number for property `{property}`")]
    InvalidValue {
        /// Line holding the bad value.
        line: usize,
        /// Property named by the column.
        property: String,
        /// The rejected token.
        token: String,
    },
    /// A data line disagreed with the column count fixed by the first row.
    #[error("line {line}: expected {expected} columns but found {actual}")]
    ColumnCountMismatch {
        /// Line holding the ragged row.
        line: usize,
        /// Column count fixed by the header or first data line.
        expected: usize,
        /// Columns present on this line.
        actual: usize,
    },
    /// A headerless list carried more than one value column.
    #[error("line {line}: {columns} columns need a header naming the edge properties")]
    UnnamedProperties {
        /// First data line.
        line: usize,
        /// Columns present on that line.
        columns: usize,
    },
    /// The caller declared fewer nodes than the edges reference.
    #[error("declared node count {declared} is smaller than the {required} nodes referenced")]
    NodeCountTooSmall {
        /// Declared node count.
        declared: usize,
        /// Largest referenced id plus one.
        required: usize,
    },
    /// The graph would need more than [`MAX_NODES`] nodes.
    #[error("graph needs {nodes} nodes but at most {limit} are supported")]
    NodeLimitExceeded {
        /// Requested or inferred node count, saturated at `usize::MAX`.
        nodes: usize,
        /// The supported maximum.
        limit: usize,
    },
    /// Two properties share a name.
    #[error("edge property `{name}` is defined more than once")]
    DuplicateProperty {
        /// The repeated name.
        name: String,
    },
    /// A property column does not have one value per edge.
    #[error("edge property `{name}` has {actual} values for {expected} edges")]
    PropertyLengthMismatch {
        /// Property being attached.
        name: String,
        /// Number of edges in the graph.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },
    /// An endpoint is not below the declared node count.
    #[error("edge {edge} references node {node} but the graph has {nodes} nodes")]
    EndpointOutOfBounds {
        /// Offending edge id.
        edge: usize,
        /// Endpoint outside the graph.
        node: usize,
        /// Declared node count.
        nodes: usize,
    },
    /// Reading the input failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
