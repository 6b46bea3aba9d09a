//! Error types for the avgdeg core library.
//!
//! Defines error enums exposed by the public API, their stable
//! machine-readable codes, and a convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced by [`crate::Graph`] lookups.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// A node id outside `[0, nodes)` was requested or reported.
    #[error("node {node} is out of bounds for a graph with {nodes} nodes")]
    NodeOutOfBounds {
        /// The offending node id.
        node: usize,
        /// Number of nodes in the graph.
        nodes: usize,
    },
    /// An edge id outside `[0, edges)` was requested.
    #[error("edge {edge} is out of bounds for a graph with {edges} edges")]
    EdgeOutOfBounds {
        /// The offending edge id.
        edge: usize,
        /// Number of edges in the graph.
        edges: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// A node id outside the graph was requested or reported.
        NodeOutOfBounds => NodeOutOfBounds { .. } => "GRAPH_NODE_OUT_OF_BOUNDS",
        /// An edge id outside the graph was requested.
        EdgeOutOfBounds => EdgeOutOfBounds { .. } => "GRAPH_EDGE_OUT_OF_BOUNDS",
    }
}

/// Error type produced when configuring or running an [`crate::Aggregator`].
///
/// Every variant aborts the whole run; no partial result is returned.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AggregateError {
    /// The degree array does not have one entry per node.
    #[error("graph `{graph}` has {expected} nodes but the degree array has {actual} entries")]
    ShapeMismatch {
        /// Identifier for the graph.
        graph: Arc<str>,
        /// Number of nodes in the graph.
        expected: usize,
        /// Length of the supplied degree array.
        actual: usize,
    },
    /// A degree entry was negative, NaN, or infinite.
    #[error("degree of node {node} must be finite and non-negative (got {value})")]
    InvalidDegree {
        /// Node whose degree entry is invalid.
        node: usize,
        /// The rejected value.
        value: f64,
    },
    /// Weighted mode was requested but an edge lacks the weight property.
    #[error(
        "edge {edge} between node {node} and neighbour {neighbour} in graph `{graph}` has no value for property `{property}`"
    )]
    MissingEdgeWeight {
        /// Identifier for the graph.
        graph: Arc<str>,
        /// Id of the offending edge.
        edge: usize,
        /// Node whose neighbour list contained the edge.
        node: usize,
        /// Neighbour reached through the edge.
        neighbour: usize,
        /// Name of the missing weight property.
        property: Arc<str>,
    },
    /// An edge weight was NaN or infinite.
    #[error("edge {edge} has non-finite value {value} for property `{property}`")]
    InvalidEdgeWeight {
        /// Id of the offending edge.
        edge: usize,
        /// Name of the weight property.
        property: Arc<str>,
        /// The rejected value.
        value: f64,
    },
    /// The configuration is invalid or combines unsupported options.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Human-readable description of the problem.
        reason: Arc<str>,
    },
    /// The dedicated worker pool could not be created.
    #[error("failed to build worker pool: {message}")]
    ThreadPool {
        /// Message reported by the pool builder.
        message: Arc<str>,
    },
    /// A [`crate::Graph`] lookup failed during the run.
    #[error("graph `{graph}` failed: {error}")]
    Graph {
        /// Identifier for the graph that produced the error.
        graph: Arc<str>,
        #[source]
        /// Underlying graph error.
        error: GraphError,
    },
}

define_error_codes! {
    /// Stable codes describing [`AggregateError`] variants.
    enum AggregateErrorCode for AggregateError {
        /// The degree array does not have one entry per node.
        ShapeMismatch => ShapeMismatch { .. } => "AVGDEG_SHAPE_MISMATCH",
        /// A degree entry was negative or non-finite.
        InvalidDegree => InvalidDegree { .. } => "AVGDEG_INVALID_DEGREE",
        /// An edge lacks the requested weight property.
        MissingEdgeWeight => MissingEdgeWeight { .. } => "AVGDEG_MISSING_EDGE_WEIGHT",
        /// An edge weight was non-finite.
        InvalidEdgeWeight => InvalidEdgeWeight { .. } => "AVGDEG_INVALID_EDGE_WEIGHT",
        /// The configuration is invalid.
        InvalidConfiguration => InvalidConfiguration { .. } => "AVGDEG_INVALID_CONFIGURATION",
        /// The worker pool could not be created.
        ThreadPool => ThreadPool { .. } => "AVGDEG_THREAD_POOL",
        /// A [`crate::Graph`] lookup failed.
        GraphFailure => Graph { .. } => "AVGDEG_GRAPH_FAILURE",
    }
}

impl AggregateError {
    /// Retrieve the inner [`GraphErrorCode`] when the error originated in a [`crate::Graph`].
    pub const fn graph_code(&self) -> Option<GraphErrorCode> {
        match self {
            Self::Graph { error, .. } => Some(error.code()),
            _ => None,
        }
    }

    pub(crate) fn invalid_configuration(reason: impl Into<Arc<str>>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, AggregateError>;
