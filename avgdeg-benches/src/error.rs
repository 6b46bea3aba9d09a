//! Benchmark setup error type.
//!
//! Collects the failures that can occur while preparing benchmark inputs so
//! setup code propagates them with `?`.

use avgdeg_core::{AggregateError, GraphError};
use avgdeg_providers_edgelist::EdgeListError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Building the synthetic graph failed.
    #[error("synthetic graph construction failed: {0}")]
    Graph(#[from] EdgeListError),
    /// Configuring the aggregator or computing degrees failed.
    #[error("aggregation setup failed: {0}")]
    Aggregate(#[from] AggregateError),
    /// Inspecting a generated graph failed.
    #[error("graph lookup failed: {0}")]
    Lookup(#[from] GraphError),
    /// A zero value was passed where a non-zero integer was required.
    #[error("expected a non-zero value for {context}")]
    ZeroValue {
        /// The parameter that was unexpectedly zero.
        context: &'static str,
    },
    /// A floating-point parameter was out of range.
    #[error("parameter `{parameter}` must be finite and non-negative")]
    InvalidFloatParameter {
        /// The offending parameter.
        parameter: &'static str,
    },
}
