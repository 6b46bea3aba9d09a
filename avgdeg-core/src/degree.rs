//! Per-node degree computation.
//!
//! Produces the degree array consumed by [`crate::Aggregator::run`]. Kept
//! separate from aggregation so callers can supply degrees from elsewhere.

use rayon::prelude::*;
use tracing::{info, instrument};

use crate::{
    AggregateError, Result, aggregate::kernel::node_degree, direction::Direction, graph::Graph,
};

/// Computes the in-degree or out-degree of every node in parallel.
///
/// Without `weight_property` each entry counts the node's edges in
/// `direction`; with it, each entry sums the named weight over those edges.
/// Runs on whichever rayon pool the caller is executing in.
///
/// # Errors
/// Returns [`crate::AggregateError::MissingEdgeWeight`] or
/// [`crate::AggregateError::InvalidEdgeWeight`] in weighted mode,
/// [`crate::AggregateError::InvalidConfiguration`] for a blank property
/// name, and [`crate::AggregateError::Graph`] when a lookup fails.
///
/// # Examples
/// ```
/// use avgdeg_core::{Direction, EdgeRef, Graph, GraphError, compute_degrees};
///
/// struct Star;
///
/// impl Graph for Star {
///     fn name(&self) -> &str { "star" }
///     fn node_count(&self) -> usize { 4 }
///     fn edges(
///         &self,
///         node: usize,
///         direction: Direction,
///     ) -> Result<impl Iterator<Item = EdgeRef> + '_, GraphError> {
///         // Hub 0 points at leaves 1..=3; edge `i - 1` reaches leaf `i`.
///         let hub_edges = (node == 0 && direction == Direction::Outgoing)
///             .then(|| (1..4).map(|leaf| EdgeRef::new(leaf - 1, leaf)));
///         let leaf_edge = (node != 0 && direction == Direction::Incoming)
///             .then(|| EdgeRef::new(node - 1, 0));
///         Ok(hub_edges.into_iter().flatten().chain(leaf_edge))
///     }
/// }
///
/// let out_degrees = compute_degrees(&Star, Direction::Outgoing, None)?;
/// assert_eq!(out_degrees, [3.0, 0.0, 0.0, 0.0]);
/// let in_degrees = compute_degrees(&Star, Direction::Incoming, None)?;
/// assert_eq!(in_degrees, [0.0, 1.0, 1.0, 1.0]);
/// # Ok::<(), avgdeg_core::AggregateError>(())
/// ```
#[instrument(
    name = "core.degrees",
    err,
    skip(graph),
    fields(graph = %graph.name(), nodes = graph.node_count(), weighted = weight_property.is_some()),
)]
pub fn compute_degrees<G: Graph + Sync>(
    graph: &G,
    direction: Direction,
    weight_property: Option<&str>,
) -> Result<Vec<f64>> {
    if weight_property.is_some_and(|property| property.trim().is_empty()) {
        return Err(AggregateError::invalid_configuration(
            "weight property name must not be blank",
        ));
    }

    let degrees = (0..graph.node_count())
        .into_par_iter()
        .map(|node| node_degree(graph, node, direction, weight_property))
        .collect::<Result<Vec<f64>>>()?;
    info!(nodes = degrees.len(), "degree computation completed");
    Ok(degrees)
}
