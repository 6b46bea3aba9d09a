//! Parallel average-neighbour-degree aggregation.
//!
//! Provides the [`Aggregator`] entry point. Each node's value is an
//! independent reduction over its own neighbour list, written into a slot
//! that no other task touches, so the only synchronisation is rayon's final
//! join.

pub(crate) mod kernel;

use std::sync::Arc;
#[cfg(feature = "metrics")]
use std::time::Instant;

use rayon::{ThreadPool, prelude::*};
use tracing::{debug, info, instrument};

use crate::{
    Result,
    builder::{AggregatorBuilder, Schedule},
    degree::compute_degrees,
    direction::Direction,
    error::AggregateError,
    graph::Graph,
    result::NeighbourDegrees,
};

use self::kernel::node_average;

/// Computes the average neighbour degree of every node in `graph`.
///
/// Runs with the default [`Schedule::WorkStealing`] on the global worker
/// pool. Use [`AggregatorBuilder`] for other configurations.
///
/// # Errors
/// Returns the same errors as [`Aggregator::run`].
///
/// # Examples
/// ```
/// use avgdeg_core::{Direction, EdgeRef, Graph, GraphError, average_neighbour_degree};
///
/// struct Triangle;
///
/// static EDGES: [(usize, usize, f64); 3] = [(0, 1, 2.0), (0, 2, 1.0), (1, 2, 1.0)];
///
/// impl Graph for Triangle {
///     fn name(&self) -> &str { "triangle" }
///     fn node_count(&self) -> usize { 3 }
///     fn edges(
///         &self,
///         node: usize,
///         direction: Direction,
///     ) -> Result<impl Iterator<Item = EdgeRef> + '_, GraphError> {
///         Ok(EDGES.iter().enumerate().filter_map(move |(id, &(src, dst, _))| {
///             match direction {
///                 Direction::Outgoing if src == node => Some(EdgeRef::new(id, dst)),
///                 Direction::Incoming if dst == node => Some(EdgeRef::new(id, src)),
///                 _ => None,
///             }
///         }))
///     }
///     fn edge_weight(&self, edge: usize, property: &str) -> Result<Option<f64>, GraphError> {
///         let (_, _, weight) = EDGES
///             .get(edge)
///             .ok_or(GraphError::EdgeOutOfBounds { edge, edges: EDGES.len() })?;
///         Ok((property == "weight").then_some(*weight))
///     }
/// }
///
/// let out_degrees = [2.0, 1.0, 1.0];
/// let plain = average_neighbour_degree(&Triangle, Direction::Outgoing, &out_degrees, None)?;
/// assert_eq!(plain.values(), [1.0, 1.0, 0.0]);
///
/// let weighted =
///     average_neighbour_degree(&Triangle, Direction::Outgoing, &out_degrees, Some("weight"))?;
/// assert_eq!(weighted.get(0), Some(1.0));
/// # Ok::<(), avgdeg_core::AggregateError>(())
/// ```
pub fn average_neighbour_degree<G: Graph + Sync>(
    graph: &G,
    direction: Direction,
    degrees: &[f64],
    weight_property: Option<&str>,
) -> Result<NeighbourDegrees> {
    let builder = AggregatorBuilder::new().with_direction(direction);
    let builder = match weight_property {
        Some(property) => builder.with_weight_property(property),
        None => builder,
    };
    builder.build()?.run(graph, degrees)
}

/// Configured average-neighbour-degree computation.
///
/// Construct instances with [`AggregatorBuilder`]. An aggregator holds no
/// per-run state and can be reused across graphs and threads.
///
/// # Examples
/// ```
/// use avgdeg_core::{AggregatorBuilder, Direction, Schedule};
///
/// let aggregator = AggregatorBuilder::new()
///     .with_schedule(Schedule::Sequential)
///     .build()
///     .expect("configuration is valid");
/// assert_eq!(aggregator.direction(), Direction::Outgoing);
/// assert_eq!(aggregator.schedule(), Schedule::Sequential);
/// assert_eq!(aggregator.threads(), None);
/// ```
#[derive(Debug, Clone)]
pub struct Aggregator {
    direction: Direction,
    weight_property: Option<Arc<str>>,
    schedule: Schedule,
    pool: Option<Arc<ThreadPool>>,
}

impl Aggregator {
    pub(crate) const fn new(
        direction: Direction,
        weight_property: Option<Arc<str>>,
        schedule: Schedule,
        pool: Option<Arc<ThreadPool>>,
    ) -> Self {
        Self {
            direction,
            weight_property,
            schedule,
            pool,
        }
    }

    /// Returns the adjacency direction traversed by this aggregator.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the edge weight property, or `None` in unweighted mode.
    #[must_use]
    pub fn weight_property(&self) -> Option<&str> {
        self.weight_property.as_deref()
    }

    /// Returns the scheduling strategy.
    #[must_use]
    pub const fn schedule(&self) -> Schedule {
        self.schedule
    }

    /// Returns the size of the dedicated worker pool, or `None` when runs
    /// use the global pool.
    #[must_use]
    pub fn threads(&self) -> Option<usize> {
        self.pool.as_ref().map(|pool| pool.current_num_threads())
    }

    /// Computes the average neighbour degree of every node.
    ///
    /// `degrees` must hold one finite, non-negative entry per node, computed
    /// for the same direction this aggregator traverses. The call returns
    /// only once every node has been reduced.
    ///
    /// # Errors
    /// Returns [`AggregateError::ShapeMismatch`] when `degrees` does not have
    /// one entry per node, [`AggregateError::InvalidDegree`] for negative or
    /// non-finite entries, [`AggregateError::MissingEdgeWeight`] and
    /// [`AggregateError::InvalidEdgeWeight`] in weighted mode, and
    /// [`AggregateError::Graph`] when the graph rejects a lookup or reports a
    /// neighbour outside its node range.
    pub fn run<G: Graph + Sync>(&self, graph: &G, degrees: &[f64]) -> Result<NeighbourDegrees> {
        let nodes = graph.node_count();
        self.run_with_len(graph, degrees, nodes)
    }

    /// Computes unweighted degrees in this aggregator's direction, then runs
    /// the aggregation with them.
    ///
    /// Edge weights, when configured, weight the mean but do not contribute
    /// to the neighbour degrees themselves.
    ///
    /// # Errors
    /// Returns the errors of [`crate::compute_degrees`] and [`Self::run`].
    pub fn run_with_computed_degrees<G: Graph + Sync>(
        &self,
        graph: &G,
    ) -> Result<NeighbourDegrees> {
        let degrees = self.install(|| compute_degrees(graph, self.direction, None))?;
        self.run(graph, &degrees)
    }

    #[instrument(
        name = "core.aggregate",
        err,
        skip(self, graph, degrees),
        fields(
            graph = %graph.name(),
            nodes = nodes,
            direction = %self.direction,
            weighted = self.weight_property.is_some(),
            schedule = ?self.schedule
        ),
    )]
    fn run_with_len<G: Graph + Sync>(
        &self,
        graph: &G,
        degrees: &[f64],
        nodes: usize,
    ) -> Result<NeighbourDegrees> {
        if degrees.len() != nodes {
            return Err(AggregateError::ShapeMismatch {
                graph: Arc::from(graph.name()),
                expected: nodes,
                actual: degrees.len(),
            });
        }
        validate_degrees(degrees)?;

        if nodes == 0 {
            debug!(graph = graph.name(), "graph is empty, returning empty result");
            return Ok(NeighbourDegrees::default());
        }

        #[cfg(feature = "metrics")]
        let started = Instant::now();

        let mut values = vec![0.0_f64; nodes];
        self.install(|| self.fill(graph, degrees, &mut values))?;

        #[cfg(feature = "metrics")]
        record_run_metrics(nodes, started);

        info!(nodes, "aggregation completed");
        Ok(NeighbourDegrees::from_values(values))
    }

    fn fill<G: Graph + Sync>(&self, graph: &G, degrees: &[f64], out: &mut [f64]) -> Result<()> {
        let direction = self.direction;
        let weight_property = self.weight_property.as_deref();
        let reduce = |node: usize, slot: &mut f64| -> Result<()> {
            *slot = node_average(graph, node, direction, degrees, weight_property)?;
            Ok(())
        };

        match self.schedule {
            Schedule::WorkStealing => out
                .par_iter_mut()
                .enumerate()
                .try_for_each(|(node, slot)| reduce(node, slot)),
            Schedule::Static { partitions } => {
                let block = out.len().div_ceil(partitions.max(1)).max(1);
                out.par_chunks_mut(block)
                    .enumerate()
                    .try_for_each(|(index, chunk)| {
                        let first = index * block;
                        chunk
                            .iter_mut()
                            .enumerate()
                            .try_for_each(|(offset, slot)| reduce(first + offset, slot))
                    })
            }
            Schedule::Sequential => out
                .iter_mut()
                .enumerate()
                .try_for_each(|(node, slot)| reduce(node, slot)),
        }
    }

    /// Runs `op` on the dedicated pool when one is configured.
    pub(crate) fn install<R, F>(&self, op: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

fn validate_degrees(degrees: &[f64]) -> Result<()> {
    match degrees
        .iter()
        .enumerate()
        .find(|(_, value)| !value.is_finite() || **value < 0.0)
    {
        Some((node, &value)) => Err(AggregateError::InvalidDegree { node, value }),
        None => Ok(()),
    }
}

#[cfg(feature = "metrics")]
fn record_run_metrics(nodes: usize, started: Instant) {
    metrics::counter!("avgdeg_nodes_processed_total")
        .increment(u64::try_from(nodes).unwrap_or(u64::MAX));
    metrics::histogram!("avgdeg_aggregate_duration_seconds")
        .record(started.elapsed().as_secs_f64());
}

#[cfg(test)]
mod property;
