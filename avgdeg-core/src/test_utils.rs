//! Shared test utilities for `avgdeg-core`.

use std::sync::atomic::{AtomicUsize, Ordering};

use avgdeg_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::{
    direction::Direction,
    error::GraphError,
    graph::{EdgeRef, Graph},
};

/// Builds a standard proptest configuration from the shared CI profile.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Edge-list [`Graph`] that records how often each node's adjacency is
/// requested.
///
/// Edge ids are positions in the edge list. The only weight property is
/// `"weight"`; edges without a configured weight report `None`.
#[derive(Debug)]
pub(crate) struct CountingGraph {
    nodes: usize,
    edges: Vec<(usize, usize)>,
    weights: Vec<Option<f64>>,
    weight_lookup_limit: Option<usize>,
    calls: Vec<AtomicUsize>,
}

impl CountingGraph {
    /// Creates an unweighted graph with `nodes` nodes.
    #[must_use]
    pub(crate) fn new(nodes: usize, edges: Vec<(usize, usize)>) -> Self {
        Self {
            nodes,
            edges,
            weights: Vec::new(),
            weight_lookup_limit: None,
            calls: (0..nodes).map(|_| AtomicUsize::new(0)).collect(),
        }
    }

    /// Attaches per-edge `"weight"` values, index-aligned with the edge list.
    #[must_use]
    pub(crate) fn with_weights(mut self, weights: Vec<Option<f64>>) -> Self {
        self.weights = weights;
        self
    }

    /// Makes weight lookups for edge ids at or beyond `limit` fail.
    #[must_use]
    pub(crate) fn with_weight_lookup_limit(mut self, limit: usize) -> Self {
        self.weight_lookup_limit = Some(limit);
        self
    }

    /// Returns how many times `edges` was called for `node`.
    #[must_use]
    pub(crate) fn calls(&self, node: usize) -> usize {
        self.calls
            .get(node)
            .map_or(0, |count| count.load(Ordering::Relaxed))
    }

    /// Clears the per-node call counters.
    pub(crate) fn reset_calls(&self) {
        for count in &self.calls {
            count.store(0, Ordering::Relaxed);
        }
    }
}

impl Graph for CountingGraph {
    fn name(&self) -> &str {
        "counting"
    }

    fn node_count(&self) -> usize {
        self.nodes
    }

    fn edges(
        &self,
        node: usize,
        direction: Direction,
    ) -> Result<impl Iterator<Item = EdgeRef> + '_, GraphError> {
        let count = self.calls.get(node).ok_or(GraphError::NodeOutOfBounds {
            node,
            nodes: self.nodes,
        })?;
        count.fetch_add(1, Ordering::Relaxed);
        Ok(self
            .edges
            .iter()
            .enumerate()
            .filter_map(move |(id, &(src, dst))| match direction {
                Direction::Outgoing if src == node => Some(EdgeRef::new(id, dst)),
                Direction::Incoming if dst == node => Some(EdgeRef::new(id, src)),
                _ => None,
            }))
    }

    fn edge_weight(&self, edge: usize, property: &str) -> Result<Option<f64>, GraphError> {
        let limit = self.weight_lookup_limit.unwrap_or(self.edges.len());
        if edge >= limit {
            return Err(GraphError::EdgeOutOfBounds { edge, edges: limit });
        }
        if property != "weight" {
            return Ok(None);
        }
        Ok(self.weights.get(edge).copied().flatten())
    }
}
