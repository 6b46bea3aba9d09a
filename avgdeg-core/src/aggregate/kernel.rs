//! Per-node reduction shared by the aggregator and the degree step.
//!
//! Every function here runs inside a single task and touches only one
//! node's adjacency, so results never depend on scheduling.

use std::sync::Arc;

use crate::{
    Result,
    direction::Direction,
    error::{AggregateError, GraphError},
    graph::{EdgeRef, Graph},
};

/// Average degree of `node`'s neighbours.
///
/// Unweighted mode divides by the neighbour count; weighted mode divides by
/// the sum of edge weights. An empty neighbour list, or a weight sum that is
/// not positive, yields `0.0`.
pub(crate) fn node_average<G: Graph>(
    graph: &G,
    node: usize,
    direction: Direction,
    degrees: &[f64],
    weight_property: Option<&str>,
) -> Result<f64> {
    let edges = graph
        .edges(node, direction)
        .map_err(|error| graph_failure(graph, error))?;

    let Some(property) = weight_property else {
        let mut sum = 0.0_f64;
        let mut count = 0_usize;
        for edge in edges {
            sum += neighbour_degree(graph, degrees, edge)?;
            count += 1;
        }
        return Ok(if count == 0 { 0.0 } else { sum / count as f64 });
    };

    let mut sum = 0.0_f64;
    let mut weight_sum = 0.0_f64;
    for edge in edges {
        let weight = edge_weight(graph, node, edge, property)?;
        sum += neighbour_degree(graph, degrees, edge)? * weight;
        weight_sum += weight;
    }
    Ok(if weight_sum > 0.0 {
        sum / weight_sum
    } else {
        0.0
    })
}

/// Degree of `node`: its edge count, or the sum of its edge weights.
pub(crate) fn node_degree<G: Graph>(
    graph: &G,
    node: usize,
    direction: Direction,
    weight_property: Option<&str>,
) -> Result<f64> {
    let Some(property) = weight_property else {
        let count = graph
            .neighbour_count(node, direction)
            .map_err(|error| graph_failure(graph, error))?;
        return Ok(count as f64);
    };

    let edges = graph
        .edges(node, direction)
        .map_err(|error| graph_failure(graph, error))?;
    let mut total = 0.0_f64;
    for edge in edges {
        total += edge_weight(graph, node, edge, property)?;
    }
    Ok(total)
}

fn neighbour_degree<G: Graph>(graph: &G, degrees: &[f64], edge: EdgeRef) -> Result<f64> {
    degrees.get(edge.dst()).copied().ok_or_else(|| {
        graph_failure(
            graph,
            GraphError::NodeOutOfBounds {
                node: edge.dst(),
                nodes: degrees.len(),
            },
        )
    })
}

fn edge_weight<G: Graph>(graph: &G, node: usize, edge: EdgeRef, property: &str) -> Result<f64> {
    let value = graph
        .edge_weight(edge.id(), property)
        .map_err(|error| graph_failure(graph, error))?;
    match value {
        Some(weight) if weight.is_finite() => Ok(weight),
        Some(weight) => Err(AggregateError::InvalidEdgeWeight {
            edge: edge.id(),
            property: Arc::from(property),
            value: weight,
        }),
        None => Err(AggregateError::MissingEdgeWeight {
            graph: Arc::from(graph.name()),
            edge: edge.id(),
            node,
            neighbour: edge.dst(),
            property: Arc::from(property),
        }),
    }
}

pub(crate) fn graph_failure<G: Graph>(graph: &G, error: GraphError) -> AggregateError {
    AggregateError::Graph {
        graph: Arc::from(graph.name()),
        error,
    }
}
