//! Core library for computing per-node average neighbour degree.
//!
//! A [`Graph`] collaborator exposes topology, a degree array supplies each
//! node's precomputed degree, and an [`Aggregator`] reduces every node's
//! neighbour list independently and in parallel into [`NeighbourDegrees`].
#![cfg_attr(docsrs, feature(doc_cfg))]

mod aggregate;
mod builder;
mod degree;
mod direction;
mod error;
mod graph;
mod result;

#[cfg(test)]
mod test_utils;

pub use crate::{
    aggregate::{Aggregator, average_neighbour_degree},
    builder::{AggregatorBuilder, Schedule},
    degree::compute_degrees,
    direction::Direction,
    error::{AggregateError, AggregateErrorCode, GraphError, GraphErrorCode, Result},
    graph::{EdgeRef, Graph},
    result::NeighbourDegrees,
};
