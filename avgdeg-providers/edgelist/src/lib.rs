//! Edge-list provider: an immutable CSR graph implementing [`avgdeg_core::Graph`]
//! and a loader for whitespace-separated edge-list text.

mod errors;
mod graph;
mod ingest;

pub use errors::EdgeListError;
pub use graph::{CsrGraph, MAX_NODES};
pub use ingest::{DEFAULT_WEIGHT_PROPERTY, EdgeListOptions};
