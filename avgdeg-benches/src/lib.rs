//! Benchmark support crate for avgdeg.
//!
//! Generates synthetic graphs with skewed degree distributions and names the
//! parameter combinations the Criterion benches sweep over.

pub mod error;
pub mod graph;
pub mod params;
