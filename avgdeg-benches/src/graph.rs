//! Synthetic graphs with a heavy-tailed out-degree distribution.
//!
//! Node `i` (0-based) receives roughly `mean_degree * (1 - skew) *
//! (n / (i + 1))^skew` outgoing edges to uniformly chosen targets, so low ids
//! act as hubs. For `skew` in `[0, 1)` the mean out-degree stays close to
//! `mean_degree` while the largest lists grow as `n^skew`, which is the shape
//! that separates work-stealing from static partitioning.

use avgdeg_providers_edgelist::CsrGraph;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::error::BenchSetupError;

/// Edge property holding the generated weights.
pub const WEIGHT_PROPERTY: &str = "weight";

/// Configuration for [`generate_power_law`].
#[derive(Clone, Debug)]
pub struct PowerLawConfig {
    /// Number of nodes.
    pub node_count: usize,
    /// Target mean out-degree.
    pub mean_degree: usize,
    /// Skew exponent in `[0, 1)`; zero gives every node the same out-degree.
    pub skew: f64,
    /// Seed for target and weight sampling.
    pub seed: u64,
}

/// Generates a directed graph whose edges all carry a [`WEIGHT_PROPERTY`]
/// value in `[0.5, 2.0)`.
///
/// # Errors
/// Returns [`BenchSetupError::ZeroValue`] for a zero node count or mean
/// degree and [`BenchSetupError::InvalidFloatParameter`] when `skew` is not
/// in `[0, 1)`.
pub fn generate_power_law(config: &PowerLawConfig) -> Result<CsrGraph, BenchSetupError> {
    validate(config)?;
    let nodes = config.node_count;
    let mut rng = SmallRng::seed_from_u64(config.seed);

    let mut edges = Vec::new();
    for node in 0..nodes {
        let degree = out_degree(config, node);
        edges.extend((0..degree).map(|_| (node, rng.gen_range(0..nodes))));
    }
    let weights = edges
        .iter()
        .map(|_| Some(rng.gen_range(0.5..2.0)))
        .collect();

    let graph = CsrGraph::from_edges(format!("power-law-{nodes}"), Some(nodes), edges)?
        .with_edge_property(WEIGHT_PROPERTY, weights)?;
    Ok(graph)
}

const fn validate_counts(config: &PowerLawConfig) -> Result<(), BenchSetupError> {
    if config.node_count == 0 {
        return Err(BenchSetupError::ZeroValue {
            context: "node_count",
        });
    }
    if config.mean_degree == 0 {
        return Err(BenchSetupError::ZeroValue {
            context: "mean_degree",
        });
    }
    Ok(())
}

fn validate(config: &PowerLawConfig) -> Result<(), BenchSetupError> {
    validate_counts(config)?;
    if !config.skew.is_finite() || !(0.0..1.0).contains(&config.skew) {
        return Err(BenchSetupError::InvalidFloatParameter { parameter: "skew" });
    }
    Ok(())
}

#[expect(
    clippy::cast_precision_loss,
    reason = "node counts are far below 2^52 in benchmarks"
)]
#[expect(
    clippy::float_arithmetic,
    reason = "degree targets follow a continuous power law"
)]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the rounded target is non-negative and clamped to the node count"
)]
fn out_degree(config: &PowerLawConfig, node: usize) -> usize {
    let rank = (node + 1) as f64;
    let spread = (config.node_count as f64 / rank).powf(config.skew);
    let target = config.mean_degree as f64 * (1.0 - config.skew) * spread;
    (target.round() as usize).clamp(1, config.node_count)
}
