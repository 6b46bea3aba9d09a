//! Benchmark parameter types.

use std::fmt;

use avgdeg_core::Schedule;

/// Parameters for one aggregation benchmark run.
#[derive(Clone, Debug)]
pub struct AggregateBenchParams {
    /// Number of nodes in the synthetic graph.
    pub node_count: usize,
    /// Scheduling strategy under test.
    pub schedule: Schedule,
    /// Whether the run weights the mean by an edge property.
    pub weighted: bool,
}

impl fmt::Display for AggregateBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let schedule = match self.schedule {
            Schedule::WorkStealing => "stealing".to_owned(),
            Schedule::Static { partitions } => format!("static{partitions}"),
            Schedule::Sequential => "sequential".to_owned(),
        };
        let mode = if self.weighted { "weighted" } else { "plain" };
        write!(f, "n={},{schedule},{mode}", self.node_count)
    }
}

/// Parameters for a degree computation benchmark run.
#[derive(Clone, Debug)]
pub struct DegreeBenchParams {
    /// Number of nodes in the synthetic graph.
    pub node_count: usize,
}

impl fmt::Display for DegreeBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}", self.node_count)
    }
}
