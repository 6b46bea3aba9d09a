//! Argument parsing and command execution for `avgdeg`.
//!
//! `run` loads an edge list and reports each node's average neighbour
//! degree; `degrees` reports the per-node degree array instead.

mod commands;

pub use commands::{
    Cli, CliError, Command, DegreesCommand, ExecutionSummary, GraphArgs, Metric, RunCommand,
    ScheduleArg, render_summary, run_cli,
};
