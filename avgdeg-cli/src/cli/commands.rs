//! Command implementations and argument parsing for the avgdeg CLI.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use avgdeg_core::{
    AggregateError, AggregatorBuilder, Direction, Graph, Schedule, compute_degrees,
};
use avgdeg_providers_edgelist::{CsrGraph, EdgeListError, EdgeListOptions};
use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "avgdeg",
    about = "Compute the average neighbour degree of every node in a graph."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Report each node's average neighbour degree.
    Run(RunCommand),
    /// Report each node's in- or out-degree.
    Degrees(DegreesCommand),
}

/// Graph loading arguments shared by every command.
#[derive(Debug, Args, Clone)]
pub struct GraphArgs {
    /// Path to a whitespace-separated edge list.
    pub path: PathBuf,

    /// Declared node count; must cover every id in the file.
    #[arg(long)]
    pub nodes: Option<usize>,

    /// Override name for the graph (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Edge list to load.
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Edge direction to follow: `in`, `incoming`, `out` or `outgoing`.
    #[arg(long, default_value = "outgoing")]
    pub direction: String,

    /// Edge property used to weight the mean.
    #[arg(long)]
    pub weight: Option<String>,

    /// How node work is scheduled across threads.
    #[arg(long, value_enum, default_value_t = ScheduleArg::WorkStealing)]
    pub schedule: ScheduleArg,

    /// Partition count for `--schedule static` (defaults to the available
    /// parallelism).
    #[arg(long)]
    pub partitions: Option<usize>,

    /// Run on a dedicated pool with this many threads.
    #[arg(long)]
    pub threads: Option<usize>,
}

/// Options accepted by the `degrees` command.
#[derive(Debug, Args, Clone)]
pub struct DegreesCommand {
    /// Edge list to load.
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Edge direction to count: `in`, `incoming`, `out` or `outgoing`.
    #[arg(long, default_value = "outgoing")]
    pub direction: String,

    /// Edge property to sum instead of counting edges.
    #[arg(long)]
    pub weight: Option<String>,
}

/// Scheduling strategies selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScheduleArg {
    /// Dynamic load balancing across the pool.
    WorkStealing,
    /// Fixed contiguous blocks of nodes.
    Static,
    /// Single-threaded reference run.
    Sequential,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while opening the edge list.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The edge list could not be parsed.
    #[error("failed to load `{path}`: {source}")]
    EdgeList {
        /// Path of the rejected edge list.
        path: PathBuf,
        /// Parser failure.
        #[source]
        source: EdgeListError,
    },
    /// Configuration or aggregation failed.
    #[error(transparent)]
    Core(#[from] AggregateError),
}

/// Which per-node value a summary holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Output of `run`.
    AverageNeighbourDegree,
    /// Output of `degrees`.
    Degree,
}

impl Metric {
    /// Label printed in the summary header.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AverageNeighbourDegree => "average-neighbour-degree",
            Self::Degree => "degree",
        }
    }
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionSummary {
    /// Name of the loaded graph.
    pub graph: String,
    /// Direction the values were computed for.
    pub direction: Direction,
    /// Kind of value in `values`.
    pub metric: Metric,
    /// One value per node, indexed by node id.
    pub values: Vec<f64>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading, configuration or computation fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use avgdeg_cli::cli::{Cli, Command, GraphArgs, RunCommand, ScheduleArg, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "0 1\n0 2\n1 2\n")?;
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         graph: GraphArgs {
///             path: file.path().to_path_buf(),
///             nodes: None,
///             name: Some("triangle".into()),
///         },
///         direction: "out".into(),
///         weight: None,
///         schedule: ScheduleArg::Sequential,
///         partitions: None,
///         threads: None,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.values, vec![0.5, 0.0, 0.0]);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Run(run) => {
            span.record("command", field::display("run"));
            run_command(run)
        }
        Command::Degrees(degrees) => {
            span.record("command", field::display("degrees"));
            degrees_command(degrees)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(
        direction = field::Empty,
        weight = field::Empty,
        schedule = field::Empty,
        threads = field::Empty,
    ),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let RunCommand {
        graph: graph_args,
        direction,
        weight,
        schedule,
        partitions,
        threads,
    } = command;
    let direction: Direction = direction.parse()?;
    let span = Span::current();
    span.record("direction", field::display(direction));
    span.record(
        "weight",
        field::display(weight.as_deref().unwrap_or("<none>")),
    );
    span.record("schedule", field::debug(schedule));
    if let Some(threads) = threads {
        span.record("threads", threads);
    }

    let mut builder = AggregatorBuilder::new()
        .with_direction(direction)
        .with_schedule(resolve_schedule(schedule, partitions)?);
    if let Some(weight) = weight {
        builder = builder.with_weight_property(weight);
    }
    if let Some(threads) = threads {
        builder = builder.with_threads(threads);
    }
    let aggregator = builder.build()?;

    let graph = load_graph(&graph_args)?;
    let result = aggregator.run_with_computed_degrees(&graph)?;
    info!(graph = graph.name(), nodes = result.len(), "command completed");
    Ok(ExecutionSummary {
        graph: graph.name().to_owned(),
        direction,
        metric: Metric::AverageNeighbourDegree,
        values: result.into_values(),
    })
}

#[instrument(
    name = "cli.degrees",
    err,
    skip(command),
    fields(direction = field::Empty, weight = field::Empty),
)]
pub(super) fn degrees_command(command: DegreesCommand) -> Result<ExecutionSummary, CliError> {
    let DegreesCommand {
        graph: graph_args,
        direction,
        weight,
    } = command;
    let direction: Direction = direction.parse()?;
    let span = Span::current();
    span.record("direction", field::display(direction));
    span.record(
        "weight",
        field::display(weight.as_deref().unwrap_or("<none>")),
    );

    let graph = load_graph(&graph_args)?;
    let values = compute_degrees(&graph, direction, weight.as_deref())?;
    info!(graph = graph.name(), nodes = values.len(), "command completed");
    Ok(ExecutionSummary {
        graph: graph.name().to_owned(),
        direction,
        metric: Metric::Degree,
        values,
    })
}

/// Maps the CLI schedule flags onto a core [`Schedule`].
pub(super) fn resolve_schedule(
    schedule: ScheduleArg,
    partitions: Option<usize>,
) -> Result<Schedule, CliError> {
    match (schedule, partitions) {
        (ScheduleArg::Static, Some(partitions)) => Ok(Schedule::Static { partitions }),
        (ScheduleArg::Static, None) => Ok(Schedule::Static {
            partitions: std::thread::available_parallelism().map_or(1, NonZeroUsize::get),
        }),
        (_, Some(_)) => Err(AggregateError::InvalidConfiguration {
            reason: Arc::from("--partitions only applies to --schedule static"),
        }
        .into()),
        (ScheduleArg::WorkStealing, None) => Ok(Schedule::WorkStealing),
        (ScheduleArg::Sequential, None) => Ok(Schedule::Sequential),
    }
}

#[instrument(
    name = "cli.load_graph",
    err,
    skip(args),
    fields(path = field::Empty, nodes = field::Empty, override_name = field::Empty),
)]
pub(super) fn load_graph(args: &GraphArgs) -> Result<CsrGraph, CliError> {
    let span = Span::current();
    span.record("path", field::display(args.path.display()));
    span.record(
        "override_name",
        field::display(args.name.as_deref().unwrap_or("<derived>")),
    );
    let mut options = EdgeListOptions::new();
    if let Some(nodes) = args.nodes {
        options = options.with_node_count(nodes);
    }
    let name = derive_graph_name(&args.path, args.name.as_deref());
    let reader = open_reader(&args.path)?;
    let graph =
        CsrGraph::try_from_reader(name, reader, options).map_err(|source| CliError::EdgeList {
            path: args.path.clone(),
            source,
        })?;
    span.record("nodes", graph.node_count());
    info!(
        graph = graph.name(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "edge list loaded"
    );
    Ok(graph)
}

#[instrument(name = "cli.open_reader", err, fields(path = field::Empty))]
pub(super) fn open_reader(path: &Path) -> Result<BufReader<File>, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

pub(super) fn derive_graph_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| "graph".to_owned())
}

/// Renders `summary` to `writer` as a short header followed by one
/// `node<TAB>value` line per node.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use avgdeg_cli::cli::{ExecutionSummary, Metric, render_summary};
/// # use avgdeg_core::Direction;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     graph: "demo".into(),
///     direction: Direction::Outgoing,
///     metric: Metric::AverageNeighbourDegree,
///     values: vec![1.0, 0.5],
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// let text = String::from_utf8(buffer)?;
/// assert!(text.ends_with("0\t1\n1\t0.5\n"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "graph: {}", summary.graph)?;
    writeln!(writer, "direction: {}", summary.direction)?;
    writeln!(writer, "metric: {}", summary.metric.as_str())?;
    writeln!(writer, "nodes: {}", summary.values.len())?;
    for (node, value) in summary.values.iter().enumerate() {
        writeln!(writer, "{node}\t{value}")?;
    }
    Ok(())
}
