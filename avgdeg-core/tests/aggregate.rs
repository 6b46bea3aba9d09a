//! Tests for the public aggregation API.

mod common;

use avgdeg_core::{
    AggregateError, AggregatorBuilder, Direction, Graph, Schedule, average_neighbour_degree,
    compute_degrees,
};
use common::ListGraph;
use rstest::{fixture, rstest};
use tracing_subscriber::layer::SubscriberExt;

use avgdeg_test_support::tracing::RecordingLayer;

#[fixture]
fn weighted_triangle() -> ListGraph {
    ListGraph::new(
        3,
        vec![(0, 1, Some(2.0)), (0, 2, Some(1.0)), (1, 2, Some(1.0))],
    )
}

/// Hub-and-spoke graph where one hub reaches many leaves and every leaf
/// points back at the hub.
fn skewed_graph(leaves: usize) -> ListGraph {
    let mut edges = Vec::with_capacity(leaves * 2 + 1);
    for leaf in 1..=leaves {
        edges.push((0, leaf, None));
        edges.push((leaf, 0, None));
    }
    edges.push((1, 2, None));
    ListGraph::new(leaves + 2, edges)
}

fn reference(graph: &ListGraph, direction: Direction, degrees: &[f64]) -> Vec<f64> {
    (0..graph.node_count())
        .map(|node| {
            let neighbours: Vec<usize> = graph
                .edges(node, direction)
                .expect("node is in range")
                .map(|edge| edge.dst())
                .collect();
            if neighbours.is_empty() {
                return 0.0;
            }
            let sum: f64 = neighbours.iter().map(|&dst| degrees[dst]).sum();
            sum / neighbours.len() as f64
        })
        .collect()
}

#[rstest]
fn concrete_scenarios(weighted_triangle: ListGraph) {
    let degrees = [2.0, 1.0, 1.0];
    let plain = average_neighbour_degree(&weighted_triangle, Direction::Outgoing, &degrees, None)
        .expect("unweighted run must succeed");
    assert_eq!(plain.values(), [1.0, 1.0, 0.0]);

    let weighted = average_neighbour_degree(
        &weighted_triangle,
        Direction::Outgoing,
        &degrees,
        Some("weight"),
    )
    .expect("weighted run must succeed");
    assert_eq!(weighted.get(0), Some(1.0));
}

#[rstest]
#[case::work_stealing(Schedule::WorkStealing)]
#[case::static_blocks(Schedule::Static { partitions: 7 })]
#[case::sequential(Schedule::Sequential)]
fn skewed_graph_matches_reference(#[case] schedule: Schedule) {
    let graph = skewed_graph(500);
    for direction in [Direction::Outgoing, Direction::Incoming] {
        let degrees = compute_degrees(&graph, direction, None).expect("degrees must compute");
        let aggregator = AggregatorBuilder::new()
            .with_direction(direction)
            .with_schedule(schedule)
            .build()
            .expect("configuration must be valid");
        let result = aggregator.run(&graph, &degrees).expect("run must succeed");
        assert_eq!(result.values(), reference(&graph, direction, &degrees).as_slice());
        assert_eq!(result.get(graph.node_count() - 1), Some(0.0));
    }
}

#[rstest]
fn star_leaves_report_hub_degree() {
    let graph = skewed_graph(10);
    let aggregator = AggregatorBuilder::new()
        .build()
        .expect("configuration must be valid");
    let result = aggregator
        .run_with_computed_degrees(&graph)
        .expect("run must succeed");
    for leaf in 3..=10 {
        assert_eq!(result.get(leaf), Some(10.0), "leaf {leaf}");
    }
}

#[rstest]
fn missing_weight_names_the_visiting_node() {
    let graph = ListGraph::new(3, vec![(0, 1, Some(1.0)), (1, 2, None)]);
    let err = average_neighbour_degree(
        &graph,
        Direction::Outgoing,
        &[1.0, 1.0, 0.0],
        Some("weight"),
    )
    .expect_err("node 1 visits the unweighted edge");
    assert!(matches!(
        err,
        AggregateError::MissingEdgeWeight {
            edge: 1,
            node: 1,
            neighbour: 2,
            ..
        }
    ));
}

#[rstest]
fn degree_step_records_tracing(weighted_triangle: ListGraph) {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let degrees = tracing::subscriber::with_default(subscriber, || {
        compute_degrees(&weighted_triangle, Direction::Incoming, Some("weight"))
    })
    .expect("degrees must compute");
    assert_eq!(degrees, vec![0.0, 2.0, 2.0]);

    let spans = layer.spans();
    let span = spans
        .iter()
        .find(|span| span.name == "core.degrees")
        .expect("core.degrees span must exist");
    assert_eq!(span.fields.get("graph"), Some(&"list".to_owned()));
    assert_eq!(span.fields.get("weighted"), Some(&"true".to_owned()));
}
