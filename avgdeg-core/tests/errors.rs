use std::sync::Arc;

use avgdeg_core::{AggregateError, AggregateErrorCode, GraphError, GraphErrorCode};
use rstest::rstest;

#[rstest]
#[case(GraphError::NodeOutOfBounds { node: 4, nodes: 3 }, GraphErrorCode::NodeOutOfBounds)]
#[case(GraphError::EdgeOutOfBounds { edge: 9, edges: 2 }, GraphErrorCode::EdgeOutOfBounds)]
fn returns_expected_graph_code(#[case] error: GraphError, #[case] expected: GraphErrorCode) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), expected.as_str());
}

#[rstest]
#[case(
    AggregateError::ShapeMismatch { graph: Arc::from("g"), expected: 3, actual: 2 },
    AggregateErrorCode::ShapeMismatch,
    None,
)]
#[case(
    AggregateError::InvalidDegree { node: 0, value: -1.0 },
    AggregateErrorCode::InvalidDegree,
    None,
)]
#[case(
    AggregateError::MissingEdgeWeight {
        graph: Arc::from("g"),
        edge: 1,
        node: 0,
        neighbour: 2,
        property: Arc::from("weight"),
    },
    AggregateErrorCode::MissingEdgeWeight,
    None,
)]
#[case(
    AggregateError::InvalidEdgeWeight {
        edge: 1,
        property: Arc::from("weight"),
        value: f64::NAN,
    },
    AggregateErrorCode::InvalidEdgeWeight,
    None,
)]
#[case(
    AggregateError::InvalidConfiguration { reason: Arc::from("bad") },
    AggregateErrorCode::InvalidConfiguration,
    None,
)]
#[case(
    AggregateError::ThreadPool { message: Arc::from("no threads") },
    AggregateErrorCode::ThreadPool,
    None,
)]
#[case(
    AggregateError::Graph {
        graph: Arc::from("g"),
        error: GraphError::NodeOutOfBounds { node: 7, nodes: 3 },
    },
    AggregateErrorCode::GraphFailure,
    Some(GraphErrorCode::NodeOutOfBounds),
)]
fn returns_expected_aggregate_code(
    #[case] error: AggregateError,
    #[case] expected: AggregateErrorCode,
    #[case] graph_code: Option<GraphErrorCode>,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), expected.as_str());
    assert_eq!(error.graph_code(), graph_code);
}

#[rstest]
fn codes_are_stable_strings() {
    assert_eq!(
        AggregateErrorCode::ShapeMismatch.to_string(),
        "AVGDEG_SHAPE_MISMATCH"
    );
    assert_eq!(
        AggregateErrorCode::MissingEdgeWeight.as_str(),
        "AVGDEG_MISSING_EDGE_WEIGHT"
    );
    assert_eq!(
        AggregateErrorCode::InvalidConfiguration.as_str(),
        "AVGDEG_INVALID_CONFIGURATION"
    );
    assert_eq!(
        GraphErrorCode::EdgeOutOfBounds.as_str(),
        "GRAPH_EDGE_OUT_OF_BOUNDS"
    );
}

#[rstest]
fn missing_weight_message_names_the_edge() {
    let error = AggregateError::MissingEdgeWeight {
        graph: Arc::from("roads"),
        edge: 12,
        node: 3,
        neighbour: 8,
        property: Arc::from("length"),
    };
    let message = error.to_string();
    assert!(message.contains("edge 12"), "{message}");
    assert!(message.contains("`length`"), "{message}");
    assert!(message.contains("`roads`"), "{message}");
}
