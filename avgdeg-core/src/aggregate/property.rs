//! Property suites for the aggregator.
//!
//! Random graphs are reduced under every schedule; results must agree
//! bit-for-bit and honour the zero, constant-degree, and uniform-weight
//! rules.

use proptest::prelude::*;

use crate::{
    AggregatorBuilder, Direction, NeighbourDegrees, Schedule, compute_degrees,
    test_utils::{CountingGraph, suite_proptest_config},
};

#[derive(Clone, Debug)]
struct GraphFixture {
    nodes: usize,
    edges: Vec<(usize, usize)>,
}

impl GraphFixture {
    fn graph(&self) -> CountingGraph {
        CountingGraph::new(self.nodes, self.edges.clone())
    }

    fn has_neighbours(&self, node: usize, direction: Direction) -> bool {
        self.edges.iter().any(|&(src, dst)| match direction {
            Direction::Outgoing => src == node,
            Direction::Incoming => dst == node,
        })
    }
}

fn graph_fixture() -> impl Strategy<Value = GraphFixture> {
    (0_usize..40).prop_flat_map(|nodes| {
        let edges = if nodes == 0 {
            Just(Vec::new()).boxed()
        } else {
            prop::collection::vec((0..nodes, 0..nodes), 0..(nodes * 4)).boxed()
        };
        edges.prop_map(move |edges| GraphFixture { nodes, edges })
    })
}

fn weighted_fixture() -> impl Strategy<Value = (GraphFixture, Vec<f64>)> {
    graph_fixture().prop_flat_map(|fixture| {
        let edges = fixture.edges.len();
        (Just(fixture), prop::collection::vec(0.01_f64..100.0, edges))
    })
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Outgoing), Just(Direction::Incoming)]
}

fn run(
    graph: &CountingGraph,
    builder: AggregatorBuilder,
    degrees: &[f64],
) -> Result<NeighbourDegrees, TestCaseError> {
    let aggregator = builder
        .build()
        .map_err(|err| TestCaseError::fail(format!("build failed: {err}")))?;
    aggregator
        .run(graph, degrees)
        .map_err(|err| TestCaseError::fail(format!("run failed: {err}")))
}

fn bits(result: &NeighbourDegrees) -> Vec<u64> {
    result.values().iter().map(|value| value.to_bits()).collect()
}

proptest! {
    #![proptest_config(suite_proptest_config(64))]

    #[test]
    fn schedules_agree_bit_for_bit(
        fixture in graph_fixture(),
        direction in direction(),
        partitions in 1_usize..16,
    ) {
        let graph = fixture.graph();
        let degrees = compute_degrees(&graph, direction, None)
            .map_err(|err| TestCaseError::fail(format!("degrees failed: {err}")))?;
        let base = AggregatorBuilder::new().with_direction(direction);

        let stealing = run(&graph, base.clone(), &degrees)?;
        let partitioned = run(
            &graph,
            base.clone().with_schedule(Schedule::Static { partitions }),
            &degrees,
        )?;
        let sequential = run(&graph, base.clone().with_schedule(Schedule::Sequential), &degrees)?;
        let pooled = run(&graph, base.with_threads(2), &degrees)?;

        prop_assert_eq!(stealing.len(), fixture.nodes);
        prop_assert_eq!(bits(&stealing), bits(&partitioned));
        prop_assert_eq!(bits(&stealing), bits(&sequential));
        prop_assert_eq!(bits(&stealing), bits(&pooled));
    }

    #[test]
    fn weighted_schedules_agree_bit_for_bit(
        (fixture, weights) in weighted_fixture(),
        direction in direction(),
        partitions in 1_usize..16,
    ) {
        let graph = fixture
            .graph()
            .with_weights(weights.into_iter().map(Some).collect());
        let degrees = compute_degrees(&graph, direction, Some("weight"))
            .map_err(|err| TestCaseError::fail(format!("degrees failed: {err}")))?;
        let base = AggregatorBuilder::new()
            .with_direction(direction)
            .with_weight_property("weight");

        let stealing = run(&graph, base.clone(), &degrees)?;
        let partitioned = run(
            &graph,
            base.clone().with_schedule(Schedule::Static { partitions }),
            &degrees,
        )?;
        let sequential = run(&graph, base.clone().with_schedule(Schedule::Sequential), &degrees)?;
        let pooled = run(&graph, base.with_threads(2), &degrees)?;

        prop_assert_eq!(stealing.len(), fixture.nodes);
        prop_assert!(stealing.values().iter().all(|value| value.is_finite()));
        prop_assert_eq!(bits(&stealing), bits(&partitioned));
        prop_assert_eq!(bits(&stealing), bits(&sequential));
        prop_assert_eq!(bits(&stealing), bits(&pooled));
    }

    #[test]
    fn isolated_nodes_are_zero_and_values_are_finite(
        fixture in graph_fixture(),
        direction in direction(),
    ) {
        let graph = fixture.graph();
        let degrees = compute_degrees(&graph, direction, None)
            .map_err(|err| TestCaseError::fail(format!("degrees failed: {err}")))?;
        let result = run(&graph, AggregatorBuilder::new().with_direction(direction), &degrees)?;
        for (node, value) in result.iter() {
            prop_assert!(value.is_finite(), "node {} produced {}", node, value);
            if !fixture.has_neighbours(node, direction) {
                prop_assert_eq!(value, 0.0);
            }
        }
    }

    #[test]
    fn constant_neighbour_degree_is_reproduced(
        fixture in graph_fixture(),
        direction in direction(),
        degree in 0_u32..1_000,
    ) {
        let degrees = vec![f64::from(degree); fixture.nodes];
        let result = run(
            &fixture.graph(),
            AggregatorBuilder::new().with_direction(direction),
            &degrees,
        )?;
        for (node, value) in result.iter() {
            let expected = if fixture.has_neighbours(node, direction) {
                f64::from(degree)
            } else {
                0.0
            };
            prop_assert_eq!(value, expected, "node {}", node);
        }
    }

    #[test]
    fn uniform_weights_cancel(
        fixture in graph_fixture(),
        direction in direction(),
        exponent in -4_i32..5,
    ) {
        let weight = 2.0_f64.powi(exponent);
        let graph = fixture
            .graph()
            .with_weights(vec![Some(weight); fixture.edges.len()]);
        let degrees = compute_degrees(&graph, direction, None)
            .map_err(|err| TestCaseError::fail(format!("degrees failed: {err}")))?;

        let plain = AggregatorBuilder::new()
            .with_direction(direction)
            .build()
            .and_then(|aggregator| aggregator.run(&graph, &degrees))
            .map_err(|err| TestCaseError::fail(format!("unweighted run failed: {err}")))?;
        let weighted = AggregatorBuilder::new()
            .with_direction(direction)
            .with_weight_property("weight")
            .build()
            .and_then(|aggregator| aggregator.run(&graph, &degrees))
            .map_err(|err| TestCaseError::fail(format!("weighted run failed: {err}")))?;

        prop_assert_eq!(bits(&plain), bits(&weighted));
    }
}
