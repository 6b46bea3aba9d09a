//! Compressed sparse row storage indexed in both directions.
//!
//! Edge ids are positions in the input edge sequence. For each direction an
//! offset array of length `nodes + 1` delimits, per node, a run of edge ids
//! in an index array; runs keep input order so traversal is deterministic.

use std::collections::BTreeMap;
use std::ops::Range;

use avgdeg_core::{Direction, EdgeRef, Graph, GraphError};

use crate::errors::EdgeListError;

/// Largest supported node count.
///
/// Offsets are allocated per node in both directions, so ids are capped
/// before anything is allocated.
pub const MAX_NODES: usize = 1 << 28;

/// Offsets and edge ids for one traversal direction.
#[derive(Debug, Clone, Default)]
struct Adjacency {
    offsets: Vec<usize>,
    edges: Vec<usize>,
}

impl Adjacency {
    /// Counting sort of edge ids by `keys[edge]`.
    fn group_by(keys: &[usize], nodes: usize) -> Self {
        let mut offsets = vec![0_usize; nodes + 1];
        for &key in keys {
            offsets[key + 1] += 1;
        }
        for node in 0..nodes {
            offsets[node + 1] += offsets[node];
        }
        let mut cursor = offsets[..nodes].to_vec();
        let mut edges = vec![0_usize; keys.len()];
        for (edge, &key) in keys.iter().enumerate() {
            edges[cursor[key]] = edge;
            cursor[key] += 1;
        }
        Self { offsets, edges }
    }

    fn range(&self, node: usize) -> Range<usize> {
        self.offsets[node]..self.offsets[node + 1]
    }
}

/// Immutable directed graph with named, optional per-edge values.
///
/// # Examples
/// ```
/// use avgdeg_core::{Direction, Graph};
/// use avgdeg_providers_edgelist::CsrGraph;
///
/// let graph = CsrGraph::from_edges("demo", None, [(0, 1), (0, 2), (1, 2)])?
///     .with_edge_property("weight", vec![Some(2.0), Some(1.0), None])?;
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.neighbour_count(2, Direction::Incoming)?, 2);
/// assert_eq!(graph.edge_weight(0, "weight")?, Some(2.0));
/// assert_eq!(graph.edge_weight(2, "weight")?, None);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct CsrGraph {
    name: String,
    nodes: usize,
    sources: Vec<usize>,
    targets: Vec<usize>,
    outgoing: Adjacency,
    incoming: Adjacency,
    properties: BTreeMap<String, Vec<Option<f64>>>,
}

impl CsrGraph {
    /// Builds a graph from `(source, target)` pairs.
    ///
    /// With `node_count` absent the graph has `max id + 1` nodes; a declared
    /// count may add isolated trailing nodes but must cover every endpoint.
    ///
    /// # Errors
    /// Returns [`EdgeListError::EndpointOutOfBounds`] when an endpoint is not
    /// below the declared node count and [`EdgeListError::NodeLimitExceeded`]
    /// when the graph would need more than [`MAX_NODES`] nodes.
    pub fn from_edges(
        name: impl Into<String>,
        node_count: Option<usize>,
        edges: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, EdgeListError> {
        let (sources, targets): (Vec<usize>, Vec<usize>) = edges.into_iter().unzip();
        let nodes = match node_count {
            Some(nodes) => {
                check_node_limit(nodes)?;
                check_endpoints(&sources, &targets, nodes)?;
                nodes
            }
            None => {
                let nodes = sources
                    .iter()
                    .chain(&targets)
                    .max()
                    .map_or(0, |&max| max.saturating_add(1));
                check_node_limit(nodes)?;
                nodes
            }
        };
        Ok(Self {
            name: name.into(),
            nodes,
            outgoing: Adjacency::group_by(&sources, nodes),
            incoming: Adjacency::group_by(&targets, nodes),
            sources,
            targets,
            properties: BTreeMap::new(),
        })
    }

    /// Attaches a named edge property with one optional value per edge id.
    ///
    /// # Errors
    /// Returns [`EdgeListError::DuplicateProperty`] when `name` is already
    /// attached and [`EdgeListError::PropertyLengthMismatch`] when `values`
    /// does not have one entry per edge.
    pub fn with_edge_property(
        mut self,
        name: impl Into<String>,
        values: Vec<Option<f64>>,
    ) -> Result<Self, EdgeListError> {
        let name = name.into();
        if values.len() != self.edge_count() {
            return Err(EdgeListError::PropertyLengthMismatch {
                name,
                expected: self.edge_count(),
                actual: values.len(),
            });
        }
        if self.properties.contains_key(&name) {
            return Err(EdgeListError::DuplicateProperty { name });
        }
        self.properties.insert(name, values);
        Ok(self)
    }

    /// Returns the number of edges.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.sources.len()
    }

    /// Returns the `(source, target)` pair of `edge`, if it exists.
    #[must_use]
    pub fn endpoints(&self, edge: usize) -> Option<(usize, usize)> {
        Some((*self.sources.get(edge)?, *self.targets.get(edge)?))
    }

    /// Returns the attached property names in sorted order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    fn side(&self, direction: Direction) -> (&Adjacency, &[usize]) {
        match direction {
            Direction::Outgoing => (&self.outgoing, &self.targets),
            Direction::Incoming => (&self.incoming, &self.sources),
        }
    }

    fn check_node(&self, node: usize) -> Result<(), GraphError> {
        if node < self.nodes {
            Ok(())
        } else {
            Err(GraphError::NodeOutOfBounds {
                node,
                nodes: self.nodes,
            })
        }
    }
}

const fn check_node_limit(nodes: usize) -> Result<(), EdgeListError> {
    if nodes > MAX_NODES {
        return Err(EdgeListError::NodeLimitExceeded {
            nodes,
            limit: MAX_NODES,
        });
    }
    Ok(())
}

fn check_endpoints(sources: &[usize], targets: &[usize], nodes: usize) -> Result<(), EdgeListError> {
    for (edge, (&src, &dst)) in sources.iter().zip(targets).enumerate() {
        if let Some(node) = [src, dst].into_iter().find(|&node| node >= nodes) {
            return Err(EdgeListError::EndpointOutOfBounds { edge, node, nodes });
        }
    }
    Ok(())
}

impl Graph for CsrGraph {
    fn name(&self) -> &str {
        &self.name
    }

    fn node_count(&self) -> usize {
        self.nodes
    }

    fn edges(
        &self,
        node: usize,
        direction: Direction,
    ) -> Result<impl Iterator<Item = EdgeRef> + '_, GraphError> {
        self.check_node(node)?;
        let (adjacency, ends) = self.side(direction);
        Ok(adjacency.edges[adjacency.range(node)]
            .iter()
            .map(move |&edge| EdgeRef::new(edge, ends[edge])))
    }

    fn edge_weight(&self, edge: usize, property: &str) -> Result<Option<f64>, GraphError> {
        if edge >= self.edge_count() {
            return Err(GraphError::EdgeOutOfBounds {
                edge,
                edges: self.edge_count(),
            });
        }
        Ok(self
            .properties
            .get(property)
            .and_then(|values| values[edge]))
    }

    fn neighbour_count(&self, node: usize, direction: Direction) -> Result<usize, GraphError> {
        self.check_node(node)?;
        Ok(self.side(direction).0.range(node).len())
    }
}
