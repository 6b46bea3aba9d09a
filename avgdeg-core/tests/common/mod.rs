use avgdeg_core::{Direction, EdgeRef, Graph, GraphError};

/// Adjacency-list graph with optional per-edge weights.
///
/// Edge ids are positions in the edge list passed to [`ListGraph::new`].
#[derive(Clone, Debug)]
pub struct ListGraph {
    nodes: usize,
    edges: Vec<(usize, usize, Option<f64>)>,
    outgoing: Vec<Vec<usize>>,
    incoming: Vec<Vec<usize>>,
}

impl ListGraph {
    #[must_use]
    pub fn new(nodes: usize, edges: Vec<(usize, usize, Option<f64>)>) -> Self {
        let mut outgoing = vec![Vec::new(); nodes];
        let mut incoming = vec![Vec::new(); nodes];
        for (id, &(src, dst, _)) in edges.iter().enumerate() {
            outgoing[src].push(id);
            incoming[dst].push(id);
        }
        Self {
            nodes,
            edges,
            outgoing,
            incoming,
        }
    }

    #[must_use]
    pub fn unweighted(nodes: usize, edges: &[(usize, usize)]) -> Self {
        Self::new(
            nodes,
            edges.iter().map(|&(src, dst)| (src, dst, None)).collect(),
        )
    }
}

impl Graph for ListGraph {
    fn name(&self) -> &str {
        "list"
    }

    fn node_count(&self) -> usize {
        self.nodes
    }

    fn edges(
        &self,
        node: usize,
        direction: Direction,
    ) -> Result<impl Iterator<Item = EdgeRef> + '_, GraphError> {
        let adjacency = match direction {
            Direction::Outgoing => &self.outgoing,
            Direction::Incoming => &self.incoming,
        };
        let ids = adjacency.get(node).ok_or(GraphError::NodeOutOfBounds {
            node,
            nodes: self.nodes,
        })?;
        Ok(ids.iter().map(move |&id| {
            let (src, dst, _) = self.edges[id];
            match direction {
                Direction::Outgoing => EdgeRef::new(id, dst),
                Direction::Incoming => EdgeRef::new(id, src),
            }
        }))
    }

    fn edge_weight(&self, edge: usize, property: &str) -> Result<Option<f64>, GraphError> {
        let (_, _, weight) = self.edges.get(edge).ok_or(GraphError::EdgeOutOfBounds {
            edge,
            edges: self.edges.len(),
        })?;
        Ok(if property == "weight" { *weight } else { None })
    }

    fn neighbour_count(&self, node: usize, direction: Direction) -> Result<usize, GraphError> {
        let adjacency = match direction {
            Direction::Outgoing => &self.outgoing,
            Direction::Incoming => &self.incoming,
        };
        adjacency
            .get(node)
            .map(Vec::len)
            .ok_or(GraphError::NodeOutOfBounds {
                node,
                nodes: self.nodes,
            })
    }
}
