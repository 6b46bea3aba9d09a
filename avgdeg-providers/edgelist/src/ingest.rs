//! Plain-text edge-list ingestion.
//!
//! Format: one edge per line as `src dst [value ...]`, whitespace separated.
//! Blank lines and lines starting with `#` or `%` are skipped. The first
//! remaining line is a header when its first token is not an integer; header
//! names after the first two become edge property names. Without a header a
//! single value column is named [`DEFAULT_WEIGHT_PROPERTY`]. A value of `-`
//! leaves that edge without the property.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::{
    errors::EdgeListError,
    graph::{CsrGraph, MAX_NODES},
};

/// Property name given to the value column of a headerless three-column
/// edge list.
pub const DEFAULT_WEIGHT_PROPERTY: &str = "weight";

const MISSING_VALUE: &str = "-";

/// Loader settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeListOptions {
    node_count: Option<usize>,
}

impl EdgeListOptions {
    /// Options that infer the node count from the largest id.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the node count, which allows isolated trailing nodes.
    #[must_use]
    pub const fn with_node_count(mut self, nodes: usize) -> Self {
        self.node_count = Some(nodes);
        self
    }

    /// Returns the declared node count, if any.
    #[must_use]
    pub const fn node_count(&self) -> Option<usize> {
        self.node_count
    }
}

impl CsrGraph {
    /// Reads an edge list from `path`.
    ///
    /// # Errors
    /// Returns [`EdgeListError::Io`] when the file cannot be read and any
    /// error documented on [`CsrGraph::try_from_reader`].
    pub fn try_from_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
        options: EdgeListOptions,
    ) -> Result<Self, EdgeListError> {
        let file = File::open(path)?;
        Self::try_from_reader(name, BufReader::new(file), options)
    }

    /// Reads an edge list from any buffered reader.
    ///
    /// # Examples
    /// ```
    /// use avgdeg_core::Graph;
    /// use avgdeg_providers_edgelist::{CsrGraph, EdgeListOptions};
    ///
    /// let text = "# src dst weight\n0 1 2.0\n0 2 1\n1 2 -\n";
    /// let graph = CsrGraph::try_from_reader("demo", text.as_bytes(), EdgeListOptions::new())?;
    /// assert_eq!(graph.node_count(), 3);
    /// assert_eq!(graph.edge_weight(0, "weight")?, Some(2.0));
    /// assert_eq!(graph.edge_weight(2, "weight")?, None);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    ///
    /// # Errors
    /// Returns an [`EdgeListError`] naming the offending line for malformed
    /// rows or ids at or beyond [`crate::MAX_NODES`],
    /// [`EdgeListError::NodeCountTooSmall`] when a declared node count does
    /// not cover every id, and [`EdgeListError::NodeLimitExceeded`] when it
    /// exceeds the limit.
    pub fn try_from_reader(
        name: impl Into<String>,
        reader: impl BufRead,
        options: EdgeListOptions,
    ) -> Result<Self, EdgeListError> {
        let mut parsed = ParsedEdgeList::default();
        for (index, line) in reader.lines().enumerate() {
            parsed.push_line(index + 1, &line?)?;
        }
        parsed.into_graph(name, options)
    }
}

#[derive(Debug, Default)]
struct ParsedEdgeList {
    properties: Option<Vec<String>>,
    edges: Vec<(usize, usize)>,
    values: Vec<Vec<Option<f64>>>,
}

impl ParsedEdgeList {
    fn push_line(&mut self, line: usize, text: &str) -> Result<(), EdgeListError> {
        let text = text.trim();
        if text.is_empty() || text.starts_with('#') || text.starts_with('%') {
            return Ok(());
        }
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.len() < 2 {
            return Err(EdgeListError::MissingColumn { line });
        }
        if self.properties.is_none() {
            let is_header = tokens[0].parse::<i64>().is_err();
            let properties = if is_header {
                header_properties(&tokens[2..])?
            } else {
                inferred_properties(line, tokens.len())?
            };
            self.values = vec![Vec::new(); properties.len()];
            self.properties = Some(properties);
            if is_header {
                return Ok(());
            }
        }
        let properties = self.properties.as_deref().unwrap_or_default();

        let expected = properties.len() + 2;
        if tokens.len() != expected {
            return Err(EdgeListError::ColumnCountMismatch {
                line,
                expected,
                actual: tokens.len(),
            });
        }
        let src = parse_node(line, tokens[0])?;
        let dst = parse_node(line, tokens[1])?;
        let columns = properties.iter().zip(&mut self.values);
        for ((property, column), token) in columns.zip(&tokens[2..]) {
            column.push(parse_value(line, property, token)?);
        }
        self.edges.push((src, dst));
        Ok(())
    }

    fn into_graph(
        self,
        name: impl Into<String>,
        options: EdgeListOptions,
    ) -> Result<CsrGraph, EdgeListError> {
        let required = self
            .edges
            .iter()
            .map(|&(src, dst)| src.max(dst).saturating_add(1))
            .max()
            .unwrap_or(0);
        let nodes = match options.node_count() {
            Some(declared) if declared < required => {
                return Err(EdgeListError::NodeCountTooSmall { declared, required });
            }
            Some(declared) => declared,
            None => required,
        };
        let graph = CsrGraph::from_edges(name, Some(nodes), self.edges)?;
        self.properties
            .unwrap_or_default()
            .into_iter()
            .zip(self.values)
            .try_fold(graph, |graph, (property, values)| {
                graph.with_edge_property(property, values)
            })
    }
}

fn header_properties(names: &[&str]) -> Result<Vec<String>, EdgeListError> {
    let mut properties: Vec<String> = Vec::with_capacity(names.len());
    for &name in names {
        if properties.iter().any(|existing| existing == name) {
            return Err(EdgeListError::DuplicateProperty {
                name: name.to_owned(),
            });
        }
        properties.push(name.to_owned());
    }
    Ok(properties)
}

fn inferred_properties(line: usize, columns: usize) -> Result<Vec<String>, EdgeListError> {
    match columns {
        2 => Ok(Vec::new()),
        3 => Ok(vec![DEFAULT_WEIGHT_PROPERTY.to_owned()]),
        _ => Err(EdgeListError::UnnamedProperties { line, columns }),
    }
}

fn parse_node(line: usize, token: &str) -> Result<usize, EdgeListError> {
    let id: usize = token.parse().map_err(|_| EdgeListError::InvalidNodeId {
        line,
        token: token.to_owned(),
    })?;
    if id >= MAX_NODES {
        return Err(EdgeListError::NodeIdTooLarge {
            line,
            token: token.to_owned(),
        });
    }
    Ok(id)
}

fn parse_value(line: usize, property: &str, token: &str) -> Result<Option<f64>, EdgeListError> {
    if token == MISSING_VALUE {
        return Ok(None);
    }
    token
        .parse()
        .map(Some)
        .map_err(|_| EdgeListError::InvalidValue {
            line,
            property: property.to_owned(),
            token: token.to_owned(),
        })
}
