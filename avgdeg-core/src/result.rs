//! Result type for aggregation runs.

/// Dense, node-indexed output of an [`crate::Aggregator`] run.
///
/// Entry `i` holds the average neighbour degree of node `i`. Nodes without
/// neighbours in the selected direction hold `0.0`.
///
/// # Examples
/// ```
/// use avgdeg_core::NeighbourDegrees;
///
/// let result = NeighbourDegrees::from_values(vec![1.0, 0.5]);
/// assert_eq!(result.len(), 2);
/// assert_eq!(result.get(1), Some(0.5));
/// assert_eq!(result.get(2), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NeighbourDegrees {
    values: Vec<f64>,
}

impl NeighbourDegrees {
    /// Wraps a dense array of per-node values.
    #[must_use]
    pub const fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Returns the per-node values in node-id order.
    #[must_use]
    pub const fn values(&self) -> &[f64] {
        self.values.as_slice()
    }

    /// Returns the value for `node`, if it exists.
    #[must_use]
    pub fn get(&self, node: usize) -> Option<f64> {
        self.values.get(node).copied()
    }

    /// Returns the number of nodes covered by the result.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether the result covers no nodes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(node, value)` pairs in node-id order.
    ///
    /// # Examples
    /// ```
    /// use avgdeg_core::NeighbourDegrees;
    ///
    /// let result = NeighbourDegrees::from_values(vec![2.0, 0.0]);
    /// let pairs: Vec<_> = result.iter().collect();
    /// assert_eq!(pairs, [(0, 2.0), (1, 0.0)]);
    /// ```
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values.iter().copied().enumerate()
    }

    /// Consumes the result and returns the underlying array.
    #[must_use]
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

impl From<NeighbourDegrees> for Vec<f64> {
    fn from(result: NeighbourDegrees) -> Self {
        result.into_values()
    }
}
