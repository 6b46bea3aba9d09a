//! Edge direction selection.

use std::{fmt, str::FromStr};

use crate::error::AggregateError;

/// Selects which adjacency of a node is traversed.
///
/// The same direction must have been used to compute the degree array the
/// aggregator consumes; the aggregator does not recompute degrees.
///
/// # Examples
/// ```
/// use avgdeg_core::Direction;
///
/// let direction: Direction = "in".parse()?;
/// assert_eq!(direction, Direction::Incoming);
/// assert_eq!(direction.reversed(), Direction::Outgoing);
/// assert!("sideways".parse::<Direction>().is_err());
/// # Ok::<(), avgdeg_core::AggregateError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Follow edges that point at the node.
    Incoming,
    /// Follow edges that leave the node.
    #[default]
    Outgoing,
}

impl Direction {
    /// Returns the canonical lower-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Incoming => "incoming",
            Self::Outgoing => "outgoing",
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Incoming => Self::Outgoing,
            Self::Outgoing => Self::Incoming,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = AggregateError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "in" | "incoming" => Ok(Self::Incoming),
            "out" | "outgoing" => Ok(Self::Outgoing),
            other => Err(AggregateError::invalid_configuration(format!(
                "unsupported direction `{other}`; expected `in` or `out`"
            ))),
        }
    }
}
