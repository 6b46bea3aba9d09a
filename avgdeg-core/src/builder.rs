//! Builder utilities for configuring aggregation runs.
//!
//! Exposes the scheduling surface and the validation performed before an
//! [`Aggregator`] is constructed.

use std::{num::NonZeroUsize, sync::Arc};

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::{Result, aggregate::Aggregator, direction::Direction, error::AggregateError};

/// Controls how node ids are distributed across workers.
///
/// Every schedule produces bit-identical results because each node is
/// reduced sequentially inside a single task; schedules only differ in load
/// balance.
///
/// # Examples
/// ```
/// use avgdeg_core::Schedule;
///
/// assert_eq!(Schedule::default(), Schedule::WorkStealing);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Schedule {
    /// One task per node; idle workers steal pending nodes from busy ones.
    /// Suited to power-law graphs where neighbour lists vary widely.
    #[default]
    WorkStealing,
    /// Split the node range into `partitions` contiguous blocks, each reduced
    /// by a single task.
    Static {
        /// Number of contiguous blocks. Must be non-zero.
        partitions: usize,
    },
    /// Reduce every node on the calling thread.
    Sequential,
}

/// Configures and constructs [`Aggregator`] instances.
///
/// # Examples
/// ```
/// use avgdeg_core::{AggregatorBuilder, Direction, Schedule};
///
/// let aggregator = AggregatorBuilder::new()
///     .with_direction(Direction::Incoming)
///     .with_weight_property("weight")
///     .with_schedule(Schedule::Static { partitions: 4 })
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(aggregator.direction(), Direction::Incoming);
/// assert_eq!(aggregator.weight_property(), Some("weight"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct AggregatorBuilder {
    direction: Direction,
    weight_property: Option<String>,
    schedule: Schedule,
    threads: Option<usize>,
}

impl AggregatorBuilder {
    /// Creates a builder for an unweighted, outgoing, work-stealing run on
    /// the global worker pool.
    ///
    /// # Examples
    /// ```
    /// use avgdeg_core::{AggregatorBuilder, Direction, Schedule};
    ///
    /// let builder = AggregatorBuilder::new();
    /// assert_eq!(builder.direction(), Direction::Outgoing);
    /// assert_eq!(builder.weight_property(), None);
    /// assert_eq!(builder.schedule(), Schedule::WorkStealing);
    /// assert_eq!(builder.threads(), None);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects which adjacency is traversed.
    #[must_use]
    pub const fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Returns the configured direction.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Enables weighted mode using the named edge property.
    ///
    /// # Examples
    /// ```
    /// use avgdeg_core::AggregatorBuilder;
    ///
    /// let builder = AggregatorBuilder::new().with_weight_property("capacity");
    /// assert_eq!(builder.weight_property(), Some("capacity"));
    /// ```
    #[must_use]
    pub fn with_weight_property(mut self, property: impl Into<String>) -> Self {
        self.weight_property = Some(property.into());
        self
    }

    /// Returns to unweighted mode.
    #[must_use]
    pub fn without_weight_property(mut self) -> Self {
        self.weight_property = None;
        self
    }

    /// Returns the configured weight property, if any.
    #[must_use]
    pub fn weight_property(&self) -> Option<&str> {
        self.weight_property.as_deref()
    }

    /// Sets the scheduling strategy.
    #[must_use]
    pub const fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Returns the configured scheduling strategy.
    #[must_use]
    pub const fn schedule(&self) -> Schedule {
        self.schedule
    }

    /// Runs on a dedicated pool of `threads` workers instead of the global
    /// pool.
    #[must_use]
    pub const fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Returns the requested dedicated worker count, if any.
    #[must_use]
    pub const fn threads(&self) -> Option<usize> {
        self.threads
    }

    /// Validates the configuration and constructs an [`Aggregator`].
    ///
    /// # Errors
    /// Returns [`AggregateError::InvalidConfiguration`] for a blank weight
    /// property, zero static partitions, zero threads, or a thread count
    /// combined with [`Schedule::Sequential`]. Returns
    /// [`AggregateError::ThreadPool`] when the dedicated pool cannot be
    /// created.
    ///
    /// # Examples
    /// ```
    /// use avgdeg_core::{AggregateError, AggregatorBuilder};
    ///
    /// let err = AggregatorBuilder::new()
    ///     .with_threads(0)
    ///     .build()
    ///     .expect_err("zero threads is rejected");
    /// assert!(matches!(err, AggregateError::InvalidConfiguration { .. }));
    /// ```
    pub fn build(self) -> Result<Aggregator> {
        let weight_property = match self.weight_property {
            Some(property) if property.trim().is_empty() => {
                return Err(AggregateError::invalid_configuration(
                    "weight property name must not be blank",
                ));
            }
            Some(property) => Some(Arc::from(property)),
            None => None,
        };

        if let Schedule::Static { partitions: 0 } = self.schedule {
            return Err(AggregateError::invalid_configuration(
                "static schedule requires at least one partition",
            ));
        }

        let pool = match self.threads {
            None => None,
            Some(_) if self.schedule == Schedule::Sequential => {
                return Err(AggregateError::invalid_configuration(
                    "a worker thread count cannot be combined with the sequential schedule",
                ));
            }
            Some(requested) => {
                let threads = NonZeroUsize::new(requested).ok_or_else(|| {
                    AggregateError::invalid_configuration("worker thread count must be at least 1")
                })?;
                Some(Arc::new(build_pool(threads)?))
            }
        };

        Ok(Aggregator::new(
            self.direction,
            weight_property,
            self.schedule,
            pool,
        ))
    }
}

fn build_pool(threads: NonZeroUsize) -> Result<ThreadPool> {
    ThreadPoolBuilder::new()
        .num_threads(threads.get())
        .thread_name(|index| format!("avgdeg-worker-{index}"))
        .build()
        .map_err(|error| AggregateError::ThreadPool {
            message: Arc::from(error.to_string()),
        })
}
