//! Errors returned while configuring or running a clustering.

use thiserror::Error;

use crate::clustering::ItemId;

/// Errors returned by the clustering runs in this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// No items were given to cluster.
    #[error("empty input")]
    EmptyInput,

    /// Two input items share the same id.
    #[error("duplicate item id {0}")]
    DuplicateItem(ItemId),

    /// An item has a NaN or infinite coordinate.
    #[error("item {0} has a non-finite coordinate")]
    NonFiniteItem(ItemId),

    /// A centroid-based algorithm was configured without any seed.
    #[error("at least one cluster seed is required")]
    NoSeeds,

    /// A medoid seed refers to an item that is not part of the input.
    #[error("seed {0} does not refer to any input item")]
    UnknownSeed(ItemId),

    /// The same item was given twice as a medoid seed.
    #[error("seed {0} was given more than once")]
    DuplicateSeed(ItemId),

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// `compute` was called on a run that already has a history.
    #[error("clustering has already been computed; construct a new run")]
    AlreadyComputed,

    /// The configured iteration cap was reached before convergence.
    #[error("no convergence after {limit} iterations")]
    IterationLimit {
        /// The configured maximum number of iterations.
        limit: usize,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
