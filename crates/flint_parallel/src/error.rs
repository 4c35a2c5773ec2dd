//! # Partitioner Error Types
//!
//! Every error here is a precondition violation, detected at the entry of
//! the call before any work begins — a loop is never left partially
//! executed. Note that argument validation precedes the empty-domain
//! short-circuit: an invalid throttle on an empty range is still an error,
//! not a no-op.

use thiserror::Error;

/// Errors that can occur when partitioning an iteration domain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParallelError {
    /// The per-thread work throttle must be positive.
    #[error("min_actions_per_thread must be positive")]
    InvalidMinActions,

    /// A 1-D range with `start > end`.
    #[error("inverted range: start {start} > end {end}")]
    InvertedRange {
        /// Inclusive lower bound of the range.
        start: i64,
        /// Exclusive upper bound of the range.
        end: i64,
    },

    /// A 2-D rectangle with `top > bottom` or `left > right`.
    #[error("inverted rect: rows [{top}, {bottom}), cols [{left}, {right})")]
    InvertedRect {
        /// Inclusive top row bound.
        top: i64,
        /// Exclusive bottom row bound.
        bottom: i64,
        /// Inclusive left column bound.
        left: i64,
        /// Exclusive right column bound.
        right: i64,
    },

    /// A 2-D buffer view whose declared shape does not match its length.
    #[error("grid shape mismatch: {rows} x {cols} != buffer length {len}")]
    ShapeMismatch {
        /// Declared row count.
        rows: usize,
        /// Declared column count.
        cols: usize,
        /// Actual buffer length.
        len: usize,
    },
}

/// Result type for all partitioner entry points.
pub type ParallelResult<T> = Result<T, ParallelError>;
