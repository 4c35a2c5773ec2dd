//! # FLINT Parallel
//!
//! Synchronous parallel loops over 1-D ranges, 2-D rectangles, flat
//! slices, and row-major grids. The iteration domain is partitioned into
//! contiguous batches (exact cover — no index skipped or duplicated),
//! batches fan out over scoped worker threads, and the caller blocks until
//! every batch is done. Small domains skip the threads entirely.
//!
//! ## What this is not
//!
//! No async, no futures, no cancellation, no work stealing. These loops
//! are built for short-lived CPU-bound work where predictable batch shape
//! beats scheduler cleverness. If you need cancellation, wrap the call.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::atomic::{AtomicU64, Ordering};
//!
//! let histogram: Vec<AtomicU64> = (0..16).map(|_| AtomicU64::new(0)).collect();
//! let samples: Vec<u8> = (0u32..10_000).map(|i| (i % 16) as u8).collect();
//!
//! flint_parallel::for_slice(&samples, 64, |_, sample| {
//!     histogram[*sample as usize].fetch_add(1, Ordering::Relaxed);
//! })
//! .unwrap();
//!
//! assert!(histogram.iter().all(|b| b.load(Ordering::Relaxed) == 625));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

mod error;
mod loops;
mod plan;

pub use error::{ParallelError, ParallelResult};
pub use loops::{for_grid, for_range, for_rect, for_slice};
