//! # FLINT
//!
//! Hot-path primitives extracted from the engine's UI and image-processing
//! internals, kept free of any UI concept so they stand alone:
//!
//! - [`bits`] — branchless bit/bitfield operations on `u32`/`u64`
//! - [`hash`] — SIMD-accelerated 32-bit content hashing
//! - [`parallel`] — exact-cover batch partitioning for synchronous
//!   parallel loops
//!
//! The three are independent; this crate only bundles them.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::atomic::{AtomicU32, Ordering};
//!
//! // Pack a couple of option flags, guard a parallel fill, hash it.
//! let options = flint::bits::bits32::set_flag(0, 3, true);
//!
//! let cells: Vec<AtomicU32> = (0..256).map(|_| AtomicU32::new(0)).collect();
//! if flint::bits::bits32::has_flag(options, 3) {
//!     flint::parallel::for_range(0, 256, 16, |i| {
//!         cells[i as usize].store(i as u32 * 31, Ordering::Relaxed);
//!     })
//!     .unwrap();
//! }
//!
//! let snapshot: Vec<u32> = cells.iter().map(|c| c.load(Ordering::Relaxed)).collect();
//! let fingerprint = flint::hash::combine(&snapshot);
//! assert_eq!(fingerprint, flint::hash::combine(&snapshot));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub use flint_bits as bits;
pub use flint_hash as hash;
pub use flint_parallel as parallel;
