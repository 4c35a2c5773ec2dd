//! # FLINT Bits
//!
//! Branchless bit and bitfield primitives over `u32` and `u64`:
//!
//! - Single-bit test/set with no conditional jump on the data path
//! - Bit-range extract/replace (`bextr` on x86_64 targets compiled with
//!   BMI1, shift+mask everywhere else)
//! - Bounds-safe lookup-table membership for signed inputs
//!
//! ## Contract
//!
//! These are hot-path primitives and, with one exception, they do **not**
//! validate. A bit position or range outside `[0, width)` yields an
//! unspecified (but memory-safe, panic-free) result: every shift amount is
//! masked to the word width, so misuse wraps instead of crashing. The
//! exception is [`bits32::has_lookup_flag`] / [`bits64::has_lookup_flag`],
//! whose out-of-domain inputs are *defined* to be non-members.
//!
//! ## Example
//!
//! ```rust
//! use flint_bits::bits32;
//!
//! let packed = bits32::set_range(0, 4, 3, 0b101);
//! assert_eq!(bits32::extract_range(packed, 4, 3), 0b101);
//! assert!(bits32::has_flag(packed, 4));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod bits32;
pub mod bits64;
