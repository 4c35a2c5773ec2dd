//! # FLINT Hash
//!
//! A 32-bit content hash for in-memory structural equality checks:
//! `accumulator = accumulator * 397 XOR chunk` over the byte stream,
//! finalized with an avalanche mixer.
//!
//! ## Paths
//!
//! The block stage is SIMD-accelerated where the CPU allows (AVX2, SSE4.1,
//! NEON) and falls back to a scalar reference path everywhere else. The
//! block shape is fixed — eight `u32` lane accumulators fed by 32-byte
//! blocks — so **every path produces bit-identical results for the same
//! bytes**. That equivalence is the central correctness property of this
//! crate and is regression-tested level-by-level.
//!
//! ## Stability
//!
//! The output is deterministic within a process run and nothing more. It is
//! NOT a content-addressing hash: the exact bit pattern (multiplier 397,
//! the drain cascade, the mixer constants) is an internal implementation
//! constant and may change between versions. Never persist these values.
//!
//! ## Example
//!
//! ```rust
//! let a = flint_hash::combine(&[1u32, 2, 3, 4]);
//! let b = flint_hash::combine(&[1u32, 2, 3, 4]);
//! let c = flint_hash::combine(&[1u32, 2, 3, 5]);
//! assert_eq!(a, b);
//! assert_ne!(a, c);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use bytemuck::NoUninit;

mod scalar;

#[cfg(target_arch = "aarch64")]
mod neon;
#[cfg(target_arch = "x86_64")]
mod x86;

/// The multiply step of the recurrence. Inherited constant; matched by the
/// test vectors, promised to nobody else.
pub(crate) const PRIME: u32 = 397;

/// Lane accumulators in the block stage (256 logical bits / 32 per lane).
pub(crate) const LANES: usize = 8;

/// Bytes consumed per block: [`LANES`] little-endian `u32` words.
pub(crate) const BLOCK_BYTES: usize = LANES * 4;

/// Block-stage implementation: folds every 32-byte block of `blocks` (whose
/// length is a multiple of [`BLOCK_BYTES`]) into the lane accumulators.
type BlockFn = fn(&mut [u32; LANES], &[u8]);

// ---------------------------------------------------------------------------
// Capability detection
// ---------------------------------------------------------------------------

/// SIMD capability level used for the block stage.
///
/// Every level computes the identical lane recurrence; the level only
/// decides how many lanes advance per instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimdLevel {
    /// Portable scalar path — the reference implementation.
    Scalar,
    /// x86_64 SSE4.1 (two 128-bit lane groups per block).
    #[cfg(target_arch = "x86_64")]
    Sse41,
    /// x86_64 AVX2 (one 256-bit register per block).
    #[cfg(target_arch = "x86_64")]
    Avx2,
    /// aarch64 NEON (two 128-bit lane groups per block).
    #[cfg(target_arch = "aarch64")]
    Neon,
}

/// Probes the CPU once and returns the best available level.
fn detect_level() -> SimdLevel {
    #[cfg(target_arch = "x86_64")]
    {
        if std::arch::is_x86_feature_detected!("avx2") {
            return SimdLevel::Avx2;
        }
        if std::arch::is_x86_feature_detected!("sse4.1") {
            return SimdLevel::Sse41;
        }
    }
    #[cfg(target_arch = "aarch64")]
    {
        if std::arch::is_aarch64_feature_detected!("neon") {
            return SimdLevel::Neon;
        }
    }
    SimdLevel::Scalar
}

/// Returns whether `level` can actually run on this CPU.
fn level_available(level: SimdLevel) -> bool {
    match level {
        SimdLevel::Scalar => true,
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Sse41 => std::arch::is_x86_feature_detected!("sse4.1"),
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Avx2 => std::arch::is_x86_feature_detected!("avx2"),
        #[cfg(target_arch = "aarch64")]
        SimdLevel::Neon => std::arch::is_aarch64_feature_detected!("neon"),
    }
}

/// Resolves the block-stage function for a level the CPU supports.
fn resolve_block_fn(level: SimdLevel) -> BlockFn {
    match level {
        SimdLevel::Scalar => scalar::hash_blocks,
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Sse41 => x86::hash_blocks_sse41,
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Avx2 => x86::hash_blocks_avx2,
        #[cfg(target_arch = "aarch64")]
        SimdLevel::Neon => neon::hash_blocks_neon,
    }
}

// ---------------------------------------------------------------------------
// Hasher
// ---------------------------------------------------------------------------

/// A content hasher bound to one SIMD capability level.
///
/// The level is probed once at construction and resolved to a direct
/// function pointer — no per-call dispatch in the hot loop. For the common
/// case use the free functions ([`combine`], [`combine_bytes`]), which
/// share one process-global hasher.
#[derive(Clone, Copy)]
pub struct ContentHasher {
    level: SimdLevel,
    block_fn: BlockFn,
}

impl std::fmt::Debug for ContentHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentHasher")
            .field("level", &self.level)
            .finish()
    }
}

impl ContentHasher {
    /// Creates a hasher on the best level this CPU supports.
    #[must_use]
    pub fn new() -> Self {
        Self::with_level(detect_level())
    }

    /// Creates a hasher forced to `level`.
    ///
    /// If the CPU does not support `level`, the hasher silently falls back
    /// to [`SimdLevel::Scalar`] — results are identical either way, only
    /// throughput differs. Intended for the path-equivalence tests and for
    /// benchmarking individual paths.
    #[must_use]
    pub fn with_level(level: SimdLevel) -> Self {
        let level = if level_available(level) {
            level
        } else {
            SimdLevel::Scalar
        };
        Self {
            level,
            block_fn: resolve_block_fn(level),
        }
    }

    /// Returns the level this hasher runs at.
    #[must_use]
    pub const fn level(&self) -> SimdLevel {
        self.level
    }

    /// Hashes a typed slice by reinterpreting it as bytes.
    ///
    /// `T: NoUninit` is the compile-time gate for the reinterpretation: no
    /// padding, no references, every byte initialized. Types that cannot
    /// satisfy it go through [`combine_hashes`] instead.
    #[must_use]
    pub fn combine<T: NoUninit>(&self, values: &[T]) -> u32 {
        self.combine_bytes(bytemuck::cast_slice(values))
    }

    /// Hashes a raw byte stream. Never fails, never allocates; the empty
    /// stream hashes to the mix of the neutral accumulator 0.
    #[must_use]
    pub fn combine_bytes(&self, bytes: &[u8]) -> u32 {
        let whole = bytes.len() - bytes.len() % BLOCK_BYTES;
        let (blocks, rest) = bytes.split_at(whole);

        let mut lanes = [0u32; LANES];
        if !blocks.is_empty() {
            (self.block_fn)(&mut lanes, blocks);
        }

        // Horizontal fold. With zero blocks every lane is still 0, so this
        // leaves h at the neutral accumulator.
        let mut h = 0u32;
        for lane in lanes {
            h = h.wrapping_mul(PRIME) ^ lane;
        }

        mix32(drain(h, rest))
    }
}

impl Default for ContentHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Drains the sub-block remainder (`rest.len() < 32`) in decreasing chunk
/// widths: little-endian `u32` words, then one `u16`, then one byte, each
/// through the same multiply/XOR recurrence.
fn drain(mut h: u32, rest: &[u8]) -> u32 {
    let mut words = rest.chunks_exact(4);
    for word in &mut words {
        // chunks_exact(4) guarantees the conversion cannot fail.
        let w = u32::from_le_bytes([word[0], word[1], word[2], word[3]]);
        h = h.wrapping_mul(PRIME) ^ w;
    }

    let tail = words.remainder();
    if tail.len() >= 2 {
        let w = u32::from(u16::from_le_bytes([tail[0], tail[1]]));
        h = h.wrapping_mul(PRIME) ^ w;
    }
    if tail.len() % 2 == 1 {
        h = h.wrapping_mul(PRIME) ^ u32::from(tail[tail.len() - 1]);
    }
    h
}

/// 32-bit avalanche finalizer (xorshift-multiply). Spreads every input bit
/// across the whole output so nearby inputs don't cluster.
pub(crate) const fn mix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85EB_CA6B);
    h ^= h >> 13;
    h = h.wrapping_mul(0xC2B2_AE35);
    h ^= h >> 16;
    h
}

// ---------------------------------------------------------------------------
// Free functions (process-global hasher)
// ---------------------------------------------------------------------------

static GLOBAL: OnceLock<ContentHasher> = OnceLock::new();

fn global() -> &'static ContentHasher {
    GLOBAL.get_or_init(ContentHasher::new)
}

/// Hashes a typed slice with the process-global hasher.
///
/// See [`ContentHasher::combine`].
#[must_use]
pub fn combine<T: NoUninit>(values: &[T]) -> u32 {
    global().combine(values)
}

/// Hashes a byte stream with the process-global hasher.
///
/// See [`ContentHasher::combine_bytes`].
#[must_use]
pub fn combine_bytes(bytes: &[u8]) -> u32 {
    global().combine_bytes(bytes)
}

/// Hashes a slice of elements that cannot be viewed as plain bytes.
///
/// The safe fallback for types carrying references, padding, or interior
/// structure: each element's [`Hash`] output is folded through the same
/// `(*397, XOR)` recurrence and finalized with the same mixer. Slower than
/// [`combine`] and with a different bit pattern for the same logical data —
/// pick one form per call site and stick with it.
#[must_use]
pub fn combine_hashes<T: Hash>(values: &[T]) -> u32 {
    let mut h = 0u32;
    for value in values {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        let wide = hasher.finish();
        #[allow(clippy::cast_possible_truncation)]
        {
            h = h.wrapping_mul(PRIME) ^ (wide as u32);
            h = h.wrapping_mul(PRIME) ^ ((wide >> 32) as u32);
        }
    }
    mix32(h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stream_is_neutral() {
        // Neutral accumulator 0, mixed. mix32(0) == 0.
        assert_eq!(combine_bytes(&[]), 0);
        assert_eq!(combine::<u64>(&[]), 0);
    }

    #[test]
    fn test_idempotent_within_process() {
        let data: Vec<u8> = (0..=255).collect();
        assert_eq!(combine_bytes(&data), combine_bytes(&data));
    }

    #[test]
    fn test_typed_combine_matches_native_bytes() {
        let values = [0x1122_3344u32, 0x5566_7788, 0x99AA_BBCC];
        let mut bytes = Vec::new();
        for v in values {
            bytes.extend_from_slice(&v.to_ne_bytes());
        }
        assert_eq!(combine(&values), combine_bytes(&bytes));
    }

    #[test]
    fn test_single_bit_flip_changes_hash() {
        let mut data = vec![0u8; 64];
        let base = combine_bytes(&data);
        data[37] ^= 1;
        assert_ne!(combine_bytes(&data), base);
    }

    #[test]
    fn test_length_extension_changes_hash() {
        let data = [7u8; 40];
        assert_ne!(combine_bytes(&data[..39]), combine_bytes(&data));
    }

    #[test]
    fn test_all_levels_agree_across_drain_boundaries() {
        let data: Vec<u8> = (0..128u32).map(|i| (i.wrapping_mul(31) ^ 0xA5) as u8).collect();
        let reference = ContentHasher::with_level(SimdLevel::Scalar);
        for hasher in compiled_levels() {
            for len in 0..data.len() {
                assert_eq!(
                    hasher.combine_bytes(&data[..len]),
                    reference.combine_bytes(&data[..len]),
                    "level {:?} diverged at len {len}",
                    hasher.level()
                );
            }
        }
    }

    #[test]
    fn test_forcing_unavailable_level_still_hashes() {
        // with_level clamps to Scalar when the CPU can't run the request;
        // either way the output must match the reference.
        for hasher in compiled_levels() {
            assert_eq!(
                hasher.combine_bytes(b"fallback"),
                combine_bytes(b"fallback")
            );
        }
    }

    #[test]
    fn test_combine_hashes_is_deterministic() {
        let values = ["alpha", "beta", "gamma"];
        assert_eq!(combine_hashes(&values), combine_hashes(&values));
        assert_ne!(combine_hashes(&values), combine_hashes(&values[..2]));
    }

    /// Every level variant compiled into this binary.
    fn compiled_levels() -> Vec<ContentHasher> {
        let mut levels = vec![ContentHasher::with_level(SimdLevel::Scalar)];
        #[cfg(target_arch = "x86_64")]
        {
            levels.push(ContentHasher::with_level(SimdLevel::Sse41));
            levels.push(ContentHasher::with_level(SimdLevel::Avx2));
        }
        #[cfg(target_arch = "aarch64")]
        {
            levels.push(ContentHasher::with_level(SimdLevel::Neon));
        }
        levels
    }
}
