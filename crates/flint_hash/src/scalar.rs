//! Scalar reference implementation of the block stage.
//!
//! This is the path every SIMD implementation must agree with, byte for
//! byte. Keep it boring.

use crate::{BLOCK_BYTES, LANES, PRIME};

/// Folds every 32-byte block of `blocks` into the lane accumulators.
///
/// `blocks.len()` must be a non-zero multiple of [`BLOCK_BYTES`]; the
/// dispatcher guarantees it.
pub(crate) fn hash_blocks(lanes: &mut [u32; LANES], blocks: &[u8]) {
    debug_assert!(!blocks.is_empty() && blocks.len() % BLOCK_BYTES == 0);

    for block in blocks.chunks_exact(BLOCK_BYTES) {
        for (lane, word) in lanes.iter_mut().zip(block.chunks_exact(4)) {
            let w = u32::from_le_bytes([word[0], word[1], word[2], word[3]]);
            *lane = lane.wrapping_mul(PRIME) ^ w;
        }
    }
}
