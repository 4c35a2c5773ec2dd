//! aarch64 NEON block-stage implementation.
//!
//! Same lane recurrence as [`crate::scalar`], batched into two 128-bit
//! vectors of four lanes each. NEON is baseline on aarch64, but the
//! capability probe still gates resolution so the dispatch shape matches
//! x86_64.

#![allow(unsafe_code)]

use std::arch::aarch64::{veorq_u32, vdupq_n_u32, vld1q_u32, vmulq_u32, vst1q_u32};

use crate::{BLOCK_BYTES, LANES, PRIME};

/// NEON block stage: two 128-bit registers, four lanes each.
pub(crate) fn hash_blocks_neon(lanes: &mut [u32; LANES], blocks: &[u8]) {
    debug_assert!(!blocks.is_empty() && blocks.len() % BLOCK_BYTES == 0);
    // SAFETY: only resolved as the block function after
    // `is_aarch64_feature_detected!("neon")` reported true.
    unsafe { blocks_neon(lanes, blocks) }
}

#[target_feature(enable = "neon")]
unsafe fn blocks_neon(lanes: &mut [u32; LANES], blocks: &[u8]) {
    let prime = vdupq_n_u32(PRIME);

    // SAFETY: `vld1q_u32`/`vst1q_u32` tolerate unaligned addresses on
    // aarch64; lane halves and block halves are each exactly 16 bytes.
    let mut lo = vld1q_u32(lanes.as_ptr());
    let mut hi = vld1q_u32(lanes.as_ptr().add(4));

    for block in blocks.chunks_exact(BLOCK_BYTES) {
        let chunk_lo = vld1q_u32(block.as_ptr().cast::<u32>());
        let chunk_hi = vld1q_u32(block.as_ptr().add(16).cast::<u32>());
        lo = veorq_u32(vmulq_u32(lo, prime), chunk_lo);
        hi = veorq_u32(vmulq_u32(hi, prime), chunk_hi);
    }

    vst1q_u32(lanes.as_mut_ptr(), lo);
    vst1q_u32(lanes.as_mut_ptr().add(4), hi);
}
