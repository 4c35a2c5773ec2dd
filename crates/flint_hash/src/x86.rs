//! x86_64 block-stage implementations (SSE4.1 and AVX2).
//!
//! Same lane recurrence as [`crate::scalar`], batched into vector
//! registers: AVX2 advances all eight lanes per instruction, SSE4.1 splits
//! them into two 128-bit groups. SSE4.1 is the floor because `pmulld`
//! (packed 32-bit multiply) does not exist in plain SSE2.
//!
//! Every `#[target_feature]` function here is reached only through
//! `resolve_block_fn`, which runs after the capability probe.

#![allow(unsafe_code)]

use std::arch::x86_64::{
    __m128i, __m256i, _mm256_loadu_si256, _mm256_mullo_epi32, _mm256_set1_epi32,
    _mm256_storeu_si256, _mm256_xor_si256, _mm_loadu_si128, _mm_mullo_epi32, _mm_set1_epi32,
    _mm_storeu_si128, _mm_xor_si128,
};

use crate::{BLOCK_BYTES, LANES, PRIME};

/// AVX2 block stage: one 256-bit register holds all eight lanes.
pub(crate) fn hash_blocks_avx2(lanes: &mut [u32; LANES], blocks: &[u8]) {
    debug_assert!(!blocks.is_empty() && blocks.len() % BLOCK_BYTES == 0);
    // SAFETY: only resolved as the block function after
    // `is_x86_feature_detected!("avx2")` reported true.
    unsafe { blocks_avx2(lanes, blocks) }
}

#[target_feature(enable = "avx2")]
unsafe fn blocks_avx2(lanes: &mut [u32; LANES], blocks: &[u8]) {
    let prime = _mm256_set1_epi32(PRIME as i32);

    // SAFETY: unaligned loads/stores; `lanes` is exactly 32 bytes and each
    // `chunks_exact` block is exactly 32 readable bytes.
    let mut acc = _mm256_loadu_si256(lanes.as_ptr().cast::<__m256i>());
    for block in blocks.chunks_exact(BLOCK_BYTES) {
        let chunk = _mm256_loadu_si256(block.as_ptr().cast::<__m256i>());
        acc = _mm256_xor_si256(_mm256_mullo_epi32(acc, prime), chunk);
    }
    _mm256_storeu_si256(lanes.as_mut_ptr().cast::<__m256i>(), acc);
}

/// SSE4.1 block stage: two 128-bit registers, four lanes each.
pub(crate) fn hash_blocks_sse41(lanes: &mut [u32; LANES], blocks: &[u8]) {
    debug_assert!(!blocks.is_empty() && blocks.len() % BLOCK_BYTES == 0);
    // SAFETY: only resolved as the block function after
    // `is_x86_feature_detected!("sse4.1")` reported true.
    unsafe { blocks_sse41(lanes, blocks) }
}

#[target_feature(enable = "sse4.1")]
unsafe fn blocks_sse41(lanes: &mut [u32; LANES], blocks: &[u8]) {
    let prime = _mm_set1_epi32(PRIME as i32);

    // SAFETY: unaligned loads/stores; lane halves and block halves are each
    // exactly 16 readable/writable bytes.
    let lo_ptr = lanes.as_ptr().cast::<__m128i>();
    let hi_ptr = lanes.as_ptr().add(4).cast::<__m128i>();
    let mut lo = _mm_loadu_si128(lo_ptr);
    let mut hi = _mm_loadu_si128(hi_ptr);

    for block in blocks.chunks_exact(BLOCK_BYTES) {
        let chunk_lo = _mm_loadu_si128(block.as_ptr().cast::<__m128i>());
        let chunk_hi = _mm_loadu_si128(block.as_ptr().add(16).cast::<__m128i>());
        lo = _mm_xor_si128(_mm_mullo_epi32(lo, prime), chunk_lo);
        hi = _mm_xor_si128(_mm_mullo_epi32(hi, prime), chunk_hi);
    }

    _mm_storeu_si128(lanes.as_mut_ptr().cast::<__m128i>(), lo);
    _mm_storeu_si128(lanes.as_mut_ptr().add(4).cast::<__m128i>(), hi);
}
