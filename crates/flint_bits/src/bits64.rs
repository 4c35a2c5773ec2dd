//! Branchless bit primitives over `u64`.
//!
//! Identical semantics to [`crate::bits32`], scaled to 64 bits. Bit 0 is
//! the least significant bit; positions and ranges outside `[0, 64)` give
//! unspecified (but panic-free) results, except for `has_lookup_flag`
//! whose domain check is part of the contract.

/// Word width in bits.
const WIDTH: u32 = 64;

/// Mask applied to every shift amount so misuse wraps instead of panicking.
const SHIFT_MASK: u32 = WIDTH - 1;

/// Returns whether bit `n` of `value` is set.
#[inline]
#[must_use]
pub const fn has_flag(value: u64, n: u32) -> bool {
    (value >> (n & SHIFT_MASK)) & 1 != 0
}

/// Returns `value` with bit `n` forced to `flag`, without branching on
/// `flag`.
#[inline]
#[must_use]
pub const fn set_flag(value: u64, n: u32, flag: bool) -> u64 {
    let s = n & SHIFT_MASK;
    (value & !(1 << s)) | ((flag as u64) << s)
}

/// Tests membership of `x` in a bitfield lookup table over the domain
/// `[min, min + 64)`.
///
/// Same contract as [`crate::bits32::has_lookup_flag`]: the wrapped
/// difference `x.wrapping_sub(min) as u64` doubles as the bounds check, so
/// any out-of-domain `x` (negative difference included) is a defined
/// non-member and the whole test stays branchless.
#[inline]
#[must_use]
pub const fn has_lookup_flag(table: u64, x: i64, min: i64) -> bool {
    let index = x.wrapping_sub(min) as u64;
    let in_range = (index < WIDTH as u64) as u64;
    (table >> (index as u32 & SHIFT_MASK)) & in_range != 0
}

/// Returns a mask of `length` low one-bits.
///
/// `low_mask(0) == 0`, `low_mask(64) == u64::MAX`; `length > 64` is
/// unspecified.
#[inline]
#[must_use]
pub const fn low_mask(length: u32) -> u64 {
    let all = 0u64.wrapping_sub((length != 0) as u64);
    (u64::MAX >> (WIDTH.wrapping_sub(length) & SHIFT_MASK)) & all
}

/// Extracts bits `[start, start + length)` of `value`, right-aligned.
///
/// Hardware `bextr` on x86_64 targets compiled with BMI1, shift+mask
/// elsewhere; the two agree for every in-contract input.
#[inline]
#[must_use]
pub fn extract_range(value: u64, start: u32, length: u32) -> u64 {
    #[cfg(all(target_arch = "x86_64", target_feature = "bmi1"))]
    {
        bextr(value, start, length)
    }
    #[cfg(not(all(target_arch = "x86_64", target_feature = "bmi1")))]
    {
        extract_range_portable(value, start, length)
    }
}

/// Shift+mask extract, the reference lowering on all targets.
#[cfg_attr(
    all(target_arch = "x86_64", target_feature = "bmi1"),
    allow(dead_code)
)]
#[inline]
const fn extract_range_portable(value: u64, start: u32, length: u32) -> u64 {
    (value >> (start & SHIFT_MASK)) & low_mask(length)
}

/// Hardware bit-field extract.
#[cfg(all(target_arch = "x86_64", target_feature = "bmi1"))]
#[allow(unsafe_code)]
#[inline]
fn bextr(value: u64, start: u32, length: u32) -> u64 {
    // SAFETY: gated on `target_feature = "bmi1"`, so the instruction is
    // statically guaranteed to exist on every CPU this build can run on.
    unsafe { core::arch::x86_64::_bextr_u64(value, start, length) }
}

/// Returns `value` with bits `[start, start + length)` replaced by the low
/// `length` bits of `flags`. Bits outside the range are preserved.
#[inline]
#[must_use]
pub const fn set_range(value: u64, start: u32, length: u32, flags: u64) -> u64 {
    let s = start & SHIFT_MASK;
    let mask = low_mask(length) << s;
    (value & !mask) | ((flags << s) & mask)
}
