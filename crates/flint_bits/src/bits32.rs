//! Branchless bit primitives over `u32`.
//!
//! Bit 0 is the least significant bit. Positions and ranges outside
//! `[0, 32)` give unspecified (but panic-free) results; see the crate docs
//! for the full contract.

/// Word width in bits.
const WIDTH: u32 = 32;

/// Mask applied to every shift amount so misuse wraps instead of panicking.
const SHIFT_MASK: u32 = WIDTH - 1;

/// Returns whether bit `n` of `value` is set.
///
/// Branchless: shift, mask, compare. `n >= 32` wraps (unspecified result).
#[inline]
#[must_use]
pub const fn has_flag(value: u32, n: u32) -> bool {
    (value >> (n & SHIFT_MASK)) & 1 != 0
}

/// Returns `value` with bit `n` forced to `flag`.
///
/// Does not branch on `flag`: the bit is cleared, then `flag` (as 0/1) is
/// OR-ed into position.
#[inline]
#[must_use]
pub const fn set_flag(value: u32, n: u32, flag: bool) -> u32 {
    let s = n & SHIFT_MASK;
    (value & !(1 << s)) | ((flag as u32) << s)
}

/// Tests membership of `x` in a bitfield lookup table.
///
/// Bit `i` of `table` set means the value `i + min` is a member. Unlike the
/// other operations in this module, the domain check here is part of the
/// contract: any `x` outside `[min, min + 32)` returns `false` — including
/// `x < min`, where `x.wrapping_sub(min)` wraps to a huge unsigned index
/// and fails the width comparison. That wraparound IS the bounds check, so
/// the whole test stays branchless.
///
/// # Example
///
/// ```rust
/// use flint_bits::bits32::has_lookup_flag;
///
/// // Members: 10, 12 (bits 0 and 2, domain starts at 10).
/// let table = 0b101;
/// assert!(has_lookup_flag(table, 10, 10));
/// assert!(!has_lookup_flag(table, 11, 10));
/// assert!(has_lookup_flag(table, 12, 10));
/// assert!(!has_lookup_flag(table, 9, 10));   // below the domain
/// assert!(!has_lookup_flag(table, -5, 10));  // negative, still false
/// ```
#[inline]
#[must_use]
pub const fn has_lookup_flag(table: u32, x: i32, min: i32) -> bool {
    let index = x.wrapping_sub(min) as u32;
    let in_range = (index < WIDTH) as u32;
    (table >> (index & SHIFT_MASK)) & in_range != 0
}

/// Returns a mask of `length` low one-bits.
///
/// Branchless and correct at both edges: `low_mask(0) == 0`,
/// `low_mask(32) == u32::MAX`. `length > 32` is unspecified.
#[inline]
#[must_use]
pub const fn low_mask(length: u32) -> u32 {
    let all = 0u32.wrapping_sub((length != 0) as u32);
    (u32::MAX >> (WIDTH.wrapping_sub(length) & SHIFT_MASK)) & all
}

/// Extracts bits `[start, start + length)` of `value`, right-aligned.
///
/// On x86_64 targets compiled with BMI1 this is a single `bextr`
/// instruction; elsewhere it is shift+mask (which LLVM also lowers to
/// `bextr` when the feature is enabled at codegen). Both forms agree for
/// every in-contract input (`start + length <= 32`).
///
/// # Example
///
/// ```rust
/// use flint_bits::bits32::extract_range;
///
/// assert_eq!(extract_range(0b1011_0100, 2, 4), 0b1101);
/// ```
#[inline]
#[must_use]
pub fn extract_range(value: u32, start: u32, length: u32) -> u32 {
    #[cfg(all(target_arch = "x86_64", target_feature = "bmi1"))]
    {
        bextr(value, start, length)
    }
    #[cfg(not(all(target_arch = "x86_64", target_feature = "bmi1")))]
    {
        extract_range_portable(value, start, length)
    }
}

/// Shift+mask extract, kept compiled on all targets as the reference
/// lowering (cross-checked against `bextr` in tests on BMI1 builds).
#[cfg_attr(
    all(target_arch = "x86_64", target_feature = "bmi1"),
    allow(dead_code)
)]
#[inline]
const fn extract_range_portable(value: u32, start: u32, length: u32) -> u32 {
    (value >> (start & SHIFT_MASK)) & low_mask(length)
}

/// Hardware bit-field extract.
#[cfg(all(target_arch = "x86_64", target_feature = "bmi1"))]
#[allow(unsafe_code)]
#[inline]
fn bextr(value: u32, start: u32, length: u32) -> u32 {
    // SAFETY: gated on `target_feature = "bmi1"`, so the instruction is
    // statically guaranteed to exist on every CPU this build can run on.
    unsafe { core::arch::x86_64::_bextr_u32(value, start, length) }
}

/// Returns `value` with bits `[start, start + length)` replaced by the low
/// `length` bits of `flags`. Bits outside the range are preserved.
#[inline]
#[must_use]
pub const fn set_range(value: u32, start: u32, length: u32, flags: u32) -> u32 {
    let s = start & SHIFT_MASK;
    let mask = low_mask(length) << s;
    (value & !mask) | ((flags << s) & mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_has_roundtrip_every_bit() {
        let value = 0xDEAD_BEEF;
        for n in 0..32 {
            let set = set_flag(value, n, true);
            assert!(has_flag(set, n), "bit {n} not set");
            let cleared = set_flag(value, n, false);
            assert!(!has_flag(cleared, n), "bit {n} not cleared");

            // Every other bit is untouched.
            for m in 0..32 {
                if m != n {
                    assert_eq!(has_flag(set, m), has_flag(value, m));
                    assert_eq!(has_flag(cleared, m), has_flag(value, m));
                }
            }
        }
    }

    #[test]
    fn test_lookup_flag_matches_has_flag_in_domain() {
        let table = 0xA5A5_0F0F;
        for min in [-40i32, -1, 0, 7, 1000] {
            for offset in 0..32i32 {
                let x = min + offset;
                assert_eq!(
                    has_lookup_flag(table, x, min),
                    has_flag(table, offset as u32),
                    "table={table:#x} x={x} min={min}"
                );
            }
        }
    }

    #[test]
    fn test_lookup_flag_out_of_domain_is_false() {
        let table = u32::MAX; // every in-domain value is a member
        assert!(!has_lookup_flag(table, 9, 10)); // just below
        assert!(!has_lookup_flag(table, 42, 10)); // just above (10 + 32)
        assert!(!has_lookup_flag(table, -1, 10));
        assert!(!has_lookup_flag(table, i32::MIN, 10));
        assert!(!has_lookup_flag(table, i32::MAX, 10));
        assert!(!has_lookup_flag(table, i32::MAX, i32::MIN));
    }

    #[test]
    fn test_low_mask_edges() {
        assert_eq!(low_mask(0), 0);
        assert_eq!(low_mask(1), 1);
        assert_eq!(low_mask(5), 0b11111);
        assert_eq!(low_mask(31), u32::MAX >> 1);
        assert_eq!(low_mask(32), u32::MAX);
    }

    #[test]
    fn test_extract_range_hand_computed() {
        // (value, start, length, expected)
        let cases = [
            (0b1011_0100u32, 2, 4, 0b1101),
            (0b1011_0100, 0, 8, 0b1011_0100),
            (0xFFFF_0000, 16, 16, 0xFFFF),
            (0x1234_5678, 4, 12, 0x567),
            (0x8000_0001, 31, 1, 1),
            (0xDEAD_BEEF, 0, 32, 0xDEAD_BEEF),
        ];
        for (value, start, length, expected) in cases {
            assert_eq!(
                extract_range(value, start, length),
                expected,
                "extract({value:#x}, {start}, {length})"
            );
        }
    }

    #[test]
    fn test_set_range_preserves_outside_bits() {
        let value = 0xFFFF_FFFF;
        let out = set_range(value, 8, 8, 0);
        assert_eq!(out, 0xFFFF_00FF);

        let out = set_range(0, 4, 3, 0b101);
        assert_eq!(out, 0b101_0000);

        // Only the low `length` bits of `flags` are used.
        let out = set_range(0, 0, 4, 0xFF);
        assert_eq!(out, 0xF);
    }

    #[test]
    fn test_set_range_extract_range_roundtrip() {
        let value = 0x1234_5678;
        for start in 0..32 {
            for length in 1..=(32 - start) {
                let extracted = extract_range(value, start, length);
                assert_eq!(
                    set_range(value, start, length, extracted),
                    value,
                    "start={start} length={length}"
                );
            }
        }
    }

    #[cfg(all(target_arch = "x86_64", target_feature = "bmi1"))]
    #[test]
    fn test_bextr_agrees_with_portable() {
        let value = 0x9E37_79B9;
        for start in 0..32 {
            for length in 0..=(32 - start) {
                assert_eq!(
                    bextr(value, start, length),
                    extract_range_portable(value, start, length)
                );
            }
        }
    }
}
