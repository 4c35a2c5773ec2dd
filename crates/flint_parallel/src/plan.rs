//! Batch planning: pure partition arithmetic, no threads.
//!
//! A plan divides `count` elements into contiguous batches. The guarantees:
//!
//! - Batches cover `[0, count)` exactly — no gaps, no overlaps.
//! - `num_batches <= min(ceil(count / min_actions_per_thread), workers)`,
//!   so declared parallelism is never exceeded. With a positive throttle
//!   this is also never more than `count`, which is what caps 2-D plans at
//!   one batch per row.
//! - A plan of one batch means "run sequentially on the caller thread".

use std::num::NonZeroUsize;

/// How `count` elements split into contiguous batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BatchPlan {
    /// Total elements to cover.
    count: usize,
    /// Number of batches (always >= 1, even for an empty domain).
    num_batches: usize,
    /// Elements per batch; the final batch may be shorter.
    batch_size: usize,
}

impl BatchPlan {
    /// Plans `count` elements with at least `min_actions_per_thread`
    /// elements per batch, capped by this CPU's worker count.
    ///
    /// `min_actions_per_thread` must be positive (validated by callers).
    pub(crate) fn new(count: usize, min_actions_per_thread: usize) -> Self {
        Self::with_workers(count, min_actions_per_thread, available_parallelism())
    }

    /// Same as [`BatchPlan::new`] with an explicit worker cap.
    pub(crate) fn with_workers(
        count: usize,
        min_actions_per_thread: usize,
        workers: usize,
    ) -> Self {
        debug_assert!(min_actions_per_thread > 0);
        let max_batches = count.div_ceil(min_actions_per_thread);
        let num_batches = max_batches.min(workers).max(1);
        let batch_size = count.div_ceil(num_batches);
        Self {
            count,
            num_batches,
            batch_size,
        }
    }

    /// Whether this plan runs on the caller thread alone.
    pub(crate) const fn is_sequential(&self) -> bool {
        self.num_batches <= 1
    }

    /// Number of batches.
    pub(crate) const fn num_batches(&self) -> usize {
        self.num_batches
    }

    /// Elements per batch (final batch may be shorter).
    pub(crate) const fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Iterates the non-empty batch offset ranges `[lo, hi)` in order.
    ///
    /// Rounding can leave trailing batches empty (e.g. 5 elements over 4
    /// workers plan as 2+2+1); empty batches are skipped so the executor
    /// never spawns an idle thread.
    pub(crate) fn ranges(self) -> impl Iterator<Item = (usize, usize)> {
        (0..self.num_batches)
            .map(move |i| {
                let lo = (i * self.batch_size).min(self.count);
                let hi = ((i + 1) * self.batch_size).min(self.count);
                (lo, hi)
            })
            .filter(|(lo, hi)| lo < hi)
    }
}

/// Worker threads this CPU offers; 1 when the query fails.
fn available_parallelism() -> usize {
    std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Exact cover: concatenated ranges reproduce `0..count` exactly.
    fn assert_exact_cover(plan: BatchPlan, count: usize) {
        let mut next = 0;
        for (lo, hi) in plan.ranges() {
            assert_eq!(lo, next, "gap or overlap at {lo} ({plan:?})");
            assert!(hi > lo);
            next = hi;
        }
        assert_eq!(next, count, "domain not fully covered ({plan:?})");
    }

    #[test]
    fn test_exact_cover_sweep() {
        for count in [0usize, 1, 2, 3, 5, 7, 16, 17, 100, 1023] {
            for min_actions in [1usize, 2, 3, 10, 1000] {
                for workers in [1usize, 2, 3, 4, 8, 64] {
                    let plan = BatchPlan::with_workers(count, min_actions, workers);
                    assert_exact_cover(plan, count);
                    assert!(plan.num_batches() <= workers.max(1));
                }
            }
        }
    }

    #[test]
    fn test_throttle_caps_batches() {
        // 10 elements, at least 4 each: at most ceil(10/4) = 3 batches,
        // even with plenty of workers.
        let plan = BatchPlan::with_workers(10, 4, 64);
        assert_eq!(plan.num_batches(), 3);
        assert_eq!(plan.batch_size(), 4);
    }

    #[test]
    fn test_workers_cap_batches() {
        let plan = BatchPlan::with_workers(1000, 1, 4);
        assert_eq!(plan.num_batches(), 4);
        assert_eq!(plan.batch_size(), 250);
    }

    #[test]
    fn test_never_more_batches_than_elements() {
        for count in 0..32 {
            let plan = BatchPlan::with_workers(count, 1, 64);
            assert!(plan.ranges().count() <= count.max(1));
        }
    }

    #[test]
    fn test_empty_domain_is_sequential_noop() {
        let plan = BatchPlan::with_workers(0, 1, 8);
        assert!(plan.is_sequential());
        assert_eq!(plan.ranges().count(), 0);
    }

    #[test]
    fn test_rounding_skips_empty_trailing_batch() {
        // 5 over 4 workers: sizes 2+2+1, fourth batch would start past the
        // end and must not appear.
        let plan = BatchPlan::with_workers(5, 1, 4);
        let ranges: Vec<_> = plan.ranges().collect();
        assert_eq!(ranges, vec![(0, 2), (2, 4), (4, 5)]);
    }

    #[test]
    fn test_live_parallelism_plan_covers() {
        // Whatever this machine reports, the cover property holds.
        for count in [0usize, 1, 97, 4096] {
            assert_exact_cover(BatchPlan::new(count, 1), count);
        }
    }
}
