//! Parallel loop entry points.
//!
//! Each entry point validates its arguments, plans batches
//! ([`crate::plan`]), and either runs the whole domain on the caller
//! thread (one batch) or fans out over scoped worker threads and blocks
//! until every batch finished. The action is **cloned into each batch
//! closure** — any mutable state it shares by reference is the caller's
//! synchronization problem, by contract.
//!
//! Ordering: within a batch, indices are visited in increasing order.
//! Between batches there is no ordering at all.

use tracing::trace;

use crate::error::{ParallelError, ParallelResult};
use crate::plan::BatchPlan;

/// Invokes `action` once for every index in `[start, end)`, fanning out
/// across worker threads when the domain is large enough.
///
/// `min_actions_per_thread` throttles the split: no batch is created for
/// fewer indices than that, so tiny domains never pay thread overhead.
///
/// # Errors
///
/// [`ParallelError::InvalidMinActions`] if the throttle is zero,
/// [`ParallelError::InvertedRange`] if `start > end`. Both are raised
/// before any invocation of `action`; `start == end` is a no-op.
///
/// # Example
///
/// ```rust
/// use std::sync::atomic::{AtomicU64, Ordering};
///
/// let sum = AtomicU64::new(0);
/// flint_parallel::for_range(0, 1000, 1, |i| {
///     sum.fetch_add(i as u64, Ordering::Relaxed);
/// })
/// .unwrap();
/// assert_eq!(sum.load(Ordering::Relaxed), 499_500);
/// ```
pub fn for_range<F>(
    start: i64,
    end: i64,
    min_actions_per_thread: usize,
    action: F,
) -> ParallelResult<()>
where
    F: Fn(i64) + Clone + Send,
{
    if min_actions_per_thread == 0 {
        return Err(ParallelError::InvalidMinActions);
    }
    if start > end {
        return Err(ParallelError::InvertedRange { start, end });
    }

    // Two's-complement difference is the exact unsigned count even when
    // the bounds straddle zero.
    let count = usize::try_from(end.wrapping_sub(start) as u64).unwrap_or(usize::MAX);
    let plan = BatchPlan::new(count, min_actions_per_thread);

    let run_batch = |lo: usize, hi: usize, action: &F| {
        for offset in lo..hi {
            action(start + offset as i64);
        }
    };

    if plan.is_sequential() {
        trace!(count, "for_range: sequential fallback");
        run_batch(0, count, &action);
        return Ok(());
    }

    trace!(
        count,
        batches = plan.num_batches(),
        batch_size = plan.batch_size(),
        "for_range: parallel fan-out"
    );
    std::thread::scope(|scope| {
        let mut batches = plan.ranges();
        // The first batch runs here; only the rest get threads.
        let local = batches.next();
        for (lo, hi) in batches {
            let action = action.clone();
            scope.spawn(move || run_batch(lo, hi, &action));
        }
        if let Some((lo, hi)) = local {
            run_batch(lo, hi, &action);
        }
    });
    Ok(())
}

/// Invokes `action(row, col)` once for every cell of the rectangle
/// `[top, bottom) x [left, right)`.
///
/// Only rows are split across workers — a batch owns whole rows, never a
/// slice of one, because row-major actions have row-local cache affinity.
/// `min_rows_per_thread` therefore counts rows, and the batch count can
/// never exceed the height.
///
/// # Errors
///
/// [`ParallelError::InvalidMinActions`] if the throttle is zero,
/// [`ParallelError::InvertedRect`] if either axis is inverted. An empty
/// axis (`top == bottom` or `left == right`) is a no-op.
pub fn for_rect<F>(
    top: i64,
    bottom: i64,
    left: i64,
    right: i64,
    min_rows_per_thread: usize,
    action: F,
) -> ParallelResult<()>
where
    F: Fn(i64, i64) + Clone + Send,
{
    if min_rows_per_thread == 0 {
        return Err(ParallelError::InvalidMinActions);
    }
    if top > bottom || left > right {
        return Err(ParallelError::InvertedRect {
            top,
            bottom,
            left,
            right,
        });
    }
    if top == bottom || left == right {
        return Ok(());
    }

    let rows = usize::try_from(bottom.wrapping_sub(top) as u64).unwrap_or(usize::MAX);
    let plan = BatchPlan::new(rows, min_rows_per_thread);

    let run_rows = |lo: usize, hi: usize, action: &F| {
        for row_offset in lo..hi {
            let row = top + row_offset as i64;
            for col in left..right {
                action(row, col);
            }
        }
    };

    if plan.is_sequential() {
        trace!(rows, "for_rect: sequential fallback");
        run_rows(0, rows, &action);
        return Ok(());
    }

    trace!(
        rows,
        batches = plan.num_batches(),
        batch_size = plan.batch_size(),
        "for_rect: parallel fan-out"
    );
    std::thread::scope(|scope| {
        let mut batches = plan.ranges();
        let local = batches.next();
        for (lo, hi) in batches {
            let action = action.clone();
            scope.spawn(move || run_rows(lo, hi, &action));
        }
        if let Some((lo, hi)) = local {
            run_rows(lo, hi, &action);
        }
    });
    Ok(())
}

/// Invokes `action(index, &element)` once per element of `data`.
///
/// The flat-buffer form of [`for_range`]: same batching, but the action
/// receives a reference into the buffer instead of a bare index.
///
/// # Errors
///
/// [`ParallelError::InvalidMinActions`] if the throttle is zero. An empty
/// slice is a no-op.
pub fn for_slice<T, F>(data: &[T], min_actions_per_thread: usize, action: F) -> ParallelResult<()>
where
    T: Sync,
    F: Fn(usize, &T) + Clone + Send,
{
    if min_actions_per_thread == 0 {
        return Err(ParallelError::InvalidMinActions);
    }

    let plan = BatchPlan::new(data.len(), min_actions_per_thread);

    let run_batch = |lo: usize, hi: usize, action: &F| {
        for (index, element) in data[lo..hi].iter().enumerate() {
            action(lo + index, element);
        }
    };

    if plan.is_sequential() {
        trace!(len = data.len(), "for_slice: sequential fallback");
        run_batch(0, data.len(), &action);
        return Ok(());
    }

    trace!(
        len = data.len(),
        batches = plan.num_batches(),
        batch_size = plan.batch_size(),
        "for_slice: parallel fan-out"
    );
    std::thread::scope(|scope| {
        let mut batches = plan.ranges();
        let local = batches.next();
        for (lo, hi) in batches {
            let action = action.clone();
            scope.spawn(move || run_batch(lo, hi, &action));
        }
        if let Some((lo, hi)) = local {
            run_batch(lo, hi, &action);
        }
    });
    Ok(())
}

/// Invokes `action(row, col, &element)` once per cell of a row-major grid
/// view over `data`.
///
/// Rows are split across workers exactly as in [`for_rect`];
/// `min_rows_per_thread` counts rows.
///
/// # Errors
///
/// [`ParallelError::InvalidMinActions`] if the throttle is zero,
/// [`ParallelError::ShapeMismatch`] if `rows * cols != data.len()`. An
/// empty grid (`rows == 0` or `cols == 0` with an empty buffer) is a
/// no-op.
pub fn for_grid<T, F>(
    data: &[T],
    rows: usize,
    cols: usize,
    min_rows_per_thread: usize,
    action: F,
) -> ParallelResult<()>
where
    T: Sync,
    F: Fn(usize, usize, &T) + Clone + Send,
{
    if min_rows_per_thread == 0 {
        return Err(ParallelError::InvalidMinActions);
    }
    if rows.checked_mul(cols) != Some(data.len()) {
        return Err(ParallelError::ShapeMismatch {
            rows,
            cols,
            len: data.len(),
        });
    }
    if rows == 0 || cols == 0 {
        return Ok(());
    }

    let plan = BatchPlan::new(rows, min_rows_per_thread);

    let run_rows = |lo: usize, hi: usize, action: &F| {
        for row in lo..hi {
            let base = row * cols;
            for (col, element) in data[base..base + cols].iter().enumerate() {
                action(row, col, element);
            }
        }
    };

    if plan.is_sequential() {
        trace!(rows, cols, "for_grid: sequential fallback");
        run_rows(0, rows, &action);
        return Ok(());
    }

    trace!(
        rows,
        cols,
        batches = plan.num_batches(),
        batch_size = plan.batch_size(),
        "for_grid: parallel fan-out"
    );
    std::thread::scope(|scope| {
        let mut batches = plan.ranges();
        let local = batches.next();
        for (lo, hi) in batches {
            let action = action.clone();
            scope.spawn(move || run_rows(lo, hi, &action));
        }
        if let Some((lo, hi)) = local {
            run_rows(lo, hi, &action);
        }
    });
    Ok(())
}
