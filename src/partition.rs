use std::ops::Range;

use crate::error::{BenchError, BenchResult};

/// Contiguous slice bounds for each worker: `i*len/workers .. (i+1)*len/workers`.
pub fn slice_bounds(len: usize, workers: usize) -> BenchResult<Vec<Range<usize>>> {
    if workers == 0 {
        return Err(BenchError::InvalidWorkerCount(workers));
    }
    Ok((0..workers)
        .map(|i| (i * len / workers)..((i + 1) * len / workers))
        .collect())
}

/// Borrowing form of [`slice_bounds`] for callers that hold the workload as a
/// plain slice. The engine itself keeps requests behind an `Arc` and ships
/// ranges to its tasks instead.
pub fn partition<T>(items: &[T], workers: usize) -> BenchResult<Vec<&[T]>> {
    Ok(slice_bounds(items.len(), workers)?
        .into_iter()
        .map(|range| &items[range])
        .collect())
}
