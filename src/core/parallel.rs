//! Parallel processing utilities

use crate::error::{PkgDiffError, Result};
use rayon::prelude::*;
use rayon::ThreadPool;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Progress update information for parallel operations
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub current: usize,
    pub total: usize,
    pub message: String,
}

impl ProgressUpdate {
    /// Create a new progress update
    pub fn new(current: usize, total: usize, message: impl Into<String>) -> Self {
        Self {
            current,
            total,
            message: message.into(),
        }
    }

}

/// Build a dedicated pool; `None` uses one thread per logical CPU
pub fn build_pool(threads: Option<usize>) -> Result<ThreadPool> {
    let threads = threads.unwrap_or_else(num_cpus::get).max(1);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("pkgdiff-scan-{}", i))
        .build()
        .map_err(|e| PkgDiffError::ParallelExecution {
            message: format!("failed to start {} scan threads: {}", threads, e),
        })
}

/// Apply `f` to every item in parallel, keeping input order and reporting
/// each completed item.
///
/// Every item is processed; on failure the error of the earliest failing
/// item in input order is returned, whichever worker finished first.
pub fn parallel_process_with_progress_and_errors<T, F, R, P>(
    items: &[T],
    f: F,
    progress_callback: P,
) -> Result<Vec<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> Result<R> + Send + Sync,
    P: Fn(ProgressUpdate) + Send + Sync,
{
    let total = items.len();
    let counter = AtomicUsize::new(0);

    let results: Vec<Result<R>> = items
        .par_iter()
        .map(|item| {
            let result = f(item);
            let done = counter.fetch_add(1, Ordering::Relaxed) + 1;
            progress_callback(ProgressUpdate::new(
                done,
                total,
                format!("Scanned {}/{} files", done, total),
            ));
            result
        })
        .collect();

    results.into_iter().collect()
}
