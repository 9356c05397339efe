//! Dispatch policy: per-row fan-out vs. delegated internal parallelism

use std::ops::Range;

/// Which level of parallelism a `predict` call uses.
///
/// The two strategies are mutually exclusive: nesting per-row fan-out inside
/// a callee that also spawns threads oversubscribes the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStrategy {
    /// Partition rows across workers; each call gets a worker hint of 1.
    RowParallel,
    /// Sequential loop over rows; each call gets the full worker count and
    /// the compiled function parallelizes internally.
    Delegated,
}

impl DispatchStrategy {
    /// Pick a strategy for a batch of `n_samples` rows and `n_workers`
    /// available workers.
    ///
    /// Per-row fan-out only amortizes its dispatch overhead when there is
    /// clearly more data than workers: `n_samples > parallel_factor *
    /// n_workers`. Smaller batches delegate to the callee's internal
    /// parallelism instead.
    pub fn select(n_samples: usize, n_workers: usize, parallel_factor: usize) -> Self {
        if n_samples > parallel_factor.saturating_mul(n_workers) {
            Self::RowParallel
        } else {
            Self::Delegated
        }
    }
}

/// Statically partition `n_samples` row indices into exactly `n_blocks`
/// contiguous ranges whose sizes differ by at most one.
///
/// The partition is decided up front; there is no work stealing or
/// rebalancing. Blocks may be empty when `n_blocks > n_samples`.
pub fn partition_rows(n_samples: usize, n_blocks: usize) -> Vec<Range<usize>> {
    debug_assert!(n_blocks >= 1);
    (0..n_blocks)
        .map(|b| (b * n_samples / n_blocks)..((b + 1) * n_samples / n_blocks))
        .collect()
}
