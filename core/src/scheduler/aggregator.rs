//! Roll-up of per-worker statistics

use std::time::Duration;

use crate::worker::WorkerStats;

/// Aggregated statistics from all workers
#[derive(Debug, Clone, Default)]
pub struct AggregatedStats {
    /// Number of workers that stopped normally
    pub total_workers: usize,

    /// Total successful requests
    pub total_completed: usize,

    /// Total failed requests
    pub total_errors: usize,

    /// Total requests that produced a latency
    pub total_timed: usize,

    /// Longest worker lifetime
    pub longest_worker: Duration,
}

impl AggregatedStats {
    /// Get the total number of requests (completed + errors)
    pub fn total_requests(&self) -> usize {
        self.total_completed + self.total_errors
    }

    /// Get the success rate (0.0 - 1.0)
    pub fn success_rate(&self) -> f64 {
        let total = self.total_requests();
        if total > 0 {
            self.total_completed as f64 / total as f64
        } else {
            0.0
        }
    }
}

/// Aggregate statistics from multiple workers
pub fn aggregate_worker_stats(stats: &[WorkerStats]) -> AggregatedStats {
    let mut merged = WorkerStats::new();
    for worker in stats {
        merged.merge(worker);
    }

    let longest_worker = stats
        .iter()
        .filter_map(|s| s.elapsed())
        .max()
        .unwrap_or(Duration::ZERO);

    AggregatedStats {
        total_workers: stats.len(),
        total_completed: merged.completed,
        total_errors: merged.errors,
        total_timed: merged.timed,
        longest_worker,
    }
}
