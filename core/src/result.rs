//! Benchmark result

use crate::metrics::ErrorCounts;
use crate::request::HttpMethod;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Final statistics of one run
///
/// Produced once by the finalizer and read-only afterwards. Latency figures
/// cover timed samples only; timeouts and transport errors count towards
/// `failed_requests` but never towards latency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Target URL
    pub target: String,
    /// HTTP method used
    pub method: HttpMethod,
    /// Run start time
    pub timestamp: DateTime<Utc>,

    /// Measured wall-clock length, drain included
    pub actual_duration_secs: f64,
    /// Configured run length
    pub configured_duration_secs: f64,
    /// Number of concurrent workers
    pub connections: usize,

    /// Successes plus failures
    pub total_requests: usize,
    /// Status in [200, 400)
    pub successful_requests: usize,
    /// Everything else, timed or not
    pub failed_requests: usize,
    /// `total_requests / actual_duration_secs`
    pub requests_per_second: f64,

    /// Mean latency
    pub avg_latency_ms: f64,
    /// Fastest timed exchange
    pub min_latency_ms: f64,
    /// Slowest timed exchange
    pub max_latency_ms: f64,
    /// Nearest-rank 50th percentile
    pub p50_latency_ms: f64,
    /// Nearest-rank 95th percentile
    pub p95_latency_ms: f64,
    /// Nearest-rank 99th percentile
    pub p99_latency_ms: f64,

    /// Size of the latency set
    pub timed_samples: usize,
    /// Failure breakdown
    pub errors: ErrorCounts,
}

impl BenchmarkResult {
    /// Fraction of requests that succeeded (0.0 - 1.0)
    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            self.successful_requests as f64 / self.total_requests as f64
        }
    }
}
