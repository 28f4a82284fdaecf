//! Statistics finalizer
//!
//! Turns the samples of a finished run into a [`BenchmarkResult`]. Pure: the
//! same [`RunOutput`] always yields the same statistics.

use crate::config::BenchmarkConfig;
use crate::result::BenchmarkResult;
use crate::scheduler::RunOutput;

/// Nearest-rank percentile of an ascending slice, no interpolation
///
/// `index = ceil(count * p) - 1`, clamped to the slice. Empty input gives 0.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = (sorted.len() as f64 * p).ceil() as usize;
    let index = rank.saturating_sub(1).min(sorted.len() - 1);
    sorted[index]
}

/// Latency summary of a set of timed samples
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LatencySummary {
    /// Number of latencies
    pub count: usize,
    /// Mean
    pub avg: f64,
    /// Smallest
    pub min: f64,
    /// Largest
    pub max: f64,
    /// 50th percentile
    pub p50: f64,
    /// 95th percentile
    pub p95: f64,
    /// 99th percentile
    pub p99: f64,
}

impl LatencySummary {
    /// Summarize latencies given in any order
    pub fn from_latencies(mut latencies: Vec<f64>) -> Self {
        if latencies.is_empty() {
            return Self::default();
        }
        latencies.sort_by(|a, b| a.total_cmp(b));

        let count = latencies.len();
        let sum: f64 = latencies.iter().sum();

        Self {
            count,
            avg: sum / count as f64,
            min: latencies[0],
            max: latencies[count - 1],
            p50: percentile(&latencies, 0.50),
            p95: percentile(&latencies, 0.95),
            p99: percentile(&latencies, 0.99),
        }
    }
}

/// Build the result of a run
pub fn finalize(config: &BenchmarkConfig, output: &RunOutput) -> BenchmarkResult {
    let samples = &output.samples;
    let latency = LatencySummary::from_latencies(samples.latencies_ms());

    let total_requests = samples.total();
    let actual_secs = output.actual_duration.as_secs_f64();
    let requests_per_second = if total_requests == 0 || actual_secs <= 0.0 {
        0.0
    } else {
        total_requests as f64 / actual_secs
    };

    BenchmarkResult {
        target: config.target.clone(),
        method: config.method,
        timestamp: output.started_at,
        actual_duration_secs: actual_secs,
        configured_duration_secs: config.duration.as_secs_f64(),
        connections: config.connections,
        total_requests,
        successful_requests: samples.successful(),
        failed_requests: samples.failed(),
        requests_per_second,
        avg_latency_ms: latency.avg,
        min_latency_ms: latency.min,
        max_latency_ms: latency.max,
        p50_latency_ms: latency.p50,
        p95_latency_ms: latency.p95,
        p99_latency_ms: latency.p99,
        timed_samples: latency.count,
        errors: samples.errors(),
    }
}
