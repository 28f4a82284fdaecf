//! Console summary of a finished run

use http_bench_core::BenchmarkResult;
use std::fmt::Write;

/// Render the results block printed after a run
pub fn render_summary(result: &BenchmarkResult) -> String {
    let mut out = String::new();
    let rule = "=".repeat(70);

    // Writing to a String cannot fail.
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "   Benchmark Results");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out);
    let _ = writeln!(out, "📊 Overall Statistics:");
    let _ = writeln!(out, "  Target:               {} {}", result.method, result.target);
    let _ = writeln!(out, "  Total Requests:       {}", result.total_requests);
    let _ = writeln!(
        out,
        "  Successful:           {} ({:.1}%)",
        result.successful_requests,
        result.success_rate() * 100.0
    );
    let _ = writeln!(out, "  Failed:               {}", result.failed_requests);
    let _ = writeln!(
        out,
        "  Duration:             {:.2} s ({} connections)",
        result.actual_duration_secs, result.connections
    );
    let _ = writeln!(
        out,
        "  Requests/Second:      {:.2}",
        result.requests_per_second
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "⏱️  Latency ({} timed samples):", result.timed_samples);
    let _ = writeln!(out, "  Average:              {:.2} ms", result.avg_latency_ms);
    let _ = writeln!(out, "  Min:                  {:.2} ms", result.min_latency_ms);
    let _ = writeln!(out, "  Max:                  {:.2} ms", result.max_latency_ms);
    let _ = writeln!(out, "  Median (P50):         {:.2} ms", result.p50_latency_ms);
    let _ = writeln!(out, "  95th Percentile:      {:.2} ms", result.p95_latency_ms);
    let _ = writeln!(out, "  99th Percentile:      {:.2} ms", result.p99_latency_ms);

    if result.failed_requests > 0 {
        let _ = writeln!(out);
        let _ = writeln!(out, "⚠️  Failures:");
        let _ = writeln!(out, "  HTTP Status:          {}", result.errors.http_status);
        let _ = writeln!(out, "  Timeouts:             {}", result.errors.timeouts);
        let _ = writeln!(out, "  Transport:            {}", result.errors.transport);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{rule}");
    out
}
