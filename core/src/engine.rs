//! Engine entry point
//!
//! Wires the pieces together for one run: validate the target and build the
//! HTTP issuer, schedule the workers, finalize the samples.

use std::sync::Arc;

use crate::config::BenchmarkConfig;
use crate::error::BenchResult;
use crate::finalize::finalize;
use crate::issuer::HttpIssuer;
use crate::progress::ProgressCallback;
use crate::result::BenchmarkResult;
use crate::scheduler::SchedulerBuilder;
use crate::traits::RequestIssuer;

/// Run a benchmark against `config.target`
///
/// `on_progress` receives the elapsed percentage of the configured duration
/// after every committed sample, possibly from several workers at once.
///
/// # Errors
///
/// Fails before any request is sent when the target is not an absolute
/// http(s) URL with a host, or the HTTP client cannot be built. Every
/// per-request problem is counted in the result instead.
pub async fn run<F>(config: BenchmarkConfig, on_progress: F) -> BenchResult<BenchmarkResult>
where
    F: Fn(f64) + Send + Sync + 'static,
{
    let issuer = HttpIssuer::new(&config)?;
    run_with_issuer(config, Arc::new(issuer), Some(Arc::new(on_progress))).await
}

/// Run a benchmark with a caller-supplied issuer
pub async fn run_with_issuer(
    config: BenchmarkConfig,
    issuer: Arc<dyn RequestIssuer>,
    on_progress: Option<ProgressCallback>,
) -> BenchResult<BenchmarkResult> {
    let mut builder = SchedulerBuilder::new().config(&config).issuer(issuer);
    if let Some(callback) = on_progress {
        builder = builder.on_progress(callback);
    }

    let output = builder.build()?.run().await?;
    Ok(finalize(&config, &output))
}
