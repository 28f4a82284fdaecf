//! Scheduler execution logic

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::channel::ChannelConfig;
use crate::error::{BenchError, BenchResult};
use crate::metrics::SampleCollector;
use crate::progress::{ProgressCallback, ProgressReporter};
use crate::traits::RequestIssuer;
use crate::worker::{WorkerBuilder, WorkerStats};

use super::aggregator::aggregate_worker_stats;

/// Everything a finished run hands to the finalizer
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Wall-clock time the run started
    pub started_at: DateTime<Utc>,

    /// Start to the moment the last worker stopped
    pub actual_duration: Duration,

    /// Every committed sample
    pub samples: SampleCollector,

    /// Stats of workers that stopped normally
    pub worker_stats: Vec<WorkerStats>,
}

/// Scheduler starts N workers against one shared deadline and waits for all
/// of them, draining requests still in flight when the deadline passes.
pub struct Scheduler {
    duration: Duration,
    connections: usize,
    issuer: Arc<dyn RequestIssuer>,
    on_progress: Option<ProgressCallback>,
    channel_config: ChannelConfig,
}

impl Scheduler {
    /// Create a new scheduler
    ///
    /// Use `SchedulerBuilder` for a more ergonomic construction.
    pub fn new(
        duration: Duration,
        connections: usize,
        issuer: Arc<dyn RequestIssuer>,
        on_progress: Option<ProgressCallback>,
        channel_config: ChannelConfig,
    ) -> Self {
        Self {
            duration,
            connections,
            issuer,
            on_progress,
            channel_config,
        }
    }

    /// Configured run length
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Number of workers a run starts
    pub fn connections(&self) -> usize {
        self.connections
    }

    /// Run the benchmark
    ///
    /// Resolves once every worker has stopped and the collector has drained
    /// the channel.
    pub async fn run(&self) -> BenchResult<RunOutput> {
        let (samples_tx, samples_rx) = mpsc::channel(self.channel_config.samples_buffer);
        let collector = tokio::spawn(SampleCollector::collect(samples_rx));

        let started_at = Utc::now();
        let start = Instant::now();
        let deadline = start + self.duration;
        let progress = ProgressReporter::new(start, self.duration, self.on_progress.clone());

        tracing::info!(
            target_url = self.issuer.target(),
            connections = self.connections,
            duration_secs = self.duration.as_secs_f64(),
            "Starting benchmark"
        );

        let mut handles = Vec::with_capacity(self.connections);
        for worker_id in 0..self.connections {
            let worker = WorkerBuilder::new(worker_id)
                .issuer(Arc::clone(&self.issuer))
                .samples_tx(samples_tx.clone())
                .progress(progress.clone())
                .deadline(deadline)
                .build()?;

            handles.push(tokio::spawn(worker.run()));
        }
        // Workers hold the only senders now; the collector ends when they do.
        drop(samples_tx);

        let mut worker_stats = Vec::with_capacity(handles.len());
        for (idx, joined) in join_all(handles).await.into_iter().enumerate() {
            match joined {
                Ok(stats) => {
                    tracing::debug!(
                        worker_id = idx,
                        completed = stats.completed,
                        errors = stats.errors,
                        "Worker completed"
                    );
                    worker_stats.push(stats);
                }
                Err(e) => {
                    tracing::error!(worker_id = idx, error = %e, "Worker task panicked");
                }
            }
        }
        let actual_duration = start.elapsed();

        let samples = collector
            .await
            .map_err(|e| BenchError::scheduler(format!("sample collector failed: {e}")))?;

        let aggregated = aggregate_worker_stats(&worker_stats);
        tracing::info!(
            elapsed_secs = actual_duration.as_secs_f64(),
            drain_secs = aggregated
                .longest_worker
                .saturating_sub(self.duration)
                .as_secs_f64(),
            workers = aggregated.total_workers,
            lost_workers = self.connections - aggregated.total_workers,
            total_requests = aggregated.total_requests(),
            timed = aggregated.total_timed,
            success_rate = aggregated.success_rate(),
            "Benchmark completed"
        );

        Ok(RunOutput {
            started_at,
            actual_duration,
            samples,
            worker_stats,
        })
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("target", &self.issuer.target())
            .field("duration", &self.duration)
            .field("connections", &self.connections)
            .field("channel_config", &self.channel_config)
            .finish()
    }
}
