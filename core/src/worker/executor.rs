//! Worker execution loop

use crate::metrics::Sample;
use crate::progress::ProgressReporter;
use crate::traits::RequestIssuer;

use super::stats::WorkerStats;

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Worker issues requests in a loop: check deadline -> issue -> commit -> report
///
/// A worker has at most one request outstanding. The deadline is only checked
/// before a new request starts, so a request in flight when the deadline
/// passes still completes and is committed; that is the drain.
pub struct Worker {
    /// Unique worker identifier
    id: usize,

    /// Request issuer (shared across workers via Arc)
    issuer: Arc<dyn RequestIssuer>,

    /// Channel sender for committed samples
    samples_tx: mpsc::Sender<Sample>,

    /// Progress reporter
    progress: ProgressReporter,

    /// Shared run deadline
    deadline: Instant,
}

impl Worker {
    /// Create a new worker
    pub fn new(
        id: usize,
        issuer: Arc<dyn RequestIssuer>,
        samples_tx: mpsc::Sender<Sample>,
        progress: ProgressReporter,
        deadline: Instant,
    ) -> Self {
        Self {
            id,
            issuer,
            samples_tx,
            progress,
            deadline,
        }
    }

    /// Run the worker loop until the deadline is observed
    ///
    /// Never fails: every request problem is already folded into a sample.
    pub async fn run(self) -> WorkerStats {
        let mut stats = WorkerStats::new();
        stats.start();

        tracing::debug!(worker_id = self.id, "Worker started");

        loop {
            if self.deadline_reached() {
                tracing::debug!(
                    worker_id = self.id,
                    completed = stats.completed,
                    errors = stats.errors,
                    "Worker reached deadline"
                );
                break;
            }

            let outcome = self.issuer.issue().await;
            stats.record(&outcome);

            if let Some(kind) = outcome.error_kind() {
                tracing::trace!(
                    worker_id = self.id,
                    error = %kind,
                    status = ?outcome.status(),
                    "Request failed"
                );
            }

            // Commit before reporting progress.
            let sample = Sample::from_outcome(&outcome);
            if self.samples_tx.send(sample).await.is_err() {
                tracing::warn!(
                    worker_id = self.id,
                    "Sample channel closed, worker stopping"
                );
                break;
            }

            self.progress.report();
        }

        stats.stop();
        tracing::debug!(
            worker_id = self.id,
            completed = stats.completed,
            errors = stats.errors,
            timed = stats.timed,
            success_rate = stats.success_rate(),
            elapsed_ms = ?stats.elapsed().map(|d| d.as_millis()),
            "Worker finished"
        );

        stats
    }

    fn deadline_reached(&self) -> bool {
        Instant::now() >= self.deadline
    }

    /// Get the worker ID
    pub fn id(&self) -> usize {
        self.id
    }
}

impl std::fmt::Debug for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worker")
            .field("id", &self.id)
            .field("target", &self.issuer.target())
            .field("progress", &self.progress)
            .field("deadline", &self.deadline)
            .finish()
    }
}
