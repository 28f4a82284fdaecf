//! Builder pattern for Worker construction

use crate::error::{BenchError, BenchResult};
use crate::metrics::Sample;
use crate::progress::ProgressReporter;
use crate::traits::RequestIssuer;

use super::executor::Worker;

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Builder for creating Worker instances
///
/// # Example
/// ```ignore
/// let worker = WorkerBuilder::new(0)
///     .issuer(issuer)
///     .samples_tx(tx)
///     .progress(progress)
///     .deadline(start + duration)
///     .build()?;
/// ```
pub struct WorkerBuilder {
    id: usize,
    issuer: Option<Arc<dyn RequestIssuer>>,
    samples_tx: Option<mpsc::Sender<Sample>>,
    progress: Option<ProgressReporter>,
    deadline: Option<Instant>,
}

impl WorkerBuilder {
    /// Create a new builder with the given worker ID
    pub fn new(id: usize) -> Self {
        Self {
            id,
            issuer: None,
            samples_tx: None,
            progress: None,
            deadline: None,
        }
    }

    /// Set the request issuer
    pub fn issuer(mut self, issuer: Arc<dyn RequestIssuer>) -> Self {
        self.issuer = Some(issuer);
        self
    }

    /// Set the sample channel sender
    pub fn samples_tx(mut self, tx: mpsc::Sender<Sample>) -> Self {
        self.samples_tx = Some(tx);
        self
    }

    /// Set the progress reporter
    pub fn progress(mut self, progress: ProgressReporter) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Set the shared deadline
    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Build the Worker
    ///
    /// Without an explicit progress reporter the worker reports to nobody.
    ///
    /// # Errors
    /// Returns an error if the issuer, sender or deadline is missing.
    pub fn build(self) -> BenchResult<Worker> {
        let issuer = self.issuer.ok_or(BenchError::missing_config("issuer"))?;
        let samples_tx = self
            .samples_tx
            .ok_or(BenchError::missing_config("samples_tx"))?;
        let deadline = self
            .deadline
            .ok_or(BenchError::missing_config("deadline"))?;
        let progress = self.progress.unwrap_or_else(|| {
            ProgressReporter::silent(Instant::now(), deadline.saturating_duration_since(Instant::now()))
        });

        Ok(Worker::new(self.id, issuer, samples_tx, progress, deadline))
    }
}
