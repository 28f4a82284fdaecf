//! Sample collection
//!
//! Workers never touch shared counters directly. Each committed exchange is
//! sent as a [`Sample`] over an mpsc channel to a single collector task that
//! owns the [`SampleCollector`], so appends are linearized by the channel and
//! the finalizer reads one consistent snapshot once every sender is gone.

use crate::error::ErrorKind;
use crate::response::RequestOutcome;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Success or failure of a committed exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Status in [200, 400)
    Success,
    /// Anything else, including transport errors and timeouts
    Failure,
}

/// One committed exchange
///
/// Kept small: a long run at high rate holds one of these per request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Success or failure
    pub outcome: Outcome,
    /// Send to full body consumption, absent when the exchange never completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<f64>,
    /// Response status code, when a response arrived
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Failure classification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
}

impl Sample {
    /// Build a sample from an issuer outcome
    pub fn from_outcome(outcome: &RequestOutcome) -> Self {
        Self {
            outcome: if outcome.is_success() {
                Outcome::Success
            } else {
                Outcome::Failure
            },
            latency_ms: outcome.latency().map(duration_ms),
            status_code: outcome.status(),
            error: outcome.error_kind(),
        }
    }

    /// A completed exchange with a known latency
    pub fn timed(latency_ms: f64, outcome: Outcome) -> Self {
        Self {
            outcome,
            latency_ms: Some(latency_ms),
            status_code: None,
            error: match outcome {
                Outcome::Success => None,
                Outcome::Failure => Some(ErrorKind::HttpStatus),
            },
        }
    }

    /// A failed exchange that never completed
    pub fn untimed(kind: ErrorKind) -> Self {
        Self {
            outcome: Outcome::Failure,
            latency_ms: None,
            status_code: None,
            error: Some(kind),
        }
    }

    /// Whether this sample contributes to latency statistics
    pub fn is_timed(&self) -> bool {
        self.latency_ms.is_some()
    }

    /// Whether the exchange succeeded
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }
}

/// Duration in fractional milliseconds
pub fn duration_ms(duration: std::time::Duration) -> f64 {
    duration.as_nanos() as f64 / 1_000_000.0
}

/// Failure counts by cause
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCounts {
    /// Responses with a status outside [200, 400) (timed)
    pub http_status: usize,
    /// Exchanges cancelled by the per-request timeout (untimed)
    pub timeouts: usize,
    /// Connection, DNS and other transport errors (untimed)
    pub transport: usize,
}

impl ErrorCounts {
    /// Count one failure
    pub fn record(&mut self, kind: ErrorKind) {
        match kind {
            ErrorKind::HttpStatus => self.http_status += 1,
            ErrorKind::Timeout => self.timeouts += 1,
            ErrorKind::Transport => self.transport += 1,
        }
    }

    /// Total failures
    pub fn total(&self) -> usize {
        self.http_status + self.timeouts + self.transport
    }
}

/// Accumulates the samples of one run
#[derive(Debug, Clone, Default)]
pub struct SampleCollector {
    samples: Vec<Sample>,
    successful: usize,
    failed: usize,
    errors: ErrorCounts,
}

impl SampleCollector {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain a sample channel until every sender is dropped
    pub async fn collect(mut samples_rx: mpsc::Receiver<Sample>) -> Self {
        let mut collector = Self::new();
        while let Some(sample) = samples_rx.recv().await {
            collector.add(sample);
        }
        tracing::debug!(
            samples = collector.len(),
            timed = collector.timed_count(),
            "Sample channel closed"
        );
        collector
    }

    /// Commit a sample
    pub fn add(&mut self, sample: Sample) {
        match sample.outcome {
            Outcome::Success => self.successful += 1,
            Outcome::Failure => {
                self.failed += 1;
                self.errors.record(sample.error.unwrap_or(ErrorKind::Transport));
            }
        }
        self.samples.push(sample);
    }

    /// Number of committed samples, timed or not
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if nothing was committed
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterate over committed samples in commit order
    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// Successful exchanges
    pub fn successful(&self) -> usize {
        self.successful
    }

    /// Failed exchanges, timed and untimed
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Successful plus failed
    pub fn total(&self) -> usize {
        self.successful + self.failed
    }

    /// Failure breakdown
    pub fn errors(&self) -> ErrorCounts {
        self.errors
    }

    /// Number of samples carrying a latency
    pub fn timed_count(&self) -> usize {
        self.samples.iter().filter(|s| s.is_timed()).count()
    }

    /// Latencies of timed samples, in commit order
    pub fn latencies_ms(&self) -> Vec<f64> {
        self.samples.iter().filter_map(|s| s.latency_ms).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_sample_from_outcomes() {
        let ok = Sample::from_outcome(&RequestOutcome::from_status(200, Duration::from_millis(12)));
        assert!(ok.is_success());
        assert_eq!(ok.latency_ms, Some(12.0));
        assert_eq!(ok.status_code, Some(200));
        assert_eq!(ok.error, None);

        let unavailable =
            Sample::from_outcome(&RequestOutcome::from_status(503, Duration::from_millis(8)));
        assert!(!unavailable.is_success());
        assert!(unavailable.is_timed());
        assert_eq!(unavailable.error, Some(ErrorKind::HttpStatus));

        let timeout = Sample::from_outcome(&RequestOutcome::Untimed(ErrorKind::Timeout));
        assert!(!timeout.is_timed());
        assert_eq!(timeout.error, Some(ErrorKind::Timeout));
    }

    #[test]
    fn test_collector_counts() {
        let mut collector = SampleCollector::new();
        assert!(collector.is_empty());

        collector.add(Sample::timed(10.0, Outcome::Success));
        collector.add(Sample::timed(20.0, Outcome::Success));
        collector.add(Sample::timed(30.0, Outcome::Failure));
        collector.add(Sample::untimed(ErrorKind::Timeout));
        collector.add(Sample::untimed(ErrorKind::Transport));

        assert_eq!(collector.len(), 5);
        assert_eq!(collector.successful(), 2);
        assert_eq!(collector.failed(), 3);
        assert_eq!(collector.total(), 5);
        assert_eq!(collector.timed_count(), 3);
        assert_eq!(collector.latencies_ms(), vec![10.0, 20.0, 30.0]);
        assert_eq!(
            collector.errors(),
            ErrorCounts {
                http_status: 1,
                timeouts: 1,
                transport: 1,
            }
        );
        assert_eq!(collector.errors().total(), collector.failed());
    }

    #[tokio::test]
    async fn test_collect_drains_concurrent_senders() {
        let (tx, rx) = mpsc::channel(8);
        let collector = tokio::spawn(SampleCollector::collect(rx));

        let mut senders = Vec::new();
        for _ in 0..4 {
            let tx = tx.clone();
            senders.push(tokio::spawn(async move {
                for i in 0..25 {
                    let sample = if i % 5 == 0 {
                        Sample::untimed(ErrorKind::Transport)
                    } else {
                        Sample::timed(i as f64, Outcome::Success)
                    };
                    tx.send(sample).await.unwrap();
                }
            }));
        }
        drop(tx);

        for sender in senders {
            sender.await.unwrap();
        }
        let collector = collector.await.unwrap();

        assert_eq!(collector.len(), 100);
        assert_eq!(collector.successful(), 80);
        assert_eq!(collector.failed(), 20);
        assert_eq!(collector.timed_count(), 80);
    }

    #[test]
    fn test_sample_serialization_skips_missing_latency() {
        let json = serde_json::to_string(&Sample::untimed(ErrorKind::Timeout)).unwrap();
        assert!(!json.contains("latency_ms"));
        assert!(json.contains("\"outcome\":\"failure\""));
        assert!(json.contains("\"error\":\"timeout\""));
    }

    #[test]
    fn test_sample_holds_only_what_statistics_need() {
        // One per request for the whole run; no per-sample clock reads or ids.
        assert!(std::mem::size_of::<Sample>() <= 32);

        let json = serde_json::to_value(Sample::timed(5.0, Outcome::Success)).unwrap();
        let fields: Vec<&str> = json
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(fields.len(), 2, "unexpected fields: {fields:?}");
        assert!(json.get("timestamp").is_none());
        assert!(json.get("worker_id").is_none());
    }
}
