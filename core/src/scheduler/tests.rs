//! Tests for the Scheduler module

use super::aggregator::{aggregate_worker_stats, AggregatedStats};
use super::builder::SchedulerBuilder;
use crate::channel::ChannelConfig;
use crate::config::BenchmarkConfig;
use crate::error::ErrorKind;
use crate::progress::ProgressCallback;
use crate::request::HttpMethod;
use crate::response::RequestOutcome;
use crate::traits::RequestIssuer;
use crate::worker::WorkerStats;

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ============================================================================
// Mock RequestIssuer
// ============================================================================

struct MockIssuer {
    delay: Duration,
    statuses: Vec<Option<u16>>,
    panic_on_call: Option<usize>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockIssuer {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            statuses: vec![Some(200)],
            panic_on_call: None,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Cycle through statuses; `None` stands for a timeout
    fn with_statuses(mut self, statuses: Vec<Option<u16>>) -> Self {
        self.statuses = statuses;
        self
    }

    fn with_panic_on_call(mut self, call: usize) -> Self {
        self.panic_on_call = Some(call);
        self
    }

    fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RequestIssuer for MockIssuer {
    fn target(&self) -> &str {
        "mock://scheduler"
    }

    async fn issue(&self) -> RequestOutcome {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.panic_on_call == Some(n) {
            panic!("mock issuer exploded on call {n}");
        }

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.statuses[n % self.statuses.len()] {
            Some(status) => RequestOutcome::from_status(status, self.delay),
            None => RequestOutcome::Untimed(ErrorKind::Timeout),
        }
    }
}

fn scheduler_for(
    issuer: Arc<MockIssuer>,
    connections: usize,
    duration: Duration,
) -> super::Scheduler {
    SchedulerBuilder::new()
        .connections(connections)
        .duration(duration)
        .issuer(issuer)
        .build()
        .expect("Failed to build scheduler")
}

// ============================================================================
// Builder Tests
// ============================================================================

#[test]
fn test_builder_requires_issuer() {
    let result = SchedulerBuilder::new().build();
    let err = result.unwrap_err();
    assert!(err.is_config());
    assert!(err.message.contains("issuer"));
}

#[test]
fn test_builder_takes_shape_from_config() {
    let config = BenchmarkConfig::new("http://localhost:8080/", HttpMethod::Get)
        .with_duration(Duration::from_secs(3))
        .with_connections(7);

    let scheduler = SchedulerBuilder::new()
        .config(&config)
        .issuer(Arc::new(MockIssuer::new(Duration::ZERO)))
        .channel_config(ChannelConfig::default().with_samples_buffer(16))
        .build()
        .unwrap();

    assert_eq!(scheduler.duration(), Duration::from_secs(3));
    assert_eq!(scheduler.connections(), 7);
}

// ============================================================================
// Run Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_single_connection_fixed_latency() {
    let issuer = Arc::new(MockIssuer::new(Duration::from_millis(50)));
    let scheduler = scheduler_for(issuer, 1, Duration::from_secs(1));

    let output = scheduler.run().await.unwrap();

    assert_eq!(output.samples.total(), 20);
    assert_eq!(output.samples.successful(), 20);
    assert_eq!(output.samples.failed(), 0);
    assert_eq!(output.actual_duration, Duration::from_secs(1));
    assert!(output.samples.latencies_ms().iter().all(|l| *l == 50.0));
    assert_eq!(output.worker_stats.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_zero_connections_resolves_immediately() {
    let issuer = Arc::new(MockIssuer::new(Duration::from_millis(10)));
    let scheduler = scheduler_for(issuer, 0, Duration::from_secs(5));

    let output = scheduler.run().await.unwrap();

    assert!(output.samples.is_empty());
    assert!(output.worker_stats.is_empty());
    assert_eq!(output.actual_duration, Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_zero_duration_issues_nothing() {
    let issuer = Arc::new(MockIssuer::new(Duration::from_millis(10)));
    let scheduler = scheduler_for(issuer.clone(), 3, Duration::ZERO);

    let output = scheduler.run().await.unwrap();

    assert_eq!(output.samples.total(), 0);
    assert_eq!(output.worker_stats.len(), 3);
    assert_eq!(issuer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_in_flight_bounded_by_connections() {
    let issuer = Arc::new(MockIssuer::new(Duration::from_millis(30)));
    let scheduler = scheduler_for(issuer.clone(), 4, Duration::from_millis(500));

    let output = scheduler.run().await.unwrap();

    assert_eq!(issuer.max_in_flight(), 4);
    assert_eq!(output.worker_stats.len(), 4);
    // 17 requests per worker: starts at 0, 30, ..., 480 ms.
    assert_eq!(output.samples.total(), 4 * 17);
}

#[tokio::test(start_paused = true)]
async fn test_drain_extends_actual_duration() {
    let issuer = Arc::new(MockIssuer::new(Duration::from_millis(300)));
    let scheduler = scheduler_for(issuer, 2, Duration::from_secs(1));

    let output = scheduler.run().await.unwrap();

    // Last requests start at 900 ms and are drained at 1200 ms.
    assert!(output.actual_duration >= Duration::from_secs(1));
    assert_eq!(output.actual_duration, Duration::from_millis(1200));
    assert_eq!(output.samples.total(), 8);

    // The slowest worker's extent is what the completion log reports as drain.
    let aggregated = aggregate_worker_stats(&output.worker_stats);
    assert_eq!(aggregated.total_workers, 2);
    assert_eq!(aggregated.longest_worker, Duration::from_millis(1200));
    assert_eq!(
        aggregated.longest_worker.saturating_sub(Duration::from_secs(1)),
        Duration::from_millis(200)
    );
}

#[tokio::test(start_paused = true)]
async fn test_mixed_outcomes_keep_totals_consistent() {
    let issuer = Arc::new(
        MockIssuer::new(Duration::from_millis(100)).with_statuses(vec![
            Some(200),
            Some(503),
            None,
            Some(301),
        ]),
    );
    let scheduler = scheduler_for(issuer, 2, Duration::from_secs(2));

    let output = scheduler.run().await.unwrap();
    let samples = &output.samples;

    assert_eq!(samples.total(), 40);
    assert_eq!(samples.total(), samples.successful() + samples.failed());
    assert_eq!(samples.successful(), 20);
    assert_eq!(samples.errors().http_status, 10);
    assert_eq!(samples.errors().timeouts, 10);
    assert_eq!(samples.timed_count(), 30);

    let aggregated = aggregate_worker_stats(&output.worker_stats);
    assert_eq!(aggregated.total_requests(), samples.total());
    assert_eq!(aggregated.total_timed, samples.timed_count());
}

#[tokio::test(start_paused = true)]
async fn test_panicked_worker_is_skipped() {
    let issuer =
        Arc::new(MockIssuer::new(Duration::from_millis(100)).with_panic_on_call(2));
    let scheduler = scheduler_for(issuer, 2, Duration::from_secs(1));

    let output = scheduler.run().await.unwrap();

    // One worker dies on its second request after committing one sample; the
    // other runs its full ten.
    assert_eq!(output.worker_stats.len(), 1);
    assert_eq!(output.samples.total(), 11);
}

#[tokio::test(start_paused = true)]
async fn test_progress_reported_per_sample_and_capped() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let callback: ProgressCallback = Arc::new(move |p: f64| sink.lock().unwrap().push(p));

    let issuer = Arc::new(MockIssuer::new(Duration::from_millis(300)));
    let scheduler = SchedulerBuilder::new()
        .connections(2)
        .duration(Duration::from_secs(1))
        .issuer(issuer)
        .on_progress(callback)
        .build()
        .unwrap();

    let output = scheduler.run().await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), output.samples.total());
    assert!(seen.iter().all(|p| (0.0..=100.0).contains(p)));
    assert_eq!(seen.last().copied(), Some(100.0));
}

// ============================================================================
// Aggregator Tests
// ============================================================================

#[test]
fn test_aggregate_empty() {
    let aggregated = aggregate_worker_stats(&[]);
    assert_eq!(aggregated.total_workers, 0);
    assert_eq!(aggregated.total_requests(), 0);
    assert_eq!(aggregated.success_rate(), 0.0);
    assert_eq!(aggregated.longest_worker, Duration::ZERO);
}

#[test]
fn test_aggregate_sums_workers() {
    let stats = vec![
        WorkerStats {
            completed: 8,
            errors: 2,
            timed: 9,
            ..WorkerStats::default()
        },
        WorkerStats {
            completed: 2,
            errors: 0,
            timed: 2,
            ..WorkerStats::default()
        },
    ];

    let aggregated: AggregatedStats = aggregate_worker_stats(&stats);
    assert_eq!(aggregated.total_workers, 2);
    assert_eq!(aggregated.total_completed, 10);
    assert_eq!(aggregated.total_errors, 2);
    assert_eq!(aggregated.total_timed, 11);
    assert!((aggregated.success_rate() - 10.0 / 12.0).abs() < 1e-9);
}
