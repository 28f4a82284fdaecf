//! Progress reporting
//!
//! After every committed sample a worker reports how much of the configured
//! duration has elapsed, as a percentage capped at 100. Workers report
//! independently, so consecutive values seen by the callback may go
//! backwards; treat each value as the latest known elapsed fraction and clamp
//! on the consumer side.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Progress callback, receives a percentage in [0, 100]
pub type ProgressCallback = Arc<dyn Fn(f64) + Send + Sync>;

/// Computes and delivers progress for one run
///
/// Cheap to clone; every worker holds its own copy.
#[derive(Clone)]
pub struct ProgressReporter {
    start: Instant,
    duration: Duration,
    callback: Option<ProgressCallback>,
}

impl ProgressReporter {
    /// Create a reporter anchored at the run start
    pub fn new(start: Instant, duration: Duration, callback: Option<ProgressCallback>) -> Self {
        Self {
            start,
            duration,
            callback,
        }
    }

    /// A reporter that computes percentages but notifies nobody
    pub fn silent(start: Instant, duration: Duration) -> Self {
        Self::new(start, duration, None)
    }

    /// Percentage of the configured duration elapsed at `now`
    pub fn percent_at(&self, now: Instant) -> f64 {
        let duration_ms = self.duration.as_secs_f64() * 1000.0;
        if duration_ms <= 0.0 {
            return 100.0;
        }
        let elapsed_ms = now.saturating_duration_since(self.start).as_secs_f64() * 1000.0;
        (elapsed_ms / duration_ms * 100.0).min(100.0)
    }

    /// Compute the current percentage and hand it to the callback
    pub fn report(&self) -> f64 {
        let percent = self.percent_at(Instant::now());
        if let Some(callback) = &self.callback {
            callback(percent);
        }
        percent
    }
}

impl std::fmt::Debug for ProgressReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("duration", &self.duration)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}
