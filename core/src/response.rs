//! Outcome of a single request/response exchange

pub use crate::error::ErrorKind;

use std::time::Duration;

/// Success range for response status codes
pub const SUCCESS_STATUS: std::ops::Range<u16> = 200..400;

/// Classify a status code: `true` when it lies in [200, 400)
pub fn is_success_status(status: u16) -> bool {
    SUCCESS_STATUS.contains(&status)
}

/// What happened when a worker issued one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Full response received, status in [200, 400)
    Success {
        /// HTTP status code
        status: u16,
        /// Send to full body consumption
        latency: Duration,
    },
    /// Full response received, status outside [200, 400)
    HttpFailure {
        /// HTTP status code
        status: u16,
        /// Send to full body consumption
        latency: Duration,
    },
    /// The exchange never completed; no latency to report
    Untimed(ErrorKind),
}

impl RequestOutcome {
    /// Build a timed outcome from a received status
    pub fn from_status(status: u16, latency: Duration) -> Self {
        if is_success_status(status) {
            RequestOutcome::Success { status, latency }
        } else {
            RequestOutcome::HttpFailure { status, latency }
        }
    }

    /// Whether the exchange counts as a success
    pub fn is_success(&self) -> bool {
        matches!(self, RequestOutcome::Success { .. })
    }

    /// Latency, for exchanges that completed
    pub fn latency(&self) -> Option<Duration> {
        match self {
            RequestOutcome::Success { latency, .. } | RequestOutcome::HttpFailure { latency, .. } => {
                Some(*latency)
            }
            RequestOutcome::Untimed(_) => None,
        }
    }

    /// Status code, for exchanges that completed
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestOutcome::Success { status, .. } | RequestOutcome::HttpFailure { status, .. } => {
                Some(*status)
            }
            RequestOutcome::Untimed(_) => None,
        }
    }

    /// Failure classification, `None` on success
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            RequestOutcome::Success { .. } => None,
            RequestOutcome::HttpFailure { .. } => Some(ErrorKind::HttpStatus),
            RequestOutcome::Untimed(kind) => Some(*kind),
        }
    }
}
